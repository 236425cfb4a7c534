//! Simulation loop
//!
//! [`TimeStepper`] owns the grid for the duration of a run and alternates
//! between the [`StabilityController`] (how far to step) and the selected
//! [`Scheme`] (what the next layer is).
//!
//! # State Machine
//!
//! ```text
//!                 advance()              time reaches T
//! Initialized ───────────────► Running ─────────────────► Completed
//!                                 │
//!                                 │ instability / unsafe dt
//!                                 ▼
//!                               Failed
//! ```
//!
//! Failures are terminal: a failed run keeps returning the same error and
//! never retries.
//!
//! # Time Bookkeeping
//!
//! - Adaptive mode adds the controller's `dt` to the current time; the last
//!   step is clamped so the run lands exactly on T.
//! - Fixed mode computes step `k` at `k·dt` instead of accumulating, and the
//!   last step is assigned T.

use crate::error::SolverError;
use crate::physics::ConservationLaw;
use crate::solver::{
    Grid, Scenario, Scheme, SimulationRecord, StabilityController, StepLimit, TimeStepConfig,
    TimeStepMode,
};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Running,
    Completed,
    Failed,
}

/// Summary of one completed step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Steps taken so far, including this one
    pub step: usize,

    /// Time after the step
    pub time: f64,

    /// Step size used
    pub dt: f64,

    /// What bounded `dt`
    pub limit: StepLimit,

    /// Whether a snapshot was recorded after this step
    pub recorded: bool,
}

/// Drives one simulation run
///
/// # Example
///
/// ```rust
/// use conslaw_rs::physics::{FluxModel, Interval, Profile};
/// use conslaw_rs::solver::{Domain, RunState, Scenario, Scheme, TimeStepConfig, TimeStepper};
///
/// let pulse = Profile::Indicator(Interval::new(0.4, 0.6).unwrap());
/// let law = FluxModel::linear(1.0, pulse.into_fn());
/// let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 100).unwrap());
/// let config = TimeStepConfig::new(0.8, 0.5, 1e-3).with_record_stride(10);
///
/// let mut stepper = TimeStepper::new(&scenario, Scheme::LaxFriedrichsFv, &config).unwrap();
/// while let Some(report) = stepper.advance().unwrap() {
///     assert!(report.dt > 0.0);
/// }
///
/// assert_eq!(stepper.state(), RunState::Completed);
/// assert_eq!(stepper.time(), 0.5);
/// ```
pub struct TimeStepper<'a> {
    law: &'a dyn ConservationLaw,
    scheme: Scheme,
    config: TimeStepConfig,
    controller: StabilityController,
    grid: Grid,
    time: f64,
    steps: usize,
    state: RunState,
    record: SimulationRecord,
    failure: Option<SolverError>,
}

impl<'a> TimeStepper<'a> {
    /// Validate the inputs and sample the initial grid
    ///
    /// The initial state is recorded at t = 0.
    ///
    /// # Errors
    ///
    /// `SolverError::Configuration` for an invalid configuration, domain or
    /// initial condition.
    pub fn new(
        scenario: &Scenario<'a>,
        scheme: Scheme,
        config: &TimeStepConfig,
    ) -> Result<Self, SolverError> {
        config.validate()?;
        scenario.validate()?;

        let controller = StabilityController::new(config.cfl, config.fallback_dt)?;
        let grid = scenario.initial_grid()?;

        let mut record = SimulationRecord::new();
        record.push(0, 0.0, &grid);
        record.add_metadata("scheme", scheme.short_name());
        record.add_metadata("law", scenario.law_name());
        record.add_metadata("cells", &grid.len().to_string());
        record.add_metadata("interval", &scenario.domain.interval().to_string());
        record.add_metadata("boundary", &config.boundary.to_string());
        record.add_metadata("cfl", &config.cfl.to_string());
        record.add_metadata("final_time", &config.final_time.to_string());

        Ok(Self {
            law: scenario.law,
            scheme,
            config: *config,
            controller,
            grid,
            time: 0.0,
            steps: 0,
            state: RunState::Initialized,
            record,
            failure: None,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Current simulation time
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Snapshots recorded so far
    pub fn record(&self) -> &SimulationRecord {
        &self.record
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn config(&self) -> &TimeStepConfig {
        &self.config
    }

    /// Error that ended the run, if any
    pub fn failure(&self) -> Option<&SolverError> {
        self.failure.as_ref()
    }

    /// Take one step
    ///
    /// Returns `Ok(None)` once the run is completed.
    ///
    /// # Errors
    ///
    /// The first failure moves the run to [`RunState::Failed`]; this call and
    /// every later one return that failure.
    pub fn advance(&mut self) -> Result<Option<StepReport>, SolverError> {
        match self.state {
            RunState::Completed => return Ok(None),
            RunState::Failed => {
                return Err(self
                    .failure
                    .clone()
                    .unwrap_or_else(|| SolverError::configuration("Run already failed")));
            }
            RunState::Initialized => {
                log::info!(
                    "Starting {} on '{}': {} cells, CFL {}, T = {}",
                    self.scheme,
                    self.law.name(),
                    self.grid.len(),
                    self.config.cfl,
                    self.config.final_time
                );
                self.state = RunState::Running;
            }
            RunState::Running => {}
        }

        match self.step() {
            Ok(report) => Ok(Some(report)),
            Err(error) => {
                log::error!("{} failed after {} steps: {}", self.scheme, self.steps, error);
                self.state = RunState::Failed;
                self.failure = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Step until the horizon and return the record
    ///
    /// A failed run yields its error; no partial record is returned.
    pub fn run(mut self) -> Result<SimulationRecord, SolverError> {
        while self.advance()?.is_some() {}
        Ok(self.record)
    }

    fn step(&mut self) -> Result<StepReport, SolverError> {
        let final_time = self.config.final_time;

        // ====== Step size ======

        let (dt, limit, next_time, finished) = match self.config.mode {
            TimeStepMode::Adaptive => {
                let step = self.controller.time_step(
                    &self.grid,
                    self.law,
                    &self.config.boundary,
                    final_time - self.time,
                )?;

                if step.limit == StepLimit::Horizon {
                    (step.dt, step.limit, final_time, true)
                } else {
                    let next_time = (self.time + step.dt).min(final_time);
                    (step.dt, step.limit, next_time, next_time >= final_time)
                }
            }
            TimeStepMode::Fixed { steps } => {
                let dt = final_time / steps as f64;
                self.controller.check(dt, &self.grid, self.law, &self.config.boundary)?;

                let next_step = self.steps + 1;
                if next_step >= steps {
                    (dt, StepLimit::Fixed, final_time, true)
                } else {
                    (dt, StepLimit::Fixed, next_step as f64 * dt, false)
                }
            }
        };

        if next_time <= self.time {
            return Err(SolverError::Stalled { time: self.time, dt });
        }

        // ====== Update ======

        let update = self
            .scheme
            .advance(&self.grid, self.law, &self.config.boundary, dt, self.time)?;
        self.grid.replace(update.into_state())?;

        self.time = next_time;
        self.steps += 1;

        log::debug!(
            "step {}: t = {:.6}, dt = {:.3e} ({})",
            self.steps,
            self.time,
            dt,
            limit
        );

        // ====== Recording ======

        let recorded = finished || self.steps % self.config.record_stride == 0;
        if recorded {
            self.record.push(self.steps, self.time, &self.grid);
        }

        if finished {
            self.record.add_metadata("steps", &self.steps.to_string());
            self.state = RunState::Completed;
            log::info!(
                "{} completed: {} steps, t = {}",
                self.scheme,
                self.steps,
                self.time
            );
        }

        Ok(StepReport {
            step: self.steps,
            time: self.time,
            dt,
            limit,
            recorded,
        })
    }
}

impl std::fmt::Debug for TimeStepper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeStepper")
            .field("law", &self.law.name())
            .field("scheme", &self.scheme)
            .field("state", &self.state)
            .field("time", &self.time)
            .field("steps", &self.steps)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
