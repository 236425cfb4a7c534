//! End-to-end runs: physics + scenario + configuration + scheme

use conslaw_rs::SolverError;
use conslaw_rs::physics::{FluxModel, Interval, Profile};
use conslaw_rs::solver::{
    BoundaryCondition, Domain, Grid, RunState, Scenario, Scheme, Solver, StepLimit,
    TimeStepConfig, TimeStepper,
};

mod common;
use common::{circular_centroid, periodic_distance, relative_error, BrokenFlux, LinearTransport};

// =================================================================================================
// Advection of a square pulse
// =================================================================================================

#[test]
fn test_square_pulse_advection_all_schemes() {
    let pulse = Profile::Indicator(Interval::new(0.4, 0.6).unwrap());
    let law = FluxModel::linear(1.0, pulse.into_fn());
    let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 100).unwrap());
    let config = TimeStepConfig::new(0.8, 0.5, 1e-3).with_record_stride(10);

    let initial = scenario.initial_grid().unwrap();
    assert_eq!(initial.state_sum(), 20.0);
    assert!((circular_centroid(&initial) - 0.5).abs() < 1e-9);

    for scheme in Scheme::ALL {
        let record = scheme.solve(&scenario, &config).unwrap();
        let last = record.last().unwrap();

        assert_eq!(last.time, 0.5);
        assert_eq!(last.grid.len(), 100);
        assert!(last.grid.first_non_finite().is_none(), "{} produced non-finite cells", scheme);

        if scheme.is_conservative() {
            let drift = relative_error(last.grid.state_sum(), 20.0);
            assert!(drift < 1e-12, "{}: mass drift {}", scheme, drift);
        }

        // Halfway through, the pulse center sits near 0.5 + t, not 0.5 − t
        let midway = record.iter().find(|snapshot| snapshot.step == 30).unwrap();
        assert!((midway.time - 0.24).abs() < 1e-12);
        let centroid = circular_centroid(&midway.grid);
        assert!(
            periodic_distance(centroid, 0.5 + midway.time, 1.0) < 0.05,
            "{}: centroid at {} for t = {}",
            scheme,
            centroid,
            midway.time
        );

        // The pulse center travels from 0.5 to 1.0 ≡ 0.0
        let centroid = circular_centroid(&last.grid);
        assert!(
            periodic_distance(centroid, 0.0, 1.0) < 0.1,
            "{}: centroid at {}",
            scheme,
            centroid
        );
    }
}

#[test]
fn test_record_layout_and_metadata() {
    let pulse = Profile::Indicator(Interval::new(0.4, 0.6).unwrap());
    let law = FluxModel::linear(1.0, pulse.into_fn());
    let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 100).unwrap());
    let config = TimeStepConfig::new(0.8, 0.5, 1e-3).with_record_stride(10);

    let record = Scheme::LaxWendroffFd.solve(&scenario, &config).unwrap();

    // dt = 0.008: 62 full steps and a shortened 63rd
    let steps: Vec<usize> = record.iter().map(|snapshot| snapshot.step).collect();
    assert_eq!(steps, vec![0, 10, 20, 30, 40, 50, 60, 63]);
    assert_eq!(record.first().unwrap().time, 0.0);

    assert_eq!(record.metadata.get("scheme"), Some(&"lw-fd".to_string()));
    assert_eq!(record.metadata.get("cells"), Some(&"100".to_string()));
    assert_eq!(record.metadata.get("steps"), Some(&"63".to_string()));
    assert_eq!(record.metadata.get("boundary"), Some(&"Periodic".to_string()));
}

#[test]
fn test_user_defined_law_matches_flux_model() {
    let profile = Profile::SawTooth { start: 0.2, end: 0.5 };
    let custom = LinearTransport::new(0.75, profile);
    let preset = FluxModel::linear(0.75, profile.into_fn());
    let domain = Domain::new(0.0, 1.0, 64).unwrap();
    let config = TimeStepConfig::new(0.9, 0.4, 1e-3);

    for scheme in Scheme::ALL {
        let from_custom = scheme.solve(&Scenario::new(&custom, domain), &config).unwrap();
        let from_preset = scheme.solve(&Scenario::new(&preset, domain), &config).unwrap();

        assert_eq!(from_custom.times(), from_preset.times());
        assert_eq!(from_custom.last(), from_preset.last());
    }
}

// =================================================================================================
// Burgers
// =================================================================================================

#[test]
fn test_burgers_shock_with_transmissive_boundaries() {
    // Riemann problem u = 1 | 0: shock at speed ½
    let law = FluxModel::burgers(Profile::Step { left: 1.0, right: 0.0, at: 0.3 }.into_fn());
    let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 100).unwrap());
    let config = TimeStepConfig::new(0.8, 0.4, 1e-3)
        .with_boundary(BoundaryCondition::Transmissive)
        .with_record_stride(20);

    let record = Scheme::LaxFriedrichsFv.solve(&scenario, &config).unwrap();
    let grid = &record.last().unwrap().grid;

    // Inflow f(1) = ½ through the left end, nothing leaves on the right
    let expected_mass = 0.3 + 0.5 * 0.4;
    assert!(relative_error(grid.total_mass(), expected_mass) < 1e-9);

    // Shock expected at 0.3 + ½·0.4 = 0.5
    let front = grid
        .as_slice()
        .iter()
        .position(|&u| u < 0.5)
        .map(|i| grid.domain().cell_center(i))
        .unwrap();
    assert!((front - 0.5).abs() < 0.05, "shock at {}", front);

    assert!((grid.get(5).unwrap() - 1.0).abs() < 1e-9);
    assert!(grid.get(95).unwrap().abs() < 1e-9);
}

#[test]
fn test_burgers_rarefaction_stays_bounded() {
    let law = FluxModel::burgers(Profile::Step { left: -0.5, right: 1.0, at: 0.5 }.into_fn());
    let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 80).unwrap());
    let config = TimeStepConfig::new(0.9, 0.2, 1e-3).with_boundary(BoundaryCondition::Transmissive);

    for scheme in [Scheme::LaxFriedrichsFd, Scheme::LaxFriedrichsFv] {
        let record = scheme.solve(&scenario, &config).unwrap();

        for snapshot in record.iter() {
            assert!(snapshot
                .grid
                .as_slice()
                .iter()
                .all(|&u| (-0.5 - 1e-12..=1.0 + 1e-12).contains(&u)));
        }
    }
}

#[test]
fn test_dirichlet_inflow_into_rest_state_respects_cfl() {
    // Interior at rest, u = 1 enters from the left: a_max comes from the ghost
    let law = FluxModel::burgers(|_| 0.0);
    let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 100).unwrap());
    let config = TimeStepConfig::new(0.8, 0.3, 0.1)
        .with_boundary(BoundaryCondition::Dirichlet { left: 1.0, right: 0.0 });

    let mut stepper = TimeStepper::new(&scenario, Scheme::LaxFriedrichsFd, &config).unwrap();

    // dt = 0.8 * 0.01 / 1
    let first = stepper.advance().unwrap().unwrap();
    assert_eq!(first.limit, StepLimit::Cfl);
    assert!((first.dt - 0.008).abs() < 1e-12);

    while let Some(report) = stepper.advance().unwrap() {
        assert_ne!(report.limit, StepLimit::Fallback);
    }

    assert_eq!(stepper.state(), RunState::Completed);
    for &u in stepper.grid().as_slice() {
        assert!((-1e-12..=1.0 + 1e-12).contains(&u), "{} out of [0, 1]", u);
    }
}

#[test]
fn test_zero_state_uses_fallback_step() {
    let law = FluxModel::burgers(|_| 0.0);
    let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 20).unwrap());
    let config = TimeStepConfig::new(0.5, 0.1, 0.025);

    let mut stepper = TimeStepper::new(&scenario, Scheme::LaxWendroffFd, &config).unwrap();
    let mut limits = Vec::new();
    while let Some(report) = stepper.advance().unwrap() {
        limits.push(report.limit);
    }

    assert!(limits.iter().all(|&limit| limit != StepLimit::Cfl));
    assert_eq!(stepper.time(), 0.1);
}

// =================================================================================================
// Failures
// =================================================================================================

#[test]
fn test_instability_detected_above_unit_cfl() {
    // dt = 4 dx violates the CFL condition; the run must blow up and be caught
    let pulse = Profile::Indicator(Interval::new(0.4, 0.6).unwrap());
    let law = FluxModel::linear(1.0, pulse.into_fn());
    let mut grid = Grid::from_law(Domain::new(0.0, 1.0, 100).unwrap(), &law).unwrap();
    let dt = 4.0 * grid.dx();

    let mut time = 0.0;
    let mut failure = None;

    for _ in 0..2000 {
        match Scheme::LaxFriedrichsFd.advance(&grid, &law, &BoundaryCondition::Periodic, dt, time) {
            Ok(update) => {
                grid.replace(update.into_state()).unwrap();
                time += dt;
            }
            Err(error) => {
                failure = Some(error);
                break;
            }
        }
    }

    match failure {
        Some(SolverError::Instability { scheme, time: failed_at, cell, value }) => {
            assert_eq!(scheme, Scheme::LaxFriedrichsFd);
            assert!(failed_at > time);
            assert!(cell < 100);
            assert!(!value.is_finite());
        }
        other => panic!("expected an instability, got {:?}", other),
    }
}

#[test]
fn test_unsafe_fixed_step_fails_before_update() {
    let law = LinearTransport::new(1.0, Profile::Wavelet);
    let scenario = Scenario::new(&law, Domain::new(-2.0, 2.0, 100).unwrap());
    // dt = 0.1 while the CFL limit is 0.8·0.04 = 0.032
    let config = TimeStepConfig::new(0.8, 1.0, 1e-3).with_fixed_steps(10);

    let result = Scheme::LaxWendroffFv.solve(&scenario, &config);

    match result {
        Err(SolverError::UnsafeTimeStep { dt, limit }) => {
            assert!((dt - 0.1).abs() < 1e-12);
            assert!((limit - 0.032).abs() < 1e-12);
        }
        other => panic!("expected an unsafe time step, got {:?}", other),
    }
}

#[test]
fn test_safe_fixed_steps_complete() {
    let law = LinearTransport::new(1.0, Profile::Wavelet);
    let scenario = Scenario::new(&law, Domain::new(-2.0, 2.0, 100).unwrap());
    let config = TimeStepConfig::new(0.8, 1.0, 1e-3).with_fixed_steps(50);

    let record = Scheme::LaxWendroffFv.solve(&scenario, &config).unwrap();

    assert_eq!(record.len(), 51);
    assert_eq!(record.last().unwrap().time, 1.0);
}

#[test]
fn test_broken_law_fails_run() {
    let law = BrokenFlux;
    let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 10).unwrap());
    let config = TimeStepConfig::new(0.5, 1.0, 1e-3);

    let mut stepper = TimeStepper::new(&scenario, Scheme::LaxFriedrichsFd, &config).unwrap();

    let error = stepper.advance().unwrap_err();
    assert!(error.is_numerical());
    assert_eq!(stepper.state(), RunState::Failed);
    assert!(stepper.advance().is_err());

    assert!(matches!(
        Scheme::LaxWendroffFv.solve(&scenario, &config),
        Err(SolverError::Instability { .. })
    ));
}

#[test]
fn test_invalid_inputs_are_rejected_before_running() {
    let law = FluxModel::linear(1.0, |_| 0.0);

    assert!(Domain::new(0.0, 1.0, 1).is_err());
    assert!(Domain::new(1.0, 0.0, 10).is_err());

    let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 10).unwrap());
    for config in [
        TimeStepConfig::new(0.0, 1.0, 1e-3),
        TimeStepConfig::new(1.5, 1.0, 1e-3),
        TimeStepConfig::new(0.5, -1.0, 1e-3),
        TimeStepConfig::new(0.5, 1.0, 1e-3).with_record_stride(0),
    ] {
        let result = Scheme::LaxFriedrichsFv.solve(&scenario, &config);
        assert!(matches!(result, Err(SolverError::Configuration(_))));
    }
}
