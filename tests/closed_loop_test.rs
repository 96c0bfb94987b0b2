//! Integration tests for the PID controller and its closed-loop harness

#![allow(deprecated)]

use pid_controller::config::PidConfig;
use pid_controller::io::json::ResponseSummary;
use pid_controller::plant::{FirstOrderLag, MassSpringDamper};
use pid_controller::sim::event::{CrossingDetector, EventDetector, EventKind, SaturationDetector};
use pid_controller::sim::{detect_events, simulate_with, SimConfig};
use pid_controller::{Controller, ControlMode, LegacyPidController, PidController};

const TOL: f64 = 1e-9;

// ============================================================================
// CONTROL LAW SCENARIOS
// ============================================================================

#[test]
fn test_proportional_scenario() {
    let pid = PidController::new(1.0, 0.0, 0.0, 10.0);
    assert_eq!(pid.update_p(5.0), 5.0);
    assert_eq!(pid.update_p(20.0), 10.0, "Output should clamp to +max");
    assert_eq!(pid.update_p(-20.0), -10.0, "Output should clamp to -max");
}

#[test]
fn test_integral_scenario() {
    let mut pid = PidController::new(0.0, 1.0, 0.0, 1000.0);
    assert!((pid.update(2.0, 1.0) - 2.0).abs() < TOL);
    assert!((pid.update(2.0, 1.0) - 4.0).abs() < TOL, "Integral should accumulate to 4");
}

#[test]
fn test_p_only_matches_clamped_product_for_any_history() {
    let mut pid = PidController::new(-1.7, 0.3, 0.9, 4.0);
    let errors = [-10.0, -2.5, -0.1, 0.0, 0.3, 2.2, 9.0];
    for (k, &e) in errors.iter().enumerate() {
        pid.update(e * 0.5, 0.01 * (k + 1) as f64);
        let expected = (-1.7 * e).clamp(-4.0, 4.0);
        assert_eq!(pid.update_p(e), expected);
    }
}

#[test]
fn test_reset_restores_fresh_behavior() {
    let mut used = PidController::new(0.8, 0.4, 0.2, 25.0);
    for k in 0..50 {
        used.update((k as f64 * 0.37).sin(), 0.02);
    }
    used.reset();
    assert_eq!(used.prev_error(), 0.0);
    assert_eq!(used.integral_error(), 0.0);

    let mut fresh = PidController::new(0.8, 0.4, 0.2, 25.0);
    for &(e, dt) in &[(1.0, 0.1), (0.5, 0.05), (-0.25, 0.2)] {
        assert_eq!(used.update(e, dt), fresh.update(e, dt));
    }
}

#[test]
fn test_guard_is_idempotent() {
    let mut pid = PidController::new(1.0, 2.0, 3.0, 100.0);
    pid.update(0.5, 0.1);
    let before = (pid.prev_error(), pid.integral_error());

    for _ in 0..10 {
        assert_eq!(pid.update(f64::NAN, 0.1), 0.0);
        assert_eq!(pid.update(0.5, 0.0), 0.0);
    }
    assert_eq!((pid.prev_error(), pid.integral_error()), before);
}

#[test]
fn test_saturation_is_exact_and_signed() {
    let mut pid = PidController::new(3.0, 1.0, 0.5, 1.25);
    assert_eq!(pid.update(10.0, 0.1), 1.25);
    pid.reset();
    assert_eq!(pid.update(-10.0, 0.1), -1.25);
}

#[test]
fn test_integral_grows_linearly() {
    let (e, dt) = (1.5, 0.004);
    let mut pid = PidController::new(0.0, 0.1, 0.0, 1e9);
    for n in 1..=250 {
        pid.update(e, dt);
        assert!((pid.integral_error() - n as f64 * e * dt).abs() < 1e-9);
    }
}

#[test]
fn test_derivative_contribution() {
    let mut pid = PidController::new(0.0, 0.0, 2.0, 1e9);
    pid.update(0.4, 0.3);
    let out = pid.update(-0.6, 0.05);
    assert!((out - 2.0 * (-0.6 - 0.4) / 0.05).abs() < 1e-9);
}

#[test]
fn test_mixed_variants_share_state() {
    let mut pid = PidController::new(1.0, 1.0, 1.0, 100.0);
    pid.update_pi(2.0, 0.5);
    pid.update_pd(3.0, 0.5);
    pid.update_p(100.0);
    assert!((pid.integral_error() - 1.0).abs() < TOL);
    assert_eq!(pid.prev_error(), 3.0);
    assert_eq!(pid.mode(), ControlMode::PID);
}

// ============================================================================
// LEGACY CONTROLLER
// ============================================================================

#[test]
fn test_legacy_matches_primary_when_symmetric() {
    let mut legacy = LegacyPidController::new(0.9, 0.3, 0.1, 2.0, -2.0);
    let mut primary = PidController::new(0.9, 0.3, 0.1, 2.0);
    for k in 0..100 {
        let e = (k as f64 * 0.1).cos() * 3.0;
        assert_eq!(legacy.update(e, 0.01), primary.update(e, 0.01));
    }
}

#[test]
fn test_legacy_set_values_changes_bounds() {
    let mut legacy = LegacyPidController::default();
    assert_eq!(legacy.update(1.0, 0.1), 0.0, "Default bounds force zero output");
    legacy.set_values(1.0, 0.0, 0.0, 0.5, -3.0);
    assert_eq!(legacy.update_p(2.0, 0.1), 0.5);
    assert_eq!(legacy.update_p(-2.0, 0.1), -2.0);
}

// ============================================================================
// CLOSED LOOP
// ============================================================================

#[test]
fn test_pi_loop_converges() {
    let plant = FirstOrderLag::new(2.0, 0.3);
    let config = SimConfig { dt: 0.01, max_time: 15.0, setpoint: 0.5 };
    let mut pid = PidController::new(1.0, 2.0, 0.0, 5.0);
    let trace = simulate_with(&plant, &config, &mut pid);

    let summary = ResponseSummary::from_trace(&trace).unwrap();
    assert!(summary.steady_state_error.abs() < 1e-3, "Error {}", summary.steady_state_error);
    assert!(summary.settling_time.is_some());
}

#[test]
fn test_mass_spring_damper_reaches_setpoint() {
    let plant = MassSpringDamper::new(1.0, 1.0, 1.0);
    let config = SimConfig { dt: 0.005, max_time: 30.0, setpoint: 1.0 };
    let mut pid = PidController::new(6.0, 3.0, 2.0, 50.0);
    let trace = simulate_with(&plant, &config, &mut pid);

    let last = trace.last().unwrap();
    assert!(last.error.abs() < 1e-3, "Error {}", last.error);
}

#[test]
fn test_saturation_events_are_paired() {
    let plant = FirstOrderLag::new(1.0, 1.0);
    let config = SimConfig { dt: 0.01, max_time: 20.0, setpoint: 5.0 };
    let mut pid = PidController::new(5.0, 1.0, 0.0, 8.0);
    let trace = simulate_with(&plant, &config, &mut pid);

    let limits = pid.output_limits().unwrap();
    let mut dets: Vec<Box<dyn EventDetector>> = vec![
        Box::new(SaturationDetector::new(limits)),
        Box::new(CrossingDetector::default()),
    ];
    let events = detect_events(&trace, &mut dets);
    let starts = events.iter().filter(|e| e.kind == EventKind::SaturationStart).count();
    let ends = events.iter().filter(|e| e.kind == EventKind::SaturationEnd).count();
    assert!(starts >= 1, "Step of 5 with Kp=5 should saturate");
    assert_eq!(starts, ends, "Every saturation should end once the loop settles");
}

#[test]
fn test_negative_clamp_bound_runs_without_panic() {
    let plant = FirstOrderLag::new(1.0, 0.5);
    let config = SimConfig { dt: 0.01, max_time: 1.0, setpoint: 1.0 };
    let mut pid = PidController::new(1.0, 1.0, 1.0, -1.0);
    let trace = simulate_with(&plant, &config, &mut pid);
    assert!(trace.iter().all(|s| s.output.is_finite()));
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn test_config_drives_simulation() {
    let cfg = PidConfig::from_toml_str(
        r#"
        [controller]
        p = 3.0
        i = 2.0
        d = 0.0
        max_output_abs = 20.0
        mode = "auto"

        [sim]
        dt = 0.01
        max_time = 15.0
        setpoint = 1.0
        "#,
    )
    .unwrap();
    cfg.validate().unwrap();

    let plant = cfg.build_plant();
    let mut controller = cfg.build_controller();
    let trace = simulate_with(plant.as_ref(), &cfg.sim_config(), controller.as_mut());
    assert!(trace.last().unwrap().error.abs() < 1e-3);
}
