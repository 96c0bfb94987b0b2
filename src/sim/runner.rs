use crate::control::{Controller, PidController};
use crate::plant::{Plant, PlantState};
use super::integrator::rk4_step;
use super::state::{Sample, SimConfig};

// ---------------------------------------------------------------------------
// Closed-loop simulation
// ---------------------------------------------------------------------------

/// Run `controller` against `plant` from rest, tracking a constant setpoint.
///
/// Each tick measures the plant, feeds `setpoint - measurement` to the
/// controller and holds its output over one RK4 step. The returned trace has
/// one sample per tick plus the final resting state (with zero output).
pub fn simulate_with(
    plant: &dyn Plant,
    config: &SimConfig,
    controller: &mut dyn Controller,
) -> Vec<Sample> {
    let steps = config.steps();
    let mut trace = Vec::with_capacity(steps.min(1_000_000) + 1);
    let mut x = PlantState::zeros();

    for k in 0..steps {
        let time = k as f64 * config.dt;
        let measurement = plant.output(&x);
        let error = config.setpoint - measurement;
        let output = controller.control(error, config.dt);

        trace.push(Sample { time, setpoint: config.setpoint, measurement, error, output });

        x = rk4_step(plant, &x, output, config.dt);
    }

    let measurement = plant.output(&x);
    trace.push(Sample {
        time: steps as f64 * config.dt,
        setpoint: config.setpoint,
        measurement,
        error: config.setpoint - measurement,
        output: 0.0,
    });

    trace
}

/// Default loop tuning used by [`simulate`].
pub fn default_controller() -> PidController {
    PidController::new(4.0, 4.0, 0.05, 10.0)
}

/// Simulate with [`default_controller`] (convenience wrapper).
pub fn simulate(plant: &dyn Plant, config: &SimConfig) -> Vec<Sample> {
    let mut controller = default_controller();
    simulate_with(plant, config, &mut controller)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
