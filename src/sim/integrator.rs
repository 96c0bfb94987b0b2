use crate::plant::{Plant, PlantState};

// ---------------------------------------------------------------------------
// RK4 integrator with constant actuator input over the step
// ---------------------------------------------------------------------------

/// Single RK4 step with the controller output held constant over the step.
pub fn rk4_step(plant: &dyn Plant, x: &PlantState, u: f64, dt: f64) -> PlantState {
    let k1 = plant.derivatives(x, u);
    let k2 = plant.derivatives(&(x + k1 * (dt * 0.5)), u);
    let k3 = plant.derivatives(&(x + k2 * (dt * 0.5)), u);
    let k4 = plant.derivatives(&(x + k3 * dt), u);

    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}
