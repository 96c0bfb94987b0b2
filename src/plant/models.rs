use nalgebra::Vector2;

use super::{Plant, PlantState};

// ---------------------------------------------------------------------------
// First-order lag: tau * x' = K * u - x
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FirstOrderLag {
    pub gain: f64,
    pub time_constant: f64,   // s
}

impl FirstOrderLag {
    pub fn new(gain: f64, time_constant: f64) -> Self {
        Self { gain, time_constant }
    }

    /// Steady-state output for a constant input.
    pub fn steady_state(&self, u: f64) -> f64 {
        self.gain * u
    }
}

impl Plant for FirstOrderLag {
    fn derivatives(&self, x: &PlantState, u: f64) -> PlantState {
        Vector2::new((self.gain * u - x[0]) / self.time_constant, 0.0)
    }

    fn name(&self) -> &str {
        "FirstOrderLag"
    }
}

// ---------------------------------------------------------------------------
// Mass-spring-damper: m * x'' + c * x' + k * x = u
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MassSpringDamper {
    pub mass: f64,        // kg
    pub damping: f64,     // N·s/m
    pub stiffness: f64,   // N/m
}

impl MassSpringDamper {
    pub fn new(mass: f64, damping: f64, stiffness: f64) -> Self {
        Self { mass, damping, stiffness }
    }

    /// Undamped natural frequency, rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Plant for MassSpringDamper {
    fn derivatives(&self, x: &PlantState, u: f64) -> PlantState {
        let pos = x[0];
        let vel = x[1];
        let acc = (u - self.damping * vel - self.stiffness * pos) / self.mass;
        Vector2::new(vel, acc)
    }

    fn name(&self) -> &str {
        "MassSpringDamper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_relaxes_towards_input() {
        let plant = FirstOrderLag::new(2.0, 0.5);
        let dx = plant.derivatives(&Vector2::new(0.0, 0.0), 1.0);
        assert!((dx[0] - 4.0).abs() < 1e-12);
        let at_rest = plant.derivatives(&Vector2::new(2.0, 0.0), 1.0);
        assert!(at_rest[0].abs() < 1e-12);
        assert_eq!(plant.steady_state(1.0), 2.0);
    }

    #[test]
    fn spring_restoring_force() {
        let plant = MassSpringDamper::new(2.0, 0.0, 8.0);
        let dx = plant.derivatives(&Vector2::new(1.0, 0.0), 0.0);
        assert_eq!(dx[0], 0.0);
        assert!((dx[1] + 4.0).abs() < 1e-12);
        assert!((plant.natural_frequency() - 2.0).abs() < 1e-12);
        assert_eq!(plant.damping_ratio(), 0.0);
    }
}
