pub mod law;
pub mod legacy;
pub mod mode;
pub mod pid;

#[allow(deprecated)]
pub use legacy::LegacyPidController;
pub use law::{Accumulator, Gains, OutputLimits};
pub use mode::ControlMode;
pub use pid::PidController;

/// Trait for feedback controllers.
///
/// Implement this to plug a custom controller into the simulation loop.
pub trait Controller {
    /// Compute the actuator command from the current error and time step.
    fn control(&mut self, error: f64, dt: f64) -> f64;

    /// Reset controller internal state (e.g., PID integrators).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }

    /// Output clamp range, if the controller has one.
    fn output_limits(&self) -> Option<OutputLimits> {
        None
    }
}

/// Adapts a closure `(error, dt) -> output` into a [`Controller`].
pub struct FnController<F> {
    name: String,
    f: F,
}

impl<F> FnController<F>
where
    F: FnMut(f64, f64) -> f64,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> Controller for FnController<F>
where
    F: FnMut(f64, f64) -> f64,
{
    fn control(&mut self, error: f64, dt: f64) -> f64 {
        (self.f)(error, dt)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
