#![allow(deprecated)]

use super::law::{self, Accumulator, Gains, OutputLimits};

/// Older controller shape with asymmetric output bounds and a setter for
/// all tunable values. Same law as [`super::PidController`].
#[deprecated(note = "use PidController; this type only keeps the asymmetric-bounds API alive")]
#[derive(Debug, Clone, Default)]
pub struct LegacyPidController {
    gains: Gains,
    limits: OutputLimits,
    acc: Accumulator,
}

impl LegacyPidController {
    pub fn new(p: f64, i: f64, d: f64, out_max: f64, out_min: f64) -> Self {
        Self {
            gains: Gains::new(p, i, d),
            limits: OutputLimits::new(out_min, out_max),
            acc: Accumulator::default(),
        }
    }

    /// Set all PID values. Accumulated error is kept.
    pub fn set_values(&mut self, p: f64, i: f64, d: f64, out_max: f64, out_min: f64) {
        self.gains = Gains::new(p, i, d);
        self.limits = OutputLimits::new(out_min, out_max);
    }

    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        law::pid(&self.gains, &mut self.acc, error, dt).map_or(0.0, |out| self.limits.apply(out))
    }

    /// `dt` is unused; it stays in the signature for callers of the old API.
    pub fn update_p(&mut self, error: f64, _dt: f64) -> f64 {
        law::p(&self.gains, error).map_or(0.0, |out| self.limits.apply(out))
    }

    pub fn update_pd(&mut self, error: f64, dt: f64) -> f64 {
        law::pd(&self.gains, &mut self.acc, error, dt).map_or(0.0, |out| self.limits.apply(out))
    }

    pub fn update_pi(&mut self, error: f64, dt: f64) -> f64 {
        law::pi(&self.gains, &mut self.acc, error, dt).map_or(0.0, |out| self.limits.apply(out))
    }

    pub fn reset(&mut self) {
        self.acc.reset();
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    pub fn limits(&self) -> OutputLimits {
        self.limits
    }

    pub fn prev_error(&self) -> f64 {
        self.acc.prev_error
    }

    pub fn integral_error(&self) -> f64 {
        self.acc.integral_error
    }
}

impl super::Controller for LegacyPidController {
    fn control(&mut self, error: f64, dt: f64) -> f64 {
        self.update(error, dt)
    }

    fn reset(&mut self) {
        LegacyPidController::reset(self);
    }

    fn name(&self) -> &str {
        "LegacyPidController"
    }

    fn output_limits(&self) -> Option<OutputLimits> {
        Some(self.limits)
    }
}
