use super::law::{self, Accumulator, Gains, OutputLimits};
use super::mode::ControlMode;

// ---------------------------------------------------------------------------
// PID Controller (single axis, symmetric output clamp)
// ---------------------------------------------------------------------------

/// Single-axis PID controller with a symmetric output clamp.
///
/// Error: where you are vs where you want to be. The derivative term damps
/// how fast you approach, the integral term removes steady alignment error.
///
/// The derivative is a backward difference over the supplied `dt`, and the
/// integral is a forward-Euler sum, so the controller tolerates variable tick
/// rates. Only the final output is clamped: the integral winds up without
/// bound under sustained error until [`PidController::reset`] is called.
#[derive(Debug, Clone, Default)]
pub struct PidController {
    /// Proportional gain.
    pub p: f64,
    /// Integral gain.
    pub i: f64,
    /// Derivative gain.
    pub d: f64,
    /// Max output (as absolute value).
    pub max_output_abs: f64,
    acc: Accumulator,
}

impl PidController {
    pub fn new(p: f64, i: f64, d: f64, max_output_abs: f64) -> Self {
        Self { p, i, d, max_output_abs, acc: Accumulator::default() }
    }

    /// Replace gains and clamp bound. With `clear_state` the accumulators are
    /// zeroed as well; without it the controller keeps its history, which
    /// avoids an output bump when retuning a running loop.
    pub fn retune(&mut self, p: f64, i: f64, d: f64, max_output_abs: f64, clear_state: bool) {
        self.p = p;
        self.i = i;
        self.d = d;
        self.max_output_abs = max_output_abs;
        if clear_state {
            self.reset();
        }
    }

    /// Full PID update.
    ///
    /// Returns 0 and leaves the accumulators untouched when `dt == 0` or
    /// `error` is NaN.
    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        let gains = self.gains();
        law::pid(&gains, &mut self.acc, error, dt).map_or(0.0, |out| self.clamp(out))
    }

    /// Proportional-only update. Independent of accumulated state.
    pub fn update_p(&self, error: f64) -> f64 {
        law::p(&self.gains(), error).map_or(0.0, |out| self.clamp(out))
    }

    pub fn update_pd(&mut self, error: f64, dt: f64) -> f64 {
        let gains = self.gains();
        law::pd(&gains, &mut self.acc, error, dt).map_or(0.0, |out| self.clamp(out))
    }

    pub fn update_pi(&mut self, error: f64, dt: f64) -> f64 {
        let gains = self.gains();
        law::pi(&gains, &mut self.acc, error, dt).map_or(0.0, |out| self.clamp(out))
    }

    /// Update using an explicit law. `dt` is ignored for [`ControlMode::P`].
    pub fn update_with(&mut self, mode: ControlMode, error: f64, dt: f64) -> f64 {
        match mode {
            ControlMode::P => self.update_p(error),
            ControlMode::PI => self.update_pi(error, dt),
            ControlMode::PD => self.update_pd(error, dt),
            ControlMode::PID => self.update(error, dt),
        }
    }

    /// Update using the law picked from the current gains (see [`ControlMode::from_gains`]).
    pub fn update_auto(&mut self, error: f64, dt: f64) -> f64 {
        self.update_with(self.mode(), error, dt)
    }

    pub fn mode(&self) -> ControlMode {
        ControlMode::from_gains(self.p, self.i, self.d)
    }

    /// Reset error values of the PID.
    pub fn reset(&mut self) {
        self.acc.reset();
    }

    pub fn prev_error(&self) -> f64 {
        self.acc.prev_error
    }

    pub fn integral_error(&self) -> f64 {
        self.acc.integral_error
    }

    pub fn gains(&self) -> Gains {
        Gains::new(self.p, self.i, self.d)
    }

    pub fn limits(&self) -> OutputLimits {
        OutputLimits::symmetric(self.max_output_abs)
    }

    fn clamp(&self, out: f64) -> f64 {
        self.limits().apply(out)
    }
}

impl super::Controller for PidController {
    fn control(&mut self, error: f64, dt: f64) -> f64 {
        self.update(error, dt)
    }

    fn reset(&mut self) {
        PidController::reset(self);
    }

    fn name(&self) -> &str {
        "PidController"
    }

    fn output_limits(&self) -> Option<OutputLimits> {
        Some(self.limits())
    }
}
