// ---------------------------------------------------------------------------
// Shared PID update law
// ---------------------------------------------------------------------------
//
// Both controller variants run through these functions; they differ only in
// how the clamp range is configured.

/// Proportional, integral and derivative gains.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gains {
    pub p: f64,
    pub i: f64,
    pub d: f64,
}

impl Gains {
    pub fn new(p: f64, i: f64, d: f64) -> Self {
        Self { p, i, d }
    }
}

/// Running error state: last error seen by a derivative-using update and
/// the forward-Euler sum of `error * dt`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub prev_error: f64,
    pub integral_error: f64,
}

impl Accumulator {
    pub fn reset(&mut self) {
        self.prev_error = 0.0;
        self.integral_error = 0.0;
    }
}

/// Closed clamp range `[min, max]`.
///
/// An inverted range (`min > max`) is kept as given. [`OutputLimits::apply`]
/// still returns a deterministic value for it instead of panicking the way
/// `f64::clamp` would.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputLimits {
    pub min: f64,
    pub max: f64,
}

impl OutputLimits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `[-max_abs, +max_abs]`.
    pub fn symmetric(max_abs: f64) -> Self {
        Self { min: -max_abs, max: max_abs }
    }

    pub fn apply(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value < self.max {
            value
        } else {
            self.max
        }
    }

    /// True when `value` sits on (or past) either bound.
    pub fn is_saturated(&self, value: f64) -> bool {
        value <= self.min || value >= self.max
    }
}

impl Default for OutputLimits {
    /// `[0, 0]`: every output clamps to 0.
    fn default() -> Self {
        OutputLimits::new(0.0, 0.0)
    }
}

/// Zero time step or NaN error: the sample is dropped.
#[inline]
fn rejects(error: f64, dt: f64) -> bool {
    dt == 0.0 || error.is_nan()
}

/// Full PID. Returns `None` without touching `acc` when the sample is rejected.
pub fn pid(gains: &Gains, acc: &mut Accumulator, error: f64, dt: f64) -> Option<f64> {
    if rejects(error, dt) {
        return None;
    }

    let p_out = gains.p * error;

    acc.integral_error += dt * error;
    let i_out = gains.i * acc.integral_error;

    let d_err = (error - acc.prev_error) / dt;
    let d_out = gains.d * d_err;

    acc.prev_error = error;

    Some(p_out + i_out + d_out)
}

/// Proportional only. Never reads or advances the accumulator.
pub fn p(gains: &Gains, error: f64) -> Option<f64> {
    if error.is_nan() {
        return None;
    }
    Some(gains.p * error)
}

/// Proportional + derivative. Advances `prev_error` only.
pub fn pd(gains: &Gains, acc: &mut Accumulator, error: f64, dt: f64) -> Option<f64> {
    if rejects(error, dt) {
        return None;
    }

    let p_out = gains.p * error;
    let d_out = gains.d * (error - acc.prev_error) / dt;
    acc.prev_error = error;

    Some(p_out + d_out)
}

/// Proportional + integral. Advances `integral_error` only.
pub fn pi(gains: &Gains, acc: &mut Accumulator, error: f64, dt: f64) -> Option<f64> {
    if rejects(error, dt) {
        return None;
    }

    let p_out = gains.p * error;
    acc.integral_error += dt * error;
    let i_out = gains.i * acc.integral_error;

    Some(p_out + i_out)
}
