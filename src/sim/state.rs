// ---------------------------------------------------------------------------
// One control tick of a closed-loop run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,          // s
    pub setpoint: f64,
    pub measurement: f64,
    pub error: f64,         // setpoint - measurement
    pub output: f64,        // controller command applied over the next step
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,
    pub max_time: f64,
    pub setpoint: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,        // 100 Hz control loop
            max_time: 10.0,
            setpoint: 1.0,   // unit step
        }
    }
}

impl SimConfig {
    /// Number of control ticks the run will take.
    pub fn steps(&self) -> usize {
        if self.dt > 0.0 {
            (self.max_time / self.dt).round() as usize
        } else {
            0
        }
    }
}
