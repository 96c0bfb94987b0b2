use std::fmt;
use std::str::FromStr;

/// Which terms of the control law an update computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    P,
    PI,
    PD,
    #[default]
    PID,
}

impl ControlMode {
    /// Pick the cheapest law that covers the positive gains.
    ///
    /// All three positive gives PID, then P+I gives PI, then P+D gives PD,
    /// then P alone gives P. Anything else (including a non-positive P)
    /// falls back to PID.
    pub fn from_gains(p: f64, i: f64, d: f64) -> Self {
        if p > 0.0 && i > 0.0 && d > 0.0 {
            ControlMode::PID
        } else if p > 0.0 && i > 0.0 {
            ControlMode::PI
        } else if p > 0.0 && d > 0.0 {
            ControlMode::PD
        } else if p > 0.0 {
            ControlMode::P
        } else {
            ControlMode::PID
        }
    }

    pub fn uses_integral(self) -> bool {
        matches!(self, ControlMode::PI | ControlMode::PID)
    }

    pub fn uses_derivative(self) -> bool {
        matches!(self, ControlMode::PD | ControlMode::PID)
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ControlMode::P => "P",
            ControlMode::PI => "PI",
            ControlMode::PD => "PD",
            ControlMode::PID => "PID",
        };
        f.write_str(s)
    }
}

impl FromStr for ControlMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p" => Ok(ControlMode::P),
            "pi" => Ok(ControlMode::PI),
            "pd" => Ok(ControlMode::PD),
            "pid" => Ok(ControlMode::PID),
            other => Err(format!("unknown control mode '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_table() {
        assert_eq!(ControlMode::from_gains(1.0, 1.0, 1.0), ControlMode::PID);
        assert_eq!(ControlMode::from_gains(1.0, 1.0, 0.0), ControlMode::PI);
        assert_eq!(ControlMode::from_gains(1.0, 0.0, 1.0), ControlMode::PD);
        assert_eq!(ControlMode::from_gains(1.0, 0.0, 0.0), ControlMode::P);
        assert_eq!(ControlMode::from_gains(0.0, 1.0, 1.0), ControlMode::PID);
        assert_eq!(ControlMode::from_gains(-1.0, 0.0, 0.0), ControlMode::PID);
        // Negative I is not "positive", so P+D wins
        assert_eq!(ControlMode::from_gains(1.0, -1.0, 1.0), ControlMode::PD);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Pi".parse::<ControlMode>().unwrap(), ControlMode::PI);
        assert_eq!(ControlMode::PD.to_string(), "PD");
        assert!("pidf".parse::<ControlMode>().is_err());
    }
}
