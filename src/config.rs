use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::control::{Controller, ControlMode, PidController};
#[allow(deprecated)]
use crate::control::LegacyPidController;
use crate::plant::{Plant, PlantBuilder, PlantKind};
use crate::sim::SimConfig;

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("gain {name} must be finite, got {value}")]
    InvalidGain { name: &'static str, value: f64 },
    #[error("max_output_abs must be finite and non-negative, got {0}")]
    InvalidClampBound(f64),
    #[error("{missing} must be set together with {given}")]
    PartialLimits { given: &'static str, missing: &'static str },
    #[error("output bounds are inverted: min {min} > max {max}")]
    InvertedLimits { min: f64, max: f64 },
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),
    #[error("max_time must be finite and non-negative, got {0}")]
    InvalidDuration(f64),
    #[error("setpoint must be finite, got {0}")]
    InvalidSetpoint(f64),
    #[error("invalid plant: {0}")]
    InvalidPlant(String),
}

/// How the configured controller picks its update law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Choose from the gains, see [`ControlMode::from_gains`].
    Auto,
    P,
    PI,
    PD,
    #[default]
    PID,
}

impl ModeSetting {
    fn fixed(self) -> Option<ControlMode> {
        match self {
            ModeSetting::Auto => None,
            ModeSetting::P => Some(ControlMode::P),
            ModeSetting::PI => Some(ControlMode::PI),
            ModeSetting::PD => Some(ControlMode::PD),
            ModeSetting::PID => Some(ControlMode::PID),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerSection {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    pub max_output_abs: f64,
    /// Asymmetric bounds; when both are set the legacy controller is built.
    pub min_output: Option<f64>,
    pub max_output: Option<f64>,
    pub mode: ModeSetting,
}

impl Default for ControllerSection {
    fn default() -> Self {
        Self {
            p: 4.0,
            i: 4.0,
            d: 0.05,
            max_output_abs: 10.0,
            min_output: None,
            max_output: None,
            mode: ModeSetting::PID,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimSection {
    pub dt: f64,
    pub max_time: f64,
    pub setpoint: f64,
}

impl Default for SimSection {
    fn default() -> Self {
        let sim = SimConfig::default();
        Self { dt: sim.dt, max_time: sim.max_time, setpoint: sim.setpoint }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKindSetting {
    #[default]
    FirstOrder,
    MassSpringDamper,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantSection {
    pub kind: PlantKindSetting,
    pub gain: f64,
    pub time_constant: f64,
    pub mass: f64,
    pub damping: f64,
    pub stiffness: f64,
}

impl Default for PlantSection {
    fn default() -> Self {
        Self {
            kind: PlantKindSetting::FirstOrder,
            gain: 1.0,
            time_constant: 0.5,
            mass: 1.0,
            damping: 0.5,
            stiffness: 1.0,
        }
    }
}

/// Full run configuration, deserialized from TOML. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PidConfig {
    pub controller: ControllerSection,
    pub sim: SimSection,
    pub plant: PlantSection,
}

impl PidConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: PidConfig = toml::from_str(s)?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller would otherwise accept silently.
    ///
    /// `PidController::new` itself never validates; this check only runs at the
    /// config boundary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.controller;
        for (name, value) in [("p", c.p), ("i", c.i), ("d", c.d)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidGain { name, value });
            }
        }
        if !c.max_output_abs.is_finite() || c.max_output_abs < 0.0 {
            return Err(ConfigError::InvalidClampBound(c.max_output_abs));
        }
        match (c.min_output, c.max_output) {
            (Some(min), Some(max)) if min.is_nan() || max.is_nan() || min > max => {
                return Err(ConfigError::InvertedLimits { min, max });
            }
            (Some(_), None) => {
                return Err(ConfigError::PartialLimits { given: "min_output", missing: "max_output" });
            }
            (None, Some(_)) => {
                return Err(ConfigError::PartialLimits { given: "max_output", missing: "min_output" });
            }
            _ => {}
        }

        let s = &self.sim;
        if !s.dt.is_finite() || s.dt <= 0.0 {
            return Err(ConfigError::InvalidTimeStep(s.dt));
        }
        if !s.max_time.is_finite() || s.max_time < 0.0 {
            return Err(ConfigError::InvalidDuration(s.max_time));
        }
        if !s.setpoint.is_finite() {
            return Err(ConfigError::InvalidSetpoint(s.setpoint));
        }

        // (name, value, must be positive)
        let p = &self.plant;
        let checks = match p.kind {
            PlantKindSetting::FirstOrder => {
                vec![("gain", p.gain, false), ("time_constant", p.time_constant, true)]
            }
            PlantKindSetting::MassSpringDamper => vec![
                ("mass", p.mass, true),
                ("damping", p.damping, false),
                ("stiffness", p.stiffness, false),
            ],
        };
        for (name, value, positive) in checks {
            if !value.is_finite() || (positive && value <= 0.0) {
                return Err(ConfigError::InvalidPlant(format!("{name} out of range, got {value}")));
            }
        }
        Ok(())
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            dt: self.sim.dt,
            max_time: self.sim.max_time,
            setpoint: self.sim.setpoint,
        }
    }

    pub fn pid(&self) -> PidController {
        let c = &self.controller;
        PidController::new(c.p, c.i, c.d, c.max_output_abs)
    }

    /// Build the configured controller. Asymmetric bounds select the legacy
    /// controller, which always runs the full law.
    #[allow(deprecated)]
    pub fn build_controller(&self) -> Box<dyn Controller> {
        let c = &self.controller;
        if let (Some(min), Some(max)) = (c.min_output, c.max_output) {
            return Box::new(LegacyPidController::new(c.p, c.i, c.d, max, min));
        }
        Box::new(ModalPid { pid: self.pid(), mode: c.mode.fixed() })
    }

    pub fn build_plant(&self) -> Box<dyn Plant> {
        let p = &self.plant;
        let kind = match p.kind {
            PlantKindSetting::FirstOrder => PlantKind::FirstOrder,
            PlantKindSetting::MassSpringDamper => PlantKind::MassSpringDamper,
        };
        PlantBuilder::new(kind)
            .gain(p.gain)
            .time_constant(p.time_constant)
            .mass(p.mass)
            .damping(p.damping)
            .stiffness(p.stiffness)
            .build()
    }
}

/// `PidController` running a fixed law, or the gain-selected law when `mode` is `None`.
struct ModalPid {
    pid: PidController,
    mode: Option<ControlMode>,
}

impl Controller for ModalPid {
    fn control(&mut self, error: f64, dt: f64) -> f64 {
        match self.mode {
            Some(mode) => self.pid.update_with(mode, error, dt),
            None => self.pid.update_auto(error, dt),
        }
    }

    fn reset(&mut self) {
        self.pid.reset();
    }

    fn name(&self) -> &str {
        "PidController"
    }

    fn output_limits(&self) -> Option<crate::control::OutputLimits> {
        Some(self.pid.limits())
    }
}
