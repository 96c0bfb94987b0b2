pub mod config;
pub mod control;
pub mod io;
pub mod plant;
pub mod sim;

pub use control::{Controller, ControlMode, FnController, OutputLimits, PidController};
#[allow(deprecated)]
pub use control::LegacyPidController;
