pub mod event;
pub mod integrator;
pub mod runner;
pub mod state;

pub use event::{detect_events, EventDetector, EventKind, SimEvent};
pub use runner::{simulate, simulate_with};
pub use state::{Sample, SimConfig};
