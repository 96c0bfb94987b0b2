pub mod builder;
pub mod models;

use nalgebra::Vector2;

pub use builder::{PlantBuilder, PlantKind};
pub use models::{FirstOrderLag, MassSpringDamper};

/// Two-element plant state. Models that need fewer states leave the rest at zero.
pub type PlantState = Vector2<f64>;

/// A single-input single-output process driven by the controller output.
pub trait Plant {
    /// State derivative for state `x` under actuator input `u`.
    fn derivatives(&self, x: &PlantState, u: f64) -> PlantState;

    /// Measured process value.
    fn output(&self, x: &PlantState) -> f64 {
        x[0]
    }

    fn name(&self) -> &str {
        "plant"
    }
}
