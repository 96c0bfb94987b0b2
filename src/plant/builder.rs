use super::{FirstOrderLag, MassSpringDamper, Plant};

// ---------------------------------------------------------------------------
// Plant builder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantKind {
    FirstOrder,
    MassSpringDamper,
}

pub struct PlantBuilder {
    kind: PlantKind,
    gain: f64,
    time_constant: f64,
    mass: f64,
    damping: f64,
    stiffness: f64,
}

impl PlantBuilder {
    pub fn new(kind: PlantKind) -> Self {
        Self {
            kind,
            gain: 1.0,
            time_constant: 0.5,
            mass: 1.0,
            damping: 0.5,
            stiffness: 1.0,
        }
    }

    pub fn gain(mut self, v: f64) -> Self { self.gain = v; self }
    pub fn time_constant(mut self, v: f64) -> Self { self.time_constant = v; self }
    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn damping(mut self, v: f64) -> Self { self.damping = v; self }
    pub fn stiffness(mut self, v: f64) -> Self { self.stiffness = v; self }

    pub fn kind(&self) -> PlantKind {
        self.kind
    }

    pub fn build(self) -> Box<dyn Plant> {
        match self.kind {
            PlantKind::FirstOrder => Box::new(FirstOrderLag::new(self.gain, self.time_constant)),
            PlantKind::MassSpringDamper => {
                Box::new(MassSpringDamper::new(self.mass, self.damping, self.stiffness))
            }
        }
    }
}
