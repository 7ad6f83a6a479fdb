use thiserror::Error;

use super::states::SubParticleKind;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Body {index} has non-positive or non-finite mass {mass}")]
    InvalidMass { index: usize, mass: f64 },

    #[error("Body {index} has a non-finite {field}")]
    NonFiniteBody { index: usize, field: &'static str },

    #[error("Sub-particle {sub} ({kind:?}) of body {body} has invalid orbit radius {radius}")]
    InvalidOrbitRadius {
        body: usize,
        sub: usize,
        kind: SubParticleKind,
        radius: f64,
    },

    #[error("Parameter '{name}' is out of range: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Simulation stepped before it was started")]
    NotRunning,
}
