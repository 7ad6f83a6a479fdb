//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`WindowConfig`]      – size and title of the viewer window (optional)
//! - [`ParametersConfig`]  – Coulomb constant, softening, step size and orbit settings
//! - [`BodyConfig`]        – initial state for each body and its sub-particles
//! - [`ScenarioConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! window:
//!   width: 800
//!   height: 600
//!   title: "Atom Simulation"
//!
//! parameters:
//!   k: 1000.0               # Coulomb constant
//!   epsilon: 50.0           # softening added to distance^2
//!   dt: 0.016               # fixed step size
//!   angular_step: 0.001     # orbit increment per step (radians)
//!   orbit_radius: 50.0      # default orbit radius for sub-particles
//!   reaction: opposite      # or "mirrored"
//!
//! bodies:
//!   - x: [ 0.0, 0.0 ]
//!     m: 2.0
//!     q: 1.0
//!   - x: [ -200.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 2.0
//!     q: -1.0
//!     sub_particles:
//!       - kind: positive
//!       - kind: negative
//!         orbit_radius: 40.0
//!         angle: 3.14159
//! ```
//!
//! The scenario builder validates this configuration and maps it into the
//! runtime representation in [`crate::simulation::scenario`].

use serde::Deserialize;

use crate::simulation::states::SubParticleKind;

/// How the contribution of a pair is applied to its two bodies
/// `reaction: "opposite"` or `reaction: "mirrored"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactionMode {
    #[default]
    #[serde(rename = "opposite")] // Equal and opposite vectors, like charges repel and momentum is conserved
    Opposite,

    #[serde(rename = "mirrored")] // The same vector is added to both bodies, reproduces the classic visual
    Mirrored,
}

/// Viewer window configuration
#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub k: f64,            // Coulomb constant
    pub epsilon: f64,      // softening - bounds the force as separation goes to zero
    pub dt: f64,           // time step size
    pub angular_step: f64, // orbit increment per step
    #[serde(default = "default_orbit_radius")]
    pub orbit_radius: f64, // orbit radius used when a sub-particle does not set one
    #[serde(default)]
    pub reaction: ReactionMode,
}

fn default_orbit_radius() -> f64 {
    50.0
}

/// Configuration for a single sub-particle attached to a body
#[derive(Deserialize, Debug, Clone)]
pub struct SubParticleConfig {
    pub kind: SubParticleKind,
    pub orbit_radius: Option<f64>, // falls back to `parameters.orbit_radius`
    pub angle: Option<f64>,        // initial angle in radians, 0 when absent
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position in simulation units (pixels)
    #[serde(default)]
    pub v: [f64; 2], // Initial velocity, at rest when absent
    pub m: f64,      // Mass of the body
    pub q: f64,      // Charge of the body
    pub sub_particles: Option<Vec<SubParticleConfig>>, // proton + electron when absent
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub window: Option<WindowConfig>, // Viewer window, 800x600 "Atom Simulation" when absent
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>,      // List of bodies that define the initial state of the system
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
