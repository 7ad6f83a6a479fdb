//! Core state types for the atom simulation.
//!
//! - `Body`             the charged point mass ("atom") moved by the force field
//! - `SubParticle`      decorative proton/electron/neutron placed by orbit kinematics
//! - `SimulationState`  the owned body collection, elapsed time `t` and step count
//!
//! Everything is 2D and uses `NVec2`.

use nalgebra::Vector2;
use serde::Deserialize;

pub type NVec2 = Vector2<f64>;

/// Index of a body inside `SimulationState::bodies`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// What a sub-particle represents. Only affects kinematics and styling, never the force field
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubParticleKind {
    Positive, // proton, sits on the nucleus
    Negative, // electron, orbits the nucleus
    Neutral,  // neutron, static after placement
}

#[derive(Debug, Clone)]
pub struct SubParticle {
    pub kind: SubParticleKind,
    pub angle: f64,        // radians, kept in [0, 2pi)
    pub orbit_radius: f64, // distance from the owner while orbiting
    pub owner: BodyId,     // back-reference, the body owns this sub-particle
    pub x: NVec2,          // resolved position, recomputed every step
}

impl SubParticle {
    pub fn new(kind: SubParticleKind, owner: BodyId, orbit_radius: f64, angle: f64) -> Self {
        Self {
            kind,
            angle,
            orbit_radius,
            owner,
            x: NVec2::zeros(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub f: NVec2, // force accumulator, zeroed every step
    pub m: f64,   // mass
    pub q: f64,   // charge
    pub sub_particles: Vec<SubParticle>,
}

impl Body {
    pub fn new(id: BodyId, x: NVec2, v: NVec2, m: f64, q: f64) -> Self {
        Self {
            id,
            x,
            v,
            f: NVec2::zeros(),
            m,
            q,
            sub_particles: Vec::new(),
        }
    }

    pub fn reset_force(&mut self) {
        self.f = NVec2::zeros();
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub bodies: Vec<Body>, // fixed for the lifetime of the simulation
    pub t: f64,            // elapsed simulated time
    pub steps: u64,        // completed steps
}

impl SimulationState {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            t: 0.0,
            steps: 0,
        }
    }

    /// Sum of m * v over all bodies
    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn sub_particles(&self) -> impl Iterator<Item = &SubParticle> {
        self.bodies.iter().flat_map(|b| b.sub_particles.iter())
    }
}
