//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - Coulomb constant and softening (`k`, `epsilon`),
//! - fixed step size `dt`,
//! - orbit angular increment and default orbit radius,
//! - how pair contributions are applied (`reaction`)

use crate::configuration::config::ReactionMode;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub k: f64, // Coulomb constant
    pub epsilon: f64, // softening
    pub dt: f64, // step size
    pub angular_step: f64, // orbit increment per step (radians)
    pub orbit_radius: f64, // default orbit radius
    pub reaction: ReactionMode, // opposite or mirrored pair contributions
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            k: 1000.0,
            epsilon: 50.0,
            dt: 0.016,
            angular_step: 0.001,
            orbit_radius: 50.0,
            reaction: ReactionMode::Opposite,
        }
    }
}
