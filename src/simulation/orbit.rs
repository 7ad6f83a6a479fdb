//! Orbit kinematics for sub-particles
//!
//! Positions here never depend on the force field: a sub-particle is placed
//! from its owner's position, its orbit radius and its own angle.

use std::f64::consts::TAU;

use super::states::{NVec2, SubParticle, SubParticleKind};

/// Point on a circle of `radius` around `center` at `angle`
pub fn orbit_point(center: NVec2, radius: f64, angle: f64) -> NVec2 {
    center + radius * NVec2::new(angle.cos(), angle.sin())
}

/// Initial placement at scenario construction
/// Neutral sub-particles keep this position for the rest of the run
pub fn resolve(sub: &mut SubParticle, center: NVec2) {
    sub.x = match sub.kind {
        SubParticleKind::Positive => center,
        SubParticleKind::Negative | SubParticleKind::Neutral => {
            orbit_point(center, sub.orbit_radius, sub.angle)
        }
    };
}

/// One kinematic step around the owner's current position
pub fn advance(sub: &mut SubParticle, center: NVec2, angular_step: f64) {
    match sub.kind {
        // Proton tracks the nucleus exactly
        SubParticleKind::Positive => sub.x = center,
        SubParticleKind::Negative => {
            sub.angle = (sub.angle + angular_step).rem_euclid(TAU);
            sub.x = orbit_point(center, sub.orbit_radius, sub.angle);
        }
        SubParticleKind::Neutral => {}
    }
}
