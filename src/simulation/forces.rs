//! Force contributors for the atom engine
//!
//! Defines the [`ForceTerm`] trait, the [`ForceSet`] that zeroes and sums
//! every term into the bodies' force accumulators, and the softened
//! Coulomb interaction between charged bodies

use crate::configuration::config::ReactionMode;
use crate::simulation::states::{Body, NVec2};

/// Separations below this are treated as this distance
pub const MIN_DISTANCE: f64 = 1.0;

/// Collection of force terms (Coulomb, drag, etc.)
/// Each term implements [`ForceTerm`] and their contributions are summed
/// into each body's force accumulator
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Zero every accumulator, then let every term add its contribution
    /// - `bodies[i].f` ends up as the sum of all terms for the current positions
    pub fn accumulate_forces(&self, bodies: &mut [Body]) {
        for b in bodies.iter_mut() {
            b.reset_force();
        }
        for term in &self.terms {
            term.accumulate(bodies);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for force sources operating on the body collection
/// Implementations add their contribution into `bodies[i].f`
pub trait ForceTerm {
    fn accumulate(&self, bodies: &mut [Body]);
}

/// Signed magnitude of the softened Coulomb force between two charges
/// Positive for like charges, negative for opposite charges
pub fn coulomb_magnitude(k: f64, qi: f64, qj: f64, distance: f64, epsilon: f64) -> f64 {
    k * qi * qj / (distance * distance + epsilon)
}

/// Softened inverse-square interaction between charged bodies
/// `epsilon` is added to distance^2 in the denominator and the distance
/// itself is clamped to [`MIN_DISTANCE`]
#[derive(Debug, Clone, Copy)]
pub struct SoftenedCoulomb {
    pub k: f64, // Coulomb constant
    pub epsilon: f64, // softening
    pub reaction: ReactionMode,
}

impl SoftenedCoulomb {
    pub fn new(k: f64, epsilon: f64) -> Self {
        Self {
            k,
            epsilon,
            reaction: ReactionMode::Opposite,
        }
    }

    pub fn with_reaction(mut self, reaction: ReactionMode) -> Self {
        self.reaction = reaction;
        self
    }

    /// Contribution of the pair as seen from `bi` towards `bj`:
    /// `magnitude * unit(bj - bi)`
    pub fn pair_contribution(&self, bi: &Body, bj: &Body) -> NVec2 {
        // Displacement from i to j
        let direction = bj.x - bi.x;

        // Clamp so coincident bodies keep a finite magnitude and a zero
        // (rather than NaN) unit vector
        let distance = direction.norm().max(MIN_DISTANCE);
        let unit = direction / distance;

        let magnitude = coulomb_magnitude(self.k, bi.q, bj.q, distance, self.epsilon);
        magnitude * unit
    }
}

impl ForceTerm for SoftenedCoulomb {
    fn accumulate(&self, bodies: &mut [Body]) {
        let n = bodies.len();
        if n < 2 { // Nothing to interact with
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                let c = self.pair_contribution(&bodies[i], &bodies[j]);

                match self.reaction {
                    // c points from i to j and is positive for like charges:
                    // i is pushed along -c, j along +c
                    ReactionMode::Opposite => {
                        bodies[i].f -= c;
                        bodies[j].f += c;
                    }
                    // Both bodies receive the same vector, net momentum drifts
                    ReactionMode::Mirrored => {
                        bodies[i].f += c;
                        bodies[j].f += c;
                    }
                }
            }
        }
    }
}

/// Accumulate the softened Coulomb force on every body
/// Accumulators are zeroed first, so `bodies[i].f` is exactly this step's sum
pub fn compute_forces(bodies: &mut [Body], k: f64, epsilon: f64, reaction: ReactionMode) {
    for b in bodies.iter_mut() {
        b.reset_force();
    }
    SoftenedCoulomb::new(k, epsilon)
        .with_reaction(reaction)
        .accumulate(bodies);
}
