//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), validates it and produces the
//! runtime bundle `Scenario` containing:
//! - window settings (`WindowSettings`)
//! - numerical parameters (`Parameters`)
//! - system state (`SimulationState` with bodies and resolved sub-particles at t = 0)
//! - the stepper with its active force set
//!
//! Invalid masses, orbit radii and parameters are rejected here so they can
//! never reach the integrator.

use tracing::{debug, info};

use crate::configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig, SubParticleConfig};
use crate::simulation::engine::WindowSettings;
use crate::simulation::error::SimulationError;
use crate::simulation::forces::{ForceSet, SoftenedCoulomb};
use crate::simulation::orbit;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyId, NVec2, SimulationState, SubParticle, SubParticleKind};
use crate::simulation::stepper::SimulationStepper;

/// Fully-initialized simulation scenario
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it contains the window settings, parameters, current state and the
/// stepper that advances it. Front-ends (viewer, headless loop, benchmark)
/// take it apart and drive the stepper once per frame.
pub struct Scenario {
    pub window: WindowSettings,
    pub parameters: Parameters,
    pub state: SimulationState,
    pub stepper: SimulationStepper,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimulationError> {
        let parameters = build_parameters(&cfg.parameters)?;

        // Bodies: map `BodyConfig` -> runtime `Body`, then place sub-particles
        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| build_body(i, bc, &parameters))
            .collect::<Result<Vec<Body>, SimulationError>>()?;

        let state = SimulationState::new(bodies);

        let window = cfg
            .window
            .map(|w| WindowSettings {
                width: w.width,
                height: w.height,
                title: w.title,
            })
            .unwrap_or_default();

        let stepper = Self::build_stepper(&parameters);

        info!(
            bodies = state.bodies.len(),
            sub_particles = state.sub_particles().count(),
            k = parameters.k,
            epsilon = parameters.epsilon,
            dt = parameters.dt,
            reaction = ?parameters.reaction,
            "scenario built"
        );

        Ok(Self {
            window,
            parameters,
            state,
            stepper,
        })
    }

    /// Stepper with the softened Coulomb term registered
    pub fn build_stepper(parameters: &Parameters) -> SimulationStepper {
        let forces = ForceSet::new().with(
            SoftenedCoulomb::new(parameters.k, parameters.epsilon).with_reaction(parameters.reaction),
        );
        SimulationStepper::new(forces, parameters.dt, parameters.angular_step)
    }
}

fn build_parameters(p_cfg: &ParametersConfig) -> Result<Parameters, SimulationError> {
    check_parameter("k", p_cfg.k, f64::is_finite)?;
    check_parameter("epsilon", p_cfg.epsilon, |e| e.is_finite() && e >= 0.0)?;
    check_parameter("dt", p_cfg.dt, |dt| dt.is_finite() && dt > 0.0)?;
    check_parameter("angular_step", p_cfg.angular_step, f64::is_finite)?;
    check_parameter("orbit_radius", p_cfg.orbit_radius, |r| r.is_finite() && r > 0.0)?;

    Ok(Parameters {
        k: p_cfg.k,
        epsilon: p_cfg.epsilon,
        dt: p_cfg.dt,
        angular_step: p_cfg.angular_step,
        orbit_radius: p_cfg.orbit_radius,
        reaction: p_cfg.reaction,
    })
}

fn check_parameter(name: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> Result<(), SimulationError> {
    if ok(value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

fn build_body(index: usize, bc: &BodyConfig, parameters: &Parameters) -> Result<Body, SimulationError> {
    if !(bc.m.is_finite() && bc.m > 0.0) {
        return Err(SimulationError::InvalidMass { index, mass: bc.m });
    }
    if !bc.q.is_finite() {
        return Err(SimulationError::NonFiniteBody { index, field: "charge" });
    }
    if !bc.x.iter().all(|c| c.is_finite()) {
        return Err(SimulationError::NonFiniteBody { index, field: "position" });
    }
    if !bc.v.iter().all(|c| c.is_finite()) {
        return Err(SimulationError::NonFiniteBody { index, field: "velocity" });
    }

    let id = BodyId(index);
    let mut body = Body::new(
        id,
        NVec2::new(bc.x[0], bc.x[1]),
        NVec2::new(bc.v[0], bc.v[1]),
        bc.m,
        bc.q,
    );

    body.sub_particles = match &bc.sub_particles {
        Some(subs) => subs
            .iter()
            .enumerate()
            .map(|(s, sc)| build_sub_particle(index, s, sc, parameters))
            .collect::<Result<Vec<_>, _>>()?,
        None => default_atom(id, parameters.orbit_radius),
    };

    for sub in body.sub_particles.iter_mut() {
        orbit::resolve(sub, body.x);
    }

    debug!(index, x = ?body.x, m = body.m, q = body.q, subs = body.sub_particles.len(), "body built");
    Ok(body)
}

fn build_sub_particle(
    body: usize,
    sub: usize,
    sc: &SubParticleConfig,
    parameters: &Parameters,
) -> Result<SubParticle, SimulationError> {
    let radius = sc.orbit_radius.unwrap_or(parameters.orbit_radius);
    if !(radius.is_finite() && radius > 0.0) {
        return Err(SimulationError::InvalidOrbitRadius {
            body,
            sub,
            kind: sc.kind,
            radius,
        });
    }

    let angle = sc.angle.unwrap_or(0.0);
    if !angle.is_finite() {
        return Err(SimulationError::InvalidParameter { name: "angle", value: angle });
    }

    Ok(SubParticle::new(sc.kind, BodyId(body), radius, angle))
}

/// Proton on the nucleus and one electron starting at angle 0
fn default_atom(owner: BodyId, orbit_radius: f64) -> Vec<SubParticle> {
    vec![
        SubParticle::new(SubParticleKind::Positive, owner, orbit_radius, 0.0),
        SubParticle::new(SubParticleKind::Negative, owner, orbit_radius, 0.0),
    ]
}
