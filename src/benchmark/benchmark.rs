use std::time::Instant;

use tracing::info;

use crate::simulation::error::SimulationError;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, BodyId, NVec2, SimulationState, SubParticle, SubParticleKind};

#[derive(Debug, Clone, Copy)]
pub struct StepTiming {
    pub n: usize,
    pub ms_per_step: f64,
}

/// Helper to build a manual state of size `n` with alternating charges
/// Positions are deterministic, no rand needed
pub fn make_state(n: usize, orbit_radius: f64) -> SimulationState {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new((i_f * 0.37).sin() * 250.0, (i_f * 0.13).cos() * 250.0);
            let q = if i % 2 == 0 { 1.0 } else { -1.0 };

            let mut b = Body::new(BodyId(i), x, NVec2::zeros(), 2.0, q);
            b.sub_particles = vec![
                SubParticle::new(SubParticleKind::Positive, BodyId(i), orbit_radius, 0.0),
                SubParticle::new(SubParticleKind::Negative, BodyId(i), orbit_radius, 0.0),
            ];
            b
        })
        .collect();

    SimulationState::new(bodies)
}

/// Time full simulation steps (forces + integration + orbits) for growing `n`
pub fn bench_step(steps: usize) -> Result<Vec<StepTiming>, SimulationError> {
    let ns = [10, 20, 40, 80, 160, 320, 640];
    let params = Parameters::default();
    let steps = steps.max(1);

    ns.iter()
        .map(|&n| {
            let mut state = make_state(n, params.orbit_radius);
            let mut stepper = Scenario::build_stepper(&params);
            stepper.start();

            // Warm up
            stepper.step(&mut state)?;

            let t0 = Instant::now();
            for _ in 0..steps {
                stepper.step(&mut state)?;
            }
            let ms_per_step = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

            info!("N = {n:4}, step = {ms_per_step:10.6} ms");
            Ok::<_, SimulationError>(StepTiming { n, ms_per_step })
        })
        .collect()
}
