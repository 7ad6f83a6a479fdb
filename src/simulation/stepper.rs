//! Per-frame orchestration of one simulation step
//!
//! The stepper owns the force set and the step constants; the
//! [`SimulationState`] it advances is owned by the caller and handed in by
//! mutable reference. After a step the state is returned read-only for the
//! renderer.

use tracing::{debug, trace};

use super::error::SimulationError;
use super::forces::ForceSet;
use super::integrator::integrate_all;
use super::orbit;
use super::states::SimulationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperPhase {
    Idle,    // constructed, not yet stepping
    Running, // steady-state per-frame loop
}

pub struct SimulationStepper {
    phase: StepperPhase,
    forces: ForceSet,
    dt: f64, // fixed step size
    angular_step: f64, // orbit increment per step
}

impl SimulationStepper {
    pub fn new(forces: ForceSet, dt: f64, angular_step: f64) -> Self {
        Self {
            phase: StepperPhase::Idle,
            forces,
            dt,
            angular_step,
        }
    }

    pub fn phase(&self) -> StepperPhase {
        self.phase
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Idle -> Running, once
    pub fn start(&mut self) {
        match self.phase {
            StepperPhase::Idle => {
                debug!(dt = self.dt, angular_step = self.angular_step, "stepper running");
                self.phase = StepperPhase::Running;
            }
            StepperPhase::Running => debug!("stepper already running"),
        }
    }

    /// Advance `state` by one fixed step:
    /// forces -> integration -> orbit kinematics
    pub fn step<'a>(&mut self, state: &'a mut SimulationState) -> Result<&'a SimulationState, SimulationError> {
        if self.phase != StepperPhase::Running {
            return Err(SimulationError::NotRunning);
        }

        // Zero accumulators and sum every force term for the current positions
        self.forces.accumulate_forces(&mut state.bodies);

        // Only integrate once every body has its full force
        integrate_all(&mut state.bodies, self.dt);

        // Sub-particles follow their owner's updated position
        for body in state.bodies.iter_mut() {
            let center = body.x;
            for sub in body.sub_particles.iter_mut() {
                orbit::advance(sub, center, self.angular_step);
            }
        }

        state.t += self.dt;
        state.steps += 1;
        trace!(step = state.steps, t = state.t, "step complete");

        Ok(&*state)
    }
}
