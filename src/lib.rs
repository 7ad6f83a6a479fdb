pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodyId, SubParticle, SubParticleKind, SimulationState, NVec2};
pub use simulation::forces::{ForceSet, ForceTerm, SoftenedCoulomb, coulomb_magnitude, compute_forces};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::stepper::{SimulationStepper, StepperPhase};
pub use simulation::scenario::Scenario;
pub use simulation::error::SimulationError;

pub use configuration::config::{ReactionMode, WindowConfig, ParametersConfig, BodyConfig, SubParticleConfig, ScenarioConfig};

pub use visualization::render::{Renderer, DrawList, DrawCommand, Palette, Rgb, render_frame};
pub use visualization::frame::{FrameGate, HeadlessGate, run_loop};
#[cfg(feature = "viewer")]
pub use visualization::atom_vis2d::run_2d;

pub use benchmark::benchmark::bench_step;
