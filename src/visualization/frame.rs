//! Frame loop driven by a windowing collaborator
//!
//! A [`FrameGate`] is whatever owns the drawable surface: it decides when the
//! loop ends, swaps buffers and pumps events. [`run_loop`] performs the
//! start -> (step, render, swap, poll)* cycle against any gate and renderer.

use tracing::{debug, info};

use crate::simulation::engine::WindowSettings;
use crate::simulation::error::SimulationError;
use crate::simulation::states::SimulationState;
use crate::simulation::stepper::SimulationStepper;

use super::render::{render_frame, Palette, Renderer};

/// Windowing collaborator. Created from [`WindowSettings`], destroyed on drop
pub trait FrameGate {
    fn should_close(&self) -> bool;
    fn poll_events(&mut self);
    fn swap_buffers(&mut self);
}

/// Gate without a window that closes after a fixed number of frames
#[derive(Debug)]
pub struct HeadlessGate {
    settings: WindowSettings,
    frames: u64, // frames to run
    swapped: u64, // frames presented so far
}

impl HeadlessGate {
    pub fn create(settings: &WindowSettings, frames: u64) -> Self {
        debug!(width = settings.width, height = settings.height, title = %settings.title, frames, "headless surface created");
        Self {
            settings: settings.clone(),
            frames,
            swapped: 0,
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.swapped
    }
}

impl FrameGate for HeadlessGate {
    fn should_close(&self) -> bool {
        self.swapped >= self.frames
    }

    fn poll_events(&mut self) {}

    fn swap_buffers(&mut self) {
        self.swapped += 1;
    }
}

impl Drop for HeadlessGate {
    fn drop(&mut self) {
        debug!(title = %self.settings.title, frames = self.swapped, "headless surface destroyed");
    }
}

/// Run until the gate asks to close; returns the number of frames stepped
pub fn run_loop<G, R>(
    gate: &mut G,
    stepper: &mut SimulationStepper,
    state: &mut SimulationState,
    palette: &Palette,
    renderer: &mut R,
) -> Result<u64, SimulationError>
where
    G: FrameGate + ?Sized,
    R: Renderer + ?Sized,
{
    stepper.start();

    let mut frames = 0;
    while !gate.should_close() {
        let view = stepper.step(state)?;

        renderer.begin_frame();
        render_frame(view, palette, renderer);

        gate.swap_buffers();
        gate.poll_events();
        frames += 1;
    }

    info!(frames, t = state.t, "frame loop finished");
    Ok(frames)
}
