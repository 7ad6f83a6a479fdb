//! Translation of the simulation state into draw calls
//!
//! The core never draws anything itself: [`render_frame`] walks a read-only
//! [`SimulationState`] and issues `draw_disk`/`draw_ring` calls on any
//! [`Renderer`]. [`DrawList`] records those calls so the headless loop,
//! the Bevy viewer and the tests can consume them.

use crate::simulation::states::{NVec2, SimulationState, SubParticleKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Rendering collaborator
pub trait Renderer {
    /// Called once before the first draw call of every frame
    fn begin_frame(&mut self) {}

    /// Filled circle
    fn draw_disk(&mut self, position: NVec2, radius: f64, color: Rgb);

    /// Circle outline
    fn draw_ring(&mut self, center: NVec2, radius: f64, color: Rgb);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleStyle {
    pub radius: f64,
    pub color: Rgb,
}

/// Radius and colour per sub-particle kind, plus the orbit ring colour
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub positive: ParticleStyle,
    pub negative: ParticleStyle,
    pub neutral: ParticleStyle,
    pub orbit: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            positive: ParticleStyle { radius: 10.0, color: Rgb::new(1.0, 0.0, 0.0) },
            negative: ParticleStyle { radius: 5.0, color: Rgb::new(0.0, 0.0, 1.0) },
            neutral: ParticleStyle { radius: 10.0, color: Rgb::new(1.0, 1.0, 1.0) },
            orbit: Rgb::new(0.4, 0.4, 0.4),
        }
    }
}

impl Palette {
    pub fn style(&self, kind: SubParticleKind) -> ParticleStyle {
        match kind {
            SubParticleKind::Positive => self.positive,
            SubParticleKind::Negative => self.negative,
            SubParticleKind::Neutral => self.neutral,
        }
    }
}

/// Draw one frame: orbit rings first so disks are painted over them
pub fn render_frame<R: Renderer + ?Sized>(state: &SimulationState, palette: &Palette, renderer: &mut R) {
    for body in &state.bodies {
        for sub in &body.sub_particles {
            if sub.kind == SubParticleKind::Negative {
                renderer.draw_ring(body.x, sub.orbit_radius, palette.orbit);
            }
        }
    }

    for sub in state.sub_particles() {
        let style = palette.style(sub.kind);
        renderer.draw_disk(sub.x, style.radius, style.color);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Disk { position: NVec2, radius: f64, color: Rgb },
    Ring { center: NVec2, radius: f64, color: Rgb },
}

/// Renderer that records every call of a frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn disks(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Disk { .. }))
    }

    pub fn rings(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Ring { .. }))
    }
}

impl Renderer for DrawList {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn draw_disk(&mut self, position: NVec2, radius: f64, color: Rgb) {
        self.commands.push(DrawCommand::Disk { position, radius, color });
    }

    fn draw_ring(&mut self, center: NVec2, radius: f64, color: Rgb) {
        self.commands.push(DrawCommand::Ring { center, radius, color });
    }
}
