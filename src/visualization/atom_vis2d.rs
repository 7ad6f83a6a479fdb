use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::WindowResolution;
use tracing::{error, info};

use crate::simulation::scenario::Scenario;
use crate::visualization::render::{render_frame, DrawCommand, DrawList, Palette, Renderer, Rgb};

/// Index into the disk commands of the current frame's draw list
#[derive(Component)]
struct DiskIndex(pub usize);

/// Everything the viewer systems share: the scenario, its styling and the
/// draw list rebuilt every frame
#[derive(Resource)]
struct ViewerScenario {
    scenario: Scenario,
    palette: Palette,
    frame: DrawList,
}

/// Disks sit above the background, gizmo rings are drawn on top
const DISK_Z: f32 = 1.0;

pub fn run_2d(scenario: Scenario) -> AppExit {
    info!(
        bodies = scenario.state.bodies.len(),
        width = scenario.window.width,
        height = scenario.window.height,
        "starting Bevy 2D viewer"
    );

    let window = Window {
        title: scenario.window.title.clone(),
        resolution: WindowResolution::new(scenario.window.width as f32, scenario.window.height as f32),
        ..Default::default()
    };

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(ViewerScenario {
            scenario,
            palette: Palette::default(),
            frame: DrawList::new(),
        })
        // Logging is set up by the binary, keep Bevy from installing its own subscriber
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..Default::default()
                })
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_viewer_system)
        .add_systems(Update, (physics_step_system, draw_system).chain())
        .run()
}

fn to_color(c: Rgb) -> Color {
    Color::srgb(c.r, c.g, c.b)
}

fn setup_viewer_system(
    mut commands: Commands,
    mut viewer: ResMut<ViewerScenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera, origin at the window centre, one world unit per pixel
    commands.spawn(Camera2dBundle::default());

    let ViewerScenario { scenario, palette, frame } = &mut *viewer;
    scenario.stepper.start();

    // The disk count never changes, so one mesh per disk of the initial frame
    frame.begin_frame();
    render_frame(&scenario.state, palette, frame);

    for (i, cmd) in frame.disks().enumerate() {
        if let DrawCommand::Disk { position, radius, color } = *cmd {
            commands.spawn((
                MaterialMesh2dBundle {
                    mesh: Mesh2dHandle(meshes.add(Circle::new(radius as f32))),
                    material: materials.add(ColorMaterial::from(to_color(color))),
                    transform: Transform::from_xyz(position.x as f32, position.y as f32, DISK_Z),
                    ..Default::default()
                },
                DiskIndex(i),
            ));
        }
    }
}

fn physics_step_system(mut viewer: ResMut<ViewerScenario>, mut exit: EventWriter<AppExit>) {
    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario { stepper, state, .. } = &mut viewer.scenario;

    if let Err(e) = stepper.step(state) {
        error!("simulation step failed: {e}");
        exit.send(AppExit::error());
    }
}

fn draw_system(
    mut viewer: ResMut<ViewerScenario>,
    mut gizmos: Gizmos,
    mut query: Query<(&DiskIndex, &mut Transform)>,
) {
    let ViewerScenario { scenario, palette, frame } = &mut *viewer;
    frame.begin_frame();
    render_frame(&scenario.state, palette, frame);

    for cmd in frame.rings() {
        if let DrawCommand::Ring { center, radius, color } = *cmd {
            gizmos.circle_2d(Vec2::new(center.x as f32, center.y as f32), radius as f32, to_color(color));
        }
    }

    let disks: Vec<&DrawCommand> = frame.disks().collect();
    for (DiskIndex(i), mut transform) in &mut query {
        if let Some(DrawCommand::Disk { position, .. }) = disks.get(*i).copied() {
            transform.translation.x = position.x as f32;
            transform.translation.y = position.y as f32;
        }
    }
}
