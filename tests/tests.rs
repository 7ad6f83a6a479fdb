use approx::assert_relative_eq;

use atomsim::configuration::config::{ReactionMode, ScenarioConfig};
use atomsim::simulation::error::SimulationError;
use atomsim::simulation::forces::{compute_forces, coulomb_magnitude, ForceSet, SoftenedCoulomb, MIN_DISTANCE};
use atomsim::simulation::integrator::semi_implicit_euler;
use atomsim::simulation::params::Parameters;
use atomsim::simulation::scenario::Scenario;
use atomsim::simulation::states::{Body, BodyId, NVec2, SimulationState, SubParticleKind};
use atomsim::simulation::stepper::StepperPhase;
use atomsim::visualization::frame::{run_loop, HeadlessGate};
use atomsim::visualization::render::{DrawCommand, DrawList, Palette};
use atomsim::{bench_step, Rgb};

/// Build a simple 2-body state separated along the x-axis
pub fn two_body_state(x2: f64, q1: f64, q2: f64, m: f64) -> SimulationState {
    let b1 = Body::new(BodyId(0), NVec2::zeros(), NVec2::zeros(), m, q1);
    let b2 = Body::new(BodyId(1), NVec2::new(x2, 0.0), NVec2::zeros(), m, q2);
    SimulationState::new(vec![b1, b2])
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        k: 1000.0,
        epsilon: 50.0,
        dt: 0.016,
        angular_step: 0.0025,
        orbit_radius: 50.0,
        reaction: ReactionMode::Opposite,
    }
}

/// Build a Coulomb term + ForceSet
pub fn coulomb_set(p: &Parameters) -> ForceSet {
    ForceSet::new().with(SoftenedCoulomb::new(p.k, p.epsilon).with_reaction(p.reaction))
}

/// Scenario from an inline YAML document
pub fn scenario_from_yaml(text: &str) -> Result<Scenario, SimulationError> {
    let cfg = ScenarioConfig::from_yaml_str(text).expect("test YAML must parse");
    Scenario::build_scenario(cfg)
}

const PAIR_YAML: &str = r#"
parameters:
  k: 1000.0
  epsilon: 50.0
  dt: 0.016
  angular_step: 0.0025
bodies:
  - x: [0.0, 0.0]
    m: 2.0
    q: 1.0
  - x: [10.0, 0.0]
    m: 2.0
    q: 1.0
"#;

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn like_charges_repel() {
    let mut sys = two_body_state(10.0, 1.0, 1.0, 1.0);
    let p = test_params();
    coulomb_set(&p).accumulate_forces(&mut sys.bodies);

    assert!(sys.bodies[0].f.x < 0.0, "body 0 not pushed away: {:?}", sys.bodies[0].f);
    assert!(sys.bodies[1].f.x > 0.0, "body 1 not pushed away: {:?}", sys.bodies[1].f);
}

#[test]
fn opposite_charges_attract() {
    let mut sys = two_body_state(10.0, 1.0, -1.0, 1.0);
    let p = test_params();
    coulomb_set(&p).accumulate_forces(&mut sys.bodies);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    assert!(coulomb_magnitude(p.k, 1.0, -1.0, 10.0, p.epsilon) < 0.0);
    assert!(sys.bodies[0].f.dot(&dx) > 0.0, "force is not toward second body");
    assert!(sys.bodies[1].f.dot(&dx) < 0.0, "force is not toward first body");
}

#[test]
fn opposite_reaction_conserves_momentum() {
    let mut bodies = vec![
        Body::new(BodyId(0), NVec2::new(0.0, 0.0), NVec2::zeros(), 1.0, 1.0),
        Body::new(BodyId(1), NVec2::new(30.0, 5.0), NVec2::zeros(), 3.0, -2.0),
        Body::new(BodyId(2), NVec2::new(-12.0, 40.0), NVec2::zeros(), 0.5, 1.5),
    ];
    compute_forces(&mut bodies, 1000.0, 50.0, ReactionMode::Opposite);

    let net: NVec2 = bodies.iter().map(|b| b.f).sum();
    assert!(net.norm() < 1e-12, "Net force not zero: {:?}", net);
}

#[test]
fn mirrored_reaction_applies_same_vector_to_both() {
    let mut sys = two_body_state(10.0, 1.0, 1.0, 1.0);
    compute_forces(&mut sys.bodies, 1000.0, 50.0, ReactionMode::Mirrored);

    assert_eq!(sys.bodies[0].f, sys.bodies[1].f);
    assert_relative_eq!(sys.bodies[0].f.x, 1000.0 / 150.0, epsilon = 1e-12);
}

#[test]
fn force_matches_reference_magnitude() {
    let mut sys = two_body_state(10.0, 1.0, 1.0, 2.0);
    compute_forces(&mut sys.bodies, 1000.0, 50.0, ReactionMode::Opposite);

    assert_relative_eq!(sys.bodies[0].f.norm(), 6.666_666_666_666_667, epsilon = 1e-9);
    assert_relative_eq!(sys.bodies[0].f.y, 0.0);
}

#[test]
fn coincident_bodies_are_clamped() {
    let mut sys = two_body_state(0.0, 1.0, 1.0, 1.0);
    compute_forces(&mut sys.bodies, 1000.0, 50.0, ReactionMode::Opposite);

    let magnitude = coulomb_magnitude(1000.0, 1.0, 1.0, MIN_DISTANCE, 50.0);
    assert_relative_eq!(magnitude, 1000.0 / 51.0);
    for b in &sys.bodies {
        assert!(b.f.x.is_finite() && b.f.y.is_finite(), "force is not finite: {:?}", b.f);
    }
}

#[test]
fn forces_are_reset_every_pass() {
    let mut sys = two_body_state(10.0, 1.0, 1.0, 1.0);
    let set = coulomb_set(&test_params());

    set.accumulate_forces(&mut sys.bodies);
    let first = sys.bodies[0].f;
    set.accumulate_forces(&mut sys.bodies);

    assert_eq!(sys.bodies[0].f, first);
}

#[test]
fn softening_bounds_close_encounters() {
    let p = test_params();
    let near = coulomb_magnitude(p.k, 1.0, 1.0, MIN_DISTANCE, p.epsilon);
    assert!(near <= p.k / p.epsilon, "softening failed; magnitude {near} too large");
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn semi_implicit_euler_kicks_before_drift() {
    let mut b = Body::new(BodyId(0), NVec2::new(1.0, 2.0), NVec2::new(0.5, 0.0), 2.0, 0.0);
    b.f = NVec2::new(4.0, -2.0);
    semi_implicit_euler(&mut b, 0.1);

    // v = (0.5 + 0.1 * 2, 0 - 0.1 * 1) = (0.7, -0.1)
    assert_relative_eq!(b.v.x, 0.7, epsilon = 1e-12);
    assert_relative_eq!(b.v.y, -0.1, epsilon = 1e-12);
    // x uses the updated velocity
    assert_relative_eq!(b.x.x, 1.07, epsilon = 1e-12);
    assert_relative_eq!(b.x.y, 1.99, epsilon = 1e-12);
}

#[test]
fn semi_implicit_euler_is_deterministic() {
    let mut a = Body::new(BodyId(0), NVec2::new(3.0, -7.0), NVec2::new(0.25, 1.5), 0.7, 1.0);
    a.f = NVec2::new(-1.3, 0.9);
    let mut b = a.clone();

    for _ in 0..100 {
        semi_implicit_euler(&mut a, 0.016);
        semi_implicit_euler(&mut b, 0.016);
    }

    assert_eq!(a.x, b.x);
    assert_eq!(a.v, b.v);
}

// ==================================================================================
// Stepper tests
// ==================================================================================

#[test]
fn first_step_matches_reference_velocity_change() {
    let mut scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    scenario.stepper.start();
    let view = scenario.stepper.step(&mut scenario.state).unwrap();

    // -(6.6667 / 2) * 0.016
    assert_relative_eq!(view.bodies[0].v.x, -(1000.0 / 150.0 / 2.0) * 0.016, epsilon = 1e-12);
    assert_relative_eq!(view.bodies[0].v.x, -0.053_333, epsilon = 1e-5);
    assert_relative_eq!(view.bodies[1].v.x, 0.053_333, epsilon = 1e-5);
    assert_eq!(view.steps, 1);
    assert_relative_eq!(view.t, 0.016);
}

#[test]
fn isolated_body_stays_put() {
    let mut scenario = scenario_from_yaml(
        r#"
parameters: { k: 1000.0, epsilon: 50.0, dt: 0.016, angular_step: 0.001 }
bodies:
  - x: [12.0, -4.0]
    m: 2.0
    q: 1.0
"#,
    )
    .unwrap();
    scenario.stepper.start();

    for _ in 0..1000 {
        scenario.stepper.step(&mut scenario.state).unwrap();
    }

    assert_eq!(scenario.state.bodies[0].x, NVec2::new(12.0, -4.0));
    assert_eq!(scenario.state.bodies[0].v, NVec2::zeros());
}

#[test]
fn stepping_while_idle_is_rejected() {
    let mut scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    assert_eq!(scenario.stepper.phase(), StepperPhase::Idle);

    let err = scenario.stepper.step(&mut scenario.state).unwrap_err();
    assert_eq!(err, SimulationError::NotRunning);
    assert_eq!(scenario.state.steps, 0);

    scenario.stepper.start();
    scenario.stepper.start();
    assert_eq!(scenario.stepper.phase(), StepperPhase::Running);
}

#[test]
fn opposite_mode_keeps_total_momentum_over_many_steps() {
    let mut scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    scenario.stepper.start();
    for _ in 0..500 {
        scenario.stepper.step(&mut scenario.state).unwrap();
    }
    assert!(scenario.state.total_momentum().norm() < 1e-9);
    assert!(scenario.state.kinetic_energy() > 0.0);
}

// ==================================================================================
// Orbit kinematics tests
// ==================================================================================

#[test]
fn proton_tracks_nucleus_every_step() {
    let mut scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    scenario.stepper.start();

    for _ in 0..200 {
        let view = scenario.stepper.step(&mut scenario.state).unwrap();
        for body in &view.bodies {
            for sub in body.sub_particles.iter().filter(|s| s.kind == SubParticleKind::Positive) {
                assert_eq!(sub.x, body.x);
            }
        }
    }
}

#[test]
fn electron_angle_advances_by_fixed_step() {
    let mut scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    scenario.stepper.start();
    let n = 5000;
    for _ in 0..n {
        scenario.stepper.step(&mut scenario.state).unwrap();
    }

    let expected = n as f64 * 0.0025;
    for body in &scenario.state.bodies {
        let electron = body
            .sub_particles
            .iter()
            .find(|s| s.kind == SubParticleKind::Negative)
            .unwrap();

        assert_relative_eq!(electron.angle.cos(), expected.cos(), epsilon = 1e-9);
        assert_relative_eq!(electron.angle.sin(), expected.sin(), epsilon = 1e-9);
        assert_relative_eq!((electron.x - body.x).norm(), 50.0, epsilon = 1e-9);
    }
}

#[test]
fn electron_orbit_ignores_force_constant() {
    let strong = PAIR_YAML.replace("k: 1000.0", "k: 900000.0");
    let mut a = scenario_from_yaml(PAIR_YAML).unwrap();
    let mut b = scenario_from_yaml(&strong).unwrap();
    a.stepper.start();
    b.stepper.start();
    for _ in 0..50 {
        a.stepper.step(&mut a.state).unwrap();
        b.stepper.step(&mut b.state).unwrap();
    }

    let angle = |s: &Scenario| s.state.bodies[0].sub_particles[1].angle;
    assert_eq!(angle(&a), angle(&b));
}

// ==================================================================================
// Scenario and configuration tests
// ==================================================================================

#[test]
fn default_atom_has_proton_and_electron() {
    let scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    let body = &scenario.state.bodies[1];

    assert_eq!(body.sub_particles.len(), 2);
    assert_eq!(body.sub_particles[0].kind, SubParticleKind::Positive);
    assert_eq!(body.sub_particles[0].x, body.x);
    assert_eq!(body.sub_particles[1].kind, SubParticleKind::Negative);
    assert_eq!(body.sub_particles[1].owner, BodyId(1));
    assert_relative_eq!(body.sub_particles[1].x.x, 60.0);
    assert_relative_eq!(body.sub_particles[1].x.y, 0.0);
}

#[test]
fn defaults_fill_missing_fields() {
    let scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    assert_eq!(scenario.parameters.reaction, ReactionMode::Opposite);
    assert_relative_eq!(scenario.parameters.orbit_radius, 50.0);
    assert_eq!(scenario.window.width, 800);
    assert_eq!(scenario.window.height, 600);
    assert_eq!(scenario.window.title, "Atom Simulation");
    assert_eq!(scenario.state.bodies[0].v, NVec2::zeros());
}

#[test]
fn non_positive_mass_is_rejected() {
    let err = scenario_from_yaml(&PAIR_YAML.replacen("m: 2.0", "m: 0.0", 1)).err().unwrap();
    assert_eq!(err, SimulationError::InvalidMass { index: 0, mass: 0.0 });

    let err = scenario_from_yaml(&PAIR_YAML.replacen("m: 2.0", "m: -1.0", 1)).err().unwrap();
    assert!(matches!(err, SimulationError::InvalidMass { index: 0, .. }));
}

#[test]
fn non_positive_orbit_radius_is_rejected() {
    let yaml = r#"
parameters: { k: 1000.0, epsilon: 50.0, dt: 0.016, angular_step: 0.001 }
bodies:
  - x: [0.0, 0.0]
    m: 1.0
    q: 1.0
    sub_particles:
      - kind: positive
      - kind: negative
        orbit_radius: -5.0
"#;
    let err = scenario_from_yaml(yaml).err().unwrap();
    assert!(matches!(
        err,
        SimulationError::InvalidOrbitRadius { body: 0, sub: 1, kind: SubParticleKind::Negative, .. }
    ));

    let err = scenario_from_yaml(&PAIR_YAML.replace("angular_step: 0.0025", "angular_step: 0.0025\n  orbit_radius: 0.0"))
        .err()
        .unwrap();
    assert!(matches!(err, SimulationError::InvalidParameter { name: "orbit_radius", .. }));
}

#[test]
fn bad_parameters_are_rejected() {
    let err = scenario_from_yaml(&PAIR_YAML.replace("dt: 0.016", "dt: 0.0")).err().unwrap();
    assert_eq!(err, SimulationError::InvalidParameter { name: "dt", value: 0.0 });

    let err = scenario_from_yaml(&PAIR_YAML.replace("epsilon: 50.0", "epsilon: -1.0")).err().unwrap();
    assert!(matches!(err, SimulationError::InvalidParameter { name: "epsilon", .. }));
}

#[test]
fn bundled_scenarios_build() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["two_atoms.yaml", "charged_pair.yaml"] {
        let text = std::fs::read_to_string(dir.join(name)).unwrap();
        let scenario = scenario_from_yaml(&text).unwrap();
        assert_eq!(scenario.state.bodies.len(), 2, "{name}");
    }
}

#[test]
fn scenario_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pair.yaml");
    std::fs::write(&path, PAIR_YAML).unwrap();

    let reader = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
    let cfg: ScenarioConfig = serde_yaml::from_reader(reader).unwrap();
    assert_eq!(cfg.bodies.len(), 2);
    assert!(Scenario::build_scenario(cfg).is_ok());
}

// ==================================================================================
// Rendering and frame loop tests
// ==================================================================================

#[test]
fn headless_loop_runs_requested_frames() {
    let mut scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    let mut gate = HeadlessGate::create(&scenario.window, 7);
    let mut draw_list = DrawList::new();

    let frames = run_loop(
        &mut gate,
        &mut scenario.stepper,
        &mut scenario.state,
        &Palette::default(),
        &mut draw_list,
    )
    .unwrap();

    assert_eq!(frames, 7);
    assert_eq!(gate.frames_presented(), 7);
    assert_eq!(scenario.state.steps, 7);
    // one disk per sub-particle, one ring per electron, for the last frame only
    assert_eq!(draw_list.disks().count(), 4);
    assert_eq!(draw_list.rings().count(), 2);
}

#[test]
fn render_styles_follow_kind() {
    let scenario = scenario_from_yaml(PAIR_YAML).unwrap();
    let mut draw_list = DrawList::new();
    atomsim::render_frame(&scenario.state, &Palette::default(), &mut draw_list);

    let disks: Vec<DrawCommand> = draw_list.disks().copied().collect();
    assert_eq!(
        disks[0],
        DrawCommand::Disk { position: NVec2::zeros(), radius: 10.0, color: Rgb::new(1.0, 0.0, 0.0) }
    );
    assert_eq!(
        disks[1],
        DrawCommand::Disk { position: NVec2::new(50.0, 0.0), radius: 5.0, color: Rgb::new(0.0, 0.0, 1.0) }
    );

    let first_ring = draw_list.rings().next().copied().unwrap();
    assert_eq!(
        first_ring,
        DrawCommand::Ring { center: NVec2::zeros(), radius: 50.0, color: Rgb::new(0.4, 0.4, 0.4) }
    );
}

// ==================================================================================
// Benchmark
// ==================================================================================

#[test]
fn bench_reports_every_size() {
    let timings = bench_step(1).unwrap();
    assert_eq!(timings.len(), 7);
    assert!(timings.iter().all(|t| t.ms_per_step >= 0.0));
}
