use atomsim::{bench_step, run_loop, DrawCommand, DrawList, HeadlessGate, Palette, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod logging;

#[derive(Parser, Debug)]
#[command(about = "Charged atoms with orbiting electrons")]
struct Args {
    /// Scenario file, looked up in `scenarios/` unless the path exists as given
    #[arg(short, long, default_value = "two_atoms.yaml")]
    file_name: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long)]
    quiet: bool,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run without a window for `--frames` frames
    #[arg(long)]
    headless: bool,

    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Time the simulation step for growing scene sizes and exit
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let given = Path::new(file_name);
    if given.exists() {
        given.to_path_buf()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    }
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    debug!(path = %config_path.display(), "loading scenario");

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn run_headless(mut scenario: Scenario, frames: u64) -> Result<()> {
    let mut gate = HeadlessGate::create(&scenario.window, frames);
    let mut draw_list = DrawList::new();
    let palette = Palette::default();

    let Scenario { stepper, state, .. } = &mut scenario;
    let stepped = run_loop(&mut gate, stepper, state, &palette, &mut draw_list)?;

    for body in &state.bodies {
        info!(id = body.id.0, x = body.x.x, y = body.x.y, vx = body.v.x, vy = body.v.y, "final body state");
    }
    info!(
        frames = stepped,
        disks = draw_list.disks().count(),
        rings = draw_list.rings().count(),
        momentum = ?state.total_momentum(),
        kinetic_energy = state.kinetic_energy(),
        "headless run complete"
    );
    for cmd in &draw_list.commands {
        if let DrawCommand::Disk { position, radius, .. } = cmd {
            debug!(x = position.x, y = position.y, radius, "disk");
        }
    }

    Ok(())
}

#[cfg(feature = "viewer")]
fn run_viewer(scenario: Scenario) -> Result<ExitCode> {
    use bevy::app::AppExit;

    if let AppExit::Error(code) = atomsim::run_2d(scenario) {
        error!(code = code.get(), "viewer exited with an error");
        return Ok(ExitCode::from(code.get()));
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "viewer"))]
fn run_viewer(_scenario: Scenario) -> Result<ExitCode> {
    anyhow::bail!("built without the `viewer` feature, run with --headless")
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::setup_logging(args.verbose, args.quiet, args.log_file.clone())?;

    if args.bench {
        bench_step(100)?;
        return Ok(ExitCode::SUCCESS);
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name).inspect_err(|e| error!("{e:#}"))?;
    let scenario = Scenario::build_scenario(scenario_cfg)
        .inspect_err(|e| error!("invalid scenario: {e}"))
        .context("invalid scenario")?;

    if args.headless {
        run_headless(scenario, args.frames)?;
        Ok(ExitCode::SUCCESS)
    } else {
        run_viewer(scenario)
    }
}
