//! # Trajectory Planner CLI
//!
//! Plans a synchronized point-to-point joint move and prints the sampled
//! trajectory.
//!
//! # Usage
//!
//! ```bash
//! # Config directory with planner.toml + robot.toml
//! traj_plan --config-dir config/ --to 0.5,-1.0
//!
//! # Explicit files, start state and rate override, JSON output
//! traj_plan --planner planner.toml --robot robot.toml \
//!     --from 0,0 --to 1,1 --rate 250 --format json
//!
//! # Verbose logging
//! traj_plan --config-dir config/ --to 1,1 -v
//! ```

#![deny(warnings)]

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use traj_common::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig, load_config_dir};
use traj_common::planner::{PlannerConfig, PlannerFileConfig};
use traj_common::robot::{RobotFileConfig, RobotModel, RobotModelConfig};
use traj_planner::planner::{TrajectoryPlanner, TrapezoidalPlanner};

/// Output format of the planned trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Comma-separated values, one row per sample.
    Csv,
    /// Pretty-printed JSON with the four sample sequences.
    Json,
}

/// Trajectory planner - synchronized trapezoidal joint moves
#[derive(Parser, Debug)]
#[command(name = "traj_plan")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Multi-axis synchronized trapezoidal trajectory planner")]
#[command(long_about = None)]
struct Args {
    /// Config directory containing planner.toml and robot.toml.
    /// Preferred over --planner/--robot.
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Path to planner.toml (used without --config-dir).
    #[arg(long, value_name = "FILE", required_unless_present = "config_dir")]
    planner: Option<PathBuf>,

    /// Path to robot.toml (used without --config-dir).
    #[arg(long, value_name = "FILE", required_unless_present = "config_dir")]
    robot: Option<PathBuf>,

    /// Start joint state (defaults to the robot's initial state).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    from: Option<Vec<f64>>,

    /// Target joint state.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    to: Vec<f64>,

    /// Override the configured sampling rate [Hz].
    #[arg(long)]
    rate: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Enable verbose logging (overrides the configured log level)
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("Planning failed: {}", e);
        eprintln!("traj_plan: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (shared, planner_config, robot_config) = load_configs(&args)?;

    setup_tracing(&args, shared.log_level);

    info!(
        "Trajectory planner v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        shared.service_name
    );

    let planner = TrapezoidalPlanner::from_config(&planner_config);
    if let Some(rate) = args.rate {
        info!("Rate override from CLI: {} Hz", rate);
        planner.set_rate(rate);
    }

    let model = RobotModel::from_config(&robot_config);
    let current = args
        .from
        .clone()
        .unwrap_or_else(|| model.state().to_vec());

    let trajectory = planner.plan_move_j(&model, &current, &args.to)?;
    info!(
        "Planned {} samples over {:.4} s at {} Hz",
        trajectory.len(),
        trajectory.duration(),
        planner.rate()
    );

    match args.format {
        OutputFormat::Csv => print!("{}", trajectory.to_csv(model.joint_names())?),
        OutputFormat::Json => println!("{}", trajectory.to_json()?),
    }
    Ok(())
}

/// Load and validate shared, planner and robot configuration from CLI arguments.
///
/// Runs before tracing is installed; failures are reported by `main`.
fn load_configs(
    args: &Args,
) -> Result<(SharedConfig, PlannerConfig, RobotModelConfig), ConfigError> {
    if let Some(ref config_dir) = args.config_dir {
        let full = load_config_dir(config_dir)?;
        return Ok((full.shared, full.planner, full.robot));
    }

    let (Some(planner_path), Some(robot_path)) = (&args.planner, &args.robot) else {
        return Err(ConfigError::ValidationError(
            "either --config-dir or both --planner and --robot are required".to_string(),
        ));
    };

    let planner_file = PlannerFileConfig::load(planner_path)?;
    planner_file.shared.validate()?;
    planner_file.planner.validate()?;

    let robot_file = RobotFileConfig::load(robot_path)?;
    robot_file.robot.validate()?;

    Ok((planner_file.shared, planner_file.planner, robot_file.robot))
}

/// Default filter directive: `-v` forces debug, otherwise the configured level.
fn log_directive(args: &Args, configured: LogLevel) -> &'static str {
    if args.verbose {
        LogLevel::Debug.as_directive()
    } else {
        configured.as_directive()
    }
}

/// Setup tracing subscriber based on CLI arguments and configured level.
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so stdout
/// carries only the trajectory.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let directive = log_directive(args, configured);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    debug!("Log filter default: {}", directive);
}
