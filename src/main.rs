mod orbit;
mod poll;
mod stream;
mod trajectory;
mod web;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::trajectory::{Trajectory, TrajectoryOrigin};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "gmat-bridge")]
#[command(about = "Orbital element bridges for the asteroid visualization client")]
struct Cli {
    /// YAML configuration file; built-in defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream a trajectory as orbital elements over WebSocket
    Stream,
    /// Serve synthetic orbits over HTTP polling
    Poll,
    /// Convert one state vector (x y z vx vy vz, km and km/s)
    Elements {
        #[arg(num_args = 6, allow_negative_numbers = true, required = true)]
        state: Vec<f64>,
    },
    /// Report what a trajectory log would stream
    Inspect {
        /// Defaults to the configured trajectory file
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Stream => serve(web::run_stream_server(config).await),
        Commands::Poll => serve(web::run_poll_server(config).await),
        Commands::Elements { state } => elements(&config, &state),
        Commands::Inspect { file } => inspect(&config, file),
    }
}

fn load_config(path: Option<&str>) -> Result<Config, web::config::ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn serve(result: std::io::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn elements(config: &Config, state: &[f64]) -> ExitCode {
    let Some(el) = config.converter().convert(state) else {
        eprintln!("No orbit defined for this state");
        return ExitCode::FAILURE;
    };

    if el.a.is_finite() {
        println!("Semi-major axis: {:.2} km", el.a);
    } else {
        println!("Semi-major axis: unbound");
    }
    println!("Eccentricity: {:.6}", el.e);
    println!("Inclination: {:.2} deg", el.i);
    println!("RAAN: {:.2} deg", el.raan);
    println!("Argument of periapsis: {:.2} deg", el.argp);
    println!("Mean anomaly: {:.2} deg", el.m0);
    println!("Velocity: {:.4} km/s", el.velocity);
    ExitCode::SUCCESS
}

fn inspect(config: &Config, file: Option<PathBuf>) -> ExitCode {
    let path = file.unwrap_or_else(|| config.stream.trajectory_file.clone());
    let trajectory = Trajectory::load(&path);
    let converter = config.converter();

    let convertible = trajectory
        .states()
        .iter()
        .filter(|s| converter.convert_state(s).is_some())
        .count();

    match trajectory.origin() {
        TrajectoryOrigin::Log(p) => println!("Trajectory from {}", p.display()),
        TrajectoryOrigin::Synthetic => println!("Trajectory unavailable, synthetic fallback"),
    }
    println!(
        "  {} samples, {} convertible, {} skipped",
        trajectory.len(),
        convertible,
        trajectory.len() - convertible
    );
    ExitCode::SUCCESS
}
