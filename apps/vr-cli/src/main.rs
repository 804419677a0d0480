mod error;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use vr_config::RigConfig;
use vr_gases::Gas;
use vr_protocol::{ProtocolAdapter, Session, TickSource, split_frames};
use vr_rig::RigController;

use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "vr-cli")]
#[command(about = "Volumetric gas-handling rig emulator", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the command protocol on stdin/stdout
    Serve {
        /// Rig config (YAML or JSON); the built-in panel if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run a file of commands and print each reply
    Script {
        /// Path to the command file, one command per line
        script_path: PathBuf,
        /// Rig config (YAML or JSON); the built-in panel if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Simulated seconds between commands
        #[arg(long, default_value_t = 0.1)]
        dt: f64,
    },
    /// Print the gas catalogue and mixing matrix as JSON
    Catalog {
        /// Rig config (YAML or JSON); the built-in panel if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load and validate a config file
    CheckConfig {
        /// Path to the config file
        config_path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    // stdout carries protocol replies
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Serve { config } => cmd_serve(config.as_deref()),
        Commands::Script {
            script_path,
            config,
            dt,
        } => cmd_script(&script_path, config.as_deref(), dt),
        Commands::Catalog { config } => cmd_catalog(config.as_deref()),
        Commands::CheckConfig { config_path } => cmd_check_config(&config_path),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<RigConfig> {
    match path {
        Some(path) => vr_config::load(path).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(RigConfig::default()),
    }
}

fn build_rig(path: Option<&Path>) -> CliResult<RigController> {
    let config = load_config(path)?;
    Ok(RigController::from_config(&config)?)
}

fn cmd_serve(config: Option<&Path>) -> CliResult<()> {
    let rig = build_rig(config)?;
    info!(identity = rig.identify(), buffers = rig.buffer_count(), "serving");
    let mut session = Session::new(rig, ProtocolAdapter::new(), TickSource::WallClock);
    session.serve(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn cmd_script(script_path: &Path, config: Option<&Path>, dt: f64) -> CliResult<()> {
    if !(dt.is_finite() && dt >= 0.0) {
        return Err(CliError::InvalidInput(format!(
            "dt must be a non-negative number, got {dt}"
        )));
    }
    let script = std::fs::read_to_string(script_path).map_err(|source| CliError::ScriptRead {
        path: script_path.to_path_buf(),
        source,
    })?;

    let mut session = Session::new(build_rig(config)?, ProtocolAdapter::new(), TickSource::Fixed(dt));
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in split_frames(&script) {
        if line.trim_start().starts_with('#') {
            continue;
        }
        if let Some(reply) = session.handle_line(line) {
            writeln!(out, "{reply}")?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Catalog<'a> {
    gases: Vec<&'a Gas>,
    /// One row per gas in catalogue order, `Y` where the pair may mix.
    matrix: Vec<String>,
}

fn cmd_catalog(config: Option<&Path>) -> CliResult<()> {
    let rig = build_rig(config)?;
    let gases: Vec<&Gas> = rig.gases().iter().collect();
    let matrix = gases
        .iter()
        .map(|row| {
            gases
                .iter()
                .map(|col| if rig.can_mix(row, col) { 'Y' } else { 'N' })
                .collect()
        })
        .collect();
    let catalog = Catalog { gases, matrix };
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}

fn cmd_check_config(config_path: &Path) -> CliResult<()> {
    println!("Checking config: {}", config_path.display());
    let rig = build_rig(Some(config_path))?;
    println!(
        "✓ Config is valid ({} gases, {} buffers, {} mixable pairs)",
        rig.gases().len(),
        rig.buffer_count(),
        rig.mixer().len()
    );
    Ok(())
}
