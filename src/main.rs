//! wavsteg - hide text in WAV audio
//!
//! A CLI front end over the wavsteg library. Messages are limited to
//! digits and ASCII letters and live in the lowest bit of each sample byte.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CapacityCommand, CommandExecutor, EmbedCommand, ExtractCommand};
use wavsteg::Settings;

/// wavsteg - hide text in WAV audio
///
/// Hides a short alphanumeric message in the least significant bits of an
/// uncompressed PCM WAV file. Any re-encoding of the output destroys it.
#[derive(Parser)]
#[command(name = "wavsteg")]
#[command(version)]
#[command(about = "Hide alphanumeric messages in the sample bits of WAV files")]
#[command(long_about = None)]
struct Cli {
    /// Settings file (default: ~/.wavsteg/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in a WAV file
    Embed(EmbedCommand),

    /// Recover a hidden message from a WAV file
    Extract(ExtractCommand),

    /// Show how much text a WAV file can hold
    Capacity(CapacityCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Embed(cmd) => cmd,
            Commands::Extract(cmd) => cmd,
            Commands::Capacity(cmd) => cmd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load settings")?;

    init_tracing(cli.verbose, settings.log_level.as_deref());

    cli.command.executor().execute(&settings)
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise `--verbose` means debug, then the configured
/// level, then warnings only.
fn init_tracing(verbose: bool, configured: Option<&str>) {
    let fallback = if verbose {
        "debug"
    } else {
        configured.unwrap_or("warn")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
