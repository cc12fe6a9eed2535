//! Embed command - hide a message in a WAV file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{debug, info};

use wavsteg::Settings;

use super::{load_container, CommandExecutor};

/// Hide a message in the sample bits of a WAV file.
///
/// Only digits and ASCII letters can be hidden. The output keeps the
/// channel count, sample width and frame rate of the input.
#[derive(Args, Debug)]
pub struct EmbedCommand {
    /// Source WAV file (uncompressed PCM)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Message to hide (0-9, A-Z, a-z)
    #[arg(short, long)]
    pub message: String,

    /// Output WAV file; ".wav" is appended when missing
    /// Defaults to `default_output_name` from the config file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace the output file if it already exists
    #[arg(short, long)]
    pub force: bool,
}

impl CommandExecutor for EmbedCommand {
    fn execute(&self, settings: &Settings) -> Result<()> {
        if self.message.is_empty() {
            bail!("Missing input: the message to hide is empty");
        }

        let output = settings.output_path(self.output.as_deref());
        debug!(input = %self.input.display(), output = %output.display(), "resolved paths");

        if output.exists() && !(self.force || settings.overwrite) {
            bail!(
                "Output file already exists: {} (use --force to replace it)",
                output.display()
            );
        }

        let mut container = load_container(&self.input)?;
        let capacity = container.capacity();

        let used = container
            .embed(&self.message)
            .context("Failed to hide message")?;

        container
            .save(&output)
            .with_context(|| format!("Failed to write WAV file: {}", output.display()))?;

        info!(
            output = %output.display(),
            chars = self.message.chars().count(),
            bits = used,
            "message embedded"
        );

        println!("Message hidden in {}", output.display());
        println!(
            "  Used {} of {} sample bytes ({:.1}%)",
            used,
            capacity.total_bits,
            used as f64 * 100.0 / capacity.total_bits as f64
        );

        Ok(())
    }
}
