//! Extract command - recover a hidden message from a WAV file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use wavsteg::Settings;

use super::{load_container, CommandExecutor};

/// Recover a message hidden with `embed`.
///
/// The message is printed to stdout. Fails if the file holds no message
/// or was re-encoded after embedding.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// WAV file containing a hidden message
    #[arg(short, long)]
    pub input: PathBuf,
}

impl ExtractCommand {
    fn recover(&self) -> Result<String> {
        let container = load_container(&self.input)?;
        let message = container
            .extract()
            .with_context(|| format!("No message recovered from {}", self.input.display()))?;

        info!(chars = message.chars().count(), "message extracted");
        Ok(message)
    }
}

impl CommandExecutor for ExtractCommand {
    fn execute(&self, _settings: &Settings) -> Result<()> {
        println!("{}", self.recover()?);
        Ok(())
    }
}
