//! Capacity command - report how much text a WAV file can hold.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use wavsteg::{required_bits, Settings};

use super::{load_container, CommandExecutor};

/// Show format parameters and message capacity of a WAV file.
///
/// With --message, also checks whether that message would fit.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// WAV file to inspect
    #[arg(short, long)]
    pub input: PathBuf,

    /// Message to check against the capacity
    #[arg(short, long)]
    pub message: Option<String>,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self, _settings: &Settings) -> Result<()> {
        let container = load_container(&self.input)?;
        let params = container.params();
        let capacity = container.capacity();

        println!("File: {}", self.input.display());
        println!("  Channels:     {}", params.channels);
        println!("  Sample width: {} bytes", params.sample_width);
        println!("  Frame rate:   {} Hz", params.frame_rate);
        println!("  Duration:     {:.2} s", container.duration_secs());
        println!();
        println!("Capacity: {} bits", capacity.total_bits);
        println!("  Letters only: up to {} characters", capacity.min_chars());
        println!("  Digits only:  up to {} characters", capacity.max_chars());

        if let Some(message) = &self.message {
            let needed = required_bits(message).context("Message cannot be hidden")?;
            let verdict = if needed <= capacity.total_bits {
                "fits"
            } else {
                "does NOT fit"
            };
            println!();
            println!(
                "Message ({} chars) needs {} bits: {}",
                message.chars().count(),
                needed,
                verdict
            );
        }

        Ok(())
    }
}
