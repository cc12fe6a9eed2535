//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.
//! All of them are thin adapters over [`wavsteg::WavContainer`].

mod capacity;
mod embed;
mod extract;

pub use capacity::CapacityCommand;
pub use embed::EmbedCommand;
pub use extract::ExtractCommand;

use std::path::Path;

use anyhow::{Context, Result};

use wavsteg::{Settings, WavContainer};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self, settings: &Settings) -> Result<()>;
}

/// Loads a WAV file, attaching the path to any error.
fn load_container(path: &Path) -> Result<WavContainer> {
    WavContainer::from_file(path)
        .with_context(|| format!("Failed to read WAV file: {}", path.display()))
}
