//! User settings for wavsteg.
//!
//! Stored in `~/.wavsteg/config.toml`. Every field is optional; a missing
//! file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output stem used when no output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "stego_output";

/// Extension forced onto every output file.
pub const WAV_EXTENSION: &str = "wav";

/// Errors that can occur when loading or saving settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// Settings stored in TOML format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File stem for `embed` output when `--output` is omitted.
    pub default_output_name: String,

    /// Allow `embed` to replace an existing output file.
    pub overwrite: bool,

    /// Default tracing filter (e.g. `"info"`), used when `RUST_LOG` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_output_name: DEFAULT_OUTPUT_NAME.to_string(),
            overwrite: false,
            log_level: None,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load settings from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Get the path to the settings file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Resolve where `embed` should write its output.
    ///
    /// The file name is sanitised and gets a `.wav` extension; a directory
    /// part given by the user is kept as is.
    pub fn output_path(&self, requested: Option<&Path>) -> PathBuf {
        let (dir, name) = match requested {
            Some(path) => (
                path.parent().map(Path::to_path_buf).unwrap_or_default(),
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            ),
            None => (PathBuf::new(), self.default_output_name.clone()),
        };

        let mut name = sanitize_file_name(&name);
        if name.is_empty() {
            name = sanitize_file_name(&self.default_output_name);
        }
        if name.is_empty() {
            name = DEFAULT_OUTPUT_NAME.to_string();
        }
        if !name.to_ascii_lowercase().ends_with(".wav") {
            name.push('.');
            name.push_str(WAV_EXTENSION);
        }

        dir.join(name)
    }
}

/// Reduce `name` to a safe file name.
///
/// Keeps ASCII alphanumerics, `-`, `_` and `.`; whitespace becomes `_`;
/// everything else is dropped. Leading dots and underscores are stripped.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    cleaned.trim_start_matches(['.', '_']).to_string()
}

/// Get the wavsteg config directory (`~/.wavsteg`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".wavsteg"))
        .ok_or(ConfigError::NoConfigDir)
}
