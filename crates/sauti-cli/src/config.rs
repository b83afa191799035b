use std::path::Path;

use clap::ValueEnum;
use sauti_core::CodecConfig;

use crate::error::{CliError, Result};

/// Shipped stream tables.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Content stream only (25 Hz phonetic units)
    Base,
    /// Style + pitch + content streams
    Expressive,
}

impl Mode {
    pub fn config(self) -> CodecConfig {
        match self {
            Mode::Base => CodecConfig::base(),
            Mode::Expressive => CodecConfig::expressive(),
        }
    }
}

/// Resolve the stream table for a command: an explicit TOML layout file wins
/// over the mode preset.
pub fn resolve(mode: Mode, layout: Option<&Path>) -> Result<CodecConfig> {
    let Some(path) = layout else {
        return Ok(mode.config());
    };
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| CliError::InvalidInput(format!("layout {}: {e}", path.display())))
}
