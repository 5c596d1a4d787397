//! # Magnitude Display Configuration
//!
//! Loaded once at startup from `data/schemas/economy/magnitude.toml`:
//!
//! ```toml
//! style = "suffix"
//! strip_fraction = true
//! sqrt_mode = "truncating"
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::arithmetic::SqrtMode;
use crate::error::{MagnitudeError, MagnitudeResult};
use crate::magnitude::BigMagnitude;
use crate::mantissa::Mantissa;

/// Which text encoding [`BigMagnitude::format`] produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// Every digit: `150000000000000000000`.
    Plain,
    /// Scientific: `1.5E+20`.
    Notation,
    /// Idle-game suffix: `150B`.
    #[default]
    Suffix,
    /// Lossless save-file form: `15000000000000E+7`.
    Compact,
}

/// Display and arithmetic preferences for magnitudes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MagnitudeConfig {
    /// Encoding used by [`BigMagnitude::format`].
    pub style: FormatStyle,
    /// Drop fractions of short values in the plain style.
    pub strip_fraction: bool,
    /// Exponent rule used by [`BigMagnitude::sqrt_configured`].
    pub sqrt_mode: SqrtMode,
}

impl Default for MagnitudeConfig {
    fn default() -> Self {
        Self {
            style: FormatStyle::Suffix,
            strip_fraction: true,
            sqrt_mode: SqrtMode::Truncating,
        }
    }
}

impl MagnitudeConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::InvalidConfig`] on malformed TOML, unknown
    /// keys or unknown enum values.
    pub fn from_toml_str(text: &str) -> MagnitudeResult<Self> {
        toml::from_str(text).map_err(|e| MagnitudeError::InvalidConfig(e.to_string()))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::InvalidConfig`] if the file cannot be read
    /// or does not parse.
    pub fn from_toml_file(path: impl AsRef<Path>) -> MagnitudeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MagnitudeError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "magnitude config loaded");
        Ok(config)
    }
}

impl<M: Mantissa> BigMagnitude<M> {
    /// Renders in the configured style.
    #[must_use]
    pub fn format(&self, config: &MagnitudeConfig) -> String {
        match config.style {
            FormatStyle::Plain => self.to_plain_string(config.strip_fraction),
            FormatStyle::Notation => self.to_notation_string(),
            FormatStyle::Suffix => self.to_suffix_string(),
            FormatStyle::Compact => self.to_compact_string(),
        }
    }

    /// Square root using the configured exponent rule.
    #[inline]
    #[must_use]
    pub fn sqrt_configured(self, config: &MagnitudeConfig) -> Self {
        self.sqrt_with(config.sqrt_mode)
    }
}
