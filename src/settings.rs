// SPDX-License-Identifier: MIT
//
// Persisted user settings.
//
// Stored as TOML in the platform config directory
// (~/.config/color-gradient-tool/settings.toml on Linux). Every field has a
// default, so a partial or missing file still loads.

use std::path::{Path, PathBuf};

use cg_color::{ColorSpace, Notation, ParseError};
use cg_gradient::{GradientRequest, Mode, Role, SeedSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read or write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("stored seed color {role} ({value:?}) is not a hex color: {source}")]
    InvalidSeed {
        role: Role,
        value: String,
        source: ParseError,
    },

    #[error("could not determine the config directory")]
    NoConfigDir,
}

/// The last-used gradient and converter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub space: ColorSpace,
    pub notation: Notation,
    /// Seed colors, as hex.
    pub color_a: String,
    pub color_b: String,
    pub color_c: String,
    pub three_color: bool,
    pub step_count: usize,
    /// Last text pasted into the converter.
    pub converter_text: String,
    pub converter_from: Notation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            space: ColorSpace::Oklch,
            notation: Notation::Hex,
            color_a: "#e31b23".to_string(),
            color_b: "#00b0e6".to_string(),
            color_c: "#ffd400".to_string(),
            three_color: false,
            step_count: 7,
            converter_text: String::new(),
            converter_from: Notation::Hex,
        }
    }
}

impl Settings {
    /// `<config dir>/color-gradient-tool/settings.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("color-gradient-tool").join("settings.toml"))
    }

    /// Load settings from `path`.
    ///
    /// # Errors
    ///
    /// I/O failure or malformed TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from the default path, falling back to defaults on any failure.
    #[must_use]
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    /// Write settings to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// I/O or serialization failure.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Write settings to the default path and return it.
    ///
    /// # Errors
    ///
    /// [`SettingsError::NoConfigDir`] when the platform has no config
    /// directory, otherwise as [`save`](Self::save).
    pub fn save_to_default(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        self.save(&path)?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(path)
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.three_color {
            Mode::ThreeColor
        } else {
            Mode::TwoColor
        }
    }

    /// The gradient request these settings describe.
    ///
    /// Only the seeds the mode uses are parsed; a stale `color_c` does not
    /// matter in 2-color mode.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidSeed`] when a used seed is not valid hex.
    pub fn request(&self) -> Result<GradientRequest, SettingsError> {
        let mode = self.mode();
        let mut seeds = SeedSet::new();
        for &role in mode.required() {
            let value = match role {
                Role::A => &self.color_a,
                Role::B => &self.color_b,
                Role::C => &self.color_c,
            };
            let color = Notation::Hex
                .parse(value)
                .map_err(|source| SettingsError::InvalidSeed {
                    role,
                    value: value.clone(),
                    source,
                })?;
            seeds = seeds.with(role, color);
        }
        Ok(GradientRequest::new(seeds, mode, self.step_count)
            .with_space(self.space)
            .with_notation(self.notation))
    }
}
