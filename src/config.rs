//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/flocky/flocky.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `FLOCKY_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for flocky.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Marker in front of every bullet
    pub bullet: String,
    /// Marker for a collapsed bullet that hides children
    pub collapsed_bullet: String,
    /// Text shown for an empty bullet
    pub placeholder: String,
    /// Append bullet ids to rendered lines
    pub show_ids: bool,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bullet: "•".into(),
            collapsed_bullet: "▸".into(),
            placeholder: "Type your note here...".into(),
            show_ids: false,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub bullet: Option<String>,
    pub collapsed_bullet: Option<String>,
    pub placeholder: Option<String>,
    pub show_ids: Option<bool>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for flocky.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flocky").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("flocky.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            bullet: overlay.bullet.clone().unwrap_or_else(|| self.bullet.clone()),
            collapsed_bullet: overlay
                .collapsed_bullet
                .clone()
                .unwrap_or_else(|| self.collapsed_bullet.clone()),
            placeholder: overlay
                .placeholder
                .clone()
                .unwrap_or_else(|| self.placeholder.clone()),
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file from the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = explicit {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply FLOCKY_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("FLOCKY").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("bullet") {
            settings.bullet = val;
        }
        if let Ok(val) = config.get_string("collapsed_bullet") {
            settings.collapsed_bullet = val;
        }
        if let Ok(val) = config.get_string("placeholder") {
            settings.placeholder = val;
        }
        if let Ok(val) = config.get_bool("show_ids") {
            settings.show_ids = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# flocky configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/flocky/flocky.toml
#   Flag:   flocky --config <file>
#   Env:    FLOCKY_* environment variables (e.g. FLOCKY_SHOW_IDS=true)

# Marker in front of every bullet
# bullet = "•"

# Marker for a collapsed bullet with hidden children
# collapsed_bullet = "▸"

# Text shown for an empty bullet
# placeholder = "Type your note here..."

# Append bullet ids to rendered lines
# show_ids = false

# Colored terminal output
# color = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
