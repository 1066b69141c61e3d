//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mansion/mansion.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `MANSION_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Mode;

/// Unified configuration for mansion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Session flavour (default: investigate)
    pub mode: Mode,
    /// Map file to play instead of the built-in mansion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_file: Option<PathBuf>,
    /// Name the room behind each passage when listing options
    pub show_neighbors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Investigate,
            map_file: None,
            show_neighbors: true,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub mode: Option<Mode>,
    pub map_file: Option<PathBuf>,
    pub show_neighbors: Option<bool>,
}

/// Get the XDG config directory for mansion.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mansion").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mansion.toml"))
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

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.map_file = self.map_file.as_deref().map(expand_path);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            mode: overlay.mode.unwrap_or(self.mode),
            map_file: overlay.map_file.clone().or_else(|| self.map_file.clone()),
            show_neighbors: overlay.show_neighbors.unwrap_or(self.show_neighbors),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional local config file (from `--config`); must exist if given
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local)
    }

    /// Load settings from explicit global and local config locations.
    ///
    /// A missing global file is skipped; a missing local file is an error,
    /// since it was asked for by name.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(local_path) = local {
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply MANSION_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MANSION")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get_string("mode"), "mode")? {
            settings.mode = val
                .parse::<Mode>()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Some(val) = env_value(config.get_string("map_file"), "map_file")? {
            settings.map_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env_value(config.get_bool("show_neighbors"), "show_neighbors")? {
            settings.show_neighbors = val;
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
        r#"# mansion configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/mansion/mansion.toml
#   Local:  file passed with --config
#   Env:    MANSION_* environment variables (e.g. MANSION_MODE=explore)

# Session flavour:
#   "investigate" collects clues and ends when you stop
#   "explore"     ignores clues and ends in a room without exits
# mode = "investigate"

# Map file to play instead of the built-in mansion
# map_file = "~/maps/manor.toml"

# Name the room behind each passage when listing options
# show_neighbors = true
"#
        .to_string()
    }
}

/// An unset variable is `None`; a set but unparsable one is an error.
fn env_value<T>(value: Result<T, ConfigError>, key: &str) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("MANSION_{}: {e}", key.to_ascii_uppercase()),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
