use std::path::Path;

use crate::ai::{SearchConfig, MAX_SEARCH_DEPTH};
use crate::error::ConfigError;
use crate::session::{SessionConfig, MAX_UNDO_MEMORY};
use crate::tournament::TournamentConfig;
use crate::ui::UiConfig;

/// Settings for both binaries, one TOML table per subsystem.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub session: SessionConfig,
    pub tournament: TournamentConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Reject values the search or session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.search.depth) {
            return Err(ConfigError::Validation(format!(
                "search.depth must be in [1, {MAX_SEARCH_DEPTH}]"
            )));
        }
        if !(2..=MAX_UNDO_MEMORY).contains(&self.session.undo_memory) {
            return Err(ConfigError::Validation(format!(
                "session.undo_memory must be in [2, {MAX_UNDO_MEMORY}]"
            )));
        }
        if self.session.kings_only_draw_moves == 0 {
            return Err(ConfigError::Validation(
                "session.kings_only_draw_moves must be > 0".into(),
            ));
        }
        if self.session.max_plies == Some(0) {
            return Err(ConfigError::Validation(
                "session.max_plies must be > 0 when set".into(),
            ));
        }
        if self.tournament.games == 0 {
            return Err(ConfigError::Validation(
                "tournament.games must be > 0".into(),
            ));
        }
        if self.tournament.log_interval == 0 {
            return Err(ConfigError::Validation(
                "tournament.log_interval must be > 0".into(),
            ));
        }
        if self.tournament.max_plies == 0 {
            return Err(ConfigError::Validation(
                "tournament.max_plies must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Defaults rendered as TOML, a starting point for a config file.
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}
