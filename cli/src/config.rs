// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI configuration stored as TOML in the platform config directory

use anyhow::{Context, Result};
use directories::ProjectDirs;
use gorules_core::{
    ConsecutivePasses, FinishPolicy, NeverFinish, NoLegalMoves, Ruleset, SuicideRule,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_board_size")]
    pub board_size: u8,
    #[serde(default)]
    pub suicide: SuicideRule,
    #[serde(default)]
    pub finish: FinishMode,
    #[serde(default = "default_pass_limit")]
    pub pass_limit: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// End-of-game policy selectable from config or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FinishMode {
    /// Play until someone resigns
    Never,
    /// End after `pass_limit` consecutive passes
    #[default]
    Passes,
    /// End when the side to move has no legal placement
    NoLegalMoves,
}

fn default_board_size() -> u8 {
    9
}

fn default_pass_limit() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            suicide: SuicideRule::default(),
            finish: FinishMode::default(),
            pass_limit: default_pass_limit(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Rule variation for new games
    pub fn ruleset(&self) -> Ruleset {
        Ruleset {
            suicide: self.suicide,
        }
    }

    /// Finish policy for new sessions
    pub fn finish_policy(&self) -> Box<dyn FinishPolicy> {
        match self.finish {
            FinishMode::Never => Box::new(NeverFinish),
            FinishMode::Passes => Box::new(ConsecutivePasses(self.pass_limit.max(1))),
            FinishMode::NoLegalMoves => Box::new(NoLegalMoves),
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "gorules", "gorules")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Config read (or created) by [`load_config`], with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: CliConfig,
    pub path: PathBuf,
    /// The file was missing and has just been written with defaults
    pub created: bool,
}

/// Load the config at `path`, or at the default location when `None`.
///
/// A missing file is created with default contents. Nothing is logged here;
/// the caller reports the outcome once logging is up.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path().context("Failed to determine config path")?,
    };

    if !config_path.exists() {
        let default_config = CliConfig::default();
        save_config(&default_config, &config_path)?;
        return Ok(LoadedConfig {
            config: default_config,
            path: config_path,
            created: true,
        });
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config = toml::from_str::<CliConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(LoadedConfig {
        config,
        path: config_path,
        created: false,
    })
}

pub fn save_config(config: &CliConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.board_size, 9);
        assert_eq!(config.suicide, SuicideRule::Forbidden);
        assert_eq!(config.finish, FinishMode::Passes);
        assert_eq!(config.pass_limit, 2);
    }

    #[test]
    fn test_config_serialization() {
        let config = CliConfig {
            suicide: SuicideRule::Allowed,
            finish: FinishMode::NoLegalMoves,
            ..CliConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("suicide = \"allowed\""));
        assert!(toml_str.contains("finish = \"no-legal-moves\""));

        let deserialized: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: CliConfig = toml::from_str("board_size = 13\n").unwrap();
        assert_eq!(config.board_size, 13);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.ruleset(), Ruleset::default());
    }

    #[test]
    fn test_load_creates_missing_file() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let loaded = load_config(Some(&config_path))?;
        assert!(loaded.created);
        assert_eq!(loaded.path, config_path);
        assert_eq!(loaded.config, CliConfig::default());
        assert!(config_path.exists());

        let mut changed = loaded.config;
        changed.board_size = 19;
        save_config(&changed, &config_path)?;

        let reloaded = load_config(Some(&config_path))?;
        assert!(!reloaded.created);
        assert_eq!(reloaded.config.board_size, 19);
        Ok(())
    }
}
