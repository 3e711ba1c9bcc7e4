use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};

use super::{BuildConfig, GameplayConfig};
use crate::utils::error::{EngineError, Result};

pub const CONFIG_FILE_NAME: &str = "blockfield.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gameplay: GameplayConfig,
    pub build: BuildConfig,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Loads the config at `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_or_create_at(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let default_config = Self::default();
            default_config
                .save(path)
                .context("Failed to write default config")?;
            info!("Wrote default config to {}", path.display());
            return Ok(default_config);
        }

        let config = Self::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Same as [`load_or_create_at`](Self::load_or_create_at), using the
    /// platform config directory.
    pub fn load_or_create() -> anyhow::Result<Self> {
        let path = default_config_path()?;
        Self::load_or_create_at(&path)
    }

    pub fn validate(&self) -> Result<()> {
        let g = &self.gameplay;
        non_negative("gameplay.move_speed", g.move_speed)?;
        non_negative("gameplay.gravity", g.gravity)?;
        non_negative("gameplay.jump_velocity", g.jump_velocity)?;
        non_negative("gameplay.damping", g.damping)?;
        non_negative("gameplay.model_height_offset", g.model_height_offset)?;
        positive("gameplay.max_frame_dt", g.max_frame_dt)?;
        finite("gameplay.ground_height", g.ground_height)?;
        finite("gameplay.mouse_sensitivity", g.mouse_sensitivity)?;
        if !g.spawn_position.is_finite() {
            return Err(invalid("gameplay.spawn_position must be finite"));
        }

        let b = &self.build;
        positive("build.block_size", b.block_size)?;
        positive("build.proximity_threshold", b.proximity_threshold)?;
        non_negative("build.placement_distance", b.placement_distance)?;
        if b.initial_blocks.iter().any(|p| !p.is_finite()) {
            return Err(invalid("build.initial_blocks must be finite"));
        }
        Ok(())
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "MetroManDevTeam", "blockfield")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn invalid(msg: &str) -> EngineError {
    EngineError::InvalidConfig(msg.to_string())
}

fn finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!("{name} must be finite")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(EngineError::InvalidConfig(format!("{name} must not be negative")));
    }
    Ok(())
}

fn positive(name: &str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(EngineError::InvalidConfig(format!("{name} must be positive")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_defaults_match_demo_tuning() {
        let config = EngineConfig::default();
        assert_eq!(config.gameplay.move_speed, 10.0);
        assert_eq!(config.gameplay.gravity, 30.0);
        assert_eq!(config.gameplay.jump_velocity, 15.0);
        assert_eq!(config.gameplay.ground_height, 2.0);
        assert_eq!(config.gameplay.damping, 10.0);
        assert_eq!(config.build.block_size, 2.0);
        assert_eq!(config.build.placement_distance, 5.0);
        assert_eq!(config.build.proximity_threshold, 1.0);
        assert!(!config.build.snap_horizontal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = EngineConfig::default();
        config.gameplay.gravity = 12.5;
        config.build.snap_horizontal = true;
        config.build.initial_blocks = vec![Vec3::new(0.0, 1.0, -5.0)];
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[build]\nblock_size = 1.0\n").unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded.build.block_size, 1.0);
        assert_eq!(loaded.build.placement_distance, 5.0);
        assert_eq!(loaded.gameplay, GameplayConfig::default());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let created = EngineConfig::load_or_create_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, EngineConfig::default());

        let reloaded = EngineConfig::load_or_create_at(&path).unwrap();
        assert_eq!(reloaded, created);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = EngineConfig::default();
        config.build.block_size = 0.0;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let mut config = EngineConfig::default();
        config.gameplay.max_frame_dt = f32::NAN;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let mut config = EngineConfig::default();
        config.gameplay.gravity = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[gameplay\nmove_speed = ").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(EngineError::ConfigParse(_))
        ));
    }
}
