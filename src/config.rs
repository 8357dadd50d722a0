// src/config.rs v3
//! Configuration management with a JSON file in the user's config directory

use crate::error::{Result, ViewerError};
use crate::graticule::Metapole;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// File the antenna form appends records to
    pub antenna_file: PathBuf,
    pub keep_aspect: bool,
    pub show_grid: bool,
    pub metapole: Metapole,
    /// Where the static panel draws its image, logical pixels
    pub panel_offset: [f32; 2],
    pub window_size: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            antenna_file: Self::default_antenna_file(),
            keep_aspect: true,
            show_grid: false,
            metapole: Metapole::default(),
            panel_offset: [50.0, 50.0],
            window_size: [1024.0, 768.0],
        }
    }
}

impl ViewerConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path()?;
        Self::load_from(&path)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::get_config_path()?;
        self.save_to(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ViewerError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| ViewerError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| ViewerError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("geo-viewer").join("config.json"))
    }

    fn default_antenna_file() -> PathBuf {
        match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("geo-viewer")
                .join("antennas.txt"),
            Err(_) => PathBuf::from("antennas.txt"),
        }
    }

    /// Update graticule settings
    pub fn update_grid(&mut self, show_grid: bool, metapole: Metapole) {
        self.show_grid = show_grid;
        self.metapole = metapole;
    }

    /// Update antenna log location
    pub fn update_antenna_file(&mut self, path: PathBuf) {
        self.antenna_file = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert!(config.keep_aspect);
        assert!(!config.show_grid);
        assert!(config.metapole.is_true_pole());
        assert_eq!(config.panel_offset, [50.0, 50.0]);
        assert!(config.antenna_file.ends_with("antennas.txt"));
    }

    #[test]
    fn test_update_grid() {
        let mut config = ViewerConfig::default();
        config.update_grid(true, Metapole::new(10.0, 20.0, 5.0));
        assert!(config.show_grid);
        assert_eq!(config.metapole, Metapole::new(10.0, 20.0, 5.0));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("config.json");

        let mut config = ViewerConfig::default();
        config.update_antenna_file(PathBuf::from("/tmp/antennas.txt"));
        config.keep_aspect = false;
        config.save_to(&path).unwrap();

        let loaded = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(loaded.antenna_file, PathBuf::from("/tmp/antennas.txt"));
        assert!(!loaded.keep_aspect);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "show_grid": true, "metapole": { "latitude": 0.0, "longitude": 90.0 } }"#).unwrap();

        let loaded = ViewerConfig::load_from(&path).unwrap();
        assert!(loaded.show_grid);
        assert!(loaded.keep_aspect);
        assert_eq!(loaded.metapole, Metapole::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ViewerConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.keep_aspect);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = ViewerConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ViewerError::Json(_)), "{:?}", err);
        assert!(err.to_string().starts_with("JSON error"));
    }
}
