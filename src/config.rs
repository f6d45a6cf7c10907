// Toolbar configuration, loaded from a per-user TOML file when present.
// Missing or unparseable files fall back to the defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::surface::{FORMAT_BACKGROUND, FORMAT_BOLD, SurfaceConfig};

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "Hoverbar";
const APPLICATION: &str = "hoverbar";
const CONFIG_FILE_NAME: &str = "hoverbar.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    /// Edits closer together than this collapse into one undo step.
    pub history_coalesce_delay_ms: u64,
    /// Maximum history depth before the oldest step is evicted.
    pub history_max_depth: usize,
    /// Format attributes the toolbar may apply.
    pub allowed_formats: Vec<String>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        ToolbarConfig {
            history_coalesce_delay_ms: 1000,
            history_max_depth: 100,
            allowed_formats: vec![FORMAT_BOLD.to_string(), FORMAT_BACKGROUND.to_string()],
        }
    }
}

impl ToolbarConfig {
    /// The surface-construction view of this configuration.
    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            history_coalesce_delay_ms: self.history_coalesce_delay_ms,
            history_max_depth: self.history_max_depth,
            allowed_formats: self.allowed_formats.iter().cloned().collect(),
        }
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> Option<ToolbarConfig> {
    let contents = fs::read_to_string(path).ok()?;
    match toml::from_str::<ToolbarConfig>(&contents) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Failed to parse config file {}: {err}", path.display());
            None
        }
    }
}

pub fn save_config(path: &Path, config: &ToolbarConfig) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(config).map_err(|err| {
        io::Error::new(ErrorKind::Other, format!("toml serialization error: {err}"))
    })?;

    fs::write(path, toml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolbarConfig::default();
        assert_eq!(config.history_coalesce_delay_ms, 1000);
        assert_eq!(config.history_max_depth, 100);
        assert_eq!(config.allowed_formats, vec!["bold", "background"]);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: ToolbarConfig = toml::from_str("history_max_depth = 20").unwrap();
        assert_eq!(config.history_max_depth, 20);
        assert_eq!(config.history_coalesce_delay_ms, 1000);
        assert_eq!(config.allowed_formats, vec!["bold", "background"]);
    }

    #[test]
    fn test_round_trip() {
        let mut config = ToolbarConfig::default();
        config.history_coalesce_delay_ms = 250;
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: ToolbarConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.history_coalesce_delay_ms, 250);
        assert_eq!(parsed.history_max_depth, 100);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = ToolbarConfig::default();
        config.history_max_depth = 42;
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.history_max_depth, 42);
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_none());
    }

    #[test]
    fn test_surface_config_conversion() {
        let surface = ToolbarConfig::default().surface_config();
        assert_eq!(surface.history_coalesce_delay_ms, 1000);
        assert_eq!(surface.history_max_depth, 100);
        assert!(surface.allowed_formats.contains("bold"));
        assert!(surface.allowed_formats.contains("background"));
    }
}
