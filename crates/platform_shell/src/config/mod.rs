//! Configuration system

use std::path::{Path, PathBuf};

pub use serde::{Deserialize, Serialize};

use crate::platform::options::WindowOptions;

/// Configuration trait
///
/// File format is picked by extension: `.toml` for hand-edited
/// configs, `.ron` when the file mirrors Rust types closely. Both
/// load and save go through the same dispatch, so a config round
/// trips through either format.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level configuration for a shell application
///
/// One window block plus where traces go. Missing fields fall back to
/// the defaults, so a config file only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The main window
    pub window: WindowOptions,
    /// Where recorded traces are written and replayed from
    pub trace_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowOptions::default(),
            trace_path: PathBuf::from("trace.ron"),
        }
    }
}

impl AppConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.window.validate()?;
        if self.trace_path.as_os_str().is_empty() {
            return Err("trace_path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn round_trips_through_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.window.title = "round trip".to_string();
        config.trace_path = PathBuf::from("takes/session.ron");

        for name in ["app.toml", "app.ron"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            let loaded = AppConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config, "via {name}");
        }
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        std::fs::write(&path, "[window]\ntitle = \"demo\"\n").unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.window.title, "demo");
        assert_eq!(loaded.window.size, crate::platform::geometry::Size::default());
        assert_eq!(loaded.trace_path, PathBuf::from("trace.ron"));
    }

    #[test]
    fn unknown_extensions_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.yaml");

        let err = AppConfig::default().save_to_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));

        std::fs::write(&path, "anything").unwrap();
        let err = AppConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
