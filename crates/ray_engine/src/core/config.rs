//! # Configuration System
//!
//! Serializable settings for the engine and the Vulkan renderer.
//! Supports multiple config file formats (TOML, RON) behind a common
//! trait, with typed structs, validation and sensible defaults.

use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
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

/// # Engine Configuration
///
/// Core engine behavior configuration that affects the whole process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Default log level filter (overridable via `RUST_LOG`)
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Vulkan Renderer Configuration
///
/// Application metadata reported to the driver at instance creation,
/// plus the validation-layer toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Application name for Vulkan instance creation
    pub application_name: String,
    /// Application version (major, minor, patch)
    pub application_version: (u32, u32, u32),
    /// Whether to enable Vulkan validation layers
    pub enable_validation: Option<bool>,
}

impl RendererConfig {
    /// Create a new renderer configuration
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            application_name: app_name.into(),
            application_version: (1, 0, 0),
            enable_validation: None, // Auto-detect based on build type
        }
    }

    /// Set application version
    pub fn with_version(mut self, major: u32, minor: u32, patch: u32) -> Self {
        self.application_version = (major, minor, patch);
        self
    }

    /// Enable or disable validation layers
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.enable_validation = Some(enabled);
        self
    }

    /// Effective validation setting: the explicit toggle when present,
    /// otherwise on for debug builds only.
    pub fn validation_enabled(&self) -> bool {
        self.enable_validation.unwrap_or(cfg!(debug_assertions))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.application_name.is_empty() {
            return Err("Application name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new("RealTimeRayTracer")
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration applications should use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Rendering system configuration
    pub renderer: RendererConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            engine: EngineConfig::default(),
            renderer: RendererConfig::new(app_name),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.renderer.validate()
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::new("RealTimeRayTracer")
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.renderer.application_name, "RealTimeRayTracer");
        assert_eq!(config.engine.log_level, "info");
    }

    #[test]
    fn test_empty_application_name_rejected() {
        let mut config = ApplicationConfig::default();
        config.renderer.application_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_toggle_overrides_build_default() {
        let renderer = RendererConfig::default().with_validation(false);
        assert!(!renderer.validation_enabled());

        let renderer = renderer.with_validation(true);
        assert!(renderer.validation_enabled());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_src = r#"
            [engine]
            log_level = "debug"

            [renderer]
            application_name = "RealTimeRayTracer"
            application_version = [0, 2, 1]
            enable_validation = false
        "#;

        let config: ApplicationConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.engine.log_level, "debug");
        assert_eq!(config.renderer.application_version, (0, 2, 1));
        assert_eq!(config.renderer.enable_validation, Some(false));

        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: ApplicationConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(
            reparsed.renderer.application_name,
            config.renderer.application_name
        );
        assert_eq!(reparsed.renderer.enable_validation, Some(false));
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = std::env::temp_dir().join("ray_engine_config_test.ron");
        let path = path.to_string_lossy().into_owned();

        let mut config = ApplicationConfig::new("ConfigTest");
        config.renderer.application_version = (0, 3, 0);
        config.save_to_file(&path).unwrap();
        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.renderer.application_name, "ConfigTest");
        assert_eq!(loaded.renderer.application_version, (0, 3, 0));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let config = ApplicationConfig::default();
        let result = config.save_to_file("settings.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
