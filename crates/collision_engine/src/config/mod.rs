//! Configuration system
//!
//! Movement tuning values that vary per deployment (step heights, probe
//! ranges) live here and can round-trip through TOML or RON files. The
//! numerical tolerances in `physics` are deliberately NOT configurable:
//! they are behavior policy, not tuning.

pub use serde::{Deserialize, Serialize};

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

/// Movement-resolution tuning.
///
/// Defaults reproduce the reference behavior the shipped terrain data was
/// balanced against; changing them reshapes climbing and probing behavior
/// everywhere, so treat edits as content changes, not refactors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Length of one resolver sub-step
    pub sub_step_length: f32,
    /// Base step-height ceiling for climbing
    pub step_height: f32,
    /// A sub-step displacing less than this ends the resolution early
    pub min_step_displacement: f32,
    /// Downward probe range used by floor snapping
    pub floor_probe_range: f32,
    /// Search radius around a ray origin for local-area raycasts
    pub local_ray_radius: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            sub_step_length: 0.05,
            step_height: 0.4,
            min_step_displacement: 0.001,
            floor_probe_range: 40.0,
            local_ray_radius: 10.0,
        }
    }
}

impl Config for ResolverConfig {}
