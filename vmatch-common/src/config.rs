//! Configuration loading
//!
//! Bootstrap configuration is a single TOML file. Every field has a built-in
//! default, so a missing file degrades to defaults with a warning.
//!
//! # Config file resolution priority
//!
//! 1. Command-line argument (`--config`)
//! 2. Environment variable (`VMATCH_CONFIG`)
//! 3. Platform config directory (`~/.config/vmatch/config.toml` on Linux)
//! 4. Built-in defaults (no file)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VMATCH_CONFIG";

/// Lowest acceptance floor allowed; matches the low-confidence threshold so
/// that every accepted match carries a confidence other than none
pub const MIN_ACCEPTANCE_FLOOR: f64 = 0.2;

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins when set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Relative importance of the four folded dimensions
///
/// Only the ratios matter: weights are renormalized over the dimensions that
/// have data for a given candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    #[serde(default = "default_spatial_weight")]
    pub spatial: f64,
    #[serde(default = "default_tectonic_weight")]
    pub tectonic: f64,
    #[serde(default = "default_temporal_weight")]
    pub temporal: f64,
    #[serde(default = "default_petrological_weight")]
    pub petrological: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            spatial: default_spatial_weight(),
            tectonic: default_tectonic_weight(),
            temporal: default_temporal_weight(),
            petrological: default_petrological_weight(),
        }
    }
}

fn default_spatial_weight() -> f64 {
    0.35
}

fn default_tectonic_weight() -> f64 {
    0.15
}

fn default_temporal_weight() -> f64 {
    0.25
}

fn default_petrological_weight() -> f64 {
    0.25
}

impl DimensionWeights {
    pub fn as_array(&self) -> [f64; 4] {
        [self.spatial, self.tectonic, self.temporal, self.petrological]
    }
}

/// Matching engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Candidate search radius in kilometres
    #[serde(default = "default_search_radius_km")]
    pub search_radius_km: f64,

    /// Minimum final score for a candidate to be accepted
    #[serde(default = "default_acceptance_floor")]
    pub acceptance_floor: f64,

    /// Maximum final-score gap between the top two candidates that still
    /// raises the competing-candidates flag
    #[serde(default = "default_competing_epsilon")]
    pub competing_epsilon: f64,

    #[serde(default)]
    pub weights: DimensionWeights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            search_radius_km: default_search_radius_km(),
            acceptance_floor: default_acceptance_floor(),
            competing_epsilon: default_competing_epsilon(),
            weights: DimensionWeights::default(),
        }
    }
}

fn default_search_radius_km() -> f64 {
    80.0
}

fn default_acceptance_floor() -> f64 {
    MIN_ACCEPTANCE_FLOOR
}

fn default_competing_epsilon() -> f64 {
    0.05
}

impl MatchingConfig {
    /// Validate tunables
    ///
    /// # Errors
    /// Returns `Error::Config` for a non-positive radius, negative or
    /// all-zero weights, or an acceptance floor outside
    /// [`MIN_ACCEPTANCE_FLOOR`, 1.0].
    pub fn validate(&self) -> Result<()> {
        if !self.search_radius_km.is_finite() || self.search_radius_km <= 0.0 {
            return Err(Error::Config(format!(
                "search_radius_km must be positive, got {}",
                self.search_radius_km
            )));
        }
        if !(MIN_ACCEPTANCE_FLOOR..=1.0).contains(&self.acceptance_floor) {
            return Err(Error::Config(format!(
                "acceptance_floor must be within [{}, 1.0], got {}",
                MIN_ACCEPTANCE_FLOOR, self.acceptance_floor
            )));
        }
        if !self.competing_epsilon.is_finite() || self.competing_epsilon < 0.0 {
            return Err(Error::Config(format!(
                "competing_epsilon must be non-negative, got {}",
                self.competing_epsilon
            )));
        }
        let weights = self.weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::Config(format!(
                "dimension weights must be non-negative: {:?}",
                self.weights
            )));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(Error::Config("dimension weights sum to zero".to_string()));
        }
        Ok(())
    }
}

/// Batch runner settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads; defaults to one per available CPU
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Resolve which config file to read, if any
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    dirs::config_dir()
        .map(|d| d.join("vmatch").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load configuration from an optional file path
///
/// A missing file logs a warning and yields defaults. A file that exists but
/// does not parse, or whose matching section is invalid, is an error.
pub fn load_config(path: Option<&Path>) -> Result<TomlConfig> {
    let config = match path {
        None => {
            info!("No config file found, using built-in defaults");
            TomlConfig::default()
        }
        Some(path) if !path.exists() => {
            warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            TomlConfig::default()
        }
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
            let config = parse_config(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
            info!("Configuration loaded from {}", path.display());
            config
        }
    };

    config.matching.validate()?;
    Ok(config)
}

/// Parse TOML text into a config
pub fn parse_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}
