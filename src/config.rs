//! Configuration for universe generation.
//!
//! Loaded from a TOML file with a `[universe]` table (and its nested
//! `[universe.region]` table) plus an optional `[export]` table. Every key has
//! a default, and a missing file means "all defaults".

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest allowed spacing between places. Every generated point has
/// non-negative coordinates, where truncation maps each unit square to one
/// integer pair; two points farther apart than its diagonal never share one.
pub const MIN_PLACE_SPACING: f64 = std::f64::consts::SQRT_2;

/// Parameters for the dense sub-regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Number of sub-regions to place inside the outer region.
    pub count: usize,
    /// Radius of each sub-region.
    pub radius: f64,
    /// Minimum spacing between places of a sub-region.
    pub min_place_dist: f64,
    /// Longest wormhole generated inside a sub-region.
    pub max_way_length: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            count: 5,
            radius: 120.0,
            min_place_dist: 20.0,
            max_way_length: 40.0,
        }
    }
}

/// Parameters for a whole universe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    /// Radius of the outer region. Its center sits at (radius, radius) so all
    /// coordinates of the outer disc are non-negative.
    pub radius: f64,
    /// Minimum spacing between places of the outer region.
    pub min_place_dist: f64,
    /// Longest wormhole generated in the outer region.
    pub max_way_length: f64,
    /// Number of characters the name chains condition on.
    pub markov_prefix_length: usize,
    pub region: RegionConfig,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            radius: 1000.0,
            min_place_dist: 80.0,
            max_way_length: 150.0,
            markov_prefix_length: 3,
            region: RegionConfig::default(),
        }
    }
}

impl UniverseConfig {
    /// Check that the parameters describe a universe that can be generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_radius("radius", self.radius)?;
        check_spacing("min_place_dist", self.min_place_dist)?;
        check_positive("max_way_length", self.max_way_length)?;
        if self.markov_prefix_length == 0 {
            return Err(ConfigError::Invalid(
                "markov_prefix_length must be at least 1".to_string(),
            ));
        }
        if self.region.count > 0 {
            check_radius("region.radius", self.region.radius)?;
            check_spacing("region.min_place_dist", self.region.min_place_dist)?;
            check_positive("region.max_way_length", self.region.max_way_length)?;
        }
        Ok(())
    }
}

fn check_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{} must be a positive number, got {}",
            key, value
        )));
    }
    Ok(())
}

fn check_radius(key: &str, value: f64) -> Result<(), ConfigError> {
    check_positive(key, value)?;
    if value < 1.0 {
        return Err(ConfigError::Invalid(format!(
            "{} must be at least 1, got {}",
            key, value
        )));
    }
    Ok(())
}

fn check_spacing(key: &str, value: f64) -> Result<(), ConfigError> {
    check_positive(key, value)?;
    if value < MIN_PLACE_SPACING {
        return Err(ConfigError::Invalid(format!(
            "{} must be at least {:.3} so places keep distinct integer coordinates, got {}",
            key, MIN_PLACE_SPACING, value
        )));
    }
    Ok(())
}

/// Export options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Multiplier applied to place coordinates in the dot file.
    pub dot_scale: i64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { dot_scale: 20 }
    }
}

/// Top-level settings file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub universe: UniverseConfig,
    pub export: ExportConfig,
}

impl Settings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|err| ConfigError::Parse {
            path: origin.to_string(),
            message: err.to_string(),
        })?;
        settings.universe.validate()?;
        Ok(settings)
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }
}
