//! Engine configuration
//!
//! Loaded once at startup from an optional JSON file. Every field has a
//! default, so `{}` is a valid configuration.

use dinewise_core::{Error, Result};
use dinewise_features::SpatialClusterer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Soft-filter adjustment magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Added when the requested cuisine is one of the candidate's tags
    #[serde(default = "default_bonus")]
    pub cuisine_bonus: f32,
    /// Added when the candidate is within the distance limit
    #[serde(default = "default_bonus")]
    pub distance_bonus: f32,
    /// Subtracted when the candidate is outside the limit or has no distance
    #[serde(default = "default_distance_penalty")]
    pub distance_penalty: f32,
    #[serde(default = "default_bonus")]
    pub group_bonus: f32,
    /// Added once when any requested day is open
    #[serde(default = "default_bonus")]
    pub day_bonus: f32,
}

fn default_bonus() -> f32 {
    0.1
}

fn default_distance_penalty() -> f32 {
    0.05
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cuisine_bonus: default_bonus(),
            distance_bonus: default_bonus(),
            distance_penalty: default_distance_penalty(),
            group_bonus: default_bonus(),
            day_bonus: default_bonus(),
        }
    }
}

impl ScoringWeights {
    fn validate(&self) -> Result<()> {
        let all = [
            ("cuisine_bonus", self.cuisine_bonus),
            ("distance_bonus", self.distance_bonus),
            ("distance_penalty", self.distance_penalty),
            ("group_bonus", self.group_bonus),
            ("day_bonus", self.day_bonus),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "weight '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// DBSCAN radius over standardized coordinates
    #[serde(default = "default_cluster_eps")]
    pub cluster_eps: f64,

    #[serde(default = "default_cluster_min_samples")]
    pub cluster_min_samples: usize,

    #[serde(default)]
    pub weights: ScoringWeights,

    /// Result count used when a request does not name one
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_cluster_eps() -> f64 {
    0.5
}

fn default_cluster_min_samples() -> usize {
    5
}

fn default_top_n() -> usize {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cluster_eps: default_cluster_eps(),
            cluster_min_samples: default_cluster_min_samples(),
            weights: ScoringWeights::default(),
            default_top_n: default_top_n(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON configuration file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cluster_eps > 0.0) || !self.cluster_eps.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "cluster_eps must be positive, got {}",
                self.cluster_eps
            )));
        }
        if self.cluster_min_samples == 0 {
            return Err(Error::InvalidParameter(
                "cluster_min_samples must be at least 1".to_string(),
            ));
        }
        if self.default_top_n == 0 {
            return Err(Error::InvalidParameter(
                "default_top_n must be at least 1".to_string(),
            ));
        }
        self.weights.validate()
    }

    pub fn clusterer(&self) -> SpatialClusterer {
        SpatialClusterer::new(self.cluster_eps, self.cluster_min_samples)
    }
}
