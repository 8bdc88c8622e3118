//! Soft-filter scoring
//!
//! Ranks every restaurant by its similarity to the anchor, nudged by the
//! request's preferences. Preferences never remove a candidate; they only
//! move it up or down.

use crate::config::ScoringWeights;
use crate::explain::{Adjustments, RestaurantSummary, ScoredCandidate};
use dinewise_core::{Error, RestaurantRecord, Result, Weekday};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Preferences for one recommendation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub user_id: String,

    /// Cuisine to favor; blank means no preference
    #[serde(default)]
    pub cuisine: Option<String>,

    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,

    #[serde(default = "default_min_group_score")]
    pub min_group_score: f64,

    #[serde(default)]
    pub days: Vec<Weekday>,

    /// Result count; unset uses the engine's configured default
    #[serde(default)]
    pub top_n: Option<usize>,
}

fn default_max_distance_km() -> f64 {
    10.0
}

fn default_min_group_score() -> f64 {
    0.5
}

impl RecommendRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            cuisine: None,
            max_distance_km: default_max_distance_km(),
            min_group_score: default_min_group_score(),
            days: Vec::new(),
            top_n: None,
        }
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = km;
        self
    }

    pub fn with_min_group_score(mut self, score: f64) -> Self {
        self.min_group_score = score;
        self
    }

    pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days = days.into_iter().collect();
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == Some(0) {
            return Err(Error::InvalidParameter("top_n must be at least 1".to_string()));
        }
        if self.max_distance_km.is_nan() {
            return Err(Error::InvalidParameter("max_distance_km is not a number".to_string()));
        }
        if self.min_group_score.is_nan() {
            return Err(Error::InvalidParameter("min_group_score is not a number".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Soft-filter contributions for one candidate
    pub fn adjustments(&self, record: &RestaurantRecord, request: &RecommendRequest) -> Adjustments {
        let w = &self.weights;

        let cuisine = match request.cuisine.as_deref() {
            Some(c) if record.has_cuisine(c) => w.cuisine_bonus,
            _ => 0.0,
        };

        // A restaurant without a distance is treated as out of range
        let distance = match record.distance_km() {
            Some(d) if d <= request.max_distance_km => w.distance_bonus,
            _ => -w.distance_penalty,
        };

        let group = match record.group_friendly_score() {
            Some(g) if g >= request.min_group_score => w.group_bonus,
            _ => 0.0,
        };

        let day = if record.open_days.contains_any(&request.days) {
            w.day_bonus
        } else {
            0.0
        };

        Adjustments {
            cuisine,
            distance,
            group,
            day,
        }
    }

    /// Score every restaurant against one anchor row and keep the best.
    ///
    /// `base` holds the anchor's similarity to each restaurant, aligned with
    /// `restaurants`. Equal scores keep catalog order.
    pub fn rank(
        &self,
        restaurants: &[RestaurantRecord],
        base: &[f32],
        request: &RecommendRequest,
        top_n: usize,
    ) -> Vec<ScoredCandidate> {
        let mut candidates: Vec<ScoredCandidate> = restaurants
            .iter()
            .zip(base)
            .map(|(record, &base_score)| {
                let adjustments = self.adjustments(record, request);
                ScoredCandidate {
                    restaurant: RestaurantSummary::from(record),
                    base_score,
                    score: adjustments.apply(base_score),
                    adjustments,
                }
            })
            .collect();

        candidates.sort_by_key(|c| Reverse(OrderedFloat(c.score)));
        candidates.truncate(top_n);
        candidates
    }
}
