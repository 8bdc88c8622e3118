//! Result rows and score explanations
//!
//! Every ranked row carries its base similarity and the soft-filter
//! adjustments that moved it, so callers can see why a restaurant ranked
//! where it did.

use dinewise_core::{PlaceId, RestaurantRecord};
use serde::Serialize;

/// Display fields of one restaurant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantSummary {
    pub place_id: PlaceId,
    pub name: String,
    pub primary_cuisine: Option<String>,
    pub distance_km: Option<f64>,
    pub group_friendly_score: Option<f64>,
    pub avg_rating: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_cluster: i32,
}

impl From<&RestaurantRecord> for RestaurantSummary {
    fn from(record: &RestaurantRecord) -> Self {
        Self {
            place_id: record.place_id.clone(),
            name: record.name.clone(),
            primary_cuisine: record.primary_cuisine.clone(),
            distance_km: record.distance_km(),
            group_friendly_score: record.group_friendly_score(),
            avg_rating: record.avg_rating(),
            latitude: record.latitude,
            longitude: record.longitude,
            location_cluster: record.location_cluster,
        }
    }
}

/// Signed contribution of each soft filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Adjustments {
    pub cuisine: f32,
    pub distance: f32,
    pub group: f32,
    pub day: f32,
}

impl Adjustments {
    /// Apply the adjustments to a base score in their fixed order
    pub fn apply(&self, base: f32) -> f32 {
        let mut score = base;
        score += self.cuisine;
        score += self.distance;
        score += self.group;
        score += self.day;
        score
    }

    /// Name of the adjustment with the largest absolute effect
    pub fn dominant(&self) -> Option<&'static str> {
        [
            ("cuisine", self.cuisine),
            ("distance", self.distance),
            ("group", self.group),
            ("day", self.day),
        ]
        .into_iter()
        .filter(|(_, v)| *v != 0.0)
        .fold(None, |best: Option<(&'static str, f32)>, (name, v)| match best {
            Some((_, b)) if b.abs() >= v.abs() => best,
            _ => Some((name, v)),
        })
        .map(|(name, _)| name)
    }
}

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub restaurant: RestaurantSummary,
    /// Cosine similarity to the anchor
    pub base_score: f32,
    /// Base score after adjustments; the ranking key
    pub score: f32,
    pub adjustments: Adjustments,
}

/// Summary over one ranked result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStats {
    pub candidates_count: usize,
    pub results_count: usize,
    pub best_score: f32,
    pub avg_score: f32,
    /// Soft filter that moved the top result the most
    pub top_adjustment: Option<&'static str>,
}

impl ScoreStats {
    pub fn compute(results: &[ScoredCandidate], candidates_count: usize) -> Self {
        let best_score = results.first().map(|r| r.score).unwrap_or(0.0);
        let avg_score = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.score).sum::<f32>() / results.len() as f32
        };

        Self {
            candidates_count,
            results_count: results.len(),
            best_score,
            avg_score,
            top_adjustment: results.first().and_then(|r| r.adjustments.dominant()),
        }
    }
}

/// Ranked list plus the anchor it was ranked against
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub user_id: String,
    pub anchor: PlaceId,
    pub result: Vec<ScoredCandidate>,
    pub stats: ScoreStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinewise_core::NumericAttribute;

    fn candidate(score: f32, adjustments: Adjustments) -> ScoredCandidate {
        let record = RestaurantRecord::new("1", "Cafe").with_numeric(NumericAttribute::AvgRating, 4.0);
        ScoredCandidate {
            restaurant: RestaurantSummary::from(&record),
            base_score: score,
            score: adjustments.apply(score),
            adjustments,
        }
    }

    #[test]
    fn test_apply_and_dominant() {
        let adj = Adjustments {
            cuisine: 0.1,
            distance: -0.05,
            group: 0.0,
            day: 0.2,
        };
        assert!((adj.apply(0.5) - 0.75).abs() < 1e-6);
        assert_eq!(adj.dominant(), Some("day"));
        assert_eq!(Adjustments::default().dominant(), None);
    }

    #[test]
    fn test_stats() {
        let results = vec![
            candidate(0.9, Adjustments { distance: -0.05, ..Default::default() }),
            candidate(0.5, Adjustments::default()),
        ];
        let stats = ScoreStats::compute(&results, 10);
        assert_eq!(stats.candidates_count, 10);
        assert_eq!(stats.results_count, 2);
        assert!((stats.best_score - 0.85).abs() < 1e-6);
        assert!((stats.avg_score - 0.675).abs() < 1e-6);
        assert_eq!(stats.top_adjustment, Some("distance"));

        let empty = ScoreStats::compute(&[], 0);
        assert_eq!(empty.best_score, 0.0);
        assert_eq!(empty.top_adjustment, None);
    }

    #[test]
    fn test_candidate_serializes_flat() {
        let value = serde_json::to_value(candidate(0.4, Adjustments::default())).unwrap();
        assert_eq!(value["place_id"], "1");
        assert_eq!(value["avg_rating"], 4.0);
        assert!(value.get("restaurant").is_none());
        assert_eq!(value["adjustments"]["cuisine"], 0.0);
    }
}
