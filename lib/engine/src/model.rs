//! Recommendation model
//!
//! Everything computed offline from one dataset load, frozen afterwards.
//! A model is never mutated once built; a new dataset produces a new
//! model that replaces the old one as a whole.

use crate::config::EngineConfig;
use ahash::AHashMap;
use dinewise_core::{
    Error, FeatureVector, PlaceId, RestaurantRecord, Result, SimilarityMatrix, UserVisit,
};
use dinewise_features::{ClusterAssignment, FeatureEncoder};
use serde::Serialize;
use std::time::Instant;

/// Row index and rating of one stored visit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitRef {
    pub row: usize,
    pub rating: f64,
}

#[derive(Debug, Clone)]
pub struct RecommendationModel {
    restaurants: Vec<RestaurantRecord>,
    index: AHashMap<PlaceId, usize>,
    /// Visits per user, in input order
    visits: AHashMap<String, Vec<VisitRef>>,
    visit_count: usize,
    encoder: FeatureEncoder,
    features: Vec<FeatureVector>,
    similarity: SimilarityMatrix,
    clusters: ClusterAssignment,
}

/// Size figures of a built model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    pub restaurants: usize,
    pub users: usize,
    pub visits: usize,
    pub feature_dim: usize,
    pub cuisines: usize,
    pub clusters: usize,
    pub unclustered: usize,
}

impl RecommendationModel {
    /// Run the offline pipeline over one dataset.
    ///
    /// Duplicate restaurant ids keep their first row. Visits to unknown
    /// restaurants and visits with a non-finite rating are dropped.
    pub fn build(
        restaurants: Vec<RestaurantRecord>,
        visits: Vec<UserVisit>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let started = Instant::now();

        if restaurants.is_empty() {
            return Err(Error::DataIntegrity("restaurant catalog is empty".to_string()));
        }

        let total = restaurants.len();
        let mut index = AHashMap::with_capacity(total);
        let mut restaurants: Vec<RestaurantRecord> = restaurants
            .into_iter()
            .filter(|r| {
                if index.contains_key(&r.place_id) {
                    false
                } else {
                    index.insert(r.place_id.clone(), index.len());
                    true
                }
            })
            .collect();
        if restaurants.len() < total {
            tracing::warn!(
                duplicates = total - restaurants.len(),
                "Duplicate placeID rows dropped, first occurrence kept"
            );
        }

        let clusters = config.clusterer().fit(&restaurants)?;
        clusters.apply(&mut restaurants);

        let encoder = FeatureEncoder::fit(&restaurants)?;
        let features = encoder.encode_all(&restaurants);
        let similarity = SimilarityMatrix::build(&features)?;

        let mut by_user: AHashMap<String, Vec<VisitRef>> = AHashMap::new();
        let mut visit_count = 0;
        let mut dropped = 0;
        for visit in visits {
            match index.get(&visit.place_id) {
                Some(&row) if visit.rating.is_finite() => {
                    by_user.entry(visit.user_id).or_default().push(VisitRef {
                        row,
                        rating: visit.rating,
                    });
                    visit_count += 1;
                }
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            tracing::warn!(dropped, "Visits to unknown restaurants or without a rating dropped");
        }

        let model = Self {
            restaurants,
            index,
            visits: by_user,
            visit_count,
            encoder,
            features,
            similarity,
            clusters,
        };

        tracing::info!(
            restaurants = model.restaurants.len(),
            users = model.visits.len(),
            visits = model.visit_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recommendation model built"
        );

        Ok(model)
    }

    pub fn restaurants(&self) -> &[RestaurantRecord] {
        &self.restaurants
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn row_of(&self, place_id: &PlaceId) -> Option<usize> {
        self.index.get(place_id).copied()
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn clusters(&self) -> &ClusterAssignment {
        &self.clusters
    }

    pub fn user_visits(&self, user_id: &str) -> Option<&[VisitRef]> {
        self.visits.get(user_id).map(Vec::as_slice)
    }

    /// Row of the user's highest-rated visit; the earliest visit wins a tie
    pub fn anchor_row(&self, user_id: &str) -> Result<usize> {
        let visits = self
            .user_visits(user_id)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))?;

        let mut best = visits[0];
        for visit in &visits[1..] {
            if visit.rating > best.rating {
                best = *visit;
            }
        }
        Ok(best.row)
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            restaurants: self.restaurants.len(),
            users: self.visits.len(),
            visits: self.visit_count,
            feature_dim: self.encoder.dim(),
            cuisines: self.encoder.cuisine_vocabulary().len(),
            clusters: self.clusters.cluster_count(),
            unclustered: self.clusters.noise_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog, visits};

    #[test]
    fn test_build_pipeline() {
        let model = RecommendationModel::build(catalog(), visits(), &EngineConfig::default()).unwrap();

        assert_eq!(model.len(), 6);
        assert_eq!(model.features().len(), 6);
        assert_eq!(model.similarity().len(), 6);
        assert_eq!(model.features()[0].dim(), model.encoder().dim());

        let stats = model.stats();
        assert_eq!(stats.users, 2);
        assert_eq!(stats.visits, 4);
        assert_eq!(stats.cuisines, model.encoder().cuisine_vocabulary().len());
    }

    #[test]
    fn test_duplicates_and_unknown_visits_dropped() {
        let mut restaurants = catalog();
        restaurants.push(restaurants[0].clone().with_cuisine_source("Sushi"));
        let mut all_visits = visits();
        all_visits.push(UserVisit::new("U1", "ghost", 2.0));
        all_visits.push(UserVisit::new("U3", "ghost", 2.0));
        all_visits.push(UserVisit::new("U1", "r2", f64::NAN));

        let model = RecommendationModel::build(restaurants, all_visits, &EngineConfig::default()).unwrap();
        assert_eq!(model.len(), 6);
        assert!(!model.encoder().cuisine_vocabulary().contains(&"sushi".to_string()));
        assert_eq!(model.stats().visits, 4);
        assert!(model.user_visits("U3").is_none());
    }

    #[test]
    fn test_anchor_first_highest_rating() {
        let model = RecommendationModel::build(catalog(), visits(), &EngineConfig::default()).unwrap();
        // U1 rated r2 and r3 both 2, r2 first
        assert_eq!(model.anchor_row("U1").unwrap(), model.row_of(&"r2".into()).unwrap());
        assert_eq!(model.anchor_row("U2").unwrap(), model.row_of(&"r5".into()).unwrap());
        assert!(matches!(model.anchor_row("nobody"), Err(Error::UserNotFound(_))));
    }

    #[test]
    fn test_cluster_ids_written_to_records() {
        let model = RecommendationModel::build(catalog(), visits(), &EngineConfig::default()).unwrap();
        for record in model.restaurants() {
            assert_eq!(
                model.clusters().cluster_of(&record.place_id),
                Some(record.location_cluster)
            );
        }
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let err = RecommendationModel::build(Vec::new(), Vec::new(), &EngineConfig::default()).unwrap_err();
        assert!(err.is_fatal());
    }
}
