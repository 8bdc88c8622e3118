//! Request-time facade
//!
//! Holds the live model behind a lock that is only taken long enough to
//! clone an `Arc`. Scoring runs on the cloned snapshot, so a reload never
//! blocks or disturbs a request already in flight.

use crate::browse::{browse, BrowseFilter};
use crate::config::EngineConfig;
use crate::explain::{RecommendationResponse, RestaurantSummary, ScoreStats, ScoredCandidate};
use crate::model::{ModelStats, RecommendationModel};
use crate::scoring::{RecommendRequest, Scorer};
use dinewise_core::{Error, PlaceId, RestaurantRecord, Result, UserVisit};
use parking_lot::RwLock;
use std::sync::Arc;

pub struct Recommender {
    model: RwLock<Arc<RecommendationModel>>,
    config: EngineConfig,
    scorer: Scorer,
}

impl Recommender {
    pub fn new(model: RecommendationModel, config: EngineConfig) -> Self {
        let scorer = Scorer::new(config.weights);
        Self {
            model: RwLock::new(Arc::new(model)),
            config,
            scorer,
        }
    }

    /// Validate the configuration and build the first model
    pub fn build(
        restaurants: Vec<RestaurantRecord>,
        visits: Vec<UserVisit>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let model = RecommendationModel::build(restaurants, visits, &config)?;
        Ok(Self::new(model, config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot of the live model
    pub fn model(&self) -> Arc<RecommendationModel> {
        self.model.read().clone()
    }

    pub fn recommend(&self, request: &RecommendRequest) -> Result<Vec<ScoredCandidate>> {
        self.recommend_explained(request).map(|response| response.result)
    }

    /// Ranked list with the anchor used and score statistics
    pub fn recommend_explained(&self, request: &RecommendRequest) -> Result<RecommendationResponse> {
        request.validate()?;

        let model = self.model();
        let anchor = model.anchor_row(&request.user_id)?;
        let anchor_id = model.restaurants()[anchor].place_id.clone();

        tracing::debug!(
            user = %request.user_id,
            anchor = %anchor_id,
            cuisine = ?request.cuisine,
            top_n = ?request.top_n,
            "Ranking against anchor"
        );

        let top_n = request.top_n.unwrap_or(self.config.default_top_n);
        let result = self
            .scorer
            .rank(model.restaurants(), model.similarity().row(anchor), request, top_n);
        let stats = ScoreStats::compute(&result, model.len());

        tracing::debug!(
            user = %request.user_id,
            results = result.len(),
            best = stats.best_score,
            "Recommendations ranked"
        );

        Ok(RecommendationResponse {
            user_id: request.user_id.clone(),
            anchor: anchor_id,
            result,
            stats,
        })
    }

    /// Sorted cuisine vocabulary of the live model
    pub fn cuisine_vocabulary(&self) -> Vec<String> {
        self.model().encoder().cuisine_vocabulary().to_vec()
    }

    pub fn cluster_of(&self, place_id: &PlaceId) -> Option<i32> {
        self.model().clusters().cluster_of(place_id)
    }

    /// Hard-filtered listing by average rating; `None` uses the configured
    /// default count
    pub fn browse(&self, filter: &BrowseFilter, top_n: Option<usize>) -> Result<Vec<RestaurantSummary>> {
        let top_n = top_n.unwrap_or(self.config.default_top_n);
        if top_n == 0 {
            return Err(Error::InvalidParameter("top_n must be at least 1".to_string()));
        }
        Ok(browse(self.model().restaurants(), filter, top_n))
    }

    /// Build a model from new data and publish it in one swap.
    /// On failure the previous model stays live.
    pub fn reload(&self, restaurants: Vec<RestaurantRecord>, visits: Vec<UserVisit>) -> Result<()> {
        let model = match RecommendationModel::build(restaurants, visits, &self.config) {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!(error = %e, "Model rebuild failed, keeping the current model");
                return Err(e);
            }
        };

        let stats = model.stats();
        *self.model.write() = Arc::new(model);
        tracing::info!(restaurants = stats.restaurants, users = stats.users, "Model swapped");
        Ok(())
    }

    pub fn stats(&self) -> ModelStats {
        self.model().stats()
    }
}
