//! # DineWise
//!
//! A content-based restaurant recommendation engine.
//!
//! DineWise encodes every restaurant of a catalog into a feature vector,
//! precomputes pairwise cosine similarity, and ranks restaurants for a user
//! by their similarity to that user's highest-rated visit, nudged by soft
//! preferences (cuisine, distance, group size, open day).
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! dinewise --restaurants data/restaurants.csv --visits data/ratings.csv --http-port 8088
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use dinewise::prelude::*;
//!
//! let restaurants = load_restaurants("data/restaurants.csv").unwrap();
//! let visits = load_visits("data/ratings.csv").unwrap();
//! let recommender = Recommender::build(restaurants, visits, EngineConfig::default()).unwrap();
//!
//! let request = RecommendRequest::new("U1077")
//!     .with_cuisine("mexican")
//!     .with_max_distance_km(5.0)
//!     .with_days([Weekday::Fri]);
//! for candidate in recommender.recommend(&request).unwrap() {
//!     println!("{} {:.3}", candidate.restaurant.name, candidate.score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `dinewise-core` - records, errors, feature vectors, similarity matrix, filters
//! - `dinewise-features` - feature encoder and DBSCAN location clustering
//! - `dinewise-engine` - model build, scoring, browse and hot model swap
//! - `dinewise-storage` - CSV and JSON dataset loading
//! - `dinewise-api` - REST API

// Re-export core types
pub use dinewise_core::{
    CategoricalAttribute, DaySet, Error, FeatureVector, NumericAttribute, OpeningHours, PlaceId,
    RestaurantRecord, Result, SimilarityMatrix, TimeSlot, UserVisit, Weekday,
};

// Re-export feature construction
pub use dinewise_features::{ClusterAssignment, FeatureEncoder, SpatialClusterer};

// Re-export engine
pub use dinewise_engine::{
    BrowseFilter, EngineConfig, RecommendRequest, RecommendationModel, Recommender,
    RestaurantSummary, ScoredCandidate, ScoringWeights,
};

// Re-export storage
pub use dinewise_storage::{load_restaurants, load_visits, LoadError};

// Re-export API
pub use dinewise_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_restaurants, load_visits, BrowseFilter, EngineConfig, Error, PlaceId,
        RecommendRequest, Recommender, RestApi, RestaurantRecord, Result, ScoredCandidate,
        TimeSlot, UserVisit, Weekday,
    };
}

/// SIMD-optimized vector operations
pub mod simd {
    pub use dinewise_core::simd::{dot_product_simd, norm_simd};
}
