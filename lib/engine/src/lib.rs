//! # DineWise Engine
//!
//! Request-time ranking over a frozen recommendation model.
//!
//! ## Features
//!
//! - **Model build**: clustering, encoding and the similarity matrix in one pass
//! - **Anchor scoring**: similarity to the user's highest-rated visit
//! - **Soft filters**: additive bonuses and a distance penalty, never exclusion
//! - **Browse**: hard-filtered listing by average rating for unknown users
//! - **Hot swap**: a rebuilt model replaces the live one atomically
//!
//! ## Example
//!
//! ```rust
//! use dinewise_core::{NumericAttribute, RestaurantRecord, UserVisit};
//! use dinewise_engine::{EngineConfig, RecommendRequest, Recommender};
//!
//! let restaurants: Vec<RestaurantRecord> = ["Italian", "Mexican", "Italian;Bar"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, cuisine)| {
//!         NumericAttribute::ALL.iter().fold(
//!             RestaurantRecord::new(i.to_string(), format!("Place {}", i))
//!                 .with_coordinates(22.1 + i as f64 * 0.01, -100.9)
//!                 .with_cuisine_source(cuisine),
//!             |r, attr| r.with_numeric(*attr, i as f64),
//!         )
//!     })
//!     .collect();
//! let visits = vec![UserVisit::new("U1", "0", 2.0)];
//!
//! let recommender = Recommender::build(restaurants, visits, EngineConfig::default()).unwrap();
//! let ranked = recommender
//!     .recommend(&RecommendRequest::new("U1").with_cuisine("italian").with_top_n(2))
//!     .unwrap();
//! assert_eq!(ranked.len(), 2);
//! assert_eq!(ranked[0].restaurant.place_id.as_str(), "0");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Request    │────>│   Anchor    │────>│   Scorer    │
//! │ (user+prefs)│     │ (top visit) │     │ (sim+adj)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Model     │     │  Explain    │
//!                     │ (Arc swap)  │     │ (results)   │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod browse;
pub mod config;
pub mod explain;
pub mod model;
pub mod recommender;
pub mod scoring;

#[cfg(test)]
mod test_support;

pub use browse::BrowseFilter;
pub use config::{EngineConfig, ScoringWeights};
pub use explain::{Adjustments, RecommendationResponse, RestaurantSummary, ScoreStats, ScoredCandidate};
pub use model::{ModelStats, RecommendationModel, VisitRef};
pub use recommender::Recommender;
pub use scoring::{RecommendRequest, Scorer};
