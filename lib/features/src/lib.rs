//! # DineWise Features
//!
//! Offline feature construction for the recommendation engine.
//!
//! ## Overview
//!
//! Two one-shot passes run over the full restaurant set at startup:
//!
//! 1. **Feature Encoder** - cuisine multi-hot, categorical one-hot and
//!    min-max scaled numerics, concatenated into one column-aligned vector
//!    per restaurant
//! 2. **Spatial Clusterer** - DBSCAN over standardized coordinates, giving
//!    each restaurant an advisory location cluster id
//!
//! ## Example
//!
//! ```rust
//! use dinewise_core::{NumericAttribute, RestaurantRecord};
//! use dinewise_features::FeatureEncoder;
//!
//! let records: Vec<RestaurantRecord> = ["Italian;Pizzeria", "Mexican"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, cuisine)| {
//!         NumericAttribute::ALL.iter().fold(
//!             RestaurantRecord::new(i.to_string(), format!("Place {}", i))
//!                 .with_cuisine_source(cuisine),
//!             |r, attr| r.with_numeric(*attr, i as f64),
//!         )
//!     })
//!     .collect();
//!
//! let encoder = FeatureEncoder::fit(&records).unwrap();
//! assert_eq!(encoder.cuisine_vocabulary(), &["italian", "mexican", "pizzeria"]);
//! let vectors = encoder.encode_all(&records);
//! assert_eq!(vectors[0].dim(), encoder.dim());
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Records    │────>│  Encoder    │────>│  Feature    │
//! │ (catalog)   │     │ (fit once)  │     │  Vectors    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │
//!       │              ┌─────────────┐
//!       └─────────────>│ Clusterer   │────> location_cluster
//!                      │ (DBSCAN)    │
//!                      └─────────────┘
//! ```

pub mod cluster;
pub mod encoder;
pub mod scaler;
pub mod schema;

pub use cluster::{ClusterAssignment, SpatialClusterer};
pub use encoder::FeatureEncoder;
pub use scaler::{MinMaxScaler, StandardScaler};
pub use schema::FeatureLayout;
