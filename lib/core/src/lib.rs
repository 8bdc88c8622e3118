//! # DineWise Core
//!
//! Core data model and numeric kernels for the DineWise recommendation engine.
//!
//! - [`RestaurantRecord`] / [`UserVisit`] - the immutable input rows
//! - [`FeatureVector`] - one encoded, column-aligned row per restaurant
//! - [`SimilarityMatrix`] - pairwise cosine similarity, built once per load
//! - [`RestaurantFilter`] - hard filters for catalog browsing
//!
//! ## Example
//!
//! ```rust
//! use dinewise_core::{FeatureVector, SimilarityMatrix};
//!
//! let vectors = vec![
//!     FeatureVector::new(vec![1.0, 0.0, 0.5]),
//!     FeatureVector::new(vec![1.0, 1.0, 0.0]),
//! ];
//! let matrix = SimilarityMatrix::build(&vectors).unwrap();
//! assert_eq!(matrix.get(0, 0), 1.0);
//! assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
//! ```

pub mod error;
pub mod filter;
pub mod matrix;
pub mod record;
pub mod vector;

/// SIMD-optimized dot product and norm
///
/// - AVX2/FMA on x86_64
/// - NEON on ARM64
pub mod simd;

pub use error::{Error, Result};
pub use filter::{Filter, FilterCondition, RestaurantFilter};
pub use matrix::SimilarityMatrix;
pub use record::{
    normalize_cuisine, parse_cuisine_tags, CategoricalAttribute, DaySet, NumericAttribute,
    OpeningHours, PlaceId, RestaurantRecord, TimeSlot, UserVisit, Weekday, UNCLUSTERED,
};
pub use vector::FeatureVector;
