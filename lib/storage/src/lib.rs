//! Dataset loading for DineWise
//!
//! Reads the restaurant catalog and the user visit table from `.csv` or
//! `.json` files into core records. Loading happens once per model build.

pub mod csv_table;
pub mod error;
pub mod loader;

pub use error::{LoadError, LoadResult};
pub use loader::{load_restaurants, load_visits, DataFormat};
