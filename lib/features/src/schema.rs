//! Feature layout
//!
//! Describes where each attribute group sits inside an encoded
//! [`FeatureVector`](dinewise_core::FeatureVector). The order is fixed:
//! cuisine vocabulary (sorted), then one one-hot block per categorical
//! attribute in [`CategoricalAttribute::ALL`] order, then one column per
//! numeric attribute in [`NumericAttribute::ALL`] order.

use dinewise_core::{CategoricalAttribute, NumericAttribute};
use serde::Serialize;
use std::ops::Range;

/// Column ranges of a fitted encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureLayout {
    pub cuisine: Range<usize>,
    pub categorical: Vec<(CategoricalAttribute, Range<usize>)>,
    pub numeric: Range<usize>,
}

impl FeatureLayout {
    /// Total vector width
    pub fn dim(&self) -> usize {
        self.numeric.end
    }

    /// Column range of one categorical attribute
    pub fn categorical_range(&self, attribute: CategoricalAttribute) -> Option<Range<usize>> {
        self.categorical
            .iter()
            .find(|(attr, _)| *attr == attribute)
            .map(|(_, range)| range.clone())
    }

    /// Column index of one numeric attribute
    pub fn numeric_column(&self, attribute: NumericAttribute) -> usize {
        let offset = NumericAttribute::ALL
            .iter()
            .position(|a| *a == attribute)
            .unwrap_or_default();
        self.numeric.start + offset
    }
}
