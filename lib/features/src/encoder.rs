//! Feature Encoder
//!
//! Turns restaurant records into fixed-width, column-aligned feature vectors:
//!
//! 1. multi-hot cuisine bits against the fitted (sorted) cuisine vocabulary
//! 2. one-hot blocks for each categorical attribute, levels sorted per attribute
//! 3. min-max scaled numeric attributes, clamped to `[0, 1]`
//!
//! Everything is looked up in vocabularies captured by [`FeatureEncoder::fit`];
//! a cuisine or level never seen at fit time encodes as zeros and the
//! vocabulary never grows after fitting.

use crate::scaler::MinMaxScaler;
use crate::schema::FeatureLayout;
use dinewise_core::{
    CategoricalAttribute, Error, FeatureVector, NumericAttribute, RestaurantRecord, Result,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fitted encoder parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    /// Sorted cuisine vocabulary
    cuisines: Vec<String>,
    /// Sorted levels per categorical attribute, in `CategoricalAttribute::ALL` order
    levels: Vec<(CategoricalAttribute, Vec<String>)>,
    /// One scaler per numeric attribute, in `NumericAttribute::ALL` order
    scalers: Vec<(NumericAttribute, MinMaxScaler)>,
}

impl FeatureEncoder {
    /// Capture vocabularies and scaling statistics from the full record set.
    ///
    /// Fails with [`Error::DataIntegrity`] when the set is empty or when a
    /// numeric attribute has no usable value in any row.
    pub fn fit(records: &[RestaurantRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::DataIntegrity(
                "cannot fit the feature encoder on an empty restaurant set".to_string(),
            ));
        }

        let cuisines: Vec<String> = records
            .iter()
            .flat_map(|r| r.cuisines.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let levels = CategoricalAttribute::ALL
            .iter()
            .map(|&attr| {
                let values: BTreeSet<String> = records
                    .iter()
                    .filter_map(|r| r.categorical(attr))
                    .map(str::to_string)
                    .collect();
                (attr, values.into_iter().collect())
            })
            .collect();

        let scalers = NumericAttribute::ALL
            .iter()
            .map(|&attr| {
                MinMaxScaler::fit(records.iter().filter_map(|r| r.numeric(attr)))
                    .map(|scaler| (attr, scaler))
                    .ok_or_else(|| {
                        Error::DataIntegrity(format!(
                            "numeric column '{}' has no parseable value in any row",
                            attr.column()
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let encoder = Self {
            cuisines,
            levels,
            scalers,
        };

        tracing::info!(
            restaurants = records.len(),
            cuisines = encoder.cuisines.len(),
            dim = encoder.dim(),
            "Feature encoder fitted"
        );

        Ok(encoder)
    }

    /// Sorted cuisine vocabulary observed at fit time
    pub fn cuisine_vocabulary(&self) -> &[String] {
        &self.cuisines
    }

    /// Fitted levels of one categorical attribute
    pub fn levels(&self, attribute: CategoricalAttribute) -> &[String] {
        self.levels
            .iter()
            .find(|(attr, _)| *attr == attribute)
            .map(|(_, levels)| levels.as_slice())
            .unwrap_or_default()
    }

    /// Total feature width
    pub fn dim(&self) -> usize {
        self.cuisines.len()
            + self.levels.iter().map(|(_, l)| l.len()).sum::<usize>()
            + self.scalers.len()
    }

    pub fn layout(&self) -> FeatureLayout {
        let cuisine = 0..self.cuisines.len();
        let mut offset = cuisine.end;
        let categorical = self
            .levels
            .iter()
            .map(|(attr, levels)| {
                let range = offset..offset + levels.len();
                offset = range.end;
                (*attr, range)
            })
            .collect();
        let numeric = offset..offset + self.scalers.len();

        FeatureLayout {
            cuisine,
            categorical,
            numeric,
        }
    }

    /// Human-readable label of every column, in vector order
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.dim());
        names.extend(self.cuisines.iter().map(|c| format!("cuisine={}", c)));
        for (attr, levels) in &self.levels {
            names.extend(levels.iter().map(|l| format!("{}={}", attr.column(), l)));
        }
        names.extend(self.scalers.iter().map(|(attr, _)| attr.column().to_string()));
        names
    }

    /// Encode one record
    pub fn encode(&self, record: &RestaurantRecord) -> FeatureVector {
        let mut vector = FeatureVector::zeros(self.dim());
        let out = vector.as_mut_slice();

        for tag in &record.cuisines {
            if let Ok(col) = self.cuisines.binary_search(tag) {
                out[col] = 1.0;
            }
        }

        let mut offset = self.cuisines.len();
        for (attr, levels) in &self.levels {
            if let Some(value) = record.categorical(*attr) {
                if let Ok(k) = levels.binary_search_by(|level| level.as_str().cmp(value)) {
                    out[offset + k] = 1.0;
                }
            }
            offset += levels.len();
        }

        for (attr, scaler) in &self.scalers {
            out[offset] = record
                .numeric(*attr)
                .map(|v| scaler.transform(v))
                .unwrap_or(0.0);
            offset += 1;
        }

        vector
    }

    /// Encode every record, preserving input order
    pub fn encode_all(&self, records: &[RestaurantRecord]) -> Vec<FeatureVector> {
        records.par_iter().map(|r| self.encode(r)).collect()
    }
}
