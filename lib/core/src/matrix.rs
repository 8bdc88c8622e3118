//! Pairwise cosine similarity over the full feature set
//!
//! The matrix is computed once per dataset load and only read afterwards.
//! Each unordered pair is computed a single time and mirrored, so the
//! result is exactly symmetric.

use crate::{Error, FeatureVector, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Dense, symmetric `n x n` similarity matrix in row-major order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute cosine similarity for every pair of vectors.
    ///
    /// `sim(i, i)` is 1.0 for a non-zero vector and 0.0 for an all-zero one.
    /// All vectors must share one dimension.
    pub fn build(vectors: &[FeatureVector]) -> Result<Self> {
        let started = Instant::now();
        let n = vectors.len();

        if let Some(first) = vectors.first() {
            let expected = first.dim();
            if let Some(bad) = vectors.iter().find(|v| v.dim() != expected) {
                return Err(Error::InvalidDimension {
                    expected,
                    actual: bad.dim(),
                });
            }
        }

        let norms: Vec<f32> = vectors.par_iter().map(FeatureVector::norm).collect();

        // Upper triangle, one row per task: row i holds sim(i, j) for j > i
        let upper: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let a = vectors[i].as_slice();
                ((i + 1)..n)
                    .map(|j| {
                        let denom = norms[i] * norms[j];
                        if denom == 0.0 {
                            0.0
                        } else {
                            crate::simd::dot_product_simd(a, vectors[j].as_slice()) / denom
                        }
                    })
                    .collect()
            })
            .collect();

        let mut data = vec![0.0f32; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            data[i * n + i] = if norms[i] > 0.0 { 1.0 } else { 0.0 };
            for (offset, sim) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                data[i * n + j] = sim;
                data[j * n + i] = sim;
            }
        }

        tracing::info!(
            restaurants = n,
            dim = vectors.first().map(FeatureVector::dim).unwrap_or(0),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity matrix built"
        );

        Ok(Self { n, data })
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between rows `i` and `j`. Panics if either is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.n && j < self.n, "index out of range");
        self.data[i * self.n + j]
    }

    /// All similarities of row `i` against every row
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}
