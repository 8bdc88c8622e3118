//! Spatial Clusterer
//!
//! Density-based clustering (DBSCAN) of restaurant coordinates.
//!
//! # Algorithm
//!
//! 1. Keep rows that have both latitude and longitude
//! 2. Standardize both axes to zero mean, unit variance
//! 3. For each unvisited point, find every point within `eps` (itself included)
//!    - fewer than `min_samples` neighbors: noise (-1) for now
//!    - otherwise: start a new cluster and expand it through core points
//! 4. Clusters are numbered 0, 1, 2, ... in discovery order
//!
//! Rows without coordinates are never clustered and keep -1. The result is
//! advisory metadata for filtering; it does not take part in scoring.

use crate::scaler::StandardScaler;
use ahash::AHashMap;
use dinewise_core::{Error, PlaceId, RestaurantRecord, Result, UNCLUSTERED};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

const UNVISITED: i32 = -2;

/// DBSCAN parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialClusterer {
    /// Neighborhood radius in standardized-coordinate units
    pub eps: f64,
    /// Neighbors (self included) needed for a core point
    pub min_samples: usize,
}

impl Default for SpatialClusterer {
    fn default() -> Self {
        Self {
            eps: 0.5,
            min_samples: 5,
        }
    }
}

impl SpatialClusterer {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }

    /// Cluster every record that has coordinates.
    ///
    /// Fails with [`Error::DataIntegrity`] when no record has both
    /// coordinates, and with [`Error::InvalidParameter`] for a non-positive
    /// radius.
    pub fn fit(&self, records: &[RestaurantRecord]) -> Result<ClusterAssignment> {
        if !(self.eps > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cluster radius must be positive, got {}",
                self.eps
            )));
        }

        let located: Vec<(usize, [f64; 2])> = records
            .iter()
            .enumerate()
            .filter_map(|(row, r)| r.coordinates().map(|(lat, lon)| (row, [lat, lon])))
            .collect();

        if located.is_empty() {
            return Err(Error::DataIntegrity(
                "no restaurant has both rest_latitude and rest_longitude".to_string(),
            ));
        }

        let coords: Vec<[f64; 2]> = located.iter().map(|(_, c)| *c).collect();
        let scaler = StandardScaler::fit(&coords)?;
        let scaled: Vec<[f64; 2]> = coords.iter().map(|c| scaler.transform(c)).collect();

        let labels = self.dbscan(&scaled);

        let mut by_place: AHashMap<PlaceId, i32> = records
            .iter()
            .map(|r| (r.place_id.clone(), UNCLUSTERED))
            .collect();
        for ((row, _), label) in located.iter().zip(&labels) {
            by_place.insert(records[*row].place_id.clone(), *label);
        }

        let cluster_count = labels.iter().copied().max().map(|m| (m + 1) as usize).unwrap_or(0);
        let noise_count = by_place.values().filter(|l| **l == UNCLUSTERED).count();

        tracing::info!(
            located = located.len(),
            unlocated = records.len() - located.len(),
            clusters = cluster_count,
            noise = noise_count,
            "Location clusters assigned"
        );

        Ok(ClusterAssignment {
            by_place,
            cluster_count,
            noise_count,
        })
    }

    /// Raw DBSCAN over already-scaled points
    pub fn dbscan(&self, points: &[[f64; 2]]) -> Vec<i32> {
        let eps_sq = self.eps * self.eps;
        let neighbors: Vec<Vec<usize>> = (0..points.len())
            .into_par_iter()
            .map(|i| region_query(points, i, eps_sq))
            .collect();

        let mut labels = vec![UNVISITED; points.len()];
        let mut queued = vec![false; points.len()];
        let mut cluster_id = 0;

        for i in 0..points.len() {
            if labels[i] != UNVISITED {
                continue;
            }

            if neighbors[i].len() < self.min_samples {
                labels[i] = UNCLUSTERED;
                continue;
            }

            labels[i] = cluster_id;
            let mut frontier: Vec<usize> = Vec::with_capacity(neighbors[i].len());
            for &nb in &neighbors[i] {
                if !queued[nb] {
                    queued[nb] = true;
                    frontier.push(nb);
                }
            }

            let mut cursor = 0;
            while cursor < frontier.len() {
                let point = frontier[cursor];
                cursor += 1;

                if labels[point] == UNCLUSTERED {
                    // Border point reached from a core point
                    labels[point] = cluster_id;
                } else if labels[point] == UNVISITED {
                    labels[point] = cluster_id;
                    if neighbors[point].len() >= self.min_samples {
                        for &nb in &neighbors[point] {
                            if !queued[nb] {
                                queued[nb] = true;
                                frontier.push(nb);
                            }
                        }
                    }
                }
            }

            cluster_id += 1;
        }

        labels
    }
}

fn region_query(points: &[[f64; 2]], i: usize, eps_sq: f64) -> Vec<usize> {
    let [x, y] = points[i];
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            let dx = p[0] - x;
            let dy = p[1] - y;
            dx * dx + dy * dy <= eps_sq
        })
        .map(|(j, _)| j)
        .collect()
}

/// Cluster id per restaurant, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct ClusterAssignment {
    by_place: AHashMap<PlaceId, i32>,
    cluster_count: usize,
    noise_count: usize,
}

impl ClusterAssignment {
    /// Cluster of a known restaurant (-1 for noise or no coordinates)
    pub fn cluster_of(&self, place_id: &PlaceId) -> Option<i32> {
        self.by_place.get(place_id).copied()
    }

    /// Number of clusters found (noise excluded)
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Restaurants labeled -1
    pub fn noise_count(&self) -> usize {
        self.noise_count
    }

    /// Write cluster ids onto the records, matched by identifier
    pub fn apply(&self, records: &mut [RestaurantRecord]) {
        for record in records.iter_mut() {
            record.location_cluster = self.cluster_of(&record.place_id).unwrap_or(UNCLUSTERED);
        }
    }
}
