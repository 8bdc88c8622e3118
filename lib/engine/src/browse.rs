//! Popularity browse
//!
//! Hard-filtered listing ordered by average rating. Needs no visit history,
//! so it also serves users the recommender does not know.

use crate::explain::RestaurantSummary;
use dinewise_core::{
    Filter, FilterCondition, RestaurantFilter, RestaurantRecord, TimeSlot, Weekday,
};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Hard filters for a browse call. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseFilter {
    /// Primary cuisine, compared ignoring case
    pub cuisine: Option<String>,
    pub min_group_score: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub min_avg_rating: Option<f64>,
    /// Open on at least one of these days
    pub days: Vec<Weekday>,
    pub time_slot: Option<TimeSlot>,
    pub location_cluster: Option<i32>,
}

impl BrowseFilter {
    pub fn to_filter(&self) -> RestaurantFilter {
        let mut conditions = Vec::new();

        if let Some(cuisine) = self.cuisine.as_deref().filter(|c| !c.trim().is_empty()) {
            conditions.push(FilterCondition::PrimaryCuisine(cuisine.to_string()));
        }
        if let Some(min) = self.min_group_score {
            conditions.push(FilterCondition::MinGroupScore(min));
        }
        if let Some(max) = self.max_distance_km {
            conditions.push(FilterCondition::MaxDistanceKm(max));
        }
        if let Some(min) = self.min_avg_rating {
            conditions.push(FilterCondition::MinAvgRating(min));
        }
        if !self.days.is_empty() {
            conditions.push(FilterCondition::OpenOnAny(self.days.clone()));
        }
        if let Some(slot) = self.time_slot {
            conditions.push(FilterCondition::OpenDuring(slot));
        }
        if let Some(cluster) = self.location_cluster {
            conditions.push(FilterCondition::InCluster(cluster));
        }

        RestaurantFilter::new(FilterCondition::And(conditions))
    }
}

/// Matching restaurants by average rating, best first.
/// Rows without a rating sort last; ties keep catalog order.
pub fn browse(
    restaurants: &[RestaurantRecord],
    filter: &BrowseFilter,
    top_n: usize,
) -> Vec<RestaurantSummary> {
    let filter = filter.to_filter();
    let mut matching: Vec<&RestaurantRecord> =
        restaurants.iter().filter(|r| filter.matches(r)).collect();

    matching.sort_by_key(|r| Reverse(OrderedFloat(r.avg_rating().unwrap_or(f64::NEG_INFINITY))));

    matching
        .into_iter()
        .take(top_n)
        .map(RestaurantSummary::from)
        .collect()
}
