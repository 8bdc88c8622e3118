// Hard filters over restaurant records
use crate::record::{normalize_cuisine, RestaurantRecord, TimeSlot, Weekday};

pub trait Filter {
    fn matches(&self, record: &RestaurantRecord) -> bool;
}

pub struct RestaurantFilter {
    condition: FilterCondition,
}

#[derive(Debug, Clone)]
pub enum FilterCondition {
    /// Primary cuisine equals the value, ignoring case
    PrimaryCuisine(String),
    /// Value is one of the normalized cuisine tags
    HasCuisine(String),
    MinGroupScore(f64),
    MaxDistanceKm(f64),
    MinAvgRating(f64),
    OpenOnAny(Vec<Weekday>),
    OpenDuring(TimeSlot),
    InCluster(i32),
    And(Vec<FilterCondition>),
    Or(Vec<FilterCondition>),
    Not(Box<FilterCondition>),
}

impl RestaurantFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    /// Filter that accepts every record
    pub fn all() -> Self {
        Self::new(FilterCondition::And(Vec::new()))
    }

    fn matches_condition(condition: &FilterCondition, record: &RestaurantRecord) -> bool {
        match condition {
            FilterCondition::PrimaryCuisine(cuisine) => record
                .primary_cuisine
                .as_deref()
                .and_then(normalize_cuisine)
                .zip(normalize_cuisine(cuisine))
                .map(|(have, want)| have == want)
                .unwrap_or(false),
            FilterCondition::HasCuisine(cuisine) => record.has_cuisine(cuisine),
            FilterCondition::MinGroupScore(min) => record
                .group_friendly_score()
                .map(|v| v >= *min)
                .unwrap_or(false),
            FilterCondition::MaxDistanceKm(max) => record
                .distance_km()
                .map(|v| v <= *max)
                .unwrap_or(false),
            FilterCondition::MinAvgRating(min) => record
                .avg_rating()
                .map(|v| v >= *min)
                .unwrap_or(false),
            FilterCondition::OpenOnAny(days) => record.open_days.contains_any(days),
            FilterCondition::OpenDuring(slot) => record.is_open_during(*slot),
            FilterCondition::InCluster(cluster) => record.location_cluster == *cluster,
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, record))
            }
            FilterCondition::Or(conditions) => {
                conditions.iter().any(|c| Self::matches_condition(c, record))
            }
            FilterCondition::Not(condition) => !Self::matches_condition(condition, record),
        }
    }
}

impl Filter for RestaurantFilter {
    fn matches(&self, record: &RestaurantRecord) -> bool {
        Self::matches_condition(&self.condition, record)
    }
}
