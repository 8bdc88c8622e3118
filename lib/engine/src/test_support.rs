// Shared fixtures for the engine's unit tests
use dinewise_core::{CategoricalAttribute, NumericAttribute, RestaurantRecord, UserVisit, Weekday};

fn restaurant(
    id: &str,
    cuisine: &str,
    (lat, lon): (f64, f64),
    distance: f64,
    group: f64,
    rating: f64,
    days: &[Weekday],
) -> RestaurantRecord {
    RestaurantRecord::new(id, format!("Restaurant {}", id))
        .with_coordinates(lat, lon)
        .with_cuisine_source(cuisine)
        .with_categorical(CategoricalAttribute::Price, if rating > 3.5 { "high" } else { "low" })
        .with_numeric(NumericAttribute::DistanceKm, distance)
        .with_numeric(NumericAttribute::Popularity, rating / 5.0)
        .with_numeric(NumericAttribute::FoodRating, rating / 5.0)
        .with_numeric(NumericAttribute::ServiceRating, 0.5)
        .with_numeric(NumericAttribute::Trending, 0.2)
        .with_numeric(NumericAttribute::GroupFriendly, group)
        .with_numeric(NumericAttribute::AvgRating, rating)
        .with_days(days)
}

pub(crate) fn catalog() -> Vec<RestaurantRecord> {
    vec![
        restaurant("r1", "Italian;Pizzeria", (22.15, -100.97), 3.0, 0.8, 4.1, &[Weekday::Fri]),
        restaurant("r2", "Italian", (22.15, -100.98), 6.0, 0.4, 3.2, &[Weekday::Sat]),
        restaurant("r3", "Mexican;Bar", (22.14, -100.97), 12.0, 0.6, 2.8, &[Weekday::Fri, Weekday::Sat]),
        restaurant("r4", "Mexican", (18.92, -99.23), 1.5, 0.9, 4.6, &[Weekday::Sun]),
        restaurant("r5", "Cafeteria", (18.91, -99.24), 25.0, 0.2, 3.9, &[]),
        restaurant("r6", "Japanese", (23.75, -99.16), 8.0, 0.5, 4.4, &[Weekday::Mon]),
    ]
}

pub(crate) fn visits() -> Vec<UserVisit> {
    vec![
        UserVisit::new("U1", "r1", 1.0),
        UserVisit::new("U1", "r2", 2.0),
        UserVisit::new("U1", "r3", 2.0),
        UserVisit::new("U2", "r5", 1.0),
    ]
}
