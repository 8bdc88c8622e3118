//! CSV table readers
//!
//! The restaurant table is wide and loosely typed: every column except
//! `placeID` and `name` may be absent from the header or blank in a row.
//! Headers are resolved to roles once; rows are then read positionally.
//! Unparseable numbers are treated as missing and counted.

use crate::error::{LoadError, LoadResult};
use dinewise_core::{
    CategoricalAttribute, DaySet, NumericAttribute, OpeningHours, RestaurantRecord, UserVisit,
};
use std::io::Read;

/// What a restaurant header column feeds into
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    PlaceId,
    Name,
    Latitude,
    Longitude,
    /// Cuisine source; lower rank is merged first and supplies the primary cuisine
    Cuisine(u8),
    Categorical(CategoricalAttribute),
    Numeric(NumericAttribute),
    Days(DaySet),
    Hours,
}

fn resolve(header: &str) -> Option<Column> {
    let column = match header.trim() {
        "placeID" | "place_id" => Column::PlaceId,
        "name" => Column::Name,
        "rest_latitude" | "latitude" => Column::Latitude,
        "rest_longitude" | "longitude" => Column::Longitude,
        "Rcuisine_x" => Column::Cuisine(0),
        "Rcuisine" => Column::Cuisine(1),
        "Rcuisine_y" => Column::Cuisine(2),
        "hours" => Column::Hours,
        other => {
            if let Some(attr) = CategoricalAttribute::ALL.iter().find(|a| a.column() == other) {
                Column::Categorical(*attr)
            } else if let Some(attr) = NumericAttribute::ALL.iter().find(|a| a.column() == other) {
                Column::Numeric(*attr)
            } else {
                Column::Days(DaySet::from_column(other)?)
            }
        }
    };
    Some(column)
}

fn require(headers: &csv::StringRecord, name: &'static str, aliases: &[&str]) -> LoadResult<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name || aliases.contains(&h.trim()))
        .ok_or_else(|| LoadError::MissingColumn {
            column: name,
            available: headers.iter().map(str::to_string).collect(),
        })
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_number(value: &str, invalid: &mut usize) -> Option<f64> {
    let value = non_blank(value)?;
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            *invalid += 1;
            None
        }
    }
}

fn parse_flag(value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "t" | "yes" | "y" => true,
        _ => false,
    }
}

/// Read the restaurant table
pub fn read_restaurants<R: Read>(reader: R) -> LoadResult<Vec<RestaurantRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let id_col = require(&headers, "placeID", &["place_id"])?;
    let name_col = require(&headers, "name", &[])?;

    let mut columns: Vec<(usize, Column)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| resolve(h).map(|c| (i, c)))
        .filter(|(_, c)| !matches!(c, Column::PlaceId | Column::Name))
        .collect();
    // Cuisine columns in rank order so Rcuisine_x supplies the primary cuisine
    columns.sort_by_key(|(i, c)| match c {
        Column::Cuisine(rank) => (0, *rank as usize, *i),
        _ => (1, 0, *i),
    });

    let mut restaurants = Vec::new();
    let mut invalid_numbers = 0;

    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let id = row.get(id_col).and_then(non_blank).ok_or_else(|| LoadError::InvalidValue {
            line,
            column: "placeID",
            value: String::new(),
        })?;
        let name = row.get(name_col).map(str::trim).unwrap_or_default();
        let mut record = RestaurantRecord::new(id, name);

        for (index, column) in &columns {
            let Some(value) = row.get(*index) else {
                continue;
            };
            match column {
                Column::Latitude => record.latitude = parse_number(value, &mut invalid_numbers),
                Column::Longitude => record.longitude = parse_number(value, &mut invalid_numbers),
                Column::Cuisine(_) => record = record.with_cuisine_source(value),
                Column::Categorical(attr) => {
                    if let Some(level) = non_blank(value) {
                        record = record.with_categorical(*attr, level);
                    }
                }
                Column::Numeric(attr) => {
                    if let Some(v) = parse_number(value, &mut invalid_numbers) {
                        record = record.with_numeric(*attr, v);
                    }
                }
                Column::Days(days) => {
                    if parse_flag(value) {
                        record.open_days = record.open_days.union(*days);
                    }
                }
                Column::Hours => {
                    record.hours = non_blank(value).map(OpeningHours::parse);
                }
                Column::PlaceId | Column::Name => {}
            }
        }

        restaurants.push(record);
    }

    if invalid_numbers > 0 {
        tracing::warn!(invalid_numbers, "Unparseable numeric cells treated as missing");
    }

    Ok(restaurants)
}

/// Read the visit (rating) table
pub fn read_visits<R: Read>(reader: R) -> LoadResult<Vec<UserVisit>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let user_col = require(&headers, "userID", &["user_id"])?;
    let place_col = require(&headers, "placeID", &["place_id"])?;
    let rating_col = require(&headers, "rating", &[])?;

    let mut visits = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let field = |col: usize, column: &'static str| {
            row.get(col).and_then(non_blank).ok_or_else(|| LoadError::InvalidValue {
                line,
                column,
                value: String::new(),
            })
        };

        let user = field(user_col, "userID")?;
        let place = field(place_col, "placeID")?;
        let raw_rating = field(rating_col, "rating")?;
        let rating = raw_rating.parse::<f64>().map_err(|_| LoadError::InvalidValue {
            line,
            column: "rating",
            value: raw_rating.to_string(),
        })?;

        visits.push(UserVisit::new(user, place, rating));
    }

    Ok(visits)
}
