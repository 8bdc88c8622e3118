//! Dataset loading by file extension

use crate::csv_table;
use crate::error::{LoadError, LoadResult};
use dinewise_core::{normalize_cuisine, RestaurantRecord, UserVisit};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(DataFormat::Csv),
            Some("json") => Ok(DataFormat::Json),
            _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn open(path: &Path) -> LoadResult<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the restaurant catalog from a `.csv` table or a `.json` array
pub fn load_restaurants(path: impl AsRef<Path>) -> LoadResult<Vec<RestaurantRecord>> {
    let path = path.as_ref();
    let restaurants = match DataFormat::from_path(path)? {
        DataFormat::Csv => csv_table::read_restaurants(open(path)?)?,
        DataFormat::Json => {
            let records: Vec<RestaurantRecord> = serde_json::from_reader(open(path)?)?;
            records.into_iter().map(normalize_json_record).collect()
        }
    };

    tracing::info!(path = %path.display(), restaurants = restaurants.len(), "Restaurants loaded");
    Ok(restaurants)
}

/// Load user visits from a `.csv` table or a `.json` array
pub fn load_visits(path: impl AsRef<Path>) -> LoadResult<Vec<UserVisit>> {
    let path = path.as_ref();
    let visits = match DataFormat::from_path(path)? {
        DataFormat::Csv => csv_table::read_visits(open(path)?)?,
        DataFormat::Json => serde_json::from_reader(open(path)?)?,
    };

    tracing::info!(path = %path.display(), visits = visits.len(), "Visits loaded");
    Ok(visits)
}

/// JSON rows carry tags as written; bring them to the normalized form the
/// CSV reader produces. The primary cuisine goes through the same first-tag
/// rule as a CSV `Rcuisine_x` cell.
fn normalize_json_record(mut record: RestaurantRecord) -> RestaurantRecord {
    record.cuisines = record
        .cuisines
        .iter()
        .filter_map(|t| normalize_cuisine(t))
        .collect();
    match record.primary_cuisine.take() {
        Some(primary) => record.with_cuisine_source(&primary),
        None => record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinewise_core::{Filter, FilterCondition, NumericAttribute, RestaurantFilter, Weekday};
    use serde_json::json;
    use std::io::Write;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a/b.CSV")).unwrap(), DataFormat::Csv);
        assert_eq!(DataFormat::from_path(Path::new("b.json")).unwrap(), DataFormat::Json);
        assert!(matches!(
            DataFormat::from_path(Path::new("b.parquet")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_csv_files() {
        let restaurants = write_file(".csv", "placeID,name,Rcuisine_x\n1,Tacos,Mexican\n2,Pasta,Italian\n");
        let visits = write_file(".csv", "userID,placeID,rating\nU1,1,2\n");

        assert_eq!(load_restaurants(restaurants.path()).unwrap().len(), 2);
        assert_eq!(load_visits(visits.path()).unwrap()[0].rating, 2.0);
    }

    #[test]
    fn test_load_json_files() {
        let restaurants = write_file(
            ".json",
            &json!([{
                "placeID": "132560",
                "name": "puesto de gorditas",
                "rest_latitude": 23.75,
                "rest_longitude": -99.16,
                "Rcuisine_x": "Regional;Mexican",
                "cuisines": [" Bar "],
                "numeric": {"distance_km": 3.5},
                "open_days": ["fri", "sat"],
                "hours": "08:00-12:00;"
            }])
            .to_string(),
        );
        let visits = write_file(".json", &json!([{"userID": "U1", "placeID": "132560", "rating": 1}]).to_string());

        let records = load_restaurants(restaurants.path()).unwrap();
        let record = &records[0];
        assert_eq!(
            record.cuisines.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["bar", "mexican", "regional"]
        );
        assert_eq!(record.primary_cuisine.as_deref(), Some("Regional"));
        assert_eq!(record.numeric(NumericAttribute::DistanceKm), Some(3.5));
        assert!(record.open_days.contains(Weekday::Sat));

        assert_eq!(load_visits(visits.path()).unwrap()[0].user_id, "U1");
    }

    #[test]
    fn test_csv_and_json_agree_on_primary_cuisine() {
        let csv = write_file(".csv", "placeID,name,Rcuisine_x\n132560,Gorditas,Regional;Mexican\n");
        let json = write_file(
            ".json",
            &json!([{"placeID": "132560", "name": "Gorditas", "Rcuisine_x": "Regional;Mexican"}]).to_string(),
        );

        let from_csv = load_restaurants(csv.path()).unwrap().remove(0);
        let from_json = load_restaurants(json.path()).unwrap().remove(0);
        assert_eq!(from_json.primary_cuisine, from_csv.primary_cuisine);
        assert_eq!(from_json.cuisines, from_csv.cuisines);

        let filter = RestaurantFilter::new(FilterCondition::PrimaryCuisine("regional".to_string()));
        assert!(filter.matches(&from_csv));
        assert!(filter.matches(&from_json));
    }

    #[test]
    fn test_json_accepts_numeric_ids() {
        let restaurants = write_file(".json", &json!([{"placeID": 132560, "name": "Gorditas"}]).to_string());
        let visits = write_file(".json", &json!([{"userID": 1077, "placeID": 132560, "rating": 2}]).to_string());

        assert_eq!(load_restaurants(restaurants.path()).unwrap()[0].place_id.as_str(), "132560");
        let visit = &load_visits(visits.path()).unwrap()[0];
        assert_eq!(visit.user_id, "1077");
        assert_eq!(visit.place_id.as_str(), "132560");
    }

    #[test]
    fn test_missing_file_maps_to_io() {
        let err = load_restaurants("/nonexistent/restaurants.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        let core: dinewise_core::Error = err.into();
        assert!(matches!(core, dinewise_core::Error::Io(_)));

        let bad = write_file(".json", "{not json");
        let core: dinewise_core::Error = load_visits(bad.path()).unwrap_err().into();
        assert!(matches!(core, dinewise_core::Error::Serialization(_)));
    }
}
