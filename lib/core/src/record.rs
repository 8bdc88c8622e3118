//! Restaurant and visit records
//!
//! A [`RestaurantRecord`] is one immutable catalog row. Cuisine tags are kept
//! normalized (trimmed, lowercased, deduplicated); categorical and numeric
//! attributes are keyed by closed enums whose serde names are the source
//! column names, so JSON rows and CSV headers line up.

use crate::Error;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Location cluster id for noise or rows without coordinates
pub const UNCLUSTERED: i32 = -1;

/// Restaurant identifier (`placeID` in the source data)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlaceId(String);

/// Source ids arrive as strings or as bare integers
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

impl<'de> Deserialize<'de> for PlaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        id_string(deserializer).map(Self)
    }
}

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlaceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Day of the week used for availability flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Lowercase day code accepted by the request surface
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Mon),
            "tue" | "tues" | "tuesday" => Ok(Weekday::Tue),
            "wed" | "wednesday" => Ok(Weekday::Wed),
            "thu" | "thur" | "thurs" | "thursday" => Ok(Weekday::Thu),
            "fri" | "friday" => Ok(Weekday::Fri),
            "sat" | "saturday" => Ok(Weekday::Sat),
            "sun" | "sunday" => Ok(Weekday::Sun),
            other => Err(Error::InvalidParameter(format!("unknown day code '{}'", other))),
        }
    }
}

impl TryFrom<String> for Weekday {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One availability flag per weekday
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct DaySet(u8);

/// Prefix of the availability columns in the source table
pub const DAY_COLUMN_PREFIX: &str = "days_";

impl DaySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    /// True if at least one of `days` is set
    pub fn contains_any(&self, days: &[Weekday]) -> bool {
        days.iter().any(|d| self.contains(*d))
    }

    pub fn union(&self, other: DaySet) -> DaySet {
        DaySet(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|d| self.contains(*d))
    }

    /// Resolve an availability column name to the days it covers.
    ///
    /// Accepts single-day columns (`days_Fri`) and grouped columns
    /// (`days_Mon;Tue;Wed;Thu;Fri;`, `days_Sat;`). Returns `None` for
    /// columns that are not availability flags.
    pub fn from_column(column: &str) -> Option<DaySet> {
        let spec = column.strip_prefix(DAY_COLUMN_PREFIX)?;
        let mut set = DaySet::empty();
        for code in spec.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            set.insert(code.parse().ok()?);
        }
        if set.is_empty() {
            None
        } else {
            Some(set)
        }
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = DaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<Weekday>> for DaySet {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<DaySet> for Vec<Weekday> {
    fn from(set: DaySet) -> Self {
        set.iter().collect()
    }
}

/// Coarse time-of-day window used by the hours filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    /// Half-open hour window `[start, end)`
    pub fn hours(self) -> (u32, u32) {
        match self {
            TimeSlot::Morning => (6, 12),
            TimeSlot::Afternoon => (12, 18),
            TimeSlot::Evening => (18, 24),
        }
    }
}

impl FromStr for TimeSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" => Ok(TimeSlot::Evening),
            other => Err(Error::InvalidParameter(format!("unknown time slot '{}'", other))),
        }
    }
}

/// Parsed opening-hours string such as `"08:00-12:00;13:00-23:30;"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct OpeningHours {
    raw: String,
    /// (open_hour, close_hour); close may exceed 24 for overnight spans
    spans: Vec<(u32, u32)>,
}

impl OpeningHours {
    /// Parse an hours string. Malformed parts are skipped.
    pub fn parse(raw: &str) -> Self {
        let spans = raw
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(parse_span)
            .collect();
        Self {
            raw: raw.to_string(),
            spans,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn spans(&self) -> &[(u32, u32)] {
        &self.spans
    }

    /// True if some opening hour falls inside the slot window
    pub fn is_open_during(&self, slot: TimeSlot) -> bool {
        let (slot_start, slot_end) = slot.hours();
        self.spans
            .iter()
            .any(|&(open, close)| open.max(slot_start) < close.min(slot_end))
    }
}

fn parse_span(part: &str) -> Option<(u32, u32)> {
    let mut bounds = part.split('-');
    let open = parse_hour(bounds.next()?)?;
    let close = parse_hour(bounds.next()?)?;
    if bounds.next().is_some() {
        return None;
    }
    let close = if close < open { close + 24 } else { close };
    Some((open, close))
}

fn parse_hour(time: &str) -> Option<u32> {
    time.trim().split(':').next()?.trim().parse().ok()
}

impl From<String> for OpeningHours {
    fn from(raw: String) -> Self {
        OpeningHours::parse(&raw)
    }
}

impl From<OpeningHours> for String {
    fn from(hours: OpeningHours) -> Self {
        hours.raw
    }
}

/// Closed-vocabulary categorical attributes, in encoding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoricalAttribute {
    #[serde(rename = "alcohol")]
    Alcohol,
    #[serde(rename = "smoking_area")]
    SmokingArea,
    #[serde(rename = "dress_code")]
    DressCode,
    #[serde(rename = "accessibility")]
    Accessibility,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "Rambience")]
    Ambience,
    #[serde(rename = "franchise")]
    Franchise,
    #[serde(rename = "area")]
    Area,
    #[serde(rename = "other_services")]
    OtherServices,
}

impl CategoricalAttribute {
    pub const ALL: [CategoricalAttribute; 9] = [
        CategoricalAttribute::Alcohol,
        CategoricalAttribute::SmokingArea,
        CategoricalAttribute::DressCode,
        CategoricalAttribute::Accessibility,
        CategoricalAttribute::Price,
        CategoricalAttribute::Ambience,
        CategoricalAttribute::Franchise,
        CategoricalAttribute::Area,
        CategoricalAttribute::OtherServices,
    ];

    /// Column name in the source table
    pub fn column(self) -> &'static str {
        match self {
            CategoricalAttribute::Alcohol => "alcohol",
            CategoricalAttribute::SmokingArea => "smoking_area",
            CategoricalAttribute::DressCode => "dress_code",
            CategoricalAttribute::Accessibility => "accessibility",
            CategoricalAttribute::Price => "price",
            CategoricalAttribute::Ambience => "Rambience",
            CategoricalAttribute::Franchise => "franchise",
            CategoricalAttribute::Area => "area",
            CategoricalAttribute::OtherServices => "other_services",
        }
    }
}

/// Numeric attributes, in encoding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NumericAttribute {
    #[serde(rename = "distance_km")]
    DistanceKm,
    #[serde(rename = "popularity_score_scaled")]
    Popularity,
    #[serde(rename = "food_rating_scaled")]
    FoodRating,
    #[serde(rename = "service_rating_scaled")]
    ServiceRating,
    #[serde(rename = "trending_score")]
    Trending,
    #[serde(rename = "group_friendly_score")]
    GroupFriendly,
    #[serde(rename = "avg_rating")]
    AvgRating,
}

impl NumericAttribute {
    pub const ALL: [NumericAttribute; 7] = [
        NumericAttribute::DistanceKm,
        NumericAttribute::Popularity,
        NumericAttribute::FoodRating,
        NumericAttribute::ServiceRating,
        NumericAttribute::Trending,
        NumericAttribute::GroupFriendly,
        NumericAttribute::AvgRating,
    ];

    pub fn column(self) -> &'static str {
        match self {
            NumericAttribute::DistanceKm => "distance_km",
            NumericAttribute::Popularity => "popularity_score_scaled",
            NumericAttribute::FoodRating => "food_rating_scaled",
            NumericAttribute::ServiceRating => "service_rating_scaled",
            NumericAttribute::Trending => "trending_score",
            NumericAttribute::GroupFriendly => "group_friendly_score",
            NumericAttribute::AvgRating => "avg_rating",
        }
    }
}

/// Normalize one cuisine tag; `None` for blank input
pub fn normalize_cuisine(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_lowercase())
    }
}

/// Split a semicolon-delimited cuisine source into normalized tags
pub fn parse_cuisine_tags(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(';').filter_map(normalize_cuisine)
}

fn unclustered() -> i32 {
    UNCLUSTERED
}

/// Immutable restaurant catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    #[serde(alias = "placeID")]
    pub place_id: PlaceId,

    pub name: String,

    #[serde(default, alias = "rest_latitude")]
    pub latitude: Option<f64>,

    #[serde(default, alias = "rest_longitude")]
    pub longitude: Option<f64>,

    /// First cuisine tag as written in the source (display only)
    #[serde(default, alias = "Rcuisine_x")]
    pub primary_cuisine: Option<String>,

    /// Normalized cuisine tags merged from every source
    #[serde(default)]
    pub cuisines: BTreeSet<String>,

    #[serde(default)]
    pub categorical: BTreeMap<CategoricalAttribute, String>,

    #[serde(default)]
    pub numeric: BTreeMap<NumericAttribute, f64>,

    #[serde(default)]
    pub open_days: DaySet,

    #[serde(default)]
    pub hours: Option<OpeningHours>,

    #[serde(default = "unclustered")]
    pub location_cluster: i32,
}

impl RestaurantRecord {
    pub fn new(place_id: impl Into<PlaceId>, name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            latitude: None,
            longitude: None,
            primary_cuisine: None,
            cuisines: BTreeSet::new(),
            categorical: BTreeMap::new(),
            numeric: BTreeMap::new(),
            open_days: DaySet::empty(),
            hours: None,
            location_cluster: UNCLUSTERED,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Merge a semicolon-delimited cuisine source into the tag set.
    /// The first non-blank tag seen becomes the primary cuisine.
    pub fn with_cuisine_source(mut self, raw: &str) -> Self {
        if self.primary_cuisine.is_none() {
            self.primary_cuisine = raw
                .split(';')
                .map(str::trim)
                .find(|t| !t.is_empty())
                .map(str::to_string);
        }
        self.cuisines.extend(parse_cuisine_tags(raw));
        self
    }

    pub fn with_categorical(mut self, attribute: CategoricalAttribute, value: impl Into<String>) -> Self {
        self.categorical.insert(attribute, value.into());
        self
    }

    pub fn with_numeric(mut self, attribute: NumericAttribute, value: f64) -> Self {
        self.numeric.insert(attribute, value);
        self
    }

    pub fn with_days(mut self, days: &[Weekday]) -> Self {
        for day in days {
            self.open_days.insert(*day);
        }
        self
    }

    pub fn with_hours(mut self, hours: &str) -> Self {
        self.hours = Some(OpeningHours::parse(hours));
        self
    }

    /// Both coordinates, if present and finite
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }

    pub fn categorical(&self, attribute: CategoricalAttribute) -> Option<&str> {
        self.categorical.get(&attribute).map(String::as_str)
    }

    pub fn numeric(&self, attribute: NumericAttribute) -> Option<f64> {
        self.numeric.get(&attribute).copied().filter(|v| v.is_finite())
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.numeric(NumericAttribute::DistanceKm)
    }

    pub fn group_friendly_score(&self) -> Option<f64> {
        self.numeric(NumericAttribute::GroupFriendly)
    }

    pub fn avg_rating(&self) -> Option<f64> {
        self.numeric(NumericAttribute::AvgRating)
    }

    /// Tag lookup against the normalized set; the query is normalized too
    pub fn has_cuisine(&self, cuisine: &str) -> bool {
        normalize_cuisine(cuisine)
            .map(|c| self.cuisines.contains(&c))
            .unwrap_or(false)
    }

    pub fn is_open_during(&self, slot: TimeSlot) -> bool {
        self.hours
            .as_ref()
            .map(|h| h.is_open_during(slot))
            .unwrap_or(false)
    }
}

/// One rating a user gave a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserVisit {
    #[serde(alias = "userID", deserialize_with = "id_string")]
    pub user_id: String,
    #[serde(alias = "placeID")]
    pub place_id: PlaceId,
    pub rating: f64,
}

impl UserVisit {
    pub fn new(user_id: impl Into<String>, place_id: impl Into<PlaceId>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            place_id: place_id.into(),
            rating,
        }
    }
}
