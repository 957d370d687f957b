use crate::sdk::maps::model::{Category, PlaceResult};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationFilter {
    #[default]
    All,
    Charging,
    Parking,
}

impl LocationFilter {
    pub fn admits(&self, category: Category) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Charging => category == Category::Charging,
            LocationFilter::Parking => category == Category::Parking,
        }
    }
}

impl FromStr for LocationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LocationFilter::All),
            "charging" => Ok(LocationFilter::Charging),
            "parking" => Ok(LocationFilter::Parking),
            other => Err(format!(
                "unknown filter {:?} (expected all, charging or parking)",
                other
            )),
        }
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocationFilter::All => "all",
            LocationFilter::Charging => "charging",
            LocationFilter::Parking => "parking",
        })
    }
}

/// Parses provider distance text such as `"850 m"` or `"1,204 km"` into metres.
pub fn parse_distance_meters(text: &str) -> Option<f64> {
    let text = text.trim();
    let split = text
        .find(|c: char| c.is_alphabetic())
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let value: f64 = number.trim().replace(',', "").parse().ok()?;
    let factor = match unit.trim().to_ascii_lowercase().as_str() {
        "km" => 1000.0,
        "m" | "" => 1.0,
        "mi" => 1609.344,
        "ft" => 0.3048,
        _ => return None,
    };
    Some(value * factor)
}

fn by_distance(a: &PlaceResult, b: &PlaceResult) -> Ordering {
    let da = a.distance_text.as_deref().and_then(parse_distance_meters);
    let db = b.distance_text.as_deref().and_then(parse_distance_meters);
    match (da, db) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Combines both categories into one list, nearest first. Places without a
/// usable distance keep their relative order at the end; `"N/A"` is not
/// read as zero, so a failed lookup never ranks ahead of a measured place.
pub fn merge(stations: &[PlaceResult], parkings: &[PlaceResult]) -> Vec<PlaceResult> {
    let mut combined: Vec<PlaceResult> = stations.iter().chain(parkings).cloned().collect();
    combined.sort_by(by_distance);
    combined
}

/// Link that opens the place in Google Maps.
pub fn maps_url(place_id: &str) -> String {
    format!("https://www.google.com/maps/place/?q=place_id:{}", place_id)
}

/// Category filter plus free-text search over name and address.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    filter: LocationFilter,
    text: String,
}

impl ListQuery {
    pub fn new(filter: LocationFilter, text: &str) -> Self {
        Self {
            filter,
            text: text.trim().to_lowercase(),
        }
    }

    pub fn matches(&self, place: &PlaceResult) -> bool {
        if !self.filter.admits(place.category) {
            return false;
        }
        if self.text.is_empty() {
            return true;
        }
        place.name.to_lowercase().contains(&self.text)
            || place
                .address
                .as_deref()
                .is_some_and(|address| address.to_lowercase().contains(&self.text))
    }

    pub fn apply(&self, places: Vec<PlaceResult>) -> Vec<PlaceResult> {
        places.into_iter().filter(|place| self.matches(place)).collect()
    }
}

/// A row of the result list as handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    #[serde(flatten)]
    pub place: PlaceResult,
    pub maps_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub selected: bool,
}

impl ListEntry {
    pub fn new(place: PlaceResult, selected_id: Option<&str>) -> Self {
        Self {
            maps_url: maps_url(&place.id),
            status: place.opening_state.map(|state| state.label()),
            selected: selected_id == Some(place.id.as_str()),
            place,
        }
    }
}
