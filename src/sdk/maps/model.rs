use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of a distance that could not be computed.
pub const DISTANCE_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both coordinates are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `lat,lng` as the web services expect it in query strings.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Search radius in metres, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SearchRadius(u32);

impl SearchRadius {
    pub const MIN: u32 = 500;
    pub const MAX: u32 = 5000;
    pub const STEP: u32 = 500;
    pub const DEFAULT: SearchRadius = SearchRadius(1500);

    /// Clamps `meters` into the allowed range.
    pub fn new(meters: u32) -> Self {
        Self(meters.clamp(Self::MIN, Self::MAX))
    }

    pub fn meters(&self) -> u32 {
        self.0
    }

    /// One selector step wider, saturating at `MAX`.
    pub fn widen(&self) -> Self {
        Self::new(self.0.saturating_add(Self::STEP))
    }

    /// One selector step narrower, saturating at `MIN`.
    pub fn narrow(&self) -> Self {
        Self::new(self.0.saturating_sub(Self::STEP))
    }

    /// `"500m"` below a kilometre, `"1.5km"` from there on.
    pub fn label(&self) -> String {
        if self.0 >= 1000 {
            format!("{:.1}km", f64::from(self.0) / 1000.0)
        } else {
            format!("{}m", self.0)
        }
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Charging,
    Parking,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Charging, Category::Parking];

    /// Keyword sent to the places search for this category.
    pub fn keyword(&self) -> &'static str {
        match self {
            Category::Charging => "charging station",
            Category::Parking => "parking",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Charging => "charging",
            Category::Parking => "parking",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningState {
    Open,
    Closed,
}

impl OpeningState {
    pub fn from_open_now(open_now: bool) -> Self {
        if open_now {
            OpeningState::Open
        } else {
            OpeningState::Closed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OpeningState::Open => "Open",
            OpeningState::Closed => "Closed",
        }
    }
}

/// One nearby place as returned by a places search, optionally annotated
/// with the driving distance from the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceResult {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_state: Option<OpeningState>,
    pub distance_text: Option<String>,
}

impl PlaceResult {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            category,
            address: None,
            rating: None,
            user_ratings_total: None,
            opening_state: None,
            distance_text: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Whether the distance lookup for this place has run and failed.
    pub fn distance_unavailable(&self) -> bool {
        self.distance_text.as_deref() == Some(DISTANCE_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_clamped_into_policy_range() {
        assert_eq!(SearchRadius::new(100).meters(), 500);
        assert_eq!(SearchRadius::new(9000).meters(), 5000);
        assert_eq!(SearchRadius::new(2500).meters(), 2500);
        assert_eq!(SearchRadius::default().meters(), 1500);
    }

    #[test]
    fn radius_steps_saturate_at_bounds() {
        assert_eq!(SearchRadius::new(5000).widen().meters(), 5000);
        assert_eq!(SearchRadius::new(500).narrow().meters(), 500);
        assert_eq!(SearchRadius::new(1500).widen().meters(), 2000);
    }

    #[test]
    fn radius_label_switches_to_kilometres() {
        assert_eq!(SearchRadius::new(500).label(), "500m");
        assert_eq!(SearchRadius::new(1000).label(), "1.0km");
        assert_eq!(SearchRadius::new(1500).label(), "1.5km");
    }

    #[test]
    fn position_validity() {
        assert!(Position::new(22.5950, 88.4790).is_valid());
        assert!(!Position::new(91.0, 0.0).is_valid());
        assert!(!Position::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn position_query_format() {
        assert_eq!(Position::new(22.595, 88.479).as_query(), "22.595,88.479");
    }
}
