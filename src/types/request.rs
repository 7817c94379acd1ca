use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Miles used when the request does not specify a maximum distance
pub const DEFAULT_MAX_DISTANCE_MILES: u32 = 10;

/// Incoming "build me a day trip" request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    /// Explicit starting coordinate; skips geocoding when present
    #[serde(default)]
    pub origin: Option<Coordinate>,
    /// Five-digit US postal code, geocoded when no origin is given
    #[serde(default)]
    #[schemars(regex(pattern = r"^\d{5}$"))]
    pub zip: Option<String>,
    /// Search radius in miles
    #[serde(default)]
    #[schemars(range(min = 1, max = 100))]
    pub max_distance_miles: Option<u32>,
    /// Free-form intent tags ("date night", "rainy day")
    #[serde(default)]
    #[schemars(length(max = 3))]
    pub intents: Option<Vec<String>>,
    #[serde(default)]
    pub preferences: Preferences,
    /// Attach rationale text to every stop
    #[serde(default)]
    pub explain: bool,
}

impl ItineraryRequest {
    pub fn max_distance_miles(&self) -> u32 {
        self.max_distance_miles.unwrap_or(DEFAULT_MAX_DISTANCE_MILES)
    }

    pub fn intents(&self) -> &[String] {
        self.intents.as_deref().unwrap_or_default()
    }
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Optional taste preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Preferences {
    #[serde(default)]
    pub spice: Option<SpiceLevel>,
    /// 1 (gentle) to 10 (daring)
    #[serde(default)]
    #[schemars(range(min = 1, max = 10))]
    pub adventure: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
}

impl SpiceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_apply_when_fields_absent() {
        let request: ItineraryRequest = serde_json::from_value(json!({ "zip": "94110" })).unwrap();
        assert_eq!(request.max_distance_miles(), DEFAULT_MAX_DISTANCE_MILES);
        assert!(request.intents().is_empty());
        assert!(!request.explain);
        assert_eq!(request.preferences, Preferences::default());
    }

    #[test]
    fn test_camel_case_fields() {
        let request: ItineraryRequest = serde_json::from_value(json!({
            "origin": { "lat": 37.76, "lng": -122.42 },
            "maxDistanceMiles": 30,
            "intents": ["coffee crawl"],
            "preferences": { "spice": "hot", "adventure": 8 },
            "explain": true
        }))
        .unwrap();

        assert_eq!(request.origin, Some(Coordinate::new(37.76, -122.42)));
        assert_eq!(request.max_distance_miles(), 30);
        assert_eq!(request.intents()[0], "coffee crawl");
        assert_eq!(request.preferences.spice, Some(SpiceLevel::Hot));
        assert_eq!(request.preferences.adventure, Some(8));
    }
}
