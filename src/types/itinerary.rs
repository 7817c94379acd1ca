use super::request::{Coordinate, SpiceLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of stop in the finished itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Coffee,
    Restaurant,
    Activity,
}

impl StopKind {
    /// Fixed time budget per kind of stop
    pub fn duration_minutes(&self) -> u32 {
        match self {
            StopKind::Coffee => 35,
            StopKind::Restaurant => 75,
            StopKind::Activity => 120,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StopKind::Coffee => "coffee",
            StopKind::Restaurant => "restaurant",
            StopKind::Activity => "activity",
        }
    }
}

/// A finalized itinerary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryStop {
    pub id: String,
    /// 1-based position in the day
    pub order: u32,
    pub kind: StopKind,
    pub name: String,
    pub duration_minutes: u32,
    pub location: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl ItineraryStop {
    /// Attach a locality label to the rationale, keeping any existing text
    pub fn append_rationale_label(&mut self, label: &str) {
        self.rationale = Some(match self.rationale.take() {
            Some(existing) if !existing.is_empty() => format!("{} ({})", existing, label),
            _ => label.to_string(),
        });
    }
}

/// Echo of the request plus generation facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryMeta {
    pub zip: Option<String>,
    pub max_distance_miles: u32,
    pub intents: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub stop_count: usize,
    pub spice: Option<SpiceLevel>,
    pub adventure: Option<u8>,
    pub explain: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub title: String,
    pub summary: String,
    pub total_estimated_hours: f64,
    pub stops: Vec<ItineraryStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryResponse {
    pub meta: ItineraryMeta,
    pub itinerary: Itinerary,
}

/// Sum of stop minutes expressed in hours, rounded to one decimal
pub fn total_hours(stops: &[ItineraryStop]) -> f64 {
    let minutes: u32 = stops.iter().map(|stop| stop.duration_minutes).sum();
    (f64::from(minutes) / 60.0 * 10.0).round() / 10.0
}
