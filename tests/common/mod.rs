#![allow(dead_code)]

use std::sync::Arc;

use day_trip_rs::{
    providers::InMemoryPlaces,
    types::{AddressComponent, Candidate, Coordinate, PlaceDetail, VenueCategory},
    ItineraryPlanner,
};

pub const MISSION: Coordinate = Coordinate {
    lat: 37.7599,
    lng: -122.4148,
};

pub fn candidate(id: &str, name: &str, rating: Option<f64>, count: Option<u32>) -> Candidate {
    Candidate {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        location: Some(MISSION),
        formatted_address: Some(format!("{name}, San Francisco, CA")),
        website: Some(format!("https://example.com/{id}")),
        rating,
        rating_count: count,
        types: Vec::new(),
    }
}

pub fn neighborhood(label: &str) -> PlaceDetail {
    PlaceDetail {
        address_components: vec![
            AddressComponent {
                long_text: Some("San Francisco".to_string()),
                short_text: Some("SF".to_string()),
                types: vec!["locality".to_string(), "political".to_string()],
            },
            AddressComponent {
                long_text: Some(label.to_string()),
                short_text: None,
                types: vec!["neighborhood".to_string(), "political".to_string()],
            },
        ],
    }
}

/// A directory with a full set of venues around the Mission
pub fn stocked_places() -> InMemoryPlaces {
    InMemoryPlaces::new()
        .with_postal_code("94110", MISSION)
        .with_candidates(
            VenueCategory::Coffee,
            vec![
                candidate("coffee-a", "Ritual Coffee", Some(4.4), Some(1800)),
                candidate("coffee-b", "Four Barrel", Some(4.6), Some(2400)),
            ],
        )
        .with_candidates(
            VenueCategory::Restaurant,
            vec![
                candidate("food-a", "Foreign Cinema", Some(4.5), Some(3100)),
                candidate("food-b", "Flour + Water", Some(4.5), Some(2900)),
            ],
        )
        .with_candidates(
            VenueCategory::Park,
            vec![candidate("park-a", "Dolores Park", Some(4.7), Some(12000))],
        )
        .with_candidates(
            VenueCategory::Museum,
            vec![candidate("museum-a", "Museum of Craft", Some(4.3), Some(300))],
        )
        .with_detail("coffee-b", neighborhood("Mission District"))
        .with_detail("park-a", neighborhood("Mission Dolores"))
        .with_detail("museum-a", neighborhood("Dogpatch"))
        .with_detail("food-a", neighborhood("Mission District"))
}

pub fn planner(places: Arc<InMemoryPlaces>) -> ItineraryPlanner {
    ItineraryPlanner::from_provider(places)
}
