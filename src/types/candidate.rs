use super::request::Coordinate;
use serde::{Deserialize, Serialize};

/// Venue categories queried for every itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueCategory {
    Coffee,
    Restaurant,
    Park,
    Museum,
}

impl VenueCategory {
    pub const ALL: [VenueCategory; 4] = [
        VenueCategory::Coffee,
        VenueCategory::Restaurant,
        VenueCategory::Park,
        VenueCategory::Museum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VenueCategory::Coffee => "coffee",
            VenueCategory::Restaurant => "restaurant",
            VenueCategory::Park => "park",
            VenueCategory::Museum => "museum",
        }
    }

    /// Place type understood by the places directory
    pub fn place_type(&self) -> &'static str {
        match self {
            VenueCategory::Coffee => "cafe",
            VenueCategory::Restaurant => "restaurant",
            VenueCategory::Park => "park",
            VenueCategory::Museum => "museum",
        }
    }
}

/// Raw place record as returned by the places directory.
///
/// Every field is optional because the directory does not guarantee any of
/// them; only records with an id, a name and a location can become a [`Venue`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<Coordinate>,
    pub formatted_address: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl Candidate {
    /// Promote to a [`Venue`] when the required fields are present
    pub fn into_venue(self) -> Option<Venue> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let name = self.name.filter(|name| !name.trim().is_empty())?;
        let location = self.location?;

        Some(Venue {
            id,
            name,
            location,
            formatted_address: self.formatted_address,
            website: self.website,
            rating: self.rating.unwrap_or(0.0),
            rating_count: self.rating_count.unwrap_or(0),
            types: self.types,
        })
    }
}

/// A candidate that passed eligibility filtering
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    pub formatted_address: Option<String>,
    pub website: Option<String>,
    pub rating: f64,
    pub rating_count: u32,
    pub types: Vec<String>,
}

/// One entry of a place's structured address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_text: Option<String>,
    pub short_text: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Place detail subset fetched during rationale enrichment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}
