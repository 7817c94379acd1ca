//! External collaborators: geocoding, nearby search and place detail.
//!
//! The pipeline only sees the [`Geocoder`] and [`PlaceSource`] traits. The
//! production implementation talks to Google Maps Platform over HTTP; the
//! in-memory implementation serves fixtures for tests and local runs.

pub mod google;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Candidate, Coordinate, PlaceDetail, VenueCategory};

pub use google::GooglePlacesClient;
pub use memory::InMemoryPlaces;

/// Failure talking to an external collaborator
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} error: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No results for {0}")]
    NoResults(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a postal code to a coordinate
#[async_trait]
pub trait Geocoder: Send + Sync + std::fmt::Debug {
    async fn geocode(&self, postal_code: &str) -> Result<Coordinate, ProviderError>;
}

/// Nearby search and per-place detail lookups
#[async_trait]
pub trait PlaceSource: Send + Sync + std::fmt::Debug {
    /// Up to `limit` candidates of `category` within `radius_meters` of `origin`
    async fn search_nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: VenueCategory,
        limit: usize,
    ) -> Result<Vec<Candidate>, ProviderError>;

    /// Address components for a single place
    async fn place_detail(&self, place_id: &str) -> Result<PlaceDetail, ProviderError>;
}
