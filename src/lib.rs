//! day-trip-rs: deterministic day-trip itineraries from a places directory
//!
//! A request names a starting point (coordinate or US postal code), a radius
//! and a few preferences. The planner queries coffee, restaurant, park and
//! museum venues concurrently, ranks them deterministically, and returns an
//! ordered list of stops with time estimates and optional rationale.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use day_trip_rs::{parse_request, providers::GooglePlacesClient, ItineraryPlanner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("PLACES_API_KEY")?;
//!     let planner = ItineraryPlanner::from_provider(Arc::new(GooglePlacesClient::new(api_key)?));
//!
//!     let request = parse_request(br#"{"zip":"94110","explain":true}"#)?;
//!     let response = planner.plan(&request).await?;
//!     println!("{}", response.itinerary.summary);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod providers;
pub mod schemas;
pub mod server;
pub mod types;

pub use crate::core::ItineraryPlanner;
pub use config::Settings;
pub use error::{FieldViolation, ItineraryError, Result};
pub use providers::{Geocoder, PlaceSource, ProviderError};
pub use schemas::parse_request;
pub use server::{router, AppState};
pub use types::{
    Candidate, Coordinate, ItineraryRequest, ItineraryResponse, ItineraryStop, StopKind,
    VenueCategory,
};

#[cfg(feature = "cli")]
pub mod cli;
