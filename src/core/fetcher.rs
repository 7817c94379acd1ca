use tracing::{debug, warn};

use crate::{
    error::{ItineraryError, Result},
    providers::PlaceSource,
    types::{Candidate, Coordinate, VenueCategory},
};

pub const METERS_PER_MILE: f64 = 1609.344;
/// Candidates kept per category query
pub const DEFAULT_CANDIDATE_LIMIT: usize = 12;

pub fn miles_to_meters(miles: u32) -> u32 {
    (f64::from(miles) * METERS_PER_MILE).round() as u32
}

/// Raw results of the four category queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    pub coffee: Vec<Candidate>,
    pub restaurant: Vec<Candidate>,
    pub park: Vec<Candidate>,
    pub museum: Vec<Candidate>,
}

impl CandidatePool {
    pub fn total(&self) -> usize {
        self.coffee.len() + self.restaurant.len() + self.park.len() + self.museum.len()
    }
}

/// Query every category concurrently.
///
/// All four queries must succeed; the first failure aborts the others and
/// fails the request.
pub async fn fetch_candidates(
    places: &dyn PlaceSource,
    origin: Coordinate,
    radius_meters: u32,
    limit: usize,
) -> Result<CandidatePool> {
    let (coffee, restaurant, park, museum) = tokio::try_join!(
        fetch_category(places, origin, radius_meters, VenueCategory::Coffee, limit),
        fetch_category(places, origin, radius_meters, VenueCategory::Restaurant, limit),
        fetch_category(places, origin, radius_meters, VenueCategory::Park, limit),
        fetch_category(places, origin, radius_meters, VenueCategory::Museum, limit),
    )?;

    Ok(CandidatePool {
        coffee,
        restaurant,
        park,
        museum,
    })
}

async fn fetch_category(
    places: &dyn PlaceSource,
    origin: Coordinate,
    radius_meters: u32,
    category: VenueCategory,
    limit: usize,
) -> Result<Vec<Candidate>> {
    let mut candidates = places
        .search_nearby(origin, radius_meters, category, limit)
        .await
        .map_err(|err| {
            warn!(target: "day_trip::fetcher", category = category.as_str(), error = %err, "search failed");
            ItineraryError::CandidateFetch {
                category: category.as_str(),
                message: err.to_string(),
            }
        })?;

    candidates.truncate(limit);
    debug!(target: "day_trip::fetcher", category = category.as_str(), found = candidates.len(), "candidates fetched");
    Ok(candidates)
}
