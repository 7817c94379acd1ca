use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use super::{Geocoder, PlaceSource, ProviderError};
use crate::types::{Candidate, Coordinate, PlaceDetail, VenueCategory};

/// Fixture-backed provider used by tests and offline runs.
///
/// Counts every call so callers can assert how often the pipeline reached out.
#[derive(Debug, Default)]
pub struct InMemoryPlaces {
    postal_codes: HashMap<String, Coordinate>,
    candidates: HashMap<VenueCategory, Vec<Candidate>>,
    details: HashMap<String, PlaceDetail>,
    failing_categories: HashSet<VenueCategory>,
    fail_details: bool,
    geocode_calls: AtomicUsize,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl InMemoryPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_postal_code(mut self, postal_code: &str, coordinate: Coordinate) -> Self {
        self.postal_codes.insert(postal_code.to_string(), coordinate);
        self
    }

    pub fn with_candidates(mut self, category: VenueCategory, candidates: Vec<Candidate>) -> Self {
        self.candidates.insert(category, candidates);
        self
    }

    pub fn with_detail(mut self, place_id: &str, detail: PlaceDetail) -> Self {
        self.details.insert(place_id.to_string(), detail);
        self
    }

    /// Make every search for `category` fail
    pub fn failing_category(mut self, category: VenueCategory) -> Self {
        self.failing_categories.insert(category);
        self
    }

    /// Make every detail lookup fail
    pub fn failing_details(mut self) -> Self {
        self.fail_details = true;
        self
    }

    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for InMemoryPlaces {
    async fn geocode(&self, postal_code: &str) -> Result<Coordinate, ProviderError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        self.postal_codes
            .get(postal_code)
            .copied()
            .ok_or_else(|| ProviderError::NoResults(postal_code.to_string()))
    }
}

#[async_trait]
impl PlaceSource for InMemoryPlaces {
    async fn search_nearby(
        &self,
        _origin: Coordinate,
        _radius_meters: u32,
        category: VenueCategory,
        limit: usize,
    ) -> Result<Vec<Candidate>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_categories.contains(&category) {
            return Err(ProviderError::Unavailable(format!(
                "{} search is down",
                category.as_str()
            )));
        }

        let mut found = self.candidates.get(&category).cloned().unwrap_or_default();
        found.truncate(limit);
        Ok(found)
    }

    async fn place_detail(&self, place_id: &str) -> Result<PlaceDetail, ProviderError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_details {
            return Err(ProviderError::Unavailable("detail lookups are down".to_string()));
        }

        Ok(self.details.get(place_id).cloned().unwrap_or_default())
    }
}
