use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{
    assembler::assemble_stops,
    enricher::enrich_rationale,
    fetcher::{fetch_candidates, miles_to_meters, DEFAULT_CANDIDATE_LIMIT},
    origin::resolve_origin,
    selector::select,
};
use crate::{
    error::{ItineraryError, Result},
    providers::{Geocoder, PlaceSource},
    types::{
        total_hours, Coordinate, Itinerary, ItineraryMeta, ItineraryRequest, ItineraryResponse,
        ItineraryStop,
    },
};

/// Upper bound on the whole enrichment phase
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(4);

/// Runs the itinerary pipeline for validated requests
#[derive(Debug, Clone)]
pub struct ItineraryPlanner {
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlaceSource>,
    candidate_limit: usize,
    enrichment_timeout: Duration,
}

impl ItineraryPlanner {
    pub fn new(geocoder: Arc<dyn Geocoder>, places: Arc<dyn PlaceSource>) -> Self {
        Self {
            geocoder,
            places,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// Use one provider for geocoding, search and detail
    pub fn from_provider<P>(provider: Arc<P>) -> Self
    where
        P: Geocoder + PlaceSource + 'static,
    {
        Self::new(provider.clone(), provider)
    }

    pub fn with_candidate_limit(mut self, candidate_limit: usize) -> Self {
        self.candidate_limit = candidate_limit;
        self
    }

    pub fn with_enrichment_timeout(mut self, enrichment_timeout: Duration) -> Self {
        self.enrichment_timeout = enrichment_timeout;
        self
    }

    pub async fn plan(&self, request: &ItineraryRequest) -> Result<ItineraryResponse> {
        let origin = resolve_origin(request, self.geocoder.as_ref()).await?;
        let radius_meters = miles_to_meters(request.max_distance_miles());

        info!(
            target: "day_trip::planner",
            lat = origin.lat,
            lng = origin.lng,
            radius_meters,
            explain = request.explain,
            "planning itinerary"
        );

        let pool = fetch_candidates(
            self.places.as_ref(),
            origin,
            radius_meters,
            self.candidate_limit,
        )
        .await?;
        debug!(target: "day_trip::planner", candidates = pool.total(), "candidates gathered");

        let selection = select(pool);
        let mut stops = assemble_stops(selection, request);

        if request.explain && !stops.is_empty() {
            match timeout(
                self.enrichment_timeout,
                enrich_rationale(self.places.as_ref(), &mut stops),
            )
            .await
            {
                Ok(enriched) => {
                    debug!(target: "day_trip::planner", enriched, "rationale enrichment finished")
                }
                Err(_) => warn!(
                    target: "day_trip::planner",
                    timeout_ms = self.enrichment_timeout.as_millis() as u64,
                    "rationale enrichment timed out"
                ),
            }
        }

        build_response(request, origin, stops, Utc::now())
    }
}

/// Final aggregation step; an empty stop list is a "not found" outcome
pub fn build_response(
    request: &ItineraryRequest,
    origin: Coordinate,
    stops: Vec<ItineraryStop>,
    generated_at: DateTime<Utc>,
) -> Result<ItineraryResponse> {
    if stops.is_empty() {
        return Err(ItineraryError::NoCandidates);
    }

    let meta = ItineraryMeta {
        zip: request.zip.clone(),
        max_distance_miles: request.max_distance_miles(),
        intents: request.intents().to_vec(),
        generated_at,
        stop_count: stops.len(),
        spice: request.preferences.spice,
        adventure: request.preferences.adventure,
        explain: request.explain,
    };

    let itinerary = Itinerary {
        title: title(request, origin),
        summary: summary(request, &stops),
        total_estimated_hours: total_hours(&stops),
        stops,
    };

    info!(
        target: "day_trip::planner",
        stops = meta.stop_count,
        hours = itinerary.total_estimated_hours,
        "itinerary ready"
    );

    Ok(ItineraryResponse { meta, itinerary })
}

fn title(request: &ItineraryRequest, origin: Coordinate) -> String {
    match request.zip.as_deref() {
        Some(zip) => format!("Day trip near {}", zip),
        None => format!("Day trip near {:.3}, {:.3}", origin.lat, origin.lng),
    }
}

fn summary(request: &ItineraryRequest, stops: &[ItineraryStop]) -> String {
    let names: Vec<&str> = stops.iter().map(|stop| stop.name.as_str()).collect();
    let mut summary = format!(
        "{} stops within {} miles: {}.",
        stops.len(),
        request.max_distance_miles(),
        names.join(", then ")
    );

    let intents = request.intents();
    if !intents.is_empty() {
        summary.push_str(&format!(" Planned around {}.", intents.join(", ")));
    }

    summary
}
