use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    providers::PlaceSource,
    types::{ItineraryStop, PlaceDetail},
};

/// Address component types consulted for a locality label, most specific first
const LABEL_PRIORITY: [&str; 4] = [
    "neighborhood",
    "sublocality",
    "locality",
    "administrative_area_level_2",
];

/// First matching address component, preferring long text over short text
pub fn neighborhood_label(detail: &PlaceDetail) -> Option<String> {
    LABEL_PRIORITY.iter().find_map(|wanted| {
        let component = detail
            .address_components
            .iter()
            .find(|component| component.types.iter().any(|t| t == wanted))?;

        [&component.long_text, &component.short_text]
            .into_iter()
            .flatten()
            .map(|text| text.trim())
            .find(|text| !text.is_empty())
            .map(str::to_string)
    })
}

/// Best-effort: look up every stop's address concurrently and append a
/// locality label to its rationale. Stops whose lookup fails are left as they
/// were. Returns the number of stops that gained a label.
pub async fn enrich_rationale(places: &dyn PlaceSource, stops: &mut [ItineraryStop]) -> usize {
    let ids: Vec<String> = stops.iter().map(|stop| stop.id.clone()).collect();
    let details = join_all(ids.iter().map(|id| places.place_detail(id))).await;

    let mut enriched = 0;
    for (stop, detail) in stops.iter_mut().zip(details) {
        match detail {
            Ok(detail) => {
                if let Some(label) = neighborhood_label(&detail) {
                    stop.append_rationale_label(&label);
                    enriched += 1;
                } else {
                    debug!(target: "day_trip::enricher", place_id = %stop.id, "no locality label");
                }
            }
            Err(err) => {
                warn!(target: "day_trip::enricher", place_id = %stop.id, error = %err, "place detail lookup failed");
            }
        }
    }

    enriched
}
