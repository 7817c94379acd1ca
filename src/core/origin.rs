use tracing::debug;

use crate::{
    error::{ItineraryError, Result},
    providers::Geocoder,
    types::{Coordinate, ItineraryRequest},
};

/// Resolve the request's starting point.
///
/// An explicit coordinate always wins and never touches the geocoder. A postal
/// code is geocoded exactly once; any failure is terminal for the request.
pub async fn resolve_origin(request: &ItineraryRequest, geocoder: &dyn Geocoder) -> Result<Coordinate> {
    if let Some(origin) = request.origin {
        return Ok(origin);
    }

    let Some(zip) = request.zip.as_deref() else {
        return Err(ItineraryError::OriginResolution(
            "no origin or postal code provided".to_string(),
        ));
    };

    let coordinate = geocoder
        .geocode(zip)
        .await
        .map_err(|err| ItineraryError::OriginResolution(format!("postal code {}: {}", zip, err)))?;

    debug!(target: "day_trip::origin", zip, lat = coordinate.lat, lng = coordinate.lng, "geocoded");
    Ok(coordinate)
}
