use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{Geocoder, PlaceSource, ProviderError};
use crate::{
    error::{ItineraryError, Result},
    types::{AddressComponent, Candidate, Coordinate, PlaceDetail, VenueCategory},
};

pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest radius the nearby search endpoint accepts
const MAX_SEARCH_RADIUS_METERS: u32 = 50_000;
/// Largest page the nearby search endpoint returns
const MAX_RESULT_COUNT: usize = 20;

const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.location,places.formattedAddress,places.websiteUri,places.rating,places.userRatingCount,places.types";
const DETAIL_FIELD_MASK: &str = "addressComponents";

/// Google Maps Platform client: Places API (New) for search and detail,
/// Geocoding API for postal codes.
#[derive(Clone, Debug)]
pub struct GooglePlacesClient {
    api_key: String,
    places_base_url: String,
    geocode_base_url: String,
    client: Client,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ItineraryError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            api_key: api_key.into(),
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            geocode_base_url: DEFAULT_GEOCODE_BASE_URL.to_string(),
            client,
        })
    }

    pub fn with_places_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.places_base_url = base_url.into();
        self
    }

    pub fn with_geocode_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.geocode_base_url = base_url.into();
        self
    }

    fn places_url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.places_base_url.trim_end_matches('/'), path)
    }

    fn places_request(&self, builder: RequestBuilder, field_mask: &str) -> RequestBuilder {
        builder
            .header("X-Goog-Api-Key", self.api_key.as_str())
            .header("X-Goog-FieldMask", field_mask)
    }
}

#[async_trait]
impl Geocoder for GooglePlacesClient {
    async fn geocode(&self, postal_code: &str) -> std::result::Result<Coordinate, ProviderError> {
        let url = format!(
            "{}/maps/api/geocode/json",
            self.geocode_base_url.trim_end_matches('/')
        );
        let components = format!("postal_code:{}|country:US", postal_code);

        let response = self
            .client
            .get(&url)
            .query(&[("components", components.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?;
        let body: GeocodeResponse = read_json(response).await?;

        match body.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(ProviderError::NoResults(postal_code.to_string())),
            other => {
                return Err(ProviderError::Unavailable(format!(
                    "geocoder status {}: {}",
                    other,
                    body.error_message.unwrap_or_default()
                )))
            }
        }

        let location = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoResults(postal_code.to_string()))?
            .geometry
            .and_then(|geometry| geometry.location)
            .ok_or_else(|| ProviderError::Decode("geocode result has no location".to_string()))?;

        match (location.lat, location.lng) {
            (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)),
            _ => Err(ProviderError::Decode(
                "geocode result has non-numeric coordinates".to_string(),
            )),
        }
    }
}

#[async_trait]
impl PlaceSource for GooglePlacesClient {
    async fn search_nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: VenueCategory,
        limit: usize,
    ) -> std::result::Result<Vec<Candidate>, ProviderError> {
        let body = json!({
            "includedTypes": [category.place_type()],
            "maxResultCount": limit.clamp(1, MAX_RESULT_COUNT),
            "locationRestriction": {
                "circle": {
                    "center": { "latitude": origin.lat, "longitude": origin.lng },
                    "radius": f64::from(radius_meters.min(MAX_SEARCH_RADIUS_METERS)),
                }
            }
        });

        debug!(
            target: "day_trip::places",
            category = category.as_str(),
            radius_meters,
            "nearby search"
        );

        let request = self.places_request(
            self.client.post(self.places_url("places:searchNearby")),
            SEARCH_FIELD_MASK,
        );
        let response = request.json(&body).send().await?;
        let parsed: SearchNearbyResponse = read_json(response).await?;

        let mut candidates: Vec<Candidate> =
            parsed.places.into_iter().map(Candidate::from).collect();
        candidates.truncate(limit);
        Ok(candidates)
    }

    async fn place_detail(&self, place_id: &str) -> std::result::Result<PlaceDetail, ProviderError> {
        let encoded: String = url::form_urlencoded::byte_serialize(place_id.as_bytes()).collect();
        let request = self.places_request(
            self.client.get(self.places_url(&format!("places/{}", encoded))),
            DETAIL_FIELD_MASK,
        );
        let response = request.send().await?;
        let parsed: PlaceDetailResponse = read_json(response).await?;

        Ok(PlaceDetail {
            address_components: parsed
                .address_components
                .into_iter()
                .map(|component| AddressComponent {
                    long_text: component.long_text,
                    short_text: component.short_text,
                    types: component.types,
                })
                .collect(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> std::result::Result<T, ProviderError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(|message| message.as_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or(text);
        return Err(ProviderError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|err| ProviderError::Decode(err.to_string()))
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Option<GeocodeGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchNearbyResponse {
    #[serde(default)]
    places: Vec<WirePlace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePlace {
    id: Option<String>,
    display_name: Option<LocalizedText>,
    location: Option<WireLocation>,
    formatted_address: Option<String>,
    website_uri: Option<String>,
    rating: Option<f64>,
    user_rating_count: Option<u32>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl From<WirePlace> for Candidate {
    fn from(place: WirePlace) -> Self {
        let location = place.location.and_then(|loc| match (loc.latitude, loc.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        });

        Candidate {
            id: place.id,
            name: place.display_name.and_then(|name| name.text),
            location,
            formatted_address: place.formatted_address,
            website: place.website_uri,
            rating: place.rating,
            rating_count: place.user_rating_count,
            types: place.types,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceDetailResponse {
    #[serde(default)]
    address_components: Vec<WireAddressComponent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAddressComponent {
    long_text: Option<String>,
    short_text: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_place_conversion() {
        let place: WirePlace = serde_json::from_value(json!({
            "id": "ChIJ123",
            "displayName": { "text": "Sightglass", "languageCode": "en" },
            "location": { "latitude": 37.77, "longitude": -122.41 },
            "rating": 4.6,
            "userRatingCount": 2100,
            "types": ["cafe", "food"]
        }))
        .unwrap();

        let candidate = Candidate::from(place);
        assert_eq!(candidate.name.as_deref(), Some("Sightglass"));
        assert_eq!(candidate.location, Some(Coordinate::new(37.77, -122.41)));
        assert_eq!(candidate.rating_count, Some(2100));
        assert!(candidate.website.is_none());
    }

    #[test]
    fn test_partial_location_is_dropped() {
        let place: WirePlace = serde_json::from_value(json!({
            "id": "ChIJ123",
            "displayName": { "text": "Nowhere" },
            "location": { "latitude": 37.77 }
        }))
        .unwrap();

        assert!(Candidate::from(place).location.is_none());
    }

    #[test]
    fn test_places_url_trims_trailing_slash() {
        let client = GooglePlacesClient::new("key")
            .unwrap()
            .with_places_base_url("http://localhost:1234/");
        assert_eq!(
            client.places_url("places:searchNearby"),
            "http://localhost:1234/v1/places:searchNearby"
        );
    }
}
