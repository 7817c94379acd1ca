use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use crate::{
    core::ItineraryPlanner,
    error::{ItineraryError, Result},
    providers::{
        google::{DEFAULT_GEOCODE_BASE_URL, DEFAULT_PLACES_BASE_URL},
        GooglePlacesClient,
    },
};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Places/geocoding credential; requests fail with a configuration error without it
    pub api_key: Option<String>,
    pub places_base_url: String,
    pub geocode_base_url: String,
    pub http_timeout: Duration,
    pub bind_addr: SocketAddr,
}

impl Settings {
    /// Load from `PLACES_API_KEY` (or `GOOGLE_MAPS_API_KEY`), `PLACES_BASE_URL`,
    /// `GEOCODE_BASE_URL`, `HTTP_TIMEOUT_SECS` and `BIND_ADDR`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let http_timeout = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|err| {
                ItineraryError::Config(format!("HTTP_TIMEOUT_SECS must be whole seconds: {err}"))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let bind_addr = non_empty("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|err| ItineraryError::Config(format!("BIND_ADDR is invalid: {err}")))?;

        Ok(Self {
            api_key: non_empty("PLACES_API_KEY").or_else(|| non_empty("GOOGLE_MAPS_API_KEY")),
            places_base_url: non_empty("PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
            geocode_base_url: non_empty("GEOCODE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEOCODE_BASE_URL.to_string()),
            http_timeout: Duration::from_secs(http_timeout.max(1)),
            bind_addr,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_http_timeout(mut self, http_timeout: Duration) -> Self {
        self.http_timeout = http_timeout;
        self
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Build the production planner, failing when the credential is absent
    pub fn planner(&self) -> Result<ItineraryPlanner> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ItineraryError::Config(
                "PLACES_API_KEY environment variable must be set to plan itineraries".to_string(),
            )
        })?;

        let client = GooglePlacesClient::with_timeout(api_key, self.http_timeout)?
            .with_places_base_url(self.places_base_url.clone())
            .with_geocode_base_url(self.geocode_base_url.clone());

        Ok(ItineraryPlanner::from_provider(Arc::new(client)).with_enrichment_timeout(self.http_timeout))
    }
}
