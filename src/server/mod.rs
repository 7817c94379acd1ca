//! HTTP surface: `POST /itinerary`, its CORS preflight, and a health probe.

mod handlers;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::warn;

use crate::{config::Settings, core::ItineraryPlanner, error::Result};

pub const ITINERARY_PATH: &str = "/itinerary";
pub const HEALTH_PATH: &str = "/health";

/// Shared per-process state; holds no per-request data
#[derive(Debug, Clone, Default)]
pub struct AppState {
    planner: Option<Arc<ItineraryPlanner>>,
}

impl AppState {
    pub fn new(planner: ItineraryPlanner) -> Self {
        Self {
            planner: Some(Arc::new(planner)),
        }
    }

    /// State without a credential; itinerary requests answer with a configuration error
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.api_key.is_none() {
            warn!(target: "day_trip::server", "PLACES_API_KEY is not set; itinerary requests will fail");
            return Ok(Self::unconfigured());
        }
        Ok(Self::new(settings.planner()?))
    }

    pub(crate) fn planner(&self) -> Option<&ItineraryPlanner> {
        self.planner.as_deref()
    }
}

/// Build the router; every response carries permissive CORS headers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            ITINERARY_PATH,
            post(handlers::create_itinerary).options(handlers::preflight),
        )
        .route(HEALTH_PATH, get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("OPTIONS,POST"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        ))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(target: "day_trip::server", addr = %settings.bind_addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
