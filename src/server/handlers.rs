use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info};

use super::AppState;
use crate::{
    error::ItineraryError,
    schemas::parse_request,
    types::ItineraryResponse,
};

impl IntoResponse for ItineraryError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(target: "day_trip::server", code = self.error_code(), "{}", self);
        } else {
            info!(target: "day_trip::server", code = self.error_code(), "{}", self);
        }

        (status, Json(self.to_error_payload())).into_response()
    }
}

pub(super) async fn create_itinerary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ItineraryResponse>, ItineraryError> {
    let request = parse_request(&body)?;

    let planner = state.planner().ok_or_else(|| {
        ItineraryError::Config("PLACES_API_KEY is not configured on this server".to_string())
    })?;

    planner.plan(&request).await.map(Json)
}

pub(super) async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub(super) async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "code": "NOT_FOUND" })),
    )
}
