use serde::Serialize;
use thiserror::Error;

/// A single schema or rule violation on the incoming request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dotted path to the offending field (`zip`, `preferences.adventure`)
    pub path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Main error type for the itinerary pipeline
#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("Invalid request body: {0}")]
    Parse(String),

    #[error("Request validation failed: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Unable to resolve origin: {0}")]
    OriginResolution(String),

    #[error("Places search failed for {category}: {message}")]
    CandidateFetch {
        category: &'static str,
        message: String,
    },

    #[error("No venues found near the requested origin")]
    NoCandidates,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ItineraryError>;

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.path, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ItineraryError {
    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ItineraryError::Parse(_) => "PARSE_ERROR",
            ItineraryError::Validation(_) => "VALIDATION_ERROR",
            ItineraryError::OriginResolution(_) => "ORIGIN_RESOLUTION_ERROR",
            ItineraryError::CandidateFetch { .. } => "CANDIDATE_FETCH_ERROR",
            ItineraryError::NoCandidates => "NO_CANDIDATES",
            ItineraryError::Config(_) => "CONFIG_ERROR",
            ItineraryError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// HTTP status the error surfaces as
    pub fn status_code(&self) -> u16 {
        match self {
            ItineraryError::Parse(_)
            | ItineraryError::Validation(_)
            | ItineraryError::OriginResolution(_) => 400,
            ItineraryError::NoCandidates => 404,
            ItineraryError::CandidateFetch { .. } => 502,
            ItineraryError::Config(_) | ItineraryError::Serialization(_) => 500,
        }
    }

    /// Convert to the JSON error body returned to clients
    pub fn to_error_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "error": self.to_string(),
            "code": self.error_code(),
        });

        if let ItineraryError::Validation(violations) = self {
            payload["error"] = serde_json::json!("Invalid request");
            payload["details"] = serde_json::json!(violations);
        }

        payload
    }
}
