use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use tracing::debug;

use super::schema::{request_schema, SchemaHandle};
use crate::{
    error::{FieldViolation, ItineraryError, Result},
    types::ItineraryRequest,
};

/// Decode, validate and deserialize a raw `POST /itinerary` body.
///
/// Schema violations and cross-field rule violations are collected together so
/// the caller sees every problem at once.
pub fn parse_request(raw: &[u8]) -> Result<ItineraryRequest> {
    let text = decode_body(raw)?;
    let payload: Value = serde_json::from_str(&text)
        .map_err(|err| ItineraryError::Parse(format!("malformed JSON: {}", err)))?;

    let mut violations = schema_violations(request_schema()?, &payload);
    violations.extend(rule_violations(&payload));

    if !violations.is_empty() {
        debug!(target: "day_trip::validation", count = violations.len(), "request rejected");
        return Err(ItineraryError::Validation(violations));
    }

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = render_path(&err.path().to_string());
        ItineraryError::Validation(vec![FieldViolation::new(path, err.inner().to_string())])
    })
}

/// Accept plain JSON or a base64-encoded JSON body
pub fn decode_body(raw: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(raw)
        .map_err(|err| ItineraryError::Parse(format!("body is not UTF-8: {}", err)))?;

    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    let decoded = STANDARD
        .decode(trimmed)
        .map_err(|err| ItineraryError::Parse(format!("body is neither JSON nor base64: {}", err)))?;

    String::from_utf8(decoded)
        .map_err(|err| ItineraryError::Parse(format!("decoded body is not UTF-8: {}", err)))
}

fn schema_violations(schema: &SchemaHandle, payload: &Value) -> Vec<FieldViolation> {
    match schema.validator().validate(payload) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|error| {
                FieldViolation::new(render_path(&error.instance_path.to_string()), error.to_string())
            })
            .collect(),
    }
}

fn rule_violations(payload: &Value) -> Vec<FieldViolation> {
    let Some(object) = payload.as_object() else {
        return Vec::new();
    };

    let mut violations = Vec::new();
    let present = |key: &str| object.get(key).map_or(false, |value| !value.is_null());

    if !present("origin") && !present("zip") {
        violations.push(FieldViolation::new(
            "origin",
            "either origin or zip must be provided",
        ));
    }

    if let Some(origin) = object.get("origin").and_then(Value::as_object) {
        let bounded = [("lat", 90.0), ("lng", 180.0)];
        for (axis, limit) in bounded {
            if let Some(degrees) = origin.get(axis).and_then(Value::as_f64) {
                if degrees.abs() > limit {
                    violations.push(FieldViolation::new(
                        format!("origin.{}", axis),
                        format!("{} is outside [-{}, {}]", degrees, limit, limit),
                    ));
                }
            }
        }
    }

    if let Some(intents) = object.get("intents").and_then(Value::as_array) {
        for (idx, intent) in intents.iter().enumerate() {
            if intent.as_str().map_or(false, |text| text.trim().is_empty()) {
                violations.push(FieldViolation::new(
                    format!("intents.{}", idx),
                    "intent must not be empty",
                ));
            }
        }
    }

    violations
}

/// `/preferences/adventure` -> `preferences.adventure`
fn render_path(pointer: &str) -> String {
    let dotted = pointer.trim_start_matches(['/', '.']).replace('/', ".");
    if dotted.is_empty() {
        "<root>".to_string()
    } else {
        dotted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpiceLevel;

    fn violations_of(body: &str) -> Vec<FieldViolation> {
        match parse_request(body.as_bytes()) {
            Err(ItineraryError::Validation(violations)) => violations,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_zip_request() {
        let request = parse_request(br#"{"zip":"94110","explain":true}"#).unwrap();
        assert_eq!(request.zip.as_deref(), Some("94110"));
        assert!(request.explain);
    }

    #[test]
    fn test_four_digit_zip_points_at_zip() {
        let violations = violations_of(r#"{"zip":"1234"}"#);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "zip");
    }

    #[test]
    fn test_all_violations_are_collected() {
        let violations = violations_of(
            r#"{"zip":"abcde","maxDistanceMiles":500,"intents":["a","b","c","d"]}"#,
        );
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"zip"));
        assert!(paths.contains(&"maxDistanceMiles"));
        assert!(paths.contains(&"intents"));
    }

    #[test]
    fn test_missing_origin_and_zip() {
        let violations = violations_of(r#"{"explain":true}"#);
        assert_eq!(violations, vec![FieldViolation::new(
            "origin",
            "either origin or zip must be provided"
        )]);
    }

    #[test]
    fn test_preference_bounds() {
        let violations = violations_of(r#"{"zip":"94110","preferences":{"adventure":11}}"#);
        assert!(violations[0].path.starts_with("preferences"));

        let violations = violations_of(r#"{"zip":"94110","preferences":{"spice":"nuclear"}}"#);
        assert!(violations[0].path.starts_with("preferences"));

        let request =
            parse_request(br#"{"zip":"94110","preferences":{"spice":"medium","adventure":10}}"#)
                .unwrap();
        assert_eq!(request.preferences.spice, Some(SpiceLevel::Medium));
    }

    #[test]
    fn test_zero_distance_is_rejected() {
        let violations = violations_of(r#"{"zip":"94110","maxDistanceMiles":0}"#);
        assert_eq!(violations[0].path, "maxDistanceMiles");
    }

    #[test]
    fn test_origin_out_of_range() {
        let violations = violations_of(r#"{"origin":{"lat":91.0,"lng":10.0}}"#);
        assert_eq!(violations[0].path, "origin.lat");
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = parse_request(br#"{"zip": "94110""#);
        assert!(matches!(result, Err(ItineraryError::Parse(_))));
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let encoded = STANDARD.encode(r#"{"origin":{"lat":40.7,"lng":-74.0}}"#);
        let request = parse_request(encoded.as_bytes()).unwrap();
        assert_eq!(request.origin.unwrap().lat, 40.7);

        assert!(matches!(
            parse_request(b"not base64 at all!"),
            Err(ItineraryError::Parse(_))
        ));
    }

    #[test]
    fn test_render_path() {
        assert_eq!(render_path("/preferences/adventure"), "preferences.adventure");
        assert_eq!(render_path(""), "<root>");
        assert_eq!(render_path("zip"), "zip");
    }
}
