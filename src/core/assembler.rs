use super::selector::Selection;
use crate::types::{ItineraryRequest, ItineraryStop, Preferences, StopKind, Venue};

const MAP_URL_PREFIX: &str = "https://maps.google.com/maps/place/?q=place_id:";
/// Adventure scores above this get an adventurous activity rationale
const ADVENTUROUS_SCORE: u8 = 7;

pub fn map_url(place_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(place_id.as_bytes()).collect();
    format!("{}{}", MAP_URL_PREFIX, encoded)
}

/// Turn the selection into ordered stops: coffee, then activities, then the
/// restaurant. Rationale is only written when the request asks for it.
pub fn assemble_stops(selection: Selection, request: &ItineraryRequest) -> Vec<ItineraryStop> {
    let Selection {
        coffee,
        activities,
        restaurant,
    } = selection;

    let ordered = coffee
        .into_iter()
        .map(|venue| (StopKind::Coffee, venue))
        .chain(activities.into_iter().map(|venue| (StopKind::Activity, venue)))
        .chain(restaurant.into_iter().map(|venue| (StopKind::Restaurant, venue)));

    ordered
        .enumerate()
        .map(|(idx, (kind, venue))| build_stop(venue, kind, idx as u32 + 1, request))
        .collect()
}

fn build_stop(venue: Venue, kind: StopKind, order: u32, request: &ItineraryRequest) -> ItineraryStop {
    let rationale = request
        .explain
        .then(|| rationale_for(kind, &venue, &request.preferences));

    ItineraryStop {
        map_url: Some(map_url(&venue.id)),
        id: venue.id,
        order,
        kind,
        name: venue.name,
        duration_minutes: kind.duration_minutes(),
        location: venue.location,
        address: venue.formatted_address,
        website: venue.website,
        tags: venue.types,
        rationale,
    }
}

fn rationale_for(kind: StopKind, venue: &Venue, preferences: &Preferences) -> String {
    let rating = rating_clause(venue);

    match kind {
        StopKind::Coffee => format!(
            "{} is a well-reviewed coffee stop to start the day{}.",
            venue.name, rating
        ),
        StopKind::Activity => match preferences.adventure {
            Some(score) if score > ADVENTUROUS_SCORE => format!(
                "{} suits an adventure score of {}/10{}.",
                venue.name, score, rating
            ),
            _ => format!(
                "{} is an easygoing {} close to your starting point{}.",
                venue.name,
                activity_label(venue),
                rating
            ),
        },
        StopKind::Restaurant => match preferences.spice {
            Some(spice) => format!(
                "{} should satisfy a {} spice preference{}.",
                venue.name,
                spice.as_str(),
                rating
            ),
            None => format!(
                "{} rounds out the day with a well-reviewed meal{}.",
                venue.name, rating
            ),
        },
    }
}

fn rating_clause(venue: &Venue) -> String {
    match (venue.rating > 0.0, venue.rating_count > 0) {
        (true, true) => format!(
            ", rated {:.1} across {} reviews",
            venue.rating, venue.rating_count
        ),
        (true, false) => format!(", rated {:.1}", venue.rating),
        _ => String::new(),
    }
}

fn activity_label(venue: &Venue) -> &'static str {
    if venue.types.iter().any(|t| t == "museum") {
        "museum visit"
    } else if venue.types.iter().any(|t| t == "park") {
        "park visit"
    } else {
        "activity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinate, SpiceLevel};

    fn venue(id: &str, types: &[&str]) -> Venue {
        Venue {
            id: id.to_string(),
            name: format!("Venue {id}"),
            location: Coordinate::new(37.0, -122.0),
            formatted_address: Some("1 Main St".to_string()),
            website: None,
            rating: 4.5,
            rating_count: 120,
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn selection() -> Selection {
        Selection {
            coffee: vec![venue("c", &["cafe"])],
            activities: vec![venue("p", &["park"]), venue("m", &["museum"])],
            restaurant: vec![venue("r", &["restaurant"])],
        }
    }

    #[test]
    fn test_stop_order_and_durations() {
        let stops = assemble_stops(selection(), &ItineraryRequest::default());

        let summary: Vec<(u32, StopKind, u32)> = stops
            .iter()
            .map(|s| (s.order, s.kind, s.duration_minutes))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, StopKind::Coffee, 35),
                (2, StopKind::Activity, 120),
                (3, StopKind::Activity, 120),
                (4, StopKind::Restaurant, 75),
            ]
        );
        assert_eq!(stops[0].address.as_deref(), Some("1 Main St"));
        assert_eq!(stops[1].tags, vec!["park".to_string()]);
    }

    #[test]
    fn test_no_rationale_without_explain() {
        let stops = assemble_stops(selection(), &ItineraryRequest::default());
        assert!(stops.iter().all(|stop| stop.rationale.is_none()));
    }

    #[test]
    fn test_rationale_reflects_preferences() {
        let request = ItineraryRequest {
            explain: true,
            preferences: Preferences {
                spice: Some(SpiceLevel::Hot),
                adventure: Some(9),
            },
            ..Default::default()
        };
        let stops = assemble_stops(selection(), &request);

        assert!(stops.iter().all(|s| !s.rationale.as_deref().unwrap_or("").is_empty()));
        assert!(stops[1].rationale.as_deref().unwrap().contains("9/10"));
        assert!(stops[3].rationale.as_deref().unwrap().contains("hot"));
        assert!(stops[0].rationale.as_deref().unwrap().contains("rated 4.5 across 120 reviews"));
    }

    #[test]
    fn test_calm_adventure_score_is_not_mentioned() {
        let request = ItineraryRequest {
            explain: true,
            preferences: Preferences {
                spice: None,
                adventure: Some(7),
            },
            ..Default::default()
        };
        let stops = assemble_stops(selection(), &request);
        let activity = stops[2].rationale.as_deref().unwrap();
        assert!(!activity.contains("/10"));
        assert!(activity.contains("museum visit"));
    }

    #[test]
    fn test_map_url_encodes_place_id() {
        assert_eq!(
            map_url("ChIJ a/b"),
            "https://maps.google.com/maps/place/?q=place_id:ChIJ+a%2Fb"
        );
        assert_eq!(
            map_url("ChIJN1t_tDeuEmsRUsoyG83frY4"),
            "https://maps.google.com/maps/place/?q=place_id:ChIJN1t_tDeuEmsRUsoyG83frY4"
        );
    }
}
