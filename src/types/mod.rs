pub mod candidate;
pub mod itinerary;
pub mod request;

pub use candidate::{AddressComponent, Candidate, PlaceDetail, Venue, VenueCategory};
pub use itinerary::{
    total_hours, Itinerary, ItineraryMeta, ItineraryResponse, ItineraryStop, StopKind,
};
pub use request::{
    Coordinate, ItineraryRequest, Preferences, SpiceLevel, DEFAULT_MAX_DISTANCE_MILES,
};
