//! The itinerary pipeline, one stage per module:
//! origin -> fetcher -> selector -> assembler -> enricher -> planner.

pub mod assembler;
pub mod enricher;
pub mod fetcher;
pub mod origin;
pub mod planner;
pub mod selector;

pub use assembler::{assemble_stops, map_url};
pub use enricher::{enrich_rationale, neighborhood_label};
pub use fetcher::{fetch_candidates, miles_to_meters, CandidatePool, DEFAULT_CANDIDATE_LIMIT};
pub use origin::resolve_origin;
pub use planner::{build_response, ItineraryPlanner};
pub use selector::{rank, select, Selection};
