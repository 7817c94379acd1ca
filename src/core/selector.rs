use std::{cmp::Ordering, collections::HashSet};

use super::fetcher::CandidatePool;
use crate::types::{Candidate, Venue};

const COFFEE_PICKS: usize = 1;
const RESTAURANT_PICKS: usize = 1;
const PARK_PICKS: usize = 1;
const MUSEUM_PICKS: usize = 1;
const ACTIVITY_CAP: usize = 2;

/// Venues chosen for each stop bucket, in stop order within the bucket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub coffee: Vec<Venue>,
    pub activities: Vec<Venue>,
    pub restaurant: Vec<Venue>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.coffee.len() + self.activities.len() + self.restaurant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drop ineligible candidates and order the rest by rating, then rating count.
///
/// The sort is stable, so fully tied venues keep the order the directory
/// returned them in.
pub fn rank(candidates: Vec<Candidate>) -> Vec<Venue> {
    let mut venues: Vec<Venue> = candidates
        .into_iter()
        .filter_map(Candidate::into_venue)
        .collect();
    venues.sort_by(compare_venues);
    venues
}

fn compare_venues(a: &Venue, b: &Venue) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| b.rating_count.cmp(&a.rating_count))
}

/// Pick the fixed-size subset for every bucket.
///
/// Buckets are filled in stop order (coffee, park, museum, restaurant) and a
/// venue already taken by an earlier bucket is skipped in favour of the next
/// ranked one.
pub fn select(pool: CandidatePool) -> Selection {
    let mut seen = HashSet::new();

    let coffee = take_unseen(rank(pool.coffee), COFFEE_PICKS, &mut seen);
    let mut activities = take_unseen(rank(pool.park), PARK_PICKS, &mut seen);
    activities.extend(take_unseen(rank(pool.museum), MUSEUM_PICKS, &mut seen));
    activities.truncate(ACTIVITY_CAP);
    let restaurant = take_unseen(rank(pool.restaurant), RESTAURANT_PICKS, &mut seen);

    Selection {
        coffee,
        activities,
        restaurant,
    }
}

fn take_unseen(ranked: Vec<Venue>, count: usize, seen: &mut HashSet<String>) -> Vec<Venue> {
    ranked
        .into_iter()
        .filter(|venue| seen.insert(venue.id.clone()))
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    fn candidate(id: &str, rating: Option<f64>, count: Option<u32>) -> Candidate {
        Candidate {
            id: Some(id.to_string()),
            name: Some(format!("Venue {id}")),
            location: Some(Coordinate::new(40.0, -73.0)),
            rating,
            rating_count: count,
            ..Default::default()
        }
    }

    fn ids(venues: &[Venue]) -> Vec<&str> {
        venues.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_rank_orders_by_rating_then_count() {
        let ranked = rank(vec![
            candidate("low", Some(3.9), Some(5000)),
            candidate("tied-few", Some(4.5), Some(10)),
            candidate("tied-many", Some(4.5), Some(900)),
            candidate("unrated", None, None),
            candidate("top", Some(4.9), None),
        ]);

        assert_eq!(ids(&ranked), vec!["top", "tied-many", "tied-few", "low", "unrated"]);
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let ranked = rank(vec![
            candidate("first", Some(4.0), Some(100)),
            candidate("second", Some(4.0), Some(100)),
            candidate("third", Some(4.0), Some(100)),
        ]);
        assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_rating_counts_as_zero() {
        let ranked = rank(vec![
            candidate("unrated", None, Some(50)),
            candidate("zero", Some(0.0), Some(60)),
        ]);
        assert_eq!(ids(&ranked), vec!["zero", "unrated"]);
    }

    #[test]
    fn test_ineligible_candidates_are_dropped() {
        let mut no_location = candidate("no-location", Some(5.0), Some(1));
        no_location.location = None;
        let mut no_name = candidate("no-name", Some(5.0), Some(1));
        no_name.name = None;

        let ranked = rank(vec![no_location, no_name, candidate("ok", Some(1.0), None)]);
        assert_eq!(ids(&ranked), vec!["ok"]);
    }

    #[test]
    fn test_select_is_deterministic() {
        let pool = CandidatePool {
            coffee: vec![candidate("c1", Some(4.1), Some(3)), candidate("c2", Some(4.8), Some(1))],
            restaurant: vec![candidate("r1", Some(4.4), Some(20)), candidate("r2", Some(4.4), Some(200))],
            park: vec![candidate("p1", Some(4.7), None)],
            museum: vec![candidate("m1", Some(4.2), Some(9)), candidate("m2", None, None)],
        };

        let first = select(pool.clone());
        for _ in 0..5 {
            assert_eq!(select(pool.clone()), first);
        }

        assert_eq!(ids(&first.coffee), vec!["c2"]);
        assert_eq!(ids(&first.activities), vec!["p1", "m1"]);
        assert_eq!(ids(&first.restaurant), vec!["r2"]);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_venue_used_once_across_buckets() {
        let pool = CandidatePool {
            park: vec![candidate("garden", Some(4.9), Some(10))],
            museum: vec![
                candidate("garden", Some(4.9), Some(10)),
                candidate("gallery", Some(4.0), Some(10)),
            ],
            ..Default::default()
        };

        let selection = select(pool);
        assert_eq!(ids(&selection.activities), vec!["garden", "gallery"]);
    }

    #[test]
    fn test_empty_pool_selects_nothing() {
        let selection = select(CandidatePool::default());
        assert!(selection.is_empty());
    }
}
