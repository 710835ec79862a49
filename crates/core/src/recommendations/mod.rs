//! Event recommendation rules.
//!
//! The engine wraps the immutable catalog and the precomputed city-distance
//! cache and answers four queries for one customer: same-city events,
//! events a fixed number of days before the next birthday, events within a
//! distance budget, and events under a price cap. Callers union the results
//! with [`merge_first_seen`] and hand the merged list to a notifier.

mod engine;

pub use engine::RecommendationEngine;

use std::collections::HashSet;

use crate::domain::event::Event;
use crate::errors::DomainError;

/// Result type for recommendation queries.
pub type RecommendationResult<T> = Result<T, DomainError>;

/// Default cap on ranked query results.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Default birthday-window width in whole days.
pub const DEFAULT_BIRTHDAY_DAYS_BEFORE: u32 = 7;

/// Default Manhattan-distance budget.
pub const DEFAULT_MAX_DISTANCE: u32 = 50;

/// Union of any number of query results: deduplicate by event id, keep the
/// first-seen order across the concatenation. Linear in total input length.
pub fn merge_first_seen<I>(lists: I) -> Vec<Event>
where
    I: IntoIterator<Item = Vec<Event>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for list in lists {
        for event in list {
            if seen.insert(event.id) {
                merged.push(event);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::event::{Event, EventId};

    use super::merge_first_seen;

    fn event(id: u32) -> Event {
        let date = NaiveDate::from_ymd_opt(2023, 12, 1).expect("valid test date");
        Event::new(EventId(id), "Metallica", "Chicago", date)
    }

    #[test]
    fn merge_deduplicates_by_id_and_keeps_first_seen_order() {
        let merged = merge_first_seen([vec![event(1), event(2)], vec![event(2), event(3)]]);

        let ids: Vec<u32> = merged.iter().map(|event| event.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn merge_of_empty_lists_is_empty() {
        assert!(merge_first_seen([Vec::new(), Vec::new()]).is_empty());
    }
}
