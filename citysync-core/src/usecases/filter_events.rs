use super::prelude::*;
use std::cmp::Reverse;
use time::OffsetDateTime;

/// Keeps the events whose location mentions `needle` (case-insensitive).
///
/// A blank needle keeps all events.
pub fn filter_by_city(events: Vec<Event>, needle: &str) -> Vec<Event> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return events;
    }
    events
        .into_iter()
        .filter(|e| e.location.to_lowercase().contains(&needle))
        .collect()
}

/// Keeps the events that start at or after `now`.
///
/// Events with an unreadable date are dropped.
pub fn upcoming_events(events: Vec<Event>, now: OffsetDateTime) -> Vec<Event> {
    events
        .into_iter()
        .filter(|e| e.start().is_some_and(|start| start >= now))
        .collect()
}

/// Earliest events first, events with an unreadable date last.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_cached_key(|e| {
        let start = e.start();
        (start.is_none(), start)
    });
}

/// Latest created events first.
///
/// Events without a creation time follow, ordered by descending id
/// (newer events got higher ids).
pub fn sort_recent_first(events: &mut [Event]) {
    events.sort_by_key(|e| Reverse((e.created_at, e.id)));
}
