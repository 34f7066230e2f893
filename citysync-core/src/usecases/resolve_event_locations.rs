use super::prelude::*;
use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

/// Minimum pause between two requests to the geocoding service.
pub const DEFAULT_MIN_GEOCODING_INTERVAL: Duration = Duration::from_millis(1000);

/// Distinct, non-empty locations in order of their first appearance,
/// each paired with its first spelling.
fn unique_locations<'a, I>(locations: I) -> Vec<(LocationKey, &'a str)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    locations
        .into_iter()
        .filter_map(|location| {
            let key = LocationKey::normalize(location);
            (!key.is_empty() && seen.insert(key.clone())).then_some((key, location))
        })
        .collect()
}

/// Looks up free-text locations one after another.
///
/// Every location is requested at most once: equal locations share a
/// single lookup, and locations found in the `cache` are not requested
/// at all. After each request the task pauses for `min_interval`
/// unless it was the last one.
///
/// Empty locations are ignored.
pub async fn geocode_locations<'a, G, I>(
    client: &GeocodingClient<G>,
    cache: &GeocodeCache,
    locations: I,
    min_interval: Duration,
) -> HashMap<LocationKey, MapPoint>
where
    G: GeoCodingGateway,
    I: IntoIterator<Item = &'a str>,
{
    geocode_locations_while(client, cache, locations, min_interval, || true)
        .await
        .unwrap_or_default()
}

/// Like [`geocode_locations`], but gives up as soon as the results
/// are no longer `wanted`.
///
/// `wanted` is asked before every request and after every pause.
/// A request that is already running is not interrupted.
/// Returns `None` if the lookups have been abandoned.
pub async fn geocode_locations_while<'a, G, I, F>(
    client: &GeocodingClient<G>,
    cache: &GeocodeCache,
    locations: I,
    min_interval: Duration,
    wanted: F,
) -> Option<HashMap<LocationKey, MapPoint>>
where
    G: GeoCodingGateway,
    I: IntoIterator<Item = &'a str>,
    F: Fn() -> bool,
{
    let locations = unique_locations(locations);
    let count = locations.len();
    let mut resolved = HashMap::with_capacity(count);
    for (i, (key, text)) in locations.into_iter().enumerate() {
        if let Some(pos) = cache.get(&key) {
            log::debug!("Found location '{}' in cache: {}", key, pos);
            resolved.insert(key, pos);
            continue;
        }
        if !wanted() {
            log::debug!("Abandoning {} pending location(s)", count - i);
            return None;
        }
        let pos = match client.geocode(text).await {
            Ok(pos) => pos,
            Err(err) => {
                log::warn!("Unable to resolve location '{}': {}", text, err);
                continue;
            }
        };
        cache.put(key.clone(), pos);
        resolved.insert(key, pos);
        let is_last = i + 1 == count;
        if !is_last && !min_interval.is_zero() {
            tokio::time::sleep(min_interval).await;
            if !wanted() {
                log::debug!("Abandoning {} pending location(s)", count - i - 1);
                return None;
            }
        }
    }
    Some(resolved)
}

/// Places all events on the map.
///
/// The locations of the events are looked up with [`geocode_locations`].
/// Events without a location text are omitted from the result,
/// the order of the others is preserved.
pub async fn resolve_event_locations<G>(
    client: &GeocodingClient<G>,
    cache: &GeocodeCache,
    events: &[Event],
    min_interval: Duration,
) -> Vec<ResolvedLocation>
where
    G: GeoCodingGateway,
{
    resolve_event_locations_while(client, cache, events, min_interval, || true)
        .await
        .unwrap_or_default()
}

/// Like [`resolve_event_locations`], but stops looking up locations
/// once the result is no longer `wanted` (see [`geocode_locations_while`]).
pub async fn resolve_event_locations_while<G, F>(
    client: &GeocodingClient<G>,
    cache: &GeocodeCache,
    events: &[Event],
    min_interval: Duration,
    wanted: F,
) -> Option<Vec<ResolvedLocation>>
where
    G: GeoCodingGateway,
    F: Fn() -> bool,
{
    if events.is_empty() {
        return Some(vec![]);
    }
    for event in events.iter().filter(|e| e.location.trim().is_empty()) {
        log::warn!("Event {} has no location", event.id);
    }
    log::debug!("Resolving the locations of {} event(s)", events.len());
    let resolved = geocode_locations_while(
        client,
        cache,
        events.iter().map(|e| e.location.as_str()),
        min_interval,
        wanted,
    )
    .await?;
    let locations = events
        .iter()
        .filter_map(|event| {
            let key = LocationKey::normalize(&event.location);
            resolved.get(&key).map(|pos| ResolvedLocation {
                event: event.clone(),
                pos: *pos,
            })
        })
        .collect();
    Some(locations)
}
