use crate::entities::*;

mod error;
mod filter_events;
mod geocode_location;
mod resolve_event_locations;


pub use self::{
    error::Error, filter_events::*, geocode_location::*, resolve_event_locations::*,
};

mod prelude {
    pub use super::{
        error::Error,
        geocode_location::{GeocodingClient, SearchArea},
    };
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::geocode::*, geocode_cache::*};
}

/// Merges the event lists of several requests, keeping the first
/// occurrence of every event id.
pub fn merge_unique_events<I>(lists: I) -> Vec<Event>
where
    I: IntoIterator<Item = Vec<Event>>,
{
    let mut seen = std::collections::HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|event| seen.insert(event.id))
        .collect()
}
