//! # citysync-core
//!
//! Use cases for placing CitySync events on a map.
//!
//! External services are only accessed through the traits in [`gateways`].

pub mod gateways;
pub mod geocode_cache;
pub mod resolver;
pub mod usecases;

pub mod entities {
    pub use citysync_entities::{
        category::*, contact::*, event::*, geo::*, id::*, location::*, url::*,
    };
}
