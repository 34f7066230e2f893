//! HTTP adapters of the CitySync use cases.

pub mod events_api;
pub mod nominatim;
