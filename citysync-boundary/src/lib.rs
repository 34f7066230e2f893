use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "entity-conversions")]
mod conv;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub id: u64,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// An event as delivered by the REST backend.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id                   : u64,
    pub title                : String,
    #[serde(default)]
    pub description          : String,
    /// Id of the category
    pub category             : Option<u64>,
    pub category_name        : Option<String>,
    pub category_slug        : Option<String>,
    pub location             : String,
    pub date                 : String,
    pub image                : Option<String>,
    pub image_url            : Option<String>,
    pub admission            : Option<String>,
    /// An empty string if there is no link.
    pub external_links       : Option<String>,
    /// Id of the contact
    pub contact_info         : Option<u64>,
    pub contact_info_details : Option<ContactInfo>,
    pub created_at           : Option<String>,
}

/// An event placed on the map.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: u64,
    pub title: String,
    pub location: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub location: String,
    #[serde(flatten)]
    pub pos: Coordinate,
}

/// Error response of the REST backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct ApiError {
    pub detail: String,
}
