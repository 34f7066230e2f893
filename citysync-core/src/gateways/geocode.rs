use std::future::Future;

use citysync_entities::geo::MapPoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Geocoding request failed: {0}")]
    Transport(String),
    #[error("Geocoding service responded with HTTP status {0}")]
    Status(u16),
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

/// Forward geocoding of free-text search queries.
pub trait GeoCodingGateway {
    /// Looks up the best match for `query`.
    ///
    /// Returns `Ok(None)` if the service does not know the place.
    fn resolve_query_lat_lng(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<MapPoint>, GeocodingError>> + Send;
}
