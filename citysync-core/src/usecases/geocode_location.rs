use super::prelude::*;

/// The metropolitan area all searches are restricted to.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArea {
    pub city: String,
    pub country: String,
    /// Used whenever a location cannot be found.
    pub center: MapPoint,
}

impl SearchArea {
    pub fn qualify(&self, location: &str) -> String {
        format!("{location}, {}, {}", self.city, self.country)
    }
}

/// Resolves single locations through a [`GeoCodingGateway`].
///
/// The client never fails because of the geocoding service:
/// unknown places and service errors yield the center of the area.
/// It is stateless, caching is up to the caller.
#[derive(Debug, Clone)]
pub struct GeocodingClient<G> {
    gateway: G,
    area: SearchArea,
}

impl<G> GeocodingClient<G> {
    pub const fn new(gateway: G, area: SearchArea) -> Self {
        Self { gateway, area }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

impl<G> GeocodingClient<G>
where
    G: GeoCodingGateway,
{
    pub async fn geocode(&self, location: &str) -> Result<MapPoint> {
        if location.trim().is_empty() {
            return Err(Error::EmptyLocation);
        }
        let query = self.area.qualify(location);
        match self.gateway.resolve_query_lat_lng(&query).await {
            Ok(Some(pos)) => {
                log::debug!("Resolved location '{}': {}", query, pos);
                Ok(pos)
            }
            Ok(None) => {
                log::warn!(
                    "No match for location '{}': fall back to {}",
                    query,
                    self.area.center
                );
                Ok(self.area.center)
            }
            Err(err) => {
                log::warn!(
                    "Failed to resolve location '{}': {} (fall back to {})",
                    query,
                    err,
                    self.area.center
                );
                Ok(self.area.center)
            }
        }
    }
}
