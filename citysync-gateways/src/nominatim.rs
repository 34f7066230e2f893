use std::time::Duration;

use citysync_core::{
    entities::{MapPoint, Url},
    gateways::geocode::{GeoCodingGateway, GeocodingError},
};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "CitySync/1.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Geocoding with the OpenStreetMap search service.
///
/// The usage policy of the public instance requires an identifying
/// user agent and at most one request per second. The latter is
/// enforced by the callers.
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: reqwest::Client,
    base_url: Url,
}

impl Nominatim {
    pub fn new(base_url: Url, user_agent: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", query)
            .append_pair("limit", "1");
        url
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn first_match(places: Vec<Place>) -> Result<Option<MapPoint>, GeocodingError> {
    let Some(Place { lat, lon }) = places.into_iter().next() else {
        return Ok(None);
    };
    MapPoint::parse_lat_lng_deg(&lat, &lon)
        .map(Some)
        .map_err(|err| GeocodingError::InvalidResponse(err.to_string()))
}

async fn match_from_response(
    response: reqwest::Response,
) -> Result<Option<MapPoint>, GeocodingError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GeocodingError::Status(status.as_u16()));
    }
    let places = response
        .json::<Vec<Place>>()
        .await
        .map_err(|err| GeocodingError::InvalidResponse(err.to_string()))?;
    first_match(places)
}

impl GeoCodingGateway for Nominatim {
    async fn resolve_query_lat_lng(
        &self,
        query: &str,
    ) -> Result<Option<MapPoint>, GeocodingError> {
        let url = self.search_url(query);
        log::debug!("Nominatim request: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| GeocodingError::Transport(err.to_string()))?;
        match_from_response(response).await
    }
}
