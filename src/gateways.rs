use crate::config;
use anyhow::Result;
use citysync_core::{
    entities::MapPoint,
    gateways::geocode::{GeoCodingGateway, GeocodingError},
};
use citysync_gateways::nominatim::Nominatim;

pub fn geocoding_gateway(cfg: &config::Geocoding) -> Result<GeocodingGw> {
    match &cfg.gateway {
        Some(config::GeocodingGateway::Nominatim {
            base_url,
            user_agent,
            timeout,
        }) => {
            log::info!("Use Nominatim geocoding gateway ({})", base_url);
            let gw = Nominatim::new(base_url.clone(), user_agent, *timeout)?;
            Ok(GeocodingGw::Nominatim(gw))
        }
        None => {
            log::warn!("Geocoding is disabled: use the fallback position");
            Ok(GeocodingGw::Dummy(DummyGeoGw))
        }
    }
}

#[derive(Debug)]
pub struct DummyGeoGw;

impl GeoCodingGateway for DummyGeoGw {
    async fn resolve_query_lat_lng(
        &self,
        query: &str,
    ) -> Result<Option<MapPoint>, GeocodingError> {
        log::debug!(
            "Cannot resolve '{}' because no geocoding gateway was configured",
            query
        );
        Ok(None)
    }
}

#[derive(Debug)]
pub enum GeocodingGw {
    Nominatim(Nominatim),
    Dummy(DummyGeoGw),
}

impl GeoCodingGateway for GeocodingGw {
    async fn resolve_query_lat_lng(
        &self,
        query: &str,
    ) -> Result<Option<MapPoint>, GeocodingError> {
        match self {
            Self::Nominatim(gw) => gw.resolve_query_lat_lng(query).await,
            Self::Dummy(gw) => gw.resolve_query_lat_lng(query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn geocoding_cfg(gateway: Option<config::GeocodingGateway>) -> config::Geocoding {
        config::Geocoding {
            gateway,
            city: "Brno".into(),
            country: "Czech Republic".into(),
            fallback: MapPoint::try_from_lat_lng_deg(49.1951, 16.6068).unwrap(),
            min_interval: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn dummy_gateway_never_finds_anything() {
        let gw = geocoding_gateway(&geocoding_cfg(None)).unwrap();
        assert!(matches!(gw, GeocodingGw::Dummy(_)));
        let res = gw.resolve_query_lat_lng("Špilberk, Brno, Czech Republic").await;
        assert!(matches!(res, Ok(None)));
    }

    #[test]
    fn create_nominatim_gateway() {
        let gw = geocoding_gateway(&geocoding_cfg(Some(config::GeocodingGateway::Nominatim {
            base_url: "https://nominatim.openstreetmap.org/search".parse().unwrap(),
            user_agent: "CitySync/1.0".into(),
            timeout: Duration::from_secs(30),
        })))
        .unwrap();
        assert!(matches!(gw, GeocodingGw::Nominatim(_)));
    }
}
