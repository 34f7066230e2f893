use anyhow::{anyhow, Context, Result};
use citysync_core::entities::{MapPoint, Url};
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "citysync.toml";

pub const ENV_NAME_API_BASE_URL: &str = "CITYSYNC_API_BASE_URL";

#[derive(Debug)]
pub struct Config {
    pub events_api: EventsApi,
    pub geocoding: Geocoding,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)
                .with_context(|| format!("Invalid configuration file {}", file_path.display()))?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(base_url) = env::var(ENV_NAME_API_BASE_URL) {
            cfg.events_api.base_url = base_url
                .parse()
                .with_context(|| format!("Invalid {ENV_NAME_API_BASE_URL} '{base_url}'"))?;
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct EventsApi {
    pub base_url: Url,
}

#[derive(Debug)]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    pub city: String,
    pub country: String,
    /// Position of locations that cannot be resolved.
    pub fallback: MapPoint,
    pub min_interval: Duration,
}

#[derive(Debug, Clone)]
pub enum GeocodingGateway {
    Nominatim {
        base_url: Url,
        user_agent: String,
        timeout: Duration,
    },
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            events_api,
            geocoding,
            gateway,
        } = from;

        let raw::EventsApi { base_url } = events_api.unwrap_or_default();
        let events_api = EventsApi {
            base_url: base_url
                .parse()
                .with_context(|| format!("Invalid events API base URL '{base_url}'"))?,
        };

        let raw::Geocoding {
            gateway: gateway_name,
            city,
            country,
            fallback_lat,
            fallback_lng,
            min_interval,
        } = geocoding.unwrap_or_default();
        let defaults = raw::Geocoding::default();

        let geo_gateway = match gateway_name.or(defaults.gateway) {
            Some(raw::GeocodingGateway::Nominatim) => {
                let raw::Nominatim {
                    base_url,
                    user_agent,
                    timeout,
                } = gateway
                    .unwrap_or_default()
                    .nominatim
                    .ok_or_else(|| anyhow!("Missing 'nominatim' gateway configuration"))?;
                let nominatim_defaults = raw::Nominatim::default();
                let base_url = base_url
                    .or(nominatim_defaults.base_url)
                    .ok_or_else(|| anyhow!("Missing Nominatim base URL"))?;
                let base_url = base_url
                    .parse()
                    .with_context(|| format!("Invalid Nominatim base URL '{base_url}'"))?;
                let user_agent = user_agent
                    .or(nominatim_defaults.user_agent)
                    .filter(|ua| !ua.trim().is_empty())
                    .ok_or_else(|| anyhow!("Missing Nominatim user agent"))?;
                let timeout = timeout
                    .or(nominatim_defaults.timeout)
                    .ok_or_else(|| anyhow!("Missing Nominatim timeout"))?;
                Some(GeocodingGateway::Nominatim {
                    base_url,
                    user_agent,
                    timeout,
                })
            }
            Some(raw::GeocodingGateway::Disabled) | None => {
                log::info!("Geocoding is disabled");
                None
            }
        };

        let city = city
            .or(defaults.city)
            .ok_or_else(|| anyhow!("Missing geocoding city"))?;
        let country = country
            .or(defaults.country)
            .ok_or_else(|| anyhow!("Missing geocoding country"))?;
        let (lat, lng) = fallback_lat
            .or(defaults.fallback_lat)
            .zip(fallback_lng.or(defaults.fallback_lng))
            .ok_or_else(|| anyhow!("Missing fallback position"))?;
        let fallback = MapPoint::try_from_lat_lng_deg(lat, lng)
            .ok_or_else(|| anyhow!("Invalid fallback position {lat},{lng}"))?;
        let min_interval = min_interval
            .or(defaults.min_interval)
            .ok_or_else(|| anyhow!("Missing minimum geocoding interval"))?;

        let geocoding = Geocoding {
            gateway: geo_gateway,
            city,
            country,
            fallback,
            min_interval,
        };

        Ok(Self {
            events_api,
            geocoding,
        })
    }
}
