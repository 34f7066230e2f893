use crate::{config::Config, config::ENV_NAME_API_BASE_URL, gateways};
use anyhow::Result;
use citysync_boundary as json;
use citysync_core::{
    entities::{Id, LocationKey, Url},
    geocode_cache::GeocodeCache,
    resolver::LocationResolver,
    usecases::{self, GeocodingClient, SearchArea},
};
use citysync_gateways::events_api::EventsApi;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use time::OffsetDateTime;

#[derive(Debug, Parser)]
#[command(name = "citysync", version, about = "Places CitySync events on a map")]
struct Args {
    /// Configuration file [default: citysync.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the events API
    #[arg(long, value_name = "URL", env = ENV_NAME_API_BASE_URL)]
    api_base_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch events and print their positions
    Resolve {
        /// Only events of this category (repeatable)
        #[arg(long = "category", value_name = "SLUG")]
        categories: Vec<String>,

        /// Only events whose location contains this text
        #[arg(long, value_name = "NEEDLE")]
        city: Option<String>,

        /// Skip past events
        #[arg(long)]
        upcoming: bool,

        /// Order by creation time, latest first
        #[arg(long)]
        recent: bool,
    },
    /// Fetch a single event and print its position
    Event {
        #[arg(value_name = "ID")]
        id: u64,
    },
    /// List the event categories, or show a single one
    Categories {
        #[arg(value_name = "SLUG")]
        slug: Option<String>,
    },
    /// List the contacts of the organizers
    Contacts,
    /// Print the positions of free-text locations
    Geocode {
        #[arg(required = true, value_name = "LOCATION")]
        locations: Vec<String>,
    },
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    let mut cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;
    if let Some(base_url) = args.api_base_url {
        cfg.events_api.base_url = base_url;
    }

    let gateway = gateways::geocoding_gateway(&cfg.geocoding)?;
    let area = SearchArea {
        city: cfg.geocoding.city,
        country: cfg.geocoding.country,
        center: cfg.geocoding.fallback,
    };
    let client = GeocodingClient::new(gateway, area);
    let cache = Arc::new(GeocodeCache::new());
    let min_interval = cfg.geocoding.min_interval;

    match args.command {
        Command::Resolve {
            categories,
            city,
            upcoming,
            recent,
        } => {
            let api = EventsApi::new(cfg.events_api.base_url);
            let mut events = if categories.is_empty() {
                api.fetch_events(None).await?
            } else {
                api.fetch_events_for_categories(&categories).await?
            };
            log::info!("Fetched {} event(s) from {}", events.len(), api.base_url());
            if let Some(city) = city {
                events = usecases::filter_by_city(events, &city);
            }
            if upcoming {
                events = usecases::upcoming_events(events, OffsetDateTime::now_utc());
            }
            if recent {
                usecases::sort_recent_first(&mut events);
            } else {
                usecases::sort_chronologically(&mut events);
            }

            let resolver = LocationResolver::new(client, cache, min_interval);
            let locations = resolver.resolve(&events).await.unwrap_or_default();
            let markers: Vec<json::MapMarker> = locations.into_iter().map(Into::into).collect();
            print_json(&markers)
        }
        Command::Event { id } => {
            let api = EventsApi::new(cfg.events_api.base_url);
            let event = api.fetch_event(Id::new(id)).await?;
            let resolver = LocationResolver::new(client, cache, min_interval);
            let marker = resolver
                .resolve(&[event])
                .await
                .unwrap_or_default()
                .into_iter()
                .next()
                .map(json::MapMarker::from);
            print_json(&marker)
        }
        Command::Categories { slug } => {
            let api = EventsApi::new(cfg.events_api.base_url);
            match slug {
                Some(slug) => {
                    let category = api.fetch_category(&slug).await?;
                    print_json(&json::Category::from(category))
                }
                None => {
                    let categories: Vec<_> = api
                        .fetch_categories()
                        .await?
                        .into_iter()
                        .map(json::Category::from)
                        .collect();
                    print_json(&categories)
                }
            }
        }
        Command::Contacts => {
            let api = EventsApi::new(cfg.events_api.base_url);
            let contacts: Vec<_> = api
                .fetch_contacts()
                .await?
                .into_iter()
                .map(json::ContactInfo::from)
                .collect();
            print_json(&contacts)
        }
        Command::Geocode { locations } => {
            let resolved = usecases::geocode_locations(
                &client,
                &cache,
                locations.iter().map(String::as_str),
                min_interval,
            )
            .await;
            let results: Vec<_> = locations
                .into_iter()
                .filter_map(|location| {
                    let pos = *resolved.get(&LocationKey::normalize(&location))?;
                    Some(json::GeocodedLocation {
                        location,
                        pos: pos.into(),
                    })
                })
                .collect();
            print_json(&results)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_resolve_command() {
        let args = Args::try_parse_from([
            "citysync",
            "--config",
            "brno.toml",
            "resolve",
            "--category",
            "music",
            "--category",
            "art",
            "--city",
            "Brno",
            "--upcoming",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("brno.toml")));
        let Command::Resolve {
            categories,
            city,
            upcoming,
            recent,
        } = args.command
        else {
            panic!("expected the resolve command");
        };
        assert_eq!(categories, vec!["music", "art"]);
        assert_eq!(city.as_deref(), Some("Brno"));
        assert!(upcoming);
        assert!(!recent);
    }

    #[test]
    fn parse_recent_flag() {
        let args = Args::try_parse_from(["citysync", "resolve", "--recent"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Resolve { recent: true, upcoming: false, .. }
        ));
    }

    #[test]
    fn parse_event_command() {
        let args = Args::try_parse_from(["citysync", "event", "42"]).unwrap();
        assert!(matches!(args.command, Command::Event { id: 42 }));
        assert!(Args::try_parse_from(["citysync", "event"]).is_err());
        assert!(Args::try_parse_from(["citysync", "event", "latest"]).is_err());
    }

    #[test]
    fn parse_category_and_contact_commands() {
        let args = Args::try_parse_from(["citysync", "categories"]).unwrap();
        assert!(matches!(args.command, Command::Categories { slug: None }));
        let args = Args::try_parse_from(["citysync", "categories", "music"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Categories { slug: Some(ref slug) } if slug == "music"
        ));
        let args = Args::try_parse_from(["citysync", "contacts"]).unwrap();
        assert!(matches!(args.command, Command::Contacts));
    }

    #[test]
    fn geocode_requires_a_location() {
        assert!(Args::try_parse_from(["citysync", "geocode"]).is_err());
        let args = Args::try_parse_from(["citysync", "geocode", "Zelný trh", "Špilberk"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Geocode { locations } if locations.len() == 2
        ));
    }
}
