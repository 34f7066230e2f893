use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::sync::watch;

use crate::{
    entities::*,
    gateways::geocode::GeoCodingGateway,
    geocode_cache::GeocodeCache,
    usecases::{self, GeocodingClient},
};

/// What a map currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionState {
    pub locations: Vec<ResolvedLocation>,
    /// Locations are currently being resolved.
    pub in_progress: bool,
}

/// Keeps the resolved locations of the most recent event list.
///
/// Every call of [`LocationResolver::resolve`] starts a new generation.
/// Results are only published while their generation is still the
/// latest one, so a slow, outdated invocation never replaces the
/// result of a newer one.
#[derive(Debug)]
pub struct LocationResolver<G> {
    client: GeocodingClient<G>,
    cache: Arc<GeocodeCache>,
    min_interval: Duration,
    generation: AtomicU64,
    state: watch::Sender<ResolutionState>,
}

impl<G> LocationResolver<G> {
    pub fn new(
        client: GeocodingClient<G>,
        cache: Arc<GeocodeCache>,
        min_interval: Duration,
    ) -> Self {
        let (state, _) = watch::channel(ResolutionState::default());
        Self {
            client,
            cache,
            min_interval,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ResolutionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ResolutionState {
        self.state.borrow().clone()
    }

    pub fn client(&self) -> &GeocodingClient<G> {
        &self.client
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Applies `update` unless a newer invocation has been started.
    ///
    /// `update` reports whether it actually modified the state, and the
    /// returned flag whether the invocation is still the current one.
    fn publish<F>(&self, generation: u64, update: F) -> bool
    where
        F: FnOnce(&mut ResolutionState) -> bool,
    {
        let mut current = false;
        self.state.send_if_modified(|state| {
            if self.is_current(generation) {
                current = true;
                update(state)
            } else {
                false
            }
        });
        current
    }
}

impl<G> LocationResolver<G>
where
    G: GeoCodingGateway,
{
    /// Resolves the locations of `events` and publishes them.
    ///
    /// Once another invocation has been started no further locations
    /// are requested. Returns `None` if the result has been discarded
    /// for that reason.
    pub async fn resolve(&self, events: &[Event]) -> Option<Vec<ResolvedLocation>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if events.is_empty() {
            let current = self.publish(generation, |state| {
                let empty = ResolutionState::default();
                let modified = *state != empty;
                *state = empty;
                modified
            });
            return current.then(Vec::new);
        }
        self.publish(generation, |state| {
            let modified = !state.in_progress;
            state.in_progress = true;
            modified
        });
        let Some(locations) = usecases::resolve_event_locations_while(
            &self.client,
            &self.cache,
            events,
            self.min_interval,
            || self.is_current(generation),
        )
        .await
        else {
            log::debug!("Abandoned resolution of generation {}", generation);
            return None;
        };
        let published = self.publish(generation, |state| {
            *state = ResolutionState {
                locations: locations.clone(),
                in_progress: false,
            };
            true
        });
        if published {
            log::debug!(
                "Published {} resolved location(s) (generation {})",
                locations.len(),
                generation
            );
            Some(locations)
        } else {
            log::debug!("Discarding outdated locations of generation {}", generation);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::{tests::*, DEFAULT_MIN_GEOCODING_INTERVAL};

    fn resolver(gw: MockGeoGw) -> LocationResolver<MockGeoGw> {
        LocationResolver::new(
            GeocodingClient::new(gw, brno()),
            Arc::new(GeocodeCache::new()),
            DEFAULT_MIN_GEOCODING_INTERVAL,
        )
    }

    fn brno_gw() -> MockGeoGw {
        MockGeoGw::default()
            .with_location("Zelný trh", ZELNY_TRH)
            .with_location("Špilberk", SPILBERK)
            .with_location("Vila Tugendhat", VILA_TUGENDHAT)
    }

    fn event_ids(state: &ResolutionState) -> Vec<u64> {
        state
            .locations
            .iter()
            .map(|l| l.event.id.to_u64())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_is_never_in_progress() {
        let resolver = resolver(brno_gw());
        let mut rx = resolver.subscribe();
        let res = resolver.resolve(&[]).await;
        assert_eq!(res, Some(vec![]));
        assert_eq!(resolver.state(), ResolutionState::default());
        // Nothing changed, so nothing was announced
        assert!(!rx.has_changed().unwrap());
        assert_eq!(resolver.client().gateway().call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn publish_resolved_locations() {
        let resolver = resolver(brno_gw());
        let events = vec![
            event(1, "Zelný trh"),
            event(2, "zelný trh "),
            event(3, "Špilberk"),
        ];
        let res = resolver.resolve(&events).await.unwrap();
        assert_eq!(res.len(), 3);
        let state = resolver.state();
        assert!(!state.in_progress);
        assert_eq!(event_ids(&state), vec![1, 2, 3]);
        assert_eq!(state.locations[0].pos, state.locations[1].pos);
        assert_eq!(resolver.client().gateway().call_count(), 2);
        assert_eq!(resolver.cache().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn announce_progress_while_resolving() {
        let resolver = Arc::new(resolver(brno_gw()));
        let mut rx = resolver.subscribe();
        let events = vec![event(1, "Zelný trh"), event(2, "Špilberk")];
        let task = tokio::spawn({
            let resolver = Arc::clone(&resolver);
            async move { resolver.resolve(&events).await }
        });
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().in_progress);
        rx.changed().await.unwrap();
        let state = rx.borrow_and_update().clone();
        assert!(!state.in_progress);
        assert_eq!(event_ids(&state), vec![1, 2]);
        assert!(task.await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_invocation_wins() {
        let resolver = resolver(brno_gw());
        let first = vec![
            event(1, "Zelný trh"),
            event(2, "Špilberk"),
            event(3, "Vila Tugendhat"),
        ];
        let second = vec![event(4, "Náměstí Svobody")];
        let (first_res, second_res) = tokio::join!(resolver.resolve(&first), async {
            // Start while the first invocation is waiting between two requests
            tokio::time::sleep(Duration::from_millis(500)).await;
            resolver.resolve(&second).await
        });
        assert_eq!(first_res, None);
        assert_eq!(second_res.map(|res| res.len()), Some(1));
        let state = resolver.state();
        assert!(!state.in_progress);
        assert_eq!(event_ids(&state), vec![4]);
        assert_eq!(state.locations[0].pos, point(BRNO_CENTER));
    }

    #[tokio::test(start_paused = true)]
    async fn outdated_slow_invocation_does_not_overwrite_newer_result() {
        let resolver = resolver(brno_gw().with_latency(Duration::from_secs(5)));
        resolver
            .cache()
            .put(LocationKey::normalize("Špilberk"), point(SPILBERK));
        let first = vec![event(1, "Zelný trh")];
        let second = vec![event(2, "Špilberk")];
        let (first_res, second_res) = tokio::join!(resolver.resolve(&first), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            // Served from the cache, finishes long before the first one
            resolver.resolve(&second).await
        });
        assert_eq!(first_res, None);
        assert!(second_res.is_some());
        let state = resolver.state();
        assert!(!state.in_progress);
        assert_eq!(event_ids(&state), vec![2]);
        assert_eq!(state.locations[0].pos, point(SPILBERK));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_empty_list_clears_the_map() {
        let resolver = resolver(brno_gw().with_latency(Duration::from_secs(5)));
        let first = vec![event(1, "Vila Tugendhat")];
        let (first_res, second_res) = tokio::join!(resolver.resolve(&first), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            resolver.resolve(&[]).await
        });
        assert_eq!(first_res, None);
        assert_eq!(second_res, Some(vec![]));
        assert_eq!(resolver.state(), ResolutionState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_geocoder_never_breaks_resolution() {
        let resolver = resolver(MockGeoGw::failing());
        let events = vec![event(1, "Zelný trh"), event(2, "Špilberk")];
        let res = resolver.resolve(&events).await.unwrap();
        assert_eq!(res.len(), 2);
        assert!(res.iter().all(|l| l.pos == point(BRNO_CENTER)));
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_invocation_stops_requesting() {
        let resolver = resolver(brno_gw());
        let first = vec![
            event(1, "Zelný trh"),
            event(2, "Špilberk"),
            event(3, "Vila Tugendhat"),
        ];
        let second = vec![event(4, "Náměstí Svobody")];
        let (first_res, _) = tokio::join!(resolver.resolve(&first), async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            resolver.resolve(&second).await
        });
        assert_eq!(first_res, None);
        assert_eq!(
            resolver.client().gateway().calls(),
            vec![
                "Zelný trh, Brno, Czech Republic",
                "Náměstí Svobody, Brno, Czech Republic"
            ]
        );
        assert_eq!(event_ids(&resolver.state()), vec![4]);
    }
}
