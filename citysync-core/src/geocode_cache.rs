use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use citysync_entities::{geo::MapPoint, location::LocationKey};

/// Process-wide memory of already geocoded locations.
///
/// Entries are never evicted. The cache is meant to be created once
/// and shared between all resolvers of the application.
#[derive(Debug, Default)]
pub struct GeocodeCache {
    entries: RwLock<HashMap<LocationKey, MapPoint>>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &LocationKey) -> Option<MapPoint> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    pub fn put(&self, key: LocationKey, pos: MapPoint) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, pos);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
