use std::{borrow::Borrow, fmt};

use crate::{event::*, geo::*};

/// Normalized free-text location: lower case without surrounding whitespace.
///
/// Two location texts that only differ in letter case or in leading and
/// trailing whitespace map onto the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn normalize(location: &str) -> Self {
        Self(location.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LocationKey {
    fn from(from: &str) -> Self {
        Self::normalize(from)
    }
}

impl From<&String> for LocationKey {
    fn from(from: &String) -> Self {
        Self::normalize(from)
    }
}

impl AsRef<str> for LocationKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for LocationKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_str())
    }
}

/// An event pinned to a position on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub event: Event,
    pub pos: MapPoint,
}

impl ResolvedLocation {
    pub fn lat(&self) -> f64 {
        self.pos.lat().to_deg()
    }

    pub fn lng(&self) -> f64 {
        self.pos.lng().to_deg()
    }
}
