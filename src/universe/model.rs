//! Persisted universe entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Segment};

/// Identifier assigned to a place by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(pub i64);

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Place#{}", self.0)
    }
}

/// Identifier assigned to a wormhole by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WormholeId(pub i64);

impl fmt::Display for WormholeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wormhole#{}", self.0)
    }
}

/// A named location of the universe.
///
/// The universe is flat: a place only has integer (x, y) coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// `None` until the place has been stored.
    pub id: Option<PlaceId>,
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub energy_production: i64,
}

impl Place {
    pub fn new(name: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            x,
            y,
            energy_production: 0,
        }
    }

    /// Name a generated point, truncating its coordinates.
    pub fn from_point(name: impl Into<String>, p: Point) -> Self {
        let (x, y) = grid_coords(p);
        Self::new(name, x, y)
    }

    pub fn coords(&self) -> (i64, i64) {
        (self.x, self.y)
    }
}

/// Integer coordinates of a generated point (truncated toward zero).
pub fn grid_coords(p: Point) -> (i64, i64) {
    (p.x as i64, p.y as i64)
}

/// A directed link from one place to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wormhole {
    /// `None` until the wormhole has been stored.
    pub id: Option<WormholeId>,
    pub source: PlaceId,
    pub destination: PlaceId,
    pub distance: i64,
}

impl Wormhole {
    pub fn new(source: PlaceId, destination: PlaceId, distance: i64) -> Self {
        Self {
            id: None,
            source,
            destination,
            distance,
        }
    }

    /// Link two stored places along `segment`, whose rounded length becomes
    /// the wormhole distance.
    pub fn along(source: PlaceId, destination: PlaceId, segment: &Segment) -> Self {
        Self::new(source, destination, segment.length().round() as i64)
    }
}
