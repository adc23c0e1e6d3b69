//! Persistence seam for generated universes.
//!
//! Generation only needs to insert records; the store owns identifiers and
//! uniqueness. [`MemoryStore`] is a complete in-process backend, used by the
//! command-line tool and by tests.

use std::collections::{HashMap, HashSet};

use crate::error::StoreError;

use super::model::{Place, PlaceId, Wormhole, WormholeId};

/// Where generated places and wormholes go.
///
/// Implementations assign identifiers on insert and report violated
/// uniqueness constraints (place name, place coordinates, wormhole endpoints)
/// as [`StoreError::Duplicate`].
pub trait UniverseStore {
    fn insert_place(&mut self, place: &Place) -> Result<PlaceId, StoreError>;

    fn insert_wormhole(&mut self, wormhole: &Wormhole) -> Result<WormholeId, StoreError>;
}

/// In-memory store with auto-increment identifiers starting at 1.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    places: Vec<Place>,
    wormholes: Vec<Wormhole>,
    by_name: HashMap<String, PlaceId>,
    by_coords: HashMap<(i64, i64), PlaceId>,
    links: HashSet<(PlaceId, PlaceId)>,
    next_place: i64,
    next_wormhole: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            places: Vec::new(),
            wormholes: Vec::new(),
            by_name: HashMap::new(),
            by_coords: HashMap::new(),
            links: HashSet::new(),
            next_place: 1,
            next_wormhole: 1,
        }
    }

    /// Run `f` as one atomic unit: if it fails, every insert it made is
    /// discarded and the store is back to its previous contents.
    pub fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            log::warn!("transaction failed, rolling back");
            *self = snapshot;
        }
        result
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn wormholes(&self) -> &[Wormhole] {
        &self.wormholes
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        // Ids are handed out in insertion order
        usize::try_from(id.0 - 1)
            .ok()
            .and_then(|index| self.places.get(index))
    }

    /// Wormholes leaving `source`, in insertion order.
    pub fn wormholes_from(&self, source: PlaceId) -> Vec<&Wormhole> {
        self.wormholes.iter().filter(|w| w.source == source).collect()
    }

    /// The stored place with the most outgoing wormholes, with that count.
    /// Ties go to the place stored first.
    pub fn busiest_place(&self) -> Option<(&Place, usize)> {
        let mut best: Option<(&Place, usize)> = None;
        for place in &self.places {
            let Some(id) = place.id else { continue };
            let degree = self.wormholes_from(id).len();
            if best.map_or(true, |(_, d)| degree > d) {
                best = Some((place, degree));
            }
        }
        best
    }
}

impl UniverseStore for MemoryStore {
    fn insert_place(&mut self, place: &Place) -> Result<PlaceId, StoreError> {
        if self.by_name.contains_key(&place.name) {
            return Err(StoreError::Duplicate(format!("place name {}", place.name)));
        }
        if self.by_coords.contains_key(&place.coords()) {
            return Err(StoreError::Duplicate(format!(
                "place {} at ({}, {})",
                place.name, place.x, place.y
            )));
        }
        let id = PlaceId(self.next_place);
        self.next_place += 1;
        self.by_name.insert(place.name.clone(), id);
        self.by_coords.insert(place.coords(), id);
        self.places.push(Place {
            id: Some(id),
            ..place.clone()
        });
        Ok(id)
    }

    fn insert_wormhole(&mut self, wormhole: &Wormhole) -> Result<WormholeId, StoreError> {
        for end in [wormhole.source, wormhole.destination] {
            if self.place(end).is_none() {
                return Err(StoreError::Backend(format!("unknown place {}", end)));
            }
        }
        let link = (wormhole.source, wormhole.destination);
        if self.links.contains(&link) {
            return Err(StoreError::Duplicate(format!(
                "wormhole from {} to {}",
                wormhole.source, wormhole.destination
            )));
        }
        let id = WormholeId(self.next_wormhole);
        self.next_wormhole += 1;
        self.links.insert(link);
        self.wormholes.push(Wormhole {
            id: Some(id),
            ..wormhole.clone()
        });
        Ok(id)
    }
}
