//! Random universe generation.
//!
//! Ties the layout (regions, points, segments) to naming and persistence:
//! every point becomes a uniquely named [`Place`], every segment a
//! [`Wormhole`] between the places at its ends, and both go through a
//! [`UniverseStore`]. Generation is a single, sequential batch; the caller is
//! expected to wrap it in one store transaction so a failure leaves nothing
//! behind.
//!
//! # Usage
//!
//! ```ignore
//! use universe_generator::universe::{MemoryStore, Universe};
//!
//! let mut store = MemoryStore::new();
//! let universe = store.transaction(|tx| Universe::generate(&config, &chains, tx, &seeds))?;
//! ```

pub mod export;
pub mod model;
pub mod store;

pub use export::{export_json, write_dot, write_dot_file, DEFAULT_DOT_SCALE};
pub use model::{Place, PlaceId, Wormhole, WormholeId};
pub use store::{MemoryStore, UniverseStore};

use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::UniverseConfig;
use crate::error::UniverseError;
use crate::geometry::Point;
use crate::naming::MarkovChains;
use crate::region::{densify_outer, densify_regions, outer_region, place_regions, Region};
use crate::seeds::UniverseSeeds;

use model::grid_coords;

/// Names drawn for one place before giving up on finding an unused one.
pub const MAX_NAME_ATTEMPTS: usize = 10_000;

/// Counts describing a generated universe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UniverseSummary {
    pub regions: usize,
    pub places: usize,
    pub wormholes: usize,
}

/// A generated universe.
///
/// `outer` and `regions` hold working geometry only while generating; after
/// [`Universe::generate`] returns they keep their centers and radii but no
/// points or segments.
#[derive(Clone, Debug)]
pub struct Universe {
    pub config: UniverseConfig,
    pub outer: Region,
    pub regions: Vec<Region>,
    pub places: Vec<Place>,
    pub wormholes: Vec<Wormhole>,
}

impl Universe {
    /// A universe with its outer region set up and nothing generated yet.
    pub fn empty(config: UniverseConfig) -> Self {
        let outer = outer_region(&config);
        Self {
            config,
            outer,
            regions: Vec::new(),
            places: Vec::new(),
            wormholes: Vec::new(),
        }
    }

    /// Generate a universe and persist it into `store`.
    ///
    /// Layout and naming draw from separate random streams derived from
    /// `seeds`, so the same seeds always give the same universe.
    pub fn generate(
        config: &UniverseConfig,
        names: &MarkovChains,
        store: &mut impl UniverseStore,
        seeds: &UniverseSeeds,
    ) -> Result<Self, UniverseError> {
        let mut layout_rng = ChaCha8Rng::seed_from_u64(seeds.layout);
        let mut name_rng = ChaCha8Rng::seed_from_u64(seeds.names);
        Self::generate_with_rngs(config, names, store, &mut layout_rng, &mut name_rng)
    }

    /// Same as [`Universe::generate`] with caller-supplied random sources.
    pub fn generate_with_rngs(
        config: &UniverseConfig,
        names: &MarkovChains,
        store: &mut impl UniverseStore,
        layout_rng: &mut impl Rng,
        name_rng: &mut impl Rng,
    ) -> Result<Self, UniverseError> {
        let mut universe = Self::empty(config.clone());

        log::info!("computing regions");
        universe.generate_regions(layout_rng)?;

        densify_outer(&mut universe.outer, &universe.regions, config, layout_rng);

        universe.make_places(names, name_rng)?;
        universe.save_places(store)?;
        universe.make_wormholes(store)?;

        universe.cleanup();
        let summary = universe.summary();
        log::info!(
            "universe ready: {} regions, {} places, {} wormholes",
            summary.regions,
            summary.places,
            summary.wormholes
        );
        Ok(universe)
    }

    fn generate_regions(&mut self, rng: &mut impl Rng) -> Result<(), UniverseError> {
        self.regions = place_regions(&self.outer, &self.config.region, rng)?;
        densify_regions(&mut self.regions, &self.config.region, rng);
        Ok(())
    }

    // Outer region first, then sub-regions in creation order.
    fn all_regions(&self) -> impl Iterator<Item = &Region> {
        std::iter::once(&self.outer).chain(self.regions.iter())
    }

    fn make_places(&mut self, names: &MarkovChains, rng: &mut impl Rng) -> Result<(), UniverseError> {
        let points: Vec<Point> = self
            .all_regions()
            .flat_map(|r| r.points.iter().copied())
            .collect();
        let mut used = HashSet::with_capacity(points.len());
        let mut places = Vec::with_capacity(points.len());
        for p in points {
            let name = unique_name(names, &mut used, rng)?;
            places.push(Place::from_point(name, p));
        }
        self.places = places;
        Ok(())
    }

    fn save_places(&mut self, store: &mut impl UniverseStore) -> Result<(), UniverseError> {
        for place in &mut self.places {
            place.id = Some(store.insert_place(place)?);
        }
        log::info!("saved {} places", self.places.len());
        Ok(())
    }

    fn make_wormholes(&mut self, store: &mut impl UniverseStore) -> Result<(), UniverseError> {
        let by_coords: HashMap<(i64, i64), PlaceId> = self
            .places
            .iter()
            .filter_map(|p| p.id.map(|id| (p.coords(), id)))
            .collect();
        let lookup = |p: Point| {
            let (x, y) = grid_coords(p);
            by_coords
                .get(&(x, y))
                .copied()
                .ok_or(UniverseError::UnknownEndpoint { x, y })
        };

        let mut wormholes = Vec::new();
        for segment in self.all_regions().flat_map(|r| r.segments.iter()) {
            let mut wormhole = Wormhole::along(lookup(segment.a)?, lookup(segment.b)?, segment);
            wormhole.id = Some(store.insert_wormhole(&wormhole)?);
            wormholes.push(wormhole);
        }
        log::info!("saved {} wormholes", wormholes.len());
        self.wormholes = wormholes;
        Ok(())
    }

    /// Release the working points and segments of every region.
    pub fn cleanup(&mut self) {
        self.outer.clear();
        for region in &mut self.regions {
            region.clear();
        }
    }

    pub fn summary(&self) -> UniverseSummary {
        UniverseSummary {
            regions: self.regions.len(),
            places: self.places.len(),
            wormholes: self.wormholes.len(),
        }
    }
}

/// Draw names until one is not in `used`, then record it.
pub fn unique_name(
    names: &MarkovChains,
    used: &mut HashSet<String>,
    rng: &mut impl Rng,
) -> Result<String, UniverseError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let name = names.generate(rng);
        if name.is_empty() {
            return Err(UniverseError::EmptyName);
        }
        if used.insert(name.clone()) {
            return Ok(name);
        }
    }
    Err(UniverseError::NamesExhausted {
        attempts: MAX_NAME_ATTEMPTS,
        used: used.len(),
    })
}
