//! Seed management for universe generation
//!
//! Layout and naming draw from separate random streams, so one can be varied
//! while the other stays fixed: keep the map and rename every place, or keep
//! the names and move everything around.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for each generation stream, derived from a master seed by default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniverseSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Region centers, place sampling
    pub layout: u64,
    /// Markov name generation
    pub names: u64,
}

impl UniverseSeeds {
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            layout: derive_seed(master, "layout"),
            names: derive_seed(master, "names"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> UniverseSeedsBuilder {
        UniverseSeedsBuilder::new(master)
    }
}

impl Default for UniverseSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

pub struct UniverseSeedsBuilder {
    seeds: UniverseSeeds,
}

impl UniverseSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: UniverseSeeds::from_master(master),
        }
    }

    pub fn layout(mut self, seed: u64) -> Self {
        self.seeds.layout = seed;
        self
    }

    pub fn names(mut self, seed: u64) -> Self {
        self.seeds.names = seed;
        self
    }

    pub fn build(self) -> UniverseSeeds {
        self.seeds
    }
}

fn derive_seed(master: u64, stream: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stream.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for UniverseSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "seeds {{ master: {}, layout: {}, names: {} }}",
            self.master, self.layout, self.names
        )
    }
}
