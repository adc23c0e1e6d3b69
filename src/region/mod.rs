//! Spatial layout of a universe.
//!
//! A universe is one large, sparse outer region with a handful of small, dense
//! sub-regions inside it. Each region gets points from a rejection sampler and
//! links from a greedy non-crossing edge selector.

pub mod edges;
pub mod hierarchy;
pub mod sampler;

pub use edges::{compute_candidates, select_non_crossing};
pub use hierarchy::{densify_outer, densify_regions, outer_region, place_regions, Region};
pub use sampler::{generate_points, random_point_in_disc};
