//! Procedural universe generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod config;
pub mod error;
pub mod geometry;
pub mod naming;
pub mod region;
pub mod seeds;
pub mod universe;
