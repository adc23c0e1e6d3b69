//! Place name generation.
//!
//! Names come from character-level Markov chains trained on a word list
//! supplied by the game master, so generated places share the flavor of that
//! list without repeating it verbatim.

pub mod chains;
pub mod corpus;

pub use chains::{MarkovChains, Transition};
pub use corpus::{load_chains, read_words};
