//! Wormhole candidates and non-crossing selection.

use crate::geometry::{Point, Segment};

/// Every ordered pair (a, b) with `a` in `sources`, `b` in `destinations`,
/// `a != b` and `distance(a, b) <= max_len`.
///
/// The result is sorted by endpoint coordinates and free of duplicates, which
/// fixes the order in which [`select_non_crossing`] considers candidates. Pairs
/// are directed: to get both directions between two points, both must be in
/// `sources` and in `destinations`.
pub fn compute_candidates(sources: &[Point], destinations: &[Point], max_len: f64) -> Vec<Segment> {
    let mut candidates = Vec::new();
    for a in sources {
        for b in destinations {
            if a == b {
                continue;
            }
            if a.distance(b) <= max_len {
                candidates.push(Segment::new(*a, *b));
            }
        }
    }
    candidates.sort_by(|s1, s2| s1.total_cmp(s2));
    candidates.dedup();
    log::info!("{} potential segments", candidates.len());
    candidates
}

/// Greedily keep the candidates that cross neither an edge in `existing` nor
/// an edge kept earlier in this pass.
///
/// Edges that only share an endpoint do not cross, so a pair of opposite
/// directions between the same two points is always kept together.
pub fn select_non_crossing(candidates: &[Segment], existing: &[Segment]) -> Vec<Segment> {
    let mut selected: Vec<Segment> = Vec::new();
    for candidate in candidates {
        if candidate.intersects_any(existing) || candidate.intersects_any(&selected) {
            continue;
        }
        selected.push(*candidate);
    }
    log::info!("generated {} segments", selected.len());
    selected
}
