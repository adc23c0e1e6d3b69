//! Rejection sampling of place positions inside a disc.

use rand::Rng;

use crate::geometry::Point;

/// Consecutive rejections allowed per unit of radius before sampling stops.
pub const REJECTIONS_PER_RADIUS_UNIT: usize = 100;

/// Draw a point uniformly inside the disc of `center` and `radius`.
///
/// Candidates are drawn in the bounding square and rejected until one falls
/// inside the disc (about 79% of draws succeed).
pub fn random_point_in_disc(center: Point, radius: f64, rng: &mut impl Rng) -> Point {
    loop {
        let x = center.x - radius + rng.gen::<f64>() * radius * 2.0;
        let y = center.y - radius + rng.gen::<f64>() * radius * 2.0;
        let p = Point::new(x, y);
        if center.distance(&p) <= radius {
            return p;
        }
    }
}

/// Fill a disc with points spaced strictly more than `min_dist` apart.
///
/// A candidate is kept when it is far enough from every point already kept
/// here and from every point in `foreign`. Sampling stops after
/// `radius * 100` consecutive rejections, so the number of points returned is
/// not a function of (radius, min_dist) alone: it depends on the draws. A
/// small or crowded disc may legitimately come back with few or no points.
pub fn generate_points(
    center: Point,
    radius: f64,
    min_dist: f64,
    foreign: &[Point],
    rng: &mut impl Rng,
) -> Vec<Point> {
    let budget = radius as usize * REJECTIONS_PER_RADIUS_UNIT;
    let mut points = Vec::new();
    let mut failures = 0;
    loop {
        failures += 1;
        if failures > budget {
            break;
        }
        let candidate = random_point_in_disc(center, radius, rng);
        if candidate.far_enough(min_dist, foreign) && candidate.far_enough(min_dist, &points) {
            failures = 0;
            points.push(candidate);
        }
    }
    log::info!("{} points generated", points.len());
    points
}
