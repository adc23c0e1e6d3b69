//! Outer region and dense sub-regions.
//!
//! Sub-regions are placed first and densified in creation order, each one
//! avoiding the points of those before it and allowed to link back to them.
//! The outer region is filled last, around all sub-region points, and may
//! link into any of them.

use rand::Rng;

use crate::config::{RegionConfig, UniverseConfig};
use crate::error::UniverseError;
use crate::geometry::{Point, Segment};

use super::edges::{compute_candidates, select_non_crossing};
use super::sampler::{generate_points, random_point_in_disc};

/// Lower bound on candidate centers drawn per requested sub-region.
pub const MIN_CENTER_ATTEMPTS: usize = 1000;
/// Candidate centers drawn per requested sub-region, per unit of area ratio.
pub const CENTER_ATTEMPTS_PER_AREA_RATIO: usize = 100;

/// A circular area and the working geometry generated inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub center: Point,
    pub radius: f64,
    pub points: Vec<Point>,
    pub segments: Vec<Segment>,
}

impl Region {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            points: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Sample this region's points, avoiding `foreign`.
    pub fn generate_points(&mut self, min_dist: f64, foreign: &[Point], rng: &mut impl Rng) {
        self.points = generate_points(self.center, self.radius, min_dist, foreign, rng);
    }

    /// Link this region's points to each other and to `foreign`, without
    /// crossing `existing`.
    pub fn generate_segments(&mut self, max_len: f64, foreign: &[Point], existing: &[Segment]) {
        let destinations: Vec<Point> = self.points.iter().chain(foreign).copied().collect();
        let candidates = compute_candidates(&self.points, &destinations, max_len);
        self.segments = select_non_crossing(&candidates, existing);
    }

    /// Drop the working geometry.
    pub fn clear(&mut self) {
        self.points = Vec::new();
        self.segments = Vec::new();
    }
}

/// How many candidate centers may be drawn for each requested sub-region.
pub fn center_attempt_budget(outer_radius: f64, region_radius: f64) -> usize {
    let ratio = (outer_radius / region_radius).powi(2).ceil();
    let scaled = if ratio.is_finite() {
        (ratio as usize).saturating_mul(CENTER_ATTEMPTS_PER_AREA_RATIO)
    } else {
        0
    };
    scaled.max(MIN_CENTER_ATTEMPTS)
}

/// Place `config.count` sub-region centers inside `outer`, each farther than
/// twice the sub-region radius from every other center.
///
/// A sub-region never reaches below x = 0 or y = 0. Place coordinates are
/// truncated toward zero, which only behaves like a floor on non-negative
/// values.
///
/// Packing discs is not always possible; after the attempt budget for one
/// region runs out the configuration is reported as infeasible.
pub fn place_regions(
    outer: &Region,
    config: &RegionConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Region>, UniverseError> {
    let budget = center_attempt_budget(outer.radius, config.radius);
    let mut regions: Vec<Region> = Vec::with_capacity(config.count);
    let mut attempts = 0;
    while regions.len() < config.count {
        let mut placed = false;
        for _ in 0..budget {
            attempts += 1;
            let center = random_point_in_disc(outer.center, outer.radius, rng);
            if !in_positive_quadrant(center, config.radius) {
                continue;
            }
            let clear = regions
                .iter()
                .all(|r| r.center.distance(&center) > r.radius * 2.0);
            if clear {
                regions.push(Region::new(center, config.radius));
                placed = true;
                break;
            }
        }
        if !placed {
            return Err(UniverseError::InfeasibleRegions {
                placed: regions.len(),
                requested: config.count,
                attempts,
            });
        }
    }
    Ok(regions)
}

fn in_positive_quadrant(center: Point, radius: f64) -> bool {
    center.x - radius >= 0.0 && center.y - radius >= 0.0
}

/// Fill sub-regions in order. Each one avoids and may link to the points of
/// the sub-regions before it, and its links may not cross theirs.
pub fn densify_regions(regions: &mut [Region], config: &RegionConfig, rng: &mut impl Rng) {
    let mut points: Vec<Point> = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();
    for region in regions.iter_mut() {
        log::info!(
            "region [{:.1}, {:.1}] r{:.1}",
            region.center.x,
            region.center.y,
            region.radius
        );
        region.generate_points(config.min_place_dist, &points, rng);
        region.generate_segments(config.max_way_length, &points, &segments);
        points.extend_from_slice(&region.points);
        segments.extend_from_slice(&region.segments);
    }
}

/// Fill the outer region around the sub-regions and link it to them.
pub fn densify_outer(outer: &mut Region, regions: &[Region], config: &UniverseConfig, rng: &mut impl Rng) {
    let foreign: Vec<Point> = regions.iter().flat_map(|r| r.points.iter().copied()).collect();
    let existing: Vec<Segment> = regions.iter().flat_map(|r| r.segments.iter().copied()).collect();

    log::info!(
        "generating places at least {} apart",
        config.min_place_dist as i64
    );
    outer.generate_points(config.min_place_dist, &foreign, rng);

    log::info!("computing ways");
    outer.generate_segments(config.max_way_length, &foreign, &existing);
}

/// The outer region of a universe, centered so every coordinate is positive.
pub fn outer_region(config: &UniverseConfig) -> Region {
    Region::new(Point::new(config.radius, config.radius), config.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn region_config(count: usize) -> RegionConfig {
        RegionConfig {
            count,
            radius: 15.0,
            min_place_dist: 3.0,
            max_way_length: 8.0,
        }
    }

    #[test]
    fn test_regions_are_spread_apart() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let outer = Region::new(Point::new(100.0, 100.0), 100.0);
        let regions = place_regions(&outer, &region_config(4), &mut rng).unwrap();
        assert_eq!(regions.len(), 4);
        for (i, r1) in regions.iter().enumerate() {
            assert!(outer.center.distance(&r1.center) <= outer.radius);
            assert!(r1.center.x >= r1.radius && r1.center.y >= r1.radius);
            for r2 in &regions[i + 1..] {
                assert!(r1.center.distance(&r2.center) > 30.0);
            }
        }
    }

    #[test]
    fn test_infeasible_regions_fail() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let outer = Region::new(Point::new(100.0, 100.0), 100.0);
        // One fits; a second would need a center 180 away
        let config = RegionConfig {
            count: 2,
            radius: 90.0,
            ..region_config(2)
        };
        let err = place_regions(&outer, &config, &mut rng).unwrap_err();
        match err {
            UniverseError::InfeasibleRegions { placed, requested, attempts } => {
                assert_eq!(placed, 1);
                assert_eq!(requested, 2);
                assert!(attempts > MIN_CENTER_ATTEMPTS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_regions_never_reach_negative_coordinates() {
        // Large sub-regions in a small universe: most draws land too close to an axis
        let config = RegionConfig {
            count: 2,
            radius: 20.0,
            min_place_dist: 1.5,
            max_way_length: 3.0,
        };
        let outer = Region::new(Point::new(30.0, 30.0), 30.0);
        for seed in 0..40 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let Ok(mut regions) = place_regions(&outer, &config, &mut rng) else {
                continue;
            };
            densify_regions(&mut regions, &config, &mut rng);
            for region in &regions {
                assert!(region.center.x - region.radius >= 0.0);
                assert!(region.center.y - region.radius >= 0.0);
                assert!(region.points.iter().all(|p| p.x >= 0.0 && p.y >= 0.0));
            }
        }
    }

    #[test]
    fn test_region_wider_than_universe_is_infeasible() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outer = Region::new(Point::new(10.0, 10.0), 10.0);
        let config = RegionConfig {
            count: 1,
            radius: 25.0,
            ..region_config(1)
        };
        let err = place_regions(&outer, &config, &mut rng).unwrap_err();
        assert!(matches!(err, UniverseError::InfeasibleRegions { placed: 0, .. }));
    }

    #[test]
    fn test_zero_regions() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let outer = Region::new(Point::new(10.0, 10.0), 10.0);
        let regions = place_regions(&outer, &region_config(0), &mut rng).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_attempt_budget_scales_with_area() {
        assert_eq!(center_attempt_budget(10.0, 10.0), MIN_CENTER_ATTEMPTS);
        assert_eq!(center_attempt_budget(1000.0, 100.0), 100 * CENTER_ATTEMPTS_PER_AREA_RATIO);
        assert_eq!(center_attempt_budget(1000.0, 0.0), MIN_CENTER_ATTEMPTS);
    }

    #[test]
    fn test_densified_regions_avoid_each_other() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = region_config(2);
        // Overlapping on purpose so exclusion actually matters
        let mut regions = vec![
            Region::new(Point::new(50.0, 50.0), 15.0),
            Region::new(Point::new(60.0, 50.0), 15.0),
        ];
        densify_regions(&mut regions, &config, &mut rng);
        assert!(!regions[0].points.is_empty());
        for p in &regions[1].points {
            for q in &regions[0].points {
                assert!(p.distance(q) > config.min_place_dist);
            }
        }
        let all: Vec<Segment> = regions.iter().flat_map(|r| r.segments.clone()).collect();
        for (i, s1) in all.iter().enumerate() {
            assert!(s1.length() <= config.max_way_length);
            for s2 in &all[i + 1..] {
                assert!(!s1.intersects(s2));
            }
        }
    }

    #[test]
    fn test_outer_links_into_regions_without_crossing() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = UniverseConfig {
            radius: 60.0,
            min_place_dist: 8.0,
            max_way_length: 20.0,
            markov_prefix_length: 2,
            region: region_config(2),
        };
        let mut outer = outer_region(&config);
        let mut regions = place_regions(&outer, &config.region, &mut rng).unwrap();
        densify_regions(&mut regions, &config.region, &mut rng);
        densify_outer(&mut outer, &regions, &config, &mut rng);

        let region_points: Vec<Point> = regions.iter().flat_map(|r| r.points.clone()).collect();
        for p in &outer.points {
            for q in &region_points {
                assert!(p.distance(q) > config.min_place_dist);
            }
        }
        for s in &outer.segments {
            assert!(outer.points.contains(&s.a));
            assert!(outer.points.contains(&s.b) || region_points.contains(&s.b));
            assert!(s.length() <= config.max_way_length);
        }
        let mut all: Vec<Segment> = outer.segments.clone();
        all.extend(regions.iter().flat_map(|r| r.segments.clone()));
        for (i, s1) in all.iter().enumerate() {
            for s2 in &all[i + 1..] {
                assert!(!s1.intersects(s2));
            }
        }
    }

    #[test]
    fn test_clear_drops_geometry() {
        let mut region = Region::new(Point::new(0.0, 0.0), 5.0);
        region.points.push(Point::new(1.0, 1.0));
        region.segments.push(Segment::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0)));
        region.clear();
        assert!(region.points.is_empty());
        assert!(region.segments.is_empty());
    }
}
