//! Plane geometry for universe layout
//!
//! Points and segments with the predicates the layout needs: distances,
//! bounding boxes and segment crossing. Axes extend south-east (y grows
//! downwards), which only flips the sign of cross products and never leaks out
//! of this module.

use serde::{Deserialize, Serialize};

/// Precision used when deciding that a point lies on a segment's line.
pub const EPSILON: f64 = 0.000001;

/// A position in the universe plane.
///
/// Equality is exact: two points are the same only if both coordinates are
/// bit-for-bit equal floats. Shared endpoints between segments are detected
/// this way.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    /// Move the point so that `origin` becomes (0, 0).
    pub fn translate(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    /// True if this point is strictly farther than `min_dist` from every
    /// point in `others` (and equal to none of them).
    pub fn far_enough(&self, min_dist: f64, others: &[Point]) -> bool {
        others
            .iter()
            .all(|other| self != other && distance(*self, *other) > min_dist)
    }

    /// Total ordering on (x, y), used to sort geometry deterministically.
    pub fn total_cmp(&self, other: &Point) -> std::cmp::Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    ((p1.x - p2.x) * (p1.x - p2.x) + (p1.y - p2.y) * (p1.y - p2.y)).sqrt()
}

/// Cross product of two vectors starting at the origin.
///
/// The textbook formula assumes axes going north-east; ours go south-east so
/// the y components are negated. Only the sign is ever compared.
pub fn cross_product(a: Point, b: Point) -> f64 {
    a.x * -b.y - b.x * -a.y
}

/// A straight link between two points.
///
/// Stored with a direction (`a` to `b`) but crossing logic treats it as
/// undirected. Equality is order-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        distance(self.a, self.b)
    }

    pub fn translate(&self, origin: Point) -> Segment {
        Segment::new(self.a.translate(origin), self.b.translate(origin))
    }

    /// True if the two segments have at least one endpoint in common.
    pub fn shares_endpoint(&self, other: &Segment) -> bool {
        self.a == other.a || self.a == other.b || self.b == other.a || self.b == other.b
    }

    /// Bounding box as a segment from its north-west to its south-east corner.
    pub fn bounding_box(&self) -> Segment {
        let mut a = self.a;
        let mut b = self.b;
        if a.x > b.x {
            a.x = self.b.x;
            b.x = self.a.x;
        }
        if a.y > b.y {
            a.y = self.b.y;
            b.y = self.a.y;
        }
        Segment::new(a, b)
    }

    /// Symmetric crossing test without the bounding-box shortcut.
    ///
    /// Segments sharing an endpoint never cross. Otherwise they cross when,
    /// seen from each segment in turn, the other one either touches its line
    /// or has its endpoints on strictly opposite sides of it.
    pub fn crosses(&self, other: &Segment) -> bool {
        if self.shares_endpoint(other) {
            return false;
        }
        straddles(self, other) && straddles(other, self)
    }

    /// Crossing test used when selecting wormholes: shared endpoints are
    /// allowed, disjoint bounding boxes short-circuit, everything else goes
    /// through [`Segment::crosses`].
    ///
    /// An exactly horizontal or vertical segment has a flat bounding box, and
    /// flat boxes never overlap, so a T-junction onto such a segment is not
    /// reported. Edge sets selected with this test are non-crossing except for
    /// that case, which random float coordinates practically never produce.
    pub fn intersects(&self, other: &Segment) -> bool {
        if self.shares_endpoint(other) {
            return false;
        }
        if !bboxes_overlap(&self.bounding_box(), &other.bounding_box()) {
            return false;
        }
        straddles(self, other) && straddles(other, self)
    }

    /// True if this segment intersects any of `others`.
    pub fn intersects_any(&self, others: &[Segment]) -> bool {
        others.iter().any(|other| self.intersects(other))
    }

    /// Total ordering on (a, b), used to sort candidate edges.
    pub fn total_cmp(&self, other: &Segment) -> std::cmp::Ordering {
        self.a
            .total_cmp(&other.a)
            .then_with(|| self.b.total_cmp(&other.b))
    }
}

/// Strict overlap of two normalized bounding boxes. Boxes that only touch do
/// not overlap.
pub fn bboxes_overlap(b1: &Segment, b2: &Segment) -> bool {
    b1.a.x < b2.b.x && b1.b.x > b2.a.x && b1.a.y < b2.b.y && b1.b.y > b2.a.y
}

/// True if `p` lies on the line carried by `s`, endpoints excluded.
pub fn is_point_on_segment(s: &Segment, p: Point) -> bool {
    if s.a == p || s.b == p {
        return false;
    }
    let s0 = s.translate(s.a);
    let p0 = p.translate(s.a);
    cross_product(s0.b, p0).abs() < EPSILON
}

/// True if `p` is strictly on the right-hand side of the line carried by `s`.
pub fn is_point_right_of_line(s: &Segment, p: Point) -> bool {
    let s0 = s.translate(s.a);
    let p0 = p.translate(s.a);
    cross_product(s0.b, p0) > 0.0
}

// Does `other` touch the line of `s`, or sit across it?
fn straddles(s: &Segment, other: &Segment) -> bool {
    if is_point_on_segment(s, other.a) || is_point_on_segment(s, other.b) {
        return true;
    }
    is_point_right_of_line(s, other.a) != is_point_right_of_line(s, other.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point::new(ax, ay), Point::new(bx, by))
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance(&Point::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_diagonals_cross() {
        let s1 = seg(0.0, 0.0, 10.0, 10.0);
        let s2 = seg(0.0, 10.0, 10.0, 0.0);
        assert!(s1.intersects(&s2));
        assert!(s2.intersects(&s1));
        assert!(s1.crosses(&s2));
    }

    #[test]
    fn test_parallel_segments_do_not_cross() {
        let s1 = seg(0.0, 0.0, 10.0, 0.0);
        let s2 = seg(0.0, 1.0, 10.0, 1.0);
        assert!(!s1.intersects(&s2));
        assert!(!s1.crosses(&s2));
    }

    #[test]
    fn test_shared_endpoint_is_not_a_crossing() {
        let s1 = seg(0.0, 0.0, 5.0, 5.0);
        let s2 = seg(0.0, 0.0, 5.0, -5.0);
        assert!(!s1.intersects(&s2));
        assert!(!s1.crosses(&s2));

        // Same segment in both directions shares both endpoints
        let s3 = seg(5.0, 5.0, 0.0, 0.0);
        assert!(!s1.intersects(&s3));
    }

    #[test]
    fn test_point_on_segment() {
        let s = seg(0.0, 0.0, 10.0, 10.0);
        assert!(is_point_on_segment(&s, Point::new(5.0, 5.0)));
        assert!(!is_point_on_segment(&s, Point::new(5.0, 6.0)));
        // Endpoints are not "on" the segment
        assert!(!is_point_on_segment(&s, Point::new(0.0, 0.0)));
        assert!(!is_point_on_segment(&s, Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_touching_counts_as_crossing() {
        // T-junction: s2 starts in the middle of s1
        let s1 = seg(0.0, 0.0, 10.0, 10.0);
        let s2 = seg(5.0, 5.0, 10.0, 0.0);
        assert!(s1.intersects(&s2));
        assert!(s2.intersects(&s1));
    }

    #[test]
    fn test_flat_boxes_never_overlap() {
        // A horizontal segment has a zero-height box, so a T-junction onto it
        // is filtered out by the strict box test
        let s1 = seg(0.0, 0.0, 10.0, 0.0);
        let s2 = seg(5.0, 0.0, 5.0, 5.0);
        assert!(s1.crosses(&s2));
        assert!(!s1.intersects(&s2));
    }

    #[test]
    fn test_disjoint_boxes_short_circuit() {
        // Collinear but far apart: the line test alone says "touching",
        // the bounding boxes rule it out
        let s1 = seg(0.0, 0.0, 1.0, 1.0);
        let s2 = seg(5.0, 5.0, 6.0, 6.0);
        assert!(s1.crosses(&s2));
        assert!(!s1.intersects(&s2));
    }

    #[test]
    fn test_bounding_box_normalizes_corners() {
        let b = seg(10.0, 0.0, 0.0, 10.0).bounding_box();
        assert_eq!(b.a, Point::new(0.0, 0.0));
        assert_eq!(b.b, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let b1 = seg(0.0, 0.0, 1.0, 1.0);
        let b2 = seg(1.0, 0.0, 2.0, 1.0);
        assert!(!bboxes_overlap(&b1, &b2));
        let b3 = seg(0.5, 0.5, 2.0, 2.0);
        assert!(bboxes_overlap(&b1, &b3));
    }

    #[test]
    fn test_right_of_line_is_consistent() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let above = Point::new(5.0, -1.0);
        let below = Point::new(5.0, 1.0);
        assert_ne!(is_point_right_of_line(&s, above), is_point_right_of_line(&s, below));
        // On the line is not on the right
        assert!(!is_point_right_of_line(&s, Point::new(20.0, 0.0)));
    }

    #[test]
    fn test_far_enough() {
        let p = Point::new(0.0, 0.0);
        let others = [Point::new(3.0, 4.0), Point::new(10.0, 0.0)];
        assert!(p.far_enough(4.9, &others));
        // Exactly at the threshold is too close
        assert!(!p.far_enough(5.0, &others));
        assert!(!p.far_enough(0.0, &[p]));
        assert!(p.far_enough(100.0, &[]));
    }

    #[test]
    fn test_segment_order_matters_for_equality() {
        let s1 = seg(0.0, 0.0, 1.0, 1.0);
        let s2 = seg(1.0, 1.0, 0.0, 0.0);
        assert_ne!(s1, s2);
        assert_eq!(s1.length(), s2.length());
    }
}
