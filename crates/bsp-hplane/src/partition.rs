//! Partition line representation and classification for BSP construction.

use nalgebra::{Point2, Vector2};

use crate::SegmentSide;

/// Default epsilon for distance classification.
/// Points within this distance of the partition are considered "on" it.
pub const DIST_EPSILON: f64 = 1.0 / 128.0;

/// Default epsilon for comparing angles, in degrees.
pub const ANGLE_EPSILON: f64 = 1.0 / 1024.0;

/// Normalizes an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// World angle of a direction vector, in degrees within `[0, 360)`.
#[inline]
pub fn direction_to_angle(direction: Vector2<f64>) -> f64 {
    normalize_angle(direction.y.atan2(direction.x).to_degrees())
}

/// Coarse classification of a partition's slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeType {
    /// `direction.y == 0`
    Horizontal,
    /// `direction.x == 0`
    Vertical,
    /// `direction.y / direction.x > 0`
    Positive,
    /// `direction.y / direction.x < 0`
    Negative,
}

impl SlopeType {
    /// Classifies a direction vector.
    pub fn of(direction: Vector2<f64>) -> Self {
        if direction.x == 0.0 {
            SlopeType::Vertical
        } else if direction.y == 0.0 {
            SlopeType::Horizontal
        } else if direction.y / direction.x > 0.0 {
            SlopeType::Positive
        } else {
            SlopeType::Negative
        }
    }
}

/// Relationship of a line segment to a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRelationship {
    /// Both endpoints lie on the partition (within epsilon).
    Collinear,
    /// Both endpoints are on the right side (or touching it).
    Right,
    /// Both endpoints are on the left side (or touching it).
    Left,
    /// Endpoints lie on opposite sides.
    Intersects,
}

impl LineRelationship {
    /// Classifies a segment from the signed perpendicular distances of its
    /// endpoints. Positive distances are on the right.
    pub fn classify(from_dist: f64, to_dist: f64, epsilon: f64) -> Self {
        if from_dist.abs() <= epsilon && to_dist.abs() <= epsilon {
            LineRelationship::Collinear
        } else if from_dist >= -epsilon && to_dist >= -epsilon {
            LineRelationship::Right
        } else if from_dist <= epsilon && to_dist <= epsilon {
            LineRelationship::Left
        } else {
            LineRelationship::Intersects
        }
    }
}

/// A partition line: an origin and a direction, plus derived scalars.
///
/// `perp` and `para` fold the origin into the line equation so that the
/// perpendicular and parallel distance of any point costs one dot product
/// and one division.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    origin: Point2<f64>,
    direction: Vector2<f64>,
    length: f64,
    angle: f64,
    slope_type: SlopeType,
    perp: f64,
    para: f64,
}

impl Partition {
    /// Creates a partition from an origin point and a direction vector.
    ///
    /// # Panics
    /// Panics if the direction vector has zero length.
    pub fn new(origin: Point2<f64>, direction: Vector2<f64>) -> Self {
        let length = direction.norm();
        assert!(length > 0.0, "Partition direction cannot be zero");
        Self {
            origin,
            direction,
            length,
            angle: direction_to_angle(direction),
            slope_type: SlopeType::of(direction),
            perp: origin.y * direction.x - origin.x * direction.y,
            para: -origin.x * direction.x - origin.y * direction.y,
        }
    }

    /// Creates a partition running from `a` towards `b`.
    ///
    /// # Panics
    /// Panics if the points coincide.
    pub fn from_points(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self::new(a, b - a)
    }

    /// Creates a partition along a segment, from its start to its end vertex.
    ///
    /// # Panics
    /// Panics if the segment has zero length.
    pub fn from_segment(segment: &SegmentSide) -> Self {
        Self::new(segment.from_vertex().origin, segment.direction())
    }

    /// Returns the origin point of the partition.
    #[inline]
    pub fn origin(&self) -> Point2<f64> {
        self.origin
    }

    /// Returns the (unnormalized) direction vector.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.direction
    }

    /// Returns the length of the direction vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// World angle of the direction, in degrees within `[0, 360)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The angle pointing the opposite way, in degrees within `[0, 360)`.
    #[inline]
    pub fn inverse_angle(&self) -> f64 {
        normalize_angle(self.angle + 180.0)
    }

    /// Returns the slope classification of the direction.
    #[inline]
    pub fn slope_type(&self) -> SlopeType {
        self.slope_type
    }

    /// Returns the precomputed perpendicular-distance coefficient.
    #[inline]
    pub fn perp(&self) -> f64 {
        self.perp
    }

    /// Returns the precomputed parallel-distance coefficient.
    #[inline]
    pub fn para(&self) -> f64 {
        self.para
    }

    /// Signed perpendicular distance from the partition line to a point.
    /// - Positive: point is on the right of the direction
    /// - Negative: point is on the left
    #[inline]
    pub fn perp_distance(&self, point: Point2<f64>) -> f64 {
        (point.x * self.direction.y - point.y * self.direction.x + self.perp) / self.length
    }

    /// Signed distance of a point's projection along the partition, measured
    /// from the origin in world units.
    #[inline]
    pub fn parallel_distance(&self, point: Point2<f64>) -> f64 {
        (point.x * self.direction.x + point.y * self.direction.y + self.para) / self.length
    }

    /// Unnormalized side test: the sign matches [`Self::perp_distance`].
    #[inline]
    pub fn point_on_side(&self, point: Point2<f64>) -> f64 {
        (point - self.origin).perp(&self.direction)
    }

    /// Returns `true` if both partitions run along the same (or opposite) direction.
    pub fn is_parallel_to(&self, other: &Partition) -> bool {
        let cross = self.direction.perp(&other.direction) / (self.length * other.length);
        cross.abs() <= f64::EPSILON
    }

    /// Computes where `other` crosses this partition.
    ///
    /// Returns the crossing as a distance along `self` (same units as
    /// [`Self::parallel_distance`]), or `None` if the lines are parallel.
    pub fn intersection(&self, other: &Partition) -> Option<f64> {
        if self.is_parallel_to(other) {
            return None;
        }
        let denom = self.direction.perp(&other.direction);
        let t = (other.origin - self.origin).perp(&other.direction) / denom;
        Some(t * self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derived_scalars() {
        let p = Partition::new(Point2::new(2.0, 3.0), Vector2::new(4.0, 0.0));

        assert_relative_eq!(p.length(), 4.0);
        assert_relative_eq!(p.angle(), 0.0);
        assert_relative_eq!(p.inverse_angle(), 180.0);
        assert_eq!(p.slope_type(), SlopeType::Horizontal);
        assert_relative_eq!(p.perp(), 3.0 * 4.0);
        assert_relative_eq!(p.para(), -2.0 * 4.0);
    }

    #[test]
    #[should_panic(expected = "Partition direction cannot be zero")]
    fn zero_direction_panics() {
        Partition::new(Point2::origin(), Vector2::zeros());
    }

    #[test]
    fn angles_wrap_into_range() {
        let down = Partition::new(Point2::origin(), Vector2::new(0.0, -1.0));
        assert_relative_eq!(down.angle(), 270.0);
        assert_relative_eq!(down.inverse_angle(), 90.0);

        let diag = Partition::new(Point2::origin(), Vector2::new(-1.0, -1.0));
        assert_relative_eq!(diag.angle(), 225.0);
        assert_relative_eq!(diag.inverse_angle(), 45.0);

        assert_eq!(normalize_angle(-1e-20), 0.0);
        assert_relative_eq!(normalize_angle(-90.0), 270.0);
    }

    #[test]
    fn slope_types() {
        assert_eq!(SlopeType::of(Vector2::new(0.0, 5.0)), SlopeType::Vertical);
        assert_eq!(SlopeType::of(Vector2::new(-3.0, 0.0)), SlopeType::Horizontal);
        assert_eq!(SlopeType::of(Vector2::new(1.0, 2.0)), SlopeType::Positive);
        assert_eq!(SlopeType::of(Vector2::new(-1.0, -2.0)), SlopeType::Positive);
        assert_eq!(SlopeType::of(Vector2::new(1.0, -2.0)), SlopeType::Negative);
    }

    #[test]
    fn perp_distance_sign() {
        let p = Partition::from_points(Point2::origin(), Point2::new(10.0, 0.0));

        // Looking along +x, +y is on the left.
        assert_relative_eq!(p.perp_distance(Point2::new(5.0, 1.0)), -1.0);
        assert_relative_eq!(p.perp_distance(Point2::new(5.0, -2.0)), 2.0);
        assert!(p.point_on_side(Point2::new(5.0, -2.0)) > 0.0);
        assert!(p.point_on_side(Point2::new(5.0, 1.0)) < 0.0);
    }

    #[test]
    fn parallel_distance_offset_origin() {
        let p = Partition::from_points(Point2::new(1.0, 1.0), Point2::new(4.0, 5.0));

        assert_relative_eq!(p.parallel_distance(Point2::new(1.0, 1.0)), 0.0);
        assert_relative_eq!(p.parallel_distance(Point2::new(4.0, 5.0)), 5.0);
        assert_relative_eq!(p.perp_distance(Point2::new(4.0, 5.0)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_and_crossing_partitions() {
        let a = Partition::from_points(Point2::origin(), Point2::new(10.0, 0.0));
        let b = Partition::from_points(Point2::new(0.0, 3.0), Point2::new(-5.0, 3.0));
        let c = Partition::from_points(Point2::new(4.0, -1.0), Point2::new(4.0, 1.0));

        assert!(a.is_parallel_to(&b));
        assert_eq!(a.intersection(&b), None);
        assert!(!a.is_parallel_to(&c));
        assert_relative_eq!(a.intersection(&c).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn relationship_classification() {
        let eps = DIST_EPSILON;
        assert_eq!(LineRelationship::classify(0.0, 0.0, eps), LineRelationship::Collinear);
        assert_eq!(LineRelationship::classify(1.0, 1.0, eps), LineRelationship::Right);
        assert_eq!(LineRelationship::classify(0.0, 1.0, eps), LineRelationship::Right);
        assert_eq!(LineRelationship::classify(-1.0, -0.0, eps), LineRelationship::Left);
        assert_eq!(LineRelationship::classify(-1.0, 1.0, eps), LineRelationship::Intersects);
        assert_eq!(
            LineRelationship::classify(eps / 2.0, -eps / 2.0, eps),
            LineRelationship::Collinear
        );
    }
}
