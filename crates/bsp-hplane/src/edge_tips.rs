//! Wall tips around a single vertex.
//!
//! Each tip records the angle at which a line segment leaves the vertex,
//! together with the segment sides lying on either side of that wall.
//! Looking out from the vertex in some direction, the tips answer which
//! segment side (and therefore which sector) is open in that direction.

use crate::SideId;
use crate::partition::{ANGLE_EPSILON, normalize_angle};

/// A wall leaving a vertex at a given angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeTip {
    angle: f64,
    front: Option<SideId>,
    back: Option<SideId>,
}

impl EdgeTip {
    /// Creates a tip, normalizing `angle` into `[0, 360)`.
    pub fn new(angle: f64, front: Option<SideId>, back: Option<SideId>) -> Self {
        Self {
            angle: normalize_angle(angle),
            front,
            back,
        }
    }

    /// Angle of the wall in degrees, within `[0, 360)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The segment side facing clockwise from the wall.
    #[inline]
    pub fn front(&self) -> Option<SideId> {
        self.front
    }

    /// The segment side facing counter-clockwise from the wall.
    #[inline]
    pub fn back(&self) -> Option<SideId> {
        self.back
    }

    /// Returns `true` if the tip has a front side.
    #[inline]
    pub fn has_front(&self) -> bool {
        self.front.is_some()
    }

    /// Returns `true` if the tip has a back side.
    #[inline]
    pub fn has_back(&self) -> bool {
        self.back.is_some()
    }
}

/// The wall tips of one vertex, kept in ascending angle order.
#[derive(Debug, Clone)]
pub struct EdgeTips {
    tips: Vec<EdgeTip>,
    epsilon: f64,
}

impl Default for EdgeTips {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeTips {
    /// Creates an empty set using [`ANGLE_EPSILON`].
    pub fn new() -> Self {
        Self::with_epsilon(ANGLE_EPSILON)
    }

    /// Creates an empty set with a custom angular epsilon (degrees).
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            tips: Vec::new(),
            epsilon,
        }
    }

    /// Returns the angular epsilon, in degrees.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Adds a tip, keeping the set sorted. Tips with equal angles keep their
    /// insertion order.
    pub fn add(&mut self, angle: f64, front: Option<SideId>, back: Option<SideId>) -> &EdgeTip {
        let tip = EdgeTip::new(angle, front, back);
        let idx = self.tips.partition_point(|t| t.angle <= tip.angle);
        self.tips.insert(idx, tip);
        &self.tips[idx]
    }

    /// Returns the number of tips.
    #[inline]
    pub fn len(&self) -> usize {
        self.tips.len()
    }

    /// Returns `true` if there are no tips.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    /// Returns the tips in ascending angle order.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeTip> {
        self.tips.iter()
    }

    /// Removes every tip.
    pub fn clear(&mut self) {
        self.tips.clear();
    }

    /// Forgets every reference to `side`. Tips left with neither a front
    /// nor a back are removed.
    pub fn clear_by_segment(&mut self, side: SideId) {
        for tip in &mut self.tips {
            if tip.front == Some(side) {
                tip.front = None;
            }
            if tip.back == Some(side) {
                tip.back = None;
            }
        }
        self.tips.retain(|t| t.front.is_some() || t.back.is_some());
    }

    /// Returns the tip lying exactly at `angle` (within epsilon), if any.
    pub fn at(&self, angle: f64) -> Option<&EdgeTip> {
        let angle = normalize_angle(angle);
        self.tips.iter().find(|t| {
            let diff = (t.angle - angle).abs();
            diff.min(360.0 - diff) <= self.epsilon
        })
    }

    /// Returns the first tip whose angle is strictly greater than `angle`.
    pub fn after(&self, angle: f64) -> Option<&EdgeTip> {
        let angle = normalize_angle(angle);
        self.tips.iter().find(|t| t.angle > angle + self.epsilon)
    }

    /// The tip with the greatest angle.
    #[inline]
    pub fn largest(&self) -> Option<&EdgeTip> {
        self.tips.last()
    }

    /// The tip with the smallest angle.
    #[inline]
    pub fn smallest(&self) -> Option<&EdgeTip> {
        self.tips.first()
    }

    /// Finds the segment side that is open when looking out from the vertex
    /// towards `angle`.
    ///
    /// - A tip at exactly `angle` closes the direction: `None`.
    /// - Otherwise the next tip clockwise-after `angle` bounds the open
    ///   wedge, and its front side is returned.
    /// - With no tip beyond `angle` the wedge wraps around past 360 and is
    ///   bounded by the back of the largest tip.
    pub fn line_seg_at_angle(&self, angle: f64) -> Option<SideId> {
        if self.at(angle).is_some() {
            return None;
        }
        if let Some(tip) = self.after(angle) {
            return tip.front;
        }
        self.largest().and_then(|tip| tip.back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(id: usize) -> Option<SideId> {
        Some(SideId(id))
    }

    /// A vertex with walls leaving at 90 and 270 degrees.
    fn vertical_wall() -> EdgeTips {
        let mut tips = EdgeTips::new();
        tips.add(270.0, side(2), side(3));
        tips.add(90.0, side(0), side(1));
        tips
    }

    #[test]
    fn tips_are_sorted() {
        let mut tips = vertical_wall();
        tips.add(-45.0, None, side(4));
        tips.add(180.0, side(5), None);

        let angles: Vec<f64> = tips.iter().map(|t| t.angle()).collect();
        assert_eq!(angles, vec![90.0, 180.0, 270.0, 315.0]);
        assert_eq!(tips.smallest().map(|t| t.angle()), Some(90.0));
        assert_eq!(tips.largest().map(|t| t.angle()), Some(315.0));
    }

    #[test]
    fn equal_angles_keep_insertion_order() {
        let mut tips = EdgeTips::new();
        tips.add(10.0, side(0), None);
        tips.add(10.0, side(1), None);

        let fronts: Vec<_> = tips.iter().map(|t| t.front()).collect();
        assert_eq!(fronts, vec![side(0), side(1)]);
    }

    #[test]
    fn at_uses_epsilon_and_wraps() {
        let mut tips = EdgeTips::new();
        tips.add(359.9999, side(0), None);
        tips.add(45.0, side(1), None);

        assert!(tips.at(45.0 + ANGLE_EPSILON / 2.0).is_some());
        assert!(tips.at(45.1).is_none());
        assert!(tips.at(0.0).is_some());
    }

    #[test]
    fn custom_epsilon_widens_closed_directions() {
        let mut tips = EdgeTips::with_epsilon(1.0);
        tips.add(90.0, side(0), side(1));

        assert_eq!(tips.epsilon(), 1.0);
        assert_eq!(tips.line_seg_at_angle(89.5), None);
        assert_eq!(tips.line_seg_at_angle(88.0), side(0));
        assert_eq!(tips.line_seg_at_angle(91.5), side(1));
    }

    #[test]
    fn empty_tips_have_no_open_side() {
        let tips = EdgeTips::new();
        assert!(tips.is_empty());
        assert_eq!(tips.line_seg_at_angle(0.0), None);
    }

    #[test]
    fn exact_tip_is_closed() {
        let tips = vertical_wall();
        assert_eq!(tips.line_seg_at_angle(90.0), None);
        assert_eq!(tips.line_seg_at_angle(270.0), None);
    }

    #[test]
    fn next_tip_front_is_open() {
        let tips = vertical_wall();
        assert_eq!(tips.line_seg_at_angle(0.0), side(0));
        assert_eq!(tips.line_seg_at_angle(180.0), side(2));
    }

    #[test]
    fn wraps_to_back_of_largest() {
        let tips = vertical_wall();
        assert_eq!(tips.line_seg_at_angle(300.0), side(3));
    }

    #[test]
    fn clear_by_segment_drops_empty_tips() {
        let mut tips = vertical_wall();
        tips.add(180.0, side(4), None);

        tips.clear_by_segment(SideId(4));
        tips.clear_by_segment(SideId(0));

        assert_eq!(tips.len(), 2);
        let first = tips.smallest().unwrap();
        assert_eq!(first.angle(), 90.0);
        assert!(!first.has_front());
        assert!(first.has_back());

        tips.clear();
        assert!(tips.is_empty());
    }
}
