//! Points where segment endpoints meet the partition line.

use crate::{Edge, LineId, SegmentSide, SideId, VertexId};

/// An endpoint of a line segment lying on the partition.
///
/// `distance`, the segment and the edge are fixed once created; the open
/// sides before and after the point are refined while intercepts are
/// merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Intercept {
    distance: f64,
    line_segment: SideId,
    edge: Edge,
    vertex: VertexId,
    map_line: Option<LineId>,
    before: Option<SideId>,
    after: Option<SideId>,
    self_referencing: bool,
}

impl Intercept {
    pub(crate) fn new(distance: f64, segment: &SegmentSide, edge: Edge) -> Self {
        Self {
            distance,
            line_segment: segment.id(),
            edge,
            vertex: segment.vertex(edge).id,
            map_line: segment.map_line().map(|line| line.id),
            before: None,
            after: None,
            self_referencing: segment.is_self_referencing(),
        }
    }

    /// Signed distance along the partition, from its origin.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The segment side whose endpoint produced this intercept.
    #[inline]
    pub fn line_segment(&self) -> SideId {
        self.line_segment
    }

    /// Which endpoint of [`Self::line_segment`] lies on the partition.
    #[inline]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Returns the vertex lying on the partition.
    #[inline]
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// The map line the producing segment belongs to, if any.
    #[inline]
    pub fn map_line(&self) -> Option<LineId> {
        self.map_line
    }

    /// The open side behind this point, looking along the partition.
    /// `None` means void space.
    #[inline]
    pub fn before(&self) -> Option<SideId> {
        self.before
    }

    /// The open side ahead of this point, looking along the partition.
    /// `None` means void space.
    #[inline]
    pub fn after(&self) -> Option<SideId> {
        self.after
    }

    /// Returns `true` if the side data came from a self-referencing line.
    #[inline]
    pub fn line_segment_is_self_referencing(&self) -> bool {
        self.self_referencing
    }

    pub(crate) fn set_sides(
        &mut self,
        before: Option<SideId>,
        after: Option<SideId>,
        self_referencing: bool,
    ) {
        self.before = before;
        self.after = after;
        self.self_referencing = self_referencing;
    }

    /// Returns `true` if both intercepts come from segments of one map line.
    pub(crate) fn shares_map_line(&self, other: &Intercept) -> bool {
        self.map_line.is_some() && self.map_line == other.map_line
    }

    /// Absorbs the side information of `other`, which lies at the same point.
    ///
    /// Self-referencing data loses to concrete data. Beyond that, a side that
    /// is already known is never overwritten.
    pub(crate) fn merge(&mut self, other: &Intercept) {
        if self.self_referencing && !other.self_referencing {
            if self.before.is_some() && other.before.is_some() {
                self.before = other.before;
            }
            if self.after.is_some() && other.after.is_some() {
                self.after = other.after;
            }
            self.self_referencing = false;
        }

        if self.before.is_none() {
            self.before = other.before;
        }
        if self.after.is_none() {
            self.after = other.after;
        }
    }
}
