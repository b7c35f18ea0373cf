//! The half-plane: a partition line plus the intercepts found along it.

use log::{debug, error, trace};

use crate::partition::{DIST_EPSILON, LineRelationship, Partition, SlopeType};
use crate::{Edge, EdgeTips, HPlaneError, Intercept, LineId, SegmentSide, SideId};

/// Default distance under which two intercepts are merged into one.
pub const MERGE_EPSILON: f64 = 1.0 / 128.0;

/// Default amount by which sorted intercepts may appear out of order before
/// the list is considered corrupt.
pub const ORDER_TOLERANCE: f64 = 0.1;

/// Tolerances used by an [`HPlane`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HPlaneConfig {
    /// Perpendicular distance under which a point is on the partition.
    /// Must match the epsilon the partitioner splits with.
    pub distance_epsilon: f64,
    /// Gap along the partition under which adjacent intercepts merge.
    pub merge_epsilon: f64,
    /// Negative gap between sorted neighbours that is treated as fatal.
    pub order_tolerance: f64,
}

impl Default for HPlaneConfig {
    fn default() -> Self {
        Self {
            distance_epsilon: DIST_EPSILON,
            merge_epsilon: MERGE_EPSILON,
            order_tolerance: ORDER_TOLERANCE,
        }
    }
}

/// The segment a partition was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Source {
    side: SideId,
    map_line: Option<LineId>,
}

/// A candidate partition and the ordered intercepts along it.
///
/// An `HPlane` starts unconfigured. Each call to [`HPlane::configure`]
/// discards all intercepts and sets up a fresh partition; the partitioner
/// then feeds it every segment endpoint lying on the line, sorts and merges
/// once, and reads back [`HPlane::intercepts`].
///
/// # Example
///
/// ```
/// use bsp_hplane::{Edge, EdgeTips, HPlane, LineId, MapLine, SegmentSide, SideId, Vertex, VertexId};
/// use nalgebra::Point2;
///
/// let a = Vertex::new(VertexId(0), Point2::new(0.0, 0.0));
/// let b = Vertex::new(VertexId(1), Point2::new(10.0, 0.0));
/// let source = SegmentSide::new(SideId(0), a, b).with_map_line(MapLine::new(LineId(0)));
///
/// let mut hplane = HPlane::new();
/// hplane.configure(&source);
/// hplane.intercept(&source, Edge::To, &EdgeTips::new());
/// hplane.intercept(&source, Edge::From, &EdgeTips::new());
/// hplane.sort_and_merge_intercepts().unwrap();
///
/// let distances: Vec<f64> = hplane.intercepts().iter().map(|i| i.distance()).collect();
/// assert_eq!(distances, vec![0.0, 10.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HPlane {
    config: HPlaneConfig,
    partition: Option<Partition>,
    source: Option<Source>,
    intercepts: Vec<Intercept>,
    need_sort: bool,
}

impl HPlane {
    /// Creates an unconfigured half-plane with the default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unconfigured half-plane with custom tolerances.
    pub fn with_config(config: HPlaneConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the tolerances in use.
    #[inline]
    pub fn config(&self) -> &HPlaneConfig {
        &self.config
    }

    /// Returns `true` once a partition has been set up.
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.partition.is_some()
    }

    /// Sets up the partition along `segment`, discarding all intercepts.
    ///
    /// # Panics
    /// Panics if the segment has no map-side geometry or has zero length.
    pub fn configure(&mut self, segment: &SegmentSide) {
        assert!(
            segment.has_map_side(),
            "HPlane must be configured from a segment with map-side geometry"
        );
        self.set_partition(Partition::from_segment(segment));
        self.source = Some(Source {
            side: segment.id(),
            map_line: segment.map_line().map(|line| line.id),
        });
    }

    /// Sets up a partition that has no source segment, discarding all
    /// intercepts.
    pub fn configure_partition(&mut self, partition: Partition) {
        self.set_partition(partition);
        self.source = None;
    }

    fn set_partition(&mut self, partition: Partition) {
        self.clear_intercepts();
        trace!(
            "Configured partition from {:?} direction {:?}",
            partition.origin(),
            partition.direction()
        );
        self.partition = Some(partition);
    }

    /// Discards every intercept.
    pub fn clear_intercepts(&mut self) {
        self.intercepts.clear();
        self.need_sort = false;
    }

    /// Returns the partition.
    ///
    /// # Panics
    /// Panics if the half-plane has not been configured.
    #[inline]
    pub fn partition(&self) -> &Partition {
        self.partition
            .as_ref()
            .expect("HPlane must be configured before use")
    }

    /// Returns the partition's angle in degrees.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.partition().angle()
    }

    /// Returns the angle pointing back along the partition, in degrees.
    #[inline]
    pub fn inverse_angle(&self) -> f64 {
        self.partition().inverse_angle()
    }

    /// Returns the slope classification of the partition.
    #[inline]
    pub fn slope_type(&self) -> SlopeType {
        self.partition().slope_type()
    }

    /// The segment side the partition was derived from, if any.
    #[inline]
    pub fn line_segment(&self) -> Option<SideId> {
        self.source.map(|s| s.side)
    }

    /// The intercepts, in order once [`Self::sort_and_merge_intercepts`] has run.
    #[inline]
    pub fn intercepts(&self) -> &[Intercept] {
        &self.intercepts
    }

    /// Returns the number of intercepts.
    #[inline]
    pub fn intercept_count(&self) -> usize {
        self.intercepts.len()
    }

    /// Distance along the partition of one endpoint of `segment`.
    pub fn intersect(&self, segment: &SegmentSide, edge: Edge) -> f64 {
        self.partition()
            .parallel_distance(segment.vertex(edge).origin)
    }

    /// Records that an endpoint of `segment` lies on the partition.
    ///
    /// `edge_tips` are the wall tips of that endpoint's vertex; they decide
    /// which sides are open before and after the point. At most one
    /// intercept exists per vertex: a repeated vertex only replaces the
    /// stored sides when the stored ones came from a self-referencing line
    /// and the new ones do not.
    pub fn intercept(
        &mut self,
        segment: &SegmentSide,
        edge: Edge,
        edge_tips: &EdgeTips,
    ) -> &Intercept {
        let self_referencing = segment.is_self_referencing();
        let vertex = segment.vertex(edge).id;
        let before = edge_tips.line_seg_at_angle(self.inverse_angle());
        let after = edge_tips.line_seg_at_angle(self.angle());

        if let Some(idx) = self.intercepts.iter().position(|i| i.vertex() == vertex) {
            let existing = &mut self.intercepts[idx];
            if existing.line_segment_is_self_referencing() && !self_referencing {
                trace!(
                    "Replacing self-referencing sides at vertex {:?} with sides from {:?}",
                    vertex,
                    segment.id()
                );
                existing.set_sides(before, after, self_referencing);
            }
            return &self.intercepts[idx];
        }

        let mut icpt = Intercept::new(self.intersect(segment, edge), segment, edge);
        icpt.set_sides(before, after, self_referencing);
        trace!(
            "New intercept at {} for {:?} edge {}",
            icpt.distance(),
            segment.id(),
            edge.index()
        );
        self.intercepts.push(icpt);
        self.need_sort = true;
        &self.intercepts[self.intercepts.len() - 1]
    }

    /// Sorts the intercepts by distance and merges those lying within the
    /// merge epsilon of each other.
    ///
    /// Does nothing if no intercept was added since the last call.
    ///
    /// # Errors
    /// Returns [`HPlaneError::InvalidInterceptOrder`] if the sorted list is
    /// out of order beyond the ordering tolerance. The map's BSP build
    /// cannot continue.
    pub fn sort_and_merge_intercepts(&mut self) -> Result<(), HPlaneError> {
        if !self.need_sort {
            return Ok(());
        }

        self.intercepts
            .sort_by(|a, b| a.distance().total_cmp(&b.distance()));
        self.merge_intercepts()?;
        self.need_sort = false;
        Ok(())
    }

    /// Merges adjacent intercepts of an already sorted list.
    fn merge_intercepts(&mut self) -> Result<(), HPlaneError> {
        let mut i = 0;
        while i + 1 < self.intercepts.len() {
            let cur = &self.intercepts[i];
            let next = &self.intercepts[i + 1];
            let gap = next.distance() - cur.distance();

            if gap < -self.config.order_tolerance {
                error!(
                    "Intercept at {} ({:?}) sorted ahead of {} ({:?})",
                    cur.distance(),
                    cur.line_segment(),
                    next.distance(),
                    next.line_segment()
                );
                return Err(HPlaneError::InvalidInterceptOrder {
                    previous: cur.distance(),
                    next: next.distance(),
                    previous_segment: cur.line_segment(),
                    next_segment: next.line_segment(),
                });
            }

            if !(0.0..=self.config.merge_epsilon).contains(&gap) {
                i += 1;
                continue;
            }

            // Collinear segments of one line meeting here are expected.
            if cur.shares_map_line(next) {
                debug!(
                    "Not merging intercepts of one line {:?} at {}",
                    cur.map_line(),
                    cur.distance()
                );
                i += 1;
                continue;
            }

            let next = self.intercepts.remove(i + 1);
            debug!(
                "Merging intercept {:?} at {} into {:?}",
                next.line_segment(),
                next.distance(),
                self.intercepts[i].line_segment()
            );
            self.intercepts[i].merge(&next);
        }
        Ok(())
    }

    /// Signed perpendicular distances of both endpoints of `segment`.
    ///
    /// Segments split from the partition's own source line are reported as
    /// exactly collinear.
    pub fn distance(&self, segment: &SegmentSide) -> (f64, f64) {
        let on_source_line = self
            .source
            .and_then(|s| s.map_line)
            .is_some_and(|line| segment.partition_line() == Some(line));
        if on_source_line {
            return (0.0, 0.0);
        }

        let partition = self.partition();
        (
            partition.perp_distance(segment.from_vertex().origin),
            partition.perp_distance(segment.to_vertex().origin),
        )
    }

    /// Classifies `segment` against the partition.
    ///
    /// Returns the relationship along with the endpoint distances from
    /// [`Self::distance`].
    pub fn relationship(&self, segment: &SegmentSide) -> (LineRelationship, f64, f64) {
        let (from_dist, to_dist) = self.distance(segment);
        let rel = LineRelationship::classify(from_dist, to_dist, self.config.distance_epsilon);
        (rel, from_dist, to_dist)
    }

    /// Writes every intercept to the debug log.
    pub fn log_intercepts(&self) {
        for (i, icpt) in self.intercepts.iter().enumerate() {
            let suffix = if icpt.line_segment_is_self_referencing() {
                " (self-ref)"
            } else {
                ""
            };
            debug!(
                " {}: >{:.2} {:?} edge {} before: {:?} after: {:?}{}",
                i,
                icpt.distance(),
                icpt.line_segment(),
                icpt.edge().index(),
                icpt.before(),
                icpt.after(),
                suffix
            );
        }
    }
}
