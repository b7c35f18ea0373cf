//! Half-plane intercept engine for 2D map BSP construction.
//!
//! Given a candidate partition line, an [`HPlane`] collects the points where
//! segment endpoints lie on that line, orders them, merges coincident ones
//! and records which segment side is open on either side of each point.
//! The partitioner that picks partitions and splits segments lives outside
//! this crate and drives it.

mod edge_tips;
mod error;
mod geometry;
mod hplane;
mod intercept;
mod partition;

pub use edge_tips::{EdgeTip, EdgeTips};
pub use error::HPlaneError;
pub use geometry::{Edge, LineId, MapLine, SegmentSide, SideId, Vertex, VertexId};
pub use hplane::{HPlane, HPlaneConfig, MERGE_EPSILON, ORDER_TOLERANCE};
pub use intercept::Intercept;
pub use partition::{
    ANGLE_EPSILON, DIST_EPSILON, LineRelationship, Partition, SlopeType, direction_to_angle,
    normalize_angle,
};
