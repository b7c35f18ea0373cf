//! Non-owning handles into caller-owned map geometry.
//!
//! The half-plane never owns vertices, lines or segments. Everything it
//! records about them is an index into arenas held by the partitioner.

use nalgebra::{Point2, Vector2};

/// Index of a vertex in the caller's vertex arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Index of a map line in the caller's line arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

/// Index of a line segment side in the caller's segment arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SideId(pub usize);

/// Selects one of the two endpoints of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The start vertex (edge 0).
    From,
    /// The end vertex (edge 1).
    To,
}

impl Edge {
    /// Returns 0 for [`Edge::From`] and 1 for [`Edge::To`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Edge::From => 0,
            Edge::To => 1,
        }
    }

    /// Returns the other endpoint.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Edge::From => Edge::To,
            Edge::To => Edge::From,
        }
    }
}

impl TryFrom<u8> for Edge {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Edge::From),
            1 => Ok(Edge::To),
            other => Err(other),
        }
    }
}

/// A map vertex: its identity plus its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub origin: Point2<f64>,
}

impl Vertex {
    /// Creates a vertex at `origin`.
    pub fn new(id: VertexId, origin: Point2<f64>) -> Self {
        Self { id, origin }
    }
}

/// The map line a segment side was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLine {
    pub id: LineId,
    /// Both sides of the line face the same sector.
    pub self_referencing: bool,
}

impl MapLine {
    /// Creates a line with different sectors on each side.
    pub fn new(id: LineId) -> Self {
        Self {
            id,
            self_referencing: false,
        }
    }

    /// A line with the same sector on both sides.
    pub fn self_referencing(id: LineId) -> Self {
        Self {
            id,
            self_referencing: true,
        }
    }
}

/// One side of a line segment, as seen by the half-plane.
///
/// Segments without a [`MapLine`] are partition-only: they were created by
/// the partitioner along a split and carry no map-side geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSide {
    id: SideId,
    from: Vertex,
    to: Vertex,
    map_line: Option<MapLine>,
    partition_line: Option<LineId>,
}

impl SegmentSide {
    /// Creates a partition-only segment side between two vertices.
    pub fn new(id: SideId, from: Vertex, to: Vertex) -> Self {
        Self {
            id,
            from,
            to,
            map_line: None,
            partition_line: None,
        }
    }

    /// Attaches the map line this side belongs to.
    ///
    /// The partition line defaults to the same line unless one was already set.
    pub fn with_map_line(mut self, line: MapLine) -> Self {
        self.map_line = Some(line);
        self.partition_line.get_or_insert(line.id);
        self
    }

    /// Sets the map line this segment was originally split from.
    pub fn with_partition_line(mut self, line: LineId) -> Self {
        self.partition_line = Some(line);
        self
    }

    /// Returns the id of this side.
    #[inline]
    pub fn id(&self) -> SideId {
        self.id
    }

    /// Returns the start vertex.
    #[inline]
    pub fn from_vertex(&self) -> &Vertex {
        &self.from
    }

    /// Returns the end vertex.
    #[inline]
    pub fn to_vertex(&self) -> &Vertex {
        &self.to
    }

    /// Returns the vertex at the given endpoint.
    #[inline]
    pub fn vertex(&self, edge: Edge) -> &Vertex {
        match edge {
            Edge::From => &self.from,
            Edge::To => &self.to,
        }
    }

    /// Returns the map line of this side, if any.
    #[inline]
    pub fn map_line(&self) -> Option<&MapLine> {
        self.map_line.as_ref()
    }

    /// Returns the map line this segment was originally split from, if any.
    #[inline]
    pub fn partition_line(&self) -> Option<LineId> {
        self.partition_line
    }

    /// Returns `true` if this side is attached to real map geometry.
    #[inline]
    pub fn has_map_side(&self) -> bool {
        self.map_line.is_some()
    }

    /// Returns `true` if the owning map line has the same sector on both sides.
    ///
    /// Partition-only segments are never self-referencing.
    #[inline]
    pub fn is_self_referencing(&self) -> bool {
        self.map_line.is_some_and(|line| line.self_referencing)
    }

    /// Vector from the start vertex to the end vertex.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.to.origin - self.from.origin
    }

    /// Returns the distance between the two vertices.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
}
