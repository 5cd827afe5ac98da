use crate::map::indices::{EdgeI, FaceI, VertexI};
use std::fmt::{Display, Formatter};

/// A single flag: one corner of the map, identified by the vertex, the edge
/// and the face it is incident to. Ordering is lexicographic in that order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Flag {
    pub vertex: VertexI,
    pub edge: EdgeI,
    pub face: FaceI,
}

impl Flag {
    pub fn new(vertex: VertexI, edge: EdgeI, face: FaceI) -> Flag {
        Flag { vertex, edge, face }
    }

    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.vertex.0, self.edge.0, self.face.0)
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Flag({}, {}, {})", self.vertex.0, self.edge.0, self.face.0)
    }
}

/// The three structural involutions of a map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Involution {
    /// Same edge and face, other vertex.
    T0,
    /// Same vertex and face, other edge.
    T1,
    /// Same vertex and edge, other face.
    T2,
}

impl Involution {
    pub fn index(&self) -> usize {
        match self {
            Involution::T0 => 0,
            Involution::T1 => 1,
            Involution::T2 => 2,
        }
    }

    pub fn all() -> [Involution; 3] {
        [Involution::T0, Involution::T1, Involution::T2]
    }
}

impl Display for Involution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.index())
    }
}
