use crate::map::indices::{EdgeI, FaceI, VertexI};
use std::fmt;
use thiserror::Error;

pub type MapResult<T> = Result<T, MapError>;

/// Which of the two 2-by-2 decompositions of an edge's flags failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Partition {
    Faces,
    Vertices,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Faces => write!(f, "faces"),
            Partition::Vertices => write!(f, "vertices"),
        }
    }
}

/// Reasons a face list does not describe a valid map. All of them are raised
/// while the map is built, a constructed map never produces one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map description is illegal; no faces given")]
    NoFaces,

    #[error("map description is illegal; face {face} has {len} vertices, at least 3 are needed")]
    DegenerateFace { face: FaceI, len: usize },

    #[error("map description is illegal; face {face} contains the vertex label 0, labels must be positive")]
    InvalidVertexLabel { face: FaceI },

    #[error("map description is illegal; flag ({}, {}, {}) appears more than once", .vertex.0, .edge.0, .face.0)]
    DuplicateFlag {
        vertex: VertexI,
        edge: EdgeI,
        face: FaceI,
    },

    #[error("map description is illegal; edge ({}, {}) should comprise 4 flags instead of {flags}", .u.0, .v.0)]
    EdgeArity {
        edge: EdgeI,
        u: VertexI,
        v: VertexI,
        flags: usize,
    },

    #[error("map description is illegal; malformed edge ({}, {}), its flags do not split into two pairs by {partition}", .u.0, .v.0)]
    MalformedEdge {
        edge: EdgeI,
        u: VertexI,
        v: VertexI,
        partition: Partition,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = MapError::DuplicateFlag { vertex: VertexI(1), edge: EdgeI(0), face: FaceI(0) };
        assert_eq!(e.to_string(), "map description is illegal; flag (1, 0, 0) appears more than once");

        let e = MapError::EdgeArity { edge: EdgeI(2), u: VertexI(1), v: VertexI(3), flags: 6 };
        assert_eq!(e.to_string(), "map description is illegal; edge (1, 3) should comprise 4 flags instead of 6");

        let e = MapError::MalformedEdge { edge: EdgeI(2), u: VertexI(1), v: VertexI(3), partition: Partition::Vertices };
        assert!(e.to_string().ends_with("by vertices"));
    }
}
