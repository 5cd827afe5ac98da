//! Flag representation of a map, i.e. of a graph cellularly embedded in a
//! surface.
//!
//! A map is given by its face-walks. Every corner of a face, seen from one
//! side of one edge, is a [`Flag`]. The three involutions `t0`, `t1`, `t2`
//! move to the neighboring flag that differs in the vertex, the edge or the
//! face respectively. Flags are stored in an arena in creation order and the
//! involutions as parallel index arrays; the map never changes after
//! [`Map::from_faces`] returned it.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use bimap::BiMap;
use itertools::Itertools;

pub use self::error::{MapError, MapResult, Partition};
pub use self::flag::{Flag, Involution};
pub use self::indices::{EdgeI, FaceI, FlagI, VertexI};

use crate::util::swap;

#[macro_export]
macro_rules! invalid_map {
    () => { panic!("Assertion failed, referential integrity of map obstructed.") };
    ($($arg:tt)+) => {
        panic!("Assertion failed, referential integrity of map obstructed: {}", format!($($arg)+))
    };
}

mod build;
pub mod error;
pub mod flag;
pub mod indices;
pub mod io;

pub struct Map {
    flags: Vec<Flag>,
    flag_index: HashMap<Flag, FlagI>,
    // t0, t1, t2 by involution index
    links: [Vec<FlagI>; 3],
    edges: BiMap<EdgeI, (VertexI, VertexI)>,
    face_representatives: Vec<FlagI>,
    face_degrees: Vec<usize>,
    vertex_count: usize,
}

impl Map {
    pub fn flag_count(&self) -> usize {
        self.flags.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.face_representatives.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The flag stored at `i`. Indices handed out by this map are always valid.
    pub fn flag(&self, i: FlagI) -> &Flag {
        &self.flags[i.0]
    }

    pub fn try_flag(&self, i: FlagI) -> Option<&Flag> {
        self.flags.get(i.0)
    }

    /// All flags in creation order.
    pub fn flags(&self) -> impl Iterator<Item = (FlagI, &Flag)> {
        self.flags.iter().enumerate().map(|(i, fl)| (FlagI(i), fl))
    }

    pub fn find_flag(&self, vertex: VertexI, edge: EdgeI, face: FaceI) -> Option<FlagI> {
        self.flag_index.get(&Flag::new(vertex, edge, face)).copied()
    }

    /// The first flag created during construction. It is the fixed start point
    /// of the trace search.
    pub fn start_flag(&self) -> FlagI {
        FlagI(0)
    }

    /// Same edge and face, opposite vertex.
    pub fn t0(&self, i: FlagI) -> FlagI {
        self.links[0][i.0]
    }

    /// Same vertex and face, opposite edge.
    pub fn t1(&self, i: FlagI) -> FlagI {
        self.links[1][i.0]
    }

    /// Same vertex and edge, opposite face.
    pub fn t2(&self, i: FlagI) -> FlagI {
        self.links[2][i.0]
    }

    pub fn apply(&self, involution: Involution, i: FlagI) -> FlagI {
        self.links[involution.index()][i.0]
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeI> {
        (0..self.edges.len()).map(EdgeI)
    }

    /// Edges with their canonical vertex pairs, ordered by edge id.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeI, (VertexI, VertexI))> + '_ {
        self.edges.iter().map(|(e, pair)| (*e, *pair)).sorted_by_key(|(e, _)| *e)
    }

    /// Canonical vertex pair (smaller label first) of an edge.
    pub fn edge_vertices(&self, e: EdgeI) -> Option<(VertexI, VertexI)> {
        self.edges.get_by_left(&e).copied()
    }

    /// The edge joining `u` and `v`, in either direction.
    pub fn edge_between(&self, u: VertexI, v: VertexI) -> Option<EdgeI> {
        self.edges.get_by_right(&swap((u, v), u > v)).copied()
    }

    pub fn face_representative(&self, f: FaceI) -> Option<FlagI> {
        self.face_representatives.get(f.0).copied()
    }

    pub fn face_representatives(&self) -> &[FlagI] {
        &self.face_representatives
    }

    pub fn face_degree(&self, f: FaceI) -> Option<usize> {
        self.face_degrees.get(f.0).copied()
    }

    /// The flags bounding the face of `start`, alternating `t0` and `t1` until
    /// `start` recurs. Consecutive pairs share an edge of the face.
    pub fn traverse_face(&self, start: FlagI) -> Vec<FlagI> {
        let mut result = vec![start];
        let mut flag = start;
        loop {
            flag = self.t0(flag);
            result.push(flag);
            flag = self.t1(flag);
            if flag == start {
                break;
            }
            result.push(flag);
        }
        result
    }

    /// The vertex walk of a face, recovered from the flags. It starts at the
    /// first vertex of the face as given in the input.
    pub fn face_walk(&self, f: FaceI) -> Option<Vec<VertexI>> {
        let representative = self.face_representative(f)?;
        Some(
            self.traverse_face(representative)
                .into_iter()
                .step_by(2)
                .map(|i| self.flag(i).vertex)
                .collect_vec(),
        )
    }

    /// One flag together with its three neighbors.
    pub fn describe_flag(&self, i: FlagI) -> String {
        format!(
            "{} -> [{}, {}, {}]",
            self.flag(i),
            self.flag(self.t0(i)),
            self.flag(self.t1(i)),
            self.flag(self.t2(i))
        )
    }

    /// Re-verifies the structural invariants on every flag. A constructed map
    /// always passes, a failure is a bug in the construction.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (i, fl) in self.flags() {
            for t in Involution::all().iter() {
                let image = self.apply(*t, i);
                if image == i {
                    return Err(format!("{} is a fixed point of {}", fl, t));
                }
                if self.apply(*t, image) != i {
                    return Err(format!("{} is not an involution at {}", t, fl));
                }
                let other = self.flag(image);
                let consistent = match t {
                    Involution::T0 => other.edge == fl.edge && other.face == fl.face && other.vertex != fl.vertex,
                    Involution::T1 => other.vertex == fl.vertex && other.face == fl.face && other.edge != fl.edge,
                    Involution::T2 => other.vertex == fl.vertex && other.edge == fl.edge && other.face != fl.face,
                };
                if !consistent {
                    return Err(format!("{} maps {} to the unrelated {}", t, fl, other));
                }
            }
            if self.t0(self.t2(i)) != self.t2(self.t0(i)) {
                return Err(format!("t0 and t2 do not commute at {}", fl));
            }
        }

        let counts = self.flags.iter().counts_by(|fl| fl.edge);
        if let Some((e, n)) = counts.iter().find(|(_, n)| **n != 4) {
            return Err(format!("edge {} comprises {} flags", e, n));
        }
        if self.flag_count() != 4 * self.edge_count() {
            return Err(format!("{} flags for {} edges", self.flag_count(), self.edge_count()));
        }
        for (f, rep) in self.face_representatives.iter().enumerate() {
            let degree = self.face_degree(FaceI(f)).unwrap_or(0);
            let sides = self.traverse_face(*rep).len();
            if sides != 2 * degree {
                return Err(format!("face {} of degree {} is bounded by {} flags", FaceI(f), degree, sides));
            }
        }
        Ok(())
    }
}

impl Debug for Map {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, _) in self.flags() {
            writeln!(f, "{}", self.describe_flag(i))?;
        }
        for (e, (u, v)) in self.edges() {
            writeln!(f, "{}: ({}, {})", e, u.0, v.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyhedra::{cube, octahedron, tetrahedron};
    use crate::util::is_rotation_of;

    #[test]
    fn test_tetrahedron_counts() {
        let m = Map::from_faces(&tetrahedron()).expect("valid map");
        assert_eq!(m.edge_count(), 6);
        assert_eq!(m.flag_count(), 24);
        assert_eq!(m.face_count(), 4);
        assert_eq!(m.vertex_count(), 4);
    }

    #[test]
    fn test_octahedron_counts() {
        let m = Map::from_faces(&octahedron()).expect("valid map");
        assert_eq!(m.edge_count(), 12);
        assert_eq!(m.flag_count(), 48);
        assert_eq!(m.face_count(), 8);
        assert_eq!(m.vertex_count(), 6);
    }

    #[test]
    fn test_involutions() {
        for faces in vec![tetrahedron(), octahedron(), cube()] {
            let m = Map::from_faces(&faces).expect("valid map");
            assert_eq!(m.flag_count(), 4 * m.edge_count());
            for (i, _) in m.flags() {
                assert_eq!(m.t0(m.t0(i)), i);
                assert_eq!(m.t1(m.t1(i)), i);
                assert_eq!(m.t2(m.t2(i)), i);
                assert_eq!(m.t0(m.t2(i)), m.t2(m.t0(i)));
            }
            assert_eq!(m.check_invariants(), Ok(()));
        }
    }

    #[test]
    fn test_edge_ids_in_encounter_order() {
        let m = Map::from_faces(&tetrahedron()).expect("valid map");
        let pairs = m.edges().map(|(_, (u, v))| (u.0, v.0)).collect_vec();
        assert_eq!(pairs, vec![(1, 2), (2, 3), (1, 3), (3, 4), (1, 4), (2, 4)]);
        assert_eq!(m.edge_between(VertexI(3), VertexI(1)), Some(EdgeI(2)));
        assert_eq!(m.edge_between(VertexI(1), VertexI(3)), Some(EdgeI(2)));
        assert_eq!(m.edge_between(VertexI(1), VertexI(1)), None);
        assert_eq!(m.edge_vertices(EdgeI(5)), Some((VertexI(2), VertexI(4))));
        assert_eq!(m.edge_vertices(EdgeI(6)), None);
    }

    #[test]
    fn test_start_flag_and_representatives() {
        let m = Map::from_faces(&tetrahedron()).expect("valid map");
        assert_eq!(m.flag(m.start_flag()).as_tuple(), (2, 0, 0));

        let reps = m.face_representatives().iter().map(|i| m.flag(*i).as_tuple()).collect_vec();
        assert_eq!(reps, vec![(1, 0, 0), (1, 2, 1), (1, 0, 2), (2, 1, 3)]);
        assert_eq!(m.face_representative(FaceI(4)), None);
    }

    #[test]
    fn test_traverse_face() {
        let faces = cube();
        let m = Map::from_faces(&faces).expect("valid map");
        for (f, face) in faces.iter().enumerate() {
            let rep = m.face_representative(FaceI(f)).expect("representative");
            let walk = m.traverse_face(rep);
            assert_eq!(m.face_degree(FaceI(f)), Some(face.len()));
            assert_eq!(walk.len(), 2 * face.len());
            assert!(walk.iter().all(|i| m.flag(*i).face == FaceI(f)));

            // consecutive pairs lie on one edge and reproduce the walk
            let vertices = walk.iter().map(|i| m.flag(*i).vertex.0).collect_vec();
            let pairs = vertices.iter().tuples().map(|(a, b)| vec![*a, *b]).collect_vec();
            for (k, pair) in pairs.iter().enumerate() {
                let expected = vec![face[k], face[(k + 1) % face.len()]];
                assert_eq!(pair, &expected);
            }

            let face_walk = m.face_walk(FaceI(f)).expect("walk").iter().map(|v| v.0).collect_vec();
            assert!(is_rotation_of(face, &face_walk));
        }
        assert_eq!(m.face_degree(FaceI(faces.len())), None);
    }

    #[test]
    fn test_invariants_detect_wrong_degree() {
        let mut m = Map::from_faces(&cube()).expect("valid map");
        assert_eq!(m.check_invariants(), Ok(()));
        m.face_degrees[2] = 5;
        let message = m.check_invariants().expect_err("degree mismatch");
        assert!(message.contains("f_2"));
        assert!(message.contains("8 flags"));
    }

    #[test]
    fn test_find_flag_and_describe() {
        let m = Map::from_faces(&tetrahedron()).expect("valid map");
        let i = m.find_flag(VertexI(2), EdgeI(0), FaceI(0)).expect("flag exists");
        assert_eq!(i, FlagI(0));
        assert_eq!(m.find_flag(VertexI(4), EdgeI(0), FaceI(0)), None);
        assert_eq!(m.try_flag(FlagI(24)), None);

        let t0 = m.flag(m.t0(i));
        assert_eq!(t0.as_tuple(), (1, 0, 0));
        assert!(m.describe_flag(i).starts_with("Flag(2, 0, 0) -> [Flag(1, 0, 0), "));
    }

    #[test]
    fn test_apply_matches_named_involutions() {
        let m = Map::from_faces(&octahedron()).expect("valid map");
        for (i, _) in m.flags() {
            assert_eq!(m.apply(Involution::T0, i), m.t0(i));
            assert_eq!(m.apply(Involution::T1, i), m.t1(i));
            assert_eq!(m.apply(Involution::T2, i), m.t2(i));
        }
    }
}
