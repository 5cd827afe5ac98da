use std::collections::HashMap;

use bimap::BiMap;
use itertools::Itertools;
use tracing::debug;

use crate::invalid_map;
use crate::map::error::{MapError, MapResult, Partition};
use crate::map::flag::Flag;
use crate::map::indices::{EdgeI, FaceI, FlagI, VertexI};
use crate::map::Map;
use crate::util::cyclic::CyclicIterable;
use crate::util::swap;

/// Mutable state while a map is assembled. Links stay optional until the
/// last phase has run; `freeze` turns them into plain index arrays.
struct MapBuilder {
    flags: Vec<Flag>,
    flag_index: HashMap<Flag, FlagI>,
    t0: Vec<Option<FlagI>>,
    t1: Vec<Option<FlagI>>,
    t2: Vec<Option<FlagI>>,
    edges: BiMap<EdgeI, (VertexI, VertexI)>,
    face_representatives: Vec<FlagI>,
    face_degrees: Vec<usize>,
}

impl Map {
    /// Builds the map described by a list of face-walks. Each face is the
    /// cyclic sequence of its vertex labels; faces are numbered by position.
    ///
    /// # Errors
    /// Fails with the first violated condition if the faces do not describe
    /// a map of a simple graph in which every edge borders exactly two faces.
    pub fn from_faces<F: AsRef<[usize]>>(faces: &[F]) -> MapResult<Map> {
        if faces.is_empty() {
            return Err(MapError::NoFaces);
        }
        for (f, face) in faces.iter().enumerate() {
            let face = face.as_ref();
            if face.len() < 3 {
                return Err(MapError::DegenerateFace { face: FaceI(f), len: face.len() });
            }
            if face.contains(&0) {
                return Err(MapError::InvalidVertexLabel { face: FaceI(f) });
            }
        }

        let mut builder = MapBuilder::new();
        for (f, face) in faces.iter().enumerate() {
            let face_edges = builder.add_face_sides(FaceI(f), face.as_ref())?;
            builder.link_corners(FaceI(f), face.as_ref(), &face_edges);
        }
        builder.link_edge_sides()?;

        let vertex_count = faces.iter().flat_map(|face| face.as_ref().iter()).unique().count();
        let map = builder.freeze(vertex_count);

        debug!(
            faces = map.face_count(),
            edges = map.edge_count(),
            flags = map.flag_count(),
            vertices = map.vertex_count(),
            "map constructed"
        );

        Ok(map)
    }
}

impl MapBuilder {
    fn new() -> MapBuilder {
        MapBuilder {
            flags: Vec::new(),
            flag_index: HashMap::new(),
            t0: Vec::new(),
            t1: Vec::new(),
            t2: Vec::new(),
            edges: BiMap::new(),
            face_representatives: Vec::new(),
            face_degrees: Vec::new(),
        }
    }

    /// Id of the edge joining `u` and `v`, issuing a new one on first sight.
    fn edge_id(&mut self, u: VertexI, v: VertexI) -> EdgeI {
        let pair = swap((u, v), u > v);
        if let Some(e) = self.edges.get_by_right(&pair) {
            return *e;
        }
        let e = EdgeI(self.edges.len());
        self.edges.insert(e, pair);
        e
    }

    fn add_flag(&mut self, flag: Flag) -> MapResult<FlagI> {
        if self.flag_index.contains_key(&flag) {
            return Err(MapError::DuplicateFlag { vertex: flag.vertex, edge: flag.edge, face: flag.face });
        }
        let i = FlagI(self.flags.len());
        self.flags.push(flag);
        self.flag_index.insert(flag, i);
        self.t0.push(None);
        self.t1.push(None);
        self.t2.push(None);
        Ok(i)
    }

    fn flag_at(&self, vertex: VertexI, edge: EdgeI, face: FaceI) -> FlagI {
        match self.flag_index.get(&Flag::new(vertex, edge, face)) {
            Some(i) => *i,
            None => invalid_map!("no flag ({}, {}, {})", vertex, edge, face),
        }
    }

    /// Creates the two flags on each side of the face's edges and pairs them
    /// by `t0`. Returns the edge ids in face order, the i-th edge leading
    /// from vertex i to vertex i+1.
    fn add_face_sides(&mut self, f: FaceI, face: &[usize]) -> MapResult<Vec<EdgeI>> {
        let mut face_edges = Vec::with_capacity(face.len());

        for (&u, &v) in face.cycle(0, true).tuple_windows() {
            let (u, v) = (VertexI(u), VertexI(v));
            let e = self.edge_id(u, v);
            let head = self.add_flag(Flag::new(v, e, f))?;
            let tail = self.add_flag(Flag::new(u, e, f))?;
            link(&mut self.t0, head, tail);
            face_edges.push(e);
        }

        self.face_degrees.push(face.len());
        Ok(face_edges)
    }

    /// Pairs the two flags at each corner of the face by `t1` and records the
    /// representative at the first corner.
    fn link_corners(&mut self, f: FaceI, face: &[usize], face_edges: &[EdgeI]) {
        // (incoming, outgoing) edge at every corner, starting at corner 0
        let corners = face_edges.cycle(face_edges.len() - 1, true).tuple_windows();

        for (position, (&v, (&incoming, &outgoing))) in face.iter().zip(corners).enumerate() {
            let v = VertexI(v);
            let out_flag = self.flag_at(v, outgoing, f);
            let in_flag = self.flag_at(v, incoming, f);
            if position == 0 {
                self.face_representatives.push(out_flag);
            }
            link(&mut self.t1, out_flag, in_flag);
        }
    }

    /// Checks that every edge has the two sides of a proper edge and pairs
    /// the flags across it by `t2`.
    fn link_edge_sides(&mut self) -> MapResult<()> {
        let mut by_edge: Vec<Vec<FlagI>> = vec![Vec::new(); self.edges.len()];
        for (i, fl) in self.flags.iter().enumerate() {
            by_edge[fl.edge.0].push(FlagI(i));
        }

        for (e, mut group) in by_edge.into_iter().enumerate() {
            let edge = EdgeI(e);
            let (u, v) = match self.edges.get_by_left(&edge) {
                Some(pair) => *pair,
                None => invalid_map!("edge {} has no vertices", edge),
            };

            if group.len() != 4 {
                return Err(MapError::EdgeArity { edge, u, v, flags: group.len() });
            }

            group.sort_by_key(|i| self.flags[i.0].face);
            if !self.splits_into_pairs(&group, |fl| fl.face.0) {
                return Err(MapError::MalformedEdge { edge, u, v, partition: Partition::Faces });
            }

            group.sort_by_key(|i| self.flags[i.0].vertex);
            if !self.splits_into_pairs(&group, |fl| fl.vertex.0) {
                return Err(MapError::MalformedEdge { edge, u, v, partition: Partition::Vertices });
            }

            link(&mut self.t2, group[0], group[1]);
            link(&mut self.t2, group[2], group[3]);
        }

        Ok(())
    }

    /// For four flags sorted by `key`: two equal keys followed by two other
    /// equal keys.
    fn splits_into_pairs(&self, group: &[FlagI], key: impl Fn(&Flag) -> usize) -> bool {
        let k = group.iter().map(|i| key(&self.flags[i.0])).collect_vec();
        k[0] == k[1] && k[2] == k[3] && k[1] != k[2]
    }

    fn freeze(self, vertex_count: usize) -> Map {
        Map {
            links: [freeze_links(self.t0, "t0"), freeze_links(self.t1, "t1"), freeze_links(self.t2, "t2")],
            flags: self.flags,
            flag_index: self.flag_index,
            edges: self.edges,
            face_representatives: self.face_representatives,
            face_degrees: self.face_degrees,
            vertex_count,
        }
    }
}

fn link(links: &mut [Option<FlagI>], a: FlagI, b: FlagI) {
    links[a.0] = Some(b);
    links[b.0] = Some(a);
}

fn freeze_links(links: Vec<Option<FlagI>>, name: &str) -> Vec<FlagI> {
    links
        .into_iter()
        .enumerate()
        .map(|(i, l)| match l {
            Some(l) => l,
            None => invalid_map!("flag {} has no {}", FlagI(i), name),
        })
        .collect()
}
