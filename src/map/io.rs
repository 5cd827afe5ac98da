use std::collections::HashSet;
use std::io::Read;

use thiserror::Error;

use super::{Map, MapError};

static PLANAR_CODE_HEADER: &[u8] = b">>planar_code<<";

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("input could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: '{token}' is not a vertex label")]
    Parse { line: usize, token: String },

    #[error("not a valid planar code file: {0}")]
    PlanarCode(String),

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Parses a face list: one face per line, vertex labels separated by
/// whitespace or commas. Empty lines and lines starting with `#` are skipped.
pub fn parse_face_list(text: &str) -> Result<Vec<Vec<usize>>, ReadError> {
    let mut faces = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let face = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<usize>().map_err(|_| ReadError::Parse { line: number + 1, token: token.to_string() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        faces.push(face);
    }

    Ok(faces)
}

pub fn read_face_list(reader: &mut dyn Read) -> Result<Vec<Vec<usize>>, ReadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_face_list(&text)
}

/// Reads all graphs of a plantri `planar_code` file (one-byte entries only)
/// and returns the face list of each embedding.
pub fn read_plantri_planar_code(data: &[u8]) -> Result<Vec<Vec<Vec<usize>>>, ReadError> {
    if !data.starts_with(PLANAR_CODE_HEADER) {
        return Err(ReadError::PlanarCode("header '>>planar_code<<' missing".to_string()));
    }

    let mut result = Vec::new();
    let mut iter = data.iter().skip(PLANAR_CODE_HEADER.len()).copied().peekable();

    while iter.peek().is_some() {
        let n = iter.next().unwrap_or(0) as usize;
        if n == 0 {
            return Err(ReadError::PlanarCode("two-byte entries are not supported".to_string()));
        }

        let mut rotation = Vec::with_capacity(n);
        for v in 1..=n {
            let mut neighbors = Vec::new();
            loop {
                match iter.next() {
                    Some(0) => break,
                    Some(w) if w as usize == v || neighbors.contains(&(w as usize)) => {
                        return Err(ReadError::PlanarCode(format!(
                            "vertex {} lists neighbor {} twice or is adjacent to itself",
                            v, w
                        )))
                    }
                    Some(w) if (w as usize) <= n => neighbors.push(w as usize),
                    Some(w) => {
                        return Err(ReadError::PlanarCode(format!(
                            "vertex {} has neighbor {} in a graph of {} vertices",
                            v, w, n
                        )))
                    }
                    None => return Err(ReadError::PlanarCode(format!("data ends inside graph {}", result.len()))),
                }
            }
            rotation.push(neighbors);
        }

        result.push(faces_of_rotation_system(&rotation)?);
    }

    Ok(result)
}

/// Faces of an embedding given by the clockwise neighbor order around each
/// vertex, `rotation[v - 1]` listing the neighbors of `v`. A face is the orbit
/// of a dart (u, v) under (u, v) -> (v, w), w following u around v.
pub fn faces_of_rotation_system(rotation: &[Vec<usize>]) -> Result<Vec<Vec<usize>>, ReadError> {
    let successor = |u: usize, v: usize| -> Result<usize, ReadError> {
        let around = match v.checked_sub(1).and_then(|i| rotation.get(i)) {
            Some(around) => around,
            None => return Err(ReadError::PlanarCode(format!("vertex {} does not exist", v))),
        };
        match around.iter().position(|&w| w == u) {
            Some(p) => Ok(around[(p + 1) % around.len()]),
            None => Err(ReadError::PlanarCode(format!("{} is a neighbor of {}, but not vice versa", v, u))),
        }
    };

    let darts = rotation.iter().map(Vec::len).sum::<usize>();
    let mut visited = HashSet::new();
    let mut faces = Vec::new();

    for (u, neighbors) in rotation.iter().enumerate() {
        let u = u + 1;
        for &v in neighbors {
            if visited.contains(&(u, v)) {
                continue;
            }

            let mut face = Vec::new();
            let (mut a, mut b) = (u, v);
            loop {
                if !visited.insert((a, b)) || face.len() == darts {
                    return Err(ReadError::PlanarCode(format!(
                        "the face through {} -> {} does not close, the rotation system is inconsistent",
                        u, v
                    )));
                }
                face.push(a);
                let w = successor(a, b)?;
                a = b;
                b = w;
                if (a, b) == (u, v) {
                    break;
                }
            }
            faces.push(face);
        }
    }

    Ok(faces)
}

impl Map {
    /// Reads a face list in the format of [`parse_face_list`] and builds its map.
    pub fn read_face_list(reader: &mut dyn Read) -> Result<Map, ReadError> {
        let faces = read_face_list(reader)?;
        Ok(Map::from_faces(&faces)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyhedra::tetrahedron;

    fn tetrahedron_planar_code() -> Vec<u8> {
        let mut data = PLANAR_CODE_HEADER.to_vec();
        data.extend_from_slice(&[4, 2, 3, 4, 0, 1, 4, 3, 0, 1, 2, 4, 0, 1, 3, 2, 0]);
        data
    }

    #[test]
    fn test_parse_face_list() {
        let text = "# tetrahedron\n1 2 3\n1,3,4\n\n  1, 2, 4  \n2\t3 4\n";
        assert_eq!(parse_face_list(text).unwrap(), tetrahedron());
    }

    #[test]
    fn test_parse_error() {
        match parse_face_list("1 2 3\n1 x 4\n") {
            Err(ReadError::Parse { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(parse_face_list("1 2 -3").is_err());
    }

    #[test]
    fn test_read_map() {
        let mut input = "1 2 3\n1 3 4\n1 2 4\n2 3 4\n".as_bytes();
        let m = Map::read_face_list(&mut input).unwrap();
        assert_eq!(m.flag_count(), 24);

        let mut input = "1 2 3\n".as_bytes();
        match Map::read_face_list(&mut input) {
            Err(ReadError::Map(MapError::EdgeArity { .. })) => (),
            other => panic!("expected map error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_planar_code() {
        let graphs = read_plantri_planar_code(&tetrahedron_planar_code()).unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0], vec![vec![1, 2, 4], vec![1, 3, 2], vec![1, 4, 3], vec![2, 3, 4]]);

        let m = Map::from_faces(&graphs[0]).unwrap();
        assert_eq!(m.edge_count(), 6);
        assert_eq!(m.check_invariants(), Ok(()));
    }

    #[test]
    fn test_planar_code_two_graphs() {
        let mut data = tetrahedron_planar_code();
        data.extend_from_slice(&tetrahedron_planar_code()[PLANAR_CODE_HEADER.len()..]);
        assert_eq!(read_plantri_planar_code(&data).unwrap().len(), 2);
    }

    #[test]
    fn test_planar_code_errors() {
        assert!(matches!(read_plantri_planar_code(b"<<planar_code>>"), Err(ReadError::PlanarCode(_))));

        let mut truncated = tetrahedron_planar_code();
        truncated.pop();
        assert!(matches!(read_plantri_planar_code(&truncated), Err(ReadError::PlanarCode(_))));

        let mut out_of_range = PLANAR_CODE_HEADER.to_vec();
        out_of_range.extend_from_slice(&[3, 2, 7, 0]);
        assert!(matches!(read_plantri_planar_code(&out_of_range), Err(ReadError::PlanarCode(_))));

        let mut repeated = PLANAR_CODE_HEADER.to_vec();
        repeated.extend_from_slice(&[4, 2, 3, 2, 4, 0, 1, 0, 1, 0, 1, 0]);
        assert!(matches!(read_plantri_planar_code(&repeated), Err(ReadError::PlanarCode(_))));

        let mut self_loop = PLANAR_CODE_HEADER.to_vec();
        self_loop.extend_from_slice(&[3, 1, 2, 0, 1, 3, 0, 2, 0]);
        assert!(matches!(read_plantri_planar_code(&self_loop), Err(ReadError::PlanarCode(_))));

        let mut asymmetric = PLANAR_CODE_HEADER.to_vec();
        asymmetric.extend_from_slice(&[3, 2, 3, 0, 3, 0, 1, 2, 0]);
        assert!(matches!(read_plantri_planar_code(&asymmetric), Err(ReadError::PlanarCode(_))));
    }

    #[test]
    fn test_inconsistent_rotation_system() {
        let rotation = vec![vec![2, 3, 2, 4], vec![1], vec![1], vec![1]];
        assert!(matches!(faces_of_rotation_system(&rotation), Err(ReadError::PlanarCode(_))));

        let rotation = vec![vec![2, 3], vec![1, 5], vec![1, 2]];
        assert!(matches!(faces_of_rotation_system(&rotation), Err(ReadError::PlanarCode(_))));
    }
}
