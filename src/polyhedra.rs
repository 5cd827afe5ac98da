//! Face lists of a few small polyhedra.

use itertools::Itertools;

pub fn tetrahedron() -> Vec<Vec<usize>> {
    vec![
        vec![1, 2, 3],
        vec![1, 3, 4],
        vec![1, 2, 4],
        vec![2, 3, 4],
    ]
}

pub fn octahedron() -> Vec<Vec<usize>> {
    vec![
        vec![1, 2, 3],
        vec![1, 2, 5],
        vec![1, 3, 4],
        vec![2, 3, 6],
        vec![1, 4, 5],
        vec![3, 4, 6],
        vec![2, 5, 6],
        vec![4, 5, 6],
    ]
}

pub fn cube() -> Vec<Vec<usize>> {
    vec![
        vec![1, 2, 3, 4],
        vec![5, 8, 7, 6],
        vec![1, 5, 6, 2],
        vec![2, 6, 7, 3],
        vec![3, 7, 8, 4],
        vec![4, 8, 5, 1],
    ]
}

/// The `n`-gonal prism: bottom `1..=n`, top `n+1..=2n`, top vertex `n+i`
/// above bottom vertex `i`.
pub fn prism(n: usize) -> Vec<Vec<usize>> {
    assert!(n >= 3, "a prism needs at least 3 sides");

    let mut faces = Vec::with_capacity(n + 2);
    faces.push((1..=n).collect_vec());
    faces.push(std::iter::once(n + 1).chain((n + 2..=2 * n).rev()).collect_vec());
    for i in 1..=n {
        let j = i % n + 1;
        faces.push(vec![i, n + i, n + j, j]);
    }
    faces
}

/// The `n`-gonal bipyramid: equator `1..=n`, apexes `n+1` and `n+2`.
pub fn bipyramid(n: usize) -> Vec<Vec<usize>> {
    assert!(n >= 3, "a bipyramid needs at least 3 sides");

    (1..=n)
        .flat_map(|i| {
            let j = i % n + 1;
            vec![vec![i, j, n + 1], vec![j, i, n + 2]]
        })
        .collect_vec()
}

/// Looks up a face list by name, `prism5` and `bipyramid4` style names included.
pub fn by_name(name: &str) -> Option<Vec<Vec<usize>>> {
    let name = name.to_lowercase();
    match name.as_str() {
        "tetrahedron" => return Some(tetrahedron()),
        "octahedron" => return Some(octahedron()),
        "cube" => return Some(cube()),
        _ => (),
    }

    let sides = |prefix: &str| {
        name.strip_prefix(prefix)
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n >= 3)
    };
    if let Some(n) = sides("prism") {
        return Some(prism(n));
    }
    if let Some(n) = sides("bipyramid") {
        return Some(bipyramid(n));
    }
    None
}

pub static NAMES: &[&str] = &["tetrahedron", "octahedron", "cube", "prism<N>", "bipyramid<N>"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prism() {
        assert_eq!(
            prism(3),
            vec![vec![1, 2, 3], vec![4, 6, 5], vec![1, 4, 5, 2], vec![2, 5, 6, 3], vec![3, 6, 4, 1]]
        );
        assert_eq!(prism(4).len(), 6);
    }

    #[test]
    fn test_bipyramid() {
        let b = bipyramid(3);
        assert_eq!(b.len(), 6);
        assert_eq!(b[0], vec![1, 2, 4]);
        assert_eq!(b[1], vec![2, 1, 5]);
        assert_eq!(b[5], vec![1, 3, 5]);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("Tetrahedron"), Some(tetrahedron()));
        assert_eq!(by_name("prism5"), Some(prism(5)));
        assert_eq!(by_name("bipyramid4"), Some(bipyramid(4)));
        assert_eq!(by_name("prism2"), None);
        assert_eq!(by_name("dodecahedron"), None);
    }
}
