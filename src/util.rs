
pub mod cyclic {
    use std::ops::Range;

    /// Cyclic traversal of a face-like slice.
    pub trait CyclicIterable<T> {
        /// Every element once, starting at `start` (taken modulo the length).
        /// With `closed`, the start element is repeated at the end so that
        /// `tuple_windows` yields every side of the cycle.
        fn cycle(&self, start: usize, closed: bool) -> CyclicIterator<'_, T>;
    }

    pub struct CyclicIterator<'a, T> {
        inner: &'a [T],
        start: usize,
        steps: Range<usize>,
    }

    impl<'a, T> CyclicIterator<'a, T> {
        fn at(&self, step: usize) -> &'a T {
            &self.inner[(self.start + step) % self.inner.len()]
        }
    }

    impl<'a, T> Iterator for CyclicIterator<'a, T> {
        type Item = &'a T;

        fn next(&mut self) -> Option<Self::Item> {
            self.steps.next().map(|step| self.at(step))
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            self.steps.size_hint()
        }
    }

    impl<'a, T> DoubleEndedIterator for CyclicIterator<'a, T> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.steps.next_back().map(|step| self.at(step))
        }
    }

    impl<'a, T> ExactSizeIterator for CyclicIterator<'a, T> {}

    impl<T> CyclicIterable<T> for [T] {
        fn cycle(&self, start: usize, closed: bool) -> CyclicIterator<'_, T> {
            let len = self.len();
            let steps = if len == 0 { 0 } else if closed { len + 1 } else { len };
            CyclicIterator { inner: self, start: if len == 0 { 0 } else { start % len }, steps: 0..steps }
        }
    }
}

pub fn swap<T>(pair: (T, T), do_swap: bool) -> (T, T) {
    if do_swap {
        let (a, b) = pair;
        (b, a)
    } else {
        pair
    }
}

/// True if `b` is a cyclic rotation of `a`.
#[cfg(test)]
pub fn is_rotation_of<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    (0..a.len()).any(|shift| (0..a.len()).all(|i| a[(i + shift) % a.len()] == b[i]))
}

#[cfg(test)]
mod tests {
    use super::cyclic::CyclicIterable;
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_cycle_wraps_once() {
        let v = vec![1, 2, 3];
        assert_eq!(v.cycle(0, true).copied().collect_vec(), vec![1, 2, 3, 1]);
        assert_eq!(v.cycle(1, false).copied().collect_vec(), vec![2, 3, 1]);
        assert_eq!(v.cycle(2, true).rev().copied().collect_vec(), vec![3, 2, 1, 3]);
        assert_eq!(v.cycle(4, false).copied().collect_vec(), vec![2, 3, 1]);
        assert_eq!(v.cycle(0, true).len(), 4);
    }

    #[test]
    fn test_cycle_pairs() {
        let v = [4, 5, 6];
        let pairs = v.cycle(0, true).tuple_windows().map(|(a, b)| (*a, *b)).collect_vec();
        assert_eq!(pairs, vec![(4, 5), (5, 6), (6, 4)]);
    }

    #[test]
    fn test_cycle_empty() {
        let v: Vec<u8> = Vec::new();
        assert_eq!(v.cycle(0, true).count(), 0);
    }

    #[test]
    fn test_swap() {
        assert_eq!(swap((1, 2), true), (2, 1));
        assert_eq!(swap((1, 2), false), (1, 2));
    }

    #[test]
    fn test_rotation() {
        assert!(is_rotation_of(&[1, 2, 3], &[2, 3, 1]));
        assert!(is_rotation_of(&[1, 2, 3], &[1, 2, 3]));
        assert!(!is_rotation_of(&[1, 2, 3], &[1, 3, 2]));
        assert!(!is_rotation_of(&[1, 2], &[1, 2, 3]));
    }
}
