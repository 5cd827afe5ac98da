use core::fmt;

/// Declares a copyable newtype index with conversions from and to `usize`.
macro_rules! index_type {
    ($name:ident, $prefix:expr) => {
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(pub usize);

        impl From<usize> for $name {
            fn from(n: usize) -> Self {
                $name(n)
            }
        }
        impl From<$name> for usize {
            fn from(i: $name) -> usize {
                i.0
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }
    };
}

// Vertex ids are the labels of the input, not positions.
index_type!(VertexI, "v");
index_type!(EdgeI, "e");
index_type!(FaceI, "f");
// Position of a flag in the map's arena, in creation order.
index_type!(FlagI, "x");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(VertexI(7).to_string(), "v_7");
        assert_eq!(format!("{:?}", EdgeI(3)), "e_3");
        assert_eq!(FaceI::from(2).to_string(), "f_2");
        assert_eq!(usize::from(FlagI(11)), 11);
    }

    #[test]
    fn test_ordering() {
        assert!(VertexI(1) < VertexI(2));
        assert!(EdgeI(0) < EdgeI(10));
    }
}
