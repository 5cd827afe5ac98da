pub mod map;
pub mod polyhedra;
pub mod trace;
pub mod util;
