use crate::*;
pub use prim::*;

mod prim;

pub trait MazeGenerator {
    fn generate(self, rows: usize, cols: usize) -> Result<Maze>;
}

/// Uniform index draws used while carving.
///
/// Implementations must return a value in `0..len`; `len` is never zero.
pub trait RandomSource {
    fn pick(&mut self, len: usize) -> usize;
}

impl RandomSource for rand::rngs::SmallRng {
    fn pick(&mut self, len: usize) -> usize {
        use rand::prelude::*;

        self.random_range(0..len)
    }
}
