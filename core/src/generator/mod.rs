use crate::*;
pub use random::*;

mod random;

/// Strategy seam for producing the cell contents of a fresh puzzle.
pub trait BoardGenerator {
    fn generate(&mut self, size: Coord) -> BoardSnapshot;
}
