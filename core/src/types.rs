use ndarray::Array2;
use smallvec::SmallVec;

/// Single coordinate axis used for board sizes and positions.
pub type Coord = u8;

/// Count type wide enough for every cell of the largest board.
pub type CellCount = u16;

/// Two-dimensional board position `(x, y)`.
pub type Position = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Yields the neighborhood of a position. Callers restrict the result to
/// positions that exist on the current board, so a source does not need to
/// know the board size.
pub trait NeighborSource {
    fn neighbors(&self, pos: Position) -> SmallVec<[Position; 8]>;
}

/// The classic up-to-8 adjacency, clipped to the coordinate range only.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EightNeighbors;

impl NeighborSource for EightNeighbors {
    fn neighbors(&self, pos: Position) -> SmallVec<[Position; 8]> {
        NeighborIter::new(pos, (Coord::MAX, Coord::MAX)).collect()
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Position) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Position) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it stays in bounds.
fn apply_delta(pos: Position, delta: (i8, i8), bounds: Position) -> Option<Position> {
    let next_x = pos.0.checked_add_signed(delta.0)?;
    if next_x >= bounds.0 {
        return None;
    }

    let next_y = pos.1.checked_add_signed(delta.1)?;
    if next_y >= bounds.1 {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Position,
    bounds: Position,
    index: u8,
}

impl NeighborIter {
    fn new(center: Position, bounds: Position) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            let next_item = apply_delta(self.center, *delta, self.bounds);
            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn interior_positions_have_eight_neighbors() {
        let ns = EightNeighbors.neighbors((1, 1));
        assert_eq!(ns.len(), 8);
        assert!(ns.contains(&(0, 0)));
        assert!(ns.contains(&(2, 2)));
        assert!(!ns.contains(&(1, 1)));
    }

    #[test]
    fn origin_neighbors_stay_in_the_coordinate_range() {
        let ns = EightNeighbors.neighbors((0, 0));
        assert_eq!(ns[..], [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn array_neighbor_iteration_respects_bounds() {
        let grid: Array2<u8> = Array2::default([2, 2]);
        let ns: Vec<Position> = grid.iter_neighbors((1, 1)).collect();
        assert_eq!(ns, [(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn mult_covers_the_full_coordinate_range() {
        assert_eq!(mult(3, 3), 9);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
