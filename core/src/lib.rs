#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use flood::*;
pub use generator::*;
pub use input::*;
pub use pool::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod flood;
mod generator;
mod input;
mod pool;
mod tile;
mod types;

/// Immutable cell contents of one dealt board, a square grid keyed by
/// [`Position`]. Live covered/flagged state lives in the [`TilePool`]; the
/// snapshot only answers what each cell holds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    cells: Array2<CellKind>,
    bomb_count: CellCount,
}

impl BoardSnapshot {
    /// Wraps a prebuilt content grid, which must be square and fit the
    /// coordinate range.
    pub fn from_cells(cells: Array2<CellKind>) -> Result<Self> {
        let dim = cells.dim();
        if dim.0 != dim.1 {
            return Err(GameError::NonSquareBoard);
        }
        if Coord::try_from(dim.0).is_err() {
            return Err(GameError::BoardTooLarge);
        }

        let bomb_count = cells
            .iter()
            .filter(|kind| kind.is_bomb())
            .count()
            .try_into()
            .unwrap();
        Ok(Self { cells, bomb_count })
    }

    pub fn from_bomb_positions(size: Coord, bombs: &[Position]) -> Result<Self> {
        let mut cells: Array2<CellKind> = Array2::default((size, size).to_nd_index());

        for &pos in bombs {
            if pos.0 >= size || pos.1 >= size {
                return Err(GameError::InvalidPosition);
            }
            cells[pos.to_nd_index()] = CellKind::Bomb;
        }

        Self::from_cells(cells)
    }

    pub fn size(&self) -> Coord {
        let dim = self.cells.dim();
        dim.0.try_into().unwrap()
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn empty_count(&self) -> CellCount {
        self.total_cells() - self.bomb_count
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.0 < self.size() && pos.1 < self.size()
    }

    pub fn kind_at(&self, pos: Position) -> Option<CellKind> {
        self.contains(pos).then(|| self[pos])
    }

    /// Contents of `pos`, defaulting to [`CellKind::Empty`] off the board.
    pub fn kind_or_default(&self, pos: Position) -> CellKind {
        self.kind_at(pos).unwrap_or_default()
    }

    /// Row-major iterator over every position of the board.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size();
        (0..size).flat_map(move |x| (0..size).map(move |y| (x, y)))
    }

    /// Bombs in the up-to-8 cells around `pos`. Display layers read this for
    /// the revealed digit; the flood fill derives its own count from the
    /// neighbor source instead.
    pub fn adjacent_bomb_count(&self, pos: Position) -> u8 {
        self.cells
            .iter_neighbors(pos)
            .filter(|&p| self[p].is_bomb())
            .count()
            .try_into()
            .unwrap()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            cells: Array2::default([0, 0]),
            bomb_count: 0,
        }
    }
}

impl Index<Position> for BoardSnapshot {
    type Output = CellKind;

    fn index(&self, (x, y): Position) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

/// Outcome of routing one pointer press over a tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PressOutcome {
    /// The flag button was held; the tile's flag now reads this value.
    FlagToggled(bool),
    /// An uncover press landed on a flagged tile and was refused.
    FlagBlocked,
    /// The tile is now uncovered and held this content.
    Uncovered(CellKind),
}

impl PressOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::FlagToggled(_) => true,
            Self::FlagBlocked => false,
            Self::Uncovered(_) => true,
        }
    }
}
