use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use super::*;

/// Default chance for any one cell to hold a bomb.
pub const DEFAULT_BOMB_PROBABILITY: f64 = 0.8;

/// Draws every cell independently with a fixed bomb probability. There is no
/// bomb count target and no safe-start guarantee, so two boards of the same
/// size can differ in bomb count.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
    bomb_probability: f64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_probability(seed, DEFAULT_BOMB_PROBABILITY)
    }

    pub fn with_probability(seed: u64, bomb_probability: f64) -> Self {
        let clamped = if bomb_probability.is_nan() {
            0.0
        } else {
            bomb_probability.clamp(0.0, 1.0)
        };
        if clamped != bomb_probability {
            log::warn!(
                "Bomb probability {} outside [0, 1], clamped to {}",
                bomb_probability,
                clamped
            );
        }

        Self {
            rng: SmallRng::seed_from_u64(seed),
            bomb_probability: clamped,
        }
    }

    pub fn bomb_probability(&self) -> f64 {
        self.bomb_probability
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, size: Coord) -> BoardSnapshot {
        let cells = Array2::from_shape_simple_fn((size, size).to_nd_index(), || {
            if self.rng.random_bool(self.bomb_probability) {
                CellKind::Bomb
            } else {
                CellKind::Empty
            }
        });

        let board = BoardSnapshot::from_cells(cells).expect("generated grid is square");
        log::debug!(
            "Generated {0}x{0} board, {1} of {2} cells are bombs",
            size,
            board.bomb_count(),
            board.total_cells()
        );
        board
    }
}
