use alloc::boxed::Box;
use serde::{Deserialize, Serialize};

use crate::*;

/// One dealt puzzle: the generated cell contents plus the live tile state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    board: BoardSnapshot,
    tiles: TilePool,
}

impl Puzzle {
    pub fn board(&self) -> &BoardSnapshot {
        &self.board
    }

    pub fn tiles(&self) -> &TilePool {
        &self.tiles
    }
}

/// Observer of puzzle endings. Fire and forget, invoked at most once per
/// activation; there is no terminal state, so later activations can notify
/// again.
pub trait PuzzleEvents {
    fn on_failed(&mut self, puzzle: &Puzzle);
    fn on_completed(&mut self, puzzle: &Puzzle);
}

/// The two operations surrounding layers need from whoever runs the puzzle:
/// content lookup for tile display and activation for input delivery.
pub trait PuzzleHost {
    fn content_kind(&self, pos: Position) -> CellKind;
    fn activate(&mut self, pos: Position) -> PressOutcome;
}

/// Owns the current puzzle and routes activations through the input
/// resolver, the flood fill, and the completion check.
pub struct PuzzleEngine {
    puzzle: Puzzle,
    generator: Box<dyn BoardGenerator>,
    resolver: InputResolver,
    neighbors: Box<dyn NeighborSource>,
    events: Option<Box<dyn PuzzleEvents>>,
}

impl PuzzleEngine {
    /// Starts with an empty zero-size puzzle; deal one with
    /// [`Self::new_puzzle`].
    pub fn new(generator: Box<dyn BoardGenerator>, buttons: Box<dyn HeldButtons>) -> Self {
        Self {
            puzzle: Puzzle::default(),
            generator,
            resolver: InputResolver::new(buttons),
            neighbors: Box::new(EightNeighbors),
            events: None,
        }
    }

    pub fn with_events(mut self, events: Box<dyn PuzzleEvents>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_neighbor_source(mut self, neighbors: Box<dyn NeighborSource>) -> Self {
        self.neighbors = neighbors;
        self
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn size(&self) -> Coord {
        self.puzzle.board.size()
    }

    /// Deals a fresh board, replacing the previous puzzle wholesale. Tile
    /// slots from the old board are reused.
    pub fn new_puzzle(&mut self, size: Coord) {
        let board = self.generator.generate(size);
        self.puzzle
            .tiles
            .update(size, |pos| board.kind_or_default(pos));
        self.puzzle.board = board;
    }

    /// Routes a single activation. Flag outcomes end here; uncovering a bomb
    /// notifies failure, and uncovering an empty cell either completes the
    /// puzzle or floods the surrounding empty region.
    pub fn on_activate(&mut self, pos: Position) -> PressOutcome {
        let Puzzle { board, tiles } = &mut self.puzzle;
        let outcome = self
            .resolver
            .resolve_press(pos, tiles, |p| board.kind_or_default(p));

        match outcome {
            PressOutcome::FlagToggled(_) | PressOutcome::FlagBlocked => {}
            PressOutcome::Uncovered(CellKind::Bomb) => {
                log::debug!("Bomb uncovered at {:?}", pos);
                if let Some(events) = self.events.as_deref_mut() {
                    events.on_failed(&self.puzzle);
                }
            }
            PressOutcome::Uncovered(CellKind::Empty) => {
                if self.is_complete() {
                    log::debug!("Puzzle completed at {:?}", pos);
                    if let Some(events) = self.events.as_deref_mut() {
                        events.on_completed(&self.puzzle);
                    }
                } else {
                    reveal_connected_empty(
                        &self.puzzle.board,
                        &mut self.puzzle.tiles,
                        &*self.neighbors,
                        pos,
                    );
                }
            }
        }

        outcome
    }

    /// Content for `pos`, or [`CellKind::Empty`] off the board. Never fails.
    pub fn content_kind(&self, pos: Position) -> CellKind {
        self.puzzle.board.kind_or_default(pos)
    }

    /// A puzzle is complete when every bomb is covered or flagged and every
    /// empty cell is uncovered. Tiles never referenced count as covered.
    pub fn is_complete(&self) -> bool {
        let Puzzle { board, tiles } = &self.puzzle;
        board.positions().all(|pos| {
            let (covered, flagged) = tiles
                .get(pos)
                .map_or((true, false), |tile| (tile.is_covered(), tile.is_flagged()));
            if board[pos].is_bomb() {
                flagged || covered
            } else {
                !covered
            }
        })
    }
}

impl PuzzleHost for PuzzleEngine {
    fn content_kind(&self, pos: Position) -> CellKind {
        PuzzleEngine::content_kind(self, pos)
    }

    fn activate(&mut self, pos: Position) -> PressOutcome {
        self.on_activate(pos)
    }
}
