use serde::{Deserialize, Serialize};

/// What a cell holds, fixed at generation time.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellKind {
    Bomb,
    Empty,
}

impl CellKind {
    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// Live play state of one tile, owned by the tile pool.
///
/// The flag only holds while the cover does; uncovering drops both.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileState {
    content: CellKind,
    covered: bool,
    flagged: bool,
}

impl TileState {
    pub const fn new(content: CellKind) -> Self {
        Self {
            content,
            covered: true,
            flagged: false,
        }
    }

    pub const fn content(self) -> CellKind {
        self.content
    }

    pub const fn is_covered(self) -> bool {
        self.covered
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Toggles the flag and returns the new value. Uncovered tiles stay
    /// unflagged, so toggling one reports `false` without changing anything.
    pub fn toggle_flag(&mut self) -> bool {
        if self.covered {
            self.flagged = !self.flagged;
        }
        self.flagged
    }

    /// Uncovers the tile and returns its content. Uncovering never reverses.
    pub fn uncover(&mut self) -> CellKind {
        self.covered = false;
        self.flagged = false;
        self.content
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::new(CellKind::Empty)
    }
}
