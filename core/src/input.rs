use alloc::boxed::Box;

use crate::*;

/// Reports which physical button the player is holding at the moment a press
/// lands. Read synchronously, once per press.
pub trait HeldButtons {
    fn flag_held(&self) -> bool;
}

impl<F: Fn() -> bool> HeldButtons for F {
    fn flag_held(&self) -> bool {
        self()
    }
}

/// Turns one pointer press into a flag toggle, a refused uncover, or an
/// uncover, consulting the held buttons first.
pub struct InputResolver {
    buttons: Box<dyn HeldButtons>,
}

impl InputResolver {
    pub fn new(buttons: Box<dyn HeldButtons>) -> Self {
        Self { buttons }
    }

    /// The flag button takes precedence: while it is held a press only ever
    /// toggles the flag. Otherwise a flagged tile refuses the uncover, and an
    /// unflagged one uncovers unconditionally.
    pub fn resolve_press(
        &self,
        pos: Position,
        tiles: &mut TilePool,
        content: impl FnOnce(Position) -> CellKind,
    ) -> PressOutcome {
        let tile = tiles.get_or_create(pos, content);

        if self.buttons.flag_held() {
            let flagged = tile.toggle_flag();
            log::debug!("Flag toggled at {:?}: {}", pos, flagged);
            PressOutcome::FlagToggled(flagged)
        } else if tile.is_flagged() {
            log::debug!("Uncover blocked by flag at {:?}", pos);
            PressOutcome::FlagBlocked
        } else {
            let kind = tile.uncover();
            log::debug!("Uncovered tile at {:?}: {:?}", pos, kind);
            PressOutcome::Uncovered(kind)
        }
    }
}
