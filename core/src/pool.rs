use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::*;

/// Keyed arena of live tile state.
///
/// Positions resolve to arena slots through a map; pruned slots go on a free
/// list and later boards reuse them, so repeated size changes do not churn
/// allocations. All covered/flagged mutation happens through the entries
/// handed out here.
#[derive(Clone, Debug, Default)]
pub struct TilePool {
    index: HashMap<Position, usize>,
    slots: Vec<TileState>,
    free: Vec<usize>,
}

impl TilePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `pos`, creating a fresh covered one with content
    /// from `content` on first reference. Never creates a second entry for
    /// the same position.
    pub fn get_or_create(
        &mut self,
        pos: Position,
        content: impl FnOnce(Position) -> CellKind,
    ) -> &mut TileState {
        let slot = match self.index.get(&pos) {
            Some(&slot) => slot,
            None => {
                let slot = self.alloc(TileState::new(content(pos)));
                self.index.insert(pos, slot);
                slot
            }
        };
        &mut self.slots[slot]
    }

    /// Rebuilds the pool for a `size` by `size` board: every in-range
    /// position gets a fresh covered entry with content from `content`, and
    /// entries outside the new range are pruned to the free list.
    pub fn update(&mut self, size: Coord, mut content: impl FnMut(Position) -> CellKind) {
        let pruned: Vec<Position> = self
            .index
            .keys()
            .copied()
            .filter(|&(x, y)| x >= size || y >= size)
            .collect();
        for pos in pruned {
            self.remove(pos);
        }

        for x in 0..size {
            for y in 0..size {
                let pos = (x, y);
                let state = TileState::new(content(pos));
                match self.index.get(&pos) {
                    Some(&slot) => self.slots[slot] = state,
                    None => {
                        let slot = self.alloc(state);
                        self.index.insert(pos, slot);
                    }
                }
            }
        }
    }

    /// Drops every entry whose position is not in `keep`.
    pub fn clear_except(&mut self, keep: &HashSet<Position>) {
        let dropped: Vec<Position> = self
            .index
            .keys()
            .copied()
            .filter(|pos| !keep.contains(pos))
            .collect();
        for pos in dropped {
            self.remove(pos);
        }
    }

    pub fn get(&self, pos: Position) -> Option<&TileState> {
        self.index.get(&pos).map(|&slot| &self.slots[slot])
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Live entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &TileState)> {
        self.index
            .iter()
            .map(|(&pos, &slot)| (pos, &self.slots[slot]))
    }

    /// Slots allocated in the arena, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn remove(&mut self, pos: Position) {
        if let Some(slot) = self.index.remove(&pos) {
            self.free.push(slot);
        }
    }

    fn alloc(&mut self, state: TileState) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = state;
                slot
            }
            None => {
                self.slots.push(state);
                self.slots.len() - 1
            }
        }
    }

    fn sorted_entries(&self) -> Vec<(Position, TileState)> {
        let mut entries: Vec<_> = self.iter().map(|(pos, tile)| (pos, *tile)).collect();
        entries.sort_unstable_by_key(|&(pos, _)| pos);
        entries
    }
}

/// Pools compare by live entries; arena layout is an implementation detail.
impl PartialEq for TilePool {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(pos, tile)| other.get(pos) == Some(tile))
    }
}

/// Encoded as position-sorted `(position, state)` pairs so the encoding is
/// stable and survives formats without native map keys.
impl Serialize for TilePool {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.sorted_entries().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TilePool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let entries = Vec::<(Position, TileState)>::deserialize(deserializer)?;
        let mut pool = Self::new();
        for (pos, state) in entries {
            let slot = pool.alloc(state);
            pool.index.insert(pos, slot);
        }
        Ok(pool)
    }
}
