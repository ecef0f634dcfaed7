use alloc::collections::VecDeque;
use hashbrown::HashSet;

use crate::*;

/// Breadth-first reveal of the connected empty region around `start`.
///
/// Neighbors come from `neighbors`, restricted to positions on `board`. Bomb
/// cells are never uncovered and bound the region; an empty cell that borders
/// a bomb is uncovered but not expanded past, so the reveal stops at the
/// numbered rim. The caller is expected to have uncovered `start` itself.
pub fn reveal_connected_empty(
    board: &BoardSnapshot,
    tiles: &mut TilePool,
    neighbors: &dyn NeighborSource,
    start: Position,
) {
    let mut visited: HashSet<Position> = HashSet::from([start]);
    let mut to_visit = VecDeque::from([start]);

    // visited already bounds the walk by the board's cell count; the explicit
    // budget covers a neighbor source that keeps inventing fresh positions
    for _ in 0..board.total_cells() {
        let Some(visit_pos) = to_visit.pop_front() else {
            break;
        };

        for pos in neighbors.neighbors(visit_pos) {
            if !board.contains(pos) || visited.contains(&pos) {
                continue;
            }

            let tile = tiles.get_or_create(pos, |p| board.kind_or_default(p));
            if tile.content() != CellKind::Empty {
                continue;
            }

            tile.uncover();
            visited.insert(pos);
            log::trace!("Flood uncovered tile at {:?}", pos);

            if clear_of_bombs(board, neighbors, pos) {
                to_visit.push_back(pos);
            }
        }
    }

    if !to_visit.is_empty() {
        log::warn!(
            "Flood fill budget exhausted, {} positions left unexpanded",
            to_visit.len()
        );
    }
}

/// Whether no bomb borders `pos`, i.e. the cell would display a zero count.
fn clear_of_bombs(board: &BoardSnapshot, neighbors: &dyn NeighborSource, pos: Position) -> bool {
    neighbors
        .neighbors(pos)
        .into_iter()
        .filter(|&p| board.contains(p))
        .all(|p| !board[p].is_bomb())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn snapshot(size: Coord, bombs: &[Position]) -> BoardSnapshot {
        BoardSnapshot::from_bomb_positions(size, bombs).unwrap()
    }

    fn pooled(board: &BoardSnapshot) -> TilePool {
        let mut tiles = TilePool::new();
        tiles.update(board.size(), |pos| board.kind_or_default(pos));
        tiles
    }

    fn entries(tiles: &TilePool) -> Vec<(Position, TileState)> {
        let mut all: Vec<_> = tiles.iter().map(|(pos, tile)| (pos, *tile)).collect();
        all.sort_unstable_by_key(|&(pos, _)| pos);
        all
    }

    #[test]
    fn reveals_the_connected_empty_region_but_never_bombs() {
        let board = snapshot(5, &[(4, 4)]);
        let mut tiles = pooled(&board);
        tiles.get_or_create((0, 0), |_| CellKind::Empty).uncover();

        reveal_connected_empty(&board, &mut tiles, &EightNeighbors, (0, 0));

        for pos in board.positions() {
            let tile = tiles.get(pos).unwrap();
            if board[pos].is_bomb() {
                assert!(tile.is_covered(), "bomb at {:?} must stay covered", pos);
            } else {
                assert!(!tile.is_covered(), "empty at {:?} should be revealed", pos);
            }
        }
    }

    #[test]
    fn bomb_wall_splits_the_region() {
        let board = snapshot(5, &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);
        let mut tiles = pooled(&board);
        tiles.get_or_create((0, 0), |_| CellKind::Empty).uncover();

        reveal_connected_empty(&board, &mut tiles, &EightNeighbors, (0, 0));

        assert!(!tiles.get((1, 4)).unwrap().is_covered());
        assert!(tiles.get((2, 2)).unwrap().is_covered());
        assert!(tiles.get((3, 0)).unwrap().is_covered());
        assert!(tiles.get((4, 4)).unwrap().is_covered());
    }

    #[test]
    fn neighbors_of_a_numbered_start_are_still_revealed() {
        let board = snapshot(2, &[(0, 0)]);
        let mut tiles = pooled(&board);
        tiles.get_or_create((1, 1), |_| CellKind::Empty).uncover();

        reveal_connected_empty(&board, &mut tiles, &EightNeighbors, (1, 1));

        assert!(!tiles.get((1, 0)).unwrap().is_covered());
        assert!(!tiles.get((0, 1)).unwrap().is_covered());
        assert!(tiles.get((0, 0)).unwrap().is_covered());
    }

    #[test]
    fn second_run_uncovers_nothing_new() {
        let board = snapshot(3, &[]);
        let mut tiles = pooled(&board);
        tiles.get_or_create((1, 1), |_| CellKind::Empty).uncover();

        reveal_connected_empty(&board, &mut tiles, &EightNeighbors, (1, 1));
        let after_first = entries(&tiles);

        reveal_connected_empty(&board, &mut tiles, &EightNeighbors, (1, 1));
        assert_eq!(entries(&tiles), after_first);
    }

    #[test]
    fn flagged_empty_tiles_in_the_region_are_unflagged_and_revealed() {
        let board = snapshot(3, &[]);
        let mut tiles = pooled(&board);
        tiles.get_or_create((0, 1), |_| CellKind::Empty).toggle_flag();
        tiles.get_or_create((1, 1), |_| CellKind::Empty).uncover();

        reveal_connected_empty(&board, &mut tiles, &EightNeighbors, (1, 1));

        let tile = tiles.get((0, 1)).unwrap();
        assert!(!tile.is_covered());
        assert!(!tile.is_flagged());
    }

    #[test]
    fn creates_missing_tiles_lazily() {
        let board = snapshot(3, &[]);
        let mut tiles = TilePool::new();
        tiles.get_or_create((1, 1), |_| CellKind::Empty).uncover();

        reveal_connected_empty(&board, &mut tiles, &EightNeighbors, (1, 1));

        assert_eq!(tiles.len(), 9);
        assert!(tiles.iter().all(|(_, tile)| !tile.is_covered()));
    }
}
