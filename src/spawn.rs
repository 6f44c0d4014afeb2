//! Random ball placement.

use fastrand::Rng;
use tracing::debug;

use crate::board::{Ball, Board, CellState, Point};

/// Result of a spawn request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spawned {
    /// Cells that received a ball, in placement order.
    pub cells: Vec<Point>,
    /// The board filled up before all requested balls were placed.
    pub exhausted: bool,
}

/// Place up to `count` released balls on random empty cells.
///
/// Each ball picks uniformly among the cells still empty at that moment and
/// gets a uniformly random color from `palette`. Running out of empty cells
/// stops early and sets [`Spawned::exhausted`]; it is not an error.
pub fn spawn_random(board: &mut Board, rng: &mut Rng, palette: &[Ball], count: usize) -> Spawned {
    let mut spawned = Spawned::default();
    if palette.is_empty() {
        return spawned;
    }
    for _ in 0..count {
        let empty = board.empty_cells();
        if empty.is_empty() {
            spawned.exhausted = true;
            break;
        }
        let p = empty[rng.usize(..empty.len())];
        let ball = palette[rng.usize(..palette.len())];
        board.put(p, CellState::Released(ball));
        debug!(cell = %p, ?ball, "spawned ball");
        spawned.cells.push(p);
    }
    spawned
}
