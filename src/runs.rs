//! Detection and clearing of aligned same-colored runs.
//!
//! The board is cut into lines along four directions. Each line is walked
//! from its boundary start cell, and every maximal stretch of one color that
//! is at least `min_run` long becomes a [`Run`]. Lines shorter than
//! `min_run` (the diagonals near the corners) are never scanned.

use std::collections::BTreeSet;

use crate::board::{Ball, Board, Point};
use crate::error::LinesError;

/// Scan direction of a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Down and to the right.
    Diagonal,
    /// Up and to the right.
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// Unit step `(dx, dy)`.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// A maximal stretch of same-colored balls along one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub ball: Ball,
    pub direction: Direction,
    /// Cells in scan order.
    pub cells: Vec<Point>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// First cell of every line in `dir`.
///
/// Rows start in column 1 and columns in row 1. Down-right diagonals start
/// on the left edge or the top edge; up-right diagonals start on the left
/// edge or the bottom edge. The corner shared by both edges is listed once.
fn line_starts(size: usize, dir: Direction) -> Vec<Point> {
    let left_edge = (1..=size).map(|y| Point::new(1, y));
    match dir {
        Direction::Horizontal => left_edge.collect(),
        Direction::Vertical => (1..=size).map(|x| Point::new(x, 1)).collect(),
        Direction::Diagonal => left_edge
            .chain((2..=size).map(|x| Point::new(x, 1)))
            .collect(),
        Direction::AntiDiagonal => left_edge
            .chain((2..=size).map(|x| Point::new(x, size)))
            .collect(),
    }
}

/// Every line in `dir` holding at least `min_len` cells.
pub(crate) fn lines(size: usize, dir: Direction, min_len: usize) -> Vec<Vec<Point>> {
    let (dx, dy) = dir.step();
    let on_board = |x: isize, y: isize| x >= 1 && y >= 1 && x <= size as isize && y <= size as isize;
    line_starts(size, dir)
        .into_iter()
        .map(|start| {
            let mut line = Vec::with_capacity(size);
            let (mut x, mut y) = (start.x as isize, start.y as isize);
            while on_board(x, y) {
                line.push(Point::new(x as usize, y as usize));
                x += dx;
                y += dy;
            }
            line
        })
        .filter(|line| line.len() >= min_len)
        .collect()
}

/// Find every run of at least `min_run` same-colored balls.
///
/// A cell may appear in several runs (e.g. where a row run crosses a column
/// run). Selected balls count like any other ball.
pub fn find_runs(board: &Board, min_run: usize) -> Vec<Run> {
    let min_run = min_run.max(1);
    let mut runs = Vec::new();
    for dir in Direction::ALL {
        for line in lines(board.size(), dir, min_run) {
            scan_line(board, &line, dir, min_run, &mut runs);
        }
    }
    runs
}

fn scan_line(board: &Board, line: &[Point], dir: Direction, min_run: usize, out: &mut Vec<Run>) {
    let mut i = 0;
    while i < line.len() {
        let Some(ball) = board.state_at(line[i]).ball() else {
            i += 1;
            continue;
        };
        let mut j = i + 1;
        while j < line.len() && board.state_at(line[j]).ball() == Some(ball) {
            j += 1;
        }
        if j - i >= min_run {
            out.push(Run {
                ball,
                direction: dir,
                cells: line[i..j].to_vec(),
            });
        }
        i = j;
    }
}

/// Union of the cells of `runs`, each cell once, sorted.
pub fn cells_to_clear(runs: &[Run]) -> Vec<Point> {
    runs.iter()
        .flat_map(|r| r.cells.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Empty every cell covered by `runs`. Returns the cleared cells.
pub fn clear_runs(board: &mut Board, runs: &[Run]) -> Result<Vec<Point>, LinesError> {
    let cells = cells_to_clear(runs);
    for &p in &cells {
        board.clear(p)?;
    }
    Ok(cells)
}
