//! Reachability over empty cells.
//!
//! A ball can travel to any empty cell connected to its own cell through
//! orthogonally adjacent empty cells. All searches here are breadth-first
//! with an explicit queue and visited set, and explore at most the source's
//! connected empty region.

use std::collections::VecDeque;

use crate::board::{Board, Point};
use crate::error::LinesError;

/// Whether `target` can be reached from `source` through empty cells.
///
/// `source` itself need not be empty (it is the ball's origin). An occupied
/// `target` is never reachable.
pub fn can_reach(board: &Board, source: Point, target: Point) -> Result<bool, LinesError> {
    board.get(source)?;
    if !board.get(target)?.is_empty() || source == target {
        return Ok(false);
    }
    let mut found = false;
    bfs(board, source, |p| {
        found = p == target;
        found
    });
    Ok(found)
}

/// Every empty cell reachable from `source`, in breadth-first order.
pub fn reachable_from(board: &Board, source: Point) -> Result<Vec<Point>, LinesError> {
    board.get(source)?;
    let mut region = Vec::new();
    bfs(board, source, |p| {
        region.push(p);
        false
    });
    Ok(region)
}

/// A shortest path from `source` to `target` through empty cells, both ends
/// included, or None if `target` is unreachable.
pub fn shortest_path(
    board: &Board,
    source: Point,
    target: Point,
) -> Result<Option<Vec<Point>>, LinesError> {
    board.get(source)?;
    if !board.get(target)?.is_empty() || source == target {
        return Ok(None);
    }
    let n = board.size();
    let slot = |p: Point| (p.y - 1) * n + (p.x - 1);
    let mut parent: Vec<Option<Point>> = vec![None; n * n];
    let mut visited = vec![false; n * n];
    let mut queue = VecDeque::from([source]);
    visited[slot(source)] = true;

    while let Some(p) = queue.pop_front() {
        if p == target {
            break;
        }
        for q in board.adjacent(p) {
            let i = slot(q);
            if !visited[i] && board.state_at(q).is_empty() {
                visited[i] = true;
                parent[i] = Some(p);
                queue.push_back(q);
            }
        }
    }

    if !visited[slot(target)] {
        return Ok(None);
    }
    let mut path = vec![target];
    let mut cur = target;
    while let Some(prev) = parent[slot(cur)] {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    Ok(Some(path))
}

/// Breadth-first walk over the empty cells connected to `source`, calling
/// `visit` on each one. Stops early when `visit` returns true.
fn bfs(board: &Board, source: Point, mut visit: impl FnMut(Point) -> bool) {
    let n = board.size();
    let slot = |p: Point| (p.y - 1) * n + (p.x - 1);
    let mut visited = vec![false; n * n];
    let mut queue = VecDeque::new();
    visited[slot(source)] = true;
    queue.push_back(source);

    while let Some(p) = queue.pop_front() {
        for q in board.adjacent(p) {
            let i = slot(q);
            if visited[i] || !board.state_at(q).is_empty() {
                continue;
            }
            visited[i] = true;
            if visit(q) {
                return;
            }
            queue.push_back(q);
        }
    }
}
