//! Integration tests for lines-rust
//!
//! Scenario tests drive the engine only through its public API, the way a
//! front end would: build a board, click cells, inspect the snapshot.

use lines_rust::board::{Ball, Board, CellState, Point};
use lines_rust::config::GameConfig;
use lines_rust::game::{Game, Outcome};
use lines_rust::reach::{can_reach, reachable_from};
use lines_rust::runs::{Direction, find_runs};
use lines_rust::spawn::spawn_random;

// =============================================================================
// Helper functions
// =============================================================================

fn pt(x: usize, y: usize) -> Point {
    Point::new(x, y)
}

fn seeded(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

/// Place balls of one color on an otherwise empty board.
fn place_all(board: &mut Board, ball: Ball, cells: &[(usize, usize)]) {
    for &(x, y) in cells {
        board.place(pt(x, y), ball).unwrap();
    }
}

/// Check the empty index against a full scan.
fn assert_index_consistent(board: &Board) {
    let mut indexed = board.empty_cells().to_vec();
    indexed.sort();
    let mut scanned: Vec<Point> = board
        .cells()
        .filter(|c| c.state.is_empty())
        .map(|c| c.pos)
        .collect();
    scanned.sort();
    assert_eq!(indexed, scanned);
}

// =============================================================================
// Turn scenarios
// =============================================================================

#[test]
fn test_completing_a_row_clears_it() {
    let mut board = Board::new(10);
    place_all(&mut board, Ball::Red, &[(1, 5), (2, 5), (3, 5), (4, 5), (5, 6)]);
    let mut game = Game::with_board(board, seeded(1)).unwrap();

    assert_eq!(game.on_cell_activated(5, 6).unwrap(), Outcome::Selected(pt(5, 6)));
    let Outcome::Moved(report) = game.on_cell_activated(5, 5).unwrap() else {
        panic!("expected the move to succeed");
    };

    let row: Vec<Point> = (1..=5).map(|x| pt(x, 5)).collect();
    assert_eq!(report.runs.len(), 1);
    assert_eq!(report.runs[0].direction, Direction::Horizontal);
    assert_eq!(report.runs[0].ball, Ball::Red);
    assert_eq!(report.runs[0].cells, row);
    assert_eq!(report.cleared, row);
    assert!(report.spawned.is_empty(), "a clearing move spawns nothing");

    for p in row {
        assert_eq!(game.board().get(p).unwrap(), CellState::Empty);
    }
    assert_eq!(game.board().get(pt(5, 6)).unwrap(), CellState::Empty);
    assert_eq!(game.board().empty_count(), 100);
    assert_eq!(game.score(), 5);
}

#[test]
fn test_refuses_move_with_three_empty_cells() {
    let board = Board::from_rows(&["R.", ".."]).unwrap();
    assert_eq!(board.empty_count(), 3);
    let mut game = Game::with_board(board, seeded(2)).unwrap();
    assert!(game.is_over());

    game.on_cell_activated(1, 1).unwrap();
    let before = game.snapshot();
    assert_eq!(game.on_cell_activated(2, 2).unwrap(), Outcome::GameOver);
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.board().empty_count(), 3);
    assert_eq!(game.turns(), 0);
}

#[test]
fn test_refused_try_move_changes_nothing() {
    let board = Board::from_rows(&["R.", ".."]).unwrap();
    let mut game = Game::with_board(board, seeded(2)).unwrap();
    let before = game.snapshot();
    assert_eq!(game.try_move(pt(1, 1), pt(2, 2)).unwrap(), Outcome::GameOver);
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.board().get(pt(1, 1)).unwrap(), CellState::Released(Ball::Red));
    assert_eq!(game.selected(), None);

    // A ball boxed into the corner cannot leave it.
    let mut board = Board::new(10);
    place_all(&mut board, Ball::Green, &[(1, 1), (2, 1), (1, 2)]);
    let mut game = Game::with_board(board, seeded(2)).unwrap();
    let before = game.snapshot();
    assert_eq!(
        game.try_move(pt(1, 1), pt(8, 8)).unwrap(),
        Outcome::MoveImpossible {
            from: pt(1, 1),
            to: pt(8, 8)
        }
    );
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.selected(), None);
}

#[test]
fn test_spawn_fills_last_three_cells() {
    let mut board = Board::from_rows(&["RGB", "YC.", ".M."]).unwrap();
    assert_eq!(board.empty_count(), 3);
    let mut rng = fastrand::Rng::with_seed(5);
    let spawned = spawn_random(&mut board, &mut rng, &Ball::ALL, 3);
    assert_eq!(spawned.cells.len(), 3);
    assert!(!spawned.exhausted);
    assert!(board.empty_cells().is_empty());
    assert!(board.is_full());
}

#[test]
fn test_spawned_run_is_cleared() {
    // Column 1 and column 5 are each one blue ball short of a run. The red
    // ball at (5,3) steps aside, leaving (1,5) and (5,3) as the only empty
    // cells, so the single blue spawn completes one of the columns.
    const FILLER: [Ball; 5] = [Ball::Red, Ball::Green, Ball::Yellow, Ball::Cyan, Ball::Magenta];
    let mut board = Board::new(5);
    place_all(&mut board, Ball::Blue, &[(1, 1), (1, 2), (1, 3), (1, 4)]);
    place_all(&mut board, Ball::Blue, &[(5, 1), (5, 2), (5, 4), (5, 5)]);
    board.place(pt(5, 3), Ball::Red).unwrap();
    for x in 2..=4 {
        for y in 1..=5 {
            if (x, y) != (4, 3) {
                board.place(pt(x, y), FILLER[(x + 2 * y) % 5]).unwrap();
            }
        }
    }
    assert!(find_runs(&board, 5).is_empty());

    let config = GameConfig {
        palette: vec![Ball::Blue],
        spawn_count: 1,
        seed: Some(9),
        ..GameConfig::default()
    };
    let mut game = Game::with_board(board, config).unwrap();
    let Outcome::Moved(report) = game.try_move(pt(5, 3), pt(4, 3)).unwrap() else {
        panic!("expected the move to succeed");
    };

    assert_eq!(report.spawned.len(), 1);
    assert_eq!(report.runs.len(), 1);
    assert_eq!(report.runs[0].ball, Ball::Blue);
    assert_eq!(report.runs[0].direction, Direction::Vertical);
    assert_eq!(report.cleared.len(), 5);
    assert!(report.cleared.contains(&report.spawned[0]));
    assert_eq!(game.score(), 5);
    assert_eq!(game.board().empty_count(), 6);
    assert!(find_runs(game.board(), 5).is_empty());
    assert_index_consistent(game.board());
}

#[test]
fn test_move_round_trip() {
    let mut board = Board::new(10);
    place_all(&mut board, Ball::Green, &[(2, 2), (7, 3)]);
    place_all(&mut board, Ball::Blue, &[(9, 9), (4, 8)]);
    // Spawned colors differ from the moving ball's.
    let config = GameConfig {
        palette: vec![Ball::Yellow, Ball::Cyan],
        seed: Some(4),
        ..GameConfig::default()
    };
    let mut game = Game::with_board(board, config).unwrap();
    let a = pt(2, 2);
    let b = pt(6, 6);

    let Outcome::Moved(first) = game.try_move(a, b).unwrap() else {
        panic!("expected the move to succeed");
    };
    assert!(first.cleared.is_empty());
    assert_eq!(game.board().get(a).unwrap(), CellState::Empty);
    assert_eq!(game.board().get(b).unwrap(), CellState::Released(Ball::Green));

    // Seed 4 keeps both spawns clear of `a` and `b`.
    assert_eq!(first.spawned.len(), 3);
    assert!(!first.spawned.contains(&a));
    assert!(game.board().get(a).unwrap().is_empty());
    assert!(can_reach(game.board(), b, a).unwrap());

    let Outcome::Moved(second) = game.try_move(b, a).unwrap() else {
        panic!("expected the move back to succeed");
    };
    assert!(second.cleared.is_empty());
    assert_eq!(game.board().get(a).unwrap(), CellState::Released(Ball::Green));
    assert_eq!(second.spawned.len(), 3);
    assert!(!second.spawned.contains(&b));
    assert_eq!(game.board().get(b).unwrap(), CellState::Empty);
    assert_index_consistent(game.board());
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_reachability_is_symmetric() {
    for seed in 0..5 {
        let mut board = Board::new(10);
        spawn_random(&mut board, &mut fastrand::Rng::with_seed(seed), &Ball::ALL, 45);
        let empty = board.empty_cells().to_vec();
        for &a in &empty {
            let region = reachable_from(&board, a).unwrap();
            for &b in &empty {
                let ab = can_reach(&board, a, b).unwrap();
                assert_eq!(ab, can_reach(&board, b, a).unwrap(), "{a} <-> {b}");
                assert_eq!(ab, a != b && region.contains(&b));
            }
        }
    }
}

#[test]
fn test_find_runs_is_idempotent() {
    let mut board = Board::new(10);
    spawn_random(&mut board, &mut fastrand::Rng::with_seed(8), &Ball::ALL[..2], 70);
    let first = find_runs(&board, 5);
    let second = find_runs(&board, 5);
    assert_eq!(first, second);
    for run in &first {
        assert!(run.len() >= 5);
    }
}

#[test]
fn test_random_play_keeps_invariants() {
    let mut game = Game::new(GameConfig {
        seed: Some(21),
        ..GameConfig::with_colors(3).unwrap()
    })
    .unwrap();
    let mut rng = fastrand::Rng::with_seed(21);

    for _ in 0..300 {
        if game.is_over() {
            break;
        }
        let balls: Vec<Point> = game
            .board()
            .cells()
            .filter(|c| !c.state.is_empty())
            .map(|c| c.pos)
            .collect();
        if balls.is_empty() {
            break;
        }
        let from = balls[rng.usize(..balls.len())];
        let targets = game.board().empty_cells().to_vec();
        let to = targets[rng.usize(..targets.len())];

        let before = game.snapshot();
        match game.try_move(from, to).unwrap() {
            Outcome::Moved(report) => {
                assert!(report.path.len() >= 2);
                assert!(report.runs.iter().all(|r| r.len() >= 5));
            }
            Outcome::MoveImpossible { .. } => {
                assert_eq!(game.snapshot(), before);
                assert_eq!(game.selected(), None);
            }
            Outcome::GameOver => break,
            other => panic!("unexpected outcome {other:?}"),
        }

        assert_index_consistent(game.board());
        assert!(find_runs(game.board(), 5).is_empty());
        let selected = game
            .board()
            .cells()
            .filter(|c| matches!(c.state, CellState::Selected(_)))
            .count();
        assert!(selected <= 1);
    }
}
