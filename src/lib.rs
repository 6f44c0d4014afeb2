//! Lines-Rust: the game engine of the "Lines" ball puzzle.
//!
//! Balls of several colors sit on a square board. The player moves one ball
//! per turn along a path of empty cells; five or more same-colored balls in
//! a row, column or diagonal are cleared. A move that clears nothing brings
//! three new balls onto the board.
//!
//! ## Modules
//!
//! - [`constants`] - Default board size and rule parameters
//! - [`config`] - Runtime game configuration
//! - [`board`] - Cells, balls and the empty-cell index
//! - [`reach`] - Breadth-first reachability through empty cells
//! - [`runs`] - Run detection along rows, columns and diagonals
//! - [`spawn`] - Random ball placement
//! - [`game`] - Turn orchestration and the click state machine
//! - [`ltp`] - Line-based text protocol for external front ends
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```
//! use lines_rust::config::GameConfig;
//! use lines_rust::game::{Game, Outcome};
//! use lines_rust::reach::reachable_from;
//!
//! let config = GameConfig { seed: Some(1), ..GameConfig::default() };
//! let mut game = Game::new(config).unwrap();
//!
//! // Pick up one of the initial balls and drop it somewhere reachable.
//! let from = game.board().cells().find(|c| !c.state.is_empty()).unwrap().pos;
//! let to = reachable_from(game.board(), from).unwrap()[0];
//! game.on_cell_activated(from.x, from.y).unwrap();
//! let outcome = game.on_cell_activated(to.x, to.y).unwrap();
//! assert!(matches!(outcome, Outcome::Moved(_)));
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod ltp;
pub mod reach;
pub mod runs;
pub mod spawn;
