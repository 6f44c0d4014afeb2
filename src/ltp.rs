//! Lines Text Protocol (LTP).
//!
//! A line-oriented protocol for driving the engine from a separate UI
//! process, in the style of the Go Text Protocol. Each request is one line,
//! optionally prefixed by a numeric id. Each response starts with `=` on
//! success or `?` on failure, echoes the id, and ends with a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - engine identification
//! - `list_commands` - list all supported commands
//! - `known_command <cmd>` - check if a command is supported
//! - `quit` - exit the command loop
//! - `boardsize <n>` - start a new game on an n x n board
//! - `clear_board` - start a new game with the current settings
//! - `click <vertex>` - activate a cell, as a mouse click would
//! - `move <from> <to>` - select a ball and move it in one request
//! - `showboard` - render the board
//! - `empty_count` - number of empty cells
//! - `score` - balls cleared so far
//! - `status` - `playing` or `over`
//!
//! Vertices are a column letter and a row number: `E5` is x 5, y 5.
//!
//! ## Example
//!
//! ```
//! use lines_rust::config::GameConfig;
//! use lines_rust::ltp::LtpEngine;
//!
//! let mut engine = LtpEngine::new(GameConfig::default()).unwrap();
//! let mut out = Vec::new();
//! engine.run(&b"1 name\nquit\n"[..], &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("=1 lines-rust"));
//! ```

use std::io::{self, BufRead, Write};

use crate::board::{Point, parse_coord, str_coord};
use crate::config::GameConfig;
use crate::error::LinesError;
use crate::game::{Game, Outcome};

/// The list of known LTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "click",
    "empty_count",
    "known_command",
    "list_commands",
    "move",
    "name",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "status",
    "version",
];

/// LTP engine state.
pub struct LtpEngine {
    game: Game,
}

impl LtpEngine {
    pub fn new(config: GameConfig) -> Result<Self, LinesError> {
        Ok(Self {
            game: Game::new(config)?,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn vertex(&self, s: &str) -> Result<Point, String> {
        let p = parse_coord(s).ok_or_else(|| format!("invalid vertex: {s}"))?;
        self.game
            .board()
            .point(p.x, p.y)
            .map_err(|e| e.to_string())
    }

    /// Execute an LTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "lines-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let Ok(size) = args[0].parse::<usize>() else {
                    return (false, "invalid size".to_string());
                };
                let config = GameConfig {
                    size,
                    ..self.game.config().clone()
                };
                match Game::new(config) {
                    Ok(game) => {
                        self.game = game;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "clear_board" => match self.game.restart() {
                Ok(()) => (true, String::new()),
                Err(e) => (false, e.to_string()),
            },

            "click" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let p = match self.vertex(args[0]) {
                    Ok(p) => p,
                    Err(e) => return (false, e),
                };
                match self.game.on_cell_activated(p.x, p.y) {
                    Ok(outcome) => (true, describe(&outcome)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "move" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let (from, to) = match (self.vertex(args[0]), self.vertex(args[1])) {
                    (Ok(from), Ok(to)) => (from, to),
                    (Err(e), _) | (_, Err(e)) => return (false, e),
                };
                match self.game.try_move(from, to) {
                    Ok(outcome @ (Outcome::MoveImpossible { .. } | Outcome::GameOver)) => {
                        (false, describe(&outcome))
                    }
                    Ok(outcome) => (true, describe(&outcome)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => {
                let board = self.game.board().to_string();
                (true, format!("\n{}", board.trim_end()))
            }

            "empty_count" => (true, self.game.board().empty_count().to_string()),

            "score" => (true, self.game.score().to_string()),

            "status" => {
                let status = if self.game.is_over() { "over" } else { "playing" };
                (true, status.to_string())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

fn join_vertices(cells: &[Point]) -> String {
    cells.iter().map(|&p| str_coord(p)).collect::<Vec<_>>().join(",")
}

/// One-line description of an outcome.
fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Selected(p) => format!("selected {}", str_coord(*p)),
        Outcome::Released(p) => format!("released {}", str_coord(*p)),
        Outcome::NoSelection => "no ball selected".to_string(),
        Outcome::MoveImpossible { from, to } => {
            format!("move impossible {} {}", str_coord(*from), str_coord(*to))
        }
        Outcome::GameOver => "game over".to_string(),
        Outcome::Moved(report) => {
            let mut s = format!(
                "moved {} {} cleared [{}] spawned [{}]",
                str_coord(report.from),
                str_coord(report.to),
                join_vertices(&report.cleared),
                join_vertices(&report.spawned)
            );
            if report.game_over {
                s.push_str(" game over");
            }
            s
        }
    }
}
