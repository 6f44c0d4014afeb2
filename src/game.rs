//! Turn orchestration: selection, moves, clearing and spawning.
//!
//! A [`Game`] owns the board, the pending selection and the RNG. The UI
//! reports clicks through [`Game::on_cell_activated`] and redraws from
//! [`Game::snapshot`]. One turn runs start to finish inside a single call:
//!
//! 1. the target must be reachable from the selected ball,
//! 2. the ball moves and runs through the target are cleared,
//! 3. if nothing was cleared, new balls spawn and their runs are cleared.

use fastrand::Rng;
use tracing::{debug, info};

use crate::board::{Board, BoardSnapshot, CellState, Point};
use crate::config::GameConfig;
use crate::error::LinesError;
use crate::reach::{can_reach, shortest_path};
use crate::runs::{Run, clear_runs, find_runs};
use crate::spawn::spawn_random;

/// What a click or move request did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The ball at this cell is now selected.
    Selected(Point),
    /// The selected ball at this cell was released.
    Released(Point),
    /// An empty cell was clicked with no ball selected.
    NoSelection,
    /// The target cannot be reached. Nothing changed and the ball stays
    /// selected.
    MoveImpossible { from: Point, to: Point },
    /// Too few empty cells are left to play a turn. Nothing changed.
    GameOver,
    /// A full turn was played.
    Moved(TurnReport),
}

/// Everything a completed turn did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub from: Point,
    pub to: Point,
    /// Route the ball took, both ends included.
    pub path: Vec<Point>,
    /// Runs found after the move, or after the spawn if the move formed none.
    pub runs: Vec<Run>,
    /// Cells emptied by clearing `runs`.
    pub cleared: Vec<Point>,
    /// Cells that received a new ball.
    pub spawned: Vec<Point>,
    /// The turn left the board unable to host another one.
    pub game_over: bool,
}

/// A Lines game in progress.
pub struct Game {
    config: GameConfig,
    board: Board,
    /// The cell holding the selected ball, if any.
    selected: Option<Point>,
    rng: Rng,
    /// Balls cleared so far.
    score: usize,
    /// Completed moves.
    turns: usize,
}

impl Game {
    /// Start a game on a fresh board seeded with `config.initial_balls`.
    pub fn new(config: GameConfig) -> Result<Self, LinesError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let mut game = Self {
            board: Board::new(config.size),
            config,
            selected: None,
            rng,
            score: 0,
            turns: 0,
        };
        game.seed_board()?;
        Ok(game)
    }

    /// Resume play on an existing board. `config.size` is taken from the
    /// board and no initial balls are added. If the board holds more than
    /// one selected ball, the first in row order stays selected and the
    /// others are released.
    pub fn with_board(board: Board, config: GameConfig) -> Result<Self, LinesError> {
        let config = GameConfig {
            size: board.size(),
            ..config
        };
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        // Keep the first selected ball as the pending source; release the rest.
        let mut board = board;
        let mut selected = None;
        let picked: Vec<_> = board
            .cells()
            .filter_map(|c| match c.state {
                CellState::Selected(ball) => Some((c.pos, ball)),
                _ => None,
            })
            .collect();
        for (p, ball) in picked {
            if selected.is_none() {
                selected = Some(p);
            } else {
                board.set(p, CellState::Released(ball))?;
            }
        }
        Ok(Self {
            config,
            board,
            selected,
            rng,
            score: 0,
            turns: 0,
        })
    }

    /// Clear the board and start over with the same configuration.
    pub fn restart(&mut self) -> Result<(), LinesError> {
        self.board = Board::new(self.config.size);
        self.selected = None;
        self.score = 0;
        self.turns = 0;
        self.seed_board()
    }

    fn seed_board(&mut self) -> Result<(), LinesError> {
        let spawned = spawn_random(
            &mut self.board,
            &mut self.rng,
            &self.config.palette,
            self.config.initial_balls,
        );
        let runs = find_runs(&self.board, self.config.min_run);
        clear_runs(&mut self.board, &runs)?;
        debug!(balls = spawned.cells.len(), "board seeded");
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid_length(&self) -> usize {
        self.board.size()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn selected(&self) -> Option<Point> {
        self.selected
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// No turn can be played: a move would leave too few cells to spawn into.
    pub fn is_over(&self) -> bool {
        self.board.empty_count() <= self.config.spawn_count
    }

    /// Handle a click on `(x, y)`.
    ///
    /// - selected ball: release it;
    /// - other ball: release any selected ball and select this one;
    /// - empty cell: move the selected ball here, if any.
    pub fn on_cell_activated(&mut self, x: usize, y: usize) -> Result<Outcome, LinesError> {
        let p = self.board.point(x, y)?;
        match self.board.state_at(p) {
            CellState::Selected(ball) => {
                self.board.set(p, CellState::Released(ball))?;
                self.selected = None;
                debug!(cell = %p, "ball released");
                Ok(Outcome::Released(p))
            }
            CellState::Released(_) => {
                self.select(p)?;
                Ok(Outcome::Selected(p))
            }
            CellState::Empty => match self.selected {
                Some(from) => self.play(from, p),
                None => Ok(Outcome::NoSelection),
            },
        }
    }

    /// Select the ball at `from` and try to move it to `to` in one step.
    /// A refused move leaves the board and any earlier selection untouched.
    pub fn try_move(&mut self, from: Point, to: Point) -> Result<Outcome, LinesError> {
        if self.board.get(from)?.is_empty() {
            return Err(LinesError::NotOccupied(from));
        }
        if !self.board.get(to)?.is_empty() {
            return Err(LinesError::NotEmpty(to));
        }
        if let Some(refused) = self.refusal(from, to)? {
            return Ok(refused);
        }
        self.select(from)?;
        self.apply_move(from, to)
    }

    fn select(&mut self, p: Point) -> Result<(), LinesError> {
        if let Some(prev) = self.selected.take() {
            if let Some(ball) = self.board.get(prev)?.ball() {
                self.board.set(prev, CellState::Released(ball))?;
            }
        }
        let ball = self.board.get(p)?.ball().ok_or(LinesError::NotOccupied(p))?;
        self.board.set(p, CellState::Selected(ball))?;
        self.selected = Some(p);
        debug!(cell = %p, ?ball, "ball selected");
        Ok(())
    }

    /// Move the selected ball at `from` to the empty cell `to`.
    fn play(&mut self, from: Point, to: Point) -> Result<Outcome, LinesError> {
        match self.refusal(from, to)? {
            Some(refused) => Ok(refused),
            None => self.apply_move(from, to),
        }
    }

    /// Why a move from `from` to `to` cannot be played, if it cannot.
    /// Never touches the board.
    fn refusal(&self, from: Point, to: Point) -> Result<Option<Outcome>, LinesError> {
        if self.is_over() {
            info!(empty = self.board.empty_count(), "end of game");
            return Ok(Some(Outcome::GameOver));
        }
        if !can_reach(&self.board, from, to)? {
            info!(%from, %to, "move impossible");
            return Ok(Some(Outcome::MoveImpossible { from, to }));
        }
        Ok(None)
    }

    /// Play a move already known to be legal.
    fn apply_move(&mut self, from: Point, to: Point) -> Result<Outcome, LinesError> {
        let path = shortest_path(&self.board, from, to)?.unwrap_or_default();

        let ball = self.board.clear(from)?.ok_or(LinesError::NotOccupied(from))?;
        self.board.set(to, CellState::Released(ball))?;
        self.selected = None;
        self.turns += 1;

        let min_run = self.config.min_run;
        let mut runs = find_runs(&self.board, min_run);
        let mut spawned = Vec::new();
        let mut exhausted = false;
        if runs.is_empty() {
            let s = spawn_random(
                &mut self.board,
                &mut self.rng,
                &self.config.palette,
                self.config.spawn_count,
            );
            spawned = s.cells;
            exhausted = s.exhausted;
            runs = find_runs(&self.board, min_run);
        }
        let cleared = clear_runs(&mut self.board, &runs)?;
        self.score += cleared.len();

        let game_over = exhausted || self.is_over();
        info!(
            %from,
            %to,
            cleared = cleared.len(),
            spawned = spawned.len(),
            score = self.score,
            "move complete"
        );
        if game_over {
            info!(score = self.score, turns = self.turns, "end of game");
        }
        Ok(Outcome::Moved(TurnReport {
            from,
            to,
            path,
            runs,
            cleared,
            spawned,
            game_over,
        }))
    }
}
