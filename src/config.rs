//! Game configuration.

use crate::board::Ball;
use crate::constants::{DEFAULT_SIZE, INITIAL_BALLS, MAX_SIZE, MIN_RUN, SPAWN_COUNT};
use crate::error::LinesError;

/// Parameters fixed for the lifetime of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Board side length.
    pub size: usize,
    /// Colors balls are drawn from.
    pub palette: Vec<Ball>,
    /// Balls placed on the fresh board.
    pub initial_balls: usize,
    /// Balls placed after a move that clears nothing.
    pub spawn_count: usize,
    /// Shortest run that gets cleared.
    pub min_run: usize,
    /// RNG seed; None seeds from the system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            palette: Ball::ALL.to_vec(),
            initial_balls: INITIAL_BALLS,
            spawn_count: SPAWN_COUNT,
            min_run: MIN_RUN,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default configuration playing with the first `colors` colors.
    pub fn with_colors(colors: usize) -> Result<Self, LinesError> {
        if !(1..=Ball::ALL.len()).contains(&colors) {
            return Err(LinesError::InvalidConfig(format!(
                "color count must be 1..={}, got {colors}",
                Ball::ALL.len()
            )));
        }
        Ok(Self {
            palette: Ball::ALL[..colors].to_vec(),
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), LinesError> {
        let invalid = |msg: String| Err(LinesError::InvalidConfig(msg));
        if !(1..=MAX_SIZE).contains(&self.size) {
            return invalid(format!("board size must be 1..={MAX_SIZE}, got {}", self.size));
        }
        if self.palette.is_empty() {
            return invalid("palette is empty".to_string());
        }
        for (i, ball) in self.palette.iter().enumerate() {
            if self.palette[..i].contains(ball) {
                return invalid(format!("palette repeats {ball:?}"));
            }
        }
        if self.initial_balls > self.size * self.size {
            return invalid(format!(
                "{} initial balls do not fit on a {}x{} board",
                self.initial_balls, self.size, self.size
            ));
        }
        if self.spawn_count == 0 {
            return invalid("spawn count must be at least 1".to_string());
        }
        if self.min_run < 2 {
            return invalid(format!("minimum run must be at least 2, got {}", self.min_run));
        }
        Ok(())
    }
}
