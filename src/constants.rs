//! Default board geometry and rule parameters.
//!
//! These are the values a [`GameConfig`](crate::config::GameConfig) starts
//! from. Everything here can be overridden at runtime.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board side length (NxN).
pub const DEFAULT_SIZE: usize = 10;

/// Largest supported side length. Columns are named by a single letter A-Z.
pub const MAX_SIZE: usize = 26;

// =============================================================================
// Rules
// =============================================================================

/// Minimum number of aligned same-colored balls that get cleared.
pub const MIN_RUN: usize = 5;

/// Balls spawned after every move that clears nothing.
pub const SPAWN_COUNT: usize = 3;

/// Balls placed on a fresh board.
pub const INITIAL_BALLS: usize = 3;

// =============================================================================
// Board Rendering
// =============================================================================

/// Empty cell in the text rendering.
pub const EMPTY_CHAR: char = '.';
