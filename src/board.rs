//! Board representation: cells, balls and the empty-cell index.
//!
//! Cells are addressed by 1-indexed `(x, y)` coordinates, `x` growing to the
//! right and `y` growing downwards. Anything outside `[1, N]` is rejected at
//! this boundary with [`LinesError::MalformedCoordinate`].
//!
//! The board keeps an index of every empty cell in sync with the per-cell
//! state, so spawning and end-of-game checks never rescan the grid.

use std::fmt;

use crate::constants::EMPTY_CHAR;
use crate::error::LinesError;

/// Ball colors. A game plays with a prefix of [`Ball::ALL`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ball {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Orange,
}

impl Ball {
    pub const ALL: [Ball; 7] = [
        Ball::Red,
        Ball::Green,
        Ball::Blue,
        Ball::Yellow,
        Ball::Cyan,
        Ball::Magenta,
        Ball::Orange,
    ];

    /// Single-letter tag used by the text rendering and protocol.
    pub fn to_char(self) -> char {
        match self {
            Ball::Red => 'R',
            Ball::Green => 'G',
            Ball::Blue => 'B',
            Ball::Yellow => 'Y',
            Ball::Cyan => 'C',
            Ball::Magenta => 'M',
            Ball::Orange => 'O',
        }
    }

    /// Inverse of [`Ball::to_char`], case-insensitive.
    pub fn from_char(c: char) -> Option<Ball> {
        let c = c.to_ascii_uppercase();
        Ball::ALL.into_iter().find(|b| b.to_char() == c)
    }
}

/// A cell position, 1-indexed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Occupancy of a cell. The ball color lives inside the occupied variants,
/// so an empty cell can never carry one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    /// Holds a ball that is not selected.
    Released(Ball),
    /// Holds the ball the player picked up.
    Selected(Ball),
}

impl CellState {
    pub fn ball(self) -> Option<Ball> {
        match self {
            CellState::Empty => None,
            CellState::Released(b) | CellState::Selected(b) => Some(b),
        }
    }

    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }
}

/// A cell as seen from outside the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub pos: Point,
    pub state: CellState,
}

/// An NxN Lines board.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
    /// Every empty position, in no particular order.
    empty: Vec<Point>,
    /// For each cell, its slot in `empty` (None if occupied).
    empty_slot: Vec<Option<usize>>,
}

impl Board {
    /// Create an empty board.
    pub fn new(size: usize) -> Self {
        let n = size * size;
        let mut empty = Vec::with_capacity(n);
        let mut empty_slot = Vec::with_capacity(n);
        for y in 1..=size {
            for x in 1..=size {
                empty_slot.push(Some(empty.len()));
                empty.push(Point::new(x, y));
            }
        }
        Self {
            size,
            cells: vec![CellState::Empty; n],
            empty,
            empty_slot,
        }
    }

    /// Build a board from text rows, top row first. `.` is empty and a
    /// color letter (see [`Ball::to_char`]) is a released ball.
    pub fn from_rows(rows: &[&str]) -> Result<Self, LinesError> {
        let size = rows.len();
        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != size {
                return Err(LinesError::InvalidBoard(format!(
                    "row {} has {} cells, expected {size}",
                    row + 1,
                    chars.len()
                )));
            }
            for (col, c) in chars.into_iter().enumerate() {
                if c == EMPTY_CHAR {
                    continue;
                }
                let ball = Ball::from_char(c)
                    .ok_or_else(|| LinesError::InvalidBoard(format!("unknown cell '{c}'")))?;
                board.place(Point::new(col + 1, row + 1), ball)?;
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `p` lies on the board.
    pub fn contains(&self, p: Point) -> bool {
        (1..=self.size).contains(&p.x) && (1..=self.size).contains(&p.y)
    }

    /// Validate raw coordinates.
    pub fn point(&self, x: usize, y: usize) -> Result<Point, LinesError> {
        let p = Point::new(x, y);
        self.check(p)?;
        Ok(p)
    }

    fn check(&self, p: Point) -> Result<(), LinesError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(LinesError::MalformedCoordinate {
                x: p.x,
                y: p.y,
                size: self.size,
            })
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        (p.y - 1) * self.size + (p.x - 1)
    }

    pub fn get(&self, p: Point) -> Result<CellState, LinesError> {
        self.check(p)?;
        Ok(self.cells[self.idx(p)])
    }

    pub fn cell(&self, p: Point) -> Result<Cell, LinesError> {
        Ok(Cell {
            pos: p,
            state: self.get(p)?,
        })
    }

    /// State of a point already known to be on the board.
    #[inline]
    pub(crate) fn state_at(&self, p: Point) -> CellState {
        self.cells[self.idx(p)]
    }

    /// Orthogonal neighbors of `p`: 2 at a corner, 3 on an edge, 4 inside.
    pub fn neighbors(&self, p: Point) -> Result<Vec<Point>, LinesError> {
        self.check(p)?;
        Ok(self.adjacent(p).collect())
    }

    /// Orthogonal neighbors of a point already known to be on the board.
    pub(crate) fn adjacent(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if p.x > 1 {
            v.push(Point::new(p.x - 1, p.y));
        }
        if p.x < s {
            v.push(Point::new(p.x + 1, p.y));
        }
        if p.y > 1 {
            v.push(Point::new(p.x, p.y - 1));
        }
        if p.y < s {
            v.push(Point::new(p.x, p.y + 1));
        }
        v.into_iter()
    }

    /// Current empty positions, in no particular order.
    pub fn empty_cells(&self) -> &[Point] {
        &self.empty
    }

    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    pub fn is_full(&self) -> bool {
        self.empty.is_empty()
    }

    /// Set the state of `p`, keeping the empty index in step.
    /// Returns the previous state.
    pub fn set(&mut self, p: Point, state: CellState) -> Result<CellState, LinesError> {
        self.check(p)?;
        Ok(self.put(p, state))
    }

    /// [`Board::set`] for a point already known to be on the board, such as
    /// one taken from [`Board::empty_cells`].
    pub(crate) fn put(&mut self, p: Point, state: CellState) -> CellState {
        debug_assert!(self.contains(p), "{p} is off the board");
        let i = self.idx(p);
        let old = std::mem::replace(&mut self.cells[i], state);
        match (old.is_empty(), state.is_empty()) {
            (true, false) => self.unindex(i),
            (false, true) => self.index(i, p),
            _ => {}
        }
        old
    }

    /// Put a released ball on an empty cell.
    pub fn place(&mut self, p: Point, ball: Ball) -> Result<(), LinesError> {
        if !self.get(p)?.is_empty() {
            return Err(LinesError::NotEmpty(p));
        }
        self.set(p, CellState::Released(ball))?;
        Ok(())
    }

    /// Empty a cell, returning the ball it held.
    pub fn clear(&mut self, p: Point) -> Result<Option<Ball>, LinesError> {
        Ok(self.set(p, CellState::Empty)?.ball())
    }

    fn index(&mut self, i: usize, p: Point) {
        if self.empty_slot[i].is_none() {
            self.empty_slot[i] = Some(self.empty.len());
            self.empty.push(p);
        }
    }

    fn unindex(&mut self, i: usize) {
        if let Some(slot) = self.empty_slot[i].take() {
            self.empty.swap_remove(slot);
            if let Some(&moved) = self.empty.get(slot) {
                let j = self.idx(moved);
                self.empty_slot[j] = Some(slot);
            }
        }
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().map(|(i, &state)| Cell {
            pos: Point::new(i % self.size + 1, i / self.size + 1),
            state,
        })
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size,
            cells: self.cells.clone(),
        }
    }
}

/// Read-only copy of a board's cells for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    size: usize,
    cells: Vec<CellState>,
}

impl BoardSnapshot {
    pub fn size(&self) -> usize {
        self.size
    }

    /// State at 1-indexed `(x, y)`, or None off the board.
    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        if !(1..=self.size).contains(&x) || !(1..=self.size).contains(&y) {
            return None;
        }
        Some(self.cells[(y - 1) * self.size + (x - 1)])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.size.max(1))
    }
}

/// Parse a vertex such as `E5` (column letter, row number) into a point.
/// The result is not bounds-checked against any board.
pub fn parse_coord(s: &str) -> Option<Point> {
    let mut chars = s.chars();
    let col = chars.next()?.to_ascii_uppercase();
    if !col.is_ascii_uppercase() {
        return None;
    }
    let row: usize = chars.as_str().parse().ok()?;
    Some(Point::new((col as u8 - b'A') as usize + 1, row))
}

/// Format a point as a vertex, e.g. `(5,5)` as `E5`.
pub fn str_coord(p: Point) -> String {
    let col = (b'A' + (p.x - 1) as u8) as char;
    format!("{col}{}", p.y)
}

fn cell_char(state: CellState) -> char {
    match state {
        CellState::Empty => EMPTY_CHAR,
        CellState::Released(b) => b.to_char(),
        CellState::Selected(b) => b.to_char().to_ascii_lowercase(),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 1..=self.size {
            write!(f, " {}", (b'A' + (x - 1) as u8) as char)?;
        }
        writeln!(f)?;
        for y in 1..=self.size {
            write!(f, "{y:>3}")?;
            for x in 1..=self.size {
                write!(f, " {}", cell_char(self.state_at(Point::new(x, y))))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
