//! `board` — the letter grid as a graph of adjacent cells.
//!
//! A [`Board`] owns every [`Cell`] in a flat, row-major arena. Each cell lists
//! the arena indices of its king-move neighbours (up to eight: the cells
//! horizontally, vertically, and diagonally next to it). Corner cells get 3
//! neighbours, edge cells 5, interior cells 8.
//!
//! Every cell links to each of its in-bounds neighbours independently, so each
//! adjacency is added from both endpoints and the graph is symmetric without a
//! separate pass. Neighbours are listed in a fixed order (the row above, the row
//! below, then left and right); path search walks them in that order, so it
//! is part of the board's observable behaviour.
//!
//! The board also keeps a [`PresenceSet`]: a fixed table of which characters
//! occur anywhere on it. Path search consults it to reject words that cannot
//! possibly be spelled before any traversal starts.
//!
//! Boards are built once per request and never mutated afterwards.

use serde::Deserialize;

use crate::cell::Cell;
use crate::errors::BoardError;

/// Number of entries in the presence table (one per ASCII code point).
pub(crate) const PRESENCE_TABLE_SIZE: usize = 128;

/// Row/column offsets of the eight king-move neighbours, in search order:
/// top-left, top-right, top, bottom-left, bottom-right, bottom, left, right.
#[rustfmt::skip]
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 1), (-1, 0),
    (1, -1),  (1, 1),  (1, 0),
    (0, -1),  (0, 1),
];

/// Uppercase a single character, keeping it as is when its uppercase form is
/// not exactly one character (`'ß'` → `"SS"`), so word lengths never change.
#[must_use]
pub fn normalize(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Which characters occur on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceSet {
    table: [bool; PRESENCE_TABLE_SIZE],
}

impl Default for PresenceSet {
    fn default() -> Self {
        Self { table: [false; PRESENCE_TABLE_SIZE] }
    }
}

impl PresenceSet {
    fn insert(&mut self, c: char) {
        debug_assert!(c.is_ascii(), "only ASCII characters reach the presence table");
        self.table[c as usize] = true;
    }

    /// True if `c` is on the board. Characters outside the table never are.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.table[c as usize]
    }
}

/// Immutable letter board with precomputed adjacency.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    presence: PresenceSet,
}

impl Board {
    /// Build a board from a rectangular grid of characters.
    ///
    /// Characters are normalized to uppercase.
    ///
    /// # Errors
    ///
    /// - [`BoardError::EmptyBoard`] if there are no rows or no columns.
    /// - [`BoardError::RaggedRow`] if rows differ in length.
    /// - [`BoardError::UnsupportedCell`] for a non-ASCII character.
    pub fn build<R: AsRef<[char]>>(grid: &[R]) -> Result<Self, BoardError> {
        let cols = check_dimensions(grid.iter().map(|row| row.as_ref().len()))?;
        Self::from_fn(grid.len(), cols, |r, c| Some(grid[r].as_ref()[c]))
    }

    /// Convenience constructor: one string per row.
    ///
    /// ```
    /// use wordsboard::board::Board;
    ///
    /// let board = Board::from_rows(&["hbp", "cel", "xol"])?;
    /// assert_eq!(board.cell_count(), 9);
    /// # Ok::<(), wordsboard::errors::BoardError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`Board::build`].
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let grid: Vec<Vec<char>> = rows.iter().map(|row| row.as_ref().chars().collect()).collect();
        Self::build(&grid)
    }

    /// Shared construction once dimensions are known to be valid.
    fn from_fn(
        rows: usize,
        cols: usize,
        value_at: impl Fn(usize, usize) -> Option<char>,
    ) -> Result<Self, BoardError> {
        debug_assert!(rows > 0 && cols > 0, "dimensions must be checked before building");

        let mut cells = Vec::with_capacity(rows * cols);
        let mut presence = PresenceSet::default();

        for r in 0..rows {
            for c in 0..cols {
                let value = match value_at(r, c) {
                    Some(v) if !v.is_ascii() => {
                        return Err(BoardError::UnsupportedCell { row: r, col: c, value: v });
                    }
                    other => other.map(normalize),
                };
                // rows * cols cells already fit in memory, so both indices fit in isize
                let cell = Cell::new(value, r as isize, c as isize)?;
                presence.insert(cell.value());
                cells.push(cell);
            }
        }

        let mut board = Self { rows, cols, cells, presence };
        board.wire_neighbours();
        Ok(board)
    }

    /// Link every cell to each of its in-bounds king-move neighbours.
    fn wire_neighbours(&mut self) {
        for r in 0..self.rows {
            for c in 0..self.cols {
                let here = self.index(r, c);
                for (dr, dc) in NEIGHBOUR_OFFSETS {
                    let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                        continue;
                    };
                    if nr < self.rows && nc < self.cols {
                        let there = self.index(nr, nc);
                        self.cells[here].add_adjacent(there);
                    }
                }
            }
        }
    }

    #[inline]
    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// All cells in row-major order; a cell's arena index is its position here.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            Some(&self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Cells adjacent to `(row, col)`; empty when out of bounds.
    pub fn neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.cell(row, col)
            .map(Cell::adjacent)
            .unwrap_or_default()
            .iter()
            .map(|&i| &self.cells[i])
    }

    /// Case-insensitive check that `c` occurs anywhere on the board.
    #[must_use]
    pub fn contains_char(&self, c: char) -> bool {
        self.presence.contains(normalize(c))
    }

    #[must_use]
    pub fn presence(&self) -> &PresenceSet {
        &self.presence
    }
}

/// Validate row lengths, returning the column count.
fn check_dimensions(mut row_lengths: impl Iterator<Item = usize>) -> Result<usize, BoardError> {
    let cols = row_lengths.next().ok_or(BoardError::EmptyBoard)?;
    if cols == 0 {
        return Err(BoardError::EmptyBoard);
    }
    for (i, found) in row_lengths.enumerate() {
        if found != cols {
            return Err(BoardError::RaggedRow { row: i + 1, expected: cols, found });
        }
    }
    Ok(cols)
}

/// A board as it arrives from outside (JSON), before validation.
///
/// Both the grid and individual cells may be absent (`null`); those cases
/// are rejected by [`RawGrid::into_board`].
///
/// ```
/// use wordsboard::board::RawGrid;
///
/// let raw: RawGrid = serde_json::from_str(r#"[["h","b"],["c",null]]"#)?;
/// assert!(raw.into_board().is_err());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawGrid(pub Option<Vec<Vec<Option<char>>>>);

impl RawGrid {
    /// Validate and build.
    ///
    /// # Errors
    ///
    /// Everything [`Board::build`] rejects, plus [`BoardError::EmptyBoard`]
    /// for an absent grid and [`BoardError::MissingCellValue`] for a `null` cell.
    pub fn into_board(self) -> Result<Board, BoardError> {
        let grid = self.0.ok_or(BoardError::EmptyBoard)?;
        let cols = check_dimensions(grid.iter().map(Vec::len))?;
        Board::from_fn(grid.len(), cols, |r, c| grid[r][c])
    }
}
