//! A single board position.
//!
//! Cells live in the [`Board`](crate::board::Board) arena and refer to their
//! neighbours by arena index, so the graph has no owning back-references.

use crate::errors::{Axis, BoardError};

/// One grid cell: its normalized (uppercase) character, its position, and
/// the arena indices of its king-move neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    value: char,
    row: usize,
    col: usize,
    adjacent: Vec<usize>,
}

impl Cell {
    /// Create a cell with no neighbours yet.
    ///
    /// `value` is stored as-is; the board uppercases characters before
    /// constructing cells.
    ///
    /// # Errors
    ///
    /// [`BoardError::MissingCellValue`] when `value` is `None`, and
    /// [`BoardError::NegativeIndex`] when `row` or `col` is below zero.
    pub fn new(value: Option<char>, row: isize, col: isize) -> Result<Self, BoardError> {
        let row = usize::try_from(row).map_err(|_| BoardError::NegativeIndex { axis: Axis::Row, index: row })?;
        let col = usize::try_from(col).map_err(|_| BoardError::NegativeIndex { axis: Axis::Col, index: col })?;
        let value = value.ok_or(BoardError::MissingCellValue { row, col })?;

        Ok(Self { value, row, col, adjacent: Vec::with_capacity(8) })
    }

    #[must_use]
    pub fn value(&self) -> char {
        self.value
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Arena indices of adjacent cells.
    #[must_use]
    pub fn adjacent(&self) -> &[usize] {
        &self.adjacent
    }

    /// Record `index` as a neighbour. Only the board calls this, once per
    /// in-bounds neighbour, while wiring the graph.
    pub(crate) fn add_adjacent(&mut self, index: usize) {
        debug_assert!(!self.adjacent.contains(&index), "neighbour {index} added twice");
        self.adjacent.push(index);
    }
}
