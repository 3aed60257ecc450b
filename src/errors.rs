//! Error types for board construction with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (B001-B005) for documentation lookup:
//!
//! - B001: `EmptyBoard` (Board is absent or has no cells)
//! - B002: `RaggedRow` (Rows of unequal length)
//! - B003: `MissingCellValue` (A cell has no character)
//! - B004: `NegativeIndex` (Cell row or column below zero)
//! - B005: `UnsupportedCell` (Cell character outside the ASCII range)
//!
//! Every variant is an invalid-input error: it is raised while the board is
//! being built, before any search runs, and is never retried.
//!
//! # Examples
//!
//! ```
//! use wordsboard::board::Board;
//!
//! let empty: Vec<Vec<char>> = Vec::new();
//! match Board::build(&empty) {
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!     }
//!     Ok(_) => println!("Success"),
//! }
//! ```

use std::fmt;

/// Which coordinate of a cell was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Col => f.write_str("column"),
        }
    }
}

/// Invalid board or cell input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Board is required and must contain at least one cell")]
    EmptyBoard,

    #[error("Board row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cell at ({row}, {col}) has no value")]
    MissingCellValue { row: usize, col: usize },

    #[error("Cell {axis} index must be non-negative, got {index}")]
    NegativeIndex { axis: Axis, index: isize },

    #[error("Unsupported character {value:?} at ({row}, {col})")]
    UnsupportedCell { row: usize, col: usize, value: char },
}

impl BoardError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::EmptyBoard => "B001",
            BoardError::RaggedRow { .. } => "B002",
            BoardError::MissingCellValue { .. } => "B003",
            BoardError::NegativeIndex { .. } => "B004",
            BoardError::UnsupportedCell { .. } => "B005",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            BoardError::EmptyBoard => Some("Example: [[\"h\",\"b\",\"p\"],[\"c\",\"e\",\"l\"],[\"x\",\"o\",\"l\"]]"),
            BoardError::RaggedRow { .. } => Some("Every row of the board must have the same number of cells"),
            BoardError::MissingCellValue { .. } => Some("Each cell must hold exactly one character"),
            BoardError::UnsupportedCell { .. } => Some("Only ASCII characters can be placed on the board"),
            BoardError::NegativeIndex { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
