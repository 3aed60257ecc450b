//! Depth-first search for a word spelled along adjacent cells.
//!
//! A word is on the board if the search below finds a path of distinct,
//! pairwise-adjacent cells whose characters read the word in order:
//!
//! 1. reject blank words and words longer than the board has cells,
//! 2. uppercase the word,
//! 3. reject the word outright if any of its characters is absent from the
//!    board's presence set,
//! 4. otherwise try each cell holding the first character as a start, in
//!    row-major order, and stop at the first success.
//!
//! Every start gets a fresh visited table. Within one start a cell stays
//! marked once entered, even after its branch fails, and neighbours are
//! tried in the board's fixed neighbour order. Together these make the
//! result reproducible for a given board and word.

use crate::board::{normalize, Board};
use crate::cell::Cell;

/// Returns true if `word` can be spelled on `board`. Case-insensitive.
///
/// ```
/// use wordsboard::board::Board;
/// use wordsboard::path_search::path_exists;
///
/// let board = Board::from_rows(&["hbp", "cel", "xol"])?;
/// assert!(path_exists(&board, "hello"));
/// assert!(!path_exists(&board, "hole"));
/// # Ok::<(), wordsboard::errors::BoardError>(())
/// ```
#[must_use]
pub fn path_exists(board: &Board, word: &str) -> bool {
    if word.trim().is_empty() || word.chars().count() > board.cell_count() {
        return false;
    }

    let word: Vec<char> = word.chars().map(normalize).collect();

    // Cheap rejection before any traversal
    if !word.iter().all(|&c| board.presence().contains(c)) {
        return false;
    }

    let first = word[0];
    board
        .cells()
        .iter()
        .filter(|cell| cell.value() == first)
        .any(|start| {
            // Each start is an independent search with its own visited table
            let mut visited = vec![false; board.cell_count()];
            search_from(board, start, &word, 0, &mut visited)
        })
}

/// Depth-first step: is `word[depth..]` spelled starting at `current`?
///
/// `visited` holds every cell entered since this start; marks are never cleared.
fn search_from(board: &Board, current: &Cell, word: &[char], depth: usize, visited: &mut [bool]) -> bool {
    debug_assert!(depth < word.len(), "depth {depth} past end of word");

    if current.value() != word[depth] {
        return false;
    }
    if depth == word.len() - 1 {
        return true;
    }

    let here = board.index(current.row(), current.col());
    visited[here] = true;

    for &next in current.adjacent() {
        if !visited[next] && search_from(board, &board.cells()[next], word, depth + 1, visited) {
            return true;
        }
    }

    false
}
