//! Generate error code documentation from the error enums themselves.
//!
//! Codes, messages, and help text come straight from the `code()`, `help()`,
//! and `display_detailed()` methods of `BoardError`, `DictionaryError`, and
//! `MatchError`.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::path::PathBuf;

use wordsboard::dictionary::DictionaryError;
use wordsboard::errors::{Axis, BoardError};
use wordsboard::words_board::MatchError;

/// Print one section per error: code, message, optional help, detailed format
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}\n", error.code());

            if let Some(help_text) = error.help() {
                println!("**How to fix:** {}\n", help_text);
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

fn all_board_error_variants() -> Vec<BoardError> {
    vec![
        BoardError::EmptyBoard,
        BoardError::RaggedRow { row: 2, expected: 3, found: 2 },
        BoardError::MissingCellValue { row: 1, col: 0 },
        BoardError::NegativeIndex { axis: Axis::Row, index: -1 },
        BoardError::UnsupportedCell { row: 0, col: 2, value: 'é' },
    ]
}

fn all_dictionary_error_variants() -> Vec<DictionaryError> {
    let mut errors = vec![
        DictionaryError::Status { status: 503, body: "Service Unavailable".to_string() },
        DictionaryError::Io {
            path: PathBuf::from("dictionary.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        },
    ];
    // Decode--produced by parsing a JSON array where an object is expected
    if let Err(e) = serde_json::from_str::<wordsboard::dictionary::Dictionary>("[\"hello\"]") {
        errors.insert(1, DictionaryError::Decode(e));
    }
    errors
}

fn all_match_error_variants() -> Vec<MatchError> {
    vec![
        MatchError::InvalidBoard(BoardError::EmptyBoard),
        MatchError::Upstream(DictionaryError::Status { status: 500, body: "Internal Server Error".to_string() }),
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**This document is generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Match Errors (M001–M003)](#match-errors)");
    println!("- [Board Errors (B001–B005)](#board-errors)");
    println!("- [Dictionary Errors (D001–D004)](#dictionary-errors)\n");

    println!("## Match Errors\n");
    println!("Top-level errors from `WordsBoard`. `M001` is a client error; all others are server-side.");
    println!("`M003` (a background fetch or scan panicked or was cancelled) needs a failed task and is not shown.\n");
    generate_error_docs!(all_match_error_variants());

    println!("## Board Errors\n");
    println!("Invalid board input, raised before any search runs.\n");
    generate_error_docs!(all_board_error_variants());

    println!("## Dictionary Errors\n");
    println!("Failures fetching or decoding the dictionary. `D001` (transport failure) needs a live request and is not shown.\n");
    generate_error_docs!(all_dictionary_error_variants());
}
