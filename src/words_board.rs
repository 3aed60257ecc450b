//! Finding dictionary words on a board.
//!
//! [`WordsBoard`] ties a [`DictionaryProvider`] to the board search:
//!
//! - [`WordsBoard::word_exists`] checks a single word.
//! - [`WordsBoard::match_dictionary`] returns every dictionary word of at
//!   least [`MIN_WORD_LEN`] characters that can be spelled on the board,
//!   with its definition.
//!
//! In the bulk case the dictionary fetch is started first and runs while the
//! board is built; the two are joined right before the scan.
//!
//! # Error Handling
//!
//! All operations return [`MatchError`]:
//!
//! - M001: `InvalidBoard` (Board failed validation (wraps [`BoardError`]))
//! - M002: `Upstream` (Dictionary could not be obtained (wraps [`DictionaryError`]))
//! - M003: `TaskFailed` (Background fetch or search task did not complete)
//!
//! Only `InvalidBoard` is the caller's fault; see [`MatchError::is_client_error`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use wordsboard::dictionary::StaticDictionary;
//! use wordsboard::words_board::WordsBoard;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), wordsboard::words_board::MatchError> {
//! let dictionary: StaticDictionary = [("Hello", "Hello world!"), ("hole", "an opening")].into_iter().collect();
//! let words_board = WordsBoard::new(Arc::new(dictionary));
//!
//! let grid = vec![
//!     vec!['h', 'b', 'p'],
//!     vec!['c', 'e', 'l'],
//!     vec!['x', 'o', 'l'],
//! ];
//! let found = words_board.match_dictionary(&grid).await?;
//! assert_eq!(found.keys().collect::<Vec<_>>(), vec!["Hello"]);
//!
//! assert!(words_board.word_exists(&grid, "cell").await?);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, error, info};

use crate::board::Board;
use crate::dictionary::{Dictionary, DictionaryError, DictionaryProvider};
use crate::errors::{format_error_with_code_and_help, BoardError};
use crate::path_search::path_exists;

/// Dictionary words shorter than this are never reported.
pub const MIN_WORD_LEN: usize = 3;

/// Matched word → definition.
pub type MatchResult = BTreeMap<String, String>;

/// Unified error type for board search requests.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    #[error("dictionary unavailable: {0}")]
    Upstream(#[from] DictionaryError),

    /// A spawned task panicked or was cancelled.
    #[error("background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl MatchError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::InvalidBoard(_) => "M001",
            MatchError::Upstream(_) => "M002",
            MatchError::TaskFailed(_) => "M003",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            MatchError::TaskFailed(_) => Some("This is an internal error; the request can be retried"),
            // wrapped errors carry their own help
            MatchError::InvalidBoard(_) | MatchError::Upstream(_) => None,
        }
    }

    /// True when the request itself was bad (maps to a 4xx at an HTTP boundary);
    /// everything else is a server-side failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, MatchError::InvalidBoard(_))
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            MatchError::InvalidBoard(be) => format!("{}\n  caused by: {}", self.code(), be.display_detailed()),
            MatchError::Upstream(de) => format!("{}\n  caused by: {}", self.code(), de.display_detailed()),
            MatchError::TaskFailed(_) => format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Scan `dictionary` against `board`, keeping words of at least
/// [`MIN_WORD_LEN`] characters that have a path.
#[must_use]
pub fn match_words(board: &Board, dictionary: &Dictionary) -> MatchResult {
    dictionary
        .iter()
        .filter(|(word, _)| word.chars().count() >= MIN_WORD_LEN && path_exists(board, word))
        .map(|(word, definition)| (word.clone(), definition.clone()))
        .collect()
}

/// Board search service backed by a dictionary provider.
#[derive(Clone)]
pub struct WordsBoard {
    dictionary: Arc<dyn DictionaryProvider>,
}

impl WordsBoard {
    pub fn new(dictionary: Arc<dyn DictionaryProvider>) -> Self {
        Self { dictionary }
    }

    /// Is `word` spelled anywhere on `grid`?
    ///
    /// The board is validated on the caller's task; the search itself runs on
    /// the blocking pool so it cannot stall the async runtime.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidBoard`] if `grid` is not a valid board.
    pub async fn word_exists<R: AsRef<[char]>>(&self, grid: &[R], word: &str) -> Result<bool, MatchError> {
        let board = Board::build(grid)?;
        let word = word.to_owned();
        let found = tokio::task::spawn_blocking(move || path_exists(&board, &word)).await?;
        Ok(found)
    }

    /// Every dictionary word present on `grid`, with its definition.
    ///
    /// Returns an empty map (not an error) when nothing matches. Any failure
    /// is logged here and then returned unchanged; no partial result. The
    /// scan runs on the blocking pool, like [`WordsBoard::word_exists`].
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidBoard`] for a bad grid, [`MatchError::Upstream`]
    /// if the dictionary cannot be fetched, [`MatchError::TaskFailed`] if the
    /// fetch or the scan panics.
    pub async fn match_dictionary<R: AsRef<[char]>>(&self, grid: &[R]) -> Result<MatchResult, MatchError> {
        let result = self.match_dictionary_inner(grid).await;
        if let Err(e) = &result {
            error!("{}", e.display_detailed());
            debug!("{e:?}");
        }
        result
    }

    async fn match_dictionary_inner<R: AsRef<[char]>>(&self, grid: &[R]) -> Result<MatchResult, MatchError> {
        info!("Loading dictionary data - begin");
        let provider = Arc::clone(&self.dictionary);
        let fetch = tokio::spawn(async move { provider.fetch().await });

        info!("Building board graph - begin");
        let board = match Board::build(grid) {
            Ok(board) => board,
            Err(e) => {
                fetch.abort();
                return Err(e.into());
            }
        };
        info!("Building board graph - completed ({}x{})", board.rows(), board.cols());

        let dictionary = fetch.await??;
        info!("Loading dictionary data - completed ({} entries)", dictionary.len());

        info!("Searching words on board - begin");
        let matches = tokio::task::spawn_blocking(move || match_words(&board, &dictionary)).await?;
        info!("Searching words on board - completed ({} matches)", matches.len());

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::StaticDictionary;
    use async_trait::async_trait;
    use std::sync::{Mutex, Once};

    fn hello_grid() -> Vec<Vec<char>> {
        vec![vec!['h', 'b', 'p'], vec!['c', 'e', 'l'], vec!['x', 'o', 'l']]
    }

    fn words_board(entries: &[(&str, &str)]) -> WordsBoard {
        let dictionary: StaticDictionary = entries.iter().copied().collect();
        WordsBoard::new(Arc::new(dictionary))
    }

    struct BrokenProvider;

    #[async_trait]
    impl DictionaryProvider for BrokenProvider {
        async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError> {
            Err(DictionaryError::Status { status: 500, body: "boom".to_string() })
        }
    }

    struct PanickingProvider;

    #[async_trait]
    impl DictionaryProvider for PanickingProvider {
        async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError> {
            panic!("dictionary backend crashed");
        }
    }

    /// Logger that keeps every error-level message, installed once per test binary
    struct CaptureLogger {
        errors: Mutex<Vec<String>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Error
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                self.errors.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger { errors: Mutex::new(Vec::new()) };

    fn logged_errors() -> Vec<String> {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            log::set_logger(&CAPTURE).unwrap();
            log::set_max_level(log::LevelFilter::Error);
        });
        CAPTURE.errors.lock().unwrap().clone()
    }

    #[test]
    fn test_match_words_min_length() {
        let board = Board::from_rows(&["hbp", "cel", "xol"]).unwrap();
        let mut dictionary = Dictionary::new();
        dictionary.insert("he".to_string(), "pronoun".to_string());
        dictionary.insert("lo".to_string(), "look".to_string());
        dictionary.insert("hex".to_string(), "a curse".to_string());

        let found = match_words(&board, &dictionary);
        assert_eq!(found.len(), 1);
        assert_eq!(found.get("hex").map(String::as_str), Some("a curse"));
    }

    #[test]
    fn test_match_words_keeps_dictionary_key_case() {
        let board = Board::from_rows(&["hbp", "cel", "xol"]).unwrap();
        let mut dictionary = Dictionary::new();
        dictionary.insert("CeLL".to_string(), "unit".to_string());
        let found = match_words(&board, &dictionary);
        assert!(found.contains_key("CeLL"));
    }

    #[tokio::test]
    async fn test_match_dictionary_empty_dictionary() {
        let found = words_board(&[]).match_dictionary(&hello_grid()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_match_dictionary_single_word() {
        let found = words_board(&[("Hello", "Hello world!")]).match_dictionary(&hello_grid()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["Hello"], "Hello world!");
    }

    #[tokio::test]
    async fn test_match_dictionary_invalid_board() {
        let grid: Vec<Vec<char>> = Vec::new();
        let err = words_board(&[("Hello", "Hello world!")]).match_dictionary(&grid).await.unwrap_err();
        assert!(matches!(err, MatchError::InvalidBoard(BoardError::EmptyBoard)));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_match_dictionary_upstream_failure() {
        let words_board = WordsBoard::new(Arc::new(BrokenProvider));
        let err = words_board.match_dictionary(&hello_grid()).await.unwrap_err();
        assert_eq!(err.code(), "M002");
        assert!(!err.is_client_error());
        assert!(err.display_detailed().contains("D002"));
    }

    #[tokio::test]
    async fn test_match_dictionary_logs_failure() {
        logged_errors();
        struct MarkedProvider;

        #[async_trait]
        impl DictionaryProvider for MarkedProvider {
            async fn fetch(&self) -> Result<Arc<Dictionary>, DictionaryError> {
                Err(DictionaryError::Status { status: 502, body: "gateway-marker".to_string() })
            }
        }

        let err = WordsBoard::new(Arc::new(MarkedProvider)).match_dictionary(&hello_grid()).await.unwrap_err();
        assert_eq!(err.code(), "M002");

        let logged = logged_errors();
        assert!(
            logged.iter().any(|line| line.contains("gateway-marker") && line.contains("M002")),
            "failure was not logged: {logged:?}"
        );
    }

    #[tokio::test]
    async fn test_match_dictionary_provider_panic_is_task_failure() {
        let err = WordsBoard::new(Arc::new(PanickingProvider)).match_dictionary(&hello_grid()).await.unwrap_err();
        assert!(matches!(err, MatchError::TaskFailed(_)));
        assert_eq!(err.code(), "M003");
        assert!(!err.is_client_error());
        assert!(err.display_detailed().contains("can be retried"));
    }

    #[tokio::test]
    async fn test_word_exists() {
        let words_board = words_board(&[]);
        assert!(words_board.word_exists(&hello_grid(), "hello").await.unwrap());
        assert!(words_board.word_exists(&hello_grid(), "HELLO").await.unwrap());
        assert!(!words_board.word_exists(&hello_grid(), "hole").await.unwrap());
        assert!(!words_board.word_exists(&hello_grid(), "").await.unwrap());
    }

    #[tokio::test]
    async fn test_word_exists_invalid_board() {
        let grid = vec![vec!['a', 'b'], vec!['c']];
        let err = words_board(&[]).word_exists(&grid, "ab").await.unwrap_err();
        assert_eq!(err.code(), "M001");
        assert!(err.display_detailed().contains("B002"));
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = [
            MatchError::InvalidBoard(BoardError::EmptyBoard),
            MatchError::Upstream(DictionaryError::Status { status: 500, body: String::new() }),
        ];
        assert_ne!(errors[0].code(), errors[1].code());
        for e in &errors {
            assert!(e.code().starts_with('M'));
        }
    }
}
