use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};

use wordsboard::board::RawGrid;
use wordsboard::dictionary::{
    CachedDictionary, DictionaryProvider, FileDictionary, HttpDictionary, DEFAULT_CACHE_TTL_MINS,
};
use wordsboard::errors::BoardError;
use wordsboard::words_board::{MatchError, WordsBoard};

/// Find dictionary words on a Boggle-style letter board
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// URL of a JSON word → definition dictionary
    #[arg(long, env = "WORDSBOARD_DICTIONARY_URL", global = true, conflicts_with = "dictionary_file")]
    dictionary_url: Option<String>,

    /// Local JSON word → definition dictionary
    #[arg(long, global = true)]
    dictionary_file: Option<PathBuf>,

    /// Minutes a fetched dictionary stays cached
    #[arg(long, env = "WORDSBOARD_CACHE_TTL_MINS", global = true, default_value_t = DEFAULT_CACHE_TTL_MINS)]
    cache_ttl_mins: u64,

    /// Fetch the dictionary on every request
    #[arg(long, env = "WORDSBOARD_NO_CACHE", global = true)]
    no_cache: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every dictionary word (3+ letters) found on the board
    AllWords {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Check whether a single word can be spelled on the board
    WordExists {
        /// The word to look for
        word: String,

        #[command(flatten)]
        board: BoardArgs,
    },
}

#[derive(Args, Debug)]
struct BoardArgs {
    /// Board rows, one string per row (e.g. `hbp cel xol`)
    #[arg(conflicts_with = "board_file")]
    rows: Vec<String>,

    /// JSON file holding a 2-D array of single characters
    #[arg(short, long)]
    board_file: Option<PathBuf>,
}

impl BoardArgs {
    fn load(&self) -> Result<Vec<Vec<char>>, Box<dyn std::error::Error>> {
        let raw = match &self.board_file {
            Some(path) => {
                let data = std::fs::read_to_string(path)
                    .map_err(|e| format!("failed to read board from '{}': {e}", path.display()))?;
                serde_json::from_str::<RawGrid>(&data)?
            }
            None if self.rows.is_empty() => return Err(MatchError::from(BoardError::EmptyBoard).into()),
            None => RawGrid(Some(self.rows.iter().map(|row| row.chars().map(Some).collect()).collect())),
        };

        // Validate up front so bad input is reported before any fetch starts
        let board = raw.into_board().map_err(MatchError::from)?;
        Ok(board
            .cells()
            .chunks(board.cols())
            .map(|row| row.iter().map(|cell| cell.value()).collect())
            .collect())
    }
}

/// Entry point of the wordsboard CLI.
///
/// Delegates to [`try_main`], printing any error with its code before
/// exiting with code 1.
#[tokio::main]
async fn main() -> ExitCode {
    let debug_enabled = std::env::var("WORDSBOARD_DEBUG").is_ok();
    wordsboard::log::init_logger(debug_enabled);

    if let Err(e) = try_main().await {
        if let Some(match_err) = e.downcast_ref::<MatchError>() {
            eprintln!("Error: {}", match_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Build the configured dictionary provider.
fn dictionary_provider(cli: &Cli) -> Result<Arc<dyn DictionaryProvider>, Box<dyn std::error::Error>> {
    let upstream: Arc<dyn DictionaryProvider> = match (&cli.dictionary_url, &cli.dictionary_file) {
        (Some(url), _) => Arc::new(HttpDictionary::new(url.as_str())?),
        (None, Some(path)) => Arc::new(FileDictionary::new(path)),
        (None, None) => return Err("no dictionary configured: pass --dictionary-url or --dictionary-file".into()),
    };

    if cli.no_cache {
        log::debug!("Dictionary cache disabled");
        return Ok(upstream);
    }

    let ttl = Duration::from_secs(cli.cache_ttl_mins.saturating_mul(60));
    Ok(Arc::new(CachedDictionary::new(upstream, ttl)))
}

async fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::AllWords { board } => {
            let grid = board.load()?;
            let words_board = WordsBoard::new(dictionary_provider(&cli)?);

            let t_search = Instant::now();
            let found = words_board.match_dictionary(&grid).await?;
            let search_secs = t_search.elapsed().as_secs_f64();

            for (word, definition) in &found {
                println!("{word}: {definition}");
            }
            eprintln!("Found {} words in {:.3}s.", found.len(), search_secs);
        }
        Command::WordExists { word, board } => {
            let grid = board.load()?;
            // single-word checks never touch the dictionary
            let words_board = WordsBoard::new(Arc::new(wordsboard::dictionary::StaticDictionary::default()));
            println!("{}", words_board.word_exists(&grid, word).await?);
        }
    }

    Ok(())
}
