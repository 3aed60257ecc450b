// Reusable library API — used by the CLI and by any hosting service
pub mod board;
pub mod cell;
pub mod dictionary;
pub mod errors;
pub mod log;
pub mod path_search;
pub mod words_board;
