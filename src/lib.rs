//! A timed five-column blackjack solitaire game engine.
//!
//! Cards are dealt one at a time and placed into one of five columns,
//! building blackjack-style hands against a countdown, across three rounds.
//! Columns lock on a hard 21 or a five-card charlie; matching the bonus
//! table with the board total converts remaining time into points.
//!
//! The crate provides a [`Game`] type that manages the full round flow:
//! dealing, placement, the once-per-round pass, countdown expiry, scoring,
//! and the persisted high-score table.
//!
//! # Example
//!
//! ```no_run
//! use blitz21::{Game, GameOptions, MemoryStore};
//!
//! let game = Game::new(GameOptions::default(), MemoryStore::new(), 42);
//! game.start_new_game();
//! game.place_current_card(0);
//! ```

pub mod card;
pub mod column;
pub mod game;
pub mod options;
pub mod scores;
pub mod scoring;
pub mod store;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, SUITS, Suit};
pub use column::{BLACKJACK, CHARLIE_SIZE, Column};
pub use game::{
    COLUMN_COUNT, CountdownDriver, Game, GameEvent, GamePhase, ROUNDS_PER_GAME, RoundEndReason,
    TIMER_MAX,
};
pub use options::GameOptions;
pub use scores::{HighScoreEntry, MAX_ENTRIES, ScoreTable};
pub use scoring::{PERFECT_BOARD, board_totals, multiplier_for, round_score};
pub use store::{JsonFileStore, MemoryStore, ScoreStore, StoreError};
