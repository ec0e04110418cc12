//! Game engine and state management.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, SUITS};
use crate::column::Column;
use crate::options::GameOptions;
use crate::scores::ScoreTable;
use crate::store::ScoreStore;
use crate::sync::Mutex;

mod round;
pub mod state;
mod timer;

pub use state::{GameEvent, GamePhase, RoundEndReason};
pub use timer::CountdownDriver;

/// Number of columns on the board.
pub const COLUMN_COUNT: usize = 5;

/// Number of rounds in a game.
pub const ROUNDS_PER_GAME: u8 = 3;

/// Countdown value at round start, in timer units.
///
/// Units are scoring units, not seconds; the countdown burns four of them
/// per second.
pub const TIMER_MAX: u32 = 280;

/// Observer callback registered with [`Game::on_event`].
type EventHook = Box<dyn Fn(&GameEvent) + Send + Sync>;

/// The game engine: three timed rounds of dealing cards into five
/// blackjack-style columns.
///
/// The engine owns the shoe, the board, the countdown value, and the
/// high-score table. All operations serialize through internal locks, so a
/// countdown tick and a user action can never interleave mid-mutation; an
/// operation whose precondition no longer holds is a silent no-op.
pub struct Game {
    /// Cards in the shoe, drawn from the end.
    pub shoe: Mutex<Vec<Card>>,
    /// Current game phase.
    pub phase: Mutex<GamePhase>,
    /// The five columns of the board.
    pub columns: Mutex<[Column; COLUMN_COUNT]>,
    /// Card awaiting placement.
    pub current_card: Mutex<Option<Card>>,
    /// Remaining countdown, in timer units.
    pub timer: Mutex<u32>,
    /// Game options; deck-count changes apply at the next round start.
    options: Mutex<GameOptions>,
    /// Current round number, 1-based.
    round: Mutex<u8>,
    /// Score earned in each round.
    round_scores: Mutex<[u32; ROUNDS_PER_GAME as usize]>,
    /// Accumulated score across rounds.
    total_score: Mutex<u32>,
    /// Whether the once-per-round pass is still available.
    pass_available: Mutex<bool>,
    /// Why the last round ended.
    end_reason: Mutex<RoundEndReason>,
    /// Whether the finished game claimed the top high score.
    new_high_score: Mutex<bool>,
    /// Ranked high-score table.
    scores: Mutex<ScoreTable>,
    /// Persistence collaborator for the score table.
    store: Box<dyn ScoreStore>,
    /// Observer callbacks.
    hooks: Mutex<Vec<EventHook>>,
    /// Random number generator.
    rng: Mutex<ChaCha8Rng>,
}

impl Game {
    /// Creates a new engine with the given seed.
    ///
    /// The high-score table is loaded from `store` once, up front; a failed
    /// load degrades to an empty table.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use blitz21::{Game, GameOptions, MemoryStore};
    ///
    /// let game = Game::new(GameOptions::default(), MemoryStore::new(), 42);
    /// game.start_new_game();
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, store: impl ScoreStore + 'static, seed: u64) -> Self {
        let store: Box<dyn ScoreStore> = Box::new(store);
        let scores = store.load().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "no saved high scores, starting empty");
            ScoreTable::new()
        });

        Self {
            shoe: Mutex::new(Vec::new()),
            phase: Mutex::new(GamePhase::PreGame),
            columns: Mutex::new(std::array::from_fn(|_| Column::new())),
            current_card: Mutex::new(None),
            timer: Mutex::new(TIMER_MAX),
            options: Mutex::new(options),
            round: Mutex::new(1),
            round_scores: Mutex::new([0; ROUNDS_PER_GAME as usize]),
            total_score: Mutex::new(0),
            pass_available: Mutex::new(true),
            end_reason: Mutex::new(RoundEndReason::None),
            new_high_score: Mutex::new(false),
            scores: Mutex::new(scores),
            store,
            hooks: Mutex::new(Vec::new()),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Creates and shuffles a shoe with the specified number of decks.
    ///
    /// Deck counts below 1 are treated as 1.
    fn create_shoe(num_decks: u8, rng: &mut ChaCha8Rng) -> Vec<Card> {
        let num_decks = num_decks.max(1);
        let mut cards = Vec::with_capacity(num_decks as usize * DECK_SIZE);

        for _ in 0..num_decks {
            for suit in SUITS {
                for rank in 1..=13 {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(rng);
        cards
    }

    /// Draws a card from the shoe.
    ///
    /// An exhausted shoe is silently rebuilt and reshuffled with the same
    /// deck count. With at most 25 cards dealt per round this is
    /// unreachable; it exists so dealing can never fail.
    pub(super) fn draw(&self) -> Card {
        if let Some(card) = self.shoe.lock().pop() {
            return card;
        }

        tracing::debug!("shoe exhausted, rebuilding");
        let decks = self.options.lock().decks;
        let mut rng = self.rng.lock();
        let mut shoe = self.shoe.lock();
        *shoe = Self::create_shoe(decks, &mut rng);
        shoe.pop().expect("a freshly built shoe is never empty")
    }

    /// Registers an observer callback.
    ///
    /// Hooks fire after the engine has released its state locks and are
    /// fire-and-forget: they may read game state but cannot affect it, and
    /// must not register further hooks from inside the callback.
    pub fn on_event<F>(&self, hook: F)
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.hooks.lock().push(Box::new(hook));
    }

    /// Invokes every registered hook with the event.
    pub(super) fn emit(&self, event: &GameEvent) {
        for hook in self.hooks.lock().iter() {
            hook(event);
        }
    }

    /// Persists the high-score table, best-effort.
    pub(super) fn persist_scores(&self) {
        let table = self.scores.lock().clone();
        if let Err(err) = self.store.save(&table) {
            tracing::warn!(error = %err, "failed to persist high scores");
        }
    }

    /// Returns the current game phase.
    pub fn current_phase(&self) -> GamePhase {
        *self.phase.lock()
    }

    /// Returns the current round number, 1-based.
    pub fn round(&self) -> u8 {
        *self.round.lock()
    }

    /// Returns the remaining countdown, in timer units.
    pub fn timer_value(&self) -> u32 {
        *self.timer.lock()
    }

    /// Returns the countdown value a round starts with.
    #[must_use]
    pub const fn timer_max(&self) -> u32 {
        TIMER_MAX
    }

    /// Returns the card awaiting placement, if any.
    pub fn peek_current_card(&self) -> Option<Card> {
        *self.current_card.lock()
    }

    /// Returns a snapshot of the five columns.
    pub fn board(&self) -> [Column; COLUMN_COUNT] {
        self.columns.lock().clone()
    }

    /// Returns whether the once-per-round pass is still available.
    pub fn pass_available(&self) -> bool {
        *self.pass_available.lock()
    }

    /// Returns why the last round ended.
    pub fn round_end_reason(&self) -> RoundEndReason {
        *self.end_reason.lock()
    }

    /// Returns the score earned in each round so far.
    pub fn round_scores(&self) -> [u32; ROUNDS_PER_GAME as usize] {
        *self.round_scores.lock()
    }

    /// Returns the accumulated score across rounds.
    pub fn total_score(&self) -> u32 {
        *self.total_score.lock()
    }

    /// Returns whether the finished game claimed the top high score.
    pub fn is_new_high_score(&self) -> bool {
        *self.new_high_score.lock()
    }

    /// Returns a snapshot of the high-score table.
    pub fn high_scores(&self) -> ScoreTable {
        self.scores.lock().clone()
    }

    /// Empties the high-score table and persists the empty table.
    pub fn clear_high_scores(&self) {
        self.scores.lock().clear();
        self.persist_scores();
    }

    /// Returns the configured deck count.
    pub fn deck_count(&self) -> u8 {
        self.options.lock().decks
    }

    /// Sets the deck count, effective at the next round start.
    ///
    /// Values below 1 are treated as 1.
    pub fn set_deck_count(&self, decks: u8) {
        self.options.lock().decks = decks.max(1);
    }

    /// Returns whether haptic feedback hooks should fire.
    pub fn haptics_enabled(&self) -> bool {
        self.options.lock().haptics_enabled
    }

    /// Toggles haptic feedback hooks. Cosmetic only; no gameplay effect.
    pub fn set_haptics_enabled(&self, enabled: bool) {
        self.options.lock().haptics_enabled = enabled;
    }
}
