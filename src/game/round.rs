//! Round and game state-machine operations.
//!
//! Every operation here acquires the phase lock first and holds it from the
//! precondition check through its last mutation, degrading to a silent
//! no-op when the precondition fails. The countdown tick takes the same
//! lock, so an action and a tick can never interleave mid-mutation; stale
//! invocations (a queued tick, a double-tapped button) arrive harmlessly.

use std::sync::MutexGuard;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::column::BLACKJACK;
use crate::scoring::{self, PERFECT_BOARD};

use super::state::{GameEvent, GamePhase, RoundEndReason};
use super::{COLUMN_COUNT, Game, ROUNDS_PER_GAME, TIMER_MAX};

/// Unix timestamp in seconds, 0 if the clock is before the epoch.
fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

impl Game {
    /// Starts a fresh three-round game. Valid from any phase.
    ///
    /// Resets the total score, per-round scores, round counter, and the
    /// new-high-score flag, then starts round 1.
    pub fn start_new_game(&self) {
        let phase = self.phase.lock();
        *self.total_score.lock() = 0;
        *self.round_scores.lock() = [0; ROUNDS_PER_GAME as usize];
        *self.round.lock() = 1;
        *self.new_high_score.lock() = false;

        self.start_round_locked(phase);
    }

    /// Resets the board and shoe and deals the first card of the round.
    ///
    /// The phase lock is held through the reset and only flips to `InRound`
    /// once the timer, columns, and shoe are fresh, so a tick carried over
    /// from the previous round can never touch a half-started one.
    fn start_round_locked(&self, mut phase: MutexGuard<'_, GamePhase>) {
        for column in self.columns.lock().iter_mut() {
            column.clear();
        }
        *self.end_reason.lock() = RoundEndReason::None;
        *self.pass_available.lock() = true;
        *self.timer.lock() = TIMER_MAX;

        let decks = self.deck_count();
        {
            let mut rng = self.rng.lock();
            *self.shoe.lock() = Self::create_shoe(decks, &mut rng);
        }
        *self.current_card.lock() = Some(self.draw());
        *phase = GamePhase::InRound;
        drop(phase);

        let round = self.round();
        tracing::debug!(round, decks, "round started");
        self.emit(&GameEvent::RoundStarted { round });
    }

    /// Places the current card into the given column.
    ///
    /// No-op unless a round is in progress, the index is in range, a current
    /// card exists, and the target column is unlocked. After placement, end
    /// conditions are checked in priority order: bust of the placed column,
    /// then a perfect board; otherwise the next card is drawn.
    pub fn place_current_card(&self, column_index: usize) {
        let phase = self.phase.lock();
        if *phase != GamePhase::InRound {
            return;
        }
        if column_index >= COLUMN_COUNT {
            return;
        }
        if self.columns.lock()[column_index].is_locked() {
            return;
        }
        let Some(card) = self.current_card.lock().take() else {
            return;
        };

        let (placed_busted, board_sum, all_locked_at_21) = {
            let mut columns = self.columns.lock();
            columns[column_index].add_card(card);

            let placed_busted = columns[column_index].busted();
            let (board_sum, _) = scoring::board_totals(&*columns);
            let all_locked_at_21 = columns
                .iter()
                .all(|column| column.is_locked() && column.effective_total() == BLACKJACK);
            (placed_busted, board_sum, all_locked_at_21)
        };

        if placed_busted {
            self.end_round_locked(phase, RoundEndReason::Bust);
        } else if board_sum == PERFECT_BOARD || all_locked_at_21 {
            // The perfect board fires mid-deal, without waiting for every
            // column to lock.
            self.end_round_locked(phase, RoundEndReason::PerfectBoard);
        } else {
            *self.current_card.lock() = Some(self.draw());
        }
    }

    /// Discards the current card and draws a replacement.
    ///
    /// The pass is available once per round; a second call (or a call
    /// outside a round) is a no-op and leaves the current card unchanged.
    pub fn use_pass(&self) {
        let phase = self.phase.lock();
        if *phase != GamePhase::InRound {
            return;
        }
        {
            let mut pass = self.pass_available.lock();
            if !*pass {
                return;
            }
            *pass = false;
        }

        *self.current_card.lock() = Some(self.draw());
    }

    /// Voluntarily banks the standing board, ending the round.
    ///
    /// Normal scoring applies: a board with a busted column still scores 0.
    pub fn take_score(&self) {
        let phase = self.phase.lock();
        self.end_round_locked(phase, RoundEndReason::TookScore);
    }

    /// Advances from the between-rounds screen into the next round.
    pub fn next_round(&self) {
        let phase = self.phase.lock();
        if *phase != GamePhase::BetweenRounds {
            return;
        }
        *self.round.lock() += 1;

        self.start_round_locked(phase);
    }

    /// Returns to the menu state. The countdown goes cold with the phase
    /// change; any still-queued tick is a no-op.
    pub fn return_to_pre_game(&self) {
        let mut phase = self.phase.lock();
        *phase = GamePhase::PreGame;
        *self.current_card.lock() = None;
    }

    /// Ends the round for the given reason, consuming the held phase lock.
    ///
    /// Idempotent: the phase guard makes a second call (say a countdown tick
    /// racing a bust) a no-op, so round scores are applied exactly once. On
    /// the final round the total is offered to the high-score table and the
    /// table is persisted. The lock is released before observer hooks fire.
    pub(super) fn end_round_locked(
        &self,
        mut phase: MutexGuard<'_, GamePhase>,
        reason: RoundEndReason,
    ) {
        if *phase != GamePhase::InRound {
            return;
        }

        *self.end_reason.lock() = reason;
        *self.current_card.lock() = None;

        let timer_value = self.timer_value();
        let (score, board_total) = {
            let columns = self.columns.lock();
            scoring::round_score(&*columns, timer_value)
        };

        let round = self.round();
        self.round_scores.lock()[(round - 1) as usize] = score;
        let total = {
            let mut total_score = self.total_score.lock();
            *total_score += score;
            *total_score
        };

        let finished = round >= ROUNDS_PER_GAME;
        let mut new_top = false;
        if finished {
            new_top = self.scores.lock().insert(total, now_unix_secs());
            *self.new_high_score.lock() = new_top;
            *phase = GamePhase::GameOver;
        } else {
            *phase = GamePhase::BetweenRounds;
        }
        drop(phase);

        tracing::debug!(?reason, round, score, board_total, "round ended");
        self.emit(&GameEvent::RoundEnded { reason, score });

        if finished {
            self.persist_scores();
            self.emit(&GameEvent::GameOver {
                total_score: total,
                new_high_score: new_top,
            });
        }
    }
}
