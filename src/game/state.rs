//! Game phase and event types.

/// Game phase.
///
/// Exactly one phase is active at a time. `PreGame` is re-enterable from
/// `GameOver` via [`crate::Game::return_to_pre_game`]; the pipeline is not
/// strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No game in progress; menu state.
    PreGame,
    /// A round is being dealt and the countdown is running.
    InRound,
    /// A round has ended and the next one has not started (rounds 1 and 2).
    BetweenRounds,
    /// The third round has ended; the game is complete.
    GameOver,
}

/// Why a round terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEndReason {
    /// The round has not ended.
    None,
    /// A column went over 21.
    Bust,
    /// The player banked the standing board voluntarily.
    TookScore,
    /// The board reached the perfect total of 105.
    PerfectBoard,
    /// The countdown reached zero.
    TimerExpired,
}

/// Notification emitted after a state-changing operation completes.
///
/// Delivered to hooks registered with [`crate::Game::on_event`] after the
/// engine has released its state locks; hooks observe, they never steer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A round began.
    RoundStarted {
        /// Round number, 1-based.
        round: u8,
    },
    /// A round ended.
    RoundEnded {
        /// Why the round ended.
        reason: RoundEndReason,
        /// Score earned this round.
        score: u32,
    },
    /// The third round ended and the game is complete.
    GameOver {
        /// Accumulated score across all three rounds.
        total_score: u32,
        /// Whether the total claimed the top of the high-score table.
        new_high_score: bool,
    },
}
