//! Countdown semantics.
//!
//! The countdown is the only autonomous recurrence in the engine. The tick
//! itself lives on [`Game`] so hosts can drive cadence however they like
//! (tests call it directly); [`CountdownDriver`] is the bundled real-time
//! driver, burning four timer units per second on a background thread.
//!
//! A tick outside an active round is a no-op by the phase guard, so a round
//! ending by any other means deterministically stops the clock: once the
//! phase has changed, no stale tick can touch the timer, and a restarted
//! round never sees a competing countdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::Game;
use super::state::{GamePhase, RoundEndReason};

/// Real-time interval between ticks: one timer unit every 250ms.
pub(super) const TICK_INTERVAL: Duration = Duration::from_millis(250);

impl Game {
    /// Advances the countdown by one timer unit.
    ///
    /// No-op unless a round is in progress. Reaching zero ends the round
    /// with [`RoundEndReason::TimerExpired`]. Returns whether the round is
    /// still running afterwards.
    pub fn tick(&self) -> bool {
        let phase = self.phase.lock();
        if *phase != GamePhase::InRound {
            return false;
        }

        let expired = {
            let mut timer = self.timer.lock();
            *timer = timer.saturating_sub(1);
            *timer == 0
        };

        if expired {
            self.end_round_locked(phase, RoundEndReason::TimerExpired);
            return false;
        }

        true
    }
}

/// Background thread that ticks a [`Game`] at real-time cadence.
///
/// The driver runs for the lifetime of the game, across rounds; ticks
/// arriving between rounds are no-ops. Dropping (or [`stop`]ping) the driver
/// cancels the thread and joins it.
///
/// [`stop`]: CountdownDriver::stop
pub struct CountdownDriver {
    /// Cancellation flag checked every tick.
    cancel: Arc<AtomicBool>,
    /// The ticking thread; taken on stop.
    handle: Option<JoinHandle<()>>,
}

impl CountdownDriver {
    /// Spawns the ticking thread.
    ///
    /// Spawn at most one driver per game; a second driver would double the
    /// countdown rate.
    #[must_use]
    pub fn spawn(game: Arc<Game>) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(TICK_INTERVAL);
                game.tick();
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Cancels the ticking thread and waits for it to exit.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for CountdownDriver {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
