//! Game engine integration tests.

use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use blitz21::{
    Card, CountdownDriver, Game, GameEvent, GameOptions, GamePhase, JsonFileStore, MemoryStore,
    RoundEndReason, ScoreStore, ScoreTable, Suit, TIMER_MAX,
};

const fn card(rank: u8) -> Card {
    Card::new(Suit::Hearts, rank)
}

fn new_game() -> Game {
    Game::new(GameOptions::default(), MemoryStore::new(), 42)
}

/// Replaces the shoe so the engine draws `draws` in order, and re-deals the
/// current card from it.
fn set_draws(game: &Game, draws: &[Card]) {
    let mut shoe: Vec<Card> = draws.to_vec();
    shoe.reverse();
    *game.shoe.lock() = shoe;
    let next = game.shoe.lock().pop();
    *game.current_card.lock() = next;
}

/// Fills all five columns with two kings each (board total 100).
///
/// Callers must have seeded at least eleven draws.
fn fill_board_to_100(game: &Game) {
    for index in 0..5 {
        game.place_current_card(index);
        game.place_current_card(index);
    }
}

#[test]
fn start_new_game_resets_everything() {
    let game = new_game();
    game.start_new_game();

    assert_eq!(game.current_phase(), GamePhase::InRound);
    assert_eq!(game.round(), 1);
    assert_eq!(game.timer_value(), TIMER_MAX);
    assert!(game.pass_available());
    assert!(game.peek_current_card().is_some());
    assert_eq!(game.shoe.lock().len(), 51);
    assert_eq!(game.total_score(), 0);
    assert_eq!(game.round_end_reason(), RoundEndReason::None);
    assert!(game.board().iter().all(|column| column.is_empty()));
}

#[test]
fn deck_count_three_builds_156_card_shoe() {
    let game = new_game();
    game.set_deck_count(3);
    game.start_new_game();

    // 156 cards built, one already dealt as the current card.
    assert_eq!(game.shoe.lock().len() + 1, 156);

    // One card per column: five draws total, 151 left in the shoe.
    for index in 0..4 {
        game.place_current_card(index);
    }
    assert_eq!(game.shoe.lock().len(), 151);
    assert_eq!(game.current_phase(), GamePhase::InRound);
}

#[test]
fn busting_a_column_ends_the_round_scoreless() {
    let game = new_game();
    game.start_new_game();
    set_draws(&game, &[card(13), card(12), card(5), card(9)]);

    game.place_current_card(0); // K
    game.place_current_card(0); // Q -> 20
    game.place_current_card(0); // 5 -> 25, bust

    assert_eq!(game.current_phase(), GamePhase::BetweenRounds);
    assert_eq!(game.round_end_reason(), RoundEndReason::Bust);
    assert_eq!(game.round_scores(), [0, 0, 0]);
    assert_eq!(game.total_score(), 0);
    assert!(game.peek_current_card().is_none());
}

#[test]
fn perfect_board_of_hard_21s_pays_top_multiplier() {
    let game = new_game();
    game.start_new_game();
    set_draws(&game, &[card(7); 15]);

    for index in 0..5 {
        for _ in 0..3 {
            game.place_current_card(index);
        }
    }

    assert_eq!(game.current_phase(), GamePhase::BetweenRounds);
    assert_eq!(game.round_end_reason(), RoundEndReason::PerfectBoard);
    // Untouched timer at 280 times the 105 multiplier.
    assert_eq!(game.round_scores()[0], 280_000);
    assert_eq!(game.total_score(), 280_000);
}

#[test]
fn perfect_board_fires_mid_deal_with_an_unlocked_column() {
    let game = new_game();
    game.start_new_game();

    let mut draws = vec![card(7); 12];
    draws.push(card(1));
    draws.push(card(13));
    set_draws(&game, &draws);

    for index in 0..4 {
        for _ in 0..3 {
            game.place_current_card(index);
        }
    }
    game.place_current_card(4); // A
    game.place_current_card(4); // K -> soft 21, unlocked

    assert_eq!(game.round_end_reason(), RoundEndReason::PerfectBoard);
    assert!(!game.board()[4].is_locked());
}

#[test]
fn take_score_converts_remaining_time() {
    let game = new_game();
    game.start_new_game();
    set_draws(&game, &[card(13); 11]);
    fill_board_to_100(&game);

    // Burn the clock down to 150 units.
    for _ in 0..130 {
        assert!(game.tick());
    }
    assert_eq!(game.timer_value(), 150);

    game.take_score();
    assert_eq!(game.current_phase(), GamePhase::BetweenRounds);
    assert_eq!(game.round_end_reason(), RoundEndReason::TookScore);
    assert_eq!(game.round_scores()[0], 30_000); // 150 * 200
    assert_eq!(game.total_score(), 30_000);
}

#[test]
fn take_score_without_bonus_scores_zero() {
    let game = new_game();
    game.start_new_game();

    let mut draws = vec![card(13); 9];
    draws.push(card(6)); // fifth column ends on 16, board total 96
    draws.push(card(2)); // drawn after the last placement
    set_draws(&game, &draws);
    fill_board_to_100(&game);

    game.take_score();
    assert_eq!(game.round_end_reason(), RoundEndReason::TookScore);
    assert_eq!(game.round_scores()[0], 0);
    assert_eq!(game.total_score(), 0);
}

#[test]
fn pass_is_single_use_per_round() {
    let game = new_game();
    game.start_new_game();
    set_draws(&game, &[card(2), card(3), card(4)]);

    assert_eq!(game.peek_current_card(), Some(card(2)));
    game.use_pass();
    assert_eq!(game.peek_current_card(), Some(card(3)));
    assert!(!game.pass_available());

    // Second call is a no-op: current card unchanged, pass stays used.
    game.use_pass();
    assert_eq!(game.peek_current_card(), Some(card(3)));

    // The pass refreshes on the next round.
    game.take_score();
    game.next_round();
    assert!(game.pass_available());
}

#[test]
fn pass_is_a_noop_outside_a_round() {
    let game = new_game();
    game.use_pass();
    assert!(game.peek_current_card().is_none());
    assert_eq!(game.current_phase(), GamePhase::PreGame);
}

#[test]
fn timer_expiry_ends_the_round() {
    let game = new_game();
    game.start_new_game();
    *game.timer.lock() = 1;

    assert!(!game.tick());
    assert_eq!(game.current_phase(), GamePhase::BetweenRounds);
    assert_eq!(game.round_end_reason(), RoundEndReason::TimerExpired);
    assert_eq!(game.round_scores()[0], 0);

    // A stale tick after the round ended is a no-op.
    assert!(!game.tick());
    assert_eq!(game.timer_value(), 0);
}

#[test]
fn round_end_applies_exactly_once() {
    let game = new_game();
    game.start_new_game();
    set_draws(&game, &[card(13); 11]);
    fill_board_to_100(&game);

    game.take_score();
    assert_eq!(game.total_score(), 56_000); // 280 * 200

    // Simulate a user action and a timer tick racing the finished round.
    game.take_score();
    game.tick();
    assert_eq!(game.total_score(), 56_000);
    assert_eq!(game.round_scores(), [56_000, 0, 0]);
    assert_eq!(game.current_phase(), GamePhase::BetweenRounds);
}

#[test]
fn placement_preconditions_are_silent_noops() {
    let game = new_game();

    // Not in a round yet.
    game.place_current_card(0);
    assert_eq!(game.current_phase(), GamePhase::PreGame);

    game.start_new_game();
    set_draws(&game, &[card(7), card(7), card(7), card(5), card(9)]);

    // Out-of-range column index.
    game.place_current_card(5);
    assert_eq!(game.peek_current_card(), Some(card(7)));

    // Lock column 0 with a hard 21.
    for _ in 0..3 {
        game.place_current_card(0);
    }
    assert!(game.board()[0].is_locked());

    // Placing onto a locked column keeps the current card.
    game.place_current_card(0);
    assert_eq!(game.peek_current_card(), Some(card(5)));
    assert_eq!(game.board()[0].len(), 3);

    // An unlocked column still accepts it.
    game.place_current_card(1);
    assert_eq!(game.board()[1].len(), 1);
}

#[test]
fn full_game_accumulates_and_records_high_score() {
    let store = Arc::new(MemoryStore::new());
    let game = Game::new(GameOptions::default(), Arc::clone(&store), 7);

    game.start_new_game();
    for round in 1..=3 {
        if round > 1 {
            game.next_round();
        }
        assert_eq!(game.round(), round);
        set_draws(&game, &[card(13); 11]);
        fill_board_to_100(&game);
        game.take_score();
    }

    assert_eq!(game.current_phase(), GamePhase::GameOver);
    assert_eq!(game.round_scores(), [56_000, 56_000, 56_000]);
    assert_eq!(game.total_score(), 168_000);
    assert!(game.is_new_high_score());
    assert_eq!(game.high_scores().best(), Some(168_000));

    // The table was persisted at game over.
    let saved = store.saved().expect("table saved at game over");
    assert_eq!(saved.best(), Some(168_000));

    game.return_to_pre_game();
    assert_eq!(game.current_phase(), GamePhase::PreGame);
    assert!(game.peek_current_card().is_none());
}

#[test]
fn lower_second_game_is_not_a_new_top() {
    let game = new_game();

    game.start_new_game();
    for round in 1..=3 {
        if round > 1 {
            game.next_round();
        }
        set_draws(&game, &[card(13); 11]);
        fill_board_to_100(&game);
        game.take_score();
    }
    assert!(game.is_new_high_score());

    // Second game banks empty boards: total 0, well under the best.
    game.start_new_game();
    game.take_score();
    game.next_round();
    game.take_score();
    game.next_round();
    game.take_score();

    assert_eq!(game.current_phase(), GamePhase::GameOver);
    assert_eq!(game.total_score(), 0);
    assert!(!game.is_new_high_score());
    assert_eq!(game.high_scores().len(), 2);
}

#[test]
fn next_round_requires_between_rounds() {
    let game = new_game();
    game.next_round();
    assert_eq!(game.current_phase(), GamePhase::PreGame);

    game.start_new_game();
    game.next_round();
    assert_eq!(game.round(), 1);
    assert_eq!(game.current_phase(), GamePhase::InRound);
}

#[test]
fn deck_count_change_takes_effect_next_round() {
    let game = new_game();
    game.start_new_game();
    assert_eq!(game.shoe.lock().len() + 1, 52);

    game.set_deck_count(2);
    assert_eq!(game.deck_count(), 2);
    assert_eq!(game.shoe.lock().len() + 1, 52); // current round unaffected

    game.take_score();
    game.next_round();
    assert_eq!(game.shoe.lock().len() + 1, 104);
}

#[test]
fn deck_count_clamps_to_one() {
    let game = new_game();
    game.set_deck_count(0);
    assert_eq!(game.deck_count(), 1);
}

#[test]
fn exhausted_shoe_rebuilds_on_draw() {
    let game = new_game();
    game.start_new_game();
    set_draws(&game, &[card(4)]);
    assert!(game.shoe.lock().is_empty());

    game.place_current_card(0);

    // The defensive rebuild kicked in: fresh 52-card shoe minus one draw.
    assert_eq!(game.shoe.lock().len(), 51);
    assert!(game.peek_current_card().is_some());
    assert_eq!(game.current_phase(), GamePhase::InRound);
}

#[test]
fn events_trace_the_game() {
    let game = new_game();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    game.on_event(move |event| sink.lock().unwrap().push(*event));

    game.start_new_game();
    game.take_score();
    game.next_round();
    game.take_score();
    game.next_round();
    game.take_score();

    let events = events.lock().unwrap();
    assert_eq!(events[0], GameEvent::RoundStarted { round: 1 });
    assert_eq!(
        events[1],
        GameEvent::RoundEnded {
            reason: RoundEndReason::TookScore,
            score: 0,
        }
    );
    assert_eq!(events[2], GameEvent::RoundStarted { round: 2 });

    // A zero total still tops an empty table.
    assert_eq!(
        *events.last().unwrap(),
        GameEvent::GameOver {
            total_score: 0,
            new_high_score: true,
        }
    );
    let round_ends = events
        .iter()
        .filter(|event| matches!(event, GameEvent::RoundEnded { .. }))
        .count();
    assert_eq!(round_ends, 3);
}

#[test]
fn clear_high_scores_persists_empty_table() {
    let store = Arc::new(MemoryStore::new());
    let mut table = ScoreTable::new();
    table.insert(999, 1);
    store.save(&table).unwrap();

    let game = Game::new(GameOptions::default(), Arc::clone(&store), 1);
    assert_eq!(game.high_scores().best(), Some(999));

    game.clear_high_scores();
    assert!(game.high_scores().is_empty());
    assert_eq!(store.saved(), Some(ScoreTable::new()));
}

#[test]
fn failed_persistence_degrades_gracefully() {
    let store = JsonFileStore::new("/nonexistent/blitz21/scores.json");
    let game = Game::new(GameOptions::default(), store, 1);

    // Failed load starts empty.
    assert!(game.high_scores().is_empty());

    // Failed save at game over must not panic or block the game.
    game.start_new_game();
    game.take_score();
    game.next_round();
    game.take_score();
    game.next_round();
    game.take_score();
    assert_eq!(game.current_phase(), GamePhase::GameOver);
}

#[test]
fn expiring_tick_racing_a_pass_leaves_no_card_behind() {
    // A pass and the final tick landing together must serialize: whichever
    // order they take, an ended round ends with no current card.
    for seed in 0..200 {
        let game = Arc::new(Game::new(GameOptions::default(), MemoryStore::new(), seed));
        game.start_new_game();
        *game.timer.lock() = 1;

        let barrier = Arc::new(Barrier::new(2));
        let ticker = {
            let game = Arc::clone(&game);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                game.tick();
            })
        };

        barrier.wait();
        game.use_pass();
        ticker.join().unwrap();

        assert_eq!(game.current_phase(), GamePhase::BetweenRounds);
        assert_eq!(game.round_end_reason(), RoundEndReason::TimerExpired);
        assert!(
            game.peek_current_card().is_none(),
            "current card present after round end (seed {seed})"
        );
    }
}

#[test]
fn tick_racing_next_round_cannot_expire_the_fresh_round() {
    // A leftover tick from the previous round must either land before the
    // transition (a between-rounds no-op) or after the new round is fully
    // reset; it must never expire the incoming round off stale timer state.
    for seed in 0..200 {
        let game = Arc::new(Game::new(GameOptions::default(), MemoryStore::new(), seed));
        game.start_new_game();
        game.take_score();
        assert_eq!(game.current_phase(), GamePhase::BetweenRounds);
        *game.timer.lock() = 1;

        let barrier = Arc::new(Barrier::new(2));
        let ticker = {
            let game = Arc::clone(&game);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                game.tick();
            })
        };

        barrier.wait();
        game.next_round();
        ticker.join().unwrap();

        assert_eq!(game.current_phase(), GamePhase::InRound, "seed {seed}");
        assert_eq!(game.round(), 2);
        assert_eq!(game.round_end_reason(), RoundEndReason::None);
        assert!(game.timer_value() >= TIMER_MAX - 1);
    }
}

#[test]
fn countdown_driver_burns_the_clock() {
    let game = Arc::new(new_game());
    game.start_new_game();

    let driver = CountdownDriver::spawn(Arc::clone(&game));
    thread::sleep(Duration::from_millis(700));
    driver.stop();

    let after = game.timer_value();
    assert!(after < TIMER_MAX, "timer did not advance: {after}");
    assert_eq!(game.current_phase(), GamePhase::InRound);
}
