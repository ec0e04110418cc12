//! CLI demo of the five-column game.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use blitz21::{
    Card, CountdownDriver, Game, GameOptions, GamePhase, JsonFileStore, RoundEndReason, Suit,
};

fn main() {
    println!("blitz21 CLI demo (1-5 places the card, p = pass, t = take score, q = quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let store = JsonFileStore::new(std::env::temp_dir().join("blitz21-scores.json"));
    let game = Arc::new(Game::new(GameOptions::default(), store, seed));

    if let Some(best) = game.high_scores().best() {
        println!("Best score so far: {best}");
    }

    game.start_new_game();
    let driver = CountdownDriver::spawn(Arc::clone(&game));

    loop {
        match game.current_phase() {
            GamePhase::InRound => {
                print_board(&game);
                match prompt_line("> ").as_str() {
                    "q" => break,
                    "p" => {
                        if game.pass_available() {
                            game.use_pass();
                        } else {
                            println!("Pass already used this round.");
                        }
                    }
                    "t" => game.take_score(),
                    input => match input.parse::<usize>() {
                        Ok(slot @ 1..=5) => game.place_current_card(slot - 1),
                        _ => println!("Unrecognized input."),
                    },
                }
            }
            GamePhase::BetweenRounds => {
                print_round_summary(&game);
                if prompt_line("Next round? (y/n): ") == "n" {
                    break;
                }
                game.next_round();
            }
            GamePhase::GameOver => {
                print_round_summary(&game);
                println!("Game over. Total score: {}", game.total_score());
                if game.is_new_high_score() {
                    println!("New high score!");
                }
                if prompt_line("Play again? (y/n): ") == "n" {
                    break;
                }
                game.start_new_game();
            }
            GamePhase::PreGame => game.start_new_game(),
        }
    }

    driver.stop();
    println!("Goodbye.");
}

fn print_board(game: &Game) {
    println!(
        "\nRound {}  Timer {}  Score {}",
        game.round(),
        game.timer_value(),
        game.total_score()
    );
    for (index, column) in game.board().iter().enumerate() {
        let cards: Vec<String> = column.cards().iter().map(card_label).collect();
        let state = if column.is_five_card_charlie() {
            " [charlie]"
        } else if column.is_locked() {
            " [locked]"
        } else if column.busted() {
            " [bust]"
        } else {
            ""
        };
        println!(
            "  {}: {:<20} total {}{}",
            index + 1,
            cards.join(" "),
            column.total(),
            state
        );
    }
    match game.peek_current_card() {
        Some(card) => println!("Current card: {}", card_label(&card)),
        None => println!("Current card: -"),
    }
}

fn print_round_summary(game: &Game) {
    let reason = match game.round_end_reason() {
        RoundEndReason::Bust => "bust",
        RoundEndReason::TookScore => "score taken",
        RoundEndReason::PerfectBoard => "perfect board",
        RoundEndReason::TimerExpired => "time up",
        RoundEndReason::None => "-",
    };
    let scores = game.round_scores();
    println!(
        "\nRound {} over ({reason}). Round scores: {scores:?}",
        game.round()
    );
}

fn card_label(card: &Card) -> String {
    let rank = match card.rank {
        1 => "A".to_owned(),
        11 => "J".to_owned(),
        12 => "Q".to_owned(),
        13 => "K".to_owned(),
        n => n.to_string(),
    };
    let suit = match card.suit {
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Clubs => '♣',
        Suit::Spades => '♠',
    };
    format!("{rank}{suit}")
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
    line.trim().to_lowercase()
}
