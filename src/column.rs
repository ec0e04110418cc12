//! Column (hand) representation and blackjack-style evaluation.

use crate::card::Card;

/// Number of cards that locks a column as a five-card charlie.
pub const CHARLIE_SIZE: usize = 5;

/// Highest total a column can hold without busting.
pub const BLACKJACK: u32 = 21;

/// Evaluates a card sequence into `(total, is_soft)`.
///
/// The total sums base values with every ace at 1, then upgrades aces one at
/// a time (+10 each) while the result stays at or below 21. A hand is soft
/// when it has at least two cards, contains an ace, and the base sum plus 10
/// does not exceed 21 (a lone ace is never soft).
fn evaluate_cards(cards: &[Card]) -> (u32, bool) {
    let mut base: u32 = 0;
    let mut aces: u32 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        base += card.base_value();
    }

    let mut total = base;
    let mut upgradable = aces;
    while upgradable > 0 && total + 10 <= BLACKJACK {
        total += 10;
        upgradable -= 1;
    }

    let is_soft = cards.len() >= 2 && aces > 0 && base + 10 <= BLACKJACK;
    (total, is_soft)
}

/// One of the five hand-building slots on the board.
///
/// Cards are appended in placement order. A column locks when it reaches a
/// hard 21 or accumulates five cards without busting (a five-card charlie);
/// locked columns silently ignore further cards.
#[derive(Debug, Clone, Default)]
pub struct Column {
    /// Cards in placement order.
    cards: Vec<Card>,
    /// Whether the column refuses further cards.
    locked: bool,
    /// Whether the column locked by holding five cards at or under 21.
    five_card_charlie: bool,
}

impl Column {
    /// Creates a new empty, unlocked column.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            locked: false,
            five_card_charlie: false,
        }
    }

    /// Adds a card to the column and re-runs the lock transition.
    ///
    /// Silently does nothing when the column is already locked; callers are
    /// expected to check [`Self::is_locked`] first, but stale calls must not
    /// corrupt a finished hand.
    pub fn add_card(&mut self, card: Card) {
        if self.locked {
            return;
        }

        self.cards.push(card);
        self.apply_lock_transition();
    }

    /// Lock transition, run after every card addition.
    fn apply_lock_transition(&mut self) {
        let total = self.total();

        if self.cards.len() >= CHARLIE_SIZE && total <= BLACKJACK {
            self.five_card_charlie = true;
            self.locked = true;
        } else if total == BLACKJACK && !self.is_soft() {
            // Hard 21 locks immediately; a soft 21 (e.g. A+10) stays open.
            self.locked = true;
        } else if self.locked && total != BLACKJACK && !self.five_card_charlie {
            // Consistency repair: unreachable as long as locked columns
            // reject further cards, kept so a drifted column re-opens
            // instead of wedging the board.
            debug_assert!(false, "locked column drifted away from 21");
            self.locked = false;
        }
    }

    /// Resets the column to empty and unlocked (round start).
    pub fn clear(&mut self) {
        self.cards.clear();
        self.locked = false;
        self.five_card_charlie = false;
    }

    /// Returns the cards in the column.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calculates the value of the column.
    ///
    /// Aces are counted as 11 when that does not bust the hand, otherwise
    /// as 1. Recomputed from scratch on every call.
    #[must_use]
    pub fn total(&self) -> u32 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the column is soft (an ace currently counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the column has busted (total over 21).
    #[must_use]
    pub fn busted(&self) -> bool {
        self.total() > BLACKJACK
    }

    /// Returns the column's value as counted toward the board total.
    ///
    /// A five-card charlie always counts as 21, even when its raw total is
    /// lower; otherwise the raw total capped at 21. Bust detection is done
    /// on raw totals, never on this capped value.
    #[must_use]
    pub fn effective_total(&self) -> u32 {
        if self.five_card_charlie {
            BLACKJACK
        } else {
            self.total().min(BLACKJACK)
        }
    }

    /// Returns whether the column refuses further cards.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns whether the column locked as a five-card charlie.
    #[must_use]
    pub const fn is_five_card_charlie(&self) -> bool {
        self.five_card_charlie
    }

    /// Returns the number of cards in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
