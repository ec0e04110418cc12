//! Board-total bonus table and round-score formula.

use crate::column::Column;

/// Board total of a perfect board (five columns counting 21 each).
pub const PERFECT_BOARD: u32 = 105;

/// Sums the board's effective column totals.
///
/// Returns `(sum, any_busted)`. The bust flag is judged on raw totals, so a
/// busted column poisons the board even though its effective total is capped.
#[must_use]
pub fn board_totals(columns: &[Column]) -> (u32, bool) {
    let mut sum = 0;
    let mut any_busted = false;

    for column in columns {
        sum += column.effective_total();
        if column.busted() {
            any_busted = true;
        }
    }

    (sum, any_busted)
}

/// Returns the bonus multiplier for an exact board total, if any.
///
/// Totals outside 97..=105 earn no bonus.
#[must_use]
pub const fn multiplier_for(board_total: u32) -> Option<u32> {
    match board_total {
        105 => Some(1000),
        104 => Some(500),
        103 => Some(400),
        102 => Some(300),
        101 => Some(250),
        100 => Some(200),
        99 => Some(150),
        98 => Some(100),
        97 => Some(50),
        _ => None,
    }
}

/// Computes the score for a finished round.
///
/// Returns `(score, board_total)`. A board with any busted column scores 0,
/// as does a board total with no bonus multiplier; otherwise the score is
/// the remaining timer value times the multiplier.
#[must_use]
pub fn round_score(columns: &[Column], timer_value: u32) -> (u32, u32) {
    let (sum, any_busted) = board_totals(columns);

    if any_busted {
        return (0, sum);
    }

    match multiplier_for(sum) {
        Some(multiplier) => (timer_value * multiplier, sum),
        None => (0, sum),
    }
}
