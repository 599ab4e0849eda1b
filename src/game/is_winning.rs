use crate::game::chow_solver::{character_counts, find_runs};
use crate::game::tile::{count_tiles, Tile};

/// Number of Character runs a winning hand must hold besides its pair.
pub const RUNS_PER_HAND: usize = 2;

/// The pair and runs certified by [`decompose_winning_hand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningShape {
    pub pair: Tile,
    /// First tile of each run, lowest first.
    pub runs: Vec<Tile>,
}

/// Splits `hand` into its pair and two Character runs, or returns `None` when
/// the hand is not a winning shape.
///
/// Only hands of 8 or 9 tiles are considered. The hand must hold exactly one
/// pair (Character, Wind or Dragon); everything else must be distinct
/// Character tiles covered by exactly two runs of consecutive ranks.
pub fn decompose_winning_hand(hand: &[Tile]) -> Option<WinningShape> {
    if hand.len() != 8 && hand.len() != 9 {
        return None;
    }
    if hand.iter().any(|t| !t.is_valid()) {
        return None;
    }

    let counts = count_tiles(hand);
    let mut pairs = (0..counts.len()).filter(|&code| counts[code] == 2);
    let pair = Tile(pairs.next()? as u8);
    if pairs.next().is_some() {
        return None;
    }

    let mut remainder: Vec<Tile> = Vec::with_capacity(hand.len() - 2);
    let mut skipped = 0;
    for &tile in hand {
        if tile == pair && skipped < 2 {
            skipped += 1;
            continue;
        }
        remainder.push(tile);
    }

    // Honors may only appear as the pair.
    if remainder.iter().any(|t| !t.is_character()) {
        return None;
    }

    let ranks = character_counts(&remainder);
    if ranks.iter().any(|&c| c > 1) {
        return None;
    }

    let runs = find_runs(ranks, RUNS_PER_HAND)?;
    Some(WinningShape { pair, runs })
}

/// Terminal condition used for both training and evaluation.
pub fn is_winning(hand: &[Tile]) -> bool {
    decompose_winning_hand(hand).is_some()
}
