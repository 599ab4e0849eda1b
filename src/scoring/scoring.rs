use crate::game::is_winning::{decompose_winning_hand, WinningShape};
use crate::game::tile::{Tile, TileKind};

/// Points are multiplied by this before being reported.
pub const POINT_VALUE: i32 = 10;
/// Steps at or beyond this horizon earn no speed bonus; one full wall of draws.
pub const SPEED_BONUS_HORIZON: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub total: i32,
    pub base: i32,
    pub bonus: i32,
    pub details: Vec<String>,
}

/// Scores a finished hand won after `steps` discards.
///
/// Base points come from the patterns of the winning shape; the bonus rewards
/// winning early. A hand that does not win scores zero.
pub fn calc_score(hand: &[Tile], steps: usize) -> ScoreBreakdown {
    let Some(shape) = decompose_winning_hand(hand) else {
        return ScoreBreakdown {
            total: 0,
            base: 0,
            bonus: 0,
            details: vec!["No Win".to_string()],
        };
    };

    let mut details = Vec::new();
    let mut points = 0;
    for (name, value) in patterns(hand, &shape) {
        points += value;
        details.push(format!("{} ({})", name, value));
    }

    let base = points * POINT_VALUE;
    let bonus = SPEED_BONUS_HORIZON.saturating_sub(steps) as i32 * POINT_VALUE;
    if bonus > 0 {
        details.push(format!("Speed Bonus ({} steps)", steps));
    }

    ScoreBreakdown {
        total: base + bonus,
        base,
        bonus,
        details,
    }
}

fn patterns(hand: &[Tile], shape: &WinningShape) -> Vec<(&'static str, i32)> {
    let mut found = vec![("Win", 1)];

    match shape.pair.kind() {
        Some(TileKind::Character) => found.push(("Full Flush", 6)),
        Some(TileKind::Dragon) => {
            found.push(("Half Flush", 3));
            found.push(("Dragon Pair", 1));
        }
        Some(TileKind::Wind) => {
            found.push(("Half Flush", 3));
            found.push(("Wind Pair", 1));
        }
        None => {}
    }

    let all_simples = hand
        .iter()
        .all(|t| matches!(t.rank(), Some(rank) if (2..=8).contains(&rank)));
    if all_simples {
        found.push(("All Simples", 1));
    }

    if let [first, second] = shape.runs.as_slice() {
        if second.code() == first.code() + 3 {
            found.push(("Six-tile Straight", 2));
        }
    }

    found
}
