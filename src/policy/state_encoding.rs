use serde::{Deserialize, Serialize};

use crate::game::chow_solver::character_counts;
use crate::game::tile::{count_tiles, Tile, DRAGON_MAX, WIND_MIN};

/// How a hand is turned into a Q-table state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StateEncoding {
    /// Per-rank Character counts plus honor pair/single totals. Honors of the
    /// same shape collapse into one state.
    #[default]
    Features,
    /// The sorted tile codes themselves.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(pub Vec<u8>);

impl StateEncoding {
    pub fn encode(self, hand: &[Tile]) -> StateKey {
        match self {
            StateEncoding::Features => {
                let mut key: Vec<u8> = character_counts(hand).to_vec();
                let counts = count_tiles(hand);
                let mut honor_pairs = 0u8;
                let mut honor_singles = 0u8;
                for &count in &counts[WIND_MIN as usize..=DRAGON_MAX as usize] {
                    match count {
                        0 => {}
                        1 => honor_singles += 1,
                        _ => honor_pairs += 1,
                    }
                }
                key.push(honor_pairs);
                key.push(honor_singles);
                StateKey(key)
            }
            StateEncoding::Exact => {
                let mut codes: Vec<u8> = hand.iter().map(|t| t.code()).collect();
                codes.sort_unstable();
                StateKey(codes)
            }
        }
    }
}
