use crate::game::hand::Hand;
use crate::game::is_winning::is_winning;
use crate::game::wall::Wall;
use crate::policy::discard_policy::DiscardPolicy;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeFailure {
    /// The policy returned no discard.
    NoDiscard,
    /// The step cap was reached before a win.
    StepCapReached,
    /// The wall ran out before a win.
    WallExhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EpisodeOutcome {
    Won {
        steps: usize,
        hand: Hand,
    },
    Failed {
        reason: EpisodeFailure,
        steps: usize,
        hand: Hand,
        wall: Wall,
    },
}

impl EpisodeOutcome {
    pub fn steps(&self) -> usize {
        match self {
            EpisodeOutcome::Won { steps, .. } | EpisodeOutcome::Failed { steps, .. } => *steps,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, EpisodeOutcome::Won { .. })
    }
}

/// Plays `policy` from `hand` until the hand wins, the policy gives up, the
/// wall runs out, or `max_steps` discards have been made.
///
/// Each step discards the chosen tile and draws the last wall tile. No step
/// is taken on an empty wall, so the hand keeps its length throughout.
/// A discard the hand does not hold aborts with
/// [`crate::MahjongError::TileNotInHand`].
pub fn run_episode<P: DiscardPolicy + ?Sized>(
    mut hand: Hand,
    mut wall: Wall,
    policy: &P,
    max_steps: usize,
) -> Result<EpisodeOutcome> {
    let mut steps = 0;
    while !is_winning(hand.tiles()) {
        if steps >= max_steps {
            return Ok(EpisodeOutcome::Failed {
                reason: EpisodeFailure::StepCapReached,
                steps,
                hand,
                wall,
            });
        }
        if wall.is_empty() {
            return Ok(EpisodeOutcome::Failed {
                reason: EpisodeFailure::WallExhausted,
                steps,
                hand,
                wall,
            });
        }
        let Some(discard) = policy.act_greedy(&hand) else {
            return Ok(EpisodeOutcome::Failed {
                reason: EpisodeFailure::NoDiscard,
                steps,
                hand,
                wall,
            });
        };
        hand.discard(discard)?;
        if let Some(tile) = wall.draw() {
            hand.draw(tile);
        }
        steps += 1;
    }
    Ok(EpisodeOutcome::Won { steps, hand })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Tile;
    use crate::policy::discard_policy::{TableSummary, TerminalPredicate};
    use crate::MahjongError;
    use assert_matches::assert_matches;
    use std::cell::RefCell;
    use std::path::Path;

    /// Replays a fixed list of discards, then gives up.
    struct ScriptedPolicy {
        discards: RefCell<Vec<Tile>>,
    }

    impl ScriptedPolicy {
        fn new(codes: &[u8]) -> Self {
            let mut discards: Vec<Tile> = codes.iter().map(|&c| Tile(c)).collect();
            discards.reverse();
            Self {
                discards: RefCell::new(discards),
            }
        }
    }

    impl DiscardPolicy for ScriptedPolicy {
        fn train(&mut self, _: &Hand, _: &Wall, _: usize, _: &TerminalPredicate) -> Result<()> {
            Ok(())
        }
        fn act_greedy(&self, _hand: &Hand) -> Option<Tile> {
            self.discards.borrow_mut().pop()
        }
        fn load(&mut self, _: &Path) -> Result<()> {
            Ok(())
        }
        fn save(&self, _: &Path) -> Result<()> {
            Ok(())
        }
        fn set_exploration(&mut self, _: f64) {}
        fn table_summary(&self) -> TableSummary {
            TableSummary::default()
        }
    }

    /// Always discards the first tile in hand.
    struct FirstTilePolicy;

    impl DiscardPolicy for FirstTilePolicy {
        fn train(&mut self, _: &Hand, _: &Wall, _: usize, _: &TerminalPredicate) -> Result<()> {
            Ok(())
        }
        fn act_greedy(&self, hand: &Hand) -> Option<Tile> {
            hand.tiles().first().copied()
        }
        fn load(&mut self, _: &Path) -> Result<()> {
            Ok(())
        }
        fn save(&self, _: &Path) -> Result<()> {
            Ok(())
        }
        fn set_exploration(&mut self, _: f64) {}
        fn table_summary(&self) -> TableSummary {
            TableSummary::default()
        }
    }

    fn tiles(codes: &[u8]) -> Vec<Tile> {
        codes.iter().map(|&c| Tile(c)).collect()
    }

    #[test]
    fn test_already_winning_hand_takes_zero_steps() {
        let hand = Hand::new(tiles(&[9, 10, 11, 12, 13, 14, 31, 31]));
        let outcome = run_episode(hand, Wall::new(Vec::new()), &FirstTilePolicy, 10).unwrap();
        assert_matches!(outcome, EpisodeOutcome::Won { steps: 0, .. });
    }

    #[test]
    fn test_scripted_win_in_two_steps() {
        // Wall draws from the back: 31 first, then 31.
        let hand = Hand::new(tiles(&[9, 10, 11, 12, 13, 14, 16, 17]));
        let wall = Wall::new(tiles(&[27, 31, 31]));
        let policy = ScriptedPolicy::new(&[16, 17]);
        let outcome = run_episode(hand, wall, &policy, 10).unwrap();
        match outcome {
            EpisodeOutcome::Won { steps, hand } => {
                assert_eq!(steps, 2);
                assert!(is_winning(hand.tiles()));
            }
            other => panic!("expected a win, got {:?}", other),
        }
    }

    #[test]
    fn test_no_discard_is_reported_with_state() {
        let hand = Hand::new(tiles(&[9, 10, 11, 12, 13, 14, 16, 17]));
        let wall = Wall::new(tiles(&[27, 28]));
        let policy = ScriptedPolicy::new(&[16]);
        let outcome = run_episode(hand, wall, &policy, 10).unwrap();
        assert_matches!(
            outcome,
            EpisodeOutcome::Failed {
                reason: EpisodeFailure::NoDiscard,
                steps: 1,
                ..
            }
        );
        if let EpisodeOutcome::Failed { hand, wall, .. } = outcome {
            assert_eq!(hand.len(), 8);
            assert_eq!(wall.tiles(), &[Tile(27)]);
        }
    }

    #[test]
    fn test_discarding_missing_tile_is_an_error() {
        let hand = Hand::new(tiles(&[9, 10, 11, 12, 13, 14, 16, 17]));
        let policy = ScriptedPolicy::new(&[33]);
        let err = run_episode(hand, Wall::new(tiles(&[27])), &policy, 10).unwrap_err();
        assert_matches!(err, MahjongError::TileNotInHand(Tile(33)));
    }

    #[test]
    fn test_exhausted_wall_ends_episode_with_full_hand() {
        // No pair ever forms, so only the wall can end this one.
        let hand = Hand::new(tiles(&[9, 10, 11, 12, 13, 14, 15, 16]));
        let wall = Wall::new(tiles(&[27, 28, 29]));
        let outcome = run_episode(hand, wall, &FirstTilePolicy, 10).unwrap();
        assert_matches!(
            outcome,
            EpisodeOutcome::Failed {
                reason: EpisodeFailure::WallExhausted,
                steps: 3,
                ..
            }
        );
        if let EpisodeOutcome::Failed { hand, wall, .. } = outcome {
            assert_eq!(hand.len(), 8);
            assert!(wall.is_empty());
        }
    }

    #[test]
    fn test_step_cap_stops_before_wall_runs_out() {
        let hand = Hand::new(tiles(&[9, 10, 11, 12, 13, 14, 15, 16]));
        let wall = Wall::new(tiles(&[27, 28, 29, 30]));
        let outcome = run_episode(hand, wall, &FirstTilePolicy, 2).unwrap();
        assert_matches!(
            outcome,
            EpisodeOutcome::Failed {
                reason: EpisodeFailure::StepCapReached,
                steps: 2,
                ..
            }
        );
        assert!(!outcome.is_win());
        assert_eq!(outcome.steps(), 2);
    }
}
