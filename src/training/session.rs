use rand::rngs::StdRng;

use crate::config::TrainingConfig;
use crate::game::episode::{run_episode, EpisodeOutcome};
use crate::game::hand::Hand;
use crate::game::is_winning::is_winning;
use crate::game::tile::format_tiles;
use crate::policy::discard_policy::DiscardPolicy;
use crate::scoring::scoring::calc_score;
use crate::Result;

/// Per-win figures of one evaluation sweep, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationResults {
    pub steps: Vec<usize>,
    pub base_scores: Vec<i32>,
    pub total_scores: Vec<i32>,
    /// Episodes dropped because the policy gave up, the wall ran out, or the step cap hit
    pub failures: usize,
}

impl EvaluationResults {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Loads the policy snapshot if present, trains, saves the snapshot, then
/// evaluates the greedy policy over `config.eval_trials` shuffled walls.
///
/// Failed evaluation episodes are logged and left out of the results.
pub fn train_and_evaluate<P: DiscardPolicy + ?Sized>(
    config: &TrainingConfig,
    policy: &mut P,
    rng: &mut StdRng,
) -> Result<EvaluationResults> {
    let hand = Hand::new(config.initial_hand.clone());
    let wall = config.initial_wall()?;

    if let Some(path) = &config.policy_snapshot {
        if path.exists() {
            policy.load(path)?;
            log::info!("Loaded Q-table from {}", path.display());
        } else {
            log::info!("No existing Q-table found at {}, training from scratch", path.display());
        }
    }

    log::info!("Training for {} episodes", config.episodes);
    policy.train(&hand, &wall, config.episodes, &is_winning)?;

    if let Some(path) = &config.policy_snapshot {
        policy.save(path)?;
        log::info!("Saved Q-table to {}", path.display());
    }

    policy.set_exploration(0.0);

    let mut results = EvaluationResults::default();
    for trial in 0..config.eval_trials {
        let mut trial_wall = wall.clone();
        trial_wall.shuffle(rng);
        match run_episode(hand.clone(), trial_wall, &*policy, config.max_steps)? {
            EpisodeOutcome::Won { steps, hand } => {
                let score = calc_score(hand.tiles(), steps);
                results.steps.push(steps);
                results.base_scores.push(score.base);
                results.total_scores.push(score.total);
            }
            EpisodeOutcome::Failed {
                reason,
                steps,
                hand,
                wall,
            } => {
                results.failures += 1;
                log::debug!(
                    "Evaluation {} stopped ({:?}): hand=[{}], wall=[{}], steps={}",
                    trial + 1,
                    reason,
                    format_tiles(hand.tiles()),
                    format_tiles(wall.tiles()),
                    steps
                );
            }
        }
    }

    if results.failures > 0 {
        log::warn!(
            "{} of {} evaluation episodes ended without a win",
            results.failures,
            config.eval_trials
        );
    }
    Ok(results)
}
