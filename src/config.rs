//! Run configuration.
//!
//! Defaults reproduce the reference experiment: the hand holds Character
//! ranks 1-8 (codes 9-16) and the wall is the standard two-copy set minus
//! that hand.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::game::tile::Tile;
use crate::game::wall::{Wall, WallComposition};
use crate::policy::state_encoding::StateEncoding;
use crate::{MahjongError, Result};

pub const DEFAULT_INITIAL_HAND: [u8; 8] = [9, 10, 11, 12, 13, 14, 15, 16];
pub const INITIAL_HAND_LEN: usize = 8;

/// Q-learning hyper-parameters and reward shaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Exploration rate during training
    pub epsilon: f64,
    pub state_encoding: StateEncoding,
    pub win_reward: f64,
    /// Added on every non-terminal step
    pub step_penalty: f64,
    /// Given when the wall runs dry or the step cap hits without a win
    pub exhaustion_penalty: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.2,
            state_encoding: StateEncoding::Features,
            win_reward: 10.0,
            step_penalty: -0.1,
            exhaustion_penalty: -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Training episodes per invocation
    pub episodes: usize,
    /// Greedy evaluation runs after training
    pub eval_trials: usize,
    pub initial_hand: Vec<Tile>,
    pub wall_composition: WallComposition,
    /// Hard bound on discards per episode
    pub max_steps: usize,
    /// Seed for training and evaluation; drawn at random when absent
    pub seed: Option<u64>,
    /// Q-table snapshot, loaded before and written after training
    pub policy_snapshot: Option<PathBuf>,
    pub results_log: PathBuf,
    pub agent: AgentConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1_000_000,
            eval_trials: 5000,
            initial_hand: DEFAULT_INITIAL_HAND.iter().map(|&c| Tile(c)).collect(),
            wall_composition: WallComposition::standard(),
            max_steps: 100,
            seed: None,
            policy_snapshot: Some(PathBuf::from("results/q_table_single_hand.json")),
            results_log: PathBuf::from("results/q_learning_single_hand_results.csv"),
            agent: AgentConfig::default(),
        }
    }
}

impl TrainingConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Wall built from the composition with the initial hand taken out.
    pub fn initial_wall(&self) -> Result<Wall> {
        Wall::build(&self.wall_composition, &self.initial_hand)
    }

    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(invalid("episodes must be greater than 0"));
        }
        if self.eval_trials == 0 {
            return Err(invalid("eval_trials must be greater than 0"));
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be greater than 0"));
        }
        if self.initial_hand.len() != INITIAL_HAND_LEN {
            return Err(invalid(&format!(
                "initial hand must hold {} tiles (received {})",
                INITIAL_HAND_LEN,
                self.initial_hand.len()
            )));
        }
        if let Some(tile) = self.initial_hand.iter().find(|t| !t.is_valid()) {
            return Err(MahjongError::InvalidTile(tile.code()));
        }
        for (name, value) in [
            ("alpha", self.agent.alpha),
            ("gamma", self.agent.gamma),
            ("epsilon", self.agent.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(&format!("{} must lie in [0, 1] (received {})", name, value)));
            }
        }
        self.initial_wall()?;
        Ok(())
    }
}

fn invalid(message: &str) -> MahjongError {
    MahjongError::InvalidConfig(message.to_string())
}
