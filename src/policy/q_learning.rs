//! Tabular Q-learning over discards.
//!
//! A state is the encoded hand before the discard, an action is the tile code
//! thrown away. Unvisited pairs are valued at 0.

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::{AgentConfig, TrainingConfig};
use crate::game::hand::Hand;
use crate::game::tile::Tile;
use crate::game::wall::Wall;
use crate::policy::discard_policy::{DiscardPolicy, TableSummary, TerminalPredicate};
use crate::policy::state_encoding::{StateEncoding, StateKey};
use crate::{MahjongError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub state: StateKey,
    pub action: Tile,
    pub q: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct QTableSnapshot {
    state_encoding: StateEncoding,
    entries: Vec<QEntry>,
}

pub struct QLearningAgent {
    config: AgentConfig,
    epsilon: f64,
    max_steps: usize,
    q_table: HashMap<(StateKey, Tile), f64>,
    rng: StdRng,
}

impl QLearningAgent {
    pub fn new(config: AgentConfig, max_steps: usize, seed: u64) -> Self {
        Self {
            epsilon: config.epsilon,
            config,
            max_steps,
            q_table: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &TrainingConfig, seed: u64) -> Self {
        Self::new(config.agent.clone(), config.max_steps, seed)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn len(&self) -> usize {
        self.q_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_table.is_empty()
    }

    pub fn q_value(&self, hand: &[Tile], action: Tile) -> f64 {
        let state = self.config.state_encoding.encode(hand);
        self.lookup(&state, action)
    }

    /// All entries sorted by state, then action.
    pub fn entries(&self) -> Vec<QEntry> {
        let mut entries: Vec<QEntry> = self
            .q_table
            .iter()
            .map(|((state, action), &q)| QEntry {
                state: state.clone(),
                action: *action,
                q,
            })
            .collect();
        entries.sort_by(|a, b| a.state.cmp(&b.state).then(a.action.cmp(&b.action)));
        entries
    }

    /// The `n` lowest and the `n` highest valued entries, each ascending by value.
    pub fn extreme_entries(&self, n: usize) -> (Vec<QEntry>, Vec<QEntry>) {
        let mut entries = self.entries();
        entries.sort_by(|a, b| a.q.total_cmp(&b.q));
        let lowest = entries.iter().take(n).cloned().collect();
        let highest = entries[entries.len().saturating_sub(n)..].to_vec();
        (lowest, highest)
    }

    fn lookup(&self, state: &StateKey, action: Tile) -> f64 {
        // HashMap<(K, Tile), _> cannot be queried with borrowed parts
        self.q_table
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(0.0)
    }

    fn greedy_for(&self, state: &StateKey, candidates: &[Tile]) -> Option<Tile> {
        let mut best: Option<(Tile, f64)> = None;
        for &tile in candidates {
            let q = self.lookup(state, tile);
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((tile, q)),
            }
        }
        best.map(|(tile, _)| tile)
    }

    fn best_value(&self, hand: &Hand) -> f64 {
        let state = self.config.state_encoding.encode(hand.tiles());
        hand.distinct_tiles()
            .into_iter()
            .map(|tile| self.lookup(&state, tile))
            .fold(None, |acc: Option<f64>, q| Some(acc.map_or(q, |a| a.max(q))))
            .unwrap_or(0.0)
    }

    fn choose_action(&mut self, state: &StateKey, hand: &Hand) -> Option<Tile> {
        let candidates = hand.distinct_tiles();
        if self.rng.random::<f64>() < self.epsilon {
            candidates.choose(&mut self.rng).copied()
        } else {
            self.greedy_for(state, &candidates)
        }
    }

    fn update(&mut self, state: StateKey, action: Tile, target: f64) {
        let alpha = self.config.alpha;
        let q = self.q_table.entry((state, action)).or_insert(0.0);
        *q += alpha * (target - *q);
    }

    /// One learning episode. Returns whether it ended in a win.
    fn run_training_episode(
        &mut self,
        hand: &Hand,
        wall: &Wall,
        is_terminal: &TerminalPredicate,
    ) -> Result<bool> {
        let mut hand = hand.clone();
        let mut wall = wall.clone();
        wall.shuffle(&mut self.rng);

        let mut steps = 0;
        while !is_terminal(hand.tiles()) {
            let state = self.config.state_encoding.encode(hand.tiles());
            let Some(action) = self.choose_action(&state, &hand) else {
                return Ok(false);
            };
            hand.discard(action)?;
            if let Some(tile) = wall.draw() {
                hand.draw(tile);
            }
            steps += 1;

            let won = is_terminal(hand.tiles());
            let exhausted = !won && (wall.is_empty() || steps >= self.max_steps);
            let target = if won {
                self.config.win_reward
            } else if exhausted {
                self.config.exhaustion_penalty
            } else {
                self.config.step_penalty + self.config.gamma * self.best_value(&hand)
            };
            self.update(state, action, target);

            if exhausted {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl DiscardPolicy for QLearningAgent {
    fn train(
        &mut self,
        hand: &Hand,
        wall: &Wall,
        n_episodes: usize,
        is_terminal: &TerminalPredicate,
    ) -> Result<()> {
        let report_every = (n_episodes / 10).max(1);
        let mut wins = 0usize;
        for episode in 0..n_episodes {
            if self.run_training_episode(hand, wall, is_terminal)? {
                wins += 1;
            }
            if (episode + 1) % report_every == 0 {
                log::info!(
                    "Training {}/{} episodes, win rate {:.2}%, {} Q entries",
                    episode + 1,
                    n_episodes,
                    100.0 * wins as f64 / (episode + 1) as f64,
                    self.q_table.len()
                );
            }
        }
        Ok(())
    }

    fn act_greedy(&self, hand: &Hand) -> Option<Tile> {
        let state = self.config.state_encoding.encode(hand.tiles());
        self.greedy_for(&state, &hand.distinct_tiles())
    }

    /// Replaces the table with the snapshot at `path`.
    fn load(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        let snapshot: QTableSnapshot = serde_json::from_reader(BufReader::new(file))?;
        if snapshot.state_encoding != self.config.state_encoding {
            return Err(MahjongError::Policy(format!(
                "snapshot {} uses {:?} states, agent expects {:?}",
                path.display(),
                snapshot.state_encoding,
                self.config.state_encoding
            )));
        }
        self.q_table = snapshot
            .entries
            .into_iter()
            .map(|e| ((e.state, e.action), e.q))
            .collect();
        Ok(())
    }

    /// Writes to a sibling temp file first, then renames it over `path`.
    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let snapshot = QTableSnapshot {
            state_encoding: self.config.state_encoding,
            entries: self.entries(),
        };
        let tmp_path = path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer(&mut writer, &snapshot)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    fn set_exploration(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    fn table_summary(&self) -> TableSummary {
        TableSummary::from_values(self.q_table.values().copied())
    }
}
