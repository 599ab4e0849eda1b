//! # Single-hand Mahjong Solitaire Q-learning
//!
//! Trains a tabular Q-learning agent on one fixed starting hand of a reduced
//! Mahjong solitaire, evaluates the greedy policy over shuffled walls and
//! records the statistics.
//!
//! ## Features
//!
//! - **Game Rules**: tile codes, hand/wall handling and the winning-shape check
//! - **Policy**: a `DiscardPolicy` trait and its tabular Q-learning implementation
//! - **Scoring**: pattern and speed based scoring of finished hands
//! - **Training**: episode runner, train/evaluate orchestration and statistics
//! - **Recording**: result log with header repair and Q-table export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mahjong_solitaire_rl::{config::TrainingConfig, policy::QLearningAgent, training::train_and_evaluate};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = TrainingConfig::default();
//! let mut agent = QLearningAgent::from_config(&config, 42);
//! let mut rng = StdRng::seed_from_u64(43);
//! let results = train_and_evaluate(&config, &mut agent, &mut rng).unwrap();
//! println!("{} wins", results.steps.len());
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Run configuration
pub mod config;

/// Tiles, hands, walls and the winning-shape oracle
pub mod game;

/// Logger installation
pub mod logging;

/// Discard policies
pub mod policy;

/// Result log and Q-table export
pub mod recording;

/// Hand scoring
pub mod scoring;

/// Training, evaluation and summary statistics
pub mod training;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::is_winning::is_winning;
pub use game::tile::Tile;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the library
#[derive(Debug, thiserror::Error)]
pub enum MahjongError {
    #[error("Invalid tile code: {0}")]
    InvalidTile(u8),

    #[error("Tile {0} is not in the hand")]
    TileNotInHand(Tile),

    #[error("Tile {0} is not available in the wall")]
    TileNotInWall(Tile),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Policy error: {0}")]
    Policy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MahjongError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
