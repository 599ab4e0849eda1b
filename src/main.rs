use chrono::Local;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;

use mahjong_solitaire_rl::config::TrainingConfig;
use mahjong_solitaire_rl::game::tile::format_tiles;
use mahjong_solitaire_rl::logging::setup_logging;
use mahjong_solitaire_rl::policy::{DiscardPolicy, QLearningAgent, StateEncoding};
use mahjong_solitaire_rl::recording::{export_q_table_csv, ResultRow, ResultsWriter, TIMESTAMP_FORMAT};
use mahjong_solitaire_rl::training::{format_report, train_and_evaluate, EvaluationSummary, RunReport};

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
enum StateEncodingCli {
    Features,
    Exact,
}

impl From<StateEncodingCli> for StateEncoding {
    fn from(cli: StateEncodingCli) -> Self {
        match cli {
            StateEncodingCli::Features => StateEncoding::Features,
            StateEncodingCli::Exact => StateEncoding::Exact,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "mahjong_solitaire_rl",
    about = "Train and evaluate a Q-learning agent on a fixed single-player Mahjong hand"
)]
struct Args {
    /// JSON file holding a full or partial run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(short, long)]
    episodes: Option<usize>,

    /// Number of greedy evaluation runs
    #[arg(short = 'n', long)]
    eval_runs: Option<usize>,

    /// Maximum discards per episode
    #[arg(long)]
    max_steps: Option<usize>,

    /// RNG seed for reproducible results
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    alpha: Option<f64>,

    #[arg(long)]
    gamma: Option<f64>,

    /// Exploration rate during training
    #[arg(long)]
    epsilon: Option<f64>,

    #[arg(long, value_enum)]
    state_encoding: Option<StateEncodingCli>,

    /// Q-table snapshot path
    #[arg(long)]
    q_table: Option<PathBuf>,

    /// Train from scratch and do not persist the Q-table
    #[arg(long, default_value_t = false)]
    no_snapshot: bool,

    /// CSV path to append results
    #[arg(long)]
    results_log: Option<PathBuf>,

    /// Also dump the Q-table to this CSV file
    #[arg(long)]
    export_q_table: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for rotating log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<TrainingConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_json_file(path)?,
            None => TrainingConfig::default(),
        };
        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(eval_runs) = self.eval_runs {
            config.eval_trials = eval_runs;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(alpha) = self.alpha {
            config.agent.alpha = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.agent.gamma = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            config.agent.epsilon = epsilon;
        }
        if let Some(encoding) = self.state_encoding {
            config.agent.state_encoding = encoding.into();
        }
        if let Some(path) = self.q_table {
            config.policy_snapshot = Some(path);
        }
        if self.no_snapshot {
            config.policy_snapshot = None;
        }
        if let Some(path) = self.results_log {
            config.results_log = path;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = setup_logging(&args.log_level, args.log_dir.as_deref())?;
    let export_path = args.export_q_table.clone();
    let config = args.into_config()?;

    let wall_size = config.initial_wall()?.len();
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Initial hand: [{}]", format_tiles(&config.initial_hand));
    log::info!("Wall tiles: {} tiles", wall_size);
    log::info!(
        "Episodes: {}, Evaluation runs: {}, Seed: {}",
        config.episodes,
        config.eval_trials,
        seed
    );

    let mut agent = QLearningAgent::from_config(&config, seed);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let results = train_and_evaluate(&config, &mut agent, &mut rng)?;

    let Some(summary) = EvaluationSummary::from_results(&results) else {
        println!("\nNo successful wins in evaluation!");
        return Ok(());
    };

    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let table = agent.table_summary();
    let row = ResultRow {
        timestamp: timestamp.clone(),
        episodes: config.episodes,
        eval_trials: config.eval_trials,
        initial_hand: config.initial_hand.clone(),
        wall_size,
        summary: summary.clone(),
        table,
    };
    let writer = ResultsWriter::new(&config.results_log);
    writer.append(&row)?;
    log::info!("Results appended to: {}", writer.path().display());

    let (lowest, highest) = agent.extreme_entries(5);
    println!(
        "\n{}\n",
        format_report(&RunReport {
            timestamp: &timestamp,
            hand: &config.initial_hand,
            wall_size,
            episodes: config.episodes,
            eval_trials: config.eval_trials,
            summary: &summary,
            table,
            lowest: &lowest,
            highest: &highest,
        })
    );

    if let Some(path) = export_path {
        export_q_table_csv(&agent.entries(), path)?;
    }

    Ok(())
}
