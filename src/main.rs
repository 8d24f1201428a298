// main.rs - demo host loop driving the anytime MCTS planner
use anytime_mcts::logging::setup_logging;
use anytime_mcts::mcts::PlannerHyperparameters;
use anytime_mcts::recording::EpisodeRecorder;
use clap::Parser;
use std::path::PathBuf;

mod demo;

#[derive(Parser, Debug)]
#[command(name = "anytime_mcts")]
struct Config {
    /// Total iteration budget per planning episode
    #[arg(short = 'i', long, default_value_t = 100)]
    max_iterations: usize,

    /// Iterations processed per simulated frame
    #[arg(short = 'f', long, default_value_t = 10)]
    iterations_per_frame: usize,

    /// UCT exploration constant
    #[arg(short = 'c', long, default_value_t = 1.4)]
    exploration_constant: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of demo agent walks to run
    #[arg(short = 'e', long, default_value_t = 5)]
    episodes: usize,

    /// Corridor goal distance from the start position
    #[arg(long, default_value_t = 4)]
    goal: i32,

    /// Step budget for each walk
    #[arg(long, default_value_t = 12)]
    walk_steps: u32,

    /// JSON file with planner hyperparameters, overriding the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for CSV episode recordings
    #[arg(long)]
    record_dir: Option<PathBuf>,
}

fn load_hyperparameters(config: &Config) -> Result<PlannerHyperparameters, Box<dyn std::error::Error>> {
    let hyperparams: PlannerHyperparameters = match &config.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        }
        None => PlannerHyperparameters {
            max_iterations: config.max_iterations,
            max_iterations_per_frame: config.iterations_per_frame,
            exploration_constant: config.exploration_constant,
            seed: config.seed,
        },
    };

    if let Err(message) = hyperparams.validate() {
        return Err(message.into());
    }
    Ok(hyperparams)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let _logger = setup_logging("info")?;

    let hyperparams = load_hyperparameters(&config)?;
    log::info!("planner config: {}", hyperparams.to_config_string());

    let mut recorder = match &config.record_dir {
        Some(dir) => EpisodeRecorder::new(dir)?,
        None => EpisodeRecorder::disabled(),
    };

    let mut total_score = 0.0;
    for walk in 0..config.episodes {
        let score = demo::run_walk(&hyperparams, config.goal, config.walk_steps, &mut recorder)?;
        log::info!("walk {} finished with score {:.1}", walk, score);
        total_score += score;
    }

    log::info!(
        "average score over {} walks: {:.1}",
        config.episodes,
        total_score / config.episodes.max(1) as f64
    );
    Ok(())
}
