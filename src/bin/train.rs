//! Headless self-play training driver.
//!
//! Trains a pooled pair of agents for N episodes and writes both value
//! tables as CSV. Ctrl-C stops cleanly between turns and still saves.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use royal_chess::{
    load_table, save_table, AgentConfig, Player, QLearningAgent, SelfPlayConfig, SelfPlayRunner,
};

/// Train Royal Chess agents via self-play.
#[derive(Parser)]
#[command(name = "train", about = "Train Royal Chess agents via self-play")]
struct Cli {
    /// Number of self-play episodes
    #[arg(long, default_value_t = 1000)]
    episodes: usize,

    /// Master seed for reproducible runs
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory for the persisted value tables
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// Resume from tables already in the output directory
    #[arg(long)]
    resume: bool,

    /// Exploration rate override
    #[arg(long)]
    epsilon: Option<f64>,

    /// Learning rate override
    #[arg(long)]
    alpha: Option<f64>,

    /// Discount factor override
    #[arg(long)]
    gamma: Option<f64>,
}

fn table_path(dir: &Path, player: Player) -> PathBuf {
    dir.join(format!("agent_{}.csv", player.to_string().to_lowercase()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut agent_config = AgentConfig::default();
    if let Some(epsilon) = cli.epsilon {
        agent_config = agent_config.with_epsilon(epsilon);
    }
    if let Some(alpha) = cli.alpha {
        agent_config = agent_config.with_alpha(alpha);
    }
    if let Some(gamma) = cli.gamma {
        agent_config = agent_config.with_gamma(gamma);
    }

    let config = SelfPlayConfig::new()
        .with_episodes(cli.episodes)
        .with_seed(cli.seed)
        .with_agent(agent_config);

    let mut runner = if cli.resume {
        let agents = Player::both().map(|player| {
            let path = table_path(&cli.out_dir, player);
            let mut agent = QLearningAgent::new(agent_config);
            match load_table(&path) {
                Ok(table) => {
                    println!("loaded {} states for {player} from {}", table.len(), path.display());
                    agent.set_table(table);
                }
                Err(err) => eprintln!("warning: could not load {}: {err}", path.display()),
            }
            agent
        });
        SelfPlayRunner::with_agents(config, agents)
    } else {
        SelfPlayRunner::new(config)
    };

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("failed to install Ctrl-C handler")?;
    }

    let summary = runner.run(&stop)?;
    if stop.load(Ordering::Relaxed) {
        println!("interrupted; saving progress");
    }
    println!("{summary}");

    let agents = runner.into_agents();
    for player in Player::both() {
        let path = table_path(&cli.out_dir, player);
        let table = agents[player.index()].table();
        save_table(table, &path)
            .with_context(|| format!("failed to save table for {player}"))?;
        println!("saved {} states to {}", table.len(), path.display());
    }

    Ok(())
}
