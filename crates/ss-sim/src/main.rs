//! StarSpin command line
//!
//! Usage:
//!   starspin spin [--streak N] ...   - Play one round and print the chat message
//!   starspin info                    - Winning combinations
//!   starspin stats                   - Game stats as JSON
//!   starspin simulate [--players N]  - Batch simulation report

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ss_engine::{EngineConfig, PlayerStats, SpinEngine, format_outcome};
use ss_sim::{SimConfig, Simulator};

#[derive(Parser)]
#[command(name = "starspin", about = "StarSpin slot engine tools")]
struct Cli {
    /// Engine config file (.yaml, .yml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one round
    Spin(SpinArgs),
    /// Show winning combinations
    Info,
    /// Print game stats as JSON
    Stats,
    /// Run a batch simulation
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct SpinArgs {
    /// Spins played before this one
    #[arg(long, default_value_t = 0)]
    total_spins: u64,
    /// Current star balance
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    balance: i64,
    /// Daily streak in days
    #[arg(long, default_value_t = 0)]
    streak: u32,
    /// Wins in the recent window
    #[arg(long, default_value_t = 0)]
    recent_wins: u32,
    /// Games in the recent window
    #[arg(long, default_value_t = 0)]
    recent_games: u32,
    /// Force the win probability
    #[arg(long)]
    win_rate: Option<f64>,
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long, default_value_t = 100)]
    players: usize,
    /// Rounds per player
    #[arg(long, default_value_t = 1_000)]
    rounds: u64,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Force the win probability for every round
    #[arg(long)]
    win_rate: Option<f64>,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    starting_balance: i64,
    /// Daily streak held by every player
    #[arg(long, default_value_t = 0)]
    streak: u32,
    /// Worker threads (0 = one per CPU)
    #[arg(long, default_value_t = 0)]
    threads: usize,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let engine = build_engine(cli.config.as_deref())?;

    match cli.command {
        Commands::Spin(args) => spin(&engine, &args),
        Commands::Info => {
            print!("{}", engine.get_combination_info());
            Ok(())
        }
        Commands::Stats => {
            let json = serde_json::to_string_pretty(&engine.get_game_stats())
                .context("Failed to serialize game stats")?;
            println!("{json}");
            Ok(())
        }
        Commands::Simulate(args) => simulate(engine, &args),
    }
}

fn build_engine(path: Option<&std::path::Path>) -> Result<SpinEngine> {
    let config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    SpinEngine::new(config).context("Invalid engine config")
}

fn spin(engine: &SpinEngine, args: &SpinArgs) -> Result<()> {
    let stats = PlayerStats {
        total_spins: args.total_spins,
        recent_wins: args.recent_wins,
        recent_games: args.recent_games,
        balance: args.balance,
        daily_streak: args.streak,
    };
    let outcome = engine.play_round(args.win_rate, &stats);
    print!("{}", format_outcome(&outcome, &engine.config().lucky));
    Ok(())
}

fn simulate(engine: SpinEngine, args: &SimulateArgs) -> Result<()> {
    let config = SimConfig {
        players: args.players,
        rounds_per_player: args.rounds,
        seed: args.seed,
        win_probability: args.win_rate,
        starting_balance: args.starting_balance,
        daily_streak: args.streak,
        threads: args.threads,
        ..SimConfig::default()
    };
    let simulator = Simulator::new(Arc::new(engine), config).context("Invalid simulation config")?;
    let report = simulator.run().context("Simulation failed")?;

    if args.json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        println!("{report}");
    }
    Ok(())
}
