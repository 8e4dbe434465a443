//! # ss-sim: Batch player simulator for the StarSpin spin engine
//!
//! Plays many simulated players in parallel against one shared
//! [`SpinEngine`]. Each player owns a `ChaCha8Rng` on its own stream of the
//! run seed, so a run is reproducible except for the order in which players
//! touch the shared jackpot.

pub mod config;
pub mod error;
pub mod player;
pub mod report;

pub use config::*;
pub use error::*;
pub use player::*;
pub use report::*;

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use ss_engine::SpinEngine;

/// Result of one player's run
#[derive(Debug, Clone)]
pub struct PlayerRun {
    pub stats: SessionStats,
    pub final_balance: i64,
}

/// Runs a [`SimConfig`] against a shared engine
pub struct Simulator {
    engine: Arc<SpinEngine>,
    config: SimConfig,
}

impl Simulator {
    pub fn new(engine: Arc<SpinEngine>, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn engine(&self) -> &SpinEngine {
        &self.engine
    }

    /// Play every player to completion and aggregate
    pub fn run(&self) -> SimResult<SimReport> {
        let threads = self.config.effective_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| SimError::ThreadPool(e.to_string()))?;

        log::info!(
            "Simulating {} players × {} rounds on {} threads (seed {})",
            self.config.players,
            self.config.rounds_per_player,
            threads,
            self.config.seed
        );

        let started = Instant::now();
        let runs: Vec<PlayerRun> = pool.install(|| {
            (0..self.config.players)
                .into_par_iter()
                .map(|index| self.run_player(index))
                .collect()
        });
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let mut stats = SessionStats::default();
        let mut balances = Vec::with_capacity(runs.len());
        for run in &runs {
            stats.merge(&run.stats);
            balances.push(run.final_balance);
        }

        if stats.errors > 0 {
            log::warn!("{} rounds fell back to the safe default", stats.errors);
        }
        log::info!(
            "Simulation done in {} ms: hit rate {:.2}%, rtp {:.2}%",
            duration_ms,
            stats.hit_rate(),
            stats.rtp()
        );

        Ok(SimReport {
            config: self.config.clone(),
            stats,
            balances: BalanceSummary::from_balances(&balances),
            jackpot: self.engine.jackpot_snapshot(),
            threads,
            duration_ms,
        })
    }

    /// Play all rounds of one player
    pub fn run_player(&self, index: usize) -> PlayerRun {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        rng.set_stream(index as u64);

        let window = self.engine.config().reels.recent_window;
        let mut player = SimPlayer::new(self.config.starting_balance, self.config.daily_streak, window);
        let cost = u64::try_from(self.config.spin_cost).unwrap_or(0);
        let mut stats = SessionStats::default();

        for _ in 0..self.config.rounds_per_player {
            let outcome = self
                .engine
                .play_round_with_rng(&mut rng, self.config.win_probability, &player.stats());
            stats.record(&outcome, cost);
            player.record(&outcome, self.config.spin_cost);
        }

        log::debug!(
            "Player {} finished: {} rounds, balance {}",
            index,
            player.total_spins(),
            player.balance()
        );
        PlayerRun {
            stats,
            final_balance: player.balance(),
        }
    }
}
