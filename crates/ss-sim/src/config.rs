//! Simulation run parameters

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of simulated players
    pub players: usize,
    /// Rounds played by each player
    pub rounds_per_player: u64,
    /// Run seed; each player derives its own stream from it
    pub seed: u64,
    /// Fixed win probability for every round (None = shaped per player)
    pub win_probability: Option<f64>,
    /// Balance every player starts with
    pub starting_balance: i64,
    /// Stars charged per spin
    pub spin_cost: i64,
    /// Daily streak every player holds during the run
    pub daily_streak: u32,
    /// Worker threads (0 = one per CPU)
    pub threads: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            players: 100,
            rounds_per_player: 1_000,
            seed: 42,
            win_probability: None,
            starting_balance: 0,
            spin_cost: 1,
            daily_streak: 0,
            threads: 0,
        }
    }
}

impl SimConfig {
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    pub fn with_rounds(mut self, rounds_per_player: u64) -> Self {
        self.rounds_per_player = rounds_per_player;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_win_probability(mut self, p: Option<f64>) -> Self {
        self.win_probability = p;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Threads the run will actually use
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.threads
        }
    }

    /// Total rounds in the run
    pub fn total_rounds(&self) -> SimResult<u64> {
        (self.players as u64)
            .checked_mul(self.rounds_per_player)
            .ok_or_else(|| SimError::InvalidConfig("players × rounds overflows".into()))
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.players == 0 {
            return Err(SimError::InvalidConfig("need at least one player".into()));
        }
        if self.rounds_per_player == 0 {
            return Err(SimError::InvalidConfig("need at least one round per player".into()));
        }
        if let Some(p) = self.win_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidConfig(format!(
                    "win probability {p} outside [0, 1]"
                )));
            }
        }
        if self.spin_cost < 0 {
            return Err(SimError::InvalidConfig("spin cost must not be negative".into()));
        }
        self.total_rounds()?;
        Ok(())
    }
}
