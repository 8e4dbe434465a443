//! Progressive jackpot pool
//!
//! One pool per engine instance. Every read-modify-write goes through a
//! single mutex so concurrent rounds never lose a contribution or pay the
//! same kicker twice.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Jackpot pool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JackpotConfig {
    /// Pool value at engine construction
    pub seed: u64,
    /// The pool never drops below this
    pub floor: u64,
    /// Fraction of each round's total award added to the pool
    pub contribution_rate: f64,
    /// Fraction of the pool paid on a top-rarity triple
    pub kicker_fraction: f64,
}

impl Default for JackpotConfig {
    fn default() -> Self {
        Self {
            seed: 1000,
            floor: 1000,
            contribution_rate: 0.01,
            kicker_fraction: 0.1,
        }
    }
}

impl JackpotConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.seed < self.floor {
            return Err(ConfigError::Invalid(format!(
                "jackpot seed {} below floor {}",
                self.seed, self.floor
            )));
        }
        for (name, rate) in [
            ("contribution rate", self.contribution_rate),
            ("kicker fraction", self.kicker_fraction),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Invalid(format!(
                    "jackpot {name} {rate} outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Stars added to the pool for a round that awarded `stars`
    pub fn contribution_for(&self, stars: u64) -> u64 {
        fraction_of(stars, self.contribution_rate)
    }
}

/// Point-in-time copy of the pool, for callers that persist it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackpotSnapshot {
    pub value: u64,
    pub total_contributed: u64,
    pub total_awarded: u64,
    pub awards: u64,
}

#[derive(Debug, Clone, Copy)]
struct PoolState {
    value: u64,
    total_contributed: u64,
    total_awarded: u64,
    awards: u64,
}

/// Shared progressive jackpot
#[derive(Debug)]
pub struct ProgressiveJackpot {
    config: JackpotConfig,
    state: Mutex<PoolState>,
}

impl ProgressiveJackpot {
    pub fn new(config: JackpotConfig) -> Self {
        let value = config.seed.max(config.floor);
        Self {
            config,
            state: Mutex::new(PoolState {
                value,
                total_contributed: 0,
                total_awarded: 0,
                awards: 0,
            }),
        }
    }

    pub fn config(&self) -> &JackpotConfig {
        &self.config
    }

    /// Current pool value
    pub fn value(&self) -> u64 {
        self.state.lock().value
    }

    /// Add the contribution for a round that awarded `stars`
    ///
    /// Returns the pool value after the update.
    pub fn contribute(&self, stars: u64) -> u64 {
        let contribution = self.config.contribution_for(stars);
        let mut state = self.state.lock();
        state.value = state.value.saturating_add(contribution);
        state.total_contributed = state.total_contributed.saturating_add(contribution);
        state.value
    }

    /// Pay the kicker and shrink the pool by the same amount
    ///
    /// Returns `(kicker, pool_after)`. The pool is clamped to the floor.
    pub fn award_kicker(&self) -> (u64, u64) {
        let mut state = self.state.lock();
        let kicker = fraction_of(state.value, self.config.kicker_fraction);
        state.value = state.value.saturating_sub(kicker).max(self.config.floor);
        state.total_awarded = state.total_awarded.saturating_add(kicker);
        state.awards += 1;
        log::info!("Jackpot kicker paid: {} stars, pool now {}", kicker, state.value);
        (kicker, state.value)
    }

    pub fn snapshot(&self) -> JackpotSnapshot {
        let state = self.state.lock();
        JackpotSnapshot {
            value: state.value,
            total_contributed: state.total_contributed,
            total_awarded: state.total_awarded,
            awards: state.awards,
        }
    }

    /// Restore a persisted pool; values below the floor are raised to it
    pub fn restore(&self, snapshot: &JackpotSnapshot) {
        let mut state = self.state.lock();
        state.value = snapshot.value.max(self.config.floor);
        state.total_contributed = snapshot.total_contributed;
        state.total_awarded = snapshot.total_awarded;
        state.awards = snapshot.awards;
    }
}

impl Default for ProgressiveJackpot {
    fn default() -> Self {
        Self::new(JackpotConfig::default())
    }
}

/// `floor(amount * fraction)` for a fraction in [0, 1]
fn fraction_of(amount: u64, fraction: f64) -> u64 {
    let scaled = amount as f64 * fraction.clamp(0.0, 1.0);
    (scaled.floor() as u64).min(amount)
}
