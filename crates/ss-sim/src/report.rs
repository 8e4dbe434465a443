//! Aggregated simulation results

use std::fmt;

use serde::{Deserialize, Serialize};
use ss_engine::{JackpotSnapshot, RoundOutcome, WinTier};

use crate::config::SimConfig;

/// Round counters, mergeable across players
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds: u64,
    pub wins: u64,
    pub losses: u64,
    /// Stars charged for spins
    pub total_cost: u64,
    /// Stars paid out, bonuses included
    pub total_stars: u64,
    pub base_stars: u64,
    pub streak_stars: u64,
    pub lucky_stars: u64,
    pub kicker_stars: u64,
    pub jackpots: u64,
    pub big_wins: u64,
    pub tier_wins: u64,
    pub small_wins: u64,
    pub partial_wins: u64,
    pub lucky_spins: u64,
    /// Rounds that fell back to the safe default
    pub errors: u64,
    pub max_win: u64,
}

impl SessionStats {
    pub fn record(&mut self, outcome: &RoundOutcome, spin_cost: u64) {
        self.rounds += 1;
        if outcome.is_winner {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.total_cost = self.total_cost.saturating_add(spin_cost);
        self.total_stars = self.total_stars.saturating_add(outcome.stars_won);
        self.base_stars = self.base_stars.saturating_add(outcome.base_payout);
        self.streak_stars = self.streak_stars.saturating_add(outcome.streak_bonus());
        self.lucky_stars = self.lucky_stars.saturating_add(outcome.lucky_bonus());

        if let Some(kicker) = outcome.info.jackpot_kicker {
            self.kicker_stars = self.kicker_stars.saturating_add(kicker);
        }
        match outcome.info.win_tier {
            Some(WinTier::Jackpot) => self.jackpots += 1,
            Some(WinTier::BigWin) => self.big_wins += 1,
            Some(WinTier::Win) => self.tier_wins += 1,
            Some(WinTier::SmallWin) => self.small_wins += 1,
            None if outcome.info.partial_label.is_some() => self.partial_wins += 1,
            None => {}
        }
        if outcome.info.lucky_bonus.is_some() {
            self.lucky_spins += 1;
        }
        if outcome.is_error() {
            self.errors += 1;
        }
        self.max_win = self.max_win.max(outcome.stars_won);
    }

    pub fn merge(&mut self, other: &SessionStats) {
        self.rounds += other.rounds;
        self.wins += other.wins;
        self.losses += other.losses;
        self.total_cost = self.total_cost.saturating_add(other.total_cost);
        self.total_stars = self.total_stars.saturating_add(other.total_stars);
        self.base_stars = self.base_stars.saturating_add(other.base_stars);
        self.streak_stars = self.streak_stars.saturating_add(other.streak_stars);
        self.lucky_stars = self.lucky_stars.saturating_add(other.lucky_stars);
        self.kicker_stars = self.kicker_stars.saturating_add(other.kicker_stars);
        self.jackpots += other.jackpots;
        self.big_wins += other.big_wins;
        self.tier_wins += other.tier_wins;
        self.small_wins += other.small_wins;
        self.partial_wins += other.partial_wins;
        self.lucky_spins += other.lucky_spins;
        self.errors += other.errors;
        self.max_win = self.max_win.max(other.max_win);
    }

    /// Winning rounds, in percent
    pub fn hit_rate(&self) -> f64 {
        if self.rounds > 0 {
            (self.wins as f64 / self.rounds as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Stars paid per star charged, in percent
    pub fn rtp(&self) -> f64 {
        if self.total_cost > 0 {
            (self.total_stars as f64 / self.total_cost as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn stars_per_spin(&self) -> f64 {
        if self.rounds > 0 {
            self.total_stars as f64 / self.rounds as f64
        } else {
            0.0
        }
    }
}

/// Final balances across players
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
}

impl BalanceSummary {
    pub fn from_balances(balances: &[i64]) -> Self {
        if balances.is_empty() {
            return Self::default();
        }
        let sum: i128 = balances.iter().map(|&b| i128::from(b)).sum();
        Self {
            min: balances.iter().copied().min().unwrap_or(0),
            max: balances.iter().copied().max().unwrap_or(0),
            mean: sum as f64 / balances.len() as f64,
        }
    }
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub config: SimConfig,
    pub stats: SessionStats,
    pub balances: BalanceSummary,
    pub jackpot: JackpotSnapshot,
    pub threads: usize,
    pub duration_ms: u64,
}

impl SimReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "🎰 StarSpin simulation")?;
        writeln!(
            f,
            "  players {} × rounds {} = {} rounds on {} threads in {} ms",
            self.config.players, self.config.rounds_per_player, s.rounds, self.threads, self.duration_ms
        )?;
        writeln!(f, "  hit rate       {:>8.2}%", s.hit_rate())?;
        writeln!(f, "  rtp            {:>8.2}%", s.rtp())?;
        writeln!(f, "  stars / spin   {:>8.3}", s.stars_per_spin())?;
        writeln!(
            f,
            "  stars paid     {} (base {}, streak {}, lucky {}, kicker {})",
            s.total_stars, s.base_stars, s.streak_stars, s.lucky_stars, s.kicker_stars
        )?;
        writeln!(
            f,
            "  tiers          jackpot {} · big {} · win {} · small {} · partial {}",
            s.jackpots, s.big_wins, s.tier_wins, s.small_wins, s.partial_wins
        )?;
        writeln!(f, "  lucky spins    {}", s.lucky_spins)?;
        writeln!(f, "  max win        {}", s.max_win)?;
        writeln!(
            f,
            "  balances       min {} · max {} · mean {:.1}",
            self.balances.min, self.balances.max, self.balances.mean
        )?;
        write!(
            f,
            "  jackpot        {} (contributed {}, awarded {} in {} kickers)",
            self.jackpot.value, self.jackpot.total_contributed, self.jackpot.total_awarded, self.jackpot.awards
        )?;
        if s.errors > 0 {
            write!(f, "\n  errors         {}", s.errors)?;
        }
        Ok(())
    }
}
