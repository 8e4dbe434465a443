//! Player statistics read by the engine

use serde::{Deserialize, Serialize};

/// Snapshot of a player's history, fetched by the caller before a round
///
/// Every field defaults to zero for a player with no history. The engine
/// only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    /// Spins played before this round
    pub total_spins: u64,
    /// Wins within the recent window
    pub recent_wins: u32,
    /// Games within the recent window
    pub recent_games: u32,
    /// Current star balance
    pub balance: i64,
    /// Consecutive days the daily bonus was claimed
    pub daily_streak: u32,
}

impl PlayerStats {
    /// Stats for a player with no history
    pub fn new_player() -> Self {
        Self::default()
    }

    /// Build stats from an ordered list of past results (oldest first)
    ///
    /// Only the last `window` results count toward the recent figures.
    pub fn from_history(
        total_spins: u64,
        balance: i64,
        daily_streak: u32,
        history: &[bool],
        window: usize,
    ) -> Self {
        let recent = &history[history.len().saturating_sub(window)..];
        Self {
            total_spins,
            recent_wins: recent.iter().filter(|&&won| won).count() as u32,
            recent_games: recent.len() as u32,
            balance,
            daily_streak,
        }
    }

    /// Recent win rate, if any recent games were played
    pub fn recent_win_rate(&self) -> Option<f64> {
        (self.recent_games > 0).then(|| f64::from(self.recent_wins) / f64::from(self.recent_games))
    }

    /// Spin number of the round about to be played
    pub fn next_spin_number(&self) -> u64 {
        self.total_spins.saturating_add(1)
    }

    pub fn with_total_spins(mut self, total_spins: u64) -> Self {
        self.total_spins = total_spins;
        self
    }

    pub fn with_recent(mut self, wins: u32, games: u32) -> Self {
        self.recent_wins = wins;
        self.recent_games = games;
        self
    }

    pub fn with_balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_streak(mut self, daily_streak: u32) -> Self {
        self.daily_streak = daily_streak;
        self
    }
}
