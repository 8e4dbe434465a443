//! Simulated player state

use ss_engine::{PlayerStats, RoundOutcome};

/// One simulated player, evolving its own history between rounds
#[derive(Debug, Clone)]
pub struct SimPlayer {
    total_spins: u64,
    balance: i64,
    daily_streak: u32,
    /// Recent results, oldest first, at most `window` long
    history: Vec<bool>,
    window: usize,
}

impl SimPlayer {
    pub fn new(starting_balance: i64, daily_streak: u32, window: usize) -> Self {
        Self {
            total_spins: 0,
            balance: starting_balance,
            daily_streak,
            history: Vec::with_capacity(window + 1),
            window,
        }
    }

    /// Stats the engine sees for the next round
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_history(
            self.total_spins,
            self.balance,
            self.daily_streak,
            &self.history,
            self.window,
        )
    }

    /// Apply a finished round
    pub fn record(&mut self, outcome: &RoundOutcome, spin_cost: i64) {
        let won = i64::try_from(outcome.stars_won).unwrap_or(i64::MAX);
        self.total_spins += 1;
        self.balance = self.balance.saturating_sub(spin_cost).saturating_add(won);
        self.history.push(outcome.is_winner);
        if self.history.len() > self.window {
            self.history.remove(0);
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn total_spins(&self) -> u64 {
        self.total_spins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_engine::{Combination, RoundInfo, Symbol};

    fn round(stars: u64, is_winner: bool) -> RoundOutcome {
        RoundOutcome {
            reels: [Symbol::Star; 3],
            is_winner,
            stars_won: stars,
            base_payout: stars,
            combination: if is_winner { Combination::Triple(Symbol::Star) } else { Combination::NoWin },
            info: RoundInfo::new(1, 1000),
        }
    }

    #[test]
    fn test_record_updates_stats() {
        let mut player = SimPlayer::new(10, 2, 3);
        player.record(&round(10, true), 1);
        player.record(&round(0, false), 1);
        let stats = player.stats();
        assert_eq!(stats.total_spins, 2);
        assert_eq!(stats.balance, 18);
        assert_eq!(stats.recent_wins, 1);
        assert_eq!(stats.recent_games, 2);
        assert_eq!(stats.daily_streak, 2);
    }

    #[test]
    fn test_history_window() {
        let mut player = SimPlayer::new(0, 0, 3);
        player.record(&round(5, true), 1);
        for _ in 0..3 {
            player.record(&round(0, false), 1);
        }
        let stats = player.stats();
        assert_eq!(stats.recent_games, 3);
        assert_eq!(stats.recent_wins, 0);
        assert_eq!(player.balance(), 1);
    }
}
