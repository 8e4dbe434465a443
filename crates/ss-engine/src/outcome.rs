//! Round outcome

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bonus::StreakProgress;
use crate::paytable::{Combination, REEL_COUNT, WinTier};
use crate::symbols::Symbol;

/// Complete result of one round
///
/// `stars_won` is always `base_payout + streak bonus + lucky bonus`. A
/// lucky-spin bonus is paid regardless of the reels, so a round can award
/// stars while `is_winner` stays false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Drawn symbols, in reel order
    pub reels: [Symbol; REEL_COUNT],
    /// Did the reels themselves win
    pub is_winner: bool,
    /// Total stars awarded
    pub stars_won: u64,
    /// Reel payout, including any jackpot kicker
    pub base_payout: u64,
    /// Classification tag
    pub combination: Combination,
    /// Details for presentation
    pub info: RoundInfo,
}

/// Presentation details of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundInfo {
    pub win_tier: Option<WinTier>,
    /// Label of the partial rule that paid ("partial")
    pub partial_label: Option<String>,
    /// Kicker taken from the jackpot pool
    pub jackpot_kicker: Option<u64>,
    /// Streak rule applied this round
    pub streak_bonus: Option<StreakProgress>,
    /// Lucky-spin bonus applied this round
    pub lucky_bonus: Option<u64>,
    /// Pool value after this round
    pub progressive_jackpot: u64,
    /// Spin number of this round (total spins before it, plus one)
    pub spin_number: u64,
    pub timestamp: DateTime<Utc>,
    /// Set when the round fell back to the safe default
    pub error: Option<String>,
}

impl RoundInfo {
    pub fn new(spin_number: u64, progressive_jackpot: u64) -> Self {
        Self {
            win_tier: None,
            partial_label: None,
            jackpot_kicker: None,
            streak_bonus: None,
            lucky_bonus: None,
            progressive_jackpot,
            spin_number,
            timestamp: Utc::now(),
            error: None,
        }
    }
}

impl RoundOutcome {
    /// No win, zero payout, `symbol` on every reel, error tag set
    pub fn safe_default(
        symbol: Symbol,
        spin_number: u64,
        progressive_jackpot: u64,
        error: impl Into<String>,
    ) -> Self {
        let mut info = RoundInfo::new(spin_number, progressive_jackpot);
        info.error = Some(error.into());
        Self {
            reels: [symbol; REEL_COUNT],
            is_winner: false,
            stars_won: 0,
            base_payout: 0,
            combination: Combination::Error,
            info,
        }
    }

    pub fn streak_bonus(&self) -> u64 {
        self.info.streak_bonus.as_ref().map(|s| s.bonus).unwrap_or(0)
    }

    pub fn lucky_bonus(&self) -> u64 {
        self.info.lucky_bonus.unwrap_or(0)
    }

    /// Does `stars_won` equal the sum of its components
    pub fn is_consistent(&self) -> bool {
        self.base_payout
            .checked_add(self.streak_bonus())
            .and_then(|v| v.checked_add(self.lucky_bonus()))
            == Some(self.stars_won)
    }

    pub fn is_error(&self) -> bool {
        self.info.error.is_some()
    }

    /// Reels as glyphs separated by spaces
    pub fn reels_line(&self) -> String {
        self.reels
            .iter()
            .map(|s| s.glyph())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
