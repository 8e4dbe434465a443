//! Streak and lucky-spin bonus tables

use serde::{Deserialize, Serialize};

/// Flat bonus for a daily streak of at least `threshold` days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakBonusRule {
    pub threshold: u32,
    pub bonus: u64,
    /// Reported to the player, not applied to the payout
    pub multiplier: f64,
}

impl StreakBonusRule {
    pub fn new(threshold: u32, bonus: u64, multiplier: f64) -> Self {
        Self {
            threshold,
            bonus,
            multiplier,
        }
    }
}

/// Streak rules ordered by strictly increasing threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreakTable {
    pub rules: Vec<StreakBonusRule>,
}

impl StreakTable {
    pub fn standard() -> Self {
        Self {
            rules: vec![
                StreakBonusRule::new(1, 5, 1.0),
                StreakBonusRule::new(3, 10, 1.2),
                StreakBonusRule::new(7, 20, 1.5),
                StreakBonusRule::new(14, 50, 2.0),
                StreakBonusRule::new(30, 100, 3.0),
            ],
        }
    }

    /// Rule with the highest threshold not above `streak`
    pub fn lookup(&self, streak: u32) -> Option<&StreakBonusRule> {
        let idx = self.rules.partition_point(|r| r.threshold <= streak);
        idx.checked_sub(1).map(|i| &self.rules[i])
    }

    /// Smallest threshold strictly above `streak`
    pub fn next_threshold(&self, streak: u32) -> Option<u32> {
        let idx = self.rules.partition_point(|r| r.threshold <= streak);
        self.rules.get(idx).map(|r| r.threshold)
    }

    /// Applied rule plus progress toward the next milestone
    pub fn progress(&self, streak: u32) -> StreakProgress {
        let rule = self.lookup(streak);
        let next = self.next_threshold(streak);
        let progress = match next {
            Some(n) if n > 0 => f64::from(streak) / f64::from(n),
            _ => 1.0,
        };

        StreakProgress {
            current_streak: streak,
            threshold: rule.map(|r| r.threshold),
            bonus: rule.map(|r| r.bonus).unwrap_or(0),
            multiplier: rule.map(|r| r.multiplier).unwrap_or(1.0),
            next_threshold: next,
            progress,
        }
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.rules.windows(2).all(|w| w[0].threshold < w[1].threshold)
    }
}

impl Default for StreakTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Streak bonus as applied to a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakProgress {
    pub current_streak: u32,
    /// Threshold of the applied rule
    pub threshold: Option<u32>,
    pub bonus: u64,
    pub multiplier: f64,
    pub next_threshold: Option<u32>,
    /// `current / next`, 1.0 once the top rule is reached
    pub progress: f64,
}

/// Lucky spin milestones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuckySpinConfig {
    /// Ascending spin numbers that pay the bonus
    pub milestones: Vec<u64>,
    pub bonus: u64,
}

impl LuckySpinConfig {
    pub fn standard() -> Self {
        Self {
            milestones: vec![10, 25, 50, 100, 200, 500],
            bonus: 10,
        }
    }

    pub fn is_lucky(&self, spin_number: u64) -> bool {
        self.milestones.binary_search(&spin_number).is_ok()
    }

    /// First milestone strictly after `spin_number`
    pub fn next_after(&self, spin_number: u64) -> Option<u64> {
        let idx = self.milestones.partition_point(|&m| m <= spin_number);
        self.milestones.get(idx).copied()
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.milestones.windows(2).all(|w| w[0] < w[1])
    }
}

impl Default for LuckySpinConfig {
    fn default() -> Self {
        Self::standard()
    }
}
