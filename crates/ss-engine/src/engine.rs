//! Spin engine: one call per round
//!
//! ```text
//! PlayerStats ─► shaping ─► reels ─► paytable (+ kicker) ─► bonuses ─► jackpot
//!                                                                        │
//!                                                                        v
//!                                                                  RoundOutcome
//! ```
//!
//! The engine is built once from a validated [`EngineConfig`] and shared by
//! reference. The only state it mutates is the jackpot pool.

use std::fmt::{self, Write as _};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bonus::{StreakBonusRule, StreakProgress};
use crate::config::EngineConfig;
use crate::error::{ConfigError, ConfigResult, LayeringFault};
use crate::jackpot::{JackpotSnapshot, ProgressiveJackpot};
use crate::outcome::{RoundInfo, RoundOutcome};
use crate::paytable::{Combination, Evaluation, REEL_COUNT};
use crate::reels::ReelGenerator;
use crate::shaping;
use crate::stats::PlayerStats;
use crate::symbols::Symbol;

/// Evaluation of a reel after the jackpot kicker was applied
#[derive(Debug, Clone, PartialEq)]
pub struct WinCheck {
    /// Evaluation with the kicker already added to `payout`
    pub evaluation: Evaluation,
    pub jackpot_kicker: Option<u64>,
}

/// Bonuses stacked on top of the reel payout
#[derive(Debug, Clone, PartialEq)]
struct Layered {
    total: u64,
    streak: Option<StreakProgress>,
    lucky: Option<u64>,
}

/// Static game figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub progressive_jackpot: u64,
    pub total_symbols: usize,
    pub winning_combinations: usize,
    pub partial_combinations: usize,
    pub lucky_spin_intervals: Vec<u64>,
    pub base_win_probability: f64,
    pub streak_bonuses: Vec<StreakBonusRule>,
}

/// Spin outcome engine
#[derive(Debug)]
pub struct SpinEngine {
    config: EngineConfig,
    generator: ReelGenerator,
    jackpot: ProgressiveJackpot,
    /// Triple of this symbol pays the kicker
    kicker_symbol: Symbol,
    /// Symbol shown on every reel of a failed round
    fallback_symbol: Symbol,
}

impl SpinEngine {
    /// Build an engine from a configuration, validating it first
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        let kicker_symbol = config
            .kicker_symbol()
            .ok_or_else(|| ConfigError::Invalid("no unique top-rarity symbol".into()))?;
        let fallback_symbol = config
            .symbols
            .lowest_rarity()
            .ok_or_else(|| ConfigError::Invalid("symbol table is empty".into()))?;

        log::info!(
            "Spin engine ready: {} symbols, kicker on {}{}{}, jackpot seed {}",
            config.symbols.len(),
            kicker_symbol,
            kicker_symbol,
            kicker_symbol,
            config.jackpot.seed
        );
        Ok(Self::assemble(config, kicker_symbol, fallback_symbol))
    }

    /// Engine with the shipped tables
    pub fn standard() -> Self {
        Self::assemble(EngineConfig::default(), Symbol::Diamond, Symbol::Clover)
    }

    fn assemble(config: EngineConfig, kicker_symbol: Symbol, fallback_symbol: Symbol) -> Self {
        let generator = ReelGenerator::new(&config.symbols, &config.paytable, &config.reels);
        let jackpot = ProgressiveJackpot::new(config.jackpot.clone());
        Self {
            config,
            generator,
            jackpot,
            kicker_symbol,
            fallback_symbol,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Play one round with the thread-local RNG
    pub fn play_round(&self, override_probability: Option<f64>, stats: &PlayerStats) -> RoundOutcome {
        self.play_round_with_rng(&mut rand::rng(), override_probability, stats)
    }

    /// Play one round
    ///
    /// Never fails. Faults inside a sub-step are logged and replaced by that
    /// step's safe default; a layering fault turns the whole round into
    /// [`RoundOutcome::safe_default`].
    pub fn play_round_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        override_probability: Option<f64>,
        stats: &PlayerStats,
    ) -> RoundOutcome {
        let spin_number = stats.next_spin_number();
        let p = shaping::resolve_probability(&self.config.shaping, override_probability, stats);
        let (reels, branch) = self.generator.spin(rng, p);
        let check = self.check_win(&reels);

        let layered = match self.layer(check.evaluation.payout, stats) {
            Ok(layered) => layered,
            Err(fault) => {
                log::error!("Bonus layering fault on spin {}: {}", spin_number, fault);
                return RoundOutcome::safe_default(
                    self.fallback_symbol,
                    spin_number,
                    self.jackpot.value(),
                    fault.to_string(),
                );
            }
        };

        let pool = self.jackpot.contribute(layered.total);
        log::debug!(
            "Spin {}: p={:.2} {:?} {} -> {} stars (base {}), pool {}",
            spin_number,
            p,
            branch,
            check.evaluation.combination,
            layered.total,
            check.evaluation.payout,
            pool
        );

        let Evaluation {
            is_winner,
            payout,
            combination,
            tier,
            partial_label,
            ..
        } = check.evaluation;

        let mut info = RoundInfo::new(spin_number, pool);
        info.win_tier = tier;
        info.partial_label = partial_label;
        info.jackpot_kicker = check.jackpot_kicker;
        info.streak_bonus = layered.streak;
        info.lucky_bonus = layered.lucky;

        RoundOutcome {
            reels,
            is_winner,
            stars_won: layered.total,
            base_payout: payout,
            combination,
            info,
        }
    }

    /// Evaluate a reel and pay the kicker on a top-rarity triple
    ///
    /// Drains the jackpot when the kicker is paid. An evaluation fault is
    /// logged and scored as no win.
    pub fn check_win(&self, reels: &[Symbol]) -> WinCheck {
        let mut evaluation = match self.config.paytable.evaluate(reels) {
            Ok(evaluation) => evaluation,
            Err(fault) => {
                log::error!("Win evaluation fault, scoring as no win: {}", fault);
                Evaluation::no_win()
            }
        };

        let mut jackpot_kicker = None;
        if evaluation.combination == Combination::Triple(self.kicker_symbol) {
            let (kicker, _) = self.jackpot.award_kicker();
            evaluation.payout = evaluation.payout.saturating_add(kicker);
            jackpot_kicker = Some(kicker);
        }

        WinCheck {
            evaluation,
            jackpot_kicker,
        }
    }

    fn layer(&self, base: u64, stats: &PlayerStats) -> Result<Layered, LayeringFault> {
        let mut total = base;

        let mut streak = None;
        if stats.daily_streak > 0 {
            let progress = self.streak_progress(stats.daily_streak);
            if progress.bonus > 0 {
                total = total
                    .checked_add(progress.bonus)
                    .ok_or(LayeringFault::Overflow { component: "streak bonus" })?;
                streak = Some(progress);
            }
        }

        let mut lucky = None;
        let bonus = self.config.lucky.bonus;
        if bonus > 0 && self.is_lucky_spin(stats.next_spin_number()) {
            total = total
                .checked_add(bonus)
                .ok_or(LayeringFault::Overflow { component: "lucky bonus" })?;
            lucky = Some(bonus);
        }

        Ok(Layered { total, streak, lucky })
    }

    /// Win probability the engine would use for these stats
    pub fn shape_probability(&self, stats: &PlayerStats) -> f64 {
        shaping::shape_probability(&self.config.shaping, stats)
    }

    pub fn streak_progress(&self, daily_streak: u32) -> StreakProgress {
        self.config.streaks.progress(daily_streak)
    }

    pub fn is_lucky_spin(&self, spin_number: u64) -> bool {
        self.config.lucky.is_lucky(spin_number)
    }

    /// First lucky milestone after `spin_number`
    pub fn next_lucky_spin(&self, spin_number: u64) -> Option<u64> {
        self.config.lucky.next_after(spin_number)
    }

    pub fn jackpot_value(&self) -> u64 {
        self.jackpot.value()
    }

    pub fn jackpot_snapshot(&self) -> JackpotSnapshot {
        self.jackpot.snapshot()
    }

    pub fn restore_jackpot(&self, snapshot: &JackpotSnapshot) {
        self.jackpot.restore(snapshot);
        log::info!("Jackpot restored to {}", self.jackpot.value());
    }

    /// Paytable summary for players
    pub fn get_combination_info(&self) -> String {
        match self.write_combination_info() {
            Ok(text) => text,
            Err(e) => {
                log::error!("Failed to build combination info: {}", e);
                "❌ Could not load the winning combinations".to_string()
            }
        }
    }

    fn write_combination_info(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "🎰 WINNING COMBINATIONS 🎰")?;
        writeln!(out)?;
        for rule in &self.config.paytable.triples {
            let rarity = self
                .config
                .symbols
                .get(rule.symbol)
                .map(|s| s.rarity.as_str())
                .unwrap_or("unknown");
            writeln!(
                out,
                "{} - {} stars ({})",
                Combination::Triple(rule.symbol),
                rule.payout,
                rarity
            )?;
        }

        writeln!(out)?;
        writeln!(out, "📊 Partial wins:")?;
        for rule in self
            .config
            .paytable
            .partials
            .iter()
            .filter(|r| usize::from(r.count) >= 2 && usize::from(r.count) < REEL_COUNT)
        {
            writeln!(out, "{} matching symbols - {} stars", rule.count, rule.payout)?;
        }

        writeln!(out)?;
        writeln!(out, "💰 Progressive jackpot: {} stars", self.jackpot.value())?;
        let milestones: Vec<String> = self.config.lucky.milestones.iter().map(u64::to_string).collect();
        writeln!(out, "🎯 Lucky spins: {}", milestones.join(", "))?;
        Ok(out)
    }

    /// Snapshot of the game's static figures and current pool
    pub fn get_game_stats(&self) -> GameStats {
        GameStats {
            progressive_jackpot: self.jackpot.value(),
            total_symbols: self.config.symbols.len(),
            winning_combinations: self.config.paytable.triples.len(),
            partial_combinations: self.config.paytable.partials.len(),
            lucky_spin_intervals: self.config.lucky.milestones.clone(),
            base_win_probability: self.config.shaping.base,
            streak_bonuses: self.config.streaks.rules.clone(),
        }
    }
}

impl Default for SpinEngine {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::WinTier;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use Symbol::*;

    #[test]
    fn test_diamond_triple_pays_kicker() {
        let engine = SpinEngine::standard();
        let check = engine.check_win(&[Diamond, Diamond, Diamond]);
        assert!(check.evaluation.is_winner);
        assert_eq!(check.evaluation.tier, Some(WinTier::Jackpot));
        assert_eq!(check.jackpot_kicker, Some(100));
        assert_eq!(check.evaluation.payout, 200);
        assert_eq!(engine.jackpot_value(), 1000);
    }

    #[test]
    fn test_other_triples_leave_pool() {
        let engine = SpinEngine::standard();
        let check = engine.check_win(&[Bell, Bell, Bell]);
        assert_eq!(check.evaluation.payout, 50);
        assert_eq!(check.jackpot_kicker, None);
        assert_eq!(engine.jackpot_snapshot().awards, 0);
    }

    #[test]
    fn test_missing_rule_scores_no_win() {
        let mut config = EngineConfig::default();
        config.paytable.triples.retain(|r| r.symbol != Cherry);
        let engine = SpinEngine::assemble(config, Diamond, Clover);
        let check = engine.check_win(&[Cherry, Cherry, Cherry]);
        assert!(!check.evaluation.is_winner);
        assert_eq!(check.evaluation.combination, Combination::NoWin);
    }

    #[test]
    fn test_layering_adds_streak_and_lucky() {
        let engine = SpinEngine::standard();
        let stats = PlayerStats::default().with_total_spins(9).with_streak(5);
        let layered = engine.layer(3, &stats).unwrap();
        assert_eq!(layered.total, 3 + 10 + 10);
        assert_eq!(layered.streak.map(|s| s.threshold), Some(Some(3)));
        assert_eq!(layered.lucky, Some(10));

        let plain = engine.layer(3, &PlayerStats::default()).unwrap();
        assert_eq!(plain.total, 3);
        assert_eq!(plain.streak, None);
        assert_eq!(plain.lucky, None);
    }

    #[test]
    fn test_layering_overflow_gives_safe_default() {
        let mut config = EngineConfig::default();
        config.lucky.bonus = u64::MAX;
        let engine = SpinEngine::new(config).unwrap();
        let stats = PlayerStats::default().with_total_spins(9);

        assert_eq!(
            engine.layer(1, &stats),
            Err(LayeringFault::Overflow { component: "lucky bonus" })
        );

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = engine.play_round_with_rng(&mut rng, Some(1.0), &stats);
        assert!(outcome.is_error());
        assert!(!outcome.is_winner);
        assert_eq!(outcome.stars_won, 0);
        assert_eq!(outcome.combination, Combination::Error);
        assert_eq!(outcome.reels, [Clover; 3]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.shaping.base = 2.0;
        assert!(SpinEngine::new(config).is_err());
    }

    #[test]
    fn test_combination_info() {
        let info = SpinEngine::standard().get_combination_info();
        assert!(info.contains("💎💎💎 - 100 stars (legendary)"));
        assert!(info.contains("2 matching symbols - 3 stars"));
        assert!(!info.contains("1 matching symbols"));
        assert!(info.contains("Progressive jackpot: 1000 stars"));
        assert!(info.contains("10, 25, 50, 100, 200, 500"));
    }

    #[test]
    fn test_game_stats() {
        let stats = SpinEngine::standard().get_game_stats();
        assert_eq!(stats.progressive_jackpot, 1000);
        assert_eq!(stats.total_symbols, 5);
        assert_eq!(stats.winning_combinations, 5);
        assert_eq!(stats.partial_combinations, 2);
        assert_eq!(stats.base_win_probability, 0.7);
        assert_eq!(stats.streak_bonuses.len(), 5);
    }
}
