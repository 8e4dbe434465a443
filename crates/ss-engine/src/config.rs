//! Engine configuration
//!
//! All tables are immutable once the engine is built. `EngineConfig::default()`
//! is the table set the bot ships with; files can override any section.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bonus::{LuckySpinConfig, StreakTable};
use crate::error::{ConfigError, ConfigResult};
use crate::jackpot::JackpotConfig;
use crate::paytable::PayTable;
use crate::symbols::{Symbol, SymbolSet};

/// Win probability shaping parameters
///
/// Every adjustment is an additive delta on `base`; the sum is clamped to
/// `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingConfig {
    pub base: f64,
    pub min: f64,
    pub max: f64,

    /// Above this many spins a player counts as a veteran
    pub veteran_spins: u64,
    pub veteran_delta: f64,
    /// Below this many spins a player counts as new
    pub newcomer_spins: u64,
    pub newcomer_delta: f64,

    /// Recent win rate below this gets relief
    pub cold_rate: f64,
    pub cold_delta: f64,
    /// Recent win rate above this gets dampened
    pub hot_rate: f64,
    pub hot_delta: f64,

    pub low_balance: i64,
    pub low_balance_delta: f64,
    pub high_balance: i64,
    pub high_balance_delta: f64,
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            base: 0.7,
            min: 0.3,
            max: 0.9,

            veteran_spins: 100,
            veteran_delta: -0.05,
            newcomer_spins: 10,
            newcomer_delta: 0.05,

            cold_rate: 0.3,
            cold_delta: 0.10,
            hot_rate: 0.8,
            hot_delta: -0.10,

            low_balance: 50,
            low_balance_delta: 0.05,
            high_balance: 500,
            high_balance_delta: -0.05,
        }
    }
}

/// Reel generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Share of losing rounds drawn as three distinct symbols
    pub near_miss_probability: f64,
    /// Length of the recent-results window used by `PlayerStats::from_history`
    pub recent_window: usize,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            near_miss_probability: 0.3,
            recent_window: 10,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub symbols: SymbolSet,
    pub paytable: PayTable,
    pub shaping: ShapingConfig,
    pub reels: ReelConfig,
    pub streaks: StreakTable,
    pub lucky: LuckySpinConfig,
    pub jackpot: JackpotConfig,
}

impl EngineConfig {
    /// Load from a `.yaml`, `.yml` or `.json` file and validate
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yml::to_string(self)?)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every table invariant
    pub fn validate(&self) -> ConfigResult<()> {
        self.validate_symbols()?;
        self.validate_paytable()?;
        self.validate_shaping()?;
        self.validate_bonuses()?;
        self.jackpot.validate()?;
        Ok(())
    }

    fn validate_symbols(&self) -> ConfigResult<()> {
        if self.symbols.len() < 3 {
            return Err(invalid(format!(
                "need at least 3 symbols, got {}",
                self.symbols.len()
            )));
        }
        for (i, spec) in self.symbols.symbols.iter().enumerate() {
            if spec.weight == 0 {
                return Err(invalid(format!("symbol {} has zero weight", spec.symbol)));
            }
            if self.symbols.symbols[..i].iter().any(|s| s.symbol == spec.symbol) {
                return Err(invalid(format!("symbol {} listed twice", spec.symbol)));
            }
        }
        if self.symbols.top_rarity().is_none() {
            return Err(invalid("top rarity must belong to exactly one symbol"));
        }
        Ok(())
    }

    fn validate_paytable(&self) -> ConfigResult<()> {
        let table = &self.paytable;
        for symbol in self.symbols.ids() {
            match table.triples.iter().filter(|r| r.symbol == symbol).count() {
                1 => {}
                0 => return Err(invalid(format!("no triple rule for {symbol}"))),
                _ => return Err(invalid(format!("duplicate triple rule for {symbol}"))),
            }
        }
        for rule in &table.triples {
            if self.symbols.get(rule.symbol).is_none() {
                return Err(invalid(format!(
                    "triple rule for {} which is not in the symbol table",
                    rule.symbol
                )));
            }
            if rule.draw_weight == 0 {
                return Err(invalid(format!(
                    "triple rule for {} has zero draw weight",
                    rule.symbol
                )));
            }
        }
        for (i, rule) in table.partials.iter().enumerate() {
            if !matches!(rule.count, 1 | 2) {
                return Err(invalid(format!(
                    "partial rule count must be 1 or 2, got {}",
                    rule.count
                )));
            }
            if table.partials[..i].iter().any(|r| r.count == rule.count) {
                return Err(invalid(format!("duplicate partial rule for {}", rule.count)));
            }
        }
        Ok(())
    }

    fn validate_shaping(&self) -> ConfigResult<()> {
        let s = &self.shaping;
        for (name, p) in [("base", s.base), ("min", s.min), ("max", s.max)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("shaping {name} {p} outside [0, 1]")));
            }
        }
        if !(s.min <= s.base && s.base <= s.max) {
            return Err(invalid(format!(
                "shaping bounds must satisfy min <= base <= max ({} <= {} <= {})",
                s.min, s.base, s.max
            )));
        }
        let deltas = [
            s.veteran_delta,
            s.newcomer_delta,
            s.cold_delta,
            s.hot_delta,
            s.low_balance_delta,
            s.high_balance_delta,
        ];
        if deltas.iter().any(|d| !d.is_finite()) {
            return Err(invalid("shaping deltas must be finite"));
        }
        if s.newcomer_spins > s.veteran_spins || s.cold_rate > s.hot_rate || s.low_balance > s.high_balance {
            return Err(invalid("shaping thresholds overlap"));
        }

        let near_miss = self.reels.near_miss_probability;
        if !(0.0..=1.0).contains(&near_miss) {
            return Err(invalid(format!(
                "near miss probability {near_miss} outside [0, 1]"
            )));
        }
        Ok(())
    }

    fn validate_bonuses(&self) -> ConfigResult<()> {
        if !self.streaks.is_strictly_increasing() {
            return Err(invalid("streak thresholds must be strictly increasing"));
        }
        if !self.lucky.is_strictly_increasing() {
            return Err(invalid("lucky spin milestones must be strictly increasing"));
        }
        Ok(())
    }

    /// Symbol whose triple pays the jackpot kicker
    pub fn kicker_symbol(&self) -> Option<Symbol> {
        self.symbols.top_rarity()
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::PartialRule;
    use crate::symbols::Rarity;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.kicker_symbol(), Some(Symbol::Diamond));
    }

    #[test]
    fn test_rejects_zero_weight() {
        let mut config = EngineConfig::default();
        config.symbols.symbols[2].weight = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unordered_streaks() {
        let mut config = EngineConfig::default();
        config.streaks.rules[2].threshold = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unordered_milestones() {
        let mut config = EngineConfig::default();
        config.lucky.milestones = vec![10, 50, 25];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let mut config = EngineConfig::default();
        config.shaping.min = 0.8;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.shaping.max = 1.5;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.reels.near_miss_probability = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_triple() {
        let mut config = EngineConfig::default();
        config.paytable.triples.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_partial_count() {
        let mut config = EngineConfig::default();
        config.paytable.partials.push(PartialRule::new(3, 9, 1.0, "full"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_shared_top_rarity() {
        let mut config = EngineConfig::default();
        config.symbols.symbols[1].rarity = Rarity::Legendary;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "lucky:\n  milestones: [5, 15]\n  bonus: 3\n";
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.lucky.milestones, vec![5, 15]);
        assert_eq!(config.lucky.bonus, 3);
        assert_eq!(config.paytable, PayTable::standard());
    }

    #[test]
    fn test_yaml_and_json_round_trip() {
        let config = EngineConfig::default();
        let yaml = config.to_yaml().unwrap();
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_yaml_str(&yaml).unwrap(), config);
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }
}
