//! Paytable and win evaluation

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EvaluationFault;
use crate::symbols::Symbol;

/// Reel arity
pub const REEL_COUNT: usize = 3;

/// Named tier of a triple win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinTier {
    Jackpot,
    BigWin,
    Win,
    SmallWin,
}

impl WinTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jackpot => "jackpot",
            Self::BigWin => "big_win",
            Self::Win => "win",
            Self::SmallWin => "small_win",
        }
    }

    /// Headline shown to the player
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Jackpot => "JACKPOT!",
            Self::BigWin => "Big win!",
            Self::Win | Self::SmallWin => "Win!",
        }
    }
}

/// Payout for three identical symbols
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripleRule {
    pub symbol: Symbol,
    /// Stars paid
    pub payout: u64,
    /// Informational multiplier
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    pub tier: WinTier,
    /// Weight used when a winning reel is forced
    pub draw_weight: u32,
}

fn default_multiplier() -> f64 {
    1.0
}

impl TripleRule {
    pub fn new(symbol: Symbol, payout: u64, tier: WinTier, draw_weight: u32) -> Self {
        Self {
            symbol,
            payout,
            multiplier: 1.0,
            tier,
            draw_weight,
        }
    }
}

/// Payout for a partial match, keyed by how many reels share a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialRule {
    pub count: u8,
    pub payout: u64,
    pub multiplier: f64,
    /// Label such as "partial" or "minimal"
    pub label: String,
}

impl PartialRule {
    pub fn new(count: u8, payout: u64, multiplier: f64, label: impl Into<String>) -> Self {
        Self {
            count,
            payout,
            multiplier,
            label: label.into(),
        }
    }
}

/// Complete paytable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayTable {
    pub triples: Vec<TripleRule>,
    pub partials: Vec<PartialRule>,
}

impl PayTable {
    /// Paytable used by the bot
    pub fn standard() -> Self {
        Self {
            triples: vec![
                TripleRule::new(Symbol::Diamond, 100, WinTier::Jackpot, 5),
                TripleRule::new(Symbol::Bell, 50, WinTier::BigWin, 10),
                TripleRule::new(Symbol::Cherry, 25, WinTier::Win, 20),
                TripleRule::new(Symbol::Star, 10, WinTier::Win, 30),
                TripleRule::new(Symbol::Clover, 5, WinTier::SmallWin, 35),
            ],
            partials: vec![
                PartialRule::new(2, 3, 0.5, "partial"),
                // Never reached on three reels: a max count of 1 means no match.
                PartialRule::new(1, 1, 0.2, "minimal"),
            ],
        }
    }

    pub fn triple(&self, symbol: Symbol) -> Option<&TripleRule> {
        self.triples.iter().find(|r| r.symbol == symbol)
    }

    pub fn partial(&self, count: u8) -> Option<&PartialRule> {
        self.partials.iter().find(|r| r.count == count)
    }

    /// Evaluate a reel
    ///
    /// Pure: the jackpot kicker for the top-rarity triple is applied by the
    /// engine, this only reports the base rule.
    pub fn evaluate(&self, reels: &[Symbol]) -> Result<Evaluation, EvaluationFault> {
        if reels.len() != REEL_COUNT {
            return Ok(Evaluation::invalid());
        }

        if reels[0] == reels[1] && reels[1] == reels[2] {
            let symbol = reels[0];
            let rule = self
                .triple(symbol)
                .ok_or(EvaluationFault::MissingTripleRule(symbol))?;
            return Ok(Evaluation {
                is_winner: true,
                payout: rule.payout,
                combination: Combination::Triple(symbol),
                tier: Some(rule.tier),
                partial_label: None,
                multiplier: rule.multiplier,
            });
        }

        let mut counts: HashMap<Symbol, u8> = HashMap::with_capacity(REEL_COUNT);
        for &symbol in reels {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        let max_count = counts.values().copied().max().unwrap_or(0);

        if max_count >= 2 {
            if let Some(rule) = self.partial(max_count) {
                return Ok(Evaluation {
                    is_winner: true,
                    payout: rule.payout,
                    combination: Combination::OfAKind(max_count),
                    tier: None,
                    partial_label: Some(rule.label.clone()),
                    multiplier: rule.multiplier,
                });
            }
        }

        Ok(Evaluation::no_win())
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classification of a reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Combination {
    Triple(Symbol),
    OfAKind(u8),
    NoWin,
    Invalid,
    Error,
}

impl Combination {
    pub fn label(&self) -> String {
        match self {
            Self::Triple(s) => format!("{s}{s}{s}"),
            Self::OfAKind(n) => format!("{n}_of_a_kind"),
            Self::NoWin => "no_win".to_string(),
            Self::Invalid => "invalid".to_string(),
            Self::Error => "error".to_string(),
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Result of evaluating a reel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub is_winner: bool,
    /// Base payout, including any jackpot kicker once applied
    pub payout: u64,
    pub combination: Combination,
    pub tier: Option<WinTier>,
    pub partial_label: Option<String>,
    pub multiplier: f64,
}

impl Evaluation {
    pub fn no_win() -> Self {
        Self {
            is_winner: false,
            payout: 0,
            combination: Combination::NoWin,
            tier: None,
            partial_label: None,
            multiplier: 0.0,
        }
    }

    pub fn invalid() -> Self {
        Self {
            combination: Combination::Invalid,
            ..Self::no_win()
        }
    }
}
