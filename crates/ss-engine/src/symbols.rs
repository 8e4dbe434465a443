//! Symbol definitions and rarity tiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reel symbol identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    /// 💎
    Diamond,
    /// 🔔
    Bell,
    /// 🍒
    Cherry,
    /// ⭐
    Star,
    /// 🍀
    Clover,
}

impl Symbol {
    /// All symbols in table order
    pub const ALL: [Symbol; 5] = [
        Symbol::Diamond,
        Symbol::Bell,
        Symbol::Cherry,
        Symbol::Star,
        Symbol::Clover,
    ];

    /// Glyph shown on the reel
    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Diamond => "💎",
            Symbol::Bell => "🔔",
            Symbol::Cherry => "🍒",
            Symbol::Star => "⭐",
            Symbol::Clover => "🍀",
        }
    }

    /// Parse a glyph back into a symbol
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.glyph() == glyph)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Rarity tier, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symbol table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSpec {
    /// Symbol identifier
    pub symbol: Symbol,
    /// Relative selection weight for independent draws
    pub weight: u32,
    /// Nominal value (payout basis)
    pub value: u64,
    /// Rarity tier
    pub rarity: Rarity,
}

impl SymbolSpec {
    pub fn new(symbol: Symbol, weight: u32, value: u64, rarity: Rarity) -> Self {
        Self {
            symbol,
            weight,
            value,
            rarity,
        }
    }
}

/// Full symbol table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolSet {
    pub symbols: Vec<SymbolSpec>,
}

impl SymbolSet {
    /// Five-symbol table used by the bot
    pub fn standard() -> Self {
        Self {
            symbols: vec![
                SymbolSpec::new(Symbol::Diamond, 5, 100, Rarity::Legendary),
                SymbolSpec::new(Symbol::Bell, 10, 50, Rarity::Epic),
                SymbolSpec::new(Symbol::Cherry, 20, 25, Rarity::Rare),
                SymbolSpec::new(Symbol::Star, 30, 10, Rarity::Uncommon),
                SymbolSpec::new(Symbol::Clover, 35, 5, Rarity::Common),
            ],
        }
    }

    /// Get spec by symbol
    pub fn get(&self, symbol: Symbol) -> Option<&SymbolSpec> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }

    /// Symbols in table order
    pub fn ids(&self) -> Vec<Symbol> {
        self.symbols.iter().map(|s| s.symbol).collect()
    }

    /// Selection weights in table order
    pub fn weights(&self) -> Vec<u32> {
        self.symbols.iter().map(|s| s.weight).collect()
    }

    /// The single symbol with the highest rarity, if there is exactly one
    pub fn top_rarity(&self) -> Option<Symbol> {
        let max = self.symbols.iter().map(|s| s.rarity).max()?;
        let mut top = self.symbols.iter().filter(|s| s.rarity == max);
        let first = top.next()?;
        if top.next().is_some() {
            return None;
        }
        Some(first.symbol)
    }

    /// Lowest-rarity symbol (used for the safe default reel)
    pub fn lowest_rarity(&self) -> Option<Symbol> {
        self.symbols
            .iter()
            .min_by_key(|s| s.rarity)
            .map(|s| s.symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::standard()
    }
}
