//! Reel generation

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::SliceRandom;

use crate::config::ReelConfig;
use crate::error::GenerationFault;
use crate::paytable::{PayTable, REEL_COUNT};
use crate::symbols::{Symbol, SymbolSet};

/// Which branch produced a reel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelBranch {
    /// Forced triple
    Winning,
    /// Three distinct symbols
    NearMiss,
    /// Independent weighted draws
    Random,
    /// Uniform draws after a generation fault
    Fallback,
}

/// Draws reels from the symbol and paytable configuration
#[derive(Debug, Clone)]
pub struct ReelGenerator {
    symbols: Vec<Symbol>,
    symbol_weights: Vec<u32>,
    triple_symbols: Vec<Symbol>,
    triple_weights: Vec<u32>,
    near_miss_probability: f64,
}

impl ReelGenerator {
    pub fn new(symbols: &SymbolSet, paytable: &PayTable, config: &ReelConfig) -> Self {
        Self {
            symbols: symbols.ids(),
            symbol_weights: symbols.weights(),
            triple_symbols: paytable.triples.iter().map(|r| r.symbol).collect(),
            triple_weights: paytable.triples.iter().map(|r| r.draw_weight).collect(),
            near_miss_probability: config.near_miss_probability.clamp(0.0, 1.0),
        }
    }

    /// Draw a reel for a round with win probability `p`
    ///
    /// Never fails: generation faults are logged and replaced by uniform
    /// independent draws.
    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R, p: f64) -> ([Symbol; REEL_COUNT], ReelBranch) {
        match self.try_spin(rng, p) {
            Ok(result) => result,
            Err(fault) => {
                log::warn!("Reel generation fault, falling back to uniform draws: {}", fault);
                match self.uniform(rng) {
                    Ok(reels) => (reels, ReelBranch::Fallback),
                    Err(fault) => {
                        log::error!("Uniform fallback failed: {}", fault);
                        ([Symbol::Clover; REEL_COUNT], ReelBranch::Fallback)
                    }
                }
            }
        }
    }

    pub fn try_spin<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        p: f64,
    ) -> Result<([Symbol; REEL_COUNT], ReelBranch), GenerationFault> {
        if p.is_nan() {
            return Err(GenerationFault::NotANumber(p));
        }
        let should_win = rng.random_bool(p.clamp(0.0, 1.0));
        if should_win {
            return Ok((self.winning(rng)?, ReelBranch::Winning));
        }
        if rng.random_bool(self.near_miss_probability) {
            Ok((self.near_miss(rng)?, ReelBranch::NearMiss))
        } else {
            Ok((self.weighted(rng)?, ReelBranch::Random))
        }
    }

    /// One triple, picked by triple draw weight
    pub fn winning<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[Symbol; REEL_COUNT], GenerationFault> {
        let dist = WeightedIndex::new(&self.triple_weights)
            .map_err(|e| GenerationFault::Weights(e.to_string()))?;
        let symbol = self.triple_symbols[dist.sample(rng)];
        let mut reels = [symbol; REEL_COUNT];
        reels.shuffle(rng);
        Ok(reels)
    }

    /// Three mutually distinct symbols, uniformly chosen
    pub fn near_miss<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[Symbol; REEL_COUNT], GenerationFault> {
        if self.symbols.len() < REEL_COUNT {
            return Err(GenerationFault::TooFewSymbols(self.symbols.len()));
        }
        let mut pool = self.symbols.clone();
        pool.shuffle(rng);
        Ok([pool[0], pool[1], pool[2]])
    }

    /// Three independent draws with replacement, by symbol weight
    pub fn weighted<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[Symbol; REEL_COUNT], GenerationFault> {
        let dist = WeightedIndex::new(&self.symbol_weights)
            .map_err(|e| GenerationFault::Weights(e.to_string()))?;
        Ok(std::array::from_fn(|_| self.symbols[dist.sample(rng)]))
    }

    /// Three independent uniform draws
    pub fn uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[Symbol; REEL_COUNT], GenerationFault> {
        if self.symbols.is_empty() {
            return Err(GenerationFault::EmptyTable);
        }
        Ok(std::array::from_fn(|_| self.symbols[rng.random_range(0..self.symbols.len())]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn generator() -> ReelGenerator {
        ReelGenerator::new(&SymbolSet::standard(), &PayTable::standard(), &ReelConfig::default())
    }

    #[test]
    fn test_certain_win_is_triple() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let (reels, branch) = generator.spin(&mut rng, 1.0);
            assert_eq!(branch, ReelBranch::Winning);
            assert!(reels.iter().all(|&s| s == reels[0]));
        }
    }

    #[test]
    fn test_near_miss_is_distinct() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let reels = generator.near_miss(&mut rng).unwrap();
            assert_ne!(reels[0], reels[1]);
            assert_ne!(reels[1], reels[2]);
            assert_ne!(reels[0], reels[2]);
        }
    }

    #[test]
    fn test_certain_loss_never_forces_triple() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut saw_near_miss = false;
        let mut saw_random = false;
        for _ in 0..500 {
            let (_, branch) = generator.spin(&mut rng, 0.0);
            match branch {
                ReelBranch::NearMiss => saw_near_miss = true,
                ReelBranch::Random => saw_random = true,
                other => panic!("unexpected branch {other:?}"),
            }
        }
        assert!(saw_near_miss && saw_random);
    }

    #[test]
    fn test_winning_draw_follows_weights() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut diamonds = 0;
        let mut clovers = 0;
        for _ in 0..10_000 {
            match generator.winning(&mut rng).unwrap()[0] {
                Symbol::Diamond => diamonds += 1,
                Symbol::Clover => clovers += 1,
                _ => {}
            }
        }
        // 5% vs 35% of forced wins
        assert!(diamonds < clovers);
        assert!((300..700).contains(&diamonds));
    }

    #[test]
    fn test_fault_falls_back_to_uniform() {
        let mut generator = generator();
        generator.triple_weights = vec![0; generator.triple_weights.len()];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(generator.winning(&mut rng).is_err());
        let (_, branch) = generator.spin(&mut rng, 1.0);
        assert_eq!(branch, ReelBranch::Fallback);
    }
}
