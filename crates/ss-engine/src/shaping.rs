//! Win probability shaping from player history

use crate::config::ShapingConfig;
use crate::error::ShapingFault;
use crate::stats::PlayerStats;

/// Shape a win probability, failing open to the base probability
pub fn shape_probability(config: &ShapingConfig, stats: &PlayerStats) -> f64 {
    match try_shape(config, stats) {
        Ok(p) => p,
        Err(fault) => {
            log::warn!("Probability shaping fault, using base {}: {}", config.base, fault);
            config.base
        }
    }
}

/// Shape a win probability
///
/// Adjustments are additive deltas on the base, then clamped to
/// `[config.min, config.max]`.
pub fn try_shape(config: &ShapingConfig, stats: &PlayerStats) -> Result<f64, ShapingFault> {
    if stats.recent_wins > stats.recent_games {
        return Err(ShapingFault::MalformedStats {
            wins: stats.recent_wins,
            games: stats.recent_games,
        });
    }

    let mut p = config.base;

    if stats.total_spins > config.veteran_spins {
        p += config.veteran_delta;
    } else if stats.total_spins < config.newcomer_spins {
        p += config.newcomer_delta;
    }

    if let Some(rate) = stats.recent_win_rate() {
        if rate < config.cold_rate {
            p += config.cold_delta;
        } else if rate > config.hot_rate {
            p += config.hot_delta;
        }
    }

    if stats.balance < config.low_balance {
        p += config.low_balance_delta;
    } else if stats.balance > config.high_balance {
        p += config.high_balance_delta;
    }

    if !p.is_finite() {
        return Err(ShapingFault::NonFinite);
    }
    Ok(p.clamp(config.min, config.max))
}

/// Resolve the probability for a round
///
/// A valid override bypasses shaping entirely; an invalid one is logged and
/// ignored.
pub fn resolve_probability(
    config: &ShapingConfig,
    override_probability: Option<f64>,
    stats: &PlayerStats,
) -> f64 {
    if let Some(p) = override_probability {
        match validate_override(p) {
            Ok(p) => return p,
            Err(fault) => log::warn!("Ignoring win probability override: {}", fault),
        }
    }
    shape_probability(config, stats)
}

fn validate_override(p: f64) -> Result<f64, ShapingFault> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(ShapingFault::InvalidOverride(p))
    }
}
