//! Chat message for a round

use std::fmt::{self, Write as _};

use crate::bonus::LuckySpinConfig;
use crate::outcome::RoundOutcome;
use crate::paytable::WinTier;

/// Returned when the message cannot be built
pub const FORMAT_APOLOGY: &str = "❌ Could not format the spin result";

/// Render a round for the chat
pub fn format_outcome(outcome: &RoundOutcome, lucky: &LuckySpinConfig) -> String {
    match write_outcome(outcome, lucky) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to format spin {}: {}", outcome.info.spin_number, e);
            FORMAT_APOLOGY.to_string()
        }
    }
}

fn write_outcome(outcome: &RoundOutcome, lucky: &LuckySpinConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "🎰 SLOT MACHINE 🎰")?;
    writeln!(out)?;
    writeln!(out, "{}", outcome.reels_line())?;
    writeln!(out)?;

    if outcome.is_error() {
        writeln!(out, "⚠️ This spin could not be scored, no stars were awarded")?;
        return Ok(out);
    }

    if outcome.is_winner {
        let (open, close, lead) = match outcome.info.win_tier {
            Some(WinTier::Jackpot) => ("🎉", "🎉", "💎"),
            Some(WinTier::BigWin) => ("🎊", "🎊", "🔔"),
            _ => ("🎯", "🎯", "✨"),
        };
        let headline = outcome.info.win_tier.map(|t| t.display_name()).unwrap_or("Win!");
        writeln!(out, "{open} {headline} {close}")?;
        writeln!(
            out,
            "{lead} {} - {} stars!",
            outcome.combination, outcome.stars_won
        )?;
    } else {
        writeln!(out, "😔 No win this time")?;
        writeln!(out, "Better luck next spin! 🍀")?;
    }

    if let Some(streak) = &outcome.info.streak_bonus {
        writeln!(out, "🔥 Streak bonus: +{} stars", streak.bonus)?;
    }
    if let Some(bonus) = outcome.info.lucky_bonus {
        writeln!(out, "🍀 Lucky spin bonus: +{bonus} stars")?;
    }
    if let Some(kicker) = outcome.info.jackpot_kicker {
        writeln!(out, "💎 Jackpot kicker: +{kicker} stars")?;
    }

    if outcome.is_winner {
        writeln!(
            out,
            "💰 Progressive jackpot: {} stars",
            outcome.info.progressive_jackpot
        )?;
    } else if let Some(next) = lucky.next_after(outcome.info.spin_number) {
        let remaining = next - outcome.info.spin_number;
        writeln!(out, "🎯 Next lucky spin in {remaining} spins")?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::StreakTable;
    use crate::outcome::RoundInfo;
    use crate::paytable::Combination;
    use crate::symbols::Symbol::*;

    fn outcome(reels: [crate::symbols::Symbol; 3], stars: u64, combination: Combination) -> RoundOutcome {
        RoundOutcome {
            reels,
            is_winner: stars > 0,
            stars_won: stars,
            base_payout: stars,
            combination,
            info: RoundInfo::new(7, 1000),
        }
    }

    #[test]
    fn test_loss_shows_lucky_countdown() {
        let round = outcome([Diamond, Bell, Cherry], 0, Combination::NoWin);
        let text = format_outcome(&round, &LuckySpinConfig::standard());
        assert!(text.contains("💎 🔔 🍒"));
        assert!(text.contains("No win this time"));
        assert!(text.contains("Next lucky spin in 3 spins"));
        assert!(!text.contains("Progressive jackpot"));
    }

    #[test]
    fn test_jackpot_headline() {
        let mut round = outcome([Diamond; 3], 200, Combination::Triple(Diamond));
        round.info.win_tier = Some(WinTier::Jackpot);
        round.info.jackpot_kicker = Some(100);
        round.info.streak_bonus = Some(StreakTable::standard().progress(3));
        let text = format_outcome(&round, &LuckySpinConfig::standard());
        assert!(text.contains("🎉 JACKPOT! 🎉"));
        assert!(text.contains("💎 💎💎💎 - 200 stars!"));
        assert!(text.contains("Streak bonus: +10 stars"));
        assert!(text.contains("Jackpot kicker: +100 stars"));
        assert!(text.contains("Progressive jackpot: 1000 stars"));
    }

    #[test]
    fn test_lucky_bonus_on_loss_is_itemized() {
        let mut round = outcome([Star, Bell, Clover], 0, Combination::NoWin);
        round.stars_won = 10;
        round.base_payout = 0;
        round.info.spin_number = 10;
        round.info.lucky_bonus = Some(10);
        let text = format_outcome(&round, &LuckySpinConfig::standard());
        assert!(text.contains("No win this time"));
        assert!(text.contains("Lucky spin bonus: +10 stars"));
        assert!(text.contains("Next lucky spin in 15 spins"));
    }

    #[test]
    fn test_no_countdown_after_last_milestone() {
        let mut round = outcome([Star, Bell, Clover], 0, Combination::NoWin);
        round.info.spin_number = 900;
        let text = format_outcome(&round, &LuckySpinConfig::standard());
        assert!(!text.contains("Next lucky spin"));
    }

    #[test]
    fn test_error_round() {
        let round = RoundOutcome::safe_default(Clover, 3, 1000, "layering: overflow");
        let text = format_outcome(&round, &LuckySpinConfig::standard());
        assert!(text.contains("could not be scored"));
    }
}
