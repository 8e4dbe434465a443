//! # ss-engine: Spin outcome engine for the StarSpin slot bot
//!
//! Decides every round of the three-reel slot: whether it wins, which
//! symbols land, and how many stars it pays once streak, lucky-spin and
//! progressive jackpot bonuses are layered on. The engine does no I/O; the
//! caller passes in already-fetched [`PlayerStats`] and persists whatever it
//! needs from the returned [`RoundOutcome`].
//!
//! ## Architecture
//!
//! ```text
//! SpinEngine
//!     │
//!     ├── ShapingConfig   (win probability from player history)
//!     ├── ReelGenerator   (winning / near-miss / weighted reels)
//!     ├── PayTable        (triples, partial matches)
//!     ├── StreakTable + LuckySpinConfig
//!     └── ProgressiveJackpot (shared, mutex-guarded)
//!           │
//!           v
//!     RoundOutcome ─► format_outcome()
//! ```
//!
//! ## Example
//!
//! ```
//! use ss_engine::{SpinEngine, PlayerStats, format_outcome};
//!
//! let engine = SpinEngine::standard();
//! let stats = PlayerStats::new_player().with_streak(3);
//! let outcome = engine.play_round(None, &stats);
//! assert!(outcome.is_consistent());
//! println!("{}", format_outcome(&outcome, &engine.config().lucky));
//! ```

pub mod bonus;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod jackpot;
pub mod outcome;
pub mod paytable;
pub mod reels;
pub mod shaping;
pub mod stats;
pub mod symbols;

pub use bonus::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use format::*;
pub use jackpot::*;
pub use outcome::*;
pub use paytable::*;
pub use reels::*;
pub use shaping::{resolve_probability, shape_probability, try_shape};
pub use stats::*;
pub use symbols::*;
