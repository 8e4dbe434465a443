//! Error types for the spin engine
//!
//! `ConfigError` is returned to callers when tables fail to load or
//! validate. The `*Fault` types never leave the engine: each sub-step logs
//! its fault and continues with a safe default.

use thiserror::Error;

use crate::symbols::Symbol;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Probability shaping faults (fail-open to the base probability)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapingFault {
    #[error("recent wins {wins} exceed recent games {games}")]
    MalformedStats { wins: u32, games: u32 },

    #[error("shaped probability is not finite")]
    NonFinite,

    #[error("win probability override {0} outside [0, 1]")]
    InvalidOverride(f64),
}

/// Reel generation faults (fall back to uniform draws)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationFault {
    #[error("weighted table rejected: {0}")]
    Weights(String),

    #[error("near miss needs three distinct symbols, table has {0}")]
    TooFewSymbols(usize),

    #[error("symbol table is empty")]
    EmptyTable,

    #[error("win probability {0} is not a number")]
    NotANumber(f64),
}

/// Win evaluation faults (degrade to no win)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationFault {
    #[error("no triple rule for {0}")]
    MissingTripleRule(Symbol),
}

/// Bonus layering faults (degrade to the safe default outcome)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayeringFault {
    #[error("star total overflowed while adding {component}")]
    Overflow { component: &'static str },
}

/// Any fault raised inside a round
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineFault {
    #[error("shaping: {0}")]
    Shaping(#[from] ShapingFault),

    #[error("generation: {0}")]
    Generation(#[from] GenerationFault),

    #[error("evaluation: {0}")]
    Evaluation(#[from] EvaluationFault),

    #[error("layering: {0}")]
    Layering(#[from] LayeringFault),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_messages() {
        let fault: EngineFault = ShapingFault::MalformedStats { wins: 5, games: 2 }.into();
        assert_eq!(
            fault.to_string(),
            "shaping: recent wins 5 exceed recent games 2"
        );

        let fault: EngineFault = EvaluationFault::MissingTripleRule(Symbol::Bell).into();
        assert_eq!(fault.to_string(), "evaluation: no triple rule for 🔔");
    }
}
