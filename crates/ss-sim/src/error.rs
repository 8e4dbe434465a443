//! Simulator errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Engine config error: {0}")]
    Engine(#[from] ss_engine::ConfigError),
}

pub type SimResult<T> = Result<T, SimError>;
