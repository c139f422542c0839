use crate::cache::CacheError;
use thiserror::Error;

/// Failures that stop the application before or while the terminal is up
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not find the {0} directory")]
    MissingDirectory(&'static str),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
