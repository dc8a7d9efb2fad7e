//! Error types for faq-core

use thiserror::Error;

/// Main error type for faq-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for faq-core
pub type Result<T> = std::result::Result<T, Error>;
