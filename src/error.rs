//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // The messages below reach the user unchanged, so these variants add
    // no prefix of their own.
    #[error("{0}")]
    AiProvider(String),

    #[error("{0}")]
    Gateway(String),

    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
