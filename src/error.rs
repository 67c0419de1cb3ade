//! Error types for the crate.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Agent arguments that make the agent unusable: a reserved character in the name, an
    /// unknown role or a seed that is not an integer.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid board '{text}': {reason}")]
    InvalidBoard { text: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
