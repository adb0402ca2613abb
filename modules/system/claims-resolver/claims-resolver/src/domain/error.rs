//! Startup errors for the claims resolver chain.

use thiserror::Error;

/// Errors building a chain from configuration. Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainConfigError {
    #[error("no claims resolvers configured")]
    EmptyOrder,

    #[error("unknown claims resolver '{name}'")]
    UnknownResolver { name: String },

    #[error("claims resolver '{name}' is listed more than once")]
    DuplicateResolver { name: String },
}
