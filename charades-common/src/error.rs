//! Common error types for the charades service

use thiserror::Error;

/// Common result type for charades operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the catalog, engine, session and HTTP layer
///
/// An empty draw is not represented here: the engine returns `None` and the
/// session reports [`crate::session::Draw::Exhausted`].
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or unrecognized filter value or exclusion key
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Lookup by id with no match
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not allowed in the current session state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Static data could not be loaded; fatal at startup
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON data file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
