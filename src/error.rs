use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The only user-visible failure: an import payload that is not shaped
    /// like a backup document. Everything else is healed or ignored.
    #[error("Invalid import format: {0}")]
    InvalidImportFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
