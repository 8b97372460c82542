//! Error types for catalog loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}
