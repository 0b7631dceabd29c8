//! Typed failure model for the symbolic memory store.
//!
//! The store keeps a "never crash the conversation" contract: the public
//! recording entry points catch these errors, log them, and return `false`.
//! Internal paths return `Result` so callers that care can distinguish a
//! no-op from a genuine fault.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("symbol name must not be empty")]
    EmptySymbolName,

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
