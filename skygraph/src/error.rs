// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for SkyGraph
//!
//! Two layers:
//! - [`DgraphError`] is the underlying cause: a transport failure, an error
//!   envelope returned by the alpha, or a local validation failure.
//! - [`Error`] names the operation that failed and carries the cause as its
//!   source, so `{:#}`-style chains read "Load error: ... caused by ...".

use thiserror::Error;

/// Result type alias for SkyGraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Operation-level error type
#[derive(Error, Debug)]
pub enum Error {
    /// The endpoint could not be reached or failed its health probe
    #[error("Connection error: {0}")]
    Connection(#[source] DgraphError),

    /// Malformed schema or server rejection of an alter request
    #[error("Schema error: {0}")]
    Schema(#[source] DgraphError),

    /// Parse, mutate or commit failure during a bulk load
    #[error("Load error: {0}")]
    Load(#[source] DgraphError),

    /// Lookup or commit failure during a deletion
    #[error("Delete error: {0}")]
    Delete(#[source] DgraphError),

    /// Malformed query, parameter mismatch or undecodable result
    #[error("Query error: {0}")]
    Query(#[source] DgraphError),

    /// Drop-all rejected by the server or transport
    #[error("Maintenance error: {0}")]
    Maintenance(#[source] DgraphError),

    /// Failure of a transaction driven directly through [`crate::Txn`]
    #[error("Transaction error: {0}")]
    Transaction(#[from] DgraphError),
}

impl Error {
    /// The underlying cause, whatever operation failed
    pub fn cause(&self) -> &DgraphError {
        match self {
            Error::Connection(e)
            | Error::Schema(e)
            | Error::Load(e)
            | Error::Delete(e)
            | Error::Query(e)
            | Error::Maintenance(e)
            | Error::Transaction(e) => e,
        }
    }

    /// True when the failure was a commit-time conflict. The caller must retry
    /// the whole read-decide-mutate sequence, not only the commit.
    pub fn is_aborted(&self) -> bool {
        matches!(self.cause(), DgraphError::Aborted(_))
    }
}

/// Underlying cause of a failed request
#[derive(Error, Debug)]
pub enum DgraphError {
    /// HTTP-level failure, including per-call timeouts
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status without a decodable error envelope
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Error envelope returned by the alpha
    #[error("server rejected request ({code}): {message}")]
    Server { code: String, message: String },

    /// Commit-time conflict with a concurrent transaction
    #[error("transaction aborted: {0}")]
    Aborted(String),

    /// Local validation failure; nothing was sent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Mutation attempted on a read-only transaction
    #[error("transaction is read-only")]
    ReadOnly,

    /// Operation attempted after commit or discard
    #[error("transaction already {0}")]
    Finished(&'static str),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DgraphError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DgraphError::InvalidInput(msg.into())
    }
}
