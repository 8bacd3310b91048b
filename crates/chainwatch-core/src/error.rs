//! Error types for the chainwatch pipeline.

use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors raised by a notification source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connecting or subscribing to the publisher endpoint failed.
    #[error("Connect error: {0}")]
    Connect(String),

    /// Receiving a multipart message failed.
    #[error("Receive error: {0}")]
    Recv(String),

    /// The source is closed and will yield no further messages.
    #[error("Source closed")]
    Closed,
}

/// Errors that can occur during a remote lookup.
#[derive(Debug, Error)]
pub enum RpcError {
    /// HTTP request failed (connection refused, bad status, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Error object returned by the node, including "not found"
    /// (`-5`, no such mempool or blockchain transaction).
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Terminal outcome of a resolution that produced no transaction.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Every method in the fallback chain failed; the record is dropped.
    #[error("All {attempts} lookup methods failed for txid {txid}")]
    Exhausted { txid: String, attempts: usize },

    /// The record carries no transaction id to look up.
    #[error("Record has no transaction id")]
    MissingHash,
}
