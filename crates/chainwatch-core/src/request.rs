//! JSON-RPC wire types for the node interface.
//!
//! The node speaks classic JSON-RPC over HTTP POST: positional parameters,
//! numeric request ids, and error objects with node-specific codes
//! (e.g. `-5` for an unknown transaction). Error responses may arrive with
//! a non-2xx HTTP status and still carry a well-formed error body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC request with positional parameters.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    /// Build a request for `method` with positional `params`.
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

/// Error object returned by the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON-RPC error {}: {}", self.code, self.message)
    }
}

/// A JSON-RPC response envelope. The node sets exactly one of
/// `result`/`error`; both are optional here so malformed envelopes
/// degrade to a null result instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl JsonRpcResponse {
    /// Unwrap the result value or surface the node's error object.
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}
