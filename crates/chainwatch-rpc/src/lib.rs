//! chainwatch-rpc — HTTP JSON-RPC implementation of
//! [`NodeRpc`](chainwatch_core::NodeRpc), backed by `reqwest`.

pub mod client;

pub use client::{HttpClientConfig, HttpRpcClient};
