//! chainwatch-core — foundation traits and types for Chainwatch.
//!
//! # Overview
//!
//! Chainwatch bridges a node's ZeroMQ notification feed to its JSON-RPC
//! interface: multipart notifications are decoded, the hash and raw-body
//! fragments of each transaction are paired by sequence number, and every
//! completed pair is resolved into a full transaction record through an
//! ordered fallback of remote lookups. The core crate defines:
//!
//! - [`Notification`] / [`Topic`] / [`SequenceKey`] — multipart message decoding
//! - [`TxCorrelator`] — the sequence-keyed correlation map
//! - [`TxResolver`] — ordered-fallback resolution over [`NodeRpc`]
//! - [`Bridge`] — the cooperative single-worker run loop
//! - [`NotificationSource`] / [`NodeRpc`] — boundary traits for the two
//!   external collaborators (the pub/sub socket and the RPC client)

pub mod bridge;
pub mod client;
pub mod config;
pub mod correlator;
pub mod error;
pub mod notification;
pub mod request;
pub mod resolver;
pub mod source;

pub use bridge::{Bridge, BridgeState};
pub use client::NodeRpc;
pub use config::BridgeConfig;
pub use correlator::{Fragment, PendingTx, TxCorrelator};
pub use error::{ResolveError, RpcError, SourceError};
pub use notification::{Notification, SequenceKey, Topic, BLOCK_HEADER_LEN};
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use resolver::{LookupMethod, ResolvedTx, TxResolver};
pub use source::NotificationSource;
