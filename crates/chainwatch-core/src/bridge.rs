//! The bridge run loop — decode, correlate and resolve, one notification
//! end-to-end at a time.
//!
//! The loop is a single cooperative worker: the next receive is not
//! issued until the previous message has been fully processed, including
//! any remote lookup. The correlation map therefore has exactly one
//! writer and needs no locking.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::client::NodeRpc;
use crate::correlator::{Fragment, TxCorrelator};
use crate::error::SourceError;
use crate::notification::{Notification, Topic};
use crate::resolver::TxResolver;
use crate::source::NotificationSource;

/// Lifecycle state of the bridge loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Processing notifications.
    Running,
    /// Shutdown requested; no further cycles are scheduled.
    Stopping,
}

impl fmt::Display for BridgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopping => write!(f, "stopping"),
        }
    }
}

/// Bridges a node's notification feed to resolved transaction records.
///
/// Owns the source subscription, the correlation map and the resolver's
/// RPC handle for the lifetime of the process.
pub struct Bridge<S> {
    source: S,
    correlator: TxCorrelator,
    resolver: TxResolver,
    state: BridgeState,
}

impl<S: NotificationSource> Bridge<S> {
    /// Build a bridge over an established source subscription and RPC
    /// handle.
    pub fn new(source: S, rpc: Arc<dyn NodeRpc>) -> Self {
        Self {
            source,
            correlator: TxCorrelator::new(),
            resolver: TxResolver::new(rpc),
            state: BridgeState::Running,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// The correlation map (outstanding fragment pairs).
    pub fn correlator(&self) -> &TxCorrelator {
        &self.correlator
    }

    /// Drive the pipeline until `shutdown` completes or the source
    /// closes. Receive failures are absorbed and the loop continues; a
    /// bad message or failed resolution never ends the process. The
    /// source is torn down on the way out whichever path ends the loop.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        info!(state = %self.state, "bridge started");

        loop {
            let frames = tokio::select! {
                _ = &mut shutdown => {
                    self.state = BridgeState::Stopping;
                    info!(state = %self.state, "shutdown requested");
                    break;
                }
                msg = self.source.recv() => match msg {
                    Ok(frames) => frames,
                    Err(SourceError::Closed) => {
                        self.state = BridgeState::Stopping;
                        error!(state = %self.state, "notification source closed");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "receive failed");
                        continue;
                    }
                },
            };
            self.handle_message(&frames).await;
        }

        self.source.close().await;
        info!("bridge stopped");
    }

    /// Run one multipart message through decode → correlate → resolve.
    pub async fn handle_message(&mut self, frames: &[Vec<u8>]) {
        let Some(note) = Notification::decode(frames) else {
            return;
        };
        note.log_received();

        let Notification {
            topic,
            body,
            sequence,
        } = note;
        let fragment = match topic {
            Topic::HashTx => Fragment::Hash(hex::encode(&body)),
            Topic::RawTx => Fragment::Body(body),
            // block topics are log-only and never reach the correlator
            Topic::HashBlock | Topic::RawBlock => return,
        };

        if self.correlator.merge(sequence.clone(), fragment) {
            if let Some(tx) = self.correlator.take(&sequence) {
                // outcome already logged; the record is gone either way
                let _ = self.resolver.resolve(&tx).await;
            }
        }
    }
}
