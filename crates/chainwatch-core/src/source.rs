//! The `NotificationSource` trait — boundary to the node's pub/sub feed.

use async_trait::async_trait;

use crate::error::SourceError;

/// A subscribed feed of multipart notification messages.
///
/// The bridge owns its source exclusively and drives it one message at a
/// time, so implementations need no internal synchronization.
#[async_trait]
pub trait NotificationSource: Send {
    /// Wait for the next multipart message. Each element is one frame.
    async fn recv(&mut self) -> Result<Vec<Vec<u8>>, SourceError>;

    /// Tear down the subscription. Called once on shutdown; `recv` must
    /// return [`SourceError::Closed`] afterwards.
    async fn close(&mut self);
}
