//! `ZmqSource` — concrete `NotificationSource` over a ZeroMQ SUB socket.

use async_trait::async_trait;
use tracing::{debug, info};
use zeromq::{Socket, SocketRecv, SubSocket};

use chainwatch_core::error::SourceError;
use chainwatch_core::notification::Topic;
use chainwatch_core::source::NotificationSource;

/// ZeroMQ subscriber connected to a node's notification publisher.
///
/// The socket is subscribed to every topic in [`Topic::ALL`] at connect
/// time; the publisher delivers each notification as one multipart
/// message (topic frame, payload frame, sequence frame).
pub struct ZmqSource {
    endpoint: String,
    socket: Option<SubSocket>,
}

impl ZmqSource {
    /// Connect to `endpoint` (e.g. `tcp://127.0.0.1:28332`) and subscribe
    /// to the four notification topics.
    pub async fn connect(endpoint: impl Into<String>) -> Result<Self, SourceError> {
        let endpoint = endpoint.into();
        let mut socket = SubSocket::new();
        socket
            .connect(&endpoint)
            .await
            .map_err(|e| SourceError::Connect(e.to_string()))?;
        for topic in Topic::ALL {
            socket
                .subscribe(topic.as_str())
                .await
                .map_err(|e| SourceError::Connect(e.to_string()))?;
        }
        info!(endpoint = %endpoint, "subscribed to notification feed");

        Ok(Self {
            endpoint,
            socket: Some(socket),
        })
    }

    /// Publisher endpoint this source is connected to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotificationSource for ZmqSource {
    async fn recv(&mut self) -> Result<Vec<Vec<u8>>, SourceError> {
        let socket = self.socket.as_mut().ok_or(SourceError::Closed)?;
        let message = socket
            .recv()
            .await
            .map_err(|e| SourceError::Recv(e.to_string()))?;
        Ok(message
            .into_vec()
            .into_iter()
            .map(|frame| frame.to_vec())
            .collect())
    }

    async fn close(&mut self) {
        if let Some(socket) = self.socket.take() {
            socket.close().await;
            debug!(endpoint = %self.endpoint, "notification socket closed");
        }
    }
}
