//! Notification topics and multipart message decoding.
//!
//! The node publishes multipart messages: the first frame names the topic,
//! the second carries the payload, and the final frame carries an optional
//! 4-byte little-endian sequence number. The sequence is derived once per
//! message, whatever the topic.

use std::fmt;

use tracing::debug;

/// Serialized length of a block header; raw block previews are truncated
/// to this many bytes.
pub const BLOCK_HEADER_LEN: usize = 80;

/// The four notification topics the bridge subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Hash of a newly connected block.
    HashBlock,
    /// Hash of a transaction accepted to the mempool or mined.
    HashTx,
    /// Raw bytes of a newly connected block.
    RawBlock,
    /// Raw bytes of a transaction.
    RawTx,
}

impl Topic {
    /// Every topic, in subscription order.
    pub const ALL: [Topic; 4] = [Self::HashBlock, Self::HashTx, Self::RawBlock, Self::RawTx];

    /// Parse a topic frame. Unrecognized topics yield `None`; the caller
    /// drops the message without logging.
    pub fn from_frame(frame: &[u8]) -> Option<Self> {
        match frame {
            b"hashblock" => Some(Self::HashBlock),
            b"hashtx" => Some(Self::HashTx),
            b"rawblock" => Some(Self::RawBlock),
            b"rawtx" => Some(Self::RawTx),
            _ => None,
        }
    }

    /// Wire name, as subscribed on the socket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HashBlock => "hashblock",
            Self::HashTx => "hashtx",
            Self::RawBlock => "rawblock",
            Self::RawTx => "rawtx",
        }
    }

}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Correlation key derived from a message's trailing sequence frame.
///
/// Messages whose trailing frame is not exactly 4 bytes all share the
/// `"Unknown"` sentinel key and are treated as correlated by default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceKey(String);

impl SequenceKey {
    /// Sentinel used when no valid sequence number is present.
    pub const UNKNOWN: &'static str = "Unknown";

    /// Derive the key from the final frame of a multipart message: a
    /// 4-byte frame is read as a little-endian u32 and stringified; any
    /// other length degrades to the sentinel.
    pub fn from_frame(frame: &[u8]) -> Self {
        match <[u8; 4]>::try_from(frame) {
            Ok(bytes) => Self(u32::from_le_bytes(bytes).to_string()),
            Err(_) => Self(Self::UNKNOWN.to_string()),
        }
    }

    /// `true` if this is the shared sentinel rather than a real sequence
    /// number.
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One decoded notification, ready for correlation.
#[derive(Debug, Clone)]
pub struct Notification {
    pub topic: Topic,
    pub body: Vec<u8>,
    pub sequence: SequenceKey,
}

impl Notification {
    /// Decode a multipart message.
    ///
    /// Returns `None` for messages with fewer than two frames or an
    /// unrecognized topic. In a two-frame message the body frame doubles
    /// as the sequence candidate, matching the publisher's framing.
    pub fn decode(frames: &[Vec<u8>]) -> Option<Self> {
        let [topic_frame, body_frame, ..] = frames else {
            return None;
        };
        let topic = Topic::from_frame(topic_frame)?;
        let sequence = SequenceKey::from_frame(frames.last()?);
        Some(Self {
            topic,
            body: body_frame.clone(),
            sequence,
        })
    }

    /// Emit the per-message observability record: topic, sequence and a
    /// hex preview of the body, truncated to the header for raw blocks.
    pub fn log_received(&self) {
        let preview = match self.topic {
            Topic::RawBlock => hex::encode(&self.body[..self.body.len().min(BLOCK_HEADER_LEN)]),
            _ => hex::encode(&self.body),
        };
        debug!(
            topic = %self.topic,
            sequence = %self.sequence,
            payload = %preview,
            "notification received"
        );
    }

    /// Hex-encoded body, the form transaction ids are carried in.
    pub fn body_hex(&self) -> String {
        hex::encode(&self.body)
    }
}
