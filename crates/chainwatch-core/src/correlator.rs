//! Pairs the hash and raw-body fragments of a transaction by sequence key.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use crate::notification::SequenceKey;

/// One half of a transaction notification pair.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// Hex-encoded transaction id from a `hashtx` notification.
    Hash(String),
    /// Raw transaction bytes from a `rawtx` notification.
    Body(Vec<u8>),
}

/// A partially assembled transaction, one per outstanding sequence key.
#[derive(Debug, Clone, Default)]
pub struct PendingTx {
    pub hash: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl PendingTx {
    /// A record is complete once both fragments have arrived.
    pub fn is_complete(&self) -> bool {
        self.hash.is_some() && self.body.is_some()
    }
}

impl fmt::Display for PendingTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hash = self.hash.as_deref().unwrap_or("?");
        match &self.body {
            Some(body) => write!(f, "Tx:{hash}: {}", hex::encode(body)),
            None => write!(f, "Tx:{hash}: ?"),
        }
    }
}

/// Correlation map from sequence key to pending transaction.
///
/// The bridge loop is the sole owner and mutator, so there is no internal
/// locking; completeness is checked on every merge and a completed record
/// must be [`take`](Self::take)n out before the next message is processed.
#[derive(Debug, Default)]
pub struct TxCorrelator {
    pending: HashMap<SequenceKey, PendingTx>,
}

impl TxCorrelator {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Merge a fragment into the record for `key`, creating the record on
    /// first contact. A repeated fragment of the same kind overwrites the
    /// previous value. Returns `true` when the record is now complete.
    pub fn merge(&mut self, key: SequenceKey, fragment: Fragment) -> bool {
        if key.is_unknown() && self.pending.contains_key(&key) {
            // Every message without a sequence number lands here; two
            // unrelated transactions can pair up through this slot.
            warn!(key = %key, "merging fragment into shared sentinel record");
        }
        let record = self.pending.entry(key).or_default();
        match fragment {
            Fragment::Hash(hash) => record.hash = Some(hash),
            Fragment::Body(body) => record.body = Some(body),
        }
        record.is_complete()
    }

    /// Remove and return the record for `key`. This is the terminal
    /// transition: a key that recurs later starts a brand-new record.
    pub fn take(&mut self, key: &SequenceKey) -> Option<PendingTx> {
        self.pending.remove(key)
    }

    /// Number of outstanding records.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// `true` if a record exists for `key`.
    pub fn contains(&self, key: &SequenceKey) -> bool {
        self.pending.contains_key(key)
    }
}
