//! Resolves a completed fragment pair into a full transaction record.
//!
//! Lookup methods are tried in a fixed order and the first success wins.
//! A failed attempt is logged and absorbed; only the exhaustion of the
//! whole chain surfaces, as an error log plus a typed outcome.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::client::NodeRpc;
use crate::correlator::PendingTx;
use crate::error::{ResolveError, RpcError};

/// A single remote lookup strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMethod {
    /// `getrawtransaction` with verbose output — serves any indexed or
    /// mempool transaction.
    RawTransactionVerbose,
    /// `gettransaction` — wallet-scoped lookup for transactions the
    /// node's index cannot serve.
    WalletTransaction,
}

impl LookupMethod {
    /// The ordered fallback chain, tried front to back.
    pub const FALLBACK_CHAIN: [LookupMethod; 2] =
        [Self::RawTransactionVerbose, Self::WalletTransaction];

    /// RPC method name on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RawTransactionVerbose => "getrawtransaction",
            Self::WalletTransaction => "gettransaction",
        }
    }
}

impl fmt::Display for LookupMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully resolved transaction. Exists to be logged, never stored.
#[derive(Debug, Clone)]
pub struct ResolvedTx {
    /// Hex transaction id the lookup was keyed on.
    pub txid: String,
    /// The method that produced the result.
    pub method: LookupMethod,
    /// Transaction detail as returned by the node.
    pub details: Value,
}

/// Turns completed fragment pairs into authoritative transaction records
/// via an ordered fallback of remote lookups.
pub struct TxResolver {
    rpc: Arc<dyn NodeRpc>,
}

impl TxResolver {
    pub fn new(rpc: Arc<dyn NodeRpc>) -> Self {
        Self { rpc }
    }

    /// Attempt each method in [`LookupMethod::FALLBACK_CHAIN`] until one
    /// succeeds. Emits exactly one resolution-stage log entry: the
    /// resolved record on success, "cannot decode transaction" on
    /// exhaustion. The caller discards the record either way.
    pub async fn resolve(&self, tx: &PendingTx) -> Result<ResolvedTx, ResolveError> {
        let Some(txid) = tx.hash.as_deref() else {
            error!(tx = %tx, "cannot decode transaction");
            return Err(ResolveError::MissingHash);
        };

        for method in LookupMethod::FALLBACK_CHAIN {
            match self.lookup(method, txid).await {
                Ok(details) => {
                    debug!(
                        tx = %tx,
                        method = %method,
                        transaction = %details,
                        "transaction resolved"
                    );
                    return Ok(ResolvedTx {
                        txid: txid.to_string(),
                        method,
                        details,
                    });
                }
                Err(e) => {
                    debug!(
                        method = %method,
                        txid,
                        url = self.rpc.url(),
                        error = %e,
                        "lookup attempt failed"
                    );
                }
            }
        }

        error!(tx = %tx, "cannot decode transaction");
        Err(ResolveError::Exhausted {
            txid: txid.to_string(),
            attempts: LookupMethod::FALLBACK_CHAIN.len(),
        })
    }

    async fn lookup(&self, method: LookupMethod, txid: &str) -> Result<Value, RpcError> {
        match method {
            LookupMethod::RawTransactionVerbose => self.rpc.get_raw_transaction(txid, true).await,
            LookupMethod::WalletTransaction => self.rpc.get_transaction(txid).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use crate::request::JsonRpcError;

    #[derive(Default)]
    struct MockRpc {
        raw_calls: AtomicU32,
        wallet_calls: AtomicU32,
        fail_raw: bool,
        fail_wallet: bool,
    }

    fn not_found() -> RpcError {
        RpcError::Rpc(JsonRpcError {
            code: -5,
            message: "No such mempool or blockchain transaction".into(),
            data: None,
        })
    }

    #[async_trait]
    impl NodeRpc for MockRpc {
        async fn get_raw_transaction(&self, txid: &str, verbose: bool) -> Result<Value, RpcError> {
            assert!(verbose);
            self.raw_calls.fetch_add(1, Ordering::Relaxed);
            if self.fail_raw {
                Err(not_found())
            } else {
                Ok(json!({ "txid": txid, "method": "raw" }))
            }
        }

        async fn get_transaction(&self, txid: &str) -> Result<Value, RpcError> {
            self.wallet_calls.fetch_add(1, Ordering::Relaxed);
            if self.fail_wallet {
                Err(not_found())
            } else {
                Ok(json!({ "txid": txid, "method": "wallet" }))
            }
        }

        fn url(&self) -> &str {
            "mock://node"
        }
    }

    fn complete_tx() -> PendingTx {
        PendingTx {
            hash: Some("abcd".into()),
            body: Some(vec![0xde, 0xad]),
        }
    }

    #[tokio::test]
    async fn first_method_success_short_circuits() {
        let rpc = Arc::new(MockRpc::default());
        let resolver = TxResolver::new(rpc.clone());

        let resolved = resolver.resolve(&complete_tx()).await.unwrap();
        assert_eq!(resolved.method, LookupMethod::RawTransactionVerbose);
        assert_eq!(resolved.txid, "abcd");
        assert_eq!(rpc.raw_calls.load(Ordering::Relaxed), 1);
        assert_eq!(rpc.wallet_calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn falls_back_to_wallet_lookup() {
        let rpc = Arc::new(MockRpc {
            fail_raw: true,
            ..Default::default()
        });
        let resolver = TxResolver::new(rpc.clone());

        let resolved = resolver.resolve(&complete_tx()).await.unwrap();
        assert_eq!(resolved.method, LookupMethod::WalletTransaction);
        assert_eq!(resolved.details["method"], "wallet");
        assert_eq!(rpc.raw_calls.load(Ordering::Relaxed), 1);
        assert_eq!(rpc.wallet_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn exhaustion_reports_every_attempt() {
        let rpc = Arc::new(MockRpc {
            fail_raw: true,
            fail_wallet: true,
            ..Default::default()
        });
        let resolver = TxResolver::new(rpc.clone());

        let err = resolver.resolve(&complete_tx()).await.unwrap_err();
        match err {
            ResolveError::Exhausted { txid, attempts } => {
                assert_eq!(txid, "abcd");
                assert_eq!(attempts, 2);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert_eq!(rpc.raw_calls.load(Ordering::Relaxed), 1);
        assert_eq!(rpc.wallet_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn record_without_hash_is_rejected() {
        let rpc = Arc::new(MockRpc::default());
        let resolver = TxResolver::new(rpc.clone());

        let tx = PendingTx {
            hash: None,
            body: Some(vec![1]),
        };
        let err = resolver.resolve(&tx).await.unwrap_err();
        assert!(matches!(err, ResolveError::MissingHash));
        assert_eq!(rpc.raw_calls.load(Ordering::Relaxed), 0);
    }
}
