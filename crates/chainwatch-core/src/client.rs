//! The `NodeRpc` trait — boundary to the node's JSON-RPC interface.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RpcError;

/// The two lookup operations the resolver needs from a node.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`: the resolver holds one shared
/// handle (`Arc<dyn NodeRpc>`) and reuses it sequentially across calls.
#[async_trait]
pub trait NodeRpc: Send + Sync + 'static {
    /// `getrawtransaction <txid> <verbose>` — transaction detail from the
    /// node's transaction index or mempool.
    async fn get_raw_transaction(&self, txid: &str, verbose: bool) -> Result<Value, RpcError>;

    /// `gettransaction <txid>` — wallet-scoped transaction detail, the
    /// fallback for transactions the index cannot serve.
    async fn get_transaction(&self, txid: &str) -> Result<Value, RpcError>;

    /// Endpoint identifier for logs.
    fn url(&self) -> &str;
}
