//! # Connection
//!
//! Typed client over an [`RpcChannel`]. Every method issues exactly one
//! request (`get_stakes` reuses `get_wallet_transactions`), deserializes the
//! result and labels any node error with the call that failed.
//!
//! Nothing is cached and nothing is retried.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

use super::rpc::{RpcChannel, RpcMethod, RpcRequest};
use super::stakes::{compute_stakes, Stake};
use super::types::{Block, BlockRef, FtInfo, Leader, NftInfo, NodeInfo, TransactionInfo, WalletState};
use crate::crypto::PublicKey;
use crate::error::{Error, Result};
use crate::transaction::{Transaction, WireTransaction};

/// A client bound to one node channel.
#[derive(Debug, Clone)]
pub struct Connection<C> {
    channel: C,
}

impl<C: RpcChannel> Connection<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: RpcMethod,
        params: Value,
        context: impl Into<String>,
    ) -> Result<T> {
        let request = RpcRequest::new(method, params);
        debug!(method = %method, id = %request.id, "rpc call");

        let response = self.channel.call(request).await?;
        let result = response.into_result(context)?;
        serde_json::from_value(result)
            .map_err(|e| Error::UnexpectedResponse(format!("{method}: {e}")))
    }

    /// A block by number, or the latest. `None` if the node has no such block.
    pub async fn get_block(&self, block: BlockRef) -> Result<Option<Block>> {
        let params = match block {
            BlockRef::Latest => json!({}),
            BlockRef::Number(n) => json!({ "blk": n.to_string() }),
        };
        self.request(RpcMethod::GetBlock, params, format!("Failed to get block {block}"))
            .await
    }

    pub async fn get_node_list(&self) -> Result<Vec<NodeInfo>> {
        self.request(RpcMethod::GetNodeList, json!([]), "Failed to get node list")
            .await
    }

    pub async fn get_leader(&self) -> Result<Leader> {
        self.request(RpcMethod::GetLeader, json!([]), "Failed to get leader")
            .await
    }

    pub async fn get_wallet_state(&self, wallet: &PublicKey) -> Result<WalletState> {
        self.request(
            RpcMethod::GetWalletState,
            json!({ "wallet": wallet.to_base58() }),
            "Failed to get wallet state",
        )
        .await
    }

    pub async fn get_wallet_transactions(&self, wallet: &PublicKey) -> Result<Vec<TransactionInfo>> {
        self.request(
            RpcMethod::GetWalletTransactions,
            json!({ "wallet": wallet.to_base58() }),
            format!("Failed to get transactions for wallet {wallet}"),
        )
        .await
    }

    pub async fn get_transaction(&self, transaction_id: &str) -> Result<TransactionInfo> {
        self.request(
            RpcMethod::GetTransaction,
            json!({ "trxid": transaction_id }),
            format!("Failed to get transaction {transaction_id}"),
        )
        .await
    }

    /// Stake per delegate, computed from the wallet's history as of now.
    pub async fn get_stakes(&self, wallet: &PublicKey) -> Result<BTreeMap<String, Stake>> {
        let transactions = self.get_wallet_transactions(wallet).await?;
        let now = Utc::now().timestamp_millis().max(0) as u64;
        Ok(compute_stakes(&transactions, now))
    }

    /// Token ids (base58) minted into `collection`.
    pub async fn get_nft_collection(&self, collection: &PublicKey) -> Result<Vec<String>> {
        self.request(
            RpcMethod::GetNftCollection,
            json!({ "coll": collection.to_base58() }),
            format!("Failed to get token IDs for collection {collection}"),
        )
        .await
    }

    pub async fn get_nft_info(&self, token: &PublicKey) -> Result<NftInfo> {
        self.request(
            RpcMethod::GetNft,
            json!({ "token": token.to_base58() }),
            format!("Failed to get token {token}"),
        )
        .await
    }

    pub async fn get_ft_info(&self, token: &PublicKey) -> Result<FtInfo> {
        self.request(
            RpcMethod::GetFt,
            json!({ "token": token.to_base58() }),
            format!("Failed to get token {token}"),
        )
        .await
    }

    /// All fungible token ids (base58).
    pub async fn get_ft_list(&self) -> Result<Vec<String>> {
        self.request(RpcMethod::GetFtList, json!([]), "Failed to get FT list")
            .await
    }

    /// Compiles `transaction` and submits it.
    pub async fn send_transaction(&self, transaction: Transaction) -> Result<Value> {
        let compiled = transaction.compile()?;
        self.send_compiled_transaction(compiled.wire()).await
    }

    /// Submits an already compiled transaction. Returns the node's answer
    /// as-is.
    pub async fn send_compiled_transaction(&self, transaction: &WireTransaction) -> Result<Value> {
        let params = serde_json::to_value(transaction)?;
        self.request(RpcMethod::NewTransaction, params, "Failed to create transaction")
            .await
    }
}
