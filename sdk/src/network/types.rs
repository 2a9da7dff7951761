//! Response payloads returned by the node.
//!
//! The node reports nearly everything as strings (including numbers and
//! timestamps), so the fields stay strings here. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Which block `GetBlock` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockRef {
    #[default]
    Latest,
    Number(u64),
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockRef::Latest => f.write_str("latest"),
            BlockRef::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<u64> for BlockRef {
    fn from(n: u64) -> Self {
        BlockRef::Number(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Approved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Remittance,
    System,
}

/// Kind of a remittance message as reported in transaction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "emission")]
    Emission,
    #[serde(rename = "stake delegate")]
    StakeDelegate,
    #[serde(rename = "stake withdraw")]
    StakeWithdraw,
}

/// One message of a settled transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMessage {
    pub comment: String,
    pub payer: String,
    pub receiver: String,
    pub sign: String,
    /// Decimal amount.
    pub sum: String,
    /// Decimal milliseconds since the Unix epoch.
    pub time: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
}

/// Validator vote attached to a system transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionVote {
    pub author: String,
    pub block: String,
    pub round: String,
    pub sign: String,
    pub vote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub status: TransactionStatus,
    pub trxid: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msgs: Option<Vec<TransactionMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<Vec<TransactionVote>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub blk: String,
    pub blkid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trxs: Option<Vec<TransactionInfo>>,
    pub validator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub nodeid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub comment: String,
    #[serde(rename = "ip address")]
    pub ip_address: String,
    #[serde(rename = "ip port")]
    pub ip_port: String,
    pub nodeid: String,
    pub public: String,
    pub stake: String,
    pub storage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub balance: String,
    #[serde(rename = "last trx")]
    pub last_transaction: String,
    pub wallet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftInfo {
    pub coll: String,
    #[serde(rename = "last trx")]
    pub last_transaction: String,
    /// JSON document, still encoded.
    pub metadata: String,
    pub owner: String,
    pub token: String,
}

impl NftInfo {
    /// Parses the metadata document.
    pub fn metadata_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.metadata)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FtInfo {
    pub name: String,
    pub owner: String,
    pub token: String,
}
