//! # JSON-RPC Envelope
//!
//! Request/response types for the Deenair node API and the [`RpcChannel`]
//! trait that moves them. The SDK ships no HTTP client: plug in whatever
//! transport you like (and put rate-limit retries there).
//!
//! ## Method Index
//!
//! | Method            | Params              | Description                      |
//! |-------------------|---------------------|----------------------------------|
//! | `GetBlock`        | `{blk}` or `{}`     | Block by number, or the latest   |
//! | `GetNodeList`     | `[]`                | Registered nodes                 |
//! | `GetLeader`       | `[]`                | Current round leader             |
//! | `GetWalletState`  | `{wallet}`          | Balance and last transaction     |
//! | `GetWalletTrxs`   | `{wallet}`          | Transaction history of a wallet  |
//! | `GetTrxInfo`      | `{trxid}`           | Single transaction               |
//! | `NftGetColl`      | `{coll}`            | Token ids in an NFT collection   |
//! | `NftGetToken`     | `{token}`           | NFT details                      |
//! | `FtGetToken`      | `{token}`           | Fungible token details           |
//! | `FtGetTokenList`  | `[]`                | All fungible token ids           |
//! | `NewTrx`          | wire transaction    | Submit a compiled transaction    |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::JSONRPC_VERSION;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// RPC Method Enumeration
// ---------------------------------------------------------------------------

/// Node API methods. Serialized with the node's own names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RpcMethod {
    #[serde(rename = "GetBlock")]
    GetBlock,
    #[serde(rename = "GetNodeList")]
    GetNodeList,
    #[serde(rename = "GetLeader")]
    GetLeader,
    #[serde(rename = "GetWalletState")]
    GetWalletState,
    #[serde(rename = "GetWalletTrxs")]
    GetWalletTransactions,
    #[serde(rename = "GetTrxInfo")]
    GetTransaction,
    #[serde(rename = "NftGetColl")]
    GetNftCollection,
    #[serde(rename = "NftGetToken")]
    GetNft,
    #[serde(rename = "FtGetToken")]
    GetFt,
    #[serde(rename = "FtGetTokenList")]
    GetFtList,
    #[serde(rename = "NewTrx")]
    NewTransaction,
}

impl RpcMethod {
    /// Method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            RpcMethod::GetBlock => "GetBlock",
            RpcMethod::GetNodeList => "GetNodeList",
            RpcMethod::GetLeader => "GetLeader",
            RpcMethod::GetWalletState => "GetWalletState",
            RpcMethod::GetWalletTransactions => "GetWalletTrxs",
            RpcMethod::GetTransaction => "GetTrxInfo",
            RpcMethod::GetNftCollection => "NftGetColl",
            RpcMethod::GetNft => "NftGetToken",
            RpcMethod::GetFt => "FtGetToken",
            RpcMethod::GetFtList => "FtGetTokenList",
            RpcMethod::NewTransaction => "NewTrx",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RPC Request / Response
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Always "2.0".
    pub jsonrpc: String,
    /// Random UUID v4, echoed back by the node.
    pub id: String,
    pub method: RpcMethod,
    /// Object or array, depending on the method.
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    /// Builds a request with a fresh random id.
    pub fn new(method: RpcMethod, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Uuid::new_v4().to_string(),
            method,
            params,
        }
    }
}

/// A JSON-RPC 2.0 response.
///
/// A conforming node sets exactly one of `result` or `error`. A `null`
/// result deserializes as `None` and is a legitimate answer for some
/// methods (e.g. an unknown block).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    /// Creates a successful response.
    pub fn success(id: impl Into<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            result: Some(result),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(id: impl Into<Value>, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            result: None,
            error: Some(error),
        }
    }

    /// Splits the response into its result, turning a structured error into
    /// [`Error::Rpc`] labelled with `context`.
    pub fn into_result(self, context: impl Into<String>) -> Result<Value> {
        match self.error {
            Some(source) => Err(Error::Rpc {
                context: context.into(),
                source,
            }),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

// ---------------------------------------------------------------------------
// RPC Errors
// ---------------------------------------------------------------------------

/// Error object returned by the node.
///
/// The node is not consistent about the type of `code`, so it is kept as raw
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct RpcError {
    pub code: Value,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: impl Into<Value>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Moves a request to a node and brings back its parsed response.
///
/// Implementations own the transport: endpoints, keep-alive, timeouts and
/// retrying rate-limited calls. A transport failure should be reported as
/// [`Error::Transport`]; a structured JSON-RPC error belongs in
/// [`RpcResponse::error`].
#[async_trait]
pub trait RpcChannel: Send + Sync {
    async fn call(&self, request: RpcRequest) -> Result<RpcResponse>;
}

#[async_trait]
impl<C: RpcChannel + ?Sized> RpcChannel for Arc<C> {
    async fn call(&self, request: RpcRequest) -> Result<RpcResponse> {
        (**self).call(request).await
    }
}

#[async_trait]
impl<C: RpcChannel + ?Sized> RpcChannel for Box<C> {
    async fn call(&self, request: RpcRequest) -> Result<RpcResponse> {
        (**self).call(request).await
    }
}
