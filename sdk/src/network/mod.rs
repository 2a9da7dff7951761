//! # Network Module
//!
//! Talking to a Deenair node.
//!
//! ## Architecture
//!
//! ```text
//! rpc.rs        - JSON-RPC 2.0 envelope, method names, the RpcChannel trait
//! types.rs      - Response payloads (blocks, wallets, transactions, tokens)
//! connection.rs - Typed async client over any RpcChannel
//! stakes.rs     - Stake aggregation from transaction history
//! ```
//!
//! The crate defines the channel but ships no transport. HTTP, retries on
//! rate limits, timeouts and keep-alive all belong to the channel
//! implementation.

pub mod connection;
pub mod rpc;
pub mod stakes;
pub mod types;

pub use connection::Connection;
pub use rpc::{RpcChannel, RpcError, RpcMethod, RpcRequest, RpcResponse};
pub use stakes::{compute_stakes, Stake};
pub use types::{
    Block, BlockRef, FtInfo, Leader, MessageType, NftInfo, NodeInfo, TransactionInfo,
    TransactionMessage, TransactionStatus, TransactionType, TransactionVote, WalletState,
};
