// Copyright (c) 2026 Deenair SDK Contributors. MIT License.
// See LICENSE for details.

//! # Deenair SDK
//!
//! Client-side transaction construction for the Deenair validator network:
//! build typed operations, encode them byte-for-byte the way validators parse
//! them, sign each one with the right key, and hand the result to a node.
//!
//! ## Architecture
//!
//! - **crypto**: 32-byte identifiers, ed25519 keypairs, mnemonic derivation,
//!   signatures.
//! - **transaction**: Messages, the binary codec, instructions, the
//!   transaction compiler and the JSON wire form.
//! - **program**: `SystemProgram` builders for every operation kind.
//! - **network**: JSON-RPC envelope, the channel trait, and a typed
//!   `Connection` over it.
//! - **config**: Protocol constants.
//! - **error**: The crate-wide error enum.
//!
//! ## Quick tour
//!
//! ```rust,no_run
//! use deenair_sdk::crypto::KeyPair;
//! use deenair_sdk::program::{SystemProgram, TransferParams};
//! use deenair_sdk::transaction::Transaction;
//!
//! # fn main() -> deenair_sdk::Result<()> {
//! let payer = KeyPair::from_mnemonic(
//!     "loud refuse inner diamond census polar swear enhance shift knock fresh disease",
//!     None,
//! )?;
//! let ix = SystemProgram::now().transfer(TransferParams {
//!     payer: payer.public_key(),
//!     receiver: deenair_sdk::program::FEE_RECEIVER,
//!     amount: 10_000,
//!     comment: "test".into(),
//! })?;
//!
//! let mut tx = Transaction::new();
//! tx.add([ix])?;
//! tx.add_signers([payer]);
//! let wire = tx.compile()?.into_wire();
//! println!("{}", wire.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! Nothing in this crate performs I/O except through a caller-supplied
//! [`network::RpcChannel`].

pub mod config;
pub mod crypto;
pub mod error;
pub mod network;
pub mod program;
pub mod transaction;

pub use error::{Error, Result};
