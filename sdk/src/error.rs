//! Error types for the SDK.
//!
//! Every fallible operation returns [`Error`]. None of these are transient:
//! each one means the current construction, compilation or call is aborted
//! and the caller has to fix its input.

use thiserror::Error;

use crate::crypto::public_key::PublicKey;
use crate::network::rpc::RpcError;
use crate::transaction::codec::CodecError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed base58, wrong decoded length, or a value too large for 32 bytes.
    #[error("invalid public key input: {0}")]
    InvalidPublicKey(String),

    /// Imported secret key is not exactly 64 bytes.
    #[error("bad secret key size: expected 64 bytes, got {0}")]
    InvalidSecretKey(usize),

    /// Signature bytes are not a 64-byte ed25519 signature.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The mnemonic phrase could not be parsed or generated.
    #[error("mnemonic error: {0}")]
    Mnemonic(#[from] coins_bip39::MnemonicError),

    /// Requested mnemonic entropy is not one of 128, 160, 192, 224, 256 bits.
    #[error("unsupported mnemonic strength: {0} bits")]
    InvalidMnemonicStrength(usize),

    /// Derivation path is malformed or contains a non-hardened segment.
    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    /// Binary encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// NFT metadata or a wire transaction could not be serialized to JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// `Transaction::add` was called without any instruction.
    #[error("no instructions")]
    EmptyInstructionList,

    /// `compile` was called before any signer was registered.
    #[error("no signers present in the transaction")]
    NoSigners,

    /// An instruction's designated signer was never registered.
    #[error("signer {0} is not present")]
    MissingSigner(PublicKey),

    /// The node answered with a structured JSON-RPC error.
    #[error("{context}: {source}")]
    Rpc {
        /// Which call failed, e.g. `Failed to get wallet state`.
        context: String,
        /// The error object returned by the node.
        source: RpcError,
    },

    /// The RPC channel itself failed before producing a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with a result the SDK could not interpret.
    #[error("unexpected RPC response: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_signer_names_the_key() {
        let pk = PublicKey::from_u64(7);
        let err = Error::MissingSigner(pk);
        assert_eq!(err.to_string(), format!("signer {} is not present", pk));
    }

    #[test]
    fn rpc_error_carries_context() {
        let err = Error::Rpc {
            context: "Failed to get leader".to_string(),
            source: RpcError {
                code: serde_json::json!(-32000),
                message: "node is syncing".to_string(),
                data: None,
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to get leader: "));
        assert!(msg.contains("node is syncing"));
    }
}
