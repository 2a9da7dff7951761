//! # Cryptographic Primitives
//!
//! Everything key-shaped lives here: the 32-byte [`PublicKey`] identifier,
//! ed25519 [`KeyPair`]s, mnemonic derivation, signatures and SHA-256.
//!
//! All of it wraps audited implementations (`ed25519-dalek`, `sha2`,
//! `hmac`, `coins-bip39`). The only protocol-specific logic is the SLIP-0010
//! walk and the 64-byte secret layout.

pub mod derivation;
pub mod hash;
pub mod keys;
pub mod public_key;
pub mod signatures;

pub use derivation::generate_mnemonic;
pub use hash::sha256;
pub use keys::KeyPair;
pub use public_key::PublicKey;
pub use signatures::{sign, verify, Signature};
