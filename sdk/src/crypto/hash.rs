//! # Hashing
//!
//! SHA-256 is the only hash the protocol uses directly: NFT token ids are the
//! digest of the metadata JSON. Ed25519 does its own SHA-512 internally.

use sha2::{Digest, Sha256};

/// SHA-256 of `data` as a fixed-size array.
///
/// # Example
///
/// ```
/// use deenair_sdk::crypto::sha256;
///
/// let digest = sha256(b"deenair");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
