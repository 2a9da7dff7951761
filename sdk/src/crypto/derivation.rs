//! # Hierarchical Key Derivation
//!
//! Wallet keys are derived from a BIP-39 mnemonic with the SLIP-0010 scheme
//! for ed25519. Ed25519 has no public-key derivation, so every path segment
//! must be hardened (`44'`, not `44`).
//!
//! ```text
//! phrase --bip39--> 64-byte seed --HMAC("ed25519 seed")--> master (k, c)
//!        --hardened child--> ... --> wallet scalar k
//! ```
//!
//! The mnemonic parsing, checksum and PBKDF2 stretching come from
//! `coins-bip39`; the SLIP-0010 walk is a handful of HMAC-SHA512 calls and
//! lives here.

use coins_bip39::{English, Mnemonic};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use sha2::Sha512;

use crate::config::{MNEMONIC_STRENGTHS, PRIVATE_KEY_LENGTH};
use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for the SLIP-0010 ed25519 master node.
const ED25519_CURVE_KEY: &[u8] = b"ed25519 seed";

/// Offset that marks a child index as hardened.
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A node in the derivation tree: private scalar plus chain code.
struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl ExtendedKey {
    fn from_hmac(output: [u8; 64]) -> Self {
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&output[..32]);
        chain_code.copy_from_slice(&output[32..]);
        Self { key, chain_code }
    }

    fn master(seed: &[u8]) -> Result<Self> {
        Ok(Self::from_hmac(hmac_sha512(ED25519_CURVE_KEY, &[seed])?))
    }

    /// Hardened child: `HMAC(c, 0x00 || k || ser32(index))`.
    fn child(&self, index: u32) -> Result<Self> {
        let output = hmac_sha512(&self.chain_code, &[&[0u8], &self.key, &index.to_be_bytes()])?;
        Ok(Self::from_hmac(output))
    }
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| Error::InvalidDerivationPath(e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Parses `m/44'/3566'/...` into raw (already offset) child indices.
///
/// Rejects anything that is not rooted at `m`, any empty or non-numeric
/// segment, and any segment without the hardened marker.
pub fn parse_path(path: &str) -> Result<Vec<u32>> {
    let mut segments = path.split('/');
    if segments.next() != Some("m") {
        return Err(Error::InvalidDerivationPath(format!("{path}: must start with 'm'")));
    }

    segments
        .map(|segment| {
            let digits = segment.strip_suffix('\'').ok_or_else(|| {
                Error::InvalidDerivationPath(format!("{path}: segment '{segment}' is not hardened"))
            })?;
            let index: u32 = digits.parse().map_err(|_| {
                Error::InvalidDerivationPath(format!("{path}: segment '{segment}' is not a number"))
            })?;
            if index >= HARDENED_OFFSET {
                return Err(Error::InvalidDerivationPath(format!(
                    "{path}: segment '{segment}' is out of range"
                )));
            }
            Ok(index + HARDENED_OFFSET)
        })
        .collect()
}

/// Derives the 32-byte ed25519 private scalar at `path` from a BIP-39 seed.
pub fn derive_private_key(seed: &[u8], path: &str) -> Result<[u8; PRIVATE_KEY_LENGTH]> {
    let indices = parse_path(path)?;
    let mut node = ExtendedKey::master(seed)?;
    for index in indices {
        node = node.child(index)?;
    }
    Ok(node.key)
}

/// Turns an English mnemonic phrase into its 64-byte BIP-39 seed (empty
/// passphrase). The checksum word is validated.
pub fn mnemonic_to_seed(phrase: &str) -> Result<[u8; 64]> {
    let mnemonic = Mnemonic::<English>::new_from_phrase(phrase)?;
    Ok(mnemonic.to_seed(None)?)
}

/// Generates a fresh English mnemonic with `strength` bits of entropy.
///
/// 128, 160, 192, 224 and 256 bits give 12, 15, 18, 21 and 24 words.
pub fn generate_mnemonic(strength: usize) -> Result<String> {
    if !MNEMONIC_STRENGTHS.contains(&strength) {
        return Err(Error::InvalidMnemonicStrength(strength));
    }
    // 1 checksum bit per 32 entropy bits, 11 bits per word.
    let word_count = (strength + strength / 32) / 11;
    let mnemonic = Mnemonic::<English>::new_with_count(&mut OsRng, word_count)?;
    Ok(mnemonic.to_phrase())
}
