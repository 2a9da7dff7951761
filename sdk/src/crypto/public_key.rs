//! # Public Keys
//!
//! Every account, token, collection and fee receiver on the network is named
//! by a 32-byte identifier. Most of them are ed25519 public keys, but the
//! protocol does not care: token ids are SHA-256 digests and the fee receiver
//! is a vanity string that merely *looks* like a key.
//!
//! The textual form is base58 (Bitcoin alphabet). The binary form is always
//! exactly 32 bytes, left-padded with zeros when built from a shorter
//! big-endian magnitude.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::PUBLIC_KEY_LENGTH;
use crate::error::{Error, Result};

/// Next value handed out by [`PublicKey::unique`].
///
/// Process-scoped and non-cryptographic. Two processes will happily hand out
/// the same sequence, so never rely on it outside tests and fixtures.
static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A 32-byte on-chain identifier.
///
/// # Examples
///
/// ```
/// use deenair_sdk::crypto::PublicKey;
///
/// let pk: PublicKey = "11111111111111111111111111111111".parse().unwrap();
/// assert_eq!(pk.to_bytes(), [0u8; 32]);
/// assert_eq!(pk, PublicKey::default());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Wraps raw key bytes.
    pub const fn new(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Builds a key from a big-endian magnitude.
    ///
    /// Leading zero bytes are ignored and the remainder is left-padded to 32
    /// bytes, so `[0, 0, 5]` and `[5]` name the same key. Fails if the
    /// magnitude needs more than 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let first_nonzero = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        let magnitude = &bytes[first_nonzero..];
        if magnitude.len() > PUBLIC_KEY_LENGTH {
            return Err(Error::InvalidPublicKey(format!(
                "value needs {} bytes, maximum is {}",
                magnitude.len(),
                PUBLIC_KEY_LENGTH
            )));
        }
        let mut out = [0u8; PUBLIC_KEY_LENGTH];
        out[PUBLIC_KEY_LENGTH - magnitude.len()..].copy_from_slice(magnitude);
        Ok(Self(out))
    }

    /// Parses a base58 string. It must decode to exactly 32 bytes.
    pub fn from_base58(s: &str) -> Result<Self> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = decoded.as_slice().try_into().map_err(|_| {
            Error::InvalidPublicKey(format!(
                "decoded to {} bytes, expected {}",
                decoded.len(),
                PUBLIC_KEY_LENGTH
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Builds a key whose big-endian numeric value is `value`.
    pub fn from_u64(value: u64) -> Self {
        Self::from_u128(value as u128)
    }

    /// Builds a key whose big-endian numeric value is `value`.
    pub fn from_u128(value: u128) -> Self {
        let mut out = [0u8; PUBLIC_KEY_LENGTH];
        out[PUBLIC_KEY_LENGTH - 16..].copy_from_slice(&value.to_be_bytes());
        Self(out)
    }

    /// Returns a fresh, process-sequential key for tests and fixtures.
    ///
    /// The first call returns the key with numeric value 1, the next 2, and
    /// so on. Not random, not secret, not unique across processes.
    pub fn unique() -> Self {
        Self::from_u64(UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw 32 bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Base58 representation.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_base58(&s).map_err(serde::de::Error::custom)
    }
}
