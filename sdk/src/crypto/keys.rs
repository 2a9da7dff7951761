//! # Key Management
//!
//! Ed25519 keypairs for Deenair wallets.
//!
//! A keypair can come from three places: fresh OS randomness, a BIP-39
//! mnemonic plus wallet index (see [`derivation`](super::derivation)), or an
//! exported 64-byte secret. The exported layout is the one every Deenair
//! wallet uses:
//!
//! ```text
//! [ private scalar (32) | public key (32) ]
//! ```
//!
//! ## Security considerations
//!
//! - The private scalar lives inside an `ed25519_dalek::SigningKey`, which
//!   zeroizes on drop.
//! - Key bytes are never logged and `Debug` only prints the public half.
//! - There is no `Serialize` impl. Exporting a secret is an explicit call to
//!   [`KeyPair::secret_key`].

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use std::fmt;

use super::derivation::{derive_private_key, mnemonic_to_seed};
use super::public_key::PublicKey;
use crate::config::{wallet_path, DEFAULT_WALLET_ID, PRIVATE_KEY_LENGTH, SECRET_KEY_LENGTH};
use crate::error::{Error, Result};

/// A wallet keypair.
///
/// # Examples
///
/// ```
/// use deenair_sdk::crypto::{sign, verify, KeyPair};
///
/// let kp = KeyPair::generate();
/// let sig = sign(b"transfer 10 DEEN", &kp);
/// assert!(verify(&sig, b"transfer 10 DEEN", &kp.public_key()));
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
    /// Taken from the secret layout as-is; never recomputed on import.
    public_key: PublicKey,
    /// Originating phrase. Empty unless the pair was derived from one.
    mnemonic: String,
}

impl KeyPair {
    /// Generates a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng), String::new())
    }

    /// Derives the keypair for `wallet_id` (default 3) from an English
    /// BIP-39 phrase, along `m/44'/3566'/1'/0'/{wallet_id}'`.
    ///
    /// The same phrase and index always give the same key.
    pub fn from_mnemonic(phrase: &str, wallet_id: Option<u32>) -> Result<Self> {
        let seed = mnemonic_to_seed(phrase)?;
        let path = wallet_path(wallet_id.unwrap_or(DEFAULT_WALLET_ID));
        let scalar = derive_private_key(&seed, &path)?;
        Ok(Self::from_signing_key(SigningKey::from_bytes(&scalar), phrase.to_string()))
    }

    /// Imports an exported 64-byte secret.
    ///
    /// The public key is read from the last 32 bytes, not re-derived from
    /// the scalar. A secret whose halves disagree will import fine and
    /// produce signatures the network rejects.
    pub fn from_secret_key(secret: &[u8]) -> Result<Self> {
        if secret.len() != SECRET_KEY_LENGTH {
            return Err(Error::InvalidSecretKey(secret.len()));
        }
        let mut scalar = [0u8; PRIVATE_KEY_LENGTH];
        scalar.copy_from_slice(&secret[..PRIVATE_KEY_LENGTH]);
        let public_key = PublicKey::from_slice(&secret[PRIVATE_KEY_LENGTH..])?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&scalar),
            public_key,
            mnemonic: String::new(),
        })
    }

    fn from_signing_key(signing_key: SigningKey, mnemonic: String) -> Self {
        let public_key = PublicKey::new(signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            public_key,
            mnemonic,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Exports the 64-byte secret layout.
    ///
    /// **Handle with care.** Anyone holding these bytes controls the wallet.
    pub fn secret_key(&self) -> [u8; SECRET_KEY_LENGTH] {
        let mut out = [0u8; SECRET_KEY_LENGTH];
        out[..PRIVATE_KEY_LENGTH].copy_from_slice(&self.signing_key.to_bytes());
        out[PRIVATE_KEY_LENGTH..].copy_from_slice(self.public_key.as_bytes());
        out
    }

    /// The phrase this pair was derived from, or `""`.
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
            public_key: self.public_key,
            mnemonic: self.mnemonic.clone(),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only. No secret bytes, not even a prefix.
        write!(f, "KeyPair(pub={})", self.public_key)
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for KeyPair {}

#[cfg(test)]
mod tests {
    use super::*;

    const LOUD: &str =
        "loud refuse inner diamond census polar swear enhance shift knock fresh disease";
    const TEAM: &str = "team foot shop author visa add chicken degree left author hen umbrella";

    #[test]
    fn generate_produces_distinct_keys() {
        let a = KeyPair::generate();
        let b = KeyPair::generate();
        assert_ne!(a.public_key(), b.public_key());
        assert!(a.mnemonic().is_empty());
    }

    #[test]
    fn secret_layout_ends_with_public_key() {
        let kp = KeyPair::generate();
        let secret = kp.secret_key();
        assert_eq!(&secret[32..], kp.public_key().as_bytes());
    }

    #[test]
    fn known_mnemonic_vector() {
        let kp = KeyPair::from_mnemonic(LOUD, None).unwrap();
        assert_eq!(
            kp.public_key().to_base58(),
            "3V23V8UmvxMyWmcJx3dJ47uwHinWfm6Q94Ar3RoD1B3Y"
        );
        assert_eq!(
            bs58::encode(&kp.secret_key()[..32]).into_string(),
            "BBJCCyHDtrdNwvRRJCRCEZwxY2mLZCm8QkNDwa7VaKfh"
        );
        assert_eq!(kp.mnemonic(), LOUD);
    }

    #[test]
    fn default_wallet_is_three() {
        let implicit = KeyPair::from_mnemonic(TEAM, None).unwrap();
        let explicit = KeyPair::from_mnemonic(TEAM, Some(3)).unwrap();
        assert_eq!(implicit.public_key(), explicit.public_key());
        assert_eq!(
            explicit.public_key().to_base58(),
            "CMzQUnrgaoV2T6AuzmQCXap9v9NtCLGMbrQi8A4ZpcqP"
        );
    }

    #[test]
    fn wallet_indices_give_different_keys() {
        let w1 = KeyPair::from_mnemonic(TEAM, Some(1)).unwrap();
        let w2 = KeyPair::from_mnemonic(TEAM, Some(2)).unwrap();
        assert_eq!(
            w1.public_key().to_base58(),
            "CsHG3QUxsnt8gwEHQi4Kk2ekKwv9HhaePYgBQ2qeRtpQ"
        );
        assert_eq!(
            w2.public_key().to_base58(),
            "CFao5PDK9yisKvgLjoRY6pjgoyj8Z182BtpdZvVURfq8"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = KeyPair::from_mnemonic(TEAM, Some(7)).unwrap();
        let b = KeyPair::from_mnemonic(TEAM, Some(7)).unwrap();
        assert_eq!(a.secret_key(), b.secret_key());
    }

    #[test]
    fn secret_key_roundtrip() {
        let kp = KeyPair::generate();
        let restored = KeyPair::from_secret_key(&kp.secret_key()).unwrap();
        assert_eq!(kp.public_key(), restored.public_key());
        assert_eq!(kp.secret_key(), restored.secret_key());
        assert!(restored.mnemonic().is_empty());
    }

    #[test]
    fn import_keeps_stored_public_half() {
        let mut secret = KeyPair::generate().secret_key();
        secret[32..].copy_from_slice(&[5u8; 32]);
        let kp = KeyPair::from_secret_key(&secret).unwrap();
        assert_eq!(kp.public_key(), PublicKey::new([5u8; 32]));
    }

    #[test]
    fn rejects_wrong_secret_length() {
        assert!(matches!(
            KeyPair::from_secret_key(&[0u8; 32]),
            Err(Error::InvalidSecretKey(32))
        ));
        assert!(matches!(
            KeyPair::from_secret_key(&[0u8; 65]),
            Err(Error::InvalidSecretKey(65))
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let kp = KeyPair::generate();
        let debug = format!("{:?}", kp);
        let secret_b58 = bs58::encode(&kp.secret_key()[..32]).into_string();
        assert!(debug.contains(&kp.public_key().to_base58()));
        assert!(!debug.contains(&secret_b58));
    }

    #[test]
    fn clone_preserves_everything() {
        let kp = KeyPair::from_mnemonic(LOUD, Some(1)).unwrap();
        let copy = kp.clone();
        assert_eq!(kp, copy);
        assert_eq!(kp.secret_key(), copy.secret_key());
        assert_eq!(kp.mnemonic(), copy.mnemonic());
    }
}
