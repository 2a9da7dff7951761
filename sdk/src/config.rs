//! # Protocol Configuration & Constants
//!
//! Every magic number the SDK depends on lives here. Most of them are fixed
//! by the validator network: change one and every signature you produce
//! becomes garbage as far as the nodes are concerned.

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// Length of a public key (and of every other 32-byte identifier on the wire).
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of the exported secret key layout: `[private_scalar || public_key]`.
pub const SECRET_KEY_LENGTH: usize = 64;

/// Length of the private scalar at the front of the secret layout.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Base derivation path used by every Deenair wallet.
///
/// This does not conform to BIP-44 (there is no `account'/change/index`
/// split), but every wallet in the wild was derived with it, so it stays.
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/3566'/1'/0'";

/// Wallet index used when the caller does not pick one.
pub const DEFAULT_WALLET_ID: u32 = 3;

/// Mnemonic strengths (entropy bits) accepted by the phrase generator.
pub const MNEMONIC_STRENGTHS: [usize; 5] = [128, 160, 192, 224, 256];

// ---------------------------------------------------------------------------
// Wire Format
// ---------------------------------------------------------------------------

/// Common message header: 2-byte opcode + 8-byte timestamp.
pub const HEADER_LENGTH: usize = 10;

/// Width of the big-endian opcode at the front of every message.
pub const OPCODE_LENGTH: usize = 2;

/// Width of the big-endian millisecond timestamp that follows the opcode.
pub const TIMESTAMP_LENGTH: usize = 8;

/// Width of every fixed-size amount field.
pub const AMOUNT_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Static per-instruction byte allowance added to the encoded length before
/// the per-byte price is applied.
pub const STATIC_FEE_PART: u64 = 160;

/// Price per (encoded + static) byte.
pub const FEE_PER_BYTE: u64 = 10;

/// Flat per-instruction fee.
pub const BASE_FEE: u64 = 10_000;

/// Well-known account that receives every fee transfer.
pub const FEE_RECEIVER_BASE58: &str = "deenAiRoven55555555555555555555555555555555";

// ---------------------------------------------------------------------------
// RPC
// ---------------------------------------------------------------------------

/// JSON-RPC version string sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Delegated stake becomes withdrawable after 14 days.
pub const STAKE_WITHDRAW_DELAY_MS: u64 = 14 * 86_400_000;

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Fee charged for an instruction whose encoded payload is `data_len` bytes:
/// `(data_len + 160) * 10 + 10000`.
pub fn fee_for_data_len(data_len: usize) -> u64 {
    (data_len as u64 + STATIC_FEE_PART) * FEE_PER_BYTE + BASE_FEE
}

/// Full derivation path for a wallet index, e.g. `m/44'/3566'/1'/0'/3'`.
pub fn wallet_path(wallet_id: u32) -> String {
    format!("{}/{}'", DEFAULT_DERIVATION_PATH, wallet_id)
}
