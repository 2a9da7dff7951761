//! # System Program
//!
//! Builders for every operation the validators understand. Each builder
//! stamps the message with a timestamp, encodes it and binds it to the key
//! that has to sign it:
//!
//! | Builder       | Signer       |
//! |---------------|--------------|
//! | `transfer`    | `payer`      |
//! | `fee`         | `payer`      |
//! | `create_nft`  | `collection` |
//! | `donate_nft`  | `owner`      |
//! | `burn_nft`    | `owner`      |
//! | `emit_ft`     | `owner`      |
//! | `transfer_ft` | `sender`     |

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::crypto::{sha256, PublicKey};
use crate::error::Result;
use crate::transaction::{Instruction, Message};

/// Account that receives every fee transfer
/// (`deenAiRoven55555555555555555555555555555555`).
pub const FEE_RECEIVER: PublicKey = PublicKey::new([
    0x09, 0x63, 0x7b, 0x4d, 0x96, 0x59, 0xc8, 0x79, 0x24, 0x69, 0x26, 0x52, 0x02, 0xfc, 0x6a, 0xc1,
    0x2a, 0x0c, 0x12, 0x54, 0x5f, 0xdf, 0xc8, 0x84, 0xf2, 0x13, 0xbb, 0x78, 0x1f, 0x70, 0x47, 0xdc,
]);

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TransferParams {
    pub payer: PublicKey,
    pub receiver: PublicKey,
    pub amount: u64,
    pub comment: String,
}

/// A transfer whose receiver is always [`FEE_RECEIVER`].
#[derive(Debug, Clone)]
pub struct FeeParams {
    pub payer: PublicKey,
    pub amount: u64,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct CreateNftParams<'a, M: Serialize> {
    /// Serialized to compact JSON. The token id is the SHA-256 of that JSON,
    /// so field order matters.
    pub metadata: &'a M,
    pub collection: PublicKey,
    pub minter: PublicKey,
}

#[derive(Debug, Clone)]
pub struct DonateNftParams {
    pub token: PublicKey,
    pub owner: PublicKey,
    pub recipient: PublicKey,
}

#[derive(Debug, Clone)]
pub struct BurnNftParams {
    pub token: PublicKey,
    pub owner: PublicKey,
}

#[derive(Debug, Clone)]
pub struct EmitFtParams {
    pub ft: PublicKey,
    pub name: String,
    pub owner: PublicKey,
    pub receiver: PublicKey,
    pub amount: u64,
}

#[derive(Debug, Clone)]
pub struct TransferFtParams {
    pub ft: PublicKey,
    pub sender: PublicKey,
    pub receiver: PublicKey,
    pub amount: u64,
}

/// Conventional NFT metadata: a media location, arbitrary traits, and a
/// royalty table (address to percentage string).
///
/// Serializes as `location`, then the traits in insertion order, then
/// `royalty`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub location: String,
    #[serde(flatten)]
    pub traits: Map<String, Value>,
    pub royalty: Map<String, Value>,
}

impl NftMetadata {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn with_trait(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.traits.insert(key.into(), value.into());
        self
    }

    pub fn with_royalty(mut self, address: impl Into<String>, share: impl Into<String>) -> Self {
        self.royalty.insert(address.into(), Value::String(share.into()));
        self
    }
}

// ---------------------------------------------------------------------------
// SystemProgram
// ---------------------------------------------------------------------------

/// Instruction factory.
///
/// [`SystemProgram::now`] stamps each instruction with the wall clock at the
/// moment it is built. [`SystemProgram::at`] pins every instruction to one
/// timestamp, which is what tests and replays want.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProgram {
    fixed_timestamp: Option<u64>,
}

impl SystemProgram {
    pub fn now() -> Self {
        Self {
            fixed_timestamp: None,
        }
    }

    pub fn at(timestamp: u64) -> Self {
        Self {
            fixed_timestamp: Some(timestamp),
        }
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.fixed_timestamp
            .unwrap_or_else(|| Utc::now().timestamp_millis().max(0) as u64)
    }

    fn build(&self, signer: PublicKey, message: Message) -> Result<Instruction> {
        let ix = Instruction::new(signer, message, self.timestamp())?;
        trace!(
            kind = %ix.kind(),
            opcode = ix.opcode(),
            data_len = ix.data().len(),
            signer = %signer,
            "built instruction"
        );
        Ok(ix)
    }

    pub fn transfer(&self, params: TransferParams) -> Result<Instruction> {
        self.build(
            params.payer,
            Message::Transfer {
                payer: params.payer,
                receiver: params.receiver,
                amount: params.amount,
                comment: params.comment,
            },
        )
    }

    pub fn fee(&self, params: FeeParams) -> Result<Instruction> {
        self.transfer(TransferParams {
            payer: params.payer,
            receiver: FEE_RECEIVER,
            amount: params.amount,
            comment: params.comment,
        })
    }

    /// Mints an NFT. The token id is derived from the metadata, so the same
    /// metadata always names the same token.
    pub fn create_nft<M: Serialize>(&self, params: CreateNftParams<'_, M>) -> Result<Instruction> {
        let metadata = serde_json::to_string(params.metadata)?;
        let token = PublicKey::new(sha256(metadata.as_bytes()));
        self.build(
            params.collection,
            Message::CreateNft {
                collection: params.collection,
                token,
                minter: params.minter,
                metadata,
            },
        )
    }

    pub fn donate_nft(&self, params: DonateNftParams) -> Result<Instruction> {
        self.build(
            params.owner,
            Message::DonateNft {
                token: params.token,
                recipient: params.recipient,
            },
        )
    }

    pub fn burn_nft(&self, params: BurnNftParams) -> Result<Instruction> {
        self.build(params.owner, Message::BurnNft { token: params.token })
    }

    pub fn emit_ft(&self, params: EmitFtParams) -> Result<Instruction> {
        self.build(
            params.owner,
            Message::EmitFt {
                token: params.ft,
                name: params.name,
                owner: params.owner,
                wallet: params.receiver,
                amount: params.amount,
            },
        )
    }

    pub fn transfer_ft(&self, params: TransferFtParams) -> Result<Instruction> {
        self.build(
            params.sender,
            Message::TransferFt {
                token: params.ft,
                payer: params.sender,
                recipient: params.receiver,
                amount: params.amount,
            },
        )
    }
}
