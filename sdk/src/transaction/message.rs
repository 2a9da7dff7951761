//! Typed operation payloads.
//!
//! A [`Message`] is what an instruction *does*. Its binary form is owned by
//! [`codec`](super::codec); this module only knows the field values.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codec::{layout, CodecError, FieldValue};
use crate::crypto::PublicKey;

// ---------------------------------------------------------------------------
// MessageKind
// ---------------------------------------------------------------------------

/// The operation kinds the validators understand.
///
/// Discriminants index into [`MESSAGE_LAYOUTS`](super::codec::MESSAGE_LAYOUTS);
/// the on-wire opcode lives in the layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Transfer = 0,
    CreateNft = 1,
    DonateNft = 2,
    BurnNft = 3,
    EmitFt = 4,
    TransferFt = 5,
}

impl MessageKind {
    pub const ALL: [MessageKind; 6] = [
        MessageKind::Transfer,
        MessageKind::CreateNft,
        MessageKind::DonateNft,
        MessageKind::BurnNft,
        MessageKind::EmitFt,
        MessageKind::TransferFt,
    ];

    /// The 2-byte opcode written at the front of every encoded message.
    pub fn opcode(self) -> u16 {
        layout(self).opcode
    }

    pub fn from_opcode(opcode: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.opcode() == opcode)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Transfer => "transfer",
            MessageKind::CreateNft => "create_nft",
            MessageKind::DonateNft => "donate_nft",
            MessageKind::BurnNft => "burn_nft",
            MessageKind::EmitFt => "emit_ft",
            MessageKind::TransferFt => "transfer_ft",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A typed operation payload. Field order in each variant matches the
/// binary layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Native coin transfer. Also used for fees.
    Transfer {
        payer: PublicKey,
        receiver: PublicKey,
        amount: u64,
        /// Free text, at most 255 UTF-8 bytes.
        comment: String,
    },
    /// Mint an NFT into a collection. `token` is the SHA-256 of `metadata`.
    CreateNft {
        collection: PublicKey,
        token: PublicKey,
        minter: PublicKey,
        /// Compact JSON.
        metadata: String,
    },
    DonateNft {
        token: PublicKey,
        recipient: PublicKey,
    },
    BurnNft {
        token: PublicKey,
    },
    /// Mint fungible tokens into `wallet`.
    EmitFt {
        token: PublicKey,
        /// Display name, at most 255 UTF-8 bytes.
        name: String,
        owner: PublicKey,
        wallet: PublicKey,
        amount: u64,
    },
    TransferFt {
        token: PublicKey,
        payer: PublicKey,
        recipient: PublicKey,
        amount: u64,
    },
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Transfer { .. } => MessageKind::Transfer,
            Message::CreateNft { .. } => MessageKind::CreateNft,
            Message::DonateNft { .. } => MessageKind::DonateNft,
            Message::BurnNft { .. } => MessageKind::BurnNft,
            Message::EmitFt { .. } => MessageKind::EmitFt,
            Message::TransferFt { .. } => MessageKind::TransferFt,
        }
    }

    /// Field values in layout order.
    pub fn fields(&self) -> Vec<FieldValue> {
        use FieldValue::{PublicKey as Key, Str, U64};

        match self {
            Message::Transfer {
                payer,
                receiver,
                amount,
                comment,
            } => vec![Key(*payer), Key(*receiver), U64(*amount), Str(comment.clone())],
            Message::CreateNft {
                collection,
                token,
                minter,
                metadata,
            } => vec![Key(*collection), Key(*token), Key(*minter), Str(metadata.clone())],
            Message::DonateNft { token, recipient } => vec![Key(*token), Key(*recipient)],
            Message::BurnNft { token } => vec![Key(*token)],
            Message::EmitFt {
                token,
                name,
                owner,
                wallet,
                amount,
            } => vec![Key(*token), Str(name.clone()), Key(*owner), Key(*wallet), U64(*amount)],
            Message::TransferFt {
                token,
                payer,
                recipient,
                amount,
            } => vec![Key(*token), Key(*payer), Key(*recipient), U64(*amount)],
        }
    }

    /// Rebuilds a message from values in layout order.
    pub fn from_fields(kind: MessageKind, values: Vec<FieldValue>) -> Result<Self, CodecError> {
        let mut fields = Fields {
            layout_fields: layout(kind).fields.iter().map(|f| f.name),
            values: values.into_iter(),
        };

        let message = match kind {
            MessageKind::Transfer => Message::Transfer {
                payer: fields.key()?,
                receiver: fields.key()?,
                amount: fields.u64()?,
                comment: fields.string()?,
            },
            MessageKind::CreateNft => Message::CreateNft {
                collection: fields.key()?,
                token: fields.key()?,
                minter: fields.key()?,
                metadata: fields.string()?,
            },
            MessageKind::DonateNft => Message::DonateNft {
                token: fields.key()?,
                recipient: fields.key()?,
            },
            MessageKind::BurnNft => Message::BurnNft {
                token: fields.key()?,
            },
            MessageKind::EmitFt => Message::EmitFt {
                token: fields.key()?,
                name: fields.string()?,
                owner: fields.key()?,
                wallet: fields.key()?,
                amount: fields.u64()?,
            },
            MessageKind::TransferFt => Message::TransferFt {
                token: fields.key()?,
                payer: fields.key()?,
                recipient: fields.key()?,
                amount: fields.u64()?,
            },
        };
        Ok(message)
    }
}

/// Pops typed values off a layout-ordered list, naming the field on mismatch.
struct Fields<N, V> {
    layout_fields: N,
    values: V,
}

impl<N, V> Fields<N, V>
where
    N: Iterator<Item = &'static str>,
    V: Iterator<Item = FieldValue>,
{
    fn next(&mut self) -> Result<(&'static str, FieldValue), CodecError> {
        let name = self.layout_fields.next().unwrap_or("<extra>");
        let value = self
            .values
            .next()
            .ok_or(CodecError::FieldMismatch { field: name })?;
        Ok((name, value))
    }

    fn key(&mut self) -> Result<PublicKey, CodecError> {
        match self.next()? {
            (_, FieldValue::PublicKey(pk)) => Ok(pk),
            (field, _) => Err(CodecError::FieldMismatch { field }),
        }
    }

    fn u64(&mut self) -> Result<u64, CodecError> {
        match self.next()? {
            (_, FieldValue::U64(v)) => Ok(v),
            (field, _) => Err(CodecError::FieldMismatch { field }),
        }
    }

    fn string(&mut self) -> Result<String, CodecError> {
        match self.next()? {
            (_, FieldValue::Str(s)) => Ok(s),
            (field, _) => Err(CodecError::FieldMismatch { field }),
        }
    }
}
