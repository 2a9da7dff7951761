//! A single signed-to-be operation.

use super::codec;
use super::message::{Message, MessageKind};
use crate::config::fee_for_data_len;
use crate::crypto::PublicKey;
use crate::error::Result;

/// A message bound to its signer and timestamp, with its encoding cached.
///
/// Instructions are immutable once built. `data` is exactly what gets
/// signed and what the fee is computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    signer: PublicKey,
    message: Message,
    timestamp: u64,
    data: Vec<u8>,
}

impl Instruction {
    /// Encodes `message` at `timestamp` and binds it to `signer`.
    pub fn new(signer: PublicKey, message: Message, timestamp: u64) -> Result<Self> {
        let data = codec::encode(timestamp, &message)?;
        Ok(Self {
            signer,
            message,
            timestamp,
            data,
        })
    }

    /// Key that must sign this instruction.
    pub fn signer(&self) -> PublicKey {
        self.signer
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn kind(&self) -> MessageKind {
        self.message.kind()
    }

    pub fn opcode(&self) -> u16 {
        self.message.kind().opcode()
    }

    /// Milliseconds since the Unix epoch, as written in the header.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Encoded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Network fee for this instruction: `(len + 160) * 10 + 10000`.
    pub fn fee(&self) -> u64 {
        fee_for_data_len(self.data.len())
    }
}
