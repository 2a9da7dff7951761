//! # Binary Codec
//!
//! Byte-exact encoding of [`Message`]s as the validators parse them.
//!
//! Every message starts with the same 10-byte header and is followed by the
//! fields of its layout, in order, with no padding and no terminator:
//!
//! ```text
//! +--------+-----------+---------+---------+-----+
//! | opcode | timestamp | field 0 | field 1 | ... |
//! |  u16   |    u64    |         |         |     |
//! +--------+-----------+---------+---------+-----+
//! ```
//!
//! All integers are big-endian. Keys are raw 32-byte blobs. Strings carry a
//! big-endian length prefix (1 or 4 bytes, per field) counting UTF-8 bytes.
//!
//! Layouts are plain data in [`MESSAGE_LAYOUTS`]. Encoding, decoding, size
//! probing and the JSON wire form all walk the same table.

use thiserror::Error;

use super::message::{Message, MessageKind};
use crate::config::{AMOUNT_LENGTH, HEADER_LENGTH, OPCODE_LENGTH, PUBLIC_KEY_LENGTH, TIMESTAMP_LENGTH};
use crate::crypto::PublicKey;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Encoding and decoding failures. Decoding never substitutes defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("buffer truncated: need {needed} bytes at offset {offset}, only {available} left")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("unknown opcode {0}")]
    UnknownOpcode(u16),

    #[error("opcode mismatch: expected {expected}, found {found}")]
    OpcodeMismatch { expected: u16, found: u16 },

    #[error("field '{field}' is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("field '{field}' is {len} bytes but its {prefix}-byte length prefix allows at most {max}")]
    StringTooLong {
        field: &'static str,
        len: usize,
        prefix: usize,
        max: u64,
    },

    #[error("field '{field}' does not match its layout type")]
    FieldMismatch { field: &'static str },

    #[error("{0} trailing bytes after the last field")]
    TrailingBytes(usize),
}

// ---------------------------------------------------------------------------
// Layout table
// ---------------------------------------------------------------------------

/// How a single field is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 32-byte blob.
    PublicKey,
    /// 8-byte big-endian unsigned integer.
    U64,
    /// `prefix`-byte big-endian length, then that many UTF-8 bytes.
    Str { prefix: usize },
}

impl FieldKind {
    /// Bytes this field occupies regardless of its value.
    pub fn static_len(self) -> usize {
        match self {
            FieldKind::PublicKey => PUBLIC_KEY_LENGTH,
            FieldKind::U64 => AMOUNT_LENGTH,
            FieldKind::Str { prefix } => prefix,
        }
    }
}

/// A named field. The name is also the key used in the JSON wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Opcode plus ordered fields for one message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLayout {
    pub kind: MessageKind,
    pub opcode: u16,
    pub fields: &'static [FieldSpec],
}

const fn key(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::PublicKey,
    }
}

const fn u64_field(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::U64,
    }
}

const fn string(name: &'static str, prefix: usize) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Str { prefix },
    }
}

/// Every layout the validators accept, indexed by `MessageKind as usize`.
pub static MESSAGE_LAYOUTS: [MessageLayout; 6] = [
    MessageLayout {
        kind: MessageKind::Transfer,
        opcode: 2,
        fields: &[key("payer"), key("receiver"), u64_field("amount"), string("comment", 1)],
    },
    MessageLayout {
        kind: MessageKind::CreateNft,
        opcode: 7,
        fields: &[key("coll"), key("token"), key("minter"), string("metadata", 4)],
    },
    MessageLayout {
        kind: MessageKind::DonateNft,
        opcode: 12,
        fields: &[key("token"), key("recipient")],
    },
    MessageLayout {
        kind: MessageKind::BurnNft,
        opcode: 13,
        fields: &[key("token")],
    },
    MessageLayout {
        kind: MessageKind::EmitFt,
        opcode: 14,
        fields: &[
            key("token"),
            string("token name", 1),
            key("owner"),
            key("wallet"),
            u64_field("amount"),
        ],
    },
    MessageLayout {
        kind: MessageKind::TransferFt,
        opcode: 15,
        fields: &[key("token"), key("payer"), key("recipient"), u64_field("amount")],
    },
];

/// Layout for a message kind.
pub fn layout(kind: MessageKind) -> &'static MessageLayout {
    &MESSAGE_LAYOUTS[kind as usize]
}

/// Layout registered under `opcode`, if any.
pub fn layout_by_opcode(opcode: u16) -> Option<&'static MessageLayout> {
    MESSAGE_LAYOUTS.iter().find(|l| l.opcode == opcode)
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A single decoded or to-be-encoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    PublicKey(PublicKey),
    U64(u64),
    Str(String),
}

/// A decoded message together with its header timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub timestamp: u64,
    pub message: Message,
}

// ---------------------------------------------------------------------------
// Sizing
// ---------------------------------------------------------------------------

/// Exact encoded size of a message with this layout and these values.
///
/// Header plus each field's static span, plus the UTF-8 length of every
/// string value. Values are matched to fields positionally.
pub fn alloc(layout: &MessageLayout, values: &[FieldValue]) -> usize {
    let dynamic: usize = values
        .iter()
        .map(|v| match v {
            FieldValue::Str(s) => s.len(),
            _ => 0,
        })
        .sum();
    let fixed: usize = layout.fields.iter().map(|f| f.kind.static_len()).sum();
    HEADER_LENGTH + fixed + dynamic
}

/// Largest byte length a `prefix`-byte length field can describe.
fn max_for_prefix(prefix: usize) -> u64 {
    if prefix >= 8 {
        u64::MAX
    } else {
        (1u64 << (8 * prefix)) - 1
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encodes `message` with the given millisecond timestamp.
///
/// Deterministic: the same inputs always produce the same bytes.
pub fn encode(timestamp: u64, message: &Message) -> Result<Vec<u8>, CodecError> {
    let layout = layout(message.kind());
    let values = message.fields();
    let size = alloc(layout, &values);

    let mut buf = Vec::with_capacity(size);
    buf.extend_from_slice(&layout.opcode.to_be_bytes());
    buf.extend_from_slice(&timestamp.to_be_bytes());

    for (spec, value) in layout.fields.iter().zip(&values) {
        match (spec.kind, value) {
            (FieldKind::PublicKey, FieldValue::PublicKey(pk)) => buf.extend_from_slice(pk.as_bytes()),
            (FieldKind::U64, FieldValue::U64(v)) => buf.extend_from_slice(&v.to_be_bytes()),
            (FieldKind::Str { prefix }, FieldValue::Str(s)) => {
                let max = max_for_prefix(prefix);
                if s.len() as u64 > max {
                    return Err(CodecError::StringTooLong {
                        field: spec.name,
                        len: s.len(),
                        prefix,
                        max,
                    });
                }
                let len = (s.len() as u64).to_be_bytes();
                buf.extend_from_slice(&len[len.len() - prefix..]);
                buf.extend_from_slice(s.as_bytes());
            }
            _ => return Err(CodecError::FieldMismatch { field: spec.name }),
        }
    }

    debug_assert_eq!(buf.len(), size, "encoded length disagrees with alloc()");
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Bounds-checked cursor over an input buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let available = self.buf.len() - self.pos;
        if n > available {
            return Err(CodecError::Truncated {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads a big-endian unsigned integer of `width` bytes (at most 8).
    fn uint(&mut self, width: usize) -> Result<u64, CodecError> {
        let bytes = self.take(width)?;
        Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

/// Reads just the opcode, without touching the rest of the buffer.
pub fn peek_opcode(bytes: &[u8]) -> Result<u16, CodecError> {
    Ok(Reader::new(bytes).uint(OPCODE_LENGTH)? as u16)
}

/// Decodes any known message. The layout is picked by opcode.
pub fn decode(bytes: &[u8]) -> Result<DecodedMessage, CodecError> {
    let mut reader = Reader::new(bytes);
    let opcode = reader.uint(OPCODE_LENGTH)? as u16;
    let layout = layout_by_opcode(opcode).ok_or(CodecError::UnknownOpcode(opcode))?;
    let timestamp = reader.uint(TIMESTAMP_LENGTH)?;

    let mut values = Vec::with_capacity(layout.fields.len());
    for spec in layout.fields {
        let value = match spec.kind {
            FieldKind::PublicKey => {
                let mut raw = [0u8; PUBLIC_KEY_LENGTH];
                raw.copy_from_slice(reader.take(PUBLIC_KEY_LENGTH)?);
                FieldValue::PublicKey(PublicKey::new(raw))
            }
            FieldKind::U64 => FieldValue::U64(reader.uint(AMOUNT_LENGTH)?),
            FieldKind::Str { prefix } => {
                let len = reader.uint(prefix)?;
                let len = usize::try_from(len).map_err(|_| CodecError::Truncated {
                    offset: reader.pos,
                    needed: usize::MAX,
                    available: reader.remaining(),
                })?;
                let raw = reader.take(len)?;
                let s = std::str::from_utf8(raw)
                    .map_err(|_| CodecError::InvalidUtf8 { field: spec.name })?;
                FieldValue::Str(s.to_string())
            }
        };
        values.push(value);
    }

    if reader.remaining() > 0 {
        return Err(CodecError::TrailingBytes(reader.remaining()));
    }

    let message = Message::from_fields(layout.kind, values)?;
    Ok(DecodedMessage { timestamp, message })
}

/// Decodes bytes that must hold a message of `kind`.
pub fn decode_as(kind: MessageKind, bytes: &[u8]) -> Result<DecodedMessage, CodecError> {
    let expected = kind.opcode();
    let found = peek_opcode(bytes)?;
    if found != expected {
        return Err(CodecError::OpcodeMismatch { expected, found });
    }
    decode(bytes)
}
