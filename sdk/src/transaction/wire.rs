//! JSON wire form handed to the node's `NewTrx` method.
//!
//! ```json
//! { "messages": [
//!     { "type": 2, "time": 1675272630000, "sign": "<base58>",
//!       "payer": "<base58>", "receiver": "<base58>", "amount": 10000, "comment": "test" }
//! ] }
//! ```
//!
//! Key order inside each message is `type`, `time`, `sign`, then the layout
//! fields. Keys are base58, integers and strings pass through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::codec::{layout, FieldValue};
use super::instruction::Instruction;
use crate::crypto::Signature;
use crate::error::Result;

/// A single flat, insertion-ordered wire message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireMessage(Map<String, Value>);

impl WireMessage {
    /// Builds the wire message for a signed instruction.
    pub fn from_instruction(instruction: &Instruction, signature: &Signature) -> Self {
        let mut map = Map::new();
        map.insert("type".into(), Value::from(instruction.opcode()));
        map.insert("time".into(), Value::from(instruction.timestamp()));
        map.insert("sign".into(), Value::from(signature.to_base58()));

        let fields = layout(instruction.kind()).fields;
        for (spec, value) in fields.iter().zip(instruction.message().fields()) {
            map.insert(spec.name.to_string(), field_to_json(value));
        }
        Self(map)
    }

    /// Opcode from `type`.
    pub fn message_type(&self) -> Option<u16> {
        self.0
            .get("type")
            .and_then(Value::as_u64)
            .and_then(|v| u16::try_from(v).ok())
    }

    /// Millisecond timestamp from `time`.
    pub fn time(&self) -> Option<u64> {
        self.0.get("time").and_then(Value::as_u64)
    }

    /// Base58 signature from `sign`.
    pub fn sign(&self) -> Option<&str> {
        self.0.get("sign").and_then(Value::as_str)
    }

    /// Any field by wire name, e.g. `"token name"`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Wire names in emission order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn field_to_json(value: FieldValue) -> Value {
    match value {
        FieldValue::PublicKey(pk) => Value::String(pk.to_base58()),
        FieldValue::U64(v) => Value::from(v),
        FieldValue::Str(s) => Value::String(s),
    }
}

/// Transport-ready transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireTransaction {
    pub messages: Vec<WireMessage>,
}

impl WireTransaction {
    /// Compact JSON, as sent to the node.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
