//! # Transaction Module
//!
//! From typed operation to transport-ready JSON.
//!
//! ## Architecture
//!
//! ```text
//! message.rs     - Typed payloads (Message, MessageKind)
//! codec.rs       - Layout table and byte-exact encode/decode
//! instruction.rs - Message + signer + timestamp + cached encoding
//! builder.rs     - Transaction accumulator and compiler
//! wire.rs        - JSON wire form for NewTrx
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: `SystemProgram` produces [`Instruction`]s.
//! 2. **Collect**: [`Transaction::add`] appends them and totals fees.
//! 3. **Compile**: [`Transaction::compile`] appends the fee transfer, signs
//!    every instruction and yields a [`CompiledTransaction`].
//! 4. **Send**: the [`WireTransaction`] goes to the node via `NewTrx`.

pub mod builder;
pub mod codec;
pub mod instruction;
pub mod message;
pub mod wire;

pub use builder::{CompiledTransaction, Transaction};
pub use codec::{decode, decode_as, encode, CodecError, DecodedMessage, MESSAGE_LAYOUTS};
pub use instruction::Instruction;
pub use message::{Message, MessageKind};
pub use wire::{WireMessage, WireTransaction};
