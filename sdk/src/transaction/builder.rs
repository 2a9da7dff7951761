//! Transaction assembly and compilation.
//!
//! A [`Transaction`] accumulates instructions and signer keypairs. Calling
//! [`Transaction::compile`] consumes it: the fee instruction is appended,
//! every instruction is signed by its designated signer, and the result is a
//! sealed [`CompiledTransaction`] holding the wire form.
//!
//! Fees are per instruction, `(encoded_len + 160) * 10 + 10000`, summed as
//! instructions are added. The fee instruction itself is added through the
//! same path, so its own cost lands in the running total but is not part of
//! the amount it transfers.

use tracing::debug;

use super::instruction::Instruction;
use super::wire::{WireMessage, WireTransaction};
use crate::crypto::{sign, KeyPair, PublicKey};
use crate::error::{Error, Result};
use crate::program::system::{FeeParams, SystemProgram};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An open, unsigned transaction.
///
/// # Usage
///
/// ```rust,no_run
/// use deenair_sdk::crypto::KeyPair;
/// use deenair_sdk::program::{SystemProgram, TransferParams};
/// use deenair_sdk::transaction::Transaction;
///
/// let payer = KeyPair::generate();
/// let ix = SystemProgram::now()
///     .transfer(TransferParams {
///         payer: payer.public_key(),
///         receiver: deenair_sdk::program::FEE_RECEIVER,
///         amount: 10_000,
///         comment: "rent".into(),
///     })
///     .unwrap();
///
/// let mut tx = Transaction::new();
/// tx.add([ix]).unwrap();
/// tx.add_signers([payer]);
/// let compiled = tx.compile().unwrap();
/// println!("{}", compiled.wire().to_json().unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    instructions: Vec<Instruction>,
    /// Keyed by base58 public key, in first-registration order.
    signers: Vec<(String, KeyPair)>,
    fee_payer: Option<PublicKey>,
    fee_amount: u64,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends instructions and charges each one's fee.
    ///
    /// Passing another `Transaction` merges its instructions (its signers
    /// are not carried over). Fails if nothing was supplied, which includes
    /// an empty `Transaction`; use [`merge`](Self::merge) when the other
    /// transaction may be empty.
    pub fn add<I>(&mut self, instructions: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Instruction>,
    {
        let before = self.instructions.len();
        instructions.into_iter().for_each(|ix| self.push(ix));
        if self.instructions.len() == before {
            return Err(Error::EmptyInstructionList);
        }
        Ok(self)
    }

    /// Appends every instruction of `other`. Signers are not carried over.
    /// Merging an empty transaction is a no-op.
    pub fn merge(&mut self, other: Transaction) -> &mut Self {
        other.instructions.into_iter().for_each(|ix| self.push(ix));
        self
    }

    fn push(&mut self, ix: Instruction) {
        let fee = ix.fee();
        self.fee_amount = self.fee_amount.saturating_add(fee);
        debug!(
            opcode = ix.opcode(),
            data_len = ix.data().len(),
            fee,
            fee_total = self.fee_amount,
            "instruction added"
        );
        self.instructions.push(ix);
    }

    /// Registers signing keypairs. A key registered twice keeps its original
    /// position but the newer keypair replaces the old one.
    pub fn add_signers<K>(&mut self, keypairs: K) -> &mut Self
    where
        K: IntoIterator<Item = KeyPair>,
    {
        for kp in keypairs {
            let key = kp.public_key().to_base58();
            match self.signers.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = kp,
                None => self.signers.push((key, kp)),
            }
        }
        self
    }

    /// Overrides the fee payer. Defaults to the first registered signer.
    pub fn set_fee_payer(&mut self, payer: PublicKey) -> &mut Self {
        self.fee_payer = Some(payer);
        self
    }

    /// Explicit fee payer, if one was set.
    pub fn fee_payer(&self) -> Option<PublicKey> {
        self.fee_payer
    }

    /// Running fee total for the instructions added so far.
    pub fn fee_amount(&self) -> u64 {
        self.fee_amount
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Registered signers' public keys, in registration order.
    pub fn signers(&self) -> impl Iterator<Item = PublicKey> + '_ {
        self.signers.iter().map(|(_, kp)| kp.public_key())
    }

    fn signer_for(&self, key: &PublicKey) -> Option<&KeyPair> {
        let key = key.to_base58();
        self.signers.iter().find(|(k, _)| *k == key).map(|(_, kp)| kp)
    }

    /// Appends the fee instruction (stamped with the current time), signs
    /// everything, and builds the wire form.
    pub fn compile(self) -> Result<CompiledTransaction> {
        self.compile_with(&SystemProgram::now())
    }

    /// Like [`compile`](Self::compile), but the fee instruction is built by
    /// `program`, so its timestamp can be pinned.
    pub fn compile_with(mut self, program: &SystemProgram) -> Result<CompiledTransaction> {
        let first_signer = match self.signers.first() {
            Some((_, kp)) => kp.public_key(),
            None => return Err(Error::NoSigners),
        };
        let fee_payer = self.fee_payer.unwrap_or(first_signer);

        let billed = self.fee_amount;
        let fee_ix = program.fee(FeeParams {
            payer: fee_payer,
            amount: billed,
            comment: String::new(),
        })?;
        self.add([fee_ix])?;

        let mut messages = Vec::with_capacity(self.instructions.len());
        for ix in &self.instructions {
            let signer = self
                .signer_for(&ix.signer())
                .ok_or(Error::MissingSigner(ix.signer()))?;
            let signature = sign(ix.data(), signer);
            messages.push(WireMessage::from_instruction(ix, &signature));
        }

        debug!(
            instructions = self.instructions.len(),
            fee_payer = %fee_payer,
            fee_amount = billed,
            "transaction compiled"
        );

        Ok(CompiledTransaction {
            instructions: self.instructions,
            fee_payer,
            fee_amount: billed,
            wire: WireTransaction { messages },
        })
    }
}

impl IntoIterator for Transaction {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.into_iter()
    }
}

// ---------------------------------------------------------------------------
// CompiledTransaction
// ---------------------------------------------------------------------------

/// A signed, sealed transaction. The fee instruction is always last.
#[derive(Debug, Clone)]
pub struct CompiledTransaction {
    instructions: Vec<Instruction>,
    fee_payer: PublicKey,
    fee_amount: u64,
    wire: WireTransaction,
}

impl CompiledTransaction {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn fee_payer(&self) -> PublicKey {
        self.fee_payer
    }

    /// Amount transferred to the fee receiver.
    pub fn fee_amount(&self) -> u64 {
        self.fee_amount
    }

    pub fn wire(&self) -> &WireTransaction {
        &self.wire
    }

    pub fn into_wire(self) -> WireTransaction {
        self.wire
    }
}
