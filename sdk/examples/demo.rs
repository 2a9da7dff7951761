//! Offline walkthrough of building a Deenair transaction.
//!
//! Derives wallets from a mnemonic, mints an NFT, pays a transfer, compiles
//! everything into the JSON the node's `NewTrx` method expects, and decodes
//! the signed bytes back. Nothing is sent over the network.
//!
//! Run with:
//!   RUST_LOG=deenair_sdk=debug cargo run --example demo

use std::time::Instant;

use tracing_subscriber::EnvFilter;

use deenair_sdk::crypto::{generate_mnemonic, verify, KeyPair, Signature};
use deenair_sdk::program::{
    CreateNftParams, NftMetadata, SystemProgram, TransferParams, FEE_RECEIVER,
};
use deenair_sdk::transaction::{decode, Message, Transaction};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]================================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}  [{label}: {ms:.2} ms]{RESET}");
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> deenair_sdk::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    section(1, "Wallets");
    let phrase = generate_mnemonic(128)?;
    info("Fresh mnemonic", &phrase);

    let t = Instant::now();
    let collection = KeyPair::from_mnemonic(&phrase, Some(1))?;
    let payer = KeyPair::from_mnemonic(&phrase, None)?;
    timing("derive x2", t.elapsed());
    info("Collection", &collection.public_key().to_base58());
    info("Payer", &payer.public_key().to_base58());

    section(2, "Instructions");
    let program = SystemProgram::now();
    let metadata = NftMetadata::new("https://path/to/your/mediafile")
        .with_trait("rarity", "legendary")
        .with_royalty(payer.public_key().to_base58(), "10");

    let mint = program.create_nft(CreateNftParams {
        metadata: &metadata,
        collection: collection.public_key(),
        minter: payer.public_key(),
    })?;
    if let Message::CreateNft { token, .. } = mint.message() {
        info("NFT token id", &token.to_base58());
    }
    let pay = program.transfer(TransferParams {
        payer: payer.public_key(),
        receiver: FEE_RECEIVER,
        amount: 10_000,
        comment: "demo".into(),
    })?;
    info("Transfer bytes", &pay.data().len().to_string());

    section(3, "Compile");
    let mut tx = Transaction::new();
    tx.add([mint, pay])?;
    tx.add_signers([payer.clone(), collection]);

    let t = Instant::now();
    let compiled = tx.compile()?;
    timing("compile", t.elapsed());
    info("Fee payer", &compiled.fee_payer().to_base58());
    info("Fee", &compiled.fee_amount().to_string());
    println!();
    println!("{DIM}{}{RESET}", compiled.wire().to_json()?);

    section(4, "Check");
    for (wire, ix) in compiled.wire().messages.iter().zip(compiled.instructions()) {
        let decoded = decode(ix.data())?;
        let signature = Signature::from_base58(wire.sign().unwrap_or_default())?;
        let valid = verify(&signature, ix.data(), &ix.signer());
        println!(
            "  {BOLD}{:<12}{RESET} signer {} signature {}",
            decoded.message.kind().to_string(),
            ix.signer(),
            if valid { "valid" } else { "INVALID" }
        );
    }
    success("Every message decodes and verifies");

    Ok(())
}
