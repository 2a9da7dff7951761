//! On-chain programs. Deenair has exactly one: the system program.

pub mod system;

pub use system::{
    BurnNftParams, CreateNftParams, DonateNftParams, EmitFtParams, FeeParams, NftMetadata,
    SystemProgram, TransferFtParams, TransferParams, FEE_RECEIVER,
};
