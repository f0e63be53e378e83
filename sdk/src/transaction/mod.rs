//! # Account Transactions
//!
//! Payload encoding, energy pricing, signature maps and hashing for
//! transactions sent from an account.
//!
//! ## Architecture
//!
//! ```text
//! types.rs     — Kind tags, the caller-chosen header, AccountTransaction
//! payload.rs   — Per-kind body encoding and base energy (PayloadCodec)
//! energy.rs    — Total energy and its price in microCCD
//! signature.rs — The credential → key → signature map
//! hashing.rs   — Sign digest, transaction hash, block item and submission bytes
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — Pick a header and one of the [`AccountTransactionPayload`] kinds.
//! 2. **Digest** — [`account_transaction_sign_digest`] gives the bytes to sign.
//! 3. **Sign** — Sign the digest with each account key, outside this crate.
//! 4. **Submit** — [`serialize_account_transaction_for_submission`] produces
//!    the bytes for the node; [`account_transaction_hash`] the id to poll.
//!
//! ## Design Decisions
//!
//! - The header's energy and payload size are never caller input. They are
//!   recomputed from the serialized payload every time a header is written.
//! - All amounts are `u64` microCCD. No floating point anywhere near energy
//!   or fees.

pub mod energy;
pub mod hashing;
pub mod payload;
pub mod signature;
pub mod types;

pub use energy::{calculate_energy_cost, convert_energy_to_micro_ccd, transaction_energy_cost};
pub use hashing::{
    account_transaction_hash, account_transaction_sign_digest, serialize_account_transaction,
    serialize_account_transaction_for_submission,
};
pub use payload::{
    AccountTransactionPayload, BakerAggregationVerifyKey, BakerKeysWithProofs, BakerVerifyKey,
    ConfigureBaker, ConfigureDelegation, DelegationTarget, DeployModule, InitContract, KeyProof,
    OpenStatus, PayloadCodec, RegisterData, Transfer, TransferWithMemo, UpdateContract,
    UpdateCredentials,
};
pub use signature::{AccountTransactionSignature, CredentialSignature, Signature};
pub use types::{AccountTransaction, AccountTransactionHeader, AccountTransactionType};
