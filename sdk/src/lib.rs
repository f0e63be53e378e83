// Copyright (c) 2026 CCD SDK Contributors. MIT License.
// See LICENSE for details.

//! # CCD SDK — Binary Codecs
//!
//! Builds, signs and parses the bytes a CCD node accepts and emits. Talking
//! to the node is someone else's job; this crate only makes sure that what
//! gets sent is byte-exact and that the energy written into every header is
//! exactly what the node will charge.
//!
//! ## Architecture
//!
//! - **encoding** — Fixed-width writers, a bounds-checked reader, ULEB128.
//! - **types** — Addresses, amounts, names and blobs at the API boundary.
//! - **transaction** — Payloads, energy, signature maps, hashes, block items.
//! - **credential** — Credential deployment values, proofs and sign digests.
//! - **cis2** — Token standard parameters, responses, events, token addresses.
//! - **cis3** — Sponsored `permit` messages.
//! - **hash** — SHA-256 and the transaction hash type.
//! - **config** — Protocol constants and exchange rates.
//! - **logging** — Optional `tracing` subscriber setup.
//!
//! ## Design Philosophy
//!
//! 1. Every operation is a pure function of its input. Same bytes in, same
//!    bytes out, from any thread.
//! 2. Caller input never panics. Everything fallible returns [`Result`].
//! 3. Unknown event tags decode to a custom event, never to an error.

pub mod cis2;
pub mod cis3;
pub mod config;
pub mod credential;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod logging;
pub mod transaction;
pub mod types;

pub use error::{CodecError, Result};
pub use hash::TransactionHash;
