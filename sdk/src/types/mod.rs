//! Boundary types shared by every codec.
//!
//! These are the values callers hand in: addresses, amounts, names and
//! opaque byte strings. Each constructor enforces the limits of its wire
//! encoding, so a value that exists can always be serialized.

pub mod address;
pub mod amount;
pub mod bytes;
pub(crate) mod fixed;
pub mod names;
pub mod time;

pub use address::{AccountAddress, ContractAddress};
pub use amount::{CcdAmount, Energy};
pub use bytes::{DataBlob, HexBytes, ModuleReference, Parameter};
pub use names::{ContractName, EntrypointName, ReceiveName};
pub use time::{Timestamp, TransactionExpiry};
