//! # CIS-2 Token Standard
//!
//! Parameters for the standard entrypoints of a CIS-2 token contract, and
//! decoders for what such a contract returns and logs.
//!
//! ## Architecture
//!
//! ```text
//! types.rs         — Token ids, amounts, addresses and the call messages
//! serialize.rs     — Parameter encoding, list combinator, response decoders
//! event.rs         — Logged events, with a Custom fallback for foreign tags
//! rejection.rs     — Standard reject reasons
//! token_address.rs — Base58Check text form of (contract, token id)
//! ```
//!
//! ## Wire Conventions
//!
//! - Integers are little-endian, unlike the transaction layer.
//! - Token amounts are ULEB128 and may take at most 37 bytes.
//! - Batched calls are a `u16` count followed by the items.

pub mod event;
pub mod rejection;
pub mod serialize;
pub mod token_address;
pub mod types;

pub use event::{decode_standard_events, Cis2Event};
pub use rejection::Cis2RejectionError;
pub use serialize::{
    deserialize_balance_of_response, deserialize_list, deserialize_operator_of_response,
    deserialize_token_metadata_response, serialize_balance_of_queries, serialize_list,
    serialize_operator_of_queries, serialize_token_ids, serialize_transfers,
    serialize_update_operators, Deserial, Serial,
};
pub use types::{
    AdditionalData, Address, BalanceOfQuery, MetadataChecksum, MetadataUrl, OperatorOfQuery,
    OperatorUpdate, Receiver, TokenAddress, TokenAmount, TokenId, Transfer, UpdateOperator,
};
