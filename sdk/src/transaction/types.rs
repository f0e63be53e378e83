//! Core type definitions for account transactions.
//!
//! The caller supplies only the parts of the header it actually decides:
//! sender, nonce and expiry. Energy and payload size are always derived from
//! the serialized payload when the header is written, never taken from input.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::payload::AccountTransactionPayload;
use crate::encoding::{put_u32_be, put_u64_be};
use crate::error::{CodecError, Result};
use crate::types::{AccountAddress, Energy, TransactionExpiry};

// ---------------------------------------------------------------------------
// AccountTransactionType
// ---------------------------------------------------------------------------

/// Kind tag of an account transaction payload.
///
/// The discriminant is the byte that precedes every serialized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AccountTransactionType {
    DeployModule = 0,
    InitContract = 1,
    Update = 2,
    Transfer = 3,
    UpdateCredentials = 20,
    RegisterData = 21,
    TransferWithMemo = 22,
    ConfigureBaker = 25,
    ConfigureDelegation = 26,
}

impl AccountTransactionType {
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AccountTransactionType {
    type Error = CodecError;

    fn try_from(tag: u8) -> Result<Self> {
        Ok(match tag {
            0 => Self::DeployModule,
            1 => Self::InitContract,
            2 => Self::Update,
            3 => Self::Transfer,
            20 => Self::UpdateCredentials,
            21 => Self::RegisterData,
            22 => Self::TransferWithMemo,
            25 => Self::ConfigureBaker,
            26 => Self::ConfigureDelegation,
            other => {
                return Err(CodecError::decode(format!(
                    "unknown account transaction kind {}",
                    other
                )))
            }
        })
    }
}

impl fmt::Display for AccountTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DeployModule => "DeployModule",
            Self::InitContract => "InitContract",
            Self::Update => "Update",
            Self::Transfer => "Transfer",
            Self::UpdateCredentials => "UpdateCredentials",
            Self::RegisterData => "RegisterData",
            Self::TransferWithMemo => "TransferWithMemo",
            Self::ConfigureBaker => "ConfigureBaker",
            Self::ConfigureDelegation => "ConfigureDelegation",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// AccountTransactionHeader
// ---------------------------------------------------------------------------

/// The caller-chosen header fields of an account transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransactionHeader {
    /// Account paying for and signing the transaction.
    pub sender: AccountAddress,
    /// Sequence number of the sender's next transaction.
    pub nonce: u64,
    pub expiry: TransactionExpiry,
}

impl AccountTransactionHeader {
    pub fn new(sender: AccountAddress, nonce: u64, expiry: TransactionExpiry) -> Self {
        Self {
            sender,
            nonce,
            expiry,
        }
    }

    /// Writes the 60-byte wire header.
    ///
    /// `payload_size` counts the kind tag plus the payload body.
    pub fn serialize_into(&self, out: &mut Vec<u8>, payload_size: u32, energy: Energy) {
        out.extend_from_slice(self.sender.as_bytes());
        put_u64_be(out, self.nonce);
        put_u64_be(out, energy.value());
        put_u32_be(out, payload_size);
        put_u64_be(out, self.expiry.seconds());
    }
}

// ---------------------------------------------------------------------------
// AccountTransaction
// ---------------------------------------------------------------------------

/// An unsigned account transaction: header plus payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransaction {
    pub header: AccountTransactionHeader,
    pub payload: AccountTransactionPayload,
}

impl AccountTransaction {
    pub fn new(header: AccountTransactionHeader, payload: AccountTransactionPayload) -> Self {
        Self { header, payload }
    }

    pub fn kind(&self) -> AccountTransactionType {
        self.payload.kind()
    }
}
