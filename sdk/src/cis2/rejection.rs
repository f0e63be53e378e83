//! Reject reasons returned by CIS-2 contracts.

use serde::{Deserialize, Serialize};

pub const INVALID_TOKEN_ID_TAG: i32 = -42_000_001;
pub const INSUFFICIENT_FUNDS_TAG: i32 = -42_000_002;
pub const UNAUTHORIZED_TAG: i32 = -42_000_003;

/// Why a CIS-2 contract rejected an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cis2RejectionError {
    InvalidTokenId,
    InsufficientFunds,
    Unauthorized,
    /// A contract-specific reason outside the standard range.
    Custom(i32),
}

impl Cis2RejectionError {
    /// Maps the contract's reject reason.
    pub fn from_reject_reason(reason: i32) -> Self {
        match reason {
            INVALID_TOKEN_ID_TAG => Self::InvalidTokenId,
            INSUFFICIENT_FUNDS_TAG => Self::InsufficientFunds,
            UNAUTHORIZED_TAG => Self::Unauthorized,
            other => Self::Custom(other),
        }
    }

    pub fn tag(&self) -> i32 {
        match self {
            Self::InvalidTokenId => INVALID_TOKEN_ID_TAG,
            Self::InsufficientFunds => INSUFFICIENT_FUNDS_TAG,
            Self::Unauthorized => UNAUTHORIZED_TAG,
            Self::Custom(tag) => *tag,
        }
    }
}

impl From<i32> for Cis2RejectionError {
    fn from(reason: i32) -> Self {
        Self::from_reject_reason(reason)
    }
}
