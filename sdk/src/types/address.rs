//! Account and contract addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{ACCOUNT_ADDRESS_LENGTH, ACCOUNT_ADDRESS_VERSION};
use crate::error::{CodecError, Result};

/// Bytes shared by every alias of one account.
const ALIAS_COMMON_LENGTH: usize = 29;

/// Largest alias counter (three bytes).
pub const MAX_ALIAS_COUNTER: u32 = (1 << 24) - 1;

// ---------------------------------------------------------------------------
// AccountAddress
// ---------------------------------------------------------------------------

/// A 32-byte account address.
///
/// The text form is Base58Check with version byte `1`, always 50 characters
/// long. The binary form (what goes on the wire) is the raw 32 bytes.
///
/// # Example
///
/// ```
/// use ccd_sdk::types::AccountAddress;
///
/// let addr: AccountAddress = "4hXCdgNTxgM7LNm8nFJEfjDhEcyjjqQnPSRyBS9QgmHKQVxKRf".parse().unwrap();
/// assert_eq!(addr.to_string().len(), 50);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; ACCOUNT_ADDRESS_LENGTH]);

impl AccountAddress {
    pub const fn new(bytes: [u8; ACCOUNT_ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Builds an address from a slice that must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; ACCOUNT_ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
            CodecError::invalid(format!(
                "account address must be {} bytes, got {}",
                ACCOUNT_ADDRESS_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ADDRESS_LENGTH] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0)
            .with_check_version(ACCOUNT_ADDRESS_VERSION)
            .into_string()
    }

    /// Parses the Base58Check text form.
    ///
    /// Fails with [`CodecError::Decode`] on a bad checksum, a version byte
    /// other than `1`, or a payload that is not 32 bytes.
    pub fn from_base58(text: &str) -> Result<Self> {
        let bytes = bs58::decode(text)
            .with_check(None)
            .into_vec()
            .map_err(|e| CodecError::decode(format!("account address {:?}: {}", text, e)))?;
        let (version, payload) = bytes
            .split_first()
            .ok_or_else(|| CodecError::decode("account address is empty"))?;
        if *version != ACCOUNT_ADDRESS_VERSION {
            return Err(CodecError::decode(format!(
                "account address version byte must be {}, got {}",
                ACCOUNT_ADDRESS_VERSION, version
            )));
        }
        if payload.len() != ACCOUNT_ADDRESS_LENGTH {
            return Err(CodecError::decode(format!(
                "account address must decode to {} bytes, got {}",
                ACCOUNT_ADDRESS_LENGTH,
                payload.len()
            )));
        }
        let mut arr = [0u8; ACCOUNT_ADDRESS_LENGTH];
        arr.copy_from_slice(payload);
        Ok(Self(arr))
    }

    /// Returns the alias of this account selected by `counter`.
    ///
    /// Aliases share the first 29 bytes; the last three hold the counter.
    pub fn alias(&self, counter: u32) -> Result<Self> {
        if counter > MAX_ALIAS_COUNTER {
            return Err(CodecError::invalid(format!(
                "alias counter must be below 2^24, got {}",
                counter
            )));
        }
        let mut bytes = self.0;
        bytes[ALIAS_COMMON_LENGTH..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Ok(Self(bytes))
    }

    /// True when both addresses refer to the same account.
    pub fn is_alias_of(&self, other: &AccountAddress) -> bool {
        self.0[..ALIAS_COMMON_LENGTH] == other.0[..ALIAS_COMMON_LENGTH]
    }
}

impl FromStr for AccountAddress {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_base58())
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base58())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_base58(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            Self::from_slice(&bytes).map_err(serde::de::Error::custom)
        }
    }
}

// ---------------------------------------------------------------------------
// ContractAddress
// ---------------------------------------------------------------------------

/// A smart contract instance, identified by index and subindex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContractAddress {
    pub index: u64,
    pub subindex: u64,
}

impl ContractAddress {
    pub const fn new(index: u64, subindex: u64) -> Self {
        Self { index, subindex }
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.index, self.subindex)
    }
}
