//! CIS-2 value types.

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::config::{HASH_LENGTH, TOKEN_ID_MAX_LENGTH};
use crate::encoding::decode_hex;
use crate::error::{CodecError, Result};
use crate::types::fixed::fixed_bytes_type;
use crate::types::{AccountAddress, ContractAddress, EntrypointName, HexBytes};

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Identifier of a token within a CIS-2 contract, at most 255 bytes.
///
/// Hex-encoded in JSON and text. The empty id is valid and is what
/// single-token contracts use.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(Vec<u8>);

impl TokenId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.len() > TOKEN_ID_MAX_LENGTH {
            return Err(CodecError::size("token id", TOKEN_ID_MAX_LENGTH, bytes.len()));
        }
        Ok(Self(bytes))
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        Self::new(decode_hex("token id", value, None)?)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl TryFrom<String> for TokenId {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<TokenId> for String {
    fn from(value: TokenId) -> String {
        value.to_hex()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// TokenAmount
// ---------------------------------------------------------------------------

/// A non-negative token amount of up to 256 bits.
///
/// Written as a decimal string in JSON, since amounts routinely exceed what
/// JSON numbers carry exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    pub fn value(&self) -> U256 {
        self.0
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl FromStr for TokenAmount {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with('-') {
            return Err(CodecError::invalid(format!(
                "token amount {} is negative",
                s
            )));
        }
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|e| CodecError::invalid(format!("token amount {:?}: {:?}", s, e)))
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TokenAmount> for String {
    fn from(value: TokenAmount) -> String {
        value.to_string()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// An account or a contract instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Address {
    Account(AccountAddress),
    Contract(ContractAddress),
}

impl From<AccountAddress> for Address {
    fn from(address: AccountAddress) -> Self {
        Self::Account(address)
    }
}

impl From<ContractAddress> for Address {
    fn from(address: ContractAddress) -> Self {
        Self::Contract(address)
    }
}

/// Destination of a transfer. Contracts are notified through the named
/// receive hook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Receiver {
    Account(AccountAddress),
    #[serde(rename_all = "camelCase")]
    Contract {
        address: ContractAddress,
        hook_name: EntrypointName,
    },
}

impl From<AccountAddress> for Receiver {
    fn from(address: AccountAddress) -> Self {
        Self::Account(address)
    }
}

/// Opaque bytes passed along with a transfer or an operator update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalData(HexBytes);

impl AdditionalData {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(HexBytes::new(bytes))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// One entry of a `transfer` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub token_id: TokenId,
    pub token_amount: TokenAmount,
    pub from: Address,
    pub to: Receiver,
    #[serde(default)]
    pub data: AdditionalData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorUpdate {
    Remove = 0,
    Add = 1,
}

/// One entry of an `updateOperator` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOperator {
    #[serde(rename = "type")]
    pub update: OperatorUpdate,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOfQuery {
    pub token_id: TokenId,
    pub address: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorOfQuery {
    pub owner: Address,
    /// The address that may or may not be an operator of `owner`.
    pub address: Address,
}

fixed_bytes_type!(
    /// SHA-256 checksum of the document behind a metadata URL.
    MetadataChecksum,
    HASH_LENGTH,
    "metadata checksum"
);

/// Where a token's metadata lives, optionally pinned by checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<MetadataChecksum>,
}

/// A token within a specific contract instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenAddress {
    pub contract: ContractAddress,
    pub id: TokenId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_id_limit() {
        assert!(TokenId::new(vec![0; 255]).is_ok());
        assert_eq!(
            TokenId::new(vec![0; 256]).unwrap_err(),
            CodecError::size("token id", 255, 256)
        );
    }

    #[test]
    fn token_id_hex() {
        let id = TokenId::from_hex("0a0b").unwrap();
        assert_eq!(id.as_bytes(), &[0x0a, 0x0b]);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0a0b\"");
        assert!(TokenId::from_hex("xyz").is_err());
    }

    #[test]
    fn negative_amount_is_invalid() {
        assert!(matches!(
            "-1".parse::<TokenAmount>(),
            Err(CodecError::InvalidValue { .. })
        ));
    }

    #[test]
    fn amount_json_is_decimal_string() {
        let big = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let amount: TokenAmount = serde_json::from_str(&format!("\"{}\"", big)).unwrap();
        assert_eq!(amount.value(), U256::MAX);
        assert_eq!(serde_json::to_string(&amount).unwrap(), format!("\"{}\"", big));
    }
}
