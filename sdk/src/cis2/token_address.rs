//! Base58Check text form of a token address.
//!
//! `version 2 ‖ ULEB128(index) ‖ ULEB128(subindex) ‖ token id`, checksummed
//! like account addresses.

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;

use super::types::{TokenAddress, TokenId};
use crate::config::TOKEN_ADDRESS_VERSION;
use crate::encoding::varint;
use crate::error::{CodecError, Result};
use crate::types::ContractAddress;

fn to_u64(value: U256, what: &str) -> Result<u64> {
    if value > U256::from(u64::MAX) {
        return Err(CodecError::decode(format!("token address {} exceeds 64 bits", what)));
    }
    Ok(value.low_u64())
}

impl TokenAddress {
    pub fn new(contract: ContractAddress, id: TokenId) -> Self {
        Self { contract, id }
    }

    pub fn to_base58(&self) -> String {
        let mut payload = varint::encode(U256::from(self.contract.index));
        payload.extend(varint::encode(U256::from(self.contract.subindex)));
        payload.extend_from_slice(self.id.as_bytes());
        bs58::encode(payload)
            .with_check_version(TOKEN_ADDRESS_VERSION)
            .into_string()
    }

    /// Parses the Base58Check text form. Any version byte other than `2` is a
    /// [`CodecError::Decode`].
    pub fn from_base58(text: &str) -> Result<Self> {
        let bytes = bs58::decode(text)
            .with_check(None)
            .into_vec()
            .map_err(|e| CodecError::decode(format!("token address {:?}: {}", text, e)))?;
        let (version, _) = bytes
            .split_first()
            .ok_or_else(|| CodecError::decode("token address is empty"))?;
        if *version != TOKEN_ADDRESS_VERSION {
            return Err(CodecError::decode(format!(
                "token address version byte must be {}, got {}",
                TOKEN_ADDRESS_VERSION, version
            )));
        }
        let (index, next) = varint::decode(&bytes, 1)?;
        let (subindex, next) = varint::decode(&bytes, next)?;
        let id = TokenId::new(&bytes[next..]).map_err(|e| CodecError::decode(e.to_string()))?;
        Ok(Self {
            contract: ContractAddress::new(to_u64(index, "index")?, to_u64(subindex, "subindex")?),
            id,
        })
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for TokenAddress {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(index: u64, subindex: u64, id: &str) -> TokenAddress {
        TokenAddress::new(ContractAddress::new(index, subindex), TokenId::from_hex(id).unwrap())
    }

    #[test]
    fn known_encodings() {
        let cases = [
            (0, 0, "", "5Pxr5EUtU"),
            (0, 0, "aa", "LQMMu3bAg7"),
            (1, 0, "", "5QTdu98KF"),
            (1, 0, "aa", "LSYqgoQcb6"),
            (1, 0, "0a", "LSYXivPSWP"),
        ];
        for (index, subindex, id, text) in cases {
            let token = address(index, subindex, id);
            assert_eq!(token.to_base58(), text, "{}/{}/{}", index, subindex, id);
            assert_eq!(TokenAddress::from_base58(text).unwrap(), token);
        }
    }

    #[test]
    fn large_index_round_trips() {
        let token = address(u64::MAX, 12_345, "deadbeef");
        let parsed: TokenAddress = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn account_address_is_not_a_token_address() {
        let err = TokenAddress::from_base58("4hXCdgNTxgM7LNm8nFJEfjDhEcyjjqQnPSRyBS9QgmHKQVxKRf")
            .unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
    }

    #[test]
    fn bad_checksum_fails() {
        assert!(matches!(
            TokenAddress::from_base58("5Pxr5EUtV"),
            Err(CodecError::Decode { .. })
        ));
    }
}
