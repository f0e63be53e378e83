//! CIS-2 parameter encoding and response decoding.
//!
//! Contract parameters use little-endian integers throughout, unlike the
//! big-endian transaction layer. Every batched call (transfers, operator
//! updates, queries) is a two-byte count followed by the items.

use primitive_types::U256;

use super::types::{
    AdditionalData, Address, BalanceOfQuery, MetadataChecksum, MetadataUrl, OperatorOfQuery,
    OperatorUpdate, Receiver, TokenAmount, TokenId, Transfer, UpdateOperator,
};
use crate::config::{
    ACCOUNT_ADDRESS_LENGTH, HASH_LENGTH, TOKEN_AMOUNT_MAX_LENGTH, TOKEN_RECEIVE_HOOK_MAX_LENGTH,
};
use crate::encoding::{
    put_bool, put_bytes_u16_le_len, put_bytes_u8_len, put_u16_le, put_u64_le, put_u8, varint, Reader,
};
use crate::error::{CodecError, Result};
use crate::types::{AccountAddress, ContractAddress, EntrypointName};

const ADDRESS_ACCOUNT: u8 = 0;
const ADDRESS_CONTRACT: u8 = 1;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A value with a CIS-2 parameter encoding.
pub trait Serial {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()>;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.serial(&mut out)?;
        Ok(out)
    }
}

/// A value that can be read back from contract output.
pub trait Deserial: Sized {
    fn deserial(reader: &mut Reader<'_>) -> Result<Self>;
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

impl Serial for TokenId {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        put_bytes_u8_len(out, "token id", self.as_bytes())
    }
}

impl Deserial for TokenId {
    fn deserial(reader: &mut Reader<'_>) -> Result<Self> {
        let len = reader.read_u8()? as usize;
        TokenId::new(reader.read(len)?)
    }
}

impl Serial for TokenAmount {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        let encoded = varint::encode_bounded(self.value(), "token amount", TOKEN_AMOUNT_MAX_LENGTH)?;
        out.extend_from_slice(&encoded);
        Ok(())
    }
}

impl Deserial for TokenAmount {
    fn deserial(reader: &mut Reader<'_>) -> Result<Self> {
        let value: U256 = reader.read_varint("token amount", TOKEN_AMOUNT_MAX_LENGTH)?;
        Ok(TokenAmount::new(value))
    }
}

fn put_contract_address(out: &mut Vec<u8>, address: &ContractAddress) {
    put_u64_le(out, address.index);
    put_u64_le(out, address.subindex);
}

fn read_contract_address(reader: &mut Reader<'_>) -> Result<ContractAddress> {
    let index = reader.read_u64_le()?;
    let subindex = reader.read_u64_le()?;
    Ok(ContractAddress::new(index, subindex))
}

/// Writes an entrypoint name behind a two-byte little-endian length.
pub(crate) fn put_receive_hook_name(out: &mut Vec<u8>, name: &EntrypointName) -> Result<()> {
    let hook = name.as_str().as_bytes();
    if hook.len() > TOKEN_RECEIVE_HOOK_MAX_LENGTH {
        return Err(CodecError::size(
            "receive hook name",
            TOKEN_RECEIVE_HOOK_MAX_LENGTH,
            hook.len(),
        ));
    }
    put_bytes_u16_le_len(out, "receive hook name", hook)
}

impl Serial for ContractAddress {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        put_contract_address(out, self);
        Ok(())
    }
}

impl Serial for Address {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Address::Account(account) => {
                put_u8(out, ADDRESS_ACCOUNT);
                out.extend_from_slice(account.as_bytes());
            }
            Address::Contract(contract) => {
                put_u8(out, ADDRESS_CONTRACT);
                put_contract_address(out, contract);
            }
        }
        Ok(())
    }
}

impl Deserial for Address {
    fn deserial(reader: &mut Reader<'_>) -> Result<Self> {
        match reader.read_u8()? {
            ADDRESS_ACCOUNT => {
                let bytes: [u8; ACCOUNT_ADDRESS_LENGTH] = reader.read_array()?;
                Ok(Address::Account(AccountAddress::new(bytes)))
            }
            ADDRESS_CONTRACT => Ok(Address::Contract(read_contract_address(reader)?)),
            other => Err(CodecError::decode(format!("invalid address kind {}", other))),
        }
    }
}

impl Serial for Receiver {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Receiver::Account(account) => {
                put_u8(out, ADDRESS_ACCOUNT);
                out.extend_from_slice(account.as_bytes());
            }
            Receiver::Contract { address, hook_name } => {
                put_u8(out, ADDRESS_CONTRACT);
                put_contract_address(out, address);
                put_receive_hook_name(out, hook_name)?;
            }
        }
        Ok(())
    }
}

impl Serial for AdditionalData {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        put_bytes_u16_le_len(out, "additional data", self.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

impl Serial for Transfer {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        self.token_id.serial(out)?;
        self.token_amount.serial(out)?;
        self.from.serial(out)?;
        self.to.serial(out)?;
        self.data.serial(out)
    }
}

impl Serial for OperatorUpdate {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        put_u8(out, *self as u8);
        Ok(())
    }
}

impl Deserial for OperatorUpdate {
    fn deserial(reader: &mut Reader<'_>) -> Result<Self> {
        match reader.read_u8()? {
            0 => Ok(OperatorUpdate::Remove),
            1 => Ok(OperatorUpdate::Add),
            other => Err(CodecError::decode(format!("invalid operator update {}", other))),
        }
    }
}

impl Serial for UpdateOperator {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        self.update.serial(out)?;
        self.address.serial(out)
    }
}

impl Serial for BalanceOfQuery {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        self.token_id.serial(out)?;
        self.address.serial(out)
    }
}

impl Serial for OperatorOfQuery {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        self.owner.serial(out)?;
        self.address.serial(out)
    }
}

impl Serial for MetadataUrl {
    fn serial(&self, out: &mut Vec<u8>) -> Result<()> {
        put_bytes_u16_le_len(out, "metadata url", self.url.as_bytes())?;
        match &self.hash {
            Some(hash) => {
                put_bool(out, true);
                out.extend_from_slice(hash.as_bytes());
            }
            None => put_bool(out, false),
        }
        Ok(())
    }
}

impl Deserial for MetadataUrl {
    fn deserial(reader: &mut Reader<'_>) -> Result<Self> {
        let url = String::from_utf8(reader.read_bytes_u16_le_len()?.to_vec())
            .map_err(|e| CodecError::decode(format!("metadata url is not UTF-8: {}", e)))?;
        let hash = if reader.read_bool()? {
            let bytes: [u8; HASH_LENGTH] = reader.read_array()?;
            Some(MetadataChecksum::new(bytes))
        } else {
            None
        };
        Ok(MetadataUrl { url, hash })
    }
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Writes `items` behind a two-byte little-endian count.
pub fn serialize_list<T: Serial>(items: &[T]) -> Result<Vec<u8>> {
    let count = u16::try_from(items.len())
        .map_err(|_| CodecError::size("list", u16::MAX as usize, items.len()))?;
    let mut out = Vec::new();
    put_u16_le(&mut out, count);
    for item in items {
        item.serial(&mut out)?;
    }
    Ok(out)
}

/// Reads a two-byte count followed by that many items. The whole buffer must
/// be consumed.
pub fn deserialize_list<T, F>(bytes: &[u8], mut read_item: F) -> Result<Vec<T>>
where
    F: FnMut(&mut Reader<'_>) -> Result<T>,
{
    let mut reader = Reader::new(bytes);
    let count = reader.read_u16_le()?;
    let mut items = Vec::with_capacity(count as usize);
    for _ in 0..count {
        items.push(read_item(&mut reader)?);
    }
    reader.finish()?;
    Ok(items)
}

pub fn serialize_transfers(transfers: &[Transfer]) -> Result<Vec<u8>> {
    serialize_list(transfers)
}

pub fn serialize_update_operators(updates: &[UpdateOperator]) -> Result<Vec<u8>> {
    serialize_list(updates)
}

pub fn serialize_balance_of_queries(queries: &[BalanceOfQuery]) -> Result<Vec<u8>> {
    serialize_list(queries)
}

pub fn serialize_operator_of_queries(queries: &[OperatorOfQuery]) -> Result<Vec<u8>> {
    serialize_list(queries)
}

/// Parameter of the `tokenMetadata` entrypoint.
pub fn serialize_token_ids(ids: &[TokenId]) -> Result<Vec<u8>> {
    serialize_list(ids)
}

/// Balances in the order of the queries sent to `balanceOf`.
pub fn deserialize_balance_of_response(bytes: &[u8]) -> Result<Vec<TokenAmount>> {
    deserialize_list(bytes, TokenAmount::deserial)
}

pub fn deserialize_operator_of_response(bytes: &[u8]) -> Result<Vec<bool>> {
    deserialize_list(bytes, |reader| reader.read_bool())
}

pub fn deserialize_token_metadata_response(bytes: &[u8]) -> Result<Vec<MetadataUrl>> {
    deserialize_list(bytes, MetadataUrl::deserial)
}
