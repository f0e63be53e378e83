//! # VarInt (ULEB128)
//!
//! Unsigned LEB128 over 256-bit integers. Seven bits per byte, least
//! significant group first; a clear high bit marks the final byte. CIS-2
//! token amounts and the index/subindex of a token address use it.

use primitive_types::U256;

use crate::encoding::Reader;
use crate::error::{CodecError, Result};

/// Largest number of bytes a 256-bit value can occupy (`ceil(256 / 7)`).
pub const MAX_ENCODED_LEN: usize = 37;

/// Encodes `value` as ULEB128.
pub fn encode(value: U256) -> Vec<u8> {
    let mut out = Vec::with_capacity(4);
    let mut rest = value;
    loop {
        let group = (rest.low_u32() & 0x7f) as u8;
        rest >>= 7usize;
        if rest.is_zero() {
            out.push(group);
            return out;
        }
        out.push(group | 0x80);
    }
}

/// Encodes `value`, failing when the encoding is longer than `max_len`.
pub fn encode_bounded(value: U256, field: &'static str, max_len: usize) -> Result<Vec<u8>> {
    let encoded = encode(value);
    if encoded.len() > max_len {
        return Err(CodecError::size(field, max_len, encoded.len()));
    }
    Ok(encoded)
}

/// Decodes one ULEB128 number starting at `offset`.
///
/// Returns the value together with the offset just past its final byte, so
/// that consecutive numbers can be read by chaining calls.
pub fn decode(bytes: &[u8], offset: usize) -> Result<(U256, usize)> {
    if offset >= bytes.len() {
        return Err(CodecError::decode(format!(
            "ULEB128 needs at least one byte at offset {}",
            offset
        )));
    }
    let mut value = U256::zero();
    for (i, byte) in bytes[offset..].iter().enumerate() {
        let group = U256::from(byte & 0x7f);
        if !group.is_zero() {
            let shift = 7 * i;
            // Any bit shifted past 256 is lost, so reject instead of wrapping.
            if shift >= 256 || group.bits() + shift > 256 {
                return Err(CodecError::decode("ULEB128 value exceeds 256 bits"));
            }
            value |= group << shift;
        }
        if byte & 0x80 == 0 {
            return Ok((value, offset + i + 1));
        }
    }
    Err(CodecError::decode("ULEB128 could not find end of number"))
}

/// Decodes a buffer that must hold exactly one ULEB128 number.
pub fn decode_exact(bytes: &[u8]) -> Result<U256> {
    let (value, end) = decode(bytes, 0)?;
    if end != bytes.len() {
        return Err(CodecError::decode(format!(
            "{} trailing bytes after ULEB128 number",
            bytes.len() - end
        )));
    }
    Ok(value)
}

impl<'a> Reader<'a> {
    /// Reads a ULEB128 number whose encoding may be at most `max_len` bytes.
    pub fn read_varint(&mut self, field: &'static str, max_len: usize) -> Result<U256> {
        let rest = self.remaining();
        let end = rest
            .iter()
            .position(|b| b & 0x80 == 0)
            .map(|i| i + 1)
            .ok_or_else(|| CodecError::decode(format!("{}: could not find end of ULEB128", field)))?;
        if end > max_len {
            return Err(CodecError::size(field, max_len, end));
        }
        let value = decode_exact(self.read(end)?)?;
        Ok(value)
    }
}
