//! # Primitive Encoders
//!
//! Fixed-width integers, length-prefixed buffers and a bounds-checked
//! [`Reader`] for the decode side. Every higher-level codec in the crate is
//! built from these.
//!
//! Endianness is part of the wire format and differs by layer: account
//! transactions and credentials are big-endian, while smart-contract
//! parameters (CIS-2, CIS-3) are little-endian. The helper names spell the
//! byte order out so call sites can be checked against the format at a
//! glance.

pub mod varint;

use crate::error::{CodecError, Result};

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

pub fn put_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Booleans are a single byte, `1` for true and `0` for false.
pub fn put_bool(out: &mut Vec<u8>, value: bool) {
    out.push(u8::from(value));
}

pub fn put_u16_be(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_u16_le(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn put_u32_be(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_u64_be(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_u64_le(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Appends `bytes` behind a one-byte length.
pub fn put_bytes_u8_len(out: &mut Vec<u8>, field: &'static str, bytes: &[u8]) -> Result<()> {
    let len = u8::try_from(bytes.len())
        .map_err(|_| CodecError::size(field, u8::MAX as usize, bytes.len()))?;
    out.push(len);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Appends `bytes` behind a two-byte big-endian length.
pub fn put_bytes_u16_be_len(out: &mut Vec<u8>, field: &'static str, bytes: &[u8]) -> Result<()> {
    let len = checked_u16_len(field, bytes)?;
    put_u16_be(out, len);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Appends `bytes` behind a two-byte little-endian length.
pub fn put_bytes_u16_le_len(out: &mut Vec<u8>, field: &'static str, bytes: &[u8]) -> Result<()> {
    let len = checked_u16_len(field, bytes)?;
    put_u16_le(out, len);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Appends `bytes` behind a four-byte big-endian length.
pub fn put_bytes_u32_be_len(out: &mut Vec<u8>, field: &'static str, bytes: &[u8]) -> Result<()> {
    let len = u32::try_from(bytes.len())
        .map_err(|_| CodecError::size(field, u32::MAX as usize, bytes.len()))?;
    put_u32_be(out, len);
    out.extend_from_slice(bytes);
    Ok(())
}

fn checked_u16_len(field: &'static str, bytes: &[u8]) -> Result<u16> {
    u16::try_from(bytes.len()).map_err(|_| CodecError::size(field, u16::MAX as usize, bytes.len()))
}

/// Decodes a hex string, requiring an exact byte length when one is given.
pub fn decode_hex(field: &'static str, value: &str, expected_len: Option<usize>) -> Result<Vec<u8>> {
    let bytes = hex::decode(value)
        .map_err(|e| CodecError::invalid(format!("{}: malformed hex: {}", field, e)))?;
    match expected_len {
        Some(len) if bytes.len() != len => Err(CodecError::invalid(format!(
            "{}: expected {} bytes, got {}",
            field,
            len,
            bytes.len()
        ))),
        _ => Ok(bytes),
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// A forward-only cursor over a byte slice.
///
/// Every read is bounds-checked and fails with [`CodecError::Decode`] on a
/// truncated buffer instead of panicking.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unread tail of the buffer.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Reads exactly `len` bytes.
    pub fn read(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                CodecError::decode(format!(
                    "failed to read {} bytes at offset {} (buffer is {} bytes)",
                    len,
                    self.position,
                    self.data.len()
                ))
            })?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.read(N)?);
        Ok(arr)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a strict boolean: only `0` and `1` are accepted.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::decode(format!(
                "boolean byte must be 0 or 1, got {}",
                other
            ))),
        }
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64_be(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Reads a buffer behind a two-byte big-endian length.
    pub fn read_bytes_u16_be_len(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u16_be()? as usize;
        self.read(len)
    }

    /// Reads a buffer behind a two-byte little-endian length.
    pub fn read_bytes_u16_le_len(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u16_le()? as usize;
        self.read(len)
    }

    /// Fails if any input is left unread.
    pub fn finish(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CodecError::decode(format!(
                "{} trailing bytes after offset {}",
                self.data.len() - self.position,
                self.position
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_writers_respect_byte_order() {
        let mut out = Vec::new();
        put_u16_be(&mut out, 0x0102);
        put_u16_le(&mut out, 0x0102);
        put_u32_be(&mut out, 0x0304_0506);
        put_u64_be(&mut out, 1);
        put_u64_le(&mut out, 1);
        assert_eq!(
            hex::encode(&out),
            "01020201030405060000000000000001 0100000000000000".replace(' ', "")
        );
    }

    #[test]
    fn length_prefixes() {
        let mut out = Vec::new();
        put_bytes_u8_len(&mut out, "a", b"ab").unwrap();
        put_bytes_u16_be_len(&mut out, "b", b"c").unwrap();
        put_bytes_u16_le_len(&mut out, "c", b"d").unwrap();
        put_bytes_u32_be_len(&mut out, "d", b"e").unwrap();
        assert_eq!(hex::encode(&out), "0261620001630100640000000165");
    }

    #[test]
    fn u8_length_prefix_rejects_256_bytes() {
        let mut out = Vec::new();
        let err = put_bytes_u8_len(&mut out, "token id", &[0u8; 256]).unwrap_err();
        assert_eq!(err, CodecError::size("token id", 255, 256));
        assert!(out.is_empty());
    }

    #[test]
    fn u16_length_prefix_rejects_oversized_buffers() {
        let mut out = Vec::new();
        let big = vec![0u8; 65_536];
        assert!(matches!(
            put_bytes_u16_le_len(&mut out, "payload", &big),
            Err(CodecError::SizeExceeded { max: 65_535, .. })
        ));
    }

    #[test]
    fn decode_hex_checks_length() {
        assert_eq!(decode_hex("x", "abcd", Some(2)).unwrap(), vec![0xab, 0xcd]);
        assert!(decode_hex("x", "abcd", Some(3)).is_err());
        assert!(decode_hex("x", "abc", None).is_err());
    }

    #[test]
    fn reader_reads_in_order() {
        let data = hex::decode("0102030000000000000004").unwrap();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_u16_be().unwrap(), 0x0203);
        assert_eq!(reader.read_u64_be().unwrap(), 4);
        assert!(reader.is_empty());
        reader.finish().unwrap();
    }

    #[test]
    fn reader_fails_on_truncation() {
        let mut reader = Reader::new(&[0x00, 0x01]);
        assert!(matches!(reader.read_u32_be(), Err(CodecError::Decode { .. })));
        // A failed read does not advance the cursor.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn reader_rejects_non_canonical_bool() {
        let mut reader = Reader::new(&[2]);
        assert!(reader.read_bool().is_err());
    }

    #[test]
    fn finish_rejects_trailing_bytes() {
        let mut reader = Reader::new(&[1, 2]);
        reader.read_u8().unwrap();
        assert!(matches!(reader.finish(), Err(CodecError::Decode { .. })));
    }
}
