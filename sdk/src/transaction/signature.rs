//! The two-level signature map attached to an account transaction.
//!
//! Credential index (0-255) maps to key index (0-255) maps to a 64-byte
//! signature. Both levels are ordered maps, so iteration order is the
//! ascending index order the wire format requires.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SIGNATURE_LENGTH;
use crate::encoding::{put_bytes_u16_be_len, put_u8, Reader};
use crate::error::{CodecError, Result};
use crate::types::fixed::fixed_bytes_type;

fixed_bytes_type!(
    /// An Ed25519 signature, hex-encoded at the API boundary.
    Signature,
    SIGNATURE_LENGTH,
    "signature"
);

/// Signatures of one credential, keyed by key index.
pub type CredentialSignature = BTreeMap<u8, Signature>;

/// All signatures on an account transaction, keyed by credential index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountTransactionSignature(BTreeMap<u8, CredentialSignature>);

impl AccountTransactionSignature {
    pub fn new() -> Self {
        Self::default()
    }

    /// The common case: one credential, one key, both index 0.
    pub fn single(signature: Signature) -> Self {
        let mut map = Self::new();
        map.insert(0, 0, signature);
        map
    }

    pub fn insert(&mut self, credential_index: u8, key_index: u8, signature: Signature) {
        self.0
            .entry(credential_index)
            .or_default()
            .insert(key_index, signature);
    }

    pub fn credentials(&self) -> &BTreeMap<u8, CredentialSignature> {
        &self.0
    }

    /// Total number of signatures across all credentials.
    ///
    /// This, not the number of credentials, is what energy is charged for.
    pub fn signature_count(&self) -> u64 {
        self.0.values().map(|keys| keys.len() as u64).sum()
    }

    /// Serializes the map:
    /// `count(1) ‖ [credIndex(1) ‖ count(1) ‖ [keyIndex(1) ‖ len(2, BE) ‖ sig]]`.
    ///
    /// Fails with `InvalidValue` when there are no signatures at all or a
    /// credential entry is empty.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(2 + self.0.len() * (2 + 67));
        self.serialize_into(&mut out)?;
        Ok(out)
    }

    pub fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.0.is_empty() {
            return Err(CodecError::invalid("no signatures were provided"));
        }
        // Indices are u8, so neither level can exceed 256 entries; 256 does
        // not fit the count byte.
        let count = u8::try_from(self.0.len())
            .map_err(|_| CodecError::size("credential signatures", u8::MAX as usize, self.0.len()))?;
        put_u8(out, count);
        for (credential_index, keys) in &self.0 {
            if keys.is_empty() {
                return Err(CodecError::invalid(format!(
                    "credential {} has no signatures",
                    credential_index
                )));
            }
            let key_count = u8::try_from(keys.len())
                .map_err(|_| CodecError::size("key signatures", u8::MAX as usize, keys.len()))?;
            put_u8(out, *credential_index);
            put_u8(out, key_count);
            for (key_index, signature) in keys {
                put_u8(out, *key_index);
                put_bytes_u16_be_len(out, "signature", signature.as_bytes())?;
            }
        }
        Ok(())
    }

    /// Reads a map written by [`serialize`](Self::serialize).
    pub fn deserialize(reader: &mut Reader<'_>) -> Result<Self> {
        let mut map = Self::new();
        let count = reader.read_u8()?;
        for _ in 0..count {
            let credential_index = reader.read_u8()?;
            let key_count = reader.read_u8()?;
            for _ in 0..key_count {
                let key_index = reader.read_u8()?;
                let signature = Signature::from_slice(reader.read_bytes_u16_be_len()?)
                    .map_err(|e| CodecError::decode(e.to_string()))?;
                map.insert(credential_index, key_index, signature);
            }
        }
        if map.signature_count() == 0 {
            return Err(CodecError::decode("signature map is empty"));
        }
        Ok(map)
    }
}
