//! # Hashing
//!
//! Every digest the node checks is plain SHA-256: transaction hashes, sign
//! digests, module references. Keeping the hasher behind two small helpers
//! means the codecs never build a temporary concatenation just to hash it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::HASH_LENGTH;
use crate::error::{CodecError, Result};

/// SHA-256 of `data` as a fixed-size array.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    sha256_multi(&[data])
}

/// SHA-256 over several slices fed in order.
///
/// `sha256_multi(&[a, b])` equals `sha256(&[a, b].concat())`.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

// ---------------------------------------------------------------------------
// TransactionHash
// ---------------------------------------------------------------------------

/// A 32-byte SHA-256 digest identifying a block item or a sign digest.
///
/// Displayed and serialized as lowercase hex, the form nodes use in their
/// responses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionHash([u8; HASH_LENGTH]);

impl TransactionHash {
    pub const fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Hashes `data` with SHA-256.
    pub fn digest(data: &[u8]) -> Self {
        Self(sha256(data))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        let bytes = hex::decode(value)?;
        let arr: [u8; HASH_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            CodecError::invalid(format!(
                "transaction hash must be {} bytes, got {}",
                HASH_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

impl From<[u8; HASH_LENGTH]> for TransactionHash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for TransactionHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for TransactionHash {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionHash({})", self.to_hex())
    }
}

impl Serialize for TransactionHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for TransactionHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            let arr: [u8; HASH_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
                serde::de::Error::custom(format!("expected 32-byte hash, got {}", bytes.len()))
            })?;
            Ok(Self(arr))
        }
    }
}
