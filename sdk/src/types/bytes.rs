//! Opaque byte values: module references, data blobs, contract parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fixed::fixed_bytes_type;
use crate::config::{DATA_BLOB_MAX_LENGTH, MODULE_REFERENCE_LENGTH, PARAMETER_MAX_LENGTH};
use crate::encoding::decode_hex;
use crate::error::{CodecError, Result};
use crate::hash::sha256;

fixed_bytes_type!(
    /// The SHA-256 hash identifying a deployed module.
    ModuleReference,
    MODULE_REFERENCE_LENGTH,
    "module reference"
);

impl ModuleReference {
    /// Reference of a versioned module source (version and length prefix
    /// included), as the node computes it.
    pub fn of_versioned_source(versioned_source: &[u8]) -> Self {
        Self(sha256(versioned_source))
    }
}

/// Memo or registered data, at most 256 bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DataBlob(Vec<u8>);

impl DataBlob {
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        if data.len() > DATA_BLOB_MAX_LENGTH {
            return Err(CodecError::size("data blob", DATA_BLOB_MAX_LENGTH, data.len()));
        }
        Ok(Self(data))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw parameter bytes passed to a contract function, at most 65535 bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Parameter(Vec<u8>);

impl Parameter {
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        if data.len() > PARAMETER_MAX_LENGTH {
            return Err(CodecError::size("parameter", PARAMETER_MAX_LENGTH, data.len()));
        }
        Ok(Self(data))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Unbounded bytes carried as a hex string, such as proof material produced
/// elsewhere and only copied onto the wire here.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexBytes(Vec<u8>);

impl HexBytes {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        decode_hex("hex bytes", value, None).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl TryFrom<String> for HexBytes {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<HexBytes> for String {
    fn from(value: HexBytes) -> String {
        value.to_hex()
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexBytes({})", self.to_hex())
    }
}

macro_rules! bytes_conversions {
    ($($name:ident),*) => {$(
        impl TryFrom<Vec<u8>> for $name {
            type Error = CodecError;

            fn try_from(value: Vec<u8>) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for Vec<u8> {
            fn from(value: $name) -> Vec<u8> {
                value.0
            }
        }
    )*};
}

bytes_conversions!(DataBlob, Parameter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_reference_hex() {
        let hex_ref = "44434352ddba724930d6b1b09cd58bd1fba6ad9714cf519566d5fe72d80da0d1";
        let module_ref = ModuleReference::from_hex(hex_ref).unwrap();
        assert_eq!(module_ref.to_string(), hex_ref);
        assert!(ModuleReference::from_hex("4443").is_err());
    }

    #[test]
    fn data_blob_limit() {
        assert!(DataBlob::new(vec![0u8; 256]).is_ok());
        assert_eq!(
            DataBlob::new(vec![0u8; 257]).unwrap_err(),
            CodecError::size("data blob", 256, 257)
        );
    }

    #[test]
    fn hex_bytes_serde() {
        let bytes: HexBytes = serde_json::from_str("\"00ff10\"").unwrap();
        assert_eq!(bytes.as_bytes(), &[0x00, 0xff, 0x10]);
        assert_eq!(serde_json::to_string(&bytes).unwrap(), "\"00ff10\"");
        assert!(serde_json::from_str::<HexBytes>("\"0g\"").is_err());
    }

    #[test]
    fn parameter_limit() {
        assert!(Parameter::new(vec![0u8; 65_535]).is_ok());
        assert!(Parameter::new(vec![0u8; 65_536]).is_err());
        assert!(Parameter::empty().as_bytes().is_empty());
    }
}
