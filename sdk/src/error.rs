//! Error types for every codec in the crate.
//!
//! All failures are local and deterministic: the same input bytes or values
//! always fail the same way, so none of these errors is worth retrying.
//! Callers are expected to surface them before anything is submitted to a
//! node.

use thiserror::Error;

use crate::transaction::types::AccountTransactionType;

/// Errors produced while encoding or decoding wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Malformed input that cannot be repaired: bad hex, a negative amount,
    /// a name with illegal characters, an empty signature map.
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },

    /// A field is larger than the maximum its wire encoding allows.
    #[error("{field} exceeds maximum size of {max} bytes (got {actual})")]
    SizeExceeded {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// The inverse of a payload encoding is intentionally not provided.
    #[error("deserialization is not supported for {kind} payloads")]
    UnsupportedOperation { kind: AccountTransactionType },

    /// Truncated buffer, unknown discriminator or checksum/version mismatch.
    #[error("decode error: {reason}")]
    Decode { reason: String },
}

impl CodecError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    pub(crate) fn size(field: &'static str, max: usize, actual: usize) -> Self {
        Self::SizeExceeded { field, max, actual }
    }
}

impl From<hex::FromHexError> for CodecError {
    fn from(err: hex::FromHexError) -> Self {
        Self::invalid(format!("malformed hex: {}", err))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_errors_become_invalid_value() {
        let err: CodecError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, CodecError::InvalidValue { .. }));
    }

    #[test]
    fn size_exceeded_message_names_the_field() {
        let err = CodecError::size("token id", 255, 256);
        assert_eq!(
            err.to_string(),
            "token id exceeds maximum size of 255 bytes (got 256)"
        );
    }

    #[test]
    fn unsupported_operation_names_the_kind() {
        let err = CodecError::UnsupportedOperation {
            kind: AccountTransactionType::DeployModule,
        };
        assert_eq!(
            err.to_string(),
            "deserialization is not supported for DeployModule payloads"
        );
    }
}
