//! # CIS-3 Sponsored Transactions
//!
//! A sponsoree signs a [`PermitMessage`]; a sponsor submits it to the
//! contract's `permit` entrypoint as a [`PermitParam`] and pays the energy.
//! `supportsPermit` tells which entrypoints a contract accepts permits for.

use serde::{Deserialize, Serialize};

use crate::cis2::serialize::{deserialize_list, put_receive_hook_name, Serial};
use crate::config::{PERMIT_PAYLOAD_MAX_LENGTH, SUPPORTS_PERMIT_QUERY_MAX_LENGTH};
use crate::encoding::{put_bytes_u16_le_len, put_u16_le, put_u64_le, put_u8};
use crate::error::{CodecError, Result};
use crate::transaction::signature::AccountTransactionSignature;
use crate::types::{AccountAddress, ContractAddress, EntrypointName, HexBytes, Timestamp};

/// Scheme tag in front of every signature in a permit.
const ED25519_SIGNATURE_TAG: u8 = 0;

// ---------------------------------------------------------------------------
// Permit
// ---------------------------------------------------------------------------

/// The invocation a sponsoree authorizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitMessage {
    pub contract_address: ContractAddress,
    /// Replay protection, tracked per signer by the contract.
    pub nonce: u64,
    pub timestamp: Timestamp,
    pub entrypoint: EntrypointName,
    /// Parameter for `entrypoint`, at most 65535 bytes.
    pub payload: HexBytes,
}

impl PermitMessage {
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(16 + 8 + 8 + 2 + 2 + self.payload.len());
        self.serialize_into(&mut out)?;
        Ok(out)
    }

    pub fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.payload.len() > PERMIT_PAYLOAD_MAX_LENGTH {
            return Err(CodecError::size(
                "permit payload",
                PERMIT_PAYLOAD_MAX_LENGTH,
                self.payload.len(),
            ));
        }
        self.contract_address.serial(out)?;
        put_u64_le(out, self.nonce);
        put_u64_le(out, self.timestamp.millis());
        put_receive_hook_name(out, &self.entrypoint)?;
        put_bytes_u16_le_len(out, "permit payload", self.payload.as_bytes())
    }
}

/// Parameter of the `permit` entrypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitParam {
    pub signature: AccountTransactionSignature,
    pub signer: AccountAddress,
    pub message: PermitMessage,
}

impl PermitParam {
    /// `signatures ‖ signer ‖ message`.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        put_permit_signatures(&mut out, &self.signature)?;
        out.extend_from_slice(self.signer.as_bytes());
        self.message.serialize_into(&mut out)?;
        Ok(out)
    }
}

/// Contract-side form of the signature map: one-byte counts at both levels
/// and a scheme tag in place of the length in front of each signature.
fn put_permit_signatures(out: &mut Vec<u8>, signature: &AccountTransactionSignature) -> Result<()> {
    let credentials = signature.credentials();
    if credentials.is_empty() {
        return Err(CodecError::invalid("no signatures were provided"));
    }
    let count = u8::try_from(credentials.len())
        .map_err(|_| CodecError::size("credential signatures", u8::MAX as usize, credentials.len()))?;
    put_u8(out, count);
    for (credential_index, keys) in credentials {
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
        for (key_index, sig) in keys {
            put_u8(out, *key_index);
            put_u8(out, ED25519_SIGNATURE_TAG);
            out.extend_from_slice(sig.as_bytes());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// supportsPermit
// ---------------------------------------------------------------------------

/// Parameter of `supportsPermit`: the entrypoints to ask about.
pub fn serialize_supports_permit_query(entrypoints: &[EntrypointName]) -> Result<Vec<u8>> {
    if entrypoints.len() > SUPPORTS_PERMIT_QUERY_MAX_LENGTH {
        return Err(CodecError::size(
            "supportsPermit query",
            SUPPORTS_PERMIT_QUERY_MAX_LENGTH,
            entrypoints.len(),
        ));
    }
    let mut out = Vec::new();
    put_u16_le(&mut out, entrypoints.len() as u16);
    for entrypoint in entrypoints {
        put_receive_hook_name(&mut out, entrypoint)?;
    }
    Ok(out)
}

/// One flag per queried entrypoint, in query order.
pub fn deserialize_supports_permit_response(bytes: &[u8]) -> Result<Vec<bool>> {
    deserialize_list(bytes, |reader| reader.read_bool())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::signature::Signature;

    fn message() -> PermitMessage {
        PermitMessage {
            contract_address: ContractAddress::new(7, 0),
            nonce: 1,
            timestamp: Timestamp::from_millis(1_000),
            entrypoint: EntrypointName::new("transfer").unwrap(),
            payload: HexBytes::new(vec![0xaa, 0xbb]),
        }
    }

    #[test]
    fn message_layout() {
        let bytes = message().serialize().unwrap();
        let expected = format!(
            "{}{}{}{}{}{}",
            "07000000000000000000000000000000",
            "0100000000000000",
            "e803000000000000",
            "0800",
            hex::encode("transfer"),
            "0200aabb"
        );
        assert_eq!(hex::encode(bytes), expected);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let mut msg = message();
        msg.payload = HexBytes::new(vec![0; PERMIT_PAYLOAD_MAX_LENGTH + 1]);
        assert_eq!(
            msg.serialize().unwrap_err(),
            CodecError::size("permit payload", PERMIT_PAYLOAD_MAX_LENGTH, PERMIT_PAYLOAD_MAX_LENGTH + 1)
        );
    }

    #[test]
    fn param_layout() {
        let param = PermitParam {
            signature: AccountTransactionSignature::single(Signature::new([0x11; 64])),
            signer: AccountAddress::new([0x22; 32]),
            message: message(),
        };
        let bytes = param.serialize().unwrap();
        let header = format!("0100010000{}", "11".repeat(64));
        let signer = "22".repeat(32);
        let msg = hex::encode(message().serialize().unwrap());
        assert_eq!(hex::encode(bytes), format!("{}{}{}", header, signer, msg));
    }

    #[test]
    fn param_needs_a_signature() {
        let param = PermitParam {
            signature: AccountTransactionSignature::new(),
            signer: AccountAddress::new([0x22; 32]),
            message: message(),
        };
        assert!(matches!(param.serialize(), Err(CodecError::InvalidValue { .. })));
    }

    #[test]
    fn supports_permit_query() {
        let names = [
            EntrypointName::new("transfer").unwrap(),
            EntrypointName::new("updateOperator").unwrap(),
        ];
        let bytes = serialize_supports_permit_query(&names).unwrap();
        let expected = format!(
            "0200{}{}{}{}",
            "0800",
            hex::encode("transfer"),
            "0e00",
            hex::encode("updateOperator")
        );
        assert_eq!(hex::encode(bytes), expected);
    }

    #[test]
    fn supports_permit_response() {
        assert_eq!(
            deserialize_supports_permit_response(&[2, 0, 1, 0]).unwrap(),
            vec![true, false]
        );
        assert!(deserialize_supports_permit_response(&[2, 0, 1]).is_err());
    }
}
