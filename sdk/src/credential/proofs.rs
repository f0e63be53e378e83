//! Proof material attached to a credential.
//!
//! Nothing here is computed locally. The proofs arrive as hex from whatever
//! produced the credential and are copied onto the wire in a fixed order.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::encoding::{put_u32_be, put_u8};
use crate::error::{CodecError, Result};
use crate::transaction::signature::Signature;
use crate::types::HexBytes;

/// Proofs that the credential holder owns a valid identity object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdOwnershipProofs {
    pub sig: HexBytes,
    pub commitments: HexBytes,
    pub challenge: HexBytes,
    /// Per anonymity revoker proofs, keyed by revoker index. Sorted by index
    /// when serialized.
    pub proof_id_cred_pub: HashMap<u32, HexBytes>,
    pub proof_ip_sig: HexBytes,
    pub proof_reg_id: HexBytes,
    pub cred_counter_less_than_max_accounts: HexBytes,
}

impl IdOwnershipProofs {
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.serialize_into(&mut out)?;
        Ok(out)
    }

    pub fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self.sig.as_bytes());
        out.extend_from_slice(self.commitments.as_bytes());
        out.extend_from_slice(self.challenge.as_bytes());

        let count = u32::try_from(self.proof_id_cred_pub.len()).map_err(|_| {
            CodecError::size("idCredPub proofs", u32::MAX as usize, self.proof_id_cred_pub.len())
        })?;
        put_u32_be(out, count);
        let mut entries: Vec<_> = self.proof_id_cred_pub.iter().collect();
        entries.sort_unstable_by_key(|(index, _)| **index);
        for (index, proof) in entries {
            put_u32_be(out, *index);
            out.extend_from_slice(proof.as_bytes());
        }

        out.extend_from_slice(self.proof_ip_sig.as_bytes());
        out.extend_from_slice(self.proof_reg_id.as_bytes());
        out.extend_from_slice(self.cred_counter_less_than_max_accounts.as_bytes());
        Ok(())
    }
}

/// Signatures by the new credential's own keys over the deployment digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOwnershipProof {
    pub sigs: BTreeMap<u8, Signature>,
}

impl AccountOwnershipProof {
    pub fn new(sigs: BTreeMap<u8, Signature>) -> Result<Self> {
        if sigs.is_empty() {
            return Err(CodecError::invalid("account ownership proof has no signatures"));
        }
        Ok(Self { sigs })
    }

    /// Builds the proof from signatures given in key order, starting at index 0.
    pub fn from_ordered(signatures: impl IntoIterator<Item = Signature>) -> Result<Self> {
        let mut sigs = BTreeMap::new();
        for (index, signature) in signatures.into_iter().enumerate() {
            let index = u8::try_from(index)
                .map_err(|_| CodecError::size("ownership signatures", u8::MAX as usize + 1, index + 1))?;
            sigs.insert(index, signature);
        }
        Self::new(sigs)
    }

    pub fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        let count = u8::try_from(self.sigs.len())
            .map_err(|_| CodecError::size("ownership signatures", u8::MAX as usize, self.sigs.len()))?;
        put_u8(out, count);
        for (index, signature) in &self.sigs {
            put_u8(out, *index);
            out.extend_from_slice(signature.as_bytes());
        }
        Ok(())
    }
}
