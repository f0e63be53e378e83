//! Credential deployment info, its sign digests and its block item form.
//!
//! A credential goes through two shapes. The unsigned info (values plus
//! identity proofs) is what gets hashed and signed by the credential's own
//! keys. Adding those signatures yields the deployment info that is either
//! submitted on its own, creating a new account, or embedded in an
//! UpdateCredentials transaction of an existing one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::proofs::{AccountOwnershipProof, IdOwnershipProofs};
use super::values::CredentialDeploymentValues;
use crate::config::{BLOCK_ITEM_KIND_CREDENTIAL_DEPLOYMENT, BLOCK_ITEM_VERSION, NORMAL_CREDENTIAL_KIND};
use crate::encoding::{put_bytes_u32_be_len, put_u64_be, put_u8};
use crate::error::Result;
use crate::hash::{sha256, sha256_multi, TransactionHash};
use crate::transaction::signature::Signature;
use crate::types::{AccountAddress, HexBytes, TransactionExpiry};

const NEW_ACCOUNT_FLAG: u8 = 0;
const EXISTING_ACCOUNT_FLAG: u8 = 1;

// ---------------------------------------------------------------------------
// UnsignedCredentialDeploymentInfo
// ---------------------------------------------------------------------------

/// A credential that still needs signatures from its own keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedCredentialDeploymentInfo {
    pub values: CredentialDeploymentValues,
    pub proofs: IdOwnershipProofs,
}

impl UnsignedCredentialDeploymentInfo {
    pub fn new(values: CredentialDeploymentValues, proofs: IdOwnershipProofs) -> Self {
        Self { values, proofs }
    }

    fn serialize_unsigned(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        Ok((self.values.serialize()?, self.proofs.serialize()?))
    }

    /// Digest the credential keys sign when the credential creates a new
    /// account: `sha256(values ‖ proofs ‖ 0 ‖ expiry)`.
    pub fn new_account_sign_digest(&self, expiry: TransactionExpiry) -> Result<[u8; 32]> {
        let (values, proofs) = self.serialize_unsigned()?;
        let mut tail = Vec::with_capacity(9);
        put_u8(&mut tail, NEW_ACCOUNT_FLAG);
        put_u64_be(&mut tail, expiry.seconds());
        Ok(sha256_multi(&[values.as_slice(), proofs.as_slice(), tail.as_slice()]))
    }

    /// Digest the credential keys sign when the credential is added to an
    /// existing account: `sha256(values ‖ proofs ‖ 1 ‖ address)`.
    pub fn existing_account_sign_digest(&self, address: &AccountAddress) -> Result<[u8; 32]> {
        let (values, proofs) = self.serialize_unsigned()?;
        Ok(sha256_multi(&[
            values.as_slice(),
            proofs.as_slice(),
            &[EXISTING_ACCOUNT_FLAG][..],
            address.as_bytes().as_slice(),
        ]))
    }

    /// Attaches the ownership signatures, producing the deployable info.
    pub fn sign(self, signatures: BTreeMap<u8, Signature>) -> Result<CredentialDeploymentInfo> {
        let ownership = AccountOwnershipProof::new(signatures)?;
        let mut proofs = self.proofs.serialize()?;
        ownership.serialize_into(&mut proofs)?;
        Ok(CredentialDeploymentInfo {
            values: self.values,
            proofs: HexBytes::new(proofs),
        })
    }
}

// ---------------------------------------------------------------------------
// CredentialDeploymentInfo
// ---------------------------------------------------------------------------

/// A signed credential: public values plus the complete proof bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDeploymentInfo {
    pub values: CredentialDeploymentValues,
    pub proofs: HexBytes,
}

impl CredentialDeploymentInfo {
    /// `values ‖ len(4, BE) ‖ proofs`.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.serialize_into(&mut out)?;
        Ok(out)
    }

    pub fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.values.serialize_into(out)?;
        put_bytes_u32_be_len(out, "credential proofs", self.proofs.as_bytes())
    }
}

/// A credential together with the account credential index it will take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedCredentialDeploymentInfo {
    pub index: u8,
    pub cdi: CredentialDeploymentInfo,
}

// ---------------------------------------------------------------------------
// SignedCredentialDeployment
// ---------------------------------------------------------------------------

/// A credential deployment that creates a new account, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCredentialDeployment {
    pub expiry: TransactionExpiry,
    pub cdi: CredentialDeploymentInfo,
}

impl SignedCredentialDeployment {
    pub fn new(expiry: TransactionExpiry, cdi: CredentialDeploymentInfo) -> Self {
        Self { expiry, cdi }
    }

    /// The block item: `1 ‖ expiry(8, BE) ‖ 1 ‖ info`.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        put_u8(&mut out, BLOCK_ITEM_KIND_CREDENTIAL_DEPLOYMENT);
        put_u64_be(&mut out, self.expiry.seconds());
        put_u8(&mut out, NORMAL_CREDENTIAL_KIND);
        self.cdi.serialize_into(&mut out)?;
        Ok(out)
    }

    /// The versioned block item sent to a node.
    pub fn serialize_for_submission(&self) -> Result<Vec<u8>> {
        let item = self.serialize()?;
        let mut out = Vec::with_capacity(1 + item.len());
        put_u8(&mut out, BLOCK_ITEM_VERSION);
        out.extend_from_slice(&item);
        debug!(size = out.len(), expiry = %self.expiry, "serialized credential deployment");
        Ok(out)
    }

    /// Hash under which the node reports the deployment's status.
    pub fn hash(&self) -> Result<TransactionHash> {
        Ok(TransactionHash::new(sha256(&self.serialize()?)))
    }
}
