//! # Credential Deployments
//!
//! Serialization of account credentials for two uses: deploying a credential
//! that creates a new account, and adding credentials to an existing account
//! through an UpdateCredentials transaction.
//!
//! ## Modules
//!
//! - [`values`] — Public credential values and the canonical attribute order.
//! - [`proofs`] — Identity and account ownership proofs, copied as given.
//! - [`deployment`] — Sign digests, signed deployment info and its block item.

pub mod deployment;
pub mod proofs;
pub mod values;

pub use deployment::{
    CredentialDeploymentInfo, IndexedCredentialDeploymentInfo, SignedCredentialDeployment,
    UnsignedCredentialDeploymentInfo,
};
pub use proofs::{AccountOwnershipProof, IdOwnershipProofs};
pub use values::{
    AttributeTag, ChainArData, CredentialDeploymentCommitments, CredentialDeploymentValues,
    CredentialPublicKeys, CredentialRegistrationId, Ed25519PublicKey, EncryptedShare, KeyScheme,
    Policy, VerifyKey, YearMonth,
};
