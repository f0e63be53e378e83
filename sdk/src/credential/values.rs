//! Public values of a credential deployment.
//!
//! These are the parts of a credential the chain stores in the clear: the
//! account keys, the registration id, the anonymity revoker shares and the
//! attribute policy. The serialized form feeds both the sign digests and the
//! UpdateCredentials payload, so attribute order must be canonical.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{AR_SHARE_LENGTH, CREDENTIAL_ID_LENGTH, VERIFY_KEY_LENGTH};
use crate::encoding::{put_bytes_u8_len, put_u16_be, put_u32_be, put_u8};
use crate::error::{CodecError, Result};
use crate::types::fixed::fixed_bytes_type;
use crate::types::HexBytes;

fixed_bytes_type!(
    /// An Ed25519 public key of an account credential.
    Ed25519PublicKey,
    VERIFY_KEY_LENGTH,
    "verify key"
);

fixed_bytes_type!(
    /// The credential registration id, a compressed group element.
    CredentialRegistrationId,
    CREDENTIAL_ID_LENGTH,
    "credential registration id"
);

fixed_bytes_type!(
    /// Encryption of the `idCredPub` share held by one anonymity revoker.
    EncryptedShare,
    AR_SHARE_LENGTH,
    "encrypted share"
);

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Identity attributes a credential may reveal, with their wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum AttributeTag {
    FirstName = 0,
    LastName = 1,
    Sex = 2,
    Dob = 3,
    CountryOfResidence = 4,
    Nationality = 5,
    IdDocType = 6,
    IdDocNo = 7,
    IdDocIssuer = 8,
    IdDocIssuedAt = 9,
    IdDocExpiresAt = 10,
    NationalIdNo = 11,
    TaxIdNo = 12,
}

impl AttributeTag {
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AttributeTag {
    type Error = CodecError;

    fn try_from(tag: u8) -> Result<Self> {
        use AttributeTag::*;
        const ALL: [AttributeTag; 13] = [
            FirstName,
            LastName,
            Sex,
            Dob,
            CountryOfResidence,
            Nationality,
            IdDocType,
            IdDocNo,
            IdDocIssuer,
            IdDocIssuedAt,
            IdDocExpiresAt,
            NationalIdNo,
            TaxIdNo,
        ];
        ALL.get(tag as usize)
            .copied()
            .ok_or_else(|| CodecError::decode(format!("unknown attribute tag {}", tag)))
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Signature scheme of a credential key. Only Ed25519 exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyScheme {
    Ed25519 = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyKey {
    pub scheme_id: KeyScheme,
    pub verify_key: Ed25519PublicKey,
}

impl VerifyKey {
    pub fn ed25519(key: Ed25519PublicKey) -> Self {
        Self {
            scheme_id: KeyScheme::Ed25519,
            verify_key: key,
        }
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        put_u8(out, self.scheme_id as u8);
        out.extend_from_slice(self.verify_key.as_bytes());
    }
}

/// The keys of one credential and how many of them must sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPublicKeys {
    pub keys: BTreeMap<u8, VerifyKey>,
    pub threshold: u8,
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// A calendar month, written `YYYYMM` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    pub fn new(year: u16, month: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(CodecError::invalid(format!("month {} is out of range", month)));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        put_u16_be(out, self.year);
        put_u8(out, self.month);
    }
}

impl std::str::FromStr for YearMonth {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::invalid(format!(
                "expected a YYYYMM date, got {:?}",
                s
            )));
        }
        let year = s[..4]
            .parse()
            .map_err(|_| CodecError::invalid("bad year"))?;
        let month = s[4..]
            .parse()
            .map_err(|_| CodecError::invalid("bad month"))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> String {
        value.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub valid_to: YearMonth,
    pub created_at: YearMonth,
    /// Revealed attribute values. Any input order is accepted; the
    /// serialized form is always sorted by tag.
    pub revealed_attributes: HashMap<AttributeTag, String>,
}

impl Policy {
    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.valid_to.serialize_into(out);
        self.created_at.serialize_into(out);

        let count = u16::try_from(self.revealed_attributes.len()).map_err(|_| {
            CodecError::size("revealed attributes", u16::MAX as usize, self.revealed_attributes.len())
        })?;
        put_u16_be(out, count);

        let mut attributes: Vec<_> = self.revealed_attributes.iter().collect();
        attributes.sort_unstable_by_key(|(tag, _)| **tag);
        for (tag, value) in attributes {
            put_u8(out, tag.tag());
            put_bytes_u8_len(out, "attribute value", value.as_bytes())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CredentialDeploymentValues
// ---------------------------------------------------------------------------

/// One anonymity revoker's share of the credential holder's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainArData {
    pub enc_id_cred_pub_share: EncryptedShare,
}

/// Commitments to the hidden attributes. They travel inside the proofs and
/// are never written by [`CredentialDeploymentValues::serialize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDeploymentCommitments {
    pub cmm_prf: HexBytes,
    pub cmm_cred_counter: HexBytes,
    pub cmm_id_cred_sec_sharing_coeff: Vec<HexBytes>,
    pub cmm_attributes: HashMap<AttributeTag, HexBytes>,
    pub cmm_max_accounts: HexBytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDeploymentValues {
    pub credential_public_keys: CredentialPublicKeys,
    pub cred_id: CredentialRegistrationId,
    pub ip_identity: u32,
    pub revocation_threshold: u8,
    pub ar_data: BTreeMap<u32, ChainArData>,
    pub policy: Policy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitments: Option<CredentialDeploymentCommitments>,
}

impl CredentialDeploymentValues {
    /// Number of account keys this credential adds.
    pub fn key_count(&self) -> usize {
        self.credential_public_keys.keys.len()
    }

    /// Serializes the values in the node's layout.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(
            1 + self.key_count() * (2 + VERIFY_KEY_LENGTH)
                + 1
                + CREDENTIAL_ID_LENGTH
                + 5
                + 2
                + self.ar_data.len() * (4 + AR_SHARE_LENGTH)
                + 8,
        );
        self.serialize_into(&mut out)?;
        Ok(out)
    }

    pub fn serialize_into(&self, out: &mut Vec<u8>) -> Result<()> {
        let keys = &self.credential_public_keys.keys;
        let key_count = u8::try_from(keys.len())
            .map_err(|_| CodecError::size("credential keys", u8::MAX as usize, keys.len()))?;
        put_u8(out, key_count);
        for (index, key) in keys {
            put_u8(out, *index);
            key.serialize_into(out);
        }
        put_u8(out, self.credential_public_keys.threshold);

        out.extend_from_slice(self.cred_id.as_bytes());
        put_u32_be(out, self.ip_identity);
        put_u8(out, self.revocation_threshold);

        let ar_count = u16::try_from(self.ar_data.len())
            .map_err(|_| CodecError::size("anonymity revoker data", u16::MAX as usize, self.ar_data.len()))?;
        put_u16_be(out, ar_count);
        for (ar_identity, data) in &self.ar_data {
            put_u32_be(out, *ar_identity);
            out.extend_from_slice(data.enc_id_cred_pub_share.as_bytes());
        }

        self.policy.serialize_into(out)?;
        trace!(
            keys = key_count,
            attributes = self.policy.revealed_attributes.len(),
            "serialized credential values"
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_values(attributes: &[(AttributeTag, &str)]) -> CredentialDeploymentValues {
        let mut keys = BTreeMap::new();
        keys.insert(0, VerifyKey::ed25519(Ed25519PublicKey::new([0x11; 32])));
        let mut ar_data = BTreeMap::new();
        ar_data.insert(
            1,
            ChainArData {
                enc_id_cred_pub_share: EncryptedShare::new([0x22; 96]),
            },
        );
        CredentialDeploymentValues {
            credential_public_keys: CredentialPublicKeys { keys, threshold: 1 },
            cred_id: CredentialRegistrationId::new([0x33; 48]),
            ip_identity: 0,
            revocation_threshold: 1,
            ar_data,
            policy: Policy {
                valid_to: YearMonth::new(2027, 5).unwrap(),
                created_at: YearMonth::new(2025, 5).unwrap(),
                revealed_attributes: attributes
                    .iter()
                    .map(|(tag, value)| (*tag, value.to_string()))
                    .collect(),
            },
            commitments: None,
        }
    }

    #[test]
    fn layout_without_attributes() {
        let bytes = sample_values(&[]).serialize().unwrap();
        let mut expected = String::from("01");
        expected += "0000";
        expected += &"11".repeat(32);
        expected += "01";
        expected += &"33".repeat(48);
        expected += "00000000";
        expected += "01";
        expected += "0001";
        expected += "00000001";
        expected += &"22".repeat(96);
        expected += "07eb05";
        expected += "07e905";
        expected += "0000";
        assert_eq!(hex::encode(bytes), expected);
    }

    #[test]
    fn attributes_are_sorted_by_tag() {
        let bytes = sample_values(&[
            (AttributeTag::Nationality, "DK"),
            (AttributeTag::FirstName, "Ada"),
        ])
        .serialize()
        .unwrap();
        let tail = hex::encode(&bytes[bytes.len() - 11..]);
        // count 2, then firstName (0) before nationality (5)
        assert_eq!(tail, "0002 00 03 416461 05 02 444b".replace(' ', ""));
    }

    #[test]
    fn year_month_parsing() {
        let ym: YearMonth = "202412".parse().unwrap();
        assert_eq!((ym.year(), ym.month()), (2024, 12));
        assert_eq!(ym.to_string(), "202412");
        assert!("202413".parse::<YearMonth>().is_err());
        assert!("2024-1".parse::<YearMonth>().is_err());
    }

    #[test]
    fn attribute_tags_round_trip() {
        for tag in 0..=12u8 {
            assert_eq!(AttributeTag::try_from(tag).unwrap().tag(), tag);
        }
        assert!(AttributeTag::try_from(13).is_err());
    }

    #[test]
    fn json_shape() {
        let json = r#"{
            "credentialPublicKeys": {
                "keys": { "0": { "schemeId": "Ed25519", "verifyKey": "1111111111111111111111111111111111111111111111111111111111111111" } },
                "threshold": 1
            },
            "credId": "333333333333333333333333333333333333333333333333333333333333333333333333333333333333333333333333",
            "ipIdentity": 0,
            "revocationThreshold": 1,
            "arData": { "1": { "encIdCredPubShare": "222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222222" } },
            "policy": {
                "validTo": "202705",
                "createdAt": "202505",
                "revealedAttributes": { "nationality": "DK", "firstName": "Ada" }
            }
        }"#;
        let parsed: CredentialDeploymentValues = serde_json::from_str(json).unwrap();
        let built = sample_values(&[
            (AttributeTag::FirstName, "Ada"),
            (AttributeTag::Nationality, "DK"),
        ]);
        assert_eq!(parsed, built);
    }
}
