//! # Protocol Configuration & Constants
//!
//! Every magic number the codecs depend on lives here. The node computes the
//! same values on its side, so changing any of them produces bytes (or an
//! energy amount) the chain will reject.
//!
//! The only runtime-configurable piece is [`EnergyRates`], the pair of
//! exchange rates needed to turn an energy amount into a CCD fee. Those come
//! from the chain parameters of whatever node the caller talks to.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

// ---------------------------------------------------------------------------
// Energy
// ---------------------------------------------------------------------------

/// Energy charged per signature on an account transaction (constant `A`).
pub const ENERGY_PER_SIGNATURE: u64 = 100;

/// Energy charged per byte of header + payload (constant `B`).
pub const ENERGY_PER_BYTE: u64 = 1;

/// Serialized header size: sender (32) + nonce (8) + energy (8) +
/// payload size (4) + expiry (8).
pub const ACCOUNT_TRANSACTION_HEADER_SIZE: u64 = 32 + 8 + 8 + 4 + 8;

/// Base cost of transfers, data registration and delegation changes.
pub const SIMPLE_TRANSFER_BASE_COST: u64 = 300;

/// Fixed part of the UpdateCredentials base cost.
pub const UPDATE_CREDENTIALS_BASE_COST: u64 = 500;

/// Charged per credential already on the account.
pub const UPDATE_CREDENTIALS_COST_PER_EXISTING: u64 = 500;

/// Charged per credential being added.
pub const UPDATE_CREDENTIALS_COST_PER_NEW: u64 = 54_000;

/// Charged per public key of a credential being added.
pub const UPDATE_CREDENTIALS_COST_PER_KEY: u64 = 100;

/// ConfigureBaker cost when new validator keys (and their proofs) are
/// attached. Without keys the transfer cost applies.
pub const CONFIGURE_BAKER_WITH_KEYS_COST: u64 = 4_050;

/// Signature count assumed when computing a sign digest before the real
/// signature set exists.
pub const DEFAULT_SIGNATURE_COUNT: u64 = 1;

// ---------------------------------------------------------------------------
// Fixed Widths
// ---------------------------------------------------------------------------

/// Account addresses are raw 32-byte values.
pub const ACCOUNT_ADDRESS_LENGTH: usize = 32;

/// Module references are SHA-256 hashes of the module source.
pub const MODULE_REFERENCE_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Ed25519 verification key length.
pub const VERIFY_KEY_LENGTH: usize = 32;

/// Credential registration ids are compressed BLS12-381 G1 points.
pub const CREDENTIAL_ID_LENGTH: usize = 48;

/// Encrypted share of `idCredPub` held by one anonymity revoker.
pub const AR_SHARE_LENGTH: usize = 96;

/// SHA-256 output length; also the metadata checksum length.
pub const HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Size Limits
// ---------------------------------------------------------------------------

/// CIS-2 token ids carry a one-byte length prefix.
pub const TOKEN_ID_MAX_LENGTH: usize = 255;

/// Upper bound on the ULEB128 encoding of a CIS-2 token amount.
pub const TOKEN_AMOUNT_MAX_LENGTH: usize = 37;

/// Upper bound on a CIS-2 receive hook name (also used for CIS-3 entrypoints).
pub const TOKEN_RECEIVE_HOOK_MAX_LENGTH: usize = 100;

/// CIS-3 permit payloads carry a two-byte length prefix.
pub const PERMIT_PAYLOAD_MAX_LENGTH: usize = 65_535;

/// Maximum number of entrypoints in one `supportsPermit` query.
pub const SUPPORTS_PERMIT_QUERY_MAX_LENGTH: usize = 65_535;

/// Memos and registered data are capped at 256 bytes by the node.
pub const DATA_BLOB_MAX_LENGTH: usize = 256;

/// Smart contract parameters carry a two-byte length prefix.
pub const PARAMETER_MAX_LENGTH: usize = 65_535;

/// Longest contract name; `init_` plus the name must fit in 100 bytes.
pub const CONTRACT_NAME_MAX_LENGTH: usize = 95;

/// Longest `<contract>.<entrypoint>` receive name.
pub const RECEIVE_NAME_MAX_LENGTH: usize = 100;

/// Longest bare entrypoint name.
pub const ENTRYPOINT_NAME_MAX_LENGTH: usize = 99;

// ---------------------------------------------------------------------------
// Wire Tags
// ---------------------------------------------------------------------------

/// Block item kind of an account transaction.
pub const BLOCK_ITEM_KIND_ACCOUNT_TRANSACTION: u8 = 0;

/// Block item kind of a credential deployment.
pub const BLOCK_ITEM_KIND_CREDENTIAL_DEPLOYMENT: u8 = 1;

/// Version byte prepended to block items submitted to a node.
pub const BLOCK_ITEM_VERSION: u8 = 0;

/// Credential kind of a normal (non-initial) credential.
pub const NORMAL_CREDENTIAL_KIND: u8 = 1;

/// Base58Check version byte of account addresses.
pub const ACCOUNT_ADDRESS_VERSION: u8 = 1;

/// Base58Check version byte of CIS-2 token addresses.
pub const TOKEN_ADDRESS_VERSION: u8 = 2;

// ---------------------------------------------------------------------------
// Energy Rates
// ---------------------------------------------------------------------------

/// An exact rational exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub numerator: u64,
    pub denominator: u64,
}

impl ExchangeRate {
    /// Creates a rate, rejecting a zero denominator.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if denominator == 0 {
            return Err(CodecError::invalid("exchange rate denominator is zero"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

/// The chain parameters needed to price energy in microCCD.
///
/// Field names follow the node's JSON representation so the struct can be
/// deserialized straight from a chain-parameters response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRates {
    /// Euro per unit of energy.
    pub euro_per_energy: ExchangeRate,
    /// microCCD per euro.
    #[serde(alias = "microGTUPerEuro")]
    pub micro_ccd_per_euro: ExchangeRate,
}

impl EnergyRates {
    /// Parses the rates from JSON and validates both denominators.
    pub fn from_json(json: &str) -> Result<Self> {
        let rates: Self = serde_json::from_str(json)
            .map_err(|e| CodecError::invalid(format!("energy rates: {}", e)))?;
        ExchangeRate::new(rates.euro_per_energy.numerator, rates.euro_per_energy.denominator)?;
        ExchangeRate::new(
            rates.micro_ccd_per_euro.numerator,
            rates.micro_ccd_per_euro.denominator,
        )?;
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_size_is_sixty_bytes() {
        assert_eq!(ACCOUNT_TRANSACTION_HEADER_SIZE, 60);
    }

    #[test]
    fn name_limits_are_consistent() {
        // "init_" + the longest contract name is still a valid receive name length.
        assert_eq!(CONTRACT_NAME_MAX_LENGTH + "init_".len(), RECEIVE_NAME_MAX_LENGTH);
        assert!(ENTRYPOINT_NAME_MAX_LENGTH < TOKEN_RECEIVE_HOOK_MAX_LENGTH + 1);
    }

    #[test]
    fn energy_rates_from_json() {
        let json = r#"{
            "euroPerEnergy": { "numerator": 1, "denominator": 50000 },
            "microCcdPerEuro": { "numerator": 100000000, "denominator": 1 }
        }"#;
        let rates = EnergyRates::from_json(json).unwrap();
        assert_eq!(rates.euro_per_energy.denominator, 50_000);
        assert_eq!(rates.micro_ccd_per_euro.numerator, 100_000_000);
    }

    #[test]
    fn energy_rates_accept_legacy_field_name() {
        let json = r#"{
            "euroPerEnergy": { "numerator": 1, "denominator": 2 },
            "microGTUPerEuro": { "numerator": 3, "denominator": 4 }
        }"#;
        let rates = EnergyRates::from_json(json).unwrap();
        assert_eq!(rates.micro_ccd_per_euro, ExchangeRate { numerator: 3, denominator: 4 });
    }

    #[test]
    fn energy_rates_reject_zero_denominator() {
        let json = r#"{
            "euroPerEnergy": { "numerator": 1, "denominator": 0 },
            "microCcdPerEuro": { "numerator": 1, "denominator": 1 }
        }"#;
        assert!(matches!(
            EnergyRates::from_json(json),
            Err(CodecError::InvalidValue { .. })
        ));
    }
}
