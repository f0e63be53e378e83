//! Energy accounting.
//!
//! The node charges `A · signatures + B · (header + payload) + base`, where
//! the base comes from the payload kind. The amount written into the
//! transaction header must equal this exactly, so the arithmetic is checked
//! rather than wrapping.

use primitive_types::U256;
use tracing::trace;

use super::payload::AccountTransactionPayload;
use crate::config::{
    EnergyRates, ExchangeRate, ACCOUNT_TRANSACTION_HEADER_SIZE, ENERGY_PER_BYTE,
    ENERGY_PER_SIGNATURE,
};
use crate::error::{CodecError, Result};
use crate::types::{CcdAmount, Energy};

fn overflow(what: &str) -> CodecError {
    CodecError::invalid(format!("{} overflows 64 bits", what))
}

/// Total energy of a transaction.
///
/// `payload_size` is the size of the tagged payload (kind byte included);
/// the fixed header size is added here.
pub fn calculate_energy_cost(
    signature_count: u64,
    payload_size: u64,
    base_cost: Energy,
) -> Result<Energy> {
    let signatures = ENERGY_PER_SIGNATURE
        .checked_mul(signature_count)
        .ok_or_else(|| overflow("signature energy"))?;
    let size = ACCOUNT_TRANSACTION_HEADER_SIZE
        .checked_add(payload_size)
        .and_then(|bytes| bytes.checked_mul(ENERGY_PER_BYTE))
        .ok_or_else(|| overflow("size energy"))?;
    let total = signatures
        .checked_add(size)
        .and_then(|sum| sum.checked_add(base_cost.value()))
        .ok_or_else(|| overflow("energy cost"))?;
    Ok(Energy::new(total))
}

/// Energy of a transaction carrying `payload` with `signature_count`
/// signatures.
pub fn transaction_energy_cost(
    payload: &AccountTransactionPayload,
    signature_count: u64,
) -> Result<Energy> {
    let size = payload.serialize_tagged()?.len() as u64;
    let energy = calculate_energy_cost(signature_count, size, payload.base_energy_cost()?)?;
    trace!(
        kind = %payload.kind(),
        size,
        signatures = signature_count,
        energy = energy.value(),
        "computed energy cost"
    );
    Ok(energy)
}

fn check_rate(rate: &ExchangeRate) -> Result<()> {
    if rate.denominator == 0 {
        return Err(CodecError::invalid("exchange rate denominator is zero"));
    }
    Ok(())
}

/// Prices `energy` in microCCD using the chain's exchange rates, rounding up
/// to the next whole microCCD.
pub fn convert_energy_to_micro_ccd(energy: Energy, rates: &EnergyRates) -> Result<CcdAmount> {
    check_rate(&rates.euro_per_energy)?;
    check_rate(&rates.micro_ccd_per_euro)?;

    let numerator = U256::from(rates.euro_per_energy.numerator)
        * U256::from(rates.micro_ccd_per_euro.numerator)
        * U256::from(energy.value());
    let denominator = U256::from(rates.euro_per_energy.denominator)
        * U256::from(rates.micro_ccd_per_euro.denominator);

    let (quotient, remainder) = numerator.div_mod(denominator);
    let micro_ccd = if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::one()
    };
    if micro_ccd > U256::from(u64::MAX) {
        return Err(overflow("microCCD amount"));
    }
    Ok(CcdAmount::from_micro_ccd(micro_ccd.low_u64()))
}
