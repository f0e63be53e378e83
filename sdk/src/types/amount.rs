//! CCD amounts and energy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// microCCD per CCD.
pub const MICRO_CCD_PER_CCD: u64 = 1_000_000;

/// An amount of CCD in its smallest unit, microCCD.
///
/// Serialized on the wire as a big-endian `u64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CcdAmount(u64);

impl CcdAmount {
    pub const fn from_micro_ccd(micro_ccd: u64) -> Self {
        Self(micro_ccd)
    }

    /// Whole CCD, or `None` if the microCCD value overflows.
    pub fn from_ccd(ccd: u64) -> Option<Self> {
        ccd.checked_mul(MICRO_CCD_PER_CCD).map(Self)
    }

    pub const fn micro_ccd(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CcdAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06} CCD",
            self.0 / MICRO_CCD_PER_CCD,
            self.0 % MICRO_CCD_PER_CCD
        )
    }
}

/// An amount of energy (NRG).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Energy(u64);

impl Energy {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Energy {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} NRG", self.0)
    }
}
