//! Smart contract names.
//!
//! All three are restricted to printable ASCII (space through `~`). A receive
//! name is `<contract>.<entrypoint>`; contract and init names never contain a
//! dot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{CONTRACT_NAME_MAX_LENGTH, ENTRYPOINT_NAME_MAX_LENGTH, RECEIVE_NAME_MAX_LENGTH};
use crate::error::{CodecError, Result};

fn is_printable_ascii(value: &str) -> bool {
    value.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

fn check_name(kind: &'static str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(CodecError::size(kind, max, value.len()));
    }
    if !is_printable_ascii(value) {
        return Err(CodecError::invalid(format!(
            "{} {:?} must only contain ASCII alphanumeric and punctuation characters",
            kind, value
        )));
    }
    Ok(())
}

/// Name of a contract inside a module, without the `init_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractName(String);

impl ContractName {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_name("contract name", &value, CONTRACT_NAME_MAX_LENGTH)?;
        if value.contains('.') {
            return Err(CodecError::invalid(format!(
                "contract name {:?} must not contain '.'",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name of the contract's init function, `init_<name>`.
    pub fn init_name(&self) -> String {
        format!("init_{}", self.0)
    }
}

/// `<contract>.<entrypoint>`, the target of a contract update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReceiveName(String);

impl ReceiveName {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_name("receive name", &value, RECEIVE_NAME_MAX_LENGTH)?;
        if !value.contains('.') {
            return Err(CodecError::invalid(format!(
                "receive name {:?} must contain '.'",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Joins a contract name and an entrypoint.
    pub fn from_parts(contract: &ContractName, entrypoint: &EntrypointName) -> Result<Self> {
        Self::new(format!("{}.{}", contract.as_str(), entrypoint.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Contract part, everything before the first dot.
    pub fn contract_name(&self) -> &str {
        self.0.split_once('.').map_or(self.0.as_str(), |(c, _)| c)
    }

    /// Entrypoint part, everything after the first dot.
    pub fn entrypoint_name(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, e)| e)
    }
}

/// A bare entrypoint name such as `transfer` or `permit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntrypointName(String);

impl EntrypointName {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_name("entrypoint name", &value, ENTRYPOINT_NAME_MAX_LENGTH)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_conversions {
    ($($name:ident),*) => {$(
        impl TryFrom<String> for $name {
            type Error = CodecError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    )*};
}

string_conversions!(ContractName, ReceiveName, EntrypointName);
