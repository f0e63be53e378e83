//! Fixed-width byte values that travel as hex at the API boundary.

/// Declares a `[u8; N]` newtype with hex text form and hex serde.
macro_rules! fixed_bytes_type {
    ($(#[$meta:meta])* $name:ident, $len:expr, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LENGTH: usize = $len;

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(bytes: &[u8]) -> $crate::error::Result<Self> {
                let arr: [u8; $len] = bytes.try_into().map_err(|_| {
                    $crate::error::CodecError::invalid(format!(
                        "{} must be {} bytes, got {}",
                        $label,
                        $len,
                        bytes.len()
                    ))
                })?;
                Ok(Self(arr))
            }

            pub fn from_hex(value: &str) -> $crate::error::Result<Self> {
                let bytes = $crate::encoding::decode_hex($label, value, Some($len))?;
                Self::from_slice(&bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CodecError;

            fn try_from(value: String) -> $crate::error::Result<Self> {
                Self::from_hex(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.to_hex()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }
    };
}

pub(crate) use fixed_bytes_type;
