use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const ADDRESS_BYTES: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be {expected} hex digits, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("address is not valid hex: {0}")]
    InvalidHex(String),
}

/// Fixed-width account identifier.
///
/// The all-zero address is reserved: it is the source of minted tokens and
/// the sink of burnt ones and never identifies a real account.
#[derive(Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_BYTES]);

impl Address {
    pub const ZERO: Self = Self([0; ADDRESS_BYTES]);

    #[must_use]
    pub fn is_zero(&self) -> bool { *self == Self::ZERO }

    /// Address with every byte set to `byte`. Handy for fixtures and demos.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self { Self([byte; ADDRESS_BYTES]) }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Accepts exactly 40 hex digits in either case, with or without a
    /// leading `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != ADDRESS_BYTES * 2 {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_BYTES * 2,
                found: digits.len(),
            });
        }
        let mut bytes = [0u8; ADDRESS_BYTES];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Address({self})") }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
