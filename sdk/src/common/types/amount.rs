use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};
use thiserror::Error;

/// Unsigned 256-bit token quantity.
///
/// Arithmetic on amounts must go through `checked_add`/`checked_sub`; the
/// plain operators wrap.
pub type Amount = alloy_primitives::U256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid digit in amount {0:?}")]
    InvalidDigit(String),
    #[error("amount {0:?} does not fit in 256 bits")]
    OutOfRange(String),
}

/// Parses a decimal or `0x`-prefixed hexadecimal amount.
///
/// # Errors
///
/// Returns an error for empty input, any character that is not a digit of
/// the detected radix (this includes signs and separators), or a value above
/// `2^256 - 1`.
pub fn parse_amount(text: &str) -> Result<Amount, AmountError> {
    let trimmed = text.trim();
    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex_digits) => (hex_digits, 16),
        None => (trimmed, 10),
    };
    if digits.is_empty() {
        return Err(AmountError::Empty);
    }
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(AmountError::InvalidDigit(text.to_owned()));
    }
    Amount::from_str_radix(digits, u64::from(radix))
        .map_err(|_| AmountError::OutOfRange(text.to_owned()))
}

/// `serde_with` adapter writing an [`Amount`] as a decimal string and reading
/// it back through [`parse_amount`].
///
/// JSON numbers cannot carry 256 bits, so amounts never travel as numbers.
pub struct AmountString;

impl SerializeAs<Amount> for AmountString {
    fn serialize_as<S: Serializer>(source: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(source)
    }
}

impl<'de> DeserializeAs<'de, Amount> for AmountString {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_amount(&text).map_err(D::Error::custom)
    }
}
