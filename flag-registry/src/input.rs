use std::borrow::Cow;

use num_bigint::{BigInt, BigUint};
use num_traits::Num;

use crate::error::{FlagError, Result};

/// Radix used for text input when none is given.
pub const DEFAULT_RADIX: u32 = 10;
/// Smallest radix accepted for text input.
pub const MIN_RADIX: u32 = 2;
/// Largest radix accepted for text input (digits then letters).
pub const MAX_RADIX: u32 = 36;

/// Raw input accepted by [`FlagRegistry::parse`](crate::FlagRegistry::parse).
///
/// Conversions exist for the native integer types, `BigInt`, `BigUint`, `&str` and
/// `String`; text converted this way is read in [`DEFAULT_RADIX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagInput<'a> {
    /// A native integer, adopted as the bitmask.
    Int(i128),
    /// An arbitrary-precision integer, adopted as the bitmask.
    BigInt(BigInt),
    /// Integer text in the given radix (`DEFAULT_RADIX` when `None`).
    Text {
        text: Cow<'a, str>,
        radix: Option<u32>,
    },
}

impl<'a> FlagInput<'a> {
    /// Integer text in an explicit radix.
    pub fn text_radix(text: impl Into<Cow<'a, str>>, radix: u32) -> Self {
        FlagInput::Text {
            text: text.into(),
            radix: Some(radix),
        }
    }

    /// Resolves the input to a signed integer. Range checks against a registry happen
    /// later, when the value is built.
    pub(crate) fn into_big_int(self) -> Result<BigInt> {
        match self {
            FlagInput::Int(value) => Ok(BigInt::from(value)),
            FlagInput::BigInt(value) => Ok(value),
            FlagInput::Text { text, radix } => parse_radix(&text, radix.unwrap_or(DEFAULT_RADIX)),
        }
    }
}

/// Parses integer text: optional sign, then digits and case-insensitive letters.
/// Digit separators (`_`) are not part of the syntax.
fn parse_radix(text: &str, radix: u32) -> Result<BigInt> {
    if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        tracing::trace!(radix, "Rejected flag input radix");
        return Err(FlagError::InvalidRadix(radix));
    }
    let unparseable = || {
        tracing::trace!(input = text, radix, "Rejected flag input text");
        FlagError::Unparseable {
            input: text.to_string(),
            radix,
        }
    };
    // num-bigint would otherwise skip them
    if text.contains('_') {
        return Err(unparseable());
    }
    BigInt::from_str_radix(text, radix).map_err(|_| unparseable())
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FlagInput<'_> {
                fn from(value: $ty) -> Self {
                    FlagInput::Int(i128::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<isize> for FlagInput<'_> {
    fn from(value: isize) -> Self {
        FlagInput::BigInt(BigInt::from(value))
    }
}

impl From<usize> for FlagInput<'_> {
    fn from(value: usize) -> Self {
        FlagInput::BigInt(BigInt::from(value))
    }
}

impl From<u128> for FlagInput<'_> {
    fn from(value: u128) -> Self {
        FlagInput::BigInt(BigInt::from(value))
    }
}

impl From<BigInt> for FlagInput<'_> {
    fn from(value: BigInt) -> Self {
        FlagInput::BigInt(value)
    }
}

impl From<&BigInt> for FlagInput<'_> {
    fn from(value: &BigInt) -> Self {
        FlagInput::BigInt(value.clone())
    }
}

impl From<BigUint> for FlagInput<'_> {
    fn from(value: BigUint) -> Self {
        FlagInput::BigInt(BigInt::from(value))
    }
}

impl From<&BigUint> for FlagInput<'_> {
    fn from(value: &BigUint) -> Self {
        FlagInput::BigInt(BigInt::from(value.clone()))
    }
}

impl<'a> From<&'a str> for FlagInput<'a> {
    fn from(text: &'a str) -> Self {
        FlagInput::Text {
            text: Cow::Borrowed(text),
            radix: None,
        }
    }
}

impl From<String> for FlagInput<'_> {
    fn from(text: String) -> Self {
        FlagInput::Text {
            text: Cow::Owned(text),
            radix: None,
        }
    }
}

impl<'a> From<(&'a str, u32)> for FlagInput<'a> {
    fn from((text, radix): (&'a str, u32)) -> Self {
        FlagInput::text_radix(text, radix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_defaults_to_decimal() {
        let value = FlagInput::from("12").into_big_int().unwrap();
        assert_eq!(value, BigInt::from(12));
    }

    #[test]
    fn letters_are_case_insensitive() {
        let lower = FlagInput::text_radix("zz", 36).into_big_int().unwrap();
        let upper = FlagInput::text_radix("ZZ", 36).into_big_int().unwrap();
        assert_eq!(lower, BigInt::from(1295));
        assert_eq!(lower, upper);
    }

    #[test]
    fn radix_out_of_range_is_rejected() {
        assert_eq!(
            FlagInput::text_radix("1", 1).into_big_int(),
            Err(FlagError::InvalidRadix(1))
        );
        assert_eq!(
            FlagInput::text_radix("1", 37).into_big_int(),
            Err(FlagError::InvalidRadix(37))
        );
    }

    #[test]
    fn digit_outside_radix_is_unparseable() {
        assert_eq!(
            FlagInput::text_radix("102", 2).into_big_int(),
            Err(FlagError::Unparseable {
                input: "102".to_string(),
                radix: 2,
            })
        );
        assert!(FlagInput::from("").into_big_int().is_err());
        assert!(FlagInput::from("abc").into_big_int().is_err());
    }

    #[test]
    fn digit_separators_are_unparseable() {
        for text in ["1_", "1__0", "1_000", "_1"] {
            assert_eq!(
                FlagInput::text_radix(text, 10).into_big_int(),
                Err(FlagError::Unparseable {
                    input: text.to_string(),
                    radix: 10,
                })
            );
        }
    }

    #[test]
    fn negative_text_is_parsed_as_negative() {
        let value = FlagInput::from("-1").into_big_int().unwrap();
        assert_eq!(value, BigInt::from(-1));
    }
}
