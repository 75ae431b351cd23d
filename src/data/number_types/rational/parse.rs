//! # Number parsing
//!
//! Reading exact values from decimal literals such as `-12.5e-3`, or from the canonical
//! `numerator/denominator` representation.
//!
//! Decimal literals are never read as binary floats: all digits form an integer numerator, and
//! the position of the decimal point together with the exponent determine a power of ten.
use std::convert::TryFrom;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{pow, Zero};

use crate::data::number_types::rational::Rational;

/// Largest accepted magnitude of a decimal exponent.
///
/// Larger exponents would make the value itself, not the text describing it, consume an
/// unreasonable amount of memory.
pub const MAXIMUM_EXPONENT: i64 = 4096;

/// Reasons for which a text can't be read as a `Rational`.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseRationalError {
    /// There was nothing to read.
    #[error("empty number text")]
    Empty,
    /// A character that can't appear in a number at that position.
    #[error("unexpected character '{character}' in number text \"{text}\"")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The complete text.
        text: String,
    },
    /// Only signs, dots or exponents were found.
    #[error("no digits in number text \"{0}\"")]
    NoDigits(String),
    /// An exponent marker was not followed by digits.
    #[error("missing exponent digits in number text \"{0}\"")]
    MissingExponent(String),
    /// The exponent magnitude exceeds `MAXIMUM_EXPONENT`.
    #[error("exponent of number text \"{0}\" exceeds the maximum magnitude {max}", max = MAXIMUM_EXPONENT)]
    ExponentTooLarge(String),
    /// A fraction with a zero denominator.
    #[error("zero denominator in number text \"{0}\"")]
    ZeroDenominator(String),
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseRationalError::Empty);
        }

        match text.split_once('/') {
            Some((numerator, denominator)) => {
                let numerator = parse_integer(numerator, text)?;
                let denominator = parse_integer(denominator, text)?;
                if denominator.is_zero() {
                    Err(ParseRationalError::ZeroDenominator(text.to_string()))
                } else {
                    Ok(Rational::from_big(numerator, denominator))
                }
            },
            None => Raw::try_from(text).map(Rational::from),
        }
    }
}

/// Read an optionally signed integer consisting of decimal digits only.
fn parse_integer(part: &str, text: &str) -> Result<BigInt, ParseRationalError> {
    let (sign, digits) = split_sign(part);
    if digits.is_empty() {
        return Err(ParseRationalError::NoDigits(text.to_string()));
    }
    if let Some(character) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ParseRationalError::UnexpectedCharacter { character, text: text.to_string() });
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| ParseRationalError::NoDigits(text.to_string()))?;
    Ok(match sign {
        Sign::Positive => magnitude,
        Sign::Negative => -magnitude,
    })
}

fn split_sign(text: &str) -> (Sign, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (Sign::Negative, &text[1..]),
        Some(b'+') => (Sign::Positive, &text[1..]),
        _ => (Sign::Positive, text),
    }
}

/// Intermediate form of a read decimal literal.
///
/// The value is `sign * integer * 10^exponent`.
#[derive(Eq, PartialEq, Clone, Debug)]
pub(crate) struct Raw {
    sign: Sign,
    integer: BigInt,
    exponent: i64,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) enum Sign {
    Positive,
    Negative,
}

impl TryFrom<&str> for Raw {
    type Error = ParseRationalError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        let (sign, rest) = split_sign(text);

        let (mantissa, exponent_text) = match rest.find(['e', 'E']) {
            Some(index) => (&rest[..index], Some(&rest[(index + 1)..])),
            None => (rest, None),
        };

        let mut digits = String::with_capacity(mantissa.len());
        let mut seen_point = false;
        let mut fractional_digits = 0_i64;
        for character in mantissa.chars() {
            match character {
                '0'..='9' => {
                    digits.push(character);
                    if seen_point {
                        fractional_digits += 1;
                    }
                },
                '.' if !seen_point => seen_point = true,
                _ => return Err(ParseRationalError::UnexpectedCharacter {
                    character,
                    text: text.to_string(),
                }),
            }
        }
        if digits.is_empty() {
            return Err(ParseRationalError::NoDigits(text.to_string()));
        }

        let exponent = match exponent_text {
            None => 0,
            Some(exponent_text) => parse_exponent(exponent_text, text)?,
        };

        let integer = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| ParseRationalError::NoDigits(text.to_string()))?;

        Ok(Self { sign, integer, exponent: exponent - fractional_digits })
    }
}

fn parse_exponent(exponent_text: &str, text: &str) -> Result<i64, ParseRationalError> {
    let (sign, digits) = split_sign(exponent_text);
    if digits.is_empty() {
        return Err(ParseRationalError::MissingExponent(text.to_string()));
    }
    if let Some(character) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ParseRationalError::UnexpectedCharacter { character, text: text.to_string() });
    }

    let magnitude = digits.parse::<i64>()
        .ok()
        .filter(|&magnitude| magnitude <= MAXIMUM_EXPONENT)
        .ok_or_else(|| ParseRationalError::ExponentTooLarge(text.to_string()))?;

    Ok(match sign {
        Sign::Positive => magnitude,
        Sign::Negative => -magnitude,
    })
}

impl From<Raw> for Rational {
    fn from(value: Raw) -> Self {
        let Raw { sign, integer, exponent } = value;

        let signed_numerator = match sign {
            Sign::Positive => integer,
            Sign::Negative => -integer,
        };

        // The exponent is bounded by the number of digits in the text plus `MAXIMUM_EXPONENT`.
        let power = pow(BigInt::from(10), exponent.unsigned_abs() as usize);
        if exponent >= 0 {
            Rational::from_big(signed_numerator * power, BigInt::from(1))
        } else {
            Rational::from_big(signed_numerator, power)
        }
    }
}
