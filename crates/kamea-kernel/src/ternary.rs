//! Ternary codec for ditrunes and triunes.
//!
//! A **ditrune** is a 6-digit base-3 value in [0, 728]; a **triune** is a
//! 3-digit base-3 value in [0, 26], one half of a ditrune. Both are
//! immutable `Copy` values. Encoding is positional with the leftmost
//! digit most significant: digit 5, 0-indexed from the left, is the
//! least significant.
//!
//! The wire form of both types is the plain digit string (`"022101"`),
//! which is also how they serialize.

use crate::error::KameaError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a ditrune.
pub const DITRUNE_DIGITS: usize = 6;

/// Number of digits in a triune.
pub const TRIUNE_DIGITS: usize = 3;

/// Size of the full ditrune space: 3^6.
pub const DITRUNE_SPACE: usize = 729;

/// A 6-digit base-3 value in [0, 728].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ditrune(u16);

impl Ditrune {
    /// Encode six ternary digits, leftmost most significant.
    pub fn from_digits(digits: [u8; DITRUNE_DIGITS]) -> Result<Self, KameaError> {
        let mut value = 0u16;
        for (position, &digit) in digits.iter().enumerate() {
            if digit > 2 {
                return Err(KameaError::InvalidDigit {
                    digit: digit_char(digit),
                    position,
                });
            }
            value = value * 3 + u16::from(digit);
        }
        Ok(Self(value))
    }

    /// Digits already validated by the caller.
    pub(crate) fn from_valid_digits(digits: [u8; DITRUNE_DIGITS]) -> Self {
        let mut value = 0u16;
        for &digit in &digits {
            value = value * 3 + u16::from(digit);
        }
        Self(value)
    }

    /// Decode into six ternary digits, leftmost most significant.
    pub fn digits(self) -> [u8; DITRUNE_DIGITS] {
        let mut digits = [0u8; DITRUNE_DIGITS];
        let mut rest = self.0;
        for slot in digits.iter_mut().rev() {
            *slot = (rest % 3) as u8;
            rest /= 3;
        }
        digits
    }

    /// The integer value in [0, 728].
    pub fn value(self) -> u16 {
        self.0
    }

    /// Concatenate two triunes into a ditrune, `upper` leading.
    pub fn from_triunes(upper: Triune, lower: Triune) -> Self {
        Self(u16::from(upper.value()) * 27 + u16::from(lower.value()))
    }

    /// Split into the leading and trailing triune halves.
    pub fn halves(self) -> (Triune, Triune) {
        (Triune((self.0 / 27) as u8), Triune((self.0 % 27) as u8))
    }

    /// Enumerate the full 729-element space in ascending order.
    pub fn all() -> impl Iterator<Item = Ditrune> {
        (0..DITRUNE_SPACE as u16).map(Ditrune)
    }

    pub(crate) fn from_value_unchecked(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for Ditrune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for Ditrune {
    type Err = KameaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = parse_digits::<DITRUNE_DIGITS>(s)?;
        Ok(Self::from_valid_digits(digits))
    }
}

impl Serialize for Ditrune {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ditrune {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A 3-digit base-3 value in [0, 26].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triune(u8);

impl Triune {
    /// Encode three ternary digits, leftmost most significant.
    pub fn from_digits(digits: [u8; TRIUNE_DIGITS]) -> Result<Self, KameaError> {
        let mut value = 0u8;
        for (position, &digit) in digits.iter().enumerate() {
            if digit > 2 {
                return Err(KameaError::InvalidDigit {
                    digit: digit_char(digit),
                    position,
                });
            }
            value = value * 3 + digit;
        }
        Ok(Self(value))
    }

    pub(crate) fn from_valid_digits(digits: [u8; TRIUNE_DIGITS]) -> Self {
        let mut value = 0u8;
        for &digit in &digits {
            value = value * 3 + digit;
        }
        Self(value)
    }

    /// Decode into three ternary digits, leftmost most significant.
    pub fn digits(self) -> [u8; TRIUNE_DIGITS] {
        let mut digits = [0u8; TRIUNE_DIGITS];
        let mut rest = self.0;
        for slot in digits.iter_mut().rev() {
            *slot = rest % 3;
            rest /= 3;
        }
        digits
    }

    /// The integer value in [0, 26].
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Triune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for Triune {
    type Err = KameaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = parse_digits::<TRIUNE_DIGITS>(s)?;
        Ok(Self::from_valid_digits(digits))
    }
}

impl Serialize for Triune {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Triune {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

fn parse_digits<const N: usize>(s: &str) -> Result<[u8; N], KameaError> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != N {
        return Err(KameaError::InvalidLength {
            expected: N,
            actual: chars.len(),
        });
    }
    let mut digits = [0u8; N];
    for (position, &c) in chars.iter().enumerate() {
        match c {
            '0' => digits[position] = 0,
            '1' => digits[position] = 1,
            '2' => digits[position] = 2,
            other => {
                return Err(KameaError::InvalidDigit {
                    digit: other,
                    position,
                });
            }
        }
    }
    Ok(digits)
}

fn digit_char(digit: u8) -> char {
    if digit < 10 {
        (b'0' + digit) as char
    } else {
        '?'
    }
}
