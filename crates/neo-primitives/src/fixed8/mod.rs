//! Fixed-point amounts with eight decimal places.
//!
//! Every asset value on the ledger is a signed 64-bit integer counting
//! units of 10^-8. `Fixed8` keeps that integer and converts to and from the
//! decimal strings used by wallets and balance APIs ("0.0001" is 10000
//! units). Arithmetic is checked; overflow is reported, never wrapped.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Number of decimal places carried by a `Fixed8`.
pub const DECIMALS: usize = 8;

/// Units per whole coin.
const FACTOR: i64 = 100_000_000;

/// A fixed-point amount, stored as integer units of 10^-8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed8(i64);

impl Fixed8 {
    /// Zero.
    pub const ZERO: Fixed8 = Fixed8(0);

    /// Create an amount from raw units (10^-8).
    pub const fn from_units(units: i64) -> Self {
        Fixed8(units)
    }

    /// Create an amount from a whole number of coins.
    ///
    /// # Returns
    /// The amount, or `Fixed8Overflow` if it does not fit.
    pub fn from_coins(coins: i64) -> Result<Self, PrimitivesError> {
        coins
            .checked_mul(FACTOR)
            .map(Fixed8)
            .ok_or(PrimitivesError::Fixed8Overflow)
    }

    /// Return the raw units.
    pub const fn units(self) -> i64 {
        self.0
    }

    /// `true` if the amount is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_add(other.0).map(Fixed8)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_sub(other.0).map(Fixed8)
    }

    /// Sum an iterator of amounts, returning `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Fixed8>>(iter: I) -> Option<Fixed8> {
        iter.into_iter()
            .try_fold(Fixed8::ZERO, |acc, v| acc.checked_add(v))
    }
}

impl fmt::Display for Fixed8 {
    /// Prints the shortest decimal form: `1`, `0.0001`, `-2.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / FACTOR as u64;
        let frac = abs % FACTOR as u64;
        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }
        let frac_str = format!("{:08}", frac);
        write!(f, "{}{}.{}", sign, whole, frac_str.trim_end_matches('0'))
    }
}

impl FromStr for Fixed8 {
    type Err = PrimitivesError;

    /// Parse a decimal string with at most eight fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PrimitivesError::InvalidFixed8(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole_str, frac_str) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };
        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        if frac_str.len() > DECIMALS {
            return Err(invalid());
        }
        if !whole_str.bytes().all(|b| b.is_ascii_digit())
            || !frac_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        // Accumulate in i128 so that i64::MIN survives the sign flip.
        let whole: i128 = if whole_str.is_empty() {
            0
        } else {
            whole_str
                .parse()
                .map_err(|_| PrimitivesError::Fixed8Overflow)?
        };
        let frac: i128 = if frac_str.is_empty() {
            0
        } else {
            // Right-pad to eight digits so "0.5" becomes 50000000 units.
            format!("{:0<8}", frac_str)
                .parse()
                .map_err(|_| invalid())?
        };

        let magnitude = whole
            .checked_mul(FACTOR as i128)
            .and_then(|w| w.checked_add(frac))
            .ok_or(PrimitivesError::Fixed8Overflow)?;
        let units = if negative { -magnitude } else { magnitude };
        i64::try_from(units)
            .map(Fixed8)
            .map_err(|_| PrimitivesError::Fixed8Overflow)
    }
}

impl Serialize for Fixed8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Accepts either a decimal string (`"0.0001"`) or a JSON number (`0.0001`).
impl<'de> Deserialize<'de> for Fixed8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Fixed8Visitor;

        impl<'de> Visitor<'de> for Fixed8Visitor {
            type Value = Fixed8;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount as a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Fixed8, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Fixed8, E> {
                let coins = i64::try_from(v).map_err(E::custom)?;
                Fixed8::from_coins(coins).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Fixed8, E> {
                Fixed8::from_coins(v).map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Fixed8, E> {
                // Display for f64 prints the shortest round-trip decimal.
                v.to_string().parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(Fixed8Visitor)
    }
}
