/*
    Conversions to and from `Int128`
*/

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::cast::ToPrimitive;

use super::{Int128, Magnitude};
use crate::error::NumericError;
use crate::rational::Rational;
use crate::scaled::ScaledInt64;

// Digit strings
impl Int128 {
    /// Parses a digit string in the given radix, 2 through 36.
    ///
    /// An optional leading `+` or `-` is accepted. An empty digit
    /// sequence or a digit outside the radix is a format error;
    /// accumulation past 128 bits is an overflow.
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self, NumericError> {
        if !(2..=36).contains(&radix) {
            return Err(NumericError::Format("radix out of range"));
        }
        let bytes = text.as_bytes();
        let (negative, digits) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            Some(b'+') => (false, &bytes[1..]),
            _ => (false, bytes),
        };
        if digits.is_empty() {
            return Err(NumericError::Format("empty digit string"));
        }
        let mut mag = Magnitude::ZERO;
        for &b in digits {
            let digit = (b as char)
                .to_digit(radix)
                .ok_or(NumericError::Format("illegal digit"))?;
            if mag.mul_small_assign(radix) != 0 || mag.add_small_assign(digit) != 0 {
                return Err(NumericError::Overflow("digit string exceeds 128 bits"));
            }
        }
        mag.to_int128(negative)
    }

    /// Renders this `Int128` in the given radix, 2 through 36.
    pub fn to_str_radix(&self, radix: u32) -> Result<String, NumericError> {
        if !(2..=36).contains(&radix) {
            return Err(NumericError::Format("radix out of range"));
        }
        Ok(self.digits_radix(radix))
    }

    // Repeated small division on the magnitude accumulator, digits
    // collected least-significant first.
    fn digits_radix(&self, radix: u32) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut mag = Magnitude::of(self);
        let mut digits = Vec::new();
        while !mag.is_zero() {
            let d = mag.divmod_small_assign(radix);
            digits.push(char::from_digit(d, radix).unwrap());
        }
        if self.is_negative() {
            digits.push('-');
        }
        digits.iter().rev().collect()
    }

    /// The power of ten `10^exp`, or an overflow past 128 bits.
    pub fn pow10(exp: u32) -> Result<Self, NumericError> {
        let mut mag = Magnitude::from_u64(1);
        for _ in 0..exp {
            if mag.mul_small_assign(10) != 0 {
                return Err(NumericError::Overflow("power of ten exceeds 128 bits"));
            }
        }
        mag.to_int128(false)
    }
}

impl fmt::Display for Int128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits_radix(10))
    }
}

impl FromStr for Int128 {
    type Err = NumericError;

    fn from_str(text: &str) -> Result<Self, NumericError> {
        Self::from_str_radix(text, 10)
    }
}

/// The full 128-bit two's-complement pattern, most-significant bit
/// first. Diagnostic use.
impl fmt::Binary for Int128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs {
            write!(f, "{limb:032b}")?;
        }
        Ok(())
    }
}

// Truncating casts: only the low limbs are kept, matching an `as` cast
// between native widths.
impl Int128 {
    /// The low 64 bits reinterpreted as an `i64`.
    pub const fn as_i64(&self) -> i64 {
        ((self.limbs[2] as u64) << 32 | self.limbs[3] as u64) as i64
    }

    /// The low 32 bits reinterpreted as an `i32`.
    pub const fn as_i32(&self) -> i32 {
        self.limbs[3] as i32
    }

    /// The low 16 bits reinterpreted as an `i16`.
    pub const fn as_i16(&self) -> i16 {
        self.limbs[3] as i16
    }

    /// The low 8 bits reinterpreted as an `i8`.
    pub const fn as_i8(&self) -> i8 {
        self.limbs[3] as i8
    }

    /// The nearest `f64`, rounding toward zero in the low bits.
    pub fn as_f64(&self) -> f64 {
        let mag = Magnitude::of(self);
        let mut f = 0f64;
        for word in mag.words {
            f = f * 4294967296.0 + word as f64;
        }
        if self.is_negative() {
            -f
        } else {
            f
        }
    }
}

// Range-checked casts
impl ToPrimitive for Int128 {
    fn to_i64(&self) -> Option<i64> {
        // at most two informative limbs means the value is in i64 range
        if self.magnitude() <= 2 {
            Some(self.as_i64())
        } else {
            None
        }
    }

    fn to_i32(&self) -> Option<i32> {
        if self.magnitude() <= 1 {
            Some(self.as_i32())
        } else {
            None
        }
    }

    fn to_u64(&self) -> Option<u64> {
        if self.is_negative() {
            return None;
        }
        let mag = Magnitude::of(self);
        if mag.word_len() <= 2 {
            Some(mag.as_u64())
        } else {
            None
        }
    }

    fn to_i128(&self) -> Option<i128> {
        let unsigned = (self.limbs[0] as u128) << 96
            | (self.limbs[1] as u128) << 64
            | (self.limbs[2] as u128) << 32
            | self.limbs[3] as u128;
        Some(unsigned as i128)
    }

    fn to_u128(&self) -> Option<u128> {
        if self.is_negative() {
            None
        } else {
            self.to_i128().map(|v| v as u128)
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.as_f64())
    }
}

// Arbitrary-precision round-trip at the API boundary
impl From<&Int128> for BigInt {
    fn from(value: &Int128) -> BigInt {
        let sign = match value.signum() {
            0 => Sign::NoSign,
            s if s < 0 => Sign::Minus,
            _ => Sign::Plus,
        };
        let mag = Magnitude::of(value);
        let mut bytes = Vec::with_capacity(16);
        for word in mag.words {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        BigInt::from_bytes_be(sign, &bytes)
    }
}

impl TryFrom<&BigInt> for Int128 {
    type Error = NumericError;

    fn try_from(value: &BigInt) -> Result<Self, NumericError> {
        let (sign, bytes) = value.to_bytes_be();
        if bytes.len() > 16 {
            return Err(NumericError::Overflow("value exceeds 128 bits"));
        }
        let mut padded = [0u8; 16];
        padded[16 - bytes.len()..].copy_from_slice(&bytes);
        let mut words = [0u32; 4];
        for i in 0..4 {
            words[i] = u32::from_be_bytes([
                padded[4 * i],
                padded[4 * i + 1],
                padded[4 * i + 2],
                padded[4 * i + 3],
            ]);
        }
        Magnitude { words }.to_int128(sign == Sign::Minus)
    }
}

// Rational interop
impl Int128 {
    /// Converts to a [`Rational`] through the [`ScaledInt64`]
    /// reduction: the closest `value * 10^scale` over a unit
    /// denominator.
    pub fn to_rational(&self) -> Result<Rational, NumericError> {
        Rational::from_scaled(ScaledInt64::reduce(self, 0)?)
    }
}

impl TryFrom<&Int128> for Rational {
    type Error = NumericError;

    fn try_from(value: &Int128) -> Result<Rational, NumericError> {
        value.to_rational()
    }
}
