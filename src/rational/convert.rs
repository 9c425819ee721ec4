/*
    Conversions to and from `Rational`
*/

use std::fmt;
use std::str::FromStr;

use num_traits::cast::ToPrimitive;

use super::{checked_scale_add, Rational};
use crate::error::NumericError;
use crate::int128::Int128;

// Largest exponent for which 10^scale fits in an i64. Integral
// conversion fails past this bound, whatever the stored scale.
const POW10_MAX: i32 = 18;

// Fraction grammar: optional sign, optional balanced parentheses
// (sign accepted on either side), digits with an optional decimal
// point, an optional `/denominator`, and an optional trailing `e`/`E`
// exponent applying to the whole value.
impl FromStr for Rational {
    type Err = NumericError;

    fn from_str(text: &str) -> Result<Self, NumericError> {
        if text.is_empty() {
            return Err(NumericError::Format("empty string"));
        }
        let (mut negative, rest) = split_sign(text);
        let (rest, had_parens) = split_parens(rest)?;
        let rest = if had_parens {
            let (inner_negative, inner) = split_sign(rest);
            negative ^= inner_negative;
            inner
        } else {
            rest
        };
        parse_body(rest, negative)
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn split_parens(text: &str) -> Result<(&str, bool), NumericError> {
    if let Some(inner) = text.strip_prefix('(') {
        match inner.strip_suffix(')') {
            Some(body) => Ok((body, true)),
            None => Err(NumericError::Format("unbalanced parentheses")),
        }
    } else if text.ends_with(')') {
        Err(NumericError::Format("unbalanced parentheses"))
    } else {
        Ok((text, false))
    }
}

fn parse_body(text: &str, negative: bool) -> Result<Rational, NumericError> {
    // the exponent is rightmost and scales the whole value
    let (body, exp) = match text.rfind(['e', 'E']) {
        Some(i) => (&text[..i], parse_exponent(&text[i + 1..])?),
        None => (text, 0),
    };
    let (numer_text, denom_text) = match body.find('/') {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (numer, numer_scale) = parse_mantissa(numer_text)?;
    let (denom, denom_scale) = match denom_text {
        Some(t) => parse_mantissa(t)?,
        None => (1, 0),
    };
    if denom == 0 {
        return Err(NumericError::Undefined("zero denominator"));
    }
    let scale = checked_scale_add(checked_scale_add(exp, numer_scale)?, -denom_scale)?;
    Rational::new_scaled(if negative { -numer } else { numer }, denom, scale)
}

// Digits with an optional single decimal point; the returned scale is
// minus the count of fraction digits.
fn parse_mantissa(text: &str) -> Result<(i64, i32), NumericError> {
    let mut value: i64 = 0;
    let mut fraction_digits: i32 = 0;
    let mut seen_point = false;
    let mut seen_digit = false;
    for b in text.bytes() {
        match b {
            b'0'..=b'9' => {
                seen_digit = true;
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add((b - b'0') as i64))
                    .ok_or(NumericError::Overflow("numeric field exceeds 64 bits"))?;
                if seen_point {
                    fraction_digits += 1;
                }
            }
            b'.' if !seen_point => seen_point = true,
            _ => return Err(NumericError::Format("illegal character")),
        }
    }
    if !seen_digit {
        return Err(NumericError::Format("missing digits"));
    }
    Ok((value, -fraction_digits))
}

fn parse_exponent(text: &str) -> Result<i32, NumericError> {
    let (negative, digits) = split_sign(text);
    if digits.is_empty() {
        return Err(NumericError::Format("missing exponent digits"));
    }
    let mut value: i32 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            return Err(NumericError::Format("illegal exponent character"));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as i32))
            .ok_or(NumericError::Overflow("scale out of 32-bit range"))?;
    }
    Ok(if negative { -value } else { value })
}

/// Sign-prefixed fraction form: `numer`, then `/denom` when the
/// denominator is not 1, then `e<scale>` when the scale is nonzero.
/// The output re-parses to an equal value.
impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}", self.numer)?;
        if self.denom != 1 {
            write!(f, "/{}", self.denom)?;
        }
        if self.scale != 0 {
            write!(f, "e{}", self.scale)?;
        }
        Ok(())
    }
}

// Integral and float conversions
impl Rational {
    /// Truncates toward zero to an `i64`.
    ///
    /// Fails when `10^scale` leaves the 64-bit power-of-ten table or
    /// the truncated value leaves i64 range.
    pub fn trunc_i64(&self) -> Result<i64, NumericError> {
        if self.is_zero() {
            return Ok(0);
        }
        if self.scale > POW10_MAX || self.scale < -POW10_MAX {
            return Err(NumericError::Overflow("scale exceeds 64-bit powers of ten"));
        }
        let numer = Int128::from_i64(self.numer);
        let quotient = if self.scale >= 0 {
            numer
                .checked_mul(&Int128::pow10(self.scale as u32)?)?
                .checked_div(&Int128::from_i64(self.denom))?
        } else {
            let divisor = Int128::from_i64(self.denom)
                .checked_mul(&Int128::pow10(self.scale.unsigned_abs())?)?;
            numer.checked_div(&divisor)?
        };
        let mag = quotient
            .to_u64()
            .ok_or(NumericError::Overflow("value exceeds 64 bits"))?;
        if self.negative {
            if mag > i64::MIN.unsigned_abs() {
                Err(NumericError::Overflow("value exceeds 64 bits"))
            } else {
                Ok((mag as i64).wrapping_neg())
            }
        } else if mag > i64::MAX as u64 {
            Err(NumericError::Overflow("value exceeds 64 bits"))
        } else {
            Ok(mag as i64)
        }
    }

    /// Truncates toward zero to an [`Int128`].
    pub fn to_int128(&self) -> Result<Int128, NumericError> {
        let numer = Int128::from_i64(self.signed_numer());
        if self.scale >= 0 {
            let widened = numer.checked_mul(&Int128::pow10(self.scale as u32)?)?;
            widened.checked_div(&Int128::from_i64(self.denom))
        } else {
            let divisor = Int128::from_i64(self.denom)
                .checked_mul(&Int128::pow10(self.scale.unsigned_abs())?)?;
            numer.checked_div(&divisor)
        }
    }

    /// The nearest `f64`. Approximate for values past 53 bits of
    /// significand.
    pub fn as_f64(&self) -> f64 {
        let f = self.numer as f64 / self.denom as f64 * 10f64.powi(self.scale);
        if self.negative {
            -f
        } else {
            f
        }
    }
}

impl ToPrimitive for Rational {
    fn to_i64(&self) -> Option<i64> {
        self.trunc_i64().ok()
    }

    fn to_u64(&self) -> Option<u64> {
        if self.is_negative() {
            return None;
        }
        self.trunc_i64().ok().map(|v| v as u64)
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.as_f64())
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        let negative = value < 0;
        let mut n = (value as i64).unsigned_abs();
        if n == 0 {
            return Self::ZERO;
        }
        let mut scale = 0;
        while n % 10 == 0 {
            n /= 10;
            scale += 1;
        }
        Rational {
            numer: n as i64,
            denom: 1,
            scale,
            negative,
        }
    }
}

/// Fails only on `i64::MIN`, whose magnitude does not fit the stored
/// numerator.
impl TryFrom<i64> for Rational {
    type Error = NumericError;

    fn try_from(value: i64) -> Result<Self, NumericError> {
        Self::new(value, 1)
    }
}

impl TryFrom<&Rational> for Int128 {
    type Error = NumericError;

    fn try_from(value: &Rational) -> Result<Int128, NumericError> {
        value.to_int128()
    }
}
