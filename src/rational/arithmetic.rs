/*
    Rational arithmetic
*/

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};

use super::{checked_scale_add, dec_digits, Rational};
use crate::error::NumericError;
use crate::int128::{mul_64_64, Int128};
use crate::number::Number;

// An operand this many decimal orders of magnitude below the other
// cannot move any stored digit of the result: i64 holds 19 significant
// digits, plus one guard digit.
const NEGLIGIBLE_DIGITS: i64 = 20;

// Largest power of ten representable in 128 bits.
const ALIGN_MAX: i64 = 38;

// Addition and subtraction
impl Rational {
    /// Adds this `Rational` and another.
    ///
    /// Exponents are aligned by widening the larger-scale numerator
    /// into 128 bits; the cross products and the combined numerator are
    /// reduced back through [`ScaledInt64`](crate::scaled::ScaledInt64).
    /// An operand negligible at 64-bit precision is dropped outright.
    pub fn checked_add(&self, other: &Self) -> Result<Self, NumericError> {
        if self.is_zero() {
            return Ok(*other);
        }
        if other.is_zero() {
            return Ok(*self);
        }

        let gap = self.order_of_magnitude() - other.order_of_magnitude();
        if gap > NEGLIGIBLE_DIGITS {
            return Ok(*self);
        }
        if gap < -NEGLIGIBLE_DIGITS {
            return Ok(*other);
        }

        // align exponents on the smaller scale
        let (hi, lo) = if self.scale >= other.scale {
            (self, other)
        } else {
            (other, self)
        };
        let diff = hi.scale as i64 - lo.scale as i64;
        if diff > ALIGN_MAX {
            return Err(NumericError::Overflow("scale alignment exceeds 128 bits"));
        }
        let aligned =
            Int128::from_i64(hi.signed_numer()).checked_mul(&Int128::pow10(diff as u32)?)?;
        let term_hi = aligned.checked_mul(&Int128::from_i64(lo.denom))?;
        let term_lo =
            Int128::from_i64(lo.signed_numer()).checked_mul(&Int128::from_i64(hi.denom))?;
        let numer = term_hi.checked_add(&term_lo)?;
        let denom = Int128::from_i64(hi.denom).checked_mul(&Int128::from_i64(lo.denom))?;
        Self::normalize_wide(false, &numer, &denom, lo.scale)
    }

    /// Subtracts another `Rational` from this one, as addition of the
    /// negation.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, NumericError> {
        self.checked_add(&(-*other))
    }

    // Decimal order of magnitude of the whole value.
    fn order_of_magnitude(&self) -> i64 {
        dec_digits(self.numer) - dec_digits(self.denom) + self.scale as i64
    }
}

// Multiplication and division
impl Rational {
    /// Multiplies this `Rational` and another.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, NumericError> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::ZERO);
        }
        if self.is_one() {
            return Ok(*other);
        }
        if other.is_one() {
            return Ok(*self);
        }
        if self.is_neg_one() {
            return Ok(-*other);
        }
        if other.is_neg_one() {
            return Ok(-*self);
        }

        let numer = Int128::from_i64(self.signed_numer())
            .checked_mul(&Int128::from_i64(other.signed_numer()))?;
        let denom =
            Int128::from_i64(self.denom).checked_mul(&Int128::from_i64(other.denom))?;
        let scale = checked_scale_add(self.scale, other.scale)?;
        Self::normalize_wide(false, &numer, &denom, scale)
    }

    /// Divides this `Rational` by another, as multiplication by the
    /// reciprocal.
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumericError> {
        self.checked_mul(&other.recip()?)
    }

    fn is_neg_one(&self) -> bool {
        self.numer == 1 && self.denom == 1 && self.scale == 0 && self.negative
    }
}

// Exponentiation
impl Rational {
    /// Raises this `Rational` to an integer power.
    ///
    /// Negative powers go through the reciprocal. Positive powers run
    /// repeated squaring on the raw 64-bit fields; the first 64-bit
    /// overflow switches to widened squaring, which reduces every step
    /// through the 128-bit intermediates instead of failing.
    pub fn checked_pow(&self, exp: i32) -> Result<Self, NumericError> {
        if exp == 0 {
            return Ok(Self::ONE);
        }
        if self.is_zero() {
            return if exp > 0 {
                Ok(Self::ZERO)
            } else {
                Err(NumericError::Undefined("zero to a negative power"))
            };
        }
        let magnitude = (exp as i64).unsigned_abs();
        if exp < 0 {
            self.recip()?.pow_positive(magnitude)
        } else {
            self.pow_positive(magnitude)
        }
    }

    fn pow_positive(&self, exp: u64) -> Result<Self, NumericError> {
        match self.pow_raw(exp) {
            Some(result) => result,
            None => self.pow_wide(exp),
        }
    }

    // Repeated squaring over the raw fields; None signals a 64-bit
    // overflow.
    fn pow_raw(&self, exp: u64) -> Option<Result<Self, NumericError>> {
        let mut n: i64 = 1;
        let mut d: i64 = 1;
        let mut base_n = self.numer;
        let mut base_d = self.denom;
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                n = n.checked_mul(base_n)?;
                d = d.checked_mul(base_d)?;
            }
            e >>= 1;
            if e > 0 {
                base_n = base_n.checked_mul(base_n)?;
                base_d = base_d.checked_mul(base_d)?;
            }
        }
        let scale = match (self.scale as i64).checked_mul(exp as i64) {
            Some(s) if i32::try_from(s).is_ok() => s as i32,
            _ => return Some(Err(NumericError::Overflow("scale out of 32-bit range"))),
        };
        let negative = self.negative && exp & 1 == 1;
        Some(Self::normalize(negative, n as u64, d as u64, scale))
    }

    // Widened repeated squaring: every multiplication renormalizes
    // through the 128-bit intermediates, trading exactness for range.
    fn pow_wide(&self, exp: u64) -> Result<Self, NumericError> {
        let mut result = Self::ONE;
        let mut base = *self;
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        Ok(result)
    }
}

// Comparison
impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let (sa, sb) = (self.signum(), other.signum());
        if sa != sb {
            return sa.cmp(&sb);
        }
        if sa == 0 {
            return Ordering::Equal;
        }
        let mag = self.cmp_abs(other);
        if sa < 0 {
            mag.reverse()
        } else {
            mag
        }
    }
}

impl Rational {
    // Exact magnitude comparison: 128-bit cross products, the larger
    // scale aligned by repeated tens. The loop is bounded because the
    // scaled side starts at 1 or more, so past 38 steps its overflow
    // decides the ordering outright.
    fn cmp_abs(&self, other: &Self) -> Ordering {
        let a = mul_64_64(self.numer as u64, other.denom as u64);
        let b = mul_64_64(other.numer as u64, self.denom as u64);
        let diff = self.scale as i64 - other.scale as i64;
        let (mut scaled, fixed, flipped) = if diff >= 0 { (a, b, false) } else { (b, a, true) };
        for _ in 0..diff.unsigned_abs() {
            if scaled.mul_small_assign(10) != 0 {
                return if flipped {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
            }
        }
        let ord = scaled.cmp_words(&fixed);
        if flipped {
            ord.reverse()
        } else {
            ord
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equal values may normalize to different field triples, so equality
// goes through the exact comparison.
impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rational {}

// Operator sugar over the checked operations; panics on error the way
// the standard integer operators do.
macro_rules! arith_op {
    ($op:ident, $method:ident, $checked:ident) => {
        impl $op for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                match self.$checked(&rhs) {
                    Ok(v) => v,
                    Err(e) => panic!("{}", e),
                }
            }
        }
    };
}

arith_op!(Add, add, checked_add);
arith_op!(Sub, sub, checked_sub);
arith_op!(Mul, mul, checked_mul);
arith_op!(Div, div, checked_div);

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        if self.is_zero() {
            return self;
        }
        Rational {
            negative: !self.negative,
            ..self
        }
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::ONE
    }
}

impl Number for Rational {
    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }

    fn is_one(&self) -> bool {
        Rational::is_one(self)
    }

    fn is_negative(&self) -> bool {
        Rational::is_negative(self)
    }

    fn checked_add(&self, other: &Self) -> Result<Self, NumericError> {
        Rational::checked_add(self, other)
    }

    fn checked_sub(&self, other: &Self) -> Result<Self, NumericError> {
        Rational::checked_sub(self, other)
    }

    fn checked_mul(&self, other: &Self) -> Result<Self, NumericError> {
        Rational::checked_mul(self, other)
    }

    fn checked_div(&self, other: &Self) -> Result<Self, NumericError> {
        Rational::checked_div(self, other)
    }

    fn checked_pow(&self, exp: i32) -> Result<Self, NumericError> {
        Rational::checked_pow(self, exp)
    }
}
