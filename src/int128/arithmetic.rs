/*
    128-bit arithmetic
*/

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use num_traits::{One, Zero};

use super::{Int128, Magnitude};
use crate::error::NumericError;
use crate::number::Number;

// Negation, addition, subtraction
impl Int128 {
    /// Negates this `Int128`.
    ///
    /// Fails on [`Int128::MIN`], which has no positive counterpart.
    pub fn checked_neg(&self) -> Result<Self, NumericError> {
        if *self == Self::MIN {
            return Err(NumericError::Overflow("negation of the minimum value"));
        }
        // invert every limb, then add one with the carry rippling
        // from the least-significant limb
        let mut limbs = self.limbs;
        let mut carry = 1u64;
        for i in (0..4).rev() {
            let t = (!limbs[i]) as u64 + carry;
            limbs[i] = t as u32;
            carry = t >> 32;
        }
        Ok(Int128 { limbs })
    }

    /// Adds this `Int128` and another.
    pub fn checked_add(&self, other: &Self) -> Result<Self, NumericError> {
        let mut limbs = [0u32; 4];
        let mut carry = 0u64;
        for i in (0..4).rev() {
            let t = self.limbs[i] as u64 + other.limbs[i] as u64 + carry;
            limbs[i] = t as u32;
            carry = t >> 32;
        }
        let out = Int128 { limbs };
        // the carry into the sign limb is inconsistent exactly when two
        // same-sign operands produce a result of the opposite sign
        if self.is_negative() == other.is_negative() && out.is_negative() != self.is_negative() {
            return Err(NumericError::Overflow("128-bit addition"));
        }
        Ok(out)
    }

    /// Subtracts another `Int128` from this one, as addition of the
    /// negation.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, NumericError> {
        match other.checked_neg() {
            Ok(negated) => self.checked_add(&negated),
            Err(_) => {
                // other is MIN; a - MIN fits exactly when a is negative,
                // and then equals a with the sign bit cleared
                if self.is_negative() {
                    let mut limbs = self.limbs;
                    limbs[0] &= 0x7FFF_FFFF;
                    Ok(Int128 { limbs })
                } else {
                    Err(NumericError::Overflow("128-bit subtraction"))
                }
            }
        }
    }
}

// Multiplication
impl Int128 {
    /// Multiplies this `Int128` and another.
    ///
    /// The operands are classified by [`magnitude`](Int128::magnitude)
    /// and dispatched to a partial-product path sized for them; any
    /// combination whose product provably exceeds 128 bits fails
    /// without computing.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, NumericError> {
        // trivial operands skip the limb work
        if self.is_zero() || other.is_zero() {
            return Ok(Self::ZERO);
        }
        if *self == Self::ONE {
            return Ok(*other);
        }
        if *other == Self::ONE {
            return Ok(*self);
        }
        if *self == Self::NEG_ONE {
            return other.checked_neg();
        }
        if *other == Self::NEG_ONE {
            return self.checked_neg();
        }

        let negative = self.is_negative() != other.is_negative();
        let a = Magnitude::of(self);
        let b = Magnitude::of(other);

        let product = match (a.word_len(), b.word_len()) {
            // 64-bit by 64-bit: four 32x32 partials, fits 128 exactly
            (1..=2, 1..=2) => mul_64_64(a.as_u64(), b.as_u64()),
            // 32-bit by up to 128-bit: one row of partials, the carry
            // out of the top limb is an overflow
            (1, _) => mul_32_128(a.words[3], &b)?,
            (_, 1) => mul_32_128(b.words[3], &a)?,
            // 64-bit by 96-bit: two rows, a carry into a fifth limb is
            // an overflow
            (2, 3) => mul_64_96(a.as_u64(), &b)?,
            (3, 2) => mul_64_96(b.as_u64(), &a)?,
            // the product needs more than 128 bits
            _ => return Err(NumericError::Overflow("128-bit multiplication")),
        };
        product.to_int128(negative)
    }

    /// Raises this `Int128` to a non-negative power by repeated
    /// squaring.
    pub fn checked_pow(&self, exp: i32) -> Result<Self, NumericError> {
        if exp < 0 {
            return Err(NumericError::Undefined("negative integer exponent"));
        }
        let mut result = Self::ONE;
        let mut base = *self;
        let mut e = exp as u32;
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

/// Full 64x64 product, exact in 128 bits.
pub(crate) fn mul_64_64(a: u64, b: u64) -> Magnitude {
    let (a1, a0) = (a >> 32, a & 0xFFFF_FFFF);
    let (b1, b0) = (b >> 32, b & 0xFFFF_FFFF);
    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;
    let mid = (p00 >> 32) + (p01 & 0xFFFF_FFFF) + (p10 & 0xFFFF_FFFF);
    let high = (mid >> 32) + (p01 >> 32) + (p10 >> 32) + p11;
    Magnitude {
        words: [(high >> 32) as u32, high as u32, mid as u32, p00 as u32],
    }
}

// Single-word by four-word product.
fn mul_32_128(factor: u32, wide: &Magnitude) -> Result<Magnitude, NumericError> {
    let mut out = *wide;
    if out.mul_small_assign(factor) != 0 {
        return Err(NumericError::Overflow("128-bit multiplication"));
    }
    Ok(out)
}

// Two-word by three-word product: a low row and a high row offset by
// one limb.
fn mul_64_96(a: u64, wide: &Magnitude) -> Result<Magnitude, NumericError> {
    let a0 = a as u32;
    let a1 = (a >> 32) as u32;

    // wide occupies three words, so neither row carries out of 128 bits
    let mut low = *wide;
    low.mul_small_assign(a0);
    let mut high = *wide;
    high.mul_small_assign(a1);

    // the high row is offset by one limb; anything in its top word
    // would land in a fifth limb
    if high.words[0] != 0 {
        return Err(NumericError::Overflow("128-bit multiplication"));
    }
    let shifted = Magnitude {
        words: [high.words[1], high.words[2], high.words[3], 0],
    };

    let mut out = low;
    if out.add_assign(&shifted) != 0 {
        return Err(NumericError::Overflow("128-bit multiplication"));
    }
    Ok(out)
}

// Division
impl Int128 {
    /// Computes quotient and remainder in one pass of the
    /// shift-subtract loop.
    ///
    /// The quotient sign is the product of the operand signs; the
    /// remainder sign follows the dividend.
    pub fn checked_div_rem(&self, other: &Self) -> Result<(Self, Self), NumericError> {
        if other.is_zero() {
            return Err(NumericError::Undefined("division by zero"));
        }
        if *other == Self::ONE {
            return Ok((*self, Self::ZERO));
        }
        if *other == Self::NEG_ONE {
            return Ok((self.checked_neg()?, Self::ZERO));
        }
        if self == other {
            return Ok((Self::ONE, Self::ZERO));
        }

        let negative = self.is_negative() != other.is_negative();
        let mut rem = Magnitude::of(self);
        let mut div = Magnitude::of(other);

        if div.cmp_words(&rem) == Ordering::Greater {
            // the divisor magnitude exceeds the dividend
            return Ok((Self::ZERO, *self));
        }

        // left-align the divisor under the dividend, then walk the
        // alignment back down one bit at a time
        let shift = div.leading_zeros() - rem.leading_zeros();
        div.shl_bits(shift);
        let mut quot = Magnitude::ZERO;
        for bit in (0..=shift).rev() {
            if div.cmp_words(&rem) != Ordering::Greater {
                rem.sub_assign(&div);
                quot.set_bit(bit);
            }
            div.shr1();
        }

        let q = quot.to_int128(negative)?;
        let r = rem.to_int128(self.is_negative())?;
        Ok((q, r))
    }

    /// Divides this `Int128` by another, truncating toward zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumericError> {
        Ok(self.checked_div_rem(other)?.0)
    }

    /// Computes the remainder of dividing this `Int128` by another.
    pub fn checked_rem(&self, other: &Self) -> Result<Self, NumericError> {
        Ok(self.checked_div_rem(other)?.1)
    }
}

// Comparison
impl Ord for Int128 {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // same sign: unsigned limb order agrees with signed order
            _ => self.limbs.cmp(&other.limbs),
        }
    }
}

impl PartialOrd for Int128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Operator sugar over the checked operations; panics on error the way
// the standard integer operators do.
macro_rules! arith_op {
    ($op:ident, $method:ident, $checked:ident) => {
        impl $op for Int128 {
            type Output = Int128;

            fn $method(self, rhs: Int128) -> Int128 {
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
arith_op!(Rem, rem, checked_rem);

impl Neg for Int128 {
    type Output = Int128;

    fn neg(self) -> Int128 {
        match self.checked_neg() {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Zero for Int128 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        Int128::is_zero(self)
    }
}

impl One for Int128 {
    fn one() -> Self {
        Self::ONE
    }
}

impl Number for Int128 {
    fn is_zero(&self) -> bool {
        Int128::is_zero(self)
    }

    fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    fn is_negative(&self) -> bool {
        Int128::is_negative(self)
    }

    fn checked_add(&self, other: &Self) -> Result<Self, NumericError> {
        Int128::checked_add(self, other)
    }

    fn checked_sub(&self, other: &Self) -> Result<Self, NumericError> {
        Int128::checked_sub(self, other)
    }

    fn checked_mul(&self, other: &Self) -> Result<Self, NumericError> {
        Int128::checked_mul(self, other)
    }

    fn checked_div(&self, other: &Self) -> Result<Self, NumericError> {
        Int128::checked_div(self, other)
    }

    fn checked_pow(&self, exp: i32) -> Result<Self, NumericError> {
        Int128::checked_pow(self, exp)
    }
}
