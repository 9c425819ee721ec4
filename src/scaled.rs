/*
    Width reduction
*/

use crate::error::NumericError;
use crate::int128::{Int128, Magnitude};

/// A 64-bit value paired with a decimal scale.
///
/// `value * 10^scale` approximates a 128-bit source that may not fit in
/// 64 bits. The reduction is the one deliberately lossy step in the
/// crate: every divide-by-ten truncates toward zero, and the count of
/// divisions is carried in `scale`. [`Rational`](crate::rational::Rational)
/// funnels every widened intermediate through this chokepoint to keep
/// its stored fields inside 64 bits across arbitrarily long chains of
/// operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScaledInt64 {
    /// The reduced value, sign included.
    pub value: i64,
    /// Decimal exponent restoring the original magnitude.
    pub scale: i32,
}

impl ScaledInt64 {
    /// Reduces a 128-bit value to the closest `value * 10^scale` with
    /// `value` in i64 range, folding `extra_scale` into the result.
    pub fn reduce(source: &Int128, extra_scale: i32) -> Result<Self, NumericError> {
        let negative = source.is_negative();
        let mut mag = Magnitude::of(source);
        let mut steps = 0i32;
        while !mag.fits_i64() {
            mag.divmod_small_assign(10);
            steps += 1;
        }
        let scale = extra_scale
            .checked_add(steps)
            .ok_or(NumericError::Overflow("scale out of 32-bit range"))?;
        let value = mag.as_u64() as i64;
        Ok(ScaledInt64 {
            value: if negative { -value } else { value },
            scale,
        })
    }
}
