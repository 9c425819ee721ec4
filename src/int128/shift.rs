/*
    Bit shifts
*/

use std::ops::{Shl, Shr};

use super::Int128;
use crate::error::NumericError;

impl Int128 {
    /// Shifts left by `count` bits.
    ///
    /// A negative count fails; a count of 128 or more yields zero.
    pub fn checked_shl(&self, count: i32) -> Result<Self, NumericError> {
        if count < 0 {
            return Err(NumericError::Undefined("negative shift count"));
        }
        Ok(self.shl_bits(count as u32))
    }

    /// Shifts right by `count` bits, extending the sign.
    ///
    /// A negative count fails; a count of 128 or more yields zero or
    /// minus one depending on the original sign.
    pub fn checked_shr(&self, count: i32) -> Result<Self, NumericError> {
        if count < 0 {
            return Err(NumericError::Undefined("negative shift count"));
        }
        Ok(self.shr_bits(count as u32, self.fill()))
    }

    /// Shifts right by `count` bits, filling with zeros.
    ///
    /// A negative count fails; a count of 128 or more yields zero.
    pub fn checked_shr_logical(&self, count: i32) -> Result<Self, NumericError> {
        if count < 0 {
            return Err(NumericError::Undefined("negative shift count"));
        }
        Ok(self.shr_bits(count as u32, 0))
    }

    const fn fill(&self) -> u32 {
        if self.is_negative() {
            u32::MAX
        } else {
            0
        }
    }

    // Per-limb shift: a limb offset of count/32 and an intra-limb
    // offset of count%32, adjacent limbs OR-combined.
    fn shl_bits(&self, count: u32) -> Self {
        if count >= 128 {
            return Self::ZERO;
        }
        let off = (count / 32) as usize;
        let bit = count % 32;
        let mut limbs = [0u32; 4];
        for i in 0..4 {
            let src = i + off;
            if src < 4 {
                limbs[i] = self.limbs[src] << bit;
                if bit != 0 && src + 1 < 4 {
                    limbs[i] |= self.limbs[src + 1] >> (32 - bit);
                }
            }
        }
        Int128 { limbs }
    }

    fn shr_bits(&self, count: u32, fill: u32) -> Self {
        if count >= 128 {
            return Int128 { limbs: [fill; 4] };
        }
        let off = (count / 32) as isize;
        let bit = count % 32;
        let word = |j: isize| -> u32 {
            if j < 0 {
                fill
            } else {
                self.limbs[j as usize]
            }
        };
        let mut limbs = [0u32; 4];
        for i in 0..4isize {
            let src = i - off;
            limbs[i as usize] = word(src) >> bit;
            if bit != 0 {
                limbs[i as usize] |= word(src - 1) << (32 - bit);
            }
        }
        Int128 { limbs }
    }
}

impl Shl<u32> for Int128 {
    type Output = Int128;

    fn shl(self, count: u32) -> Int128 {
        self.shl_bits(count)
    }
}

/// Arithmetic right shift; use
/// [`checked_shr_logical`](Int128::checked_shr_logical) for the
/// zero-filling form.
impl Shr<u32> for Int128 {
    type Output = Int128;

    fn shr(self, count: u32) -> Int128 {
        self.shr_bits(count, self.fill())
    }
}
