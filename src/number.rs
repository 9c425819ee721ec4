/*
    Defines a number
*/

use std::fmt::{Debug, Display};

use crate::error::NumericError;

/// The shared arithmetic contract.
///
/// A `Number` is a fixed-width numeric value: arithmetic either produces
/// an exact (or deliberately reduced) result in the same width, or fails
/// with a [`NumericError`]. Consumers that are generic over the numeric
/// representation (a linear-algebra layer, for instance) program
/// against this trait rather than a concrete type.
///
/// The concrete types implement the same operations inherently; the
/// trait methods simply forward to them.
pub trait Number: Clone + Debug + Display + PartialOrd {
    /// Returns true if this `Number` encodes zero.
    fn is_zero(&self) -> bool;

    /// Returns true if this `Number` encodes one.
    fn is_one(&self) -> bool;

    /// Returns true if this `Number` encodes a value below zero.
    fn is_negative(&self) -> bool;

    /// Adds this `Number` and another.
    fn checked_add(&self, other: &Self) -> Result<Self, NumericError>;

    /// Subtracts another `Number` from this one.
    fn checked_sub(&self, other: &Self) -> Result<Self, NumericError>;

    /// Multiplies this `Number` and another.
    fn checked_mul(&self, other: &Self) -> Result<Self, NumericError>;

    /// Divides this `Number` by another.
    fn checked_div(&self, other: &Self) -> Result<Self, NumericError>;

    /// Raises this `Number` to an integer power.
    fn checked_pow(&self, exp: i32) -> Result<Self, NumericError>;
}
