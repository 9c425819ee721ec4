/*
    Failure taxonomy
*/

use thiserror::Error;

/// An error raised by a fixed-width arithmetic operation.
///
/// Every failure is reported synchronously at the point of detection and
/// is never retried internally. The core never degrades precision to
/// avoid one of these errors; the only deliberately lossy step is the
/// [`ScaledInt64`](crate::scaled::ScaledInt64) reduction, which is not a
/// failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum NumericError {
    /// The result cannot be represented in the fixed width.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// The operation has no defined result.
    #[error("undefined: {0}")]
    Undefined(&'static str),

    /// The input text does not match the expected grammar.
    #[error("malformed input: {0}")]
    Format(&'static str),
}
