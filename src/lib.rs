/*
    Top-level
*/

mod error;
mod number;

pub mod int128;
pub mod rational;
pub mod scaled;

pub use error::*;
pub use number::*;
