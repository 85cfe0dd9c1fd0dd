//! Distance distributions and the Debye sinc lookup table
//!
#![doc = include_str!("../readme.md")]

mod distribution;
mod error;
mod sinc;

#[doc(inline)]
pub use crate::distribution::Distribution1D;

#[doc(inline)]
pub use crate::error::{Error, Result};

#[doc(inline)]
pub use crate::sinc::{sinc, SincTable};
