//! Threaded pairwise distance-histogram job queue
//!
#![doc = include_str!("../readme.md")]

mod calculator;
mod error;
mod job;
mod scaling;

#[doc(inline)]
pub use calculator::SimpleCalculator;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use job::JobHandle;

pub use scaling::MAX_SCALING;
