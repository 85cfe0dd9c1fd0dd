//! Rigid-transform expansion of symmetry-bearing bodies
//!
#![doc = include_str!("../readme.md")]

mod expand;
mod scaling;

#[doc(inline)]
pub use expand::{expand_body, ExpandedBody};

#[doc(inline)]
pub use scaling::{cross_scaling, self_scaling};
