//! Per-body change tracking for incremental histogram rebuilds
//!
#![doc = include_str!("../readme.md")]

mod flags;
mod manager;
mod signaller;

#[doc(inline)]
pub use flags::ChangeFlags;

#[doc(inline)]
pub use manager::StateManager;

#[doc(inline)]
pub use signaller::{BoundSignaller, Signaller};
