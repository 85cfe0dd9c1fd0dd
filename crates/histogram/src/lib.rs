//! Composite distance histograms and the Debye transform
//!
#![doc = include_str!("../readme.md")]

mod composite;
mod distance_histogram;
mod error;
mod form_factor;
mod free_parameters;
mod manager;
mod profile;

#[doc(inline)]
pub use composite::{
    atomic_channel_index, explicit_pair_index, CompositeDistanceHistogram, FormFactorChannels, GridExvChannels,
    EXPLICIT_PAIR_COUNT,
};

#[doc(inline)]
pub use distance_histogram::DistanceHistogram;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use form_factor::form_factor;

#[doc(inline)]
pub use free_parameters::{debye_waller, FreeParameters};

#[doc(inline)]
pub use manager::{MonolithicHistogramManager, PartialHistogramManager};

#[doc(inline)]
pub use profile::ScatteringProfile;
