//! A modular toolkit for computing and fitting small-angle X-ray scattering
//! (SAXS) intensity profiles from three-dimensional atomic models
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Flatten the default crates
#[doc(inline)]
pub use saxs_settings as settings;

#[doc(inline)]
pub use saxs_molecule as molecule;

#[doc(inline)]
pub use saxs_coord as coord;

#[doc(inline)]
pub use saxs_distribution as distribution;

#[doc(inline)]
pub use saxs_state as state;

#[doc(inline)]
pub use saxs_symmetry as symmetry;

#[doc(inline)]
pub use saxs_calculator as calculator;

#[doc(inline)]
pub use saxs_histogram as histogram;

// Re-exports of crates that are behind feature flags
#[cfg(feature = "gridvol")]
#[cfg_attr(docsrs, doc(cfg(feature = "gridvol")))]
#[doc(inline)]
pub use saxs_gridvol as gridvol;
