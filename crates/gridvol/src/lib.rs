//! Voxel grid for the grid-based excluded-volume scattering model
//!
#![doc = include_str!("../readme.md")]

mod error;
mod exv;
mod grid;
mod voxel;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use exv::{grid_excluded_volume_histograms, GridExvHistograms};

#[doc(inline)]
pub use grid::Grid;

#[doc(inline)]
pub use voxel::VoxelKind;
