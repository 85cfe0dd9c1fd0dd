//! Atom, body and symmetry data model
//!
//! This crate holds the structural input to the distance-histogram compute
//! engine: atoms grouped into rigid bodies, optional hydration waters, and
//! optional symmetry operations. Everything here is plain data; the parsers
//! that build it (PDB, CIF, ...) are external collaborators.

mod atom;
mod body;
mod error;
mod form_factor;
mod molecule;
mod symmetry;

#[doc(inline)]
pub use atom::{Atom, Water};

#[doc(inline)]
pub use body::Body;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use form_factor::FormFactor;

#[doc(inline)]
pub use molecule::Molecule;

#[doc(inline)]
pub use symmetry::{RigidTransform, SymmetryOperation};
