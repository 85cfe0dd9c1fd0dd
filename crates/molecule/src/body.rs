use crate::atom::{Atom, Water};
use crate::symmetry::SymmetryOperation;

/// A contiguous group of atoms that moves together as a rigid unit
///
/// Bodies are enumerated `0..B-1` by their position in a [Molecule](crate::Molecule);
/// that index is the identity the state manager uses to track modifications,
/// so a [Body] does not store its own index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    /// Atoms owned by this body
    pub atoms: Vec<Atom>,
    /// Hydration waters associated with this body, if any
    pub waters: Vec<Water>,
    /// Symmetry operations applied to this body, if any
    pub symmetry: Vec<SymmetryOperation>,
}

impl Body {
    /// Construct a body with no waters or symmetry
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            waters: Vec::new(),
            symmetry: Vec::new(),
        }
    }

    /// Attach hydration waters
    pub fn with_waters(mut self, waters: Vec<Water>) -> Self {
        self.waters = waters;
        self
    }

    /// Attach symmetry operations
    pub fn with_symmetry(mut self, symmetry: Vec<SymmetryOperation>) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Number of atoms in this body
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether this body has no atoms
    ///
    /// A zero-atom body is valid input: it contributes the identity (empty)
    /// distribution rather than being treated as an error.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Whether this body carries any symmetry operations
    pub fn has_symmetry(&self) -> bool {
        !self.symmetry.is_empty()
    }

    /// Total replica count including the parent: `1 + sum(repeat)`
    pub fn replica_count(&self) -> u32 {
        1 + self.symmetry.iter().map(|op| op.repeat).sum::<u32>()
    }
}
