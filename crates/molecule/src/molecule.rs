use crate::atom::Water;
use crate::body::Body;

/// A full structural model: a sequence of rigid bodies plus all hydration
///
/// [Molecule] is the top-level input to the histogram manager. Body order is
/// stable and forms the index space the state manager uses; nothing in this
/// crate ever reorders `bodies`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    /// Rigid bodies, indexed `0..bodies.len()`
    pub bodies: Vec<Body>,
}

impl Molecule {
    /// Construct a molecule from a list of bodies
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    /// Number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Total atom count across all bodies
    pub fn atom_count(&self) -> usize {
        self.bodies.iter().map(Body::len).sum()
    }

    /// Total hydration water count across all bodies
    pub fn water_count(&self) -> usize {
        self.bodies.iter().map(|b| b.waters.len()).sum()
    }

    /// All hydration waters flattened across bodies, in body order
    ///
    /// The partial histogram variant treats hydration as a single global
    /// layer regardless of which body a water is attached to.
    pub fn all_waters(&self) -> Vec<Water> {
        self.bodies.iter().flat_map(|b| b.waters.iter().copied()).collect()
    }

    /// Whether any body carries symmetry operations
    pub fn has_symmetry(&self) -> bool {
        self.bodies.iter().any(Body::has_symmetry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::form_factor::FormFactor;

    #[test]
    fn empty_body_contributes_nothing() {
        let m = Molecule::new(vec![Body::new(vec![]), Body::new(vec![Atom::new([0.0; 3], 1.0, FormFactor::C)])]);
        assert_eq!(m.atom_count(), 1);
        assert_eq!(m.body_count(), 2);
    }
}
