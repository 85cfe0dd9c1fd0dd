use saxs_molecule::{Atom, Body, Water};

/// The full set of atoms and waters a [Body] contributes once every symmetry
/// replica has been materialised
///
/// Replica 0 is always the parent in its original placement; replicas
/// `1..replica_count` follow in the order their generating
/// [SymmetryOperation](saxs_molecule::SymmetryOperation)s were listed on the
/// body, and within an operation in order of increasing `k`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpandedBody {
    /// Atoms belonging to the parent and every replica
    pub atoms: Vec<Atom>,
    /// Waters belonging to the parent and every replica
    pub waters: Vec<Water>,
}

impl ExpandedBody {
    /// Total atom count across parent and replicas
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }
}

/// Materialise every symmetry replica of `body` into a flat atom/water list
///
/// ```rust
/// # use saxs_molecule::{Atom, Body, FormFactor, SymmetryOperation};
/// # use saxs_symmetry::expand_body;
/// let atom = Atom::new([0.0, 0.0, 0.0], 1.0, FormFactor::C);
/// let op = SymmetryOperation::new([1.0, 0.0, 0.0], [0.0; 3], [0.0; 3], 2);
/// let body = Body::new(vec![atom]).with_symmetry(vec![op]);
///
/// let expanded = expand_body(&body);
/// assert_eq!(expanded.atom_count(), 3); // parent + 2 replicas
/// assert_eq!(expanded.atoms[2].position, [2.0, 0.0, 0.0]);
/// ```
pub fn expand_body(body: &Body) -> ExpandedBody {
    if !body.has_symmetry() {
        return ExpandedBody {
            atoms: body.atoms.clone(),
            waters: body.waters.clone(),
        };
    }

    let n_replicas = body.replica_count() as usize;
    let mut atoms = Vec::with_capacity(body.atoms.len() * n_replicas);
    let mut waters = Vec::with_capacity(body.waters.len() * n_replicas);

    atoms.extend_from_slice(&body.atoms);
    waters.extend_from_slice(&body.waters);

    for op in &body.symmetry {
        for k in 1..=op.repeat {
            let transform = op.replica_transform(k);
            atoms.extend(body.atoms.iter().map(|a| {
                Atom::new(transform.apply(a.position), a.weight, a.form_factor)
            }));
            waters.extend(
                body.waters
                    .iter()
                    .map(|w| Water::new(transform.apply(w.position), w.weight)),
            );
        }
    }

    ExpandedBody { atoms, waters }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saxs_molecule::FormFactor;

    #[test]
    fn no_symmetry_is_a_plain_copy() {
        let body = Body::new(vec![Atom::new([1.0, 2.0, 3.0], 1.0, FormFactor::C)]);
        let expanded = expand_body(&body);
        assert_eq!(expanded.atoms, body.atoms);
    }

    #[test]
    fn replica_count_matches_expansion_length() {
        use saxs_molecule::SymmetryOperation;
        let atom = Atom::new([0.0; 3], 1.0, FormFactor::C);
        let op1 = SymmetryOperation::new([1.0, 0.0, 0.0], [0.0; 3], [0.0; 3], 2);
        let op2 = SymmetryOperation::new([0.0, 1.0, 0.0], [0.0; 3], [0.0; 3], 3);
        let body = Body::new(vec![atom]).with_symmetry(vec![op1, op2]);

        let expanded = expand_body(&body);
        assert_eq!(expanded.atom_count(), body.replica_count() as usize);
    }
}
