use saxs_molecule::{Body, RigidTransform};

/// The rigid transform applied to every replica of `body`, including the
/// parent (replica 0, always the identity)
pub fn replica_transforms(body: &Body) -> Vec<RigidTransform> {
    let mut transforms = vec![RigidTransform {
        translation: [0.0; 3],
        euler_angles: [0.0; 3],
        pivot: [0.0; 3],
    }];

    for op in &body.symmetry {
        for k in 1..=op.repeat {
            transforms.push(op.replica_transform(k));
        }
    }

    transforms
}

/// Integer multiplier for a body's own internal self-distance histogram
///
/// A rigid transform preserves the pairwise distances within a body, so every
/// replica has exactly the same internal self-distance histogram as the
/// parent. Rather than recompute it `replica_count` times, the calculator
/// computes it once and scales it by this factor.
///
/// ```rust
/// # use saxs_molecule::{Atom, Body, FormFactor, SymmetryOperation};
/// # use saxs_symmetry::self_scaling;
/// let atom = Atom::new([0.0; 3], 1.0, FormFactor::C);
/// let op = SymmetryOperation::new([1.0, 0.0, 0.0], [0.0; 3], [0.0; 3], 2);
/// let body = Body::new(vec![atom]).with_symmetry(vec![op]);
/// assert_eq!(self_scaling(&body), 3); // parent + 2 replicas
/// ```
pub fn self_scaling(body: &Body) -> u32 {
    body.replica_count()
}

/// Number of distinct replica-pair cross-histograms a symmetric body needs
///
/// Unlike the internal self-distances, distances *between* two different
/// replicas generally differ per pair (they depend on the relative transform
/// between the two placements), so each of the `n choose 2` pairs among the
/// `n = replica_count` replicas needs its own cross-correlation job.
///
/// A body with no symmetry (`replica_count == 1`) has no cross pairs, which
/// is exactly the no-symmetry baseline: nothing extra is enqueued and output
/// matches a calculator that never heard of symmetry.
pub fn cross_scaling(body: &Body) -> u32 {
    let n = body.replica_count();
    n * (n - 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use saxs_molecule::{Atom, FormFactor, SymmetryOperation};

    fn atom() -> Atom {
        Atom::new([0.0; 3], 1.0, FormFactor::C)
    }

    fn body_with_repeat(repeat: u32) -> Body {
        if repeat == 0 {
            return Body::new(vec![atom()]);
        }
        let op = SymmetryOperation::new([1.0, 0.0, 0.0], [0.0; 3], [0.0; 3], repeat);
        Body::new(vec![atom()]).with_symmetry(vec![op])
    }

    #[rstest]
    #[case(0, 1, 0)]
    #[case(2, 3, 3)]
    #[case(3, 4, 6)]
    fn scaling_matches_n_choose_2_over_replicas(#[case] repeat: u32, #[case] expect_self: u32, #[case] expect_cross: u32) {
        let body = body_with_repeat(repeat);
        assert_eq!(self_scaling(&body), expect_self);
        assert_eq!(cross_scaling(&body), expect_cross);
    }

    #[test]
    fn replica_transforms_starts_with_identity() {
        let op = SymmetryOperation::new([1.0, 0.0, 0.0], [0.0; 3], [0.0; 3], 1);
        let body = Body::new(vec![atom()]).with_symmetry(vec![op]);
        let transforms = replica_transforms(&body);
        assert_eq!(transforms.len(), 2);
        assert_eq!(transforms[0].apply([1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
    }
}
