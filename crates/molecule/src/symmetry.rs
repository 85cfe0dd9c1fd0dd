/// A rigid-body symmetry operation applied to a [Body](crate::Body)
///
/// Replica `k` (`1..=repeat`) is generated by composing the operation `k`
/// times from the parent's frame: the translation sums to `k * translation`,
/// and the orientation compounds as a rotation of `k * euler_angles` about
/// `pivot`. Replicas are generated in order of increasing `k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryOperation {
    /// Translation applied per repeat, in Angstrom
    pub translation: [f64; 3],
    /// Euler angles (radians, XYZ order) applied per repeat
    pub euler_angles: [f64; 3],
    /// Pivot point the rotation is performed about, in Angstrom
    pub pivot: [f64; 3],
    /// Number of times the operation is composed, `repeat >= 1`
    pub repeat: u32,
}

impl SymmetryOperation {
    /// Construct a new symmetry operation
    ///
    /// # Panics
    /// Panics if `repeat == 0`; a symmetry operation with no replicas is
    /// meaningless and callers should simply omit it.
    pub fn new(translation: [f64; 3], euler_angles: [f64; 3], pivot: [f64; 3], repeat: u32) -> Self {
        assert!(repeat >= 1, "SymmetryOperation: repeat must be >= 1");
        Self {
            translation,
            euler_angles,
            pivot,
            repeat,
        }
    }

    /// The rigid transform for replica `k` (`1 <= k <= repeat`)
    ///
    /// Composes by scaling the translation and euler angles by `k`; this is
    /// the tie-break the symmetry manager relies on to keep replica
    /// generation order-independent of how many replicas are requested.
    pub fn replica_transform(&self, k: u32) -> RigidTransform {
        assert!((1..=self.repeat).contains(&k), "replica index out of range");
        let s = k as f64;
        RigidTransform {
            translation: [
                self.translation[0] * s,
                self.translation[1] * s,
                self.translation[2] * s,
            ],
            euler_angles: [
                self.euler_angles[0] * s,
                self.euler_angles[1] * s,
                self.euler_angles[2] * s,
            ],
            pivot: self.pivot,
        }
    }
}

/// A concrete rotation-then-translation transform for one symmetry replica
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// Translation, in Angstrom
    pub translation: [f64; 3],
    /// Euler angles (radians, XYZ order)
    pub euler_angles: [f64; 3],
    /// Pivot point the rotation is performed about, in Angstrom
    pub pivot: [f64; 3],
}

impl RigidTransform {
    /// Apply the rotation (about `pivot`) then the translation to a point
    pub fn apply(&self, point: [f64; 3]) -> [f64; 3] {
        let centered = [
            point[0] - self.pivot[0],
            point[1] - self.pivot[1],
            point[2] - self.pivot[2],
        ];
        let rotated = rotate_euler_xyz(centered, self.euler_angles);
        [
            rotated[0] + self.pivot[0] + self.translation[0],
            rotated[1] + self.pivot[1] + self.translation[1],
            rotated[2] + self.pivot[2] + self.translation[2],
        ]
    }
}

/// Rotate a point by intrinsic XYZ Euler angles (radians)
fn rotate_euler_xyz(p: [f64; 3], angles: [f64; 3]) -> [f64; 3] {
    let (sx, cx) = angles[0].sin_cos();
    let (sy, cy) = angles[1].sin_cos();
    let (sz, cz) = angles[2].sin_cos();

    // Rx
    let p = [p[0], cx * p[1] - sx * p[2], sx * p[1] + cx * p[2]];
    // Ry
    let p = [cy * p[0] + sy * p[2], p[1], -sy * p[0] + cy * p[2]];
    // Rz
    [cz * p[0] - sz * p[1], sz * p[0] + cz * p[1], p[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rotation_is_identity() {
        let p = [1.0, 2.0, 3.0];
        let r = rotate_euler_xyz(p, [0.0, 0.0, 0.0]);
        assert_eq!(r, p);
    }

    #[test]
    fn replica_transform_scales_translation_by_k() {
        let op = SymmetryOperation::new([1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 3);
        let t2 = op.replica_transform(2);
        assert_eq!(t2.translation, [2.0, 0.0, 0.0]);
        assert_eq!(t2.apply([0.0, 0.0, 0.0]), [2.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn zero_repeat_panics() {
        SymmetryOperation::new([0.0; 3], [0.0; 3], [0.0; 3], 0);
    }
}
