/// Precomputed `sinc(q*d) = sin(x)/x` (1 at `x == 0`) over the outer product
/// of a q-axis and a d-axis
///
/// The Debye transform evaluates this same product for every scattering
/// vector against every distance bin on every recomputation; precomputing it
/// once and indexing into a flat `Vec` is far cheaper than calling `sin` in
/// the hot loop.
#[derive(Debug, Clone)]
pub struct SincTable {
    n_q: usize,
    n_d: usize,
    table: Vec<f64>,
}

impl SincTable {
    /// Build the table for every `(q, d)` pair in `q_values x d_values`
    ///
    /// ```rust
    /// # use saxs_distribution::SincTable;
    /// let table = SincTable::new(&[0.0, 0.1], &[0.0, 5.0]);
    /// assert_eq!(table.get(0, 0), 1.0);
    /// ```
    pub fn new(q_values: &[f64], d_values: &[f64]) -> Self {
        let n_q = q_values.len();
        let n_d = d_values.len();
        let mut table = Vec::with_capacity(n_q * n_d);
        for &q in q_values {
            for &d in d_values {
                table.push(sinc(q * d));
            }
        }
        Self { n_q, n_d, table }
    }

    /// Number of q-axis entries
    pub fn n_q(&self) -> usize {
        self.n_q
    }

    /// Number of d-axis entries
    pub fn n_d(&self) -> usize {
        self.n_d
    }

    /// `sinc(q_values[q_idx] * d_values[d_idx])`
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, q_idx: usize, d_idx: usize) -> f64 {
        self.table[q_idx * self.n_d + d_idx]
    }

    /// The full row of sinc values for a single q, in d-axis order
    pub fn row(&self, q_idx: usize) -> &[f64] {
        let start = q_idx * self.n_d;
        &self.table[start..start + self.n_d]
    }
}

/// `sin(x)/x`, with the removable singularity at `x == 0` filled in as `1.0`
pub fn sinc(x: f64) -> f64 {
    const EPS: f64 = 1e-8;
    if x.abs() < EPS {
        1.0
    } else {
        x.sin() / x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_argument_is_one() {
        assert_eq!(sinc(0.0), 1.0);
    }

    #[test]
    fn table_shape_matches_axes() {
        let q = [0.0, 0.1, 0.2];
        let d = [0.0, 1.0, 2.0, 3.0];
        let t = SincTable::new(&q, &d);
        assert_eq!(t.n_q(), 3);
        assert_eq!(t.n_d(), 4);
        assert_eq!(t.row(1).len(), 4);
    }

    #[test]
    fn matches_direct_computation() {
        let q = [0.3];
        let d = [7.5];
        let t = SincTable::new(&q, &d);
        let expected = (0.3f64 * 7.5).sin() / (0.3 * 7.5);
        assert!((t.get(0, 0) - expected).abs() < 1e-12);
    }
}
