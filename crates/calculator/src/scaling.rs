use saxs_distribution::Distribution1D;

/// Largest supported integer scaling factor
///
/// Covers the largest symmetry multiplicity (`replica_count`) the
/// symmetry-expanded self-correlation jobs are expected to produce; anything
/// larger falls back to an explicit loop rather than extending the
/// compile-time-specialized dispatch table.
pub const MAX_SCALING: u32 = 30;

/// Add `weight * S` into `dist` at `bin`
///
/// `S` is a compile-time constant so the multiply folds into a single `fmul`
/// (or, for small `S`, a shift/add chain) at every one of the call sites
/// [dispatch_scaled] generates, rather than a runtime integer-to-float
/// conversion on every pair evaluated.
#[inline(always)]
fn accumulate_scaled<const S: u32>(dist: &mut Distribution1D, bin: usize, weight: f64) {
    dist.add(bin, weight * S as f64);
}

/// Dispatch to the [accumulate_scaled] specialization matching `scaling`
///
/// # Panics
/// Panics if `scaling` is outside `1..=MAX_SCALING`; callers must validate
/// with [crate::Error::ScalingOutOfRange] before reaching this point.
#[inline]
pub(crate) fn dispatch_scaled(scaling: u32, dist: &mut Distribution1D, bin: usize, weight: f64) {
    match scaling {
        1 => accumulate_scaled::<1>(dist, bin, weight),
        2 => accumulate_scaled::<2>(dist, bin, weight),
        3 => accumulate_scaled::<3>(dist, bin, weight),
        4 => accumulate_scaled::<4>(dist, bin, weight),
        5 => accumulate_scaled::<5>(dist, bin, weight),
        6 => accumulate_scaled::<6>(dist, bin, weight),
        7 => accumulate_scaled::<7>(dist, bin, weight),
        8 => accumulate_scaled::<8>(dist, bin, weight),
        9 => accumulate_scaled::<9>(dist, bin, weight),
        10 => accumulate_scaled::<10>(dist, bin, weight),
        11 => accumulate_scaled::<11>(dist, bin, weight),
        12 => accumulate_scaled::<12>(dist, bin, weight),
        13 => accumulate_scaled::<13>(dist, bin, weight),
        14 => accumulate_scaled::<14>(dist, bin, weight),
        15 => accumulate_scaled::<15>(dist, bin, weight),
        16 => accumulate_scaled::<16>(dist, bin, weight),
        17 => accumulate_scaled::<17>(dist, bin, weight),
        18 => accumulate_scaled::<18>(dist, bin, weight),
        19 => accumulate_scaled::<19>(dist, bin, weight),
        20 => accumulate_scaled::<20>(dist, bin, weight),
        21 => accumulate_scaled::<21>(dist, bin, weight),
        22 => accumulate_scaled::<22>(dist, bin, weight),
        23 => accumulate_scaled::<23>(dist, bin, weight),
        24 => accumulate_scaled::<24>(dist, bin, weight),
        25 => accumulate_scaled::<25>(dist, bin, weight),
        26 => accumulate_scaled::<26>(dist, bin, weight),
        27 => accumulate_scaled::<27>(dist, bin, weight),
        28 => accumulate_scaled::<28>(dist, bin, weight),
        29 => accumulate_scaled::<29>(dist, bin, weight),
        30 => accumulate_scaled::<30>(dist, bin, weight),
        other => unreachable!("scaling {other} should have been validated before dispatch"),
    }
}

/// Add `weight * S` into `dist` at `bin`, folding `distance` into the bin's
/// running mean via [Distribution1D::add_weighted]
#[inline(always)]
fn accumulate_scaled_weighted<const S: u32>(dist: &mut Distribution1D, bin: usize, weight: f64, distance: f64) {
    dist.add_weighted(bin, weight * S as f64, distance);
}

/// Weighted-bin counterpart of [dispatch_scaled], used on the full-evaluator
/// path once a bin count it routes to also needs the raw distance
///
/// # Panics
/// Panics if `scaling` is outside `1..=MAX_SCALING`; callers must validate
/// with [crate::Error::ScalingOutOfRange] before reaching this point.
#[inline]
pub(crate) fn dispatch_scaled_weighted(
    scaling: u32,
    dist: &mut Distribution1D,
    bin: usize,
    weight: f64,
    distance: f64,
) {
    match scaling {
        1 => accumulate_scaled_weighted::<1>(dist, bin, weight, distance),
        2 => accumulate_scaled_weighted::<2>(dist, bin, weight, distance),
        3 => accumulate_scaled_weighted::<3>(dist, bin, weight, distance),
        4 => accumulate_scaled_weighted::<4>(dist, bin, weight, distance),
        5 => accumulate_scaled_weighted::<5>(dist, bin, weight, distance),
        6 => accumulate_scaled_weighted::<6>(dist, bin, weight, distance),
        7 => accumulate_scaled_weighted::<7>(dist, bin, weight, distance),
        8 => accumulate_scaled_weighted::<8>(dist, bin, weight, distance),
        9 => accumulate_scaled_weighted::<9>(dist, bin, weight, distance),
        10 => accumulate_scaled_weighted::<10>(dist, bin, weight, distance),
        11 => accumulate_scaled_weighted::<11>(dist, bin, weight, distance),
        12 => accumulate_scaled_weighted::<12>(dist, bin, weight, distance),
        13 => accumulate_scaled_weighted::<13>(dist, bin, weight, distance),
        14 => accumulate_scaled_weighted::<14>(dist, bin, weight, distance),
        15 => accumulate_scaled_weighted::<15>(dist, bin, weight, distance),
        16 => accumulate_scaled_weighted::<16>(dist, bin, weight, distance),
        17 => accumulate_scaled_weighted::<17>(dist, bin, weight, distance),
        18 => accumulate_scaled_weighted::<18>(dist, bin, weight, distance),
        19 => accumulate_scaled_weighted::<19>(dist, bin, weight, distance),
        20 => accumulate_scaled_weighted::<20>(dist, bin, weight, distance),
        21 => accumulate_scaled_weighted::<21>(dist, bin, weight, distance),
        22 => accumulate_scaled_weighted::<22>(dist, bin, weight, distance),
        23 => accumulate_scaled_weighted::<23>(dist, bin, weight, distance),
        24 => accumulate_scaled_weighted::<24>(dist, bin, weight, distance),
        25 => accumulate_scaled_weighted::<25>(dist, bin, weight, distance),
        26 => accumulate_scaled_weighted::<26>(dist, bin, weight, distance),
        27 => accumulate_scaled_weighted::<27>(dist, bin, weight, distance),
        28 => accumulate_scaled_weighted::<28>(dist, bin, weight, distance),
        29 => accumulate_scaled_weighted::<29>(dist, bin, weight, distance),
        30 => accumulate_scaled_weighted::<30>(dist, bin, weight, distance),
        other => unreachable!("scaling {other} should have been validated before dispatch"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_plain_multiply() {
        let mut dist = Distribution1D::new(0.1, 4);
        dispatch_scaled(7, &mut dist, 2, 1.5);
        assert_eq!(dist.counts()[2], 10.5);
    }

    #[test]
    fn dispatch_weighted_folds_distance_into_mean() {
        let mut dist = Distribution1D::weighted(0.1, 4);
        dispatch_scaled_weighted(2, &mut dist, 2, 1.0, 0.25);
        assert_eq!(dist.counts()[2], 2.0);
        assert_eq!(dist.mean(2), Some(0.25));
    }
}
