/// Atomic form-factor grouping an atom is tagged with
///
/// The engine does not evaluate per-element form factors directly; atoms are
/// binned into nine heavy-atom groupings plus a water channel and an
/// excluded-volume channel, matching the reduced representation used by the
/// Debye transform (see [FormFactor::CHANNEL_COUNT]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FormFactor {
    /// Aliphatic CH group
    CH = 0,
    /// Aliphatic CH2 group
    CH2 = 1,
    /// Aliphatic CH3 group
    CH3 = 2,
    /// Amide/amine NH group
    NH = 3,
    /// Amine NH2 group
    NH2 = 4,
    /// Amine NH3 group
    NH3 = 5,
    /// Hydroxyl OH group
    OH = 6,
    /// Thiol SH group
    SH = 7,
    /// Bare carbon with no attached hydrogens
    C = 8,
    /// Hydration water oxygen
    Water = 9,
    /// Excluded-volume pseudo-atom
    ExcludedVolume = 10,
}

impl FormFactor {
    /// Total number of form-factor channels, `F` in the spec
    pub const CHANNEL_COUNT: usize = 11;

    /// Number of atomic (non-water, non-excluded-volume) channels
    pub const ATOMIC_CHANNEL_COUNT: usize = 9;

    /// Channel index `f` used to index composite distributions
    pub fn index(self) -> usize {
        self as u8 as usize
    }

    /// Whether this channel is the water channel
    pub fn is_water(self) -> bool {
        matches!(self, Self::Water)
    }

    /// Whether this channel is the excluded-volume channel
    pub fn is_excluded_volume(self) -> bool {
        matches!(self, Self::ExcludedVolume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_indices_are_dense() {
        let all = [
            FormFactor::CH,
            FormFactor::CH2,
            FormFactor::CH3,
            FormFactor::NH,
            FormFactor::NH2,
            FormFactor::NH3,
            FormFactor::OH,
            FormFactor::SH,
            FormFactor::C,
            FormFactor::Water,
            FormFactor::ExcludedVolume,
        ];
        for (i, f) in all.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
        assert_eq!(all.len(), FormFactor::CHANNEL_COUNT);
    }
}
