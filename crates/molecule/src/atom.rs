use crate::form_factor::FormFactor;

/// A single atom: a 3-D position, a scattering weight and a form-factor tag
///
/// Positions are in Angstrom. `weight` is the effective electron count (or
/// form-factor amplitude scaling factor) used as the `w` component of the
/// compact coordinate record the pairwise kernel actually consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// Position in Angstrom
    pub position: [f64; 3],
    /// Scattering weight
    pub weight: f64,
    /// Form-factor channel this atom belongs to
    pub form_factor: FormFactor,
}

impl Atom {
    /// Construct a new atom
    pub fn new(position: [f64; 3], weight: f64, form_factor: FormFactor) -> Self {
        Self {
            position,
            weight,
            form_factor,
        }
    }
}

/// A hydration water molecule, represented by its oxygen position
///
/// Waters always carry the [FormFactor::Water] channel; the field is kept
/// implicit here since a [Water] can never be tagged otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Water {
    /// Position in Angstrom
    pub position: [f64; 3],
    /// Scattering weight
    pub weight: f64,
}

impl Water {
    /// Construct a new hydration water
    pub fn new(position: [f64; 3], weight: f64) -> Self {
        Self { position, weight }
    }

    /// View this water as an atom tagged with the water form factor
    pub fn as_atom(&self) -> Atom {
        Atom::new(self.position, self.weight, FormFactor::Water)
    }
}
