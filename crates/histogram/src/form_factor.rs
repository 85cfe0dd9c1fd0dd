use saxs_molecule::FormFactor;

/// Five-Gaussian form-factor coefficients, the classic Cromer-Mann style
/// approximation `f(q) = Σ_i a_i·exp(-b_i·(q/4π)²) + c`
struct Coefficients {
    a: [f64; 5],
    b: [f64; 5],
    c: f64,
}

/// `q`-dependent scattering amplitude for one form-factor channel
///
/// ```rust
/// # use saxs_molecule::FormFactor;
/// # use saxs_histogram::form_factor;
/// // every channel's amplitude decays towards its electron count's
/// // "c" baseline as q grows
/// let low = form_factor(1e-4, FormFactor::C);
/// let high = form_factor(1.0, FormFactor::C);
/// assert!(high < low);
/// ```
pub fn form_factor(q: f64, channel: FormFactor) -> f64 {
    let coeffs = coefficients(channel);
    let s = q / (4.0 * std::f64::consts::PI);
    let s2 = s * s;
    coeffs.a.iter().zip(&coeffs.b).map(|(a, b)| a * (-b * s2).exp()).sum::<f64>() + coeffs.c
}

fn coefficients(channel: FormFactor) -> Coefficients {
    match channel {
        FormFactor::CH => Coefficients { a: [2.31, 1.02, 1.59, 0.87, 0.0], b: [20.84, 10.21, 0.57, 51.65, 0.0], c: 0.22 },
        FormFactor::CH2 => Coefficients { a: [2.31, 1.02, 1.59, 1.87, 0.0], b: [20.84, 10.21, 0.57, 51.65, 0.0], c: 0.22 },
        FormFactor::CH3 => Coefficients { a: [2.31, 1.02, 1.59, 2.87, 0.0], b: [20.84, 10.21, 0.57, 51.65, 0.0], c: 0.22 },
        FormFactor::NH => Coefficients { a: [12.21, 3.13, 2.01, 1.17, 0.0], b: [0.006, 9.89, 28.99, 0.58, 0.0], c: -11.53 },
        FormFactor::NH2 => Coefficients { a: [12.21, 3.13, 2.01, 2.17, 0.0], b: [0.006, 9.89, 28.99, 0.58, 0.0], c: -11.53 },
        FormFactor::NH3 => Coefficients { a: [12.21, 3.13, 2.01, 3.17, 0.0], b: [0.006, 9.89, 28.99, 0.58, 0.0], c: -11.53 },
        FormFactor::OH => Coefficients { a: [3.05, 2.29, 1.55, 1.87, 0.0], b: [13.28, 5.70, 0.32, 32.91, 0.0], c: 0.25 },
        FormFactor::SH => Coefficients { a: [6.91, 5.20, 1.44, 1.59, 0.0], b: [1.47, 22.22, 0.25, 56.17, 0.0], c: 0.87 },
        FormFactor::C => Coefficients { a: [2.31, 1.02, 1.59, 0.87, 0.0], b: [20.84, 10.21, 0.57, 51.65, 0.0], c: 0.22 },
        FormFactor::Water => Coefficients { a: [2.96, 2.51, 0.85, 1.63, 0.0], b: [14.18, 5.22, 0.32, 43.40, 0.0], c: 0.17 },
        FormFactor::ExcludedVolume => Coefficients { a: [2.96, 2.51, 0.85, 1.63, 0.0], b: [14.18, 5.22, 0.32, 43.40, 0.0], c: 0.17 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_and_excluded_volume_share_electron_density() {
        assert_eq!(form_factor(0.1, FormFactor::Water), form_factor(0.1, FormFactor::ExcludedVolume));
    }

    #[test]
    fn amplitude_decreases_with_q() {
        for channel in [FormFactor::CH, FormFactor::NH3, FormFactor::SH, FormFactor::C] {
            assert!(form_factor(1e-4, channel) > form_factor(0.5, channel));
        }
    }
}
