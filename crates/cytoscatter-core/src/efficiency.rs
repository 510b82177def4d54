//! Radial detector-efficiency profiles.
//!
//! Real side-scatter detectors are not uniformly sensitive across their
//! aperture: collection efficiency typically falls off towards the rim.
//! Each profile is a pure function of the local angle α′ from the detector
//! axis and the acceptance half-angle α, returning a relative weight.
//!
//! The Van der Pol profile
//! $\eta(\alpha') = \sin\!\bigl(\tfrac{\pi}{2}(\alpha'/\alpha + 1)\bigr)$
//! is 1 on the axis and 0 at the rim; the modified variant compresses the
//! sinusoid phase so the rim efficiency equals a configurable floor
//! `eta_fac` instead of 0.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::types::ModelError;

/// Relative detector sensitivity as a function of radial position in the
/// aperture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EfficiencyProfile {
    /// Uniform sensitivity: weight 1 everywhere.
    Uniform,
    /// Sinusoidal fall-off from 1 on the axis to 0 at the rim.
    VanDerPol,
    /// Sinusoidal fall-off from 1 on the axis to `eta_fac` at the rim.
    ModifiedVanDerPol {
        /// Rim efficiency, in [0, 1].
        eta_fac: f64,
    },
}

impl EfficiencyProfile {
    /// Check the profile's parameter, if it has one.
    ///
    /// # Errors
    /// [`ModelError::InvalidInput`] if `eta_fac` lies outside [0, 1].
    pub fn validate(&self) -> Result<(), ModelError> {
        match *self {
            EfficiencyProfile::Uniform | EfficiencyProfile::VanDerPol => Ok(()),
            EfficiencyProfile::ModifiedVanDerPol { eta_fac } => {
                if (0.0..=1.0).contains(&eta_fac) {
                    Ok(())
                } else {
                    Err(ModelError::InvalidInput(format!(
                        "eta_fac must lie in [0, 1], got {eta_fac}"
                    )))
                }
            }
        }
    }

    /// Relative weight at local angle `alpha_prime` from the detector axis,
    /// for a detector with acceptance half-angle `alpha` (both in radians).
    ///
    /// Defined for the whole aperture including α′ = 0 and α′ = α.
    pub fn weight(&self, alpha_prime: f64, alpha: f64) -> f64 {
        match *self {
            EfficiencyProfile::Uniform => 1.0,
            EfficiencyProfile::VanDerPol => (FRAC_PI_2 * (alpha_prime / alpha + 1.0)).sin(),
            EfficiencyProfile::ModifiedVanDerPol { eta_fac } => {
                // Compress the phase so the rim lands on eta_fac: at
                // α′ = α the argument is π/2·(fac2 + 1) = acos(eta_fac) + π/2,
                // whose sine is cos(acos(eta_fac)) = eta_fac.
                let fac2 = 2.0 * eta_fac.acos() / std::f64::consts::PI;
                (FRAC_PI_2 * (fac2 * alpha_prime / alpha + 1.0)).sin()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_is_one_everywhere() {
        let profile = EfficiencyProfile::Uniform;
        for alpha_prime in [0.0, 0.3, 0.7, 1.0] {
            assert_eq!(profile.weight(alpha_prime, 1.0), 1.0);
        }
    }

    #[test]
    fn test_van_der_pol_endpoints() {
        let profile = EfficiencyProfile::VanDerPol;
        for alpha in [0.1, 0.5, 1.0] {
            assert_relative_eq!(profile.weight(0.0, alpha), 1.0);
            assert_relative_eq!(profile.weight(alpha, alpha), 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_modified_van_der_pol_rim_equals_eta_fac() {
        for eta_fac in [0.0, 0.25, 0.5, 0.9, 1.0] {
            let profile = EfficiencyProfile::ModifiedVanDerPol { eta_fac };
            assert_relative_eq!(profile.weight(0.0, 0.8), 1.0);
            assert_relative_eq!(profile.weight(0.8, 0.8), eta_fac, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_modified_van_der_pol_parameter_validation() {
        assert!(EfficiencyProfile::ModifiedVanDerPol { eta_fac: 0.5 }
            .validate()
            .is_ok());
        assert!(EfficiencyProfile::ModifiedVanDerPol { eta_fac: 1.1 }
            .validate()
            .is_err());
        assert!(EfficiencyProfile::ModifiedVanDerPol { eta_fac: -0.1 }
            .validate()
            .is_err());
    }
}
