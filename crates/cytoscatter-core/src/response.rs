//! The detector-response integrator.
//!
//! Integrates the polarization-weighted scattered intensity over the finite
//! detector aperture:
//!
//! $$I = \frac{G}{\pi} \int_0^1 \!\!\int_0^{2\pi}
//!   \eta(\alpha'(r))\,\bigl[S_{11}(\theta) +
//!   S_{12}(\theta)\,p\,\cos 2\psi\bigr]\, r \,d\varphi\, dr$$
//!
//! evaluated as a plain double Riemann sum over the unit-disk
//! parametrization of the aperture, normalized by the nominal aperture area
//! A = π so the response is dimensionless per unit incident intensity.
//!
//! Two behaviours are load-bearing for reproducibility and must not be
//! "improved" silently:
//!
//! - S11/S12 are read at the **nearest** θ-grid sample, never interpolated.
//!   A coarser amplitude grid therefore directly limits integration
//!   accuracy.
//! - The summation order is fixed: ascending r outer, ascending φ inner.

use std::f64::consts::PI;

use crate::geometry::ApertureMap;
use crate::stokes::StokesSamples;
use crate::types::{Detector, ModelError};

/// Step sizes for the aperture double sum.
///
/// `dr` is the radial step on the unit disk; `dphi_deg` the azimuthal step
/// in degrees. Smaller steps trade speed for accuracy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub dr: f64,
    pub dphi_deg: f64,
}

impl Default for Quadrature {
    fn default() -> Self {
        Self {
            dr: 0.02,
            dphi_deg: 10.0,
        }
    }
}

impl Quadrature {
    fn validate(&self) -> Result<(), ModelError> {
        if !self.dr.is_finite() || self.dr <= 0.0 || self.dr > 1.0 {
            return Err(ModelError::InvalidInput(format!(
                "radial step dr must lie in (0, 1], got {}",
                self.dr
            )));
        }
        if !self.dphi_deg.is_finite() || self.dphi_deg <= 0.0 || self.dphi_deg > 360.0 {
            return Err(ModelError::InvalidInput(format!(
                "azimuthal step dphi must lie in (0, 360] degrees, got {}",
                self.dphi_deg
            )));
        }
        Ok(())
    }
}

/// Predicted scalar detector signal for the given Stokes samples.
///
/// Pure and stateless: identical inputs give bit-identical output, and
/// nothing is cached between calls.
///
/// # Errors
/// [`ModelError::InvalidInput`] if the quadrature steps are out of range.
/// (Detector and sample invariants are enforced at construction of those
/// values.)
pub fn response(
    stokes: &StokesSamples,
    detector: &Detector,
    quadrature: &Quadrature,
) -> Result<f64, ModelError> {
    quadrature.validate()?;

    let map = ApertureMap::new(detector);
    let alpha = detector.half_angle_deg().to_radians();
    let pol = detector.pol();
    let profile = detector.efficiency();

    let dr = quadrature.dr;
    let dphi = quadrature.dphi_deg.to_radians();
    let n_r = (1.0 / dr).round() as usize;
    let n_phi = (360.0 / quadrature.dphi_deg).round() as usize;

    let mut sum = 0.0;
    for i in 0..=n_r {
        let r = i as f64 * dr;
        let weight = profile.weight(map.radial_angle(r), alpha);
        for j in 0..n_phi {
            let phi = j as f64 * dphi;
            let theta = map.scattering_angle(r, phi);
            let psi = map.polarization_angle(r, phi);
            let k = nearest_index(stokes.theta(), theta);
            let intensity = stokes.s11()[k] + stokes.s12()[k] * pol * (2.0 * psi).cos();
            sum += weight * intensity * r * dr * dphi;
        }
    }

    Ok(sum / PI * detector.gain())
}

/// Index of the grid sample nearest to `x`; distance ties resolve to the
/// first occurrence (lower index). The grid is sorted ascending.
fn nearest_index(grid: &ndarray::Array1<f64>, x: f64) -> usize {
    let n = grid.len();
    // Binary search for the first sample >= x.
    let mut lo = 0usize;
    let mut hi = n;
    while lo < hi {
        let mid = (lo + hi) / 2;
        if grid[mid] < x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == 0 {
        return 0;
    }
    if lo == n {
        return n - 1;
    }
    if x - grid[lo - 1] <= grid[lo] - x {
        lo - 1
    } else {
        lo
    }
}
