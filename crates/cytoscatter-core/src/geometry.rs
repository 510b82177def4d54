//! Aperture-disk geometry: where on the scattering sphere does each point
//! of the detector aperture look?
//!
//! The circular aperture is parametrized as a unit disk (r ∈ [0, 1],
//! φ ∈ [0, 2π)). Since the aperture edge subtends the acceptance half-angle
//! α from the particle, the particle sits at a normalized standoff distance
//! $l = 1/\tan\alpha$ behind the disk. A photon reaching the point (r, φ)
//! must then have scattered at
//!
//! $$\theta(r, \varphi) = \theta_0 + \arctan\!\frac{r\cos\varphi}{l}$$
//!
//! with an azimuth-rotated polarization angle
//! $\psi(r, \varphi) = \psi_0 - \arctan(r\sin\varphi / l)$ and a local
//! off-axis angle $\alpha'(r) = \operatorname{atan2}(r, l)$ used by the
//! radial efficiency profile.

use crate::types::Detector;

/// Precomputed mapping from aperture-disk coordinates to scattering angles.
///
/// Degree inputs on the [`Detector`] are converted to radians once here;
/// every angle this type returns is in radians.
#[derive(Debug, Clone, Copy)]
pub struct ApertureMap {
    theta0: f64,
    psi0: f64,
    standoff: f64,
}

impl ApertureMap {
    pub fn new(detector: &Detector) -> Self {
        let alpha = detector.half_angle_deg().to_radians();
        Self {
            theta0: detector.theta_deg().to_radians(),
            psi0: detector.pol_angle_deg().to_radians(),
            standoff: 1.0 / alpha.tan(),
        }
    }

    /// Physical scattering angle θ(r, φ).
    pub fn scattering_angle(&self, r: f64, phi: f64) -> f64 {
        self.theta0 + (r * phi.cos() / self.standoff).atan()
    }

    /// Polarization angle ψ(r, φ) of the incident light as seen from the
    /// scattering plane through (r, φ).
    pub fn polarization_angle(&self, r: f64, phi: f64) -> f64 {
        self.psi0 - (r * phi.sin() / self.standoff).atan()
    }

    /// Local angle α′(r) from the detector axis, fed to the efficiency
    /// profile. Ranges from 0 at the disk centre to α at the rim.
    pub fn radial_angle(&self, r: f64) -> f64 {
        r.atan2(self.standoff)
    }
}
