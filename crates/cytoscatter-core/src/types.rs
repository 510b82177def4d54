//! Core value objects shared across the cytoscatter framework.
//!
//! [`Particle`] and [`Detector`] are immutable once constructed: every
//! invariant is checked at construction time, so downstream numerics can
//! assume valid inputs and callsites never re-validate. A detector is
//! "recalibrated" by producing a new instance via [`Detector::with_gain`],
//! never by mutation.

use num_complex::Complex64;
use thiserror::Error;

use crate::efficiency::EfficiencyProfile;

/// Errors from constructing or consuming core value objects.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("amplitude arrays have mismatched lengths (theta: {theta}, S1: {s1}, S2: {s2})")]
    DimensionMismatch { theta: usize, s1: usize, s2: usize },
}

/// A single concentric layer of a spherical particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Outer radius of this layer, in the same units as the wavelength.
    pub radius: f64,
    /// Complex refractive index of the layer material.
    pub index: Complex64,
}

impl Layer {
    pub fn new(radius: f64, index: Complex64) -> Self {
        Self { radius, index }
    }
}

/// A layered spherical particle in a homogeneous ambient medium.
///
/// Layers are ordered innermost to outermost with strictly increasing radii.
/// A homogeneous bead is the single-layer case; an extracellular vesicle is
/// typically modelled as two layers (lumen + membrane shell).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    medium_index: f64,
    wavelength: f64,
    layers: Vec<Layer>,
}

impl Particle {
    /// Construct a particle, validating all invariants.
    ///
    /// # Errors
    /// [`ModelError::InvalidInput`] if the medium index or wavelength is not
    /// a positive finite number, if no layers are given, if any radius is
    /// not positive, or if radii are not strictly increasing.
    pub fn new(
        medium_index: f64,
        wavelength: f64,
        layers: Vec<Layer>,
    ) -> Result<Self, ModelError> {
        if !medium_index.is_finite() || medium_index <= 0.0 {
            return Err(ModelError::InvalidInput(format!(
                "medium refractive index must be positive, got {medium_index}"
            )));
        }
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(ModelError::InvalidInput(format!(
                "wavelength must be positive, got {wavelength}"
            )));
        }
        if layers.is_empty() {
            return Err(ModelError::InvalidInput(
                "particle needs at least one layer".into(),
            ));
        }
        let mut prev = 0.0;
        for (i, layer) in layers.iter().enumerate() {
            if !layer.radius.is_finite() || layer.radius <= prev {
                return Err(ModelError::InvalidInput(format!(
                    "layer radii must be positive and strictly increasing \
                     (layer {i} has radius {}, previous {prev})",
                    layer.radius
                )));
            }
            prev = layer.radius;
        }
        Ok(Self {
            medium_index,
            wavelength,
            layers,
        })
    }

    /// Refractive index of the ambient medium (real).
    pub fn medium_index(&self) -> f64 {
        self.medium_index
    }

    /// Incident wavelength, in the same units as the layer radii.
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Layers ordered innermost to outermost.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Radius of the outermost layer.
    pub fn outer_radius(&self) -> f64 {
        self.layers[self.layers.len() - 1].radius
    }

    /// Overall particle diameter (2 × outermost radius).
    pub fn diameter(&self) -> f64 {
        2.0 * self.outer_radius()
    }
}

/// A side-scatter detector with a finite circular aperture.
///
/// Angles are stored in degrees as given; the integrator converts to
/// radians once at entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Detector {
    theta_deg: f64,
    half_angle_deg: f64,
    pol_angle_deg: f64,
    pol: f64,
    gain: f64,
    efficiency: EfficiencyProfile,
}

impl Detector {
    /// Construct a detector with unit gain, validating all invariants.
    ///
    /// # Arguments
    /// * `theta_deg` - Nominal scattering angle θ₀ of the detector centroid
    ///   relative to the incident beam (degrees, typically 90).
    /// * `half_angle_deg` - Acceptance half-angle α subtended by the
    ///   aperture edge (degrees, strictly between 0 and 90).
    /// * `pol_angle_deg` - Incident polarization angle ψ₀ (degrees;
    ///   0 = in the plane of incidence, 90 = perpendicular).
    /// * `pol` - Degree of linear polarization, in [0, 1].
    /// * `efficiency` - Radial efficiency profile across the aperture.
    ///
    /// # Errors
    /// [`ModelError::InvalidInput`] if α is outside (0, 90), `pol` is
    /// outside [0, 1], or the efficiency profile's parameter is invalid.
    pub fn new(
        theta_deg: f64,
        half_angle_deg: f64,
        pol_angle_deg: f64,
        pol: f64,
        efficiency: EfficiencyProfile,
    ) -> Result<Self, ModelError> {
        if !theta_deg.is_finite() || !pol_angle_deg.is_finite() {
            return Err(ModelError::InvalidInput(
                "detector angles must be finite".into(),
            ));
        }
        if !half_angle_deg.is_finite() || half_angle_deg <= 0.0 || half_angle_deg >= 90.0 {
            return Err(ModelError::InvalidInput(format!(
                "acceptance half-angle must lie in (0, 90) degrees, got {half_angle_deg}"
            )));
        }
        if !(0.0..=1.0).contains(&pol) {
            return Err(ModelError::InvalidInput(format!(
                "degree of polarization must lie in [0, 1], got {pol}"
            )));
        }
        efficiency.validate()?;
        Ok(Self {
            theta_deg,
            half_angle_deg,
            pol_angle_deg,
            pol,
            gain: 1.0,
            efficiency,
        })
    }

    /// A copy of this detector carrying a different relative gain.
    ///
    /// # Errors
    /// [`ModelError::InvalidInput`] if the gain is not a positive finite
    /// number.
    pub fn with_gain(&self, gain: f64) -> Result<Self, ModelError> {
        if !gain.is_finite() || gain <= 0.0 {
            return Err(ModelError::InvalidInput(format!(
                "detector gain must be positive, got {gain}"
            )));
        }
        let mut detector = self.clone();
        detector.gain = gain;
        Ok(detector)
    }

    /// Nominal scattering angle θ₀ (degrees).
    pub fn theta_deg(&self) -> f64 {
        self.theta_deg
    }

    /// Acceptance half-angle α (degrees).
    pub fn half_angle_deg(&self) -> f64 {
        self.half_angle_deg
    }

    /// Incident polarization angle ψ₀ (degrees).
    pub fn pol_angle_deg(&self) -> f64 {
        self.pol_angle_deg
    }

    /// Degree of linear polarization, in [0, 1].
    pub fn pol(&self) -> f64 {
        self.pol
    }

    /// Relative gain applied to the integrated response.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Radial efficiency profile across the aperture.
    pub fn efficiency(&self) -> &EfficiencyProfile {
        &self.efficiency
    }
}
