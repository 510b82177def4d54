//! Scattering-amplitude samples and the external provider boundary.
//!
//! Computing Mie coefficients for a layered sphere is deliberately outside
//! this crate: an [`AmplitudeProvider`] is an external collaborator that,
//! given a [`Particle`], returns the complex far-field amplitudes
//! S1(θ), S2(θ) sampled on an angular grid. This crate only consumes those
//! arrays. Tests use synthetic providers; the CLI reads dumps produced by
//! an external Mie tool.

use ndarray::Array1;
use num_complex::Complex64;

use crate::types::{ModelError, Particle};

/// Complex far-field scattering amplitudes sampled over a θ grid.
///
/// The grid is in radians, sorted ascending, uniformly or near-uniformly
/// spaced. S1 is the amplitude for polarization perpendicular to the
/// scattering plane, S2 for parallel.
#[derive(Debug, Clone)]
pub struct ScatteringAmplitudes {
    theta: Array1<f64>,
    s1: Array1<Complex64>,
    s2: Array1<Complex64>,
}

impl ScatteringAmplitudes {
    /// Construct a sample set, validating grid shape and ordering.
    ///
    /// # Errors
    /// [`ModelError::DimensionMismatch`] if the three arrays differ in
    /// length; [`ModelError::InvalidInput`] if the grid is empty or θ is
    /// not sorted ascending.
    pub fn new(
        theta: Array1<f64>,
        s1: Array1<Complex64>,
        s2: Array1<Complex64>,
    ) -> Result<Self, ModelError> {
        if theta.len() != s1.len() || theta.len() != s2.len() {
            return Err(ModelError::DimensionMismatch {
                theta: theta.len(),
                s1: s1.len(),
                s2: s2.len(),
            });
        }
        if theta.is_empty() {
            return Err(ModelError::InvalidInput(
                "amplitude sample grid is empty".into(),
            ));
        }
        if theta.windows(2).into_iter().any(|w| w[1] < w[0]) {
            return Err(ModelError::InvalidInput(
                "theta grid must be sorted ascending".into(),
            ));
        }
        Ok(Self { theta, s1, s2 })
    }

    /// Scattering angles (radians), sorted ascending.
    pub fn theta(&self) -> &Array1<f64> {
        &self.theta
    }

    /// S1(θ): amplitude perpendicular to the scattering plane.
    pub fn s1(&self) -> &Array1<Complex64> {
        &self.s1
    }

    /// S2(θ): amplitude parallel to the scattering plane.
    pub fn s2(&self) -> &Array1<Complex64> {
        &self.s2
    }

    /// Number of angular samples.
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }
}

/// External source of Mie scattering amplitudes.
///
/// Implementations are expected to be pure: the same particle and
/// resolution always yield the same samples, and nothing is cached here.
/// `n_angles` is the requested number of angular steps over the full
/// 0–360° span; providers backed by fixed precomputed grids may ignore it.
pub trait AmplitudeProvider: Send + Sync {
    fn amplitudes(
        &self,
        particle: &Particle,
        n_angles: usize,
    ) -> Result<ScatteringAmplitudes, ModelError>;
}
