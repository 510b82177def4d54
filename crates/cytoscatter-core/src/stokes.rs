//! Reduction of complex scattering amplitudes to intensity-basis Stokes
//! elements.
//!
//! $$S_{11}(\theta) = \tfrac{1}{2}\bigl(|S_2|^2 + |S_1|^2\bigr), \qquad
//!   S_{12}(\theta) = \tfrac{1}{2}\bigl(|S_2|^2 - |S_1|^2\bigr)$$
//!
//! S11 is the total scattered intensity; S12 encodes the asymmetry between
//! the two polarization components.

use ndarray::Array1;

use crate::amplitudes::ScatteringAmplitudes;
use crate::types::ModelError;

/// S11/S12 samples aligned with a θ grid.
#[derive(Debug, Clone)]
pub struct StokesSamples {
    theta: Array1<f64>,
    s11: Array1<f64>,
    s12: Array1<f64>,
}

impl StokesSamples {
    /// Reduce amplitude samples to Stokes elements on the same θ grid.
    ///
    /// Length agreement between S1 and S2 is guaranteed by the
    /// [`ScatteringAmplitudes`] constructor, so this cannot fail.
    pub fn from_amplitudes(amplitudes: &ScatteringAmplitudes) -> Self {
        let s1 = amplitudes.s1();
        let s2 = amplitudes.s2();
        let s11 = Array1::from_iter(
            s1.iter()
                .zip(s2.iter())
                .map(|(a1, a2)| 0.5 * (a2.norm_sqr() + a1.norm_sqr())),
        );
        let s12 = Array1::from_iter(
            s1.iter()
                .zip(s2.iter())
                .map(|(a1, a2)| 0.5 * (a2.norm_sqr() - a1.norm_sqr())),
        );
        Self {
            theta: amplitudes.theta().clone(),
            s11,
            s12,
        }
    }

    /// Construct directly from precomputed S11/S12 samples.
    ///
    /// # Errors
    /// [`ModelError::DimensionMismatch`] if array lengths differ;
    /// [`ModelError::InvalidInput`] if the grid is empty or unsorted.
    pub fn new(
        theta: Array1<f64>,
        s11: Array1<f64>,
        s12: Array1<f64>,
    ) -> Result<Self, ModelError> {
        if theta.len() != s11.len() || theta.len() != s12.len() {
            return Err(ModelError::DimensionMismatch {
                theta: theta.len(),
                s1: s11.len(),
                s2: s12.len(),
            });
        }
        if theta.is_empty() {
            return Err(ModelError::InvalidInput(
                "Stokes sample grid is empty".into(),
            ));
        }
        if theta.windows(2).into_iter().any(|w| w[1] < w[0]) {
            return Err(ModelError::InvalidInput(
                "theta grid must be sorted ascending".into(),
            ));
        }
        Ok(Self { theta, s11, s12 })
    }

    /// Scattering angles (radians), sorted ascending.
    pub fn theta(&self) -> &Array1<f64> {
        &self.theta
    }

    /// Total-intensity element S11(θ).
    pub fn s11(&self) -> &Array1<f64> {
        &self.s11
    }

    /// Polarization-asymmetry element S12(θ).
    pub fn s12(&self) -> &Array1<f64> {
        &self.s12
    }

    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }
}
