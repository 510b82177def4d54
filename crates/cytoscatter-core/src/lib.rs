//! # Cytoscatter Core
//!
//! The numerical backbone of the cytoscatter framework. This crate predicts
//! the signal a flow-cytometer side-scatter detector produces for a small
//! (possibly multi-layer) spherical particle illuminated by polarized light.
//!
//! ## Architecture
//!
//! Mie scattering amplitudes are supplied by an external collaborator behind
//! the [`amplitudes::AmplitudeProvider`] trait — this crate never computes
//! Mie coefficients itself. Given the complex far-field amplitudes
//! S1(θ), S2(θ), the pipeline is:
//!
//! 1. [`stokes`] reduces S1/S2 to the intensity-basis elements S11/S12.
//! 2. [`geometry`] maps points on the detector aperture disk to the
//!    scattering angle and polarization azimuth they correspond to.
//! 3. [`efficiency`] weights each aperture point by the detector's radial
//!    sensitivity profile.
//! 4. [`response`] combines the three in a double integral over the aperture
//!    to produce the scalar predicted signal.
//!
//! ## Modules
//!
//! - [`types`] — Particle, layer, and detector value objects.
//! - [`amplitudes`] — Scattering-amplitude samples and the provider trait.
//! - [`stokes`] — S1/S2 → S11/S12 reduction.
//! - [`geometry`] — Aperture-disk to scattering-angle mapping.
//! - [`efficiency`] — Radial detector-efficiency profiles.
//! - [`response`] — The detector-response integrator.

pub mod amplitudes;
pub mod efficiency;
pub mod geometry;
pub mod response;
pub mod stokes;
pub mod types;

pub use amplitudes::{AmplitudeProvider, ScatteringAmplitudes};
pub use efficiency::EfficiencyProfile;
pub use geometry::ApertureMap;
pub use response::{response, Quadrature};
pub use stokes::StokesSamples;
pub use types::{Detector, Layer, ModelError, Particle};
