//! # Cytoscatter Materials
//!
//! The convenience layer between domain-friendly parameters and the core's
//! value objects: named-material refractive indices ([`refractive`]) and
//! particle factories ([`factory`]) that translate a diameter plus a
//! material name into a valid [`cytoscatter_core::Particle`].

pub mod factory;
pub mod refractive;

use thiserror::Error;

use cytoscatter_core::ModelError;

/// Errors from material lookups and particle factories.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("wavelength {wavelength_nm} nm is outside the supported range [{min}, {max}] nm")]
    OutOfRange {
        wavelength_nm: f64,
        min: f64,
        max: f64,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<MaterialError> for ModelError {
    fn from(err: MaterialError) -> Self {
        match err {
            MaterialError::Model(inner) => inner,
            other => ModelError::InvalidInput(other.to_string()),
        }
    }
}

pub use factory::{bead, polystyrene_bead, silica_bead, vesicle, vesicle_default};
pub use refractive::{polystyrene_index, silica_index, water_index};
