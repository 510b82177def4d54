//! # Cytoscatter Calibrate
//!
//! Builds and inverts the diameter ↔ signal lookup table (the "Mie
//! transform") on top of the core detector-response integrator.
//!
//! The workflow mirrors how side-scatter calibration is done on an
//! instrument:
//!
//! 1. [`sweep::build_table`] sweeps a diameter series through the
//!    integrator (rayon-parallel, one evaluation per diameter) to produce a
//!    [`table::CalibrationTable`].
//! 2. [`sweep::calibrate`] solves the detector gain so the predicted
//!    response of a known reference bead matches its empirically measured
//!    signal.
//! 3. [`table::CalibrationTable::invert`] maps observed signals back to
//!    diameters by linear interpolation, refusing ambiguous (Mie-resonance
//!    folded) regions outright.

pub mod sweep;
pub mod table;

use thiserror::Error;

use cytoscatter_core::ModelError;

/// Errors from table construction, calibration, and inversion.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("invalid calibration table: {0}")]
    InvalidTable(String),

    #[error(
        "signal {signal} maps to {} candidate diameters {candidates:?}; \
         the table is not monotone over this region",
        candidates.len()
    )]
    AmbiguousInversion { signal: f64, candidates: Vec<f64> },

    #[error("signal {signal} lies outside the calibrated range [{min}, {max}]")]
    OutOfRange { signal: f64, min: f64, max: f64 },

    #[error("invalid calibration reference: {0}")]
    InvalidReference(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub use sweep::{build_table, calibrate, predicted_response};
pub use table::{CalibrationTable, MieTransform, TableEntry};
