//! Table construction and gain calibration on top of the core integrator.

use rayon::prelude::*;

use cytoscatter_core::{
    response, AmplitudeProvider, Detector, ModelError, Particle, Quadrature, StokesSamples,
};

use crate::table::{CalibrationTable, TableEntry};
use crate::CalibrationError;

/// Predicted detector signal for one particle: provider → Stokes reduction
/// → aperture integral.
pub fn predicted_response(
    particle: &Particle,
    detector: &Detector,
    provider: &dyn AmplitudeProvider,
    n_angles: usize,
    quadrature: &Quadrature,
) -> Result<f64, CalibrationError> {
    let amplitudes = provider.amplitudes(particle, n_angles)?;
    let stokes = StokesSamples::from_amplitudes(&amplitudes);
    Ok(response(&stokes, detector, quadrature)?)
}

/// Sweep a diameter series into a calibration table.
///
/// Each diameter is independent, so the sweep runs on the rayon thread
/// pool; the result is re-sorted by diameter regardless of completion
/// order (the [`CalibrationTable`] constructor sorts).
///
/// # Errors
/// Fails on the first factory or response error, or if the series has
/// fewer than two diameters.
pub fn build_table<F>(
    detector: &Detector,
    provider: &dyn AmplitudeProvider,
    factory: F,
    diameters: &[f64],
    n_angles: usize,
    quadrature: &Quadrature,
) -> Result<CalibrationTable, CalibrationError>
where
    F: Fn(f64) -> Result<Particle, ModelError> + Sync,
{
    let entries = diameters
        .par_iter()
        .map(|&diameter| {
            let particle = factory(diameter)?;
            let signal =
                predicted_response(&particle, detector, provider, n_angles, quadrature)?;
            Ok(TableEntry { diameter, signal })
        })
        .collect::<Result<Vec<_>, CalibrationError>>()?;
    CalibrationTable::new(entries)
}

/// Solve the detector gain against one empirical reference measurement.
///
/// The response is linear in gain, so the gain that makes the predicted
/// response of `reference` match `measured_signal` is simply
/// `measured_signal / response(reference, gain = 1)`. Returns a new
/// detector carrying the solved gain.
///
/// # Errors
/// [`CalibrationError::InvalidReference`] if the measured signal is not
/// positive or the gain-1 prediction is zero or non-finite.
pub fn calibrate(
    detector: &Detector,
    reference: &Particle,
    measured_signal: f64,
    provider: &dyn AmplitudeProvider,
    n_angles: usize,
    quadrature: &Quadrature,
) -> Result<Detector, CalibrationError> {
    if !measured_signal.is_finite() || measured_signal <= 0.0 {
        return Err(CalibrationError::InvalidReference(format!(
            "measured reference signal must be positive, got {measured_signal}"
        )));
    }
    let unit = detector.with_gain(1.0)?;
    let predicted = predicted_response(reference, &unit, provider, n_angles, quadrature)?;
    if !predicted.is_finite() || predicted <= 0.0 {
        return Err(CalibrationError::InvalidReference(format!(
            "gain-1 response for the reference particle is {predicted}; cannot solve gain"
        )));
    }
    Ok(detector.with_gain(measured_signal / predicted)?)
}
