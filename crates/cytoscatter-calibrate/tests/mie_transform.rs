//! Integration tests for table building, gain calibration, and inversion.
//!
//! The amplitude provider is a synthetic stub whose S11 grows strictly
//! monotonically with diameter (S1 = S2 ∝ d, flat over θ), so every table
//! it produces is monotone by construction and round-trips exactly.

use approx::assert_relative_eq;
use ndarray::Array1;
use num_complex::Complex64;

use cytoscatter_calibrate::{
    build_table, calibrate, predicted_response, CalibrationError, MieTransform,
};
use cytoscatter_core::{
    AmplitudeProvider, Detector, EfficiencyProfile, Layer, ModelError, Particle, Quadrature,
    ScatteringAmplitudes,
};

/// Flat-in-θ amplitudes proportional to the particle diameter.
struct DiameterStub;

impl AmplitudeProvider for DiameterStub {
    fn amplitudes(
        &self,
        particle: &Particle,
        n_angles: usize,
    ) -> Result<ScatteringAmplitudes, ModelError> {
        let theta = Array1::linspace(0.0, 2.0 * std::f64::consts::PI, n_angles);
        let s = Complex64::new(particle.diameter() / 100.0, 0.0);
        ScatteringAmplitudes::new(
            theta,
            Array1::from_elem(n_angles, s),
            Array1::from_elem(n_angles, s),
        )
    }
}

fn polystyrene_like(diameter: f64) -> Result<Particle, ModelError> {
    Particle::new(
        1.33,
        405.0,
        vec![Layer::new(diameter / 2.0, Complex64::new(1.59, 0.0))],
    )
}

fn detector() -> Detector {
    Detector::new(90.0, 60.0, 0.0, 0.0, EfficiencyProfile::Uniform).unwrap()
}

#[test]
fn test_scenario_c_build_table_and_round_trip() {
    let diameters = [50.0, 100.0, 150.0, 200.0];
    let table = build_table(
        &detector(),
        &DiameterStub,
        polystyrene_like,
        &diameters,
        361,
        &Quadrature::default(),
    )
    .unwrap();

    assert_eq!(table.entries().len(), 4);
    assert!(table.is_monotone());
    for (entry, &d) in table.entries().iter().zip(diameters.iter()) {
        assert_eq!(entry.diameter, d);
        assert!(entry.signal > 0.0);
    }

    // Inverting the predicted signal of the 150 nm particle recovers
    // 150 nm exactly (up to float tolerance).
    let signal_at_150 = predicted_response(
        &polystyrene_like(150.0).unwrap(),
        &detector(),
        &DiameterStub,
        361,
        &Quadrature::default(),
    )
    .unwrap();
    assert_relative_eq!(table.invert(signal_at_150).unwrap(), 150.0, epsilon = 1e-9);
}

#[test]
fn test_round_trip_between_knots() {
    // A diameter not in the sweep still round-trips within the granularity
    // of the series (S11 ∝ d² is convex, so linear interpolation biases
    // slightly, bounded by the knot spacing).
    let diameters: Vec<f64> = (1..=20).map(|i| 50.0 * i as f64).collect();
    let table = build_table(
        &detector(),
        &DiameterStub,
        polystyrene_like,
        &diameters,
        361,
        &Quadrature::default(),
    )
    .unwrap();
    let signal = predicted_response(
        &polystyrene_like(425.0).unwrap(),
        &detector(),
        &DiameterStub,
        361,
        &Quadrature::default(),
    )
    .unwrap();
    let recovered = table.invert(signal).unwrap();
    assert!(
        (recovered - 425.0).abs() < 50.0,
        "recovered {recovered}, expected within one knot spacing of 425"
    );
}

#[test]
fn test_scenario_d_folded_table_fails_closed() {
    use cytoscatter_calibrate::TableEntry;
    let table = cytoscatter_calibrate::CalibrationTable::new(vec![
        TableEntry { diameter: 100.0, signal: 2.0 },
        TableEntry { diameter: 200.0, signal: 6.0 },
        TableEntry { diameter: 300.0, signal: 2.0 },
    ])
    .unwrap();
    assert!(matches!(
        table.invert(2.0),
        Err(CalibrationError::AmbiguousInversion { .. })
    ));
}

#[test]
fn test_calibrate_solves_gain_from_reference_bead() {
    let detector = detector();
    let reference = polystyrene_like(200.0).unwrap();
    let predicted = predicted_response(
        &reference,
        &detector,
        &DiameterStub,
        361,
        &Quadrature::default(),
    )
    .unwrap();

    // The "instrument" reports three times the gain-1 prediction.
    let measured = 3.0 * predicted;
    let calibrated = calibrate(
        &detector,
        &reference,
        measured,
        &DiameterStub,
        361,
        &Quadrature::default(),
    )
    .unwrap();
    assert_relative_eq!(calibrated.gain(), 3.0, epsilon = 1e-12);

    // And the calibrated detector now reproduces the measurement.
    let reproduced = predicted_response(
        &reference,
        &calibrated,
        &DiameterStub,
        361,
        &Quadrature::default(),
    )
    .unwrap();
    assert_relative_eq!(reproduced, measured, epsilon = 1e-9);
}

#[test]
fn test_calibrate_rejects_nonpositive_measurement() {
    let err = calibrate(
        &detector(),
        &polystyrene_like(200.0).unwrap(),
        0.0,
        &DiameterStub,
        361,
        &Quadrature::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CalibrationError::InvalidReference(_)));
}

#[test]
fn test_mie_transform_bundles_detector_and_table() {
    let diameters = [50.0, 100.0, 150.0, 200.0];
    let detector = detector();
    let table = build_table(
        &detector,
        &DiameterStub,
        polystyrene_like,
        &diameters,
        361,
        &Quadrature::default(),
    )
    .unwrap();
    let signal = table.entries()[2].signal;
    let transform = MieTransform::new(detector, table);
    assert_relative_eq!(transform.invert(signal).unwrap(), 150.0, epsilon = 1e-9);
    assert_eq!(transform.detector().gain(), 1.0);
}
