//! Integration tests for the detector-response integrator.
//!
//! Uses a synthetic constant-amplitude provider (S1 = S2 = 1 + 0i at every
//! θ) so the aperture integral has a closed form: S11 = 1 and S12 = 0
//! everywhere, reducing the response to (1/π)·∬ r dr dφ = 1 over the unit
//! disk, times gain.

use approx::assert_relative_eq;
use ndarray::Array1;
use num_complex::Complex64;

use cytoscatter_core::{
    response, Detector, EfficiencyProfile, Quadrature, ScatteringAmplitudes, StokesSamples,
};

/// S1 = S2 = 1 + 0i on a uniform θ grid over the full circle.
fn constant_amplitudes(n_angles: usize) -> ScatteringAmplitudes {
    let theta = Array1::linspace(0.0, 2.0 * std::f64::consts::PI, n_angles);
    let one = Complex64::new(1.0, 0.0);
    ScatteringAmplitudes::new(
        theta,
        Array1::from_elem(n_angles, one),
        Array1::from_elem(n_angles, one),
    )
    .unwrap()
}

fn constant_stokes() -> StokesSamples {
    StokesSamples::from_amplitudes(&constant_amplitudes(721))
}

#[test]
fn test_scenario_a_unit_disk_integral() {
    // Uniform efficiency, unpolarized, θ₀ = 90°, α = 60°: the response is
    // the discrete unit-disk integral, approaching 1 as dr → 0.
    let detector = Detector::new(90.0, 60.0, 0.0, 0.0, EfficiencyProfile::Uniform).unwrap();
    let quadrature = Quadrature { dr: 0.02, dphi_deg: 10.0 };
    let signal = response(&constant_stokes(), &detector, &quadrature).unwrap();
    assert_relative_eq!(signal, 1.0, max_relative = 0.05);

    // Refining the radial step tightens the agreement.
    let fine = Quadrature { dr: 0.002, dphi_deg: 10.0 };
    let signal_fine = response(&constant_stokes(), &detector, &fine).unwrap();
    assert_relative_eq!(signal_fine, 1.0, max_relative = 0.005);
}

#[test]
fn test_scenario_b_narrow_aperture_fully_polarized() {
    // pol = 1, ψ₀ = 90°, α = 1°: ψ ≈ 90° across the whole aperture so
    // cos 2ψ ≈ −1, but S12 = 0 for the constant stub, leaving the same
    // unit-disk integral. Validates the geometry degenerates cleanly at
    // small α.
    let detector = Detector::new(90.0, 1.0, 90.0, 1.0, EfficiencyProfile::Uniform).unwrap();
    let signal = response(&constant_stokes(), &detector, &Quadrature::default()).unwrap();
    assert_relative_eq!(signal, 1.0, max_relative = 0.05);
}

#[test]
fn test_response_scales_linearly_in_gain() {
    let stokes = constant_stokes();
    let detector = Detector::new(90.0, 60.0, 30.0, 0.5, EfficiencyProfile::VanDerPol).unwrap();
    let base = response(&stokes, &detector, &Quadrature::default()).unwrap();
    for gain in [0.1, 2.0, 7.5, 1e4] {
        let scaled = response(
            &stokes,
            &detector.with_gain(gain).unwrap(),
            &Quadrature::default(),
        )
        .unwrap();
        // Gain is applied as a final multiply, so equality is exact.
        assert_eq!(scaled, gain * base);
    }
}

#[test]
fn test_unpolarized_response_ignores_pol_angle() {
    // With pol = 0 the S12 term vanishes identically, so ψ₀ cannot matter.
    let stokes = constant_stokes();
    let reference = {
        let detector = Detector::new(90.0, 45.0, 0.0, 0.0, EfficiencyProfile::VanDerPol).unwrap();
        response(&stokes, &detector, &Quadrature::default()).unwrap()
    };
    for pol_angle in [15.0, 45.0, 90.0, 273.0] {
        let detector =
            Detector::new(90.0, 45.0, pol_angle, 0.0, EfficiencyProfile::VanDerPol).unwrap();
        let signal = response(&stokes, &detector, &Quadrature::default()).unwrap();
        assert_eq!(signal, reference);
    }
}

#[test]
fn test_response_is_idempotent() {
    let stokes = constant_stokes();
    let detector = Detector::new(
        90.0,
        60.0,
        45.0,
        1.0,
        EfficiencyProfile::ModifiedVanDerPol { eta_fac: 0.3 },
    )
    .unwrap();
    let first = response(&stokes, &detector, &Quadrature::default()).unwrap();
    let second = response(&stokes, &detector, &Quadrature::default()).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_rim_weighted_profiles_reduce_the_signal() {
    // Van der Pol weighting is < 1 away from the axis, so the integrated
    // signal must drop strictly below the uniform-profile value.
    let stokes = constant_stokes();
    let uniform = Detector::new(90.0, 60.0, 0.0, 0.0, EfficiencyProfile::Uniform).unwrap();
    let vdp = Detector::new(90.0, 60.0, 0.0, 0.0, EfficiencyProfile::VanDerPol).unwrap();
    let s_uniform = response(&stokes, &uniform, &Quadrature::default()).unwrap();
    let s_vdp = response(&stokes, &vdp, &Quadrature::default()).unwrap();
    assert!(s_vdp < s_uniform);
    assert!(s_vdp > 0.0);
}
