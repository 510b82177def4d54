//! Cauchy dispersion formulas for the named materials used in side-scatter
//! calibration: water (the ambient medium), polystyrene (calibration
//! beads), and silica (low-index beads).
//!
//! All three have smooth closed-form dispersions in the visible, so no
//! tabulated data is needed. Formulas are validated over 200–1100 nm;
//! outside that range they extrapolate poorly and are rejected.

use crate::MaterialError;

/// Wavelength range (nm) over which the dispersion formulas are trusted.
pub const WAVELENGTH_RANGE_NM: (f64, f64) = (200.0, 1100.0);

fn check_range(wavelength_nm: f64) -> Result<(), MaterialError> {
    let (min, max) = WAVELENGTH_RANGE_NM;
    if !wavelength_nm.is_finite() || wavelength_nm < min || wavelength_nm > max {
        return Err(MaterialError::OutOfRange {
            wavelength_nm,
            min,
            max,
        });
    }
    Ok(())
}

/// Refractive index of water at `wavelength_nm`.
///
/// Cauchy fit to the visible dispersion of pure water at room temperature;
/// about 1.343 at the 405 nm violet laser line.
pub fn water_index(wavelength_nm: f64) -> Result<f64, MaterialError> {
    check_range(wavelength_nm)?;
    let l2 = wavelength_nm * wavelength_nm;
    Ok(1.3199 + 6878.0 / l2 - 1.132e9 / (l2 * l2) + 1.11e14 / (l2 * l2 * l2))
}

/// Refractive index of polystyrene at `wavelength_nm`.
///
/// Cauchy dispersion n = 1.5725 + 0.0031080/λ² + 0.00034779/λ⁴ with λ in
/// micrometres (Nikolov & Ivanov fit).
pub fn polystyrene_index(wavelength_nm: f64) -> Result<f64, MaterialError> {
    check_range(wavelength_nm)?;
    let l_um = wavelength_nm / 1000.0;
    let l2 = l_um * l_um;
    Ok(1.5725 + 0.0031080 / l2 + 0.00034779 / (l2 * l2))
}

/// Refractive index of fused silica at `wavelength_nm`.
///
/// Single-term Cauchy approximation, adequate at the precision side-scatter
/// modelling needs (silica beads are themselves porous, with an effective
/// index below the bulk value).
pub fn silica_index(wavelength_nm: f64) -> Result<f64, MaterialError> {
    check_range(wavelength_nm)?;
    let l_um = wavelength_nm / 1000.0;
    Ok(1.4580 + 0.00354 / (l_um * l_um))
}
