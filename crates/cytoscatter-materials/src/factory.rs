//! Particle factories: diameter-and-material in, validated [`Particle`]
//! out.
//!
//! All factories place the particle in water. The extracellular-vesicle
//! model is a two-layer sphere — an aqueous lumen wrapped in a thin
//! higher-index membrane shell.

use num_complex::Complex64;

use cytoscatter_core::{Layer, Particle};

use crate::refractive::{polystyrene_index, silica_index, water_index};
use crate::MaterialError;

/// Default vesicle membrane thickness (nm).
pub const EV_MEMBRANE_THICKNESS_NM: f64 = 6.0;
/// Default vesicle lumen refractive index.
pub const EV_LUMEN_INDEX: f64 = 1.38;
/// Default vesicle membrane refractive index.
pub const EV_MEMBRANE_INDEX: f64 = 1.48;

/// A homogeneous sphere of the given index in water.
pub fn bead(
    diameter_nm: f64,
    index: Complex64,
    wavelength_nm: f64,
) -> Result<Particle, MaterialError> {
    let medium = water_index(wavelength_nm)?;
    let particle = Particle::new(
        medium,
        wavelength_nm,
        vec![Layer::new(diameter_nm / 2.0, index)],
    )?;
    Ok(particle)
}

/// A polystyrene calibration bead in water.
pub fn polystyrene_bead(diameter_nm: f64, wavelength_nm: f64) -> Result<Particle, MaterialError> {
    let n = polystyrene_index(wavelength_nm)?;
    bead(diameter_nm, Complex64::new(n, 0.0), wavelength_nm)
}

/// A silica bead in water.
pub fn silica_bead(diameter_nm: f64, wavelength_nm: f64) -> Result<Particle, MaterialError> {
    let n = silica_index(wavelength_nm)?;
    bead(diameter_nm, Complex64::new(n, 0.0), wavelength_nm)
}

/// A two-layer vesicle: lumen of `lumen_index` out to
/// `diameter/2 − membrane_thickness`, membrane shell out to `diameter/2`.
pub fn vesicle(
    diameter_nm: f64,
    membrane_thickness_nm: f64,
    lumen_index: f64,
    membrane_index: f64,
    wavelength_nm: f64,
) -> Result<Particle, MaterialError> {
    let medium = water_index(wavelength_nm)?;
    let outer = diameter_nm / 2.0;
    let inner = outer - membrane_thickness_nm;
    // inner <= 0 or a zero-thickness shell is caught by the strictly
    // increasing radius check in Particle::new.
    let particle = Particle::new(
        medium,
        wavelength_nm,
        vec![
            Layer::new(inner, Complex64::new(lumen_index, 0.0)),
            Layer::new(outer, Complex64::new(membrane_index, 0.0)),
        ],
    )?;
    Ok(particle)
}

/// A vesicle with the default membrane thickness and indices.
pub fn vesicle_default(diameter_nm: f64, wavelength_nm: f64) -> Result<Particle, MaterialError> {
    vesicle(
        diameter_nm,
        EV_MEMBRANE_THICKNESS_NM,
        EV_LUMEN_INDEX,
        EV_MEMBRANE_INDEX,
        wavelength_nm,
    )
}
