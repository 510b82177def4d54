//! TOML configuration deserialisation for calibration jobs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use cytoscatter_core::EfficiencyProfile;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub detector: DetectorConfig,
    pub particle: ParticleConfig,
    pub sweep: SweepConfig,
    #[serde(default)]
    pub calibration: Option<CalibrationConfig>,
}

/// Detector parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct DetectorConfig {
    /// Nominal scattering angle θ₀ (degrees).
    #[serde(default = "default_theta")]
    pub theta: f64,
    /// Acceptance half-angle α (degrees).
    pub half_angle: f64,
    /// Incident polarization angle ψ₀ (degrees).
    #[serde(default)]
    pub pol_angle: f64,
    /// Degree of linear polarization, in [0, 1].
    #[serde(default = "default_pol")]
    pub pol: f64,
    /// Radial efficiency profile.
    #[serde(default = "default_efficiency")]
    pub efficiency: EfficiencyProfile,
}

fn default_theta() -> f64 {
    90.0
}
fn default_pol() -> f64 {
    1.0
}
fn default_efficiency() -> EfficiencyProfile {
    EfficiencyProfile::Uniform
}

/// Particle model used for the sweep.
#[derive(Debug, Deserialize)]
pub struct ParticleConfig {
    pub material: Material,
    /// Incident wavelength (nm).
    pub wavelength: f64,
}

/// Named particle materials.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Polystyrene,
    Silica,
    /// Two-layer extracellular-vesicle model (lumen + membrane).
    Ev,
}

/// Sweep parameters: which diameters, where the amplitude dumps live, and
/// the integration steps.
#[derive(Debug, Deserialize)]
pub struct SweepConfig {
    pub diameters: DiameterSpec,
    /// Directory of per-diameter amplitude dumps from the external Mie
    /// tool.
    pub amplitudes: PathBuf,
    /// Angular resolution requested from the provider (ignored by
    /// file-backed providers).
    #[serde(default = "default_n_angles")]
    pub n_angles: usize,
    /// Radial integration step.
    #[serde(default = "default_dr")]
    pub dr: f64,
    /// Azimuthal integration step (degrees).
    #[serde(default = "default_dphi")]
    pub dphi: f64,
}

fn default_n_angles() -> usize {
    1000
}
fn default_dr() -> f64 {
    0.02
}
fn default_dphi() -> f64 {
    10.0
}

/// Diameter series: either a uniform range or an explicit list (nm).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DiameterSpec {
    Range { start: f64, stop: f64, points: usize },
    List { values: Vec<f64> },
}

impl DiameterSpec {
    pub fn expand(&self) -> Vec<f64> {
        match self {
            DiameterSpec::Range { start, stop, points } => (0..*points)
                .map(|i| start + (stop - start) * i as f64 / (*points - 1).max(1) as f64)
                .collect(),
            DiameterSpec::List { values } => values.clone(),
        }
    }
}

/// Reference-bead measurement used to solve the detector gain.
#[derive(Debug, Deserialize)]
pub struct CalibrationConfig {
    /// Known diameter of the reference bead (nm).
    pub reference_diameter: f64,
    /// Empirical signal of the reference bead population (e.g. its median
    /// on the side-scatter channel).
    pub measured_signal: f64,
}

/// Load and parse a job file.
pub fn load_config(path: &Path) -> Result<JobConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
