//! File-backed amplitude provider.
//!
//! The raw Mie computation happens outside this repository; an external
//! tool dumps one CSV per diameter into a directory, each row holding
//! `theta_deg, s1_re, s1_im, s2_re, s2_im` on an ascending θ grid. The
//! file stem is the particle diameter in nm (e.g. `203.csv`, `98.5.csv`).
//! This provider matches a requested particle to its dump by diameter.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ndarray::Array1;
use num_complex::Complex64;

use cytoscatter_core::{AmplitudeProvider, ModelError, Particle, ScatteringAmplitudes};

/// Relative diameter tolerance when matching a particle to a dump file.
const DIAMETER_TOLERANCE: f64 = 1e-6;

/// Amplitude provider backed by a directory of per-diameter CSV dumps.
pub struct FileAmplitudeProvider {
    /// (diameter_nm, path), sorted by diameter.
    files: Vec<(f64, PathBuf)>,
}

impl FileAmplitudeProvider {
    /// Index a dump directory. Non-CSV files and files whose stem is not a
    /// number are skipped.
    pub fn open(dir: &Path) -> Result<Self> {
        let mut files = Vec::new();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read amplitude directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(diameter) = stem.parse::<f64>() {
                files.push((diameter, path));
            }
        }
        if files.is_empty() {
            bail!("No per-diameter amplitude dumps found in {}", dir.display());
        }
        files.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { files })
    }

    /// Diameters (nm) with an available dump, ascending.
    pub fn diameters(&self) -> Vec<f64> {
        self.files.iter().map(|(d, _)| *d).collect()
    }

    fn find(&self, diameter: f64) -> Option<&Path> {
        let tol = DIAMETER_TOLERANCE * diameter.abs().max(1.0);
        self.files
            .iter()
            .find(|(d, _)| (d - diameter).abs() <= tol)
            .map(|(_, p)| p.as_path())
    }
}

impl AmplitudeProvider for FileAmplitudeProvider {
    fn amplitudes(
        &self,
        particle: &Particle,
        _n_angles: usize,
    ) -> Result<ScatteringAmplitudes, ModelError> {
        let diameter = particle.diameter();
        let path = self.find(diameter).ok_or_else(|| {
            ModelError::InvalidInput(format!(
                "no amplitude dump for diameter {diameter} nm"
            ))
        })?;
        let text = std::fs::read_to_string(path).map_err(|e| {
            ModelError::InvalidInput(format!("failed to read {}: {e}", path.display()))
        })?;
        parse_amplitude_csv(&text)
    }
}

/// Parse one amplitude dump. `#`-comments, blank lines, and a
/// `theta_deg,...` header line are skipped.
pub fn parse_amplitude_csv(text: &str) -> Result<ScatteringAmplitudes, ModelError> {
    let mut theta = Vec::new();
    let mut s1 = Vec::new();
    let mut s2 = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("theta") {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 5 {
            return Err(ModelError::InvalidInput(format!(
                "line {}: expected 5 fields (theta_deg, s1_re, s1_im, s2_re, s2_im), got {}",
                lineno + 1,
                fields.len()
            )));
        }
        let mut values = [0.0_f64; 5];
        for (i, field) in fields.iter().enumerate() {
            values[i] = field.parse().map_err(|_| {
                ModelError::InvalidInput(format!(
                    "line {}: could not parse '{field}' as a number",
                    lineno + 1
                ))
            })?;
        }
        theta.push(values[0].to_radians());
        s1.push(Complex64::new(values[1], values[2]));
        s2.push(Complex64::new(values[3], values[4]));
    }

    ScatteringAmplitudes::new(
        Array1::from_vec(theta),
        Array1::from_vec(s1),
        Array1::from_vec(s2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_dump_with_header_and_comments() {
        let text = "\
# produced by an external Mie tool
theta_deg,s1_re,s1_im,s2_re,s2_im
0.0, 1.0, 0.5, 2.0, -0.5

90.0, 0.8, 0.1, 1.5, 0.0
";
        let amplitudes = parse_amplitude_csv(text).unwrap();
        assert_eq!(amplitudes.len(), 2);
        assert_relative_eq!(amplitudes.theta()[1], std::f64::consts::FRAC_PI_2);
        assert_eq!(amplitudes.s1()[0], Complex64::new(1.0, 0.5));
        assert_eq!(amplitudes.s2()[0], Complex64::new(2.0, -0.5));
    }

    #[test]
    fn test_parse_rejects_short_rows() {
        let err = parse_amplitude_csv("0.0, 1.0, 0.5\n").unwrap_err();
        assert!(matches!(err, ModelError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_rejects_descending_grid() {
        let text = "90.0,1,0,1,0\n0.0,1,0,1,0\n";
        assert!(parse_amplitude_csv(text).is_err());
    }
}
