//! Job runner: ties together config, the file-backed amplitude provider,
//! materials, and the calibration engine.

use std::path::Path;

use anyhow::{bail, Context, Result};

use cytoscatter_calibrate::{build_table, calibrate, CalibrationError, CalibrationTable, TableEntry};
use cytoscatter_core::{Detector, ModelError, Particle, Quadrature};
use cytoscatter_materials::{polystyrene_bead, silica_bead, vesicle_default};

use crate::config::{JobConfig, Material};
use crate::provider::FileAmplitudeProvider;

/// Build the validated detector from a job file.
pub fn build_detector(job: &JobConfig) -> Result<Detector> {
    let d = &job.detector;
    Ok(Detector::new(
        d.theta,
        d.half_angle,
        d.pol_angle,
        d.pol,
        d.efficiency,
    )?)
}

fn quadrature(job: &JobConfig) -> Quadrature {
    Quadrature {
        dr: job.sweep.dr,
        dphi_deg: job.sweep.dphi,
    }
}

fn make_particle(material: Material, diameter: f64, wavelength: f64) -> Result<Particle, ModelError> {
    let particle = match material {
        Material::Polystyrene => polystyrene_bead(diameter, wavelength)?,
        Material::Silica => silica_bead(diameter, wavelength)?,
        Material::Ev => vesicle_default(diameter, wavelength)?,
    };
    Ok(particle)
}

/// Run the diameter sweep for a job, producing a gain-1 table.
pub fn run_table(job: &JobConfig) -> Result<CalibrationTable> {
    let detector = build_detector(job)?;
    let provider = FileAmplitudeProvider::open(&job.sweep.amplitudes)?;
    let diameters = job.sweep.diameters.expand();
    log::debug!(
        "sweeping {} diameters against {} amplitude dumps",
        diameters.len(),
        provider.diameters().len()
    );

    let material = job.particle.material;
    let wavelength = job.particle.wavelength;
    let table = build_table(
        &detector,
        &provider,
        |d| make_particle(material, d, wavelength),
        &diameters,
        job.sweep.n_angles,
        &quadrature(job),
    )?;

    if !table.is_monotone() {
        log::warn!(
            "table signal is not monotone over the sweep; inversion will fail \
             in the folded region"
        );
    }
    Ok(table)
}

/// Solve the detector gain from the job's reference measurement and apply
/// it to an existing gain-1 table.
pub fn run_calibrate(job: &JobConfig, table: &CalibrationTable) -> Result<(f64, CalibrationTable)> {
    let Some(cal) = &job.calibration else {
        bail!("job file has no [calibration] section");
    };
    let detector = build_detector(job)?;
    let provider = FileAmplitudeProvider::open(&job.sweep.amplitudes)?;
    let reference = make_particle(
        job.particle.material,
        cal.reference_diameter,
        job.particle.wavelength,
    )?;
    let calibrated = calibrate(
        &detector,
        &reference,
        cal.measured_signal,
        &provider,
        job.sweep.n_angles,
        &quadrature(job),
    )?;
    let gain = calibrated.gain();
    Ok((gain, table.scaled(gain)?))
}

/// Invert a list of observed signals against a table, reporting each
/// result on stdout. Per-signal failures are reported and do not abort the
/// batch.
pub fn run_invert(table: &CalibrationTable, signals: &[f64]) {
    for &signal in signals {
        match table.invert(signal) {
            Ok(diameter) => println!("{signal:>14.6e}  ->  {diameter:.2} nm"),
            Err(CalibrationError::AmbiguousInversion { candidates, .. }) => {
                println!("{signal:>14.6e}  ->  ambiguous (candidates: {candidates:?})")
            }
            Err(CalibrationError::OutOfRange { min, max, .. }) => {
                println!("{signal:>14.6e}  ->  outside calibrated range [{min:.3e}, {max:.3e}]")
            }
            Err(err) => println!("{signal:>14.6e}  ->  error: {err}"),
        }
    }
}

/// Write a table as CSV with a metadata header.
pub fn write_table_csv(table: &CalibrationTable, path: &Path, gain: f64) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writeln!(file, "# cytoscatter calibration table")?;
    writeln!(file, "# version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# gain: {gain}")?;
    writeln!(file, "diameter_nm,signal")?;
    for entry in table.entries() {
        writeln!(file, "{},{}", entry.diameter, entry.signal)?;
    }
    Ok(())
}

/// Write a table as JSON (entry array).
pub fn write_table_json(table: &CalibrationTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, table.entries())?;
    Ok(())
}

/// Read a table back from the CSV produced by [`write_table_csv`].
pub fn read_table_csv(path: &Path) -> Result<CalibrationTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read table {}", path.display()))?;
    let mut entries = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("diameter") {
            continue;
        }
        let (d, s) = line
            .split_once(',')
            .with_context(|| format!("line {}: expected 'diameter,signal'", lineno + 1))?;
        entries.push(TableEntry {
            diameter: d.trim().parse()?,
            signal: s.trim().parse()?,
        });
    }
    Ok(CalibrationTable::new(entries)?)
}
