//! The diameter ↔ signal lookup table and its monotone inversion.

use serde::{Deserialize, Serialize};

use cytoscatter_core::Detector;

use crate::CalibrationError;

/// One (diameter, predicted-or-measured signal) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub diameter: f64,
    pub signal: f64,
}

/// An ordered diameter → signal lookup table.
///
/// Entries are kept sorted by diameter. Invertibility additionally needs
/// the signal to be monotone over the region being queried; that is checked
/// per query rather than at construction, since Mie resonances can fold the
/// curve in regions a caller never asks about.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    entries: Vec<TableEntry>,
}

impl CalibrationTable {
    /// Build a table from entries, sorting by diameter.
    ///
    /// # Errors
    /// [`CalibrationError::InvalidTable`] if fewer than two entries are
    /// given, any value is non-finite, or two entries share a diameter.
    pub fn new(mut entries: Vec<TableEntry>) -> Result<Self, CalibrationError> {
        if entries.len() < 2 {
            return Err(CalibrationError::InvalidTable(format!(
                "need at least 2 entries, got {}",
                entries.len()
            )));
        }
        for entry in &entries {
            if !entry.diameter.is_finite() || !entry.signal.is_finite() {
                return Err(CalibrationError::InvalidTable(format!(
                    "non-finite entry (diameter {}, signal {})",
                    entry.diameter, entry.signal
                )));
            }
        }
        entries.sort_by(|a, b| a.diameter.total_cmp(&b.diameter));
        if entries.windows(2).any(|w| w[0].diameter == w[1].diameter) {
            return Err(CalibrationError::InvalidTable(
                "duplicate diameter entries".into(),
            ));
        }
        Ok(Self { entries })
    }

    /// Entries sorted ascending by diameter.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Smallest and largest signal anywhere in the table.
    pub fn signal_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for entry in &self.entries {
            min = min.min(entry.signal);
            max = max.max(entry.signal);
        }
        (min, max)
    }

    /// Whether the signal column is monotone (non-decreasing or
    /// non-increasing) over the whole diameter range.
    pub fn is_monotone(&self) -> bool {
        let rising = self
            .entries
            .windows(2)
            .all(|w| w[1].signal >= w[0].signal);
        let falling = self
            .entries
            .windows(2)
            .all(|w| w[1].signal <= w[0].signal);
        rising || falling
    }

    /// The same table with every signal multiplied by `factor`, as produced
    /// by applying a solved gain to a gain-1 sweep (the response is linear
    /// in gain).
    pub fn scaled(&self, factor: f64) -> Result<Self, CalibrationError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(CalibrationError::InvalidTable(format!(
                "scale factor must be positive, got {factor}"
            )));
        }
        let entries = self
            .entries
            .iter()
            .map(|e| TableEntry {
                diameter: e.diameter,
                signal: e.signal * factor,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Recover the particle diameter producing `observed` signal.
    ///
    /// Negative observed signals (possible after an instrument-domain
    /// back-transform) are clamped to zero before lookup — a deliberate
    /// floor, not an error. Lookup then scans every bracketing segment and
    /// interpolates linearly within it.
    ///
    /// # Errors
    /// - [`CalibrationError::OutOfRange`] if no segment brackets the
    ///   signal (no extrapolation).
    /// - [`CalibrationError::AmbiguousInversion`] if more than one distinct
    ///   diameter maps to the signal (Mie-resonance folding).
    pub fn invert(&self, observed: f64) -> Result<f64, CalibrationError> {
        if !observed.is_finite() {
            return Err(CalibrationError::InvalidTable(format!(
                "observed signal must be finite, got {observed}"
            )));
        }
        let signal = observed.max(0.0);

        let span = self.entries[self.entries.len() - 1].diameter - self.entries[0].diameter;
        let tol = span * 1e-9;

        let mut candidates: Vec<f64> = Vec::new();
        for w in self.entries.windows(2) {
            let (a, b) = (w[0], w[1]);
            let lo = a.signal.min(b.signal);
            let hi = a.signal.max(b.signal);
            if signal < lo || signal > hi {
                continue;
            }
            if a.signal == b.signal {
                // Flat segment at exactly the queried signal: every
                // diameter in it is a root.
                push_distinct(&mut candidates, a.diameter, tol);
                push_distinct(&mut candidates, b.diameter, tol);
            } else {
                let t = (signal - a.signal) / (b.signal - a.signal);
                let diameter = a.diameter + t * (b.diameter - a.diameter);
                push_distinct(&mut candidates, diameter, tol);
            }
        }

        match candidates.len() {
            0 => {
                let (min, max) = self.signal_range();
                Err(CalibrationError::OutOfRange { signal, min, max })
            }
            1 => Ok(candidates[0]),
            _ => Err(CalibrationError::AmbiguousInversion { signal, candidates }),
        }
    }
}

fn push_distinct(candidates: &mut Vec<f64>, diameter: f64, tol: f64) {
    if !candidates.iter().any(|&d| (d - diameter).abs() <= tol) {
        candidates.push(diameter);
    }
}

/// A calibrated detector together with its lookup table: the signal → size
/// transform applied to acquired events.
#[derive(Debug, Clone)]
pub struct MieTransform {
    detector: Detector,
    table: CalibrationTable,
}

impl MieTransform {
    pub fn new(detector: Detector, table: CalibrationTable) -> Self {
        Self { detector, table }
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// Diameter estimate for one observed signal value.
    pub fn invert(&self, observed: f64) -> Result<f64, CalibrationError> {
        self.table.invert(observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(diameter: f64, signal: f64) -> TableEntry {
        TableEntry { diameter, signal }
    }

    fn rising_table() -> CalibrationTable {
        CalibrationTable::new(vec![
            entry(50.0, 1.0),
            entry(100.0, 4.0),
            entry(150.0, 9.0),
            entry(200.0, 16.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_sorts_by_diameter() {
        let table = CalibrationTable::new(vec![entry(200.0, 16.0), entry(50.0, 1.0)]).unwrap();
        assert_eq!(table.entries()[0].diameter, 50.0);
        assert_eq!(table.entries()[1].diameter, 200.0);
    }

    #[test]
    fn test_new_rejects_degenerate_tables() {
        assert!(CalibrationTable::new(vec![entry(50.0, 1.0)]).is_err());
        assert!(
            CalibrationTable::new(vec![entry(50.0, 1.0), entry(50.0, 2.0)]).is_err(),
            "duplicate diameters must be rejected"
        );
        assert!(CalibrationTable::new(vec![entry(50.0, f64::NAN), entry(100.0, 2.0)]).is_err());
    }

    #[test]
    fn test_invert_hits_knots_and_interpolates() {
        let table = rising_table();
        assert_relative_eq!(table.invert(9.0).unwrap(), 150.0);
        // Halfway in signal between 4 and 9 → linear in diameter.
        assert_relative_eq!(table.invert(6.5).unwrap(), 125.0);
    }

    #[test]
    fn test_invert_on_falling_table() {
        let table = CalibrationTable::new(vec![
            entry(50.0, 10.0),
            entry(100.0, 6.0),
            entry(150.0, 2.0),
        ])
        .unwrap();
        assert_relative_eq!(table.invert(4.0).unwrap(), 125.0);
    }

    #[test]
    fn test_invert_out_of_range() {
        let table = rising_table();
        let err = table.invert(100.0).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::OutOfRange { min, max, .. } if min == 1.0 && max == 16.0
        ));
        assert!(table.invert(0.5).is_err());
    }

    #[test]
    fn test_invert_clamps_negative_signals_to_zero() {
        let table = CalibrationTable::new(vec![entry(50.0, 0.0), entry(100.0, 8.0)]).unwrap();
        // −3 clamps to 0, which maps to the first knot.
        assert_relative_eq!(table.invert(-3.0).unwrap(), 50.0);

        // If zero is below the table's range the clamped value still fails.
        let above_zero = rising_table();
        let err = above_zero.invert(-3.0).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::OutOfRange { signal, .. } if signal == 0.0
        ));
    }

    #[test]
    fn test_invert_rejects_folded_tables() {
        // Resonance fold: signal rises then falls, two diameters share
        // every signal level in (5, 8).
        let table = CalibrationTable::new(vec![
            entry(100.0, 5.0),
            entry(150.0, 8.0),
            entry(200.0, 5.0),
        ])
        .unwrap();
        assert!(!table.is_monotone());
        let err = table.invert(6.0).unwrap_err();
        match err {
            CalibrationError::AmbiguousInversion { candidates, .. } => {
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected AmbiguousInversion, got {other:?}"),
        }
        // The shared endpoint signal has two distinct roots as well.
        assert!(table.invert(5.0).is_err());
    }

    #[test]
    fn test_invert_knot_hit_is_not_ambiguous() {
        // A signal landing exactly on an interior knot brackets two
        // adjacent segments but yields one distinct diameter.
        let table = rising_table();
        assert_relative_eq!(table.invert(4.0).unwrap(), 100.0);
    }

    #[test]
    fn test_scaled_multiplies_signals_only() {
        let table = rising_table().scaled(2.0).unwrap();
        assert_eq!(table.entries()[0].signal, 2.0);
        assert_eq!(table.entries()[0].diameter, 50.0);
        assert!(rising_table().scaled(-1.0).is_err());
    }
}
