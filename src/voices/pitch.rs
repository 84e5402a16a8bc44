//! Note-id to frequency lookup.
//!
//! Row ids on the melodic grids are note names ("A2", "C4"). The guitar's
//! high string carries the id "E4g" so it can coexist with the keys' E4 while
//! sharing its pitch; its display label is still "E4".

use crate::voices::Instrument;

const NOTE_TABLE: &[(&str, f32)] = &[
    ("C1", 32.7),
    ("D1", 36.7),
    ("E1", 41.2),
    ("F1", 43.7),
    ("G1", 49.0),
    ("A1", 55.0),
    ("B1", 61.7),
    ("C2", 65.4),
    ("D2", 73.4),
    ("E2", 82.4),
    ("F2", 87.3),
    ("G2", 98.0),
    ("A2", 110.0),
    ("B2", 123.5),
    ("C3", 130.8),
    ("D3", 146.8),
    ("E3", 164.8),
    ("F3", 174.6),
    ("G3", 196.0),
    ("A3", 220.0),
    ("B3", 246.9),
    ("C4", 261.6),
    ("D4", 293.7),
    ("E4", 329.6),
    ("F4", 349.2),
    ("G4", 392.0),
    ("A4", 440.0),
    ("B4", 493.9),
    ("C5", 523.3),
    ("D5", 587.3),
    ("E5", 659.3),
    ("F5", 698.5),
    ("G5", 784.0),
    ("A5", 880.0),
    ("B5", 987.8),
    ("E4g", 329.6),
];

pub fn note_frequency(id: &str) -> Option<f32> {
    NOTE_TABLE
        .iter()
        .find(|(name, _)| *name == id)
        .map(|&(_, freq)| freq)
}

/// Pitch for a melodic row, falling back to the family default when the row
/// is out of range or its id is not in the table.
pub fn row_frequency(instrument: Instrument, row: usize) -> f32 {
    let fallback = match instrument {
        Instrument::Keys => 261.6,
        Instrument::Guitar => 82.4,
        _ => 41.2,
    };
    instrument
        .rows()
        .get(row)
        .and_then(|r| note_frequency(r.id))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_notes() {
        assert_eq!(note_frequency("A4"), Some(440.0));
        assert_eq!(note_frequency("E1"), Some(41.2));
        assert_eq!(note_frequency("E4g"), Some(329.6));
    }

    #[test]
    fn test_unknown_note() {
        assert_eq!(note_frequency("H9"), None);
    }

    #[test]
    fn test_row_frequency_falls_back_per_family() {
        assert_eq!(row_frequency(Instrument::Keys, 999), 261.6);
        assert_eq!(row_frequency(Instrument::Guitar, 999), 82.4);
        assert_eq!(row_frequency(Instrument::Bass, 999), 41.2);
    }

    #[test]
    fn test_row_frequency_resolves_grid_rows() {
        // Keys row 0 is C4, bass row 0 is E1.
        assert_eq!(row_frequency(Instrument::Keys, 0), 261.6);
        assert_eq!(row_frequency(Instrument::Bass, 0), 41.2);
        // Guitar's top string resolves through the aliased id.
        assert_eq!(row_frequency(Instrument::Guitar, 5), 329.6);
    }
}
