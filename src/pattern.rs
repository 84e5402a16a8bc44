//! The pattern store: what plays where.
//!
//! One table per instrument, `rows x step_count` cells of `u8`. Zero is an
//! empty cell; a nonzero value N starts a note at that step spanning N steps.
//! The store clamps lengths on write so a stored note never overhangs the
//! end of the pattern; readers can trust every cell as-is.

use crate::voices::Instrument;

/// Grid lengths the front end may select.
pub const STEP_COUNTS: [usize; 3] = [16, 32, 64];

pub const DEFAULT_STEP_COUNT: usize = 32;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternGrid {
    step_count: usize,
    tracks: [Vec<Vec<u8>>; 4],
}

fn track_index(instrument: Instrument) -> usize {
    match instrument {
        Instrument::Drums => 0,
        Instrument::Keys => 1,
        Instrument::Guitar => 2,
        Instrument::Bass => 3,
    }
}

impl Default for PatternGrid {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_COUNT)
    }
}

impl PatternGrid {
    pub fn new(step_count: usize) -> Self {
        let tracks = Instrument::ALL
            .map(|instrument| vec![vec![0u8; step_count]; instrument.rows().len()]);
        Self { step_count, tracks }
    }

    /// The stock beat: four-on-the-floor kick, backbeat snare, eighth-note
    /// hats, and a walking E1 bass.
    pub fn with_default_pattern(step_count: usize) -> Self {
        let mut grid = Self::new(step_count);
        for step in [0, 8, 16, 24] {
            grid.set_note(Instrument::Drums, 0, step, 1);
        }
        for step in [4, 12, 20, 28] {
            grid.set_note(Instrument::Drums, 1, step, 1);
        }
        for step in (0..32).step_by(2) {
            grid.set_note(Instrument::Drums, 2, step, 1);
        }
        for step in [0, 10, 16, 26] {
            grid.set_note(Instrument::Bass, 0, step, 1);
        }
        grid
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Note length at a cell; 0 means empty. Out-of-range reads are empty.
    pub fn note_at(&self, instrument: Instrument, row: usize, step: usize) -> u8 {
        self.tracks[track_index(instrument)]
            .get(row)
            .and_then(|cells| cells.get(step))
            .copied()
            .unwrap_or(0)
    }

    /// Store a note, clamping its length to what fits before the pattern
    /// end. Length 0 clears the cell. Out-of-range writes are ignored.
    pub fn set_note(&mut self, instrument: Instrument, row: usize, step: usize, length: u8) {
        if step >= self.step_count {
            return;
        }
        let fits = (self.step_count - step).min(u8::MAX as usize) as u8;
        if let Some(cell) = self.tracks[track_index(instrument)]
            .get_mut(row)
            .and_then(|cells| cells.get_mut(step))
        {
            *cell = length.min(fits);
        }
    }

    /// Flip a cell between empty and a one-step note.
    pub fn toggle_step(&mut self, instrument: Instrument, row: usize, step: usize) {
        let length = if self.note_at(instrument, row, step) == 0 { 1 } else { 0 };
        self.set_note(instrument, row, step, length);
    }

    pub fn clear_instrument(&mut self, instrument: Instrument) {
        for cells in &mut self.tracks[track_index(instrument)] {
            cells.fill(0);
        }
    }

    pub fn clear_all(&mut self) {
        for instrument in Instrument::ALL {
            self.clear_instrument(instrument);
        }
    }

    /// Change the grid length, keeping the common prefix of every row and
    /// re-clamping any note that would now overhang the end.
    pub fn resize(&mut self, step_count: usize) {
        for track in &mut self.tracks {
            for cells in track.iter_mut() {
                cells.resize(step_count, 0);
            }
        }
        self.step_count = step_count;
        for instrument in Instrument::ALL {
            for row in 0..instrument.rows().len() {
                for step in 0..step_count {
                    let length = self.note_at(instrument, row, step);
                    if length as usize > step_count - step {
                        self.set_note(instrument, row, step, (step_count - step) as u8);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_clear() {
        let mut grid = PatternGrid::new(16);
        grid.toggle_step(Instrument::Drums, 0, 3);
        assert_eq!(grid.note_at(Instrument::Drums, 0, 3), 1);
        grid.toggle_step(Instrument::Drums, 0, 3);
        assert_eq!(grid.note_at(Instrument::Drums, 0, 3), 0);

        grid.set_note(Instrument::Bass, 1, 5, 4);
        grid.clear_instrument(Instrument::Bass);
        assert_eq!(grid.note_at(Instrument::Bass, 1, 5), 0);
    }

    #[test]
    fn test_length_clamps_to_pattern_end() {
        let mut grid = PatternGrid::new(16);
        grid.set_note(Instrument::Keys, 0, 14, 8);
        assert_eq!(grid.note_at(Instrument::Keys, 0, 14), 2, "only 2 steps fit");

        // The boundary case: a note at step 0 spanning all but one step.
        grid.set_note(Instrument::Keys, 1, 0, 15);
        assert_eq!(grid.note_at(Instrument::Keys, 1, 0), 15);
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut grid = PatternGrid::new(16);
        grid.set_note(Instrument::Drums, 0, 99, 1);
        grid.set_note(Instrument::Drums, 99, 0, 1);
        assert_eq!(grid.note_at(Instrument::Drums, 0, 99), 0);
    }

    #[test]
    fn test_resize_preserves_prefix_and_truncates_overhang() {
        let mut grid = PatternGrid::new(32);
        grid.set_note(Instrument::Drums, 0, 4, 1);
        grid.set_note(Instrument::Keys, 0, 12, 8); // spans 12..20

        grid.resize(16);
        assert_eq!(grid.step_count(), 16);
        assert_eq!(grid.note_at(Instrument::Drums, 0, 4), 1);
        assert_eq!(
            grid.note_at(Instrument::Keys, 0, 12),
            4,
            "length re-clamped to the new end"
        );

        grid.resize(64);
        assert_eq!(grid.note_at(Instrument::Drums, 0, 4), 1);
        assert_eq!(grid.note_at(Instrument::Drums, 0, 40), 0, "new tail is empty");
    }

    #[test]
    fn test_default_pattern_respects_short_grids() {
        let grid = PatternGrid::with_default_pattern(16);
        assert_eq!(grid.note_at(Instrument::Drums, 0, 0), 1);
        assert_eq!(grid.note_at(Instrument::Drums, 1, 4), 1);
        assert_eq!(grid.note_at(Instrument::Bass, 0, 10), 1);
        // Steps beyond the grid simply never land.
        assert_eq!(grid.step_count(), 16);
    }

    #[test]
    fn test_default_pattern_census() {
        let grid = PatternGrid::with_default_pattern(32);
        let count = |instrument, row: usize| {
            (0..32)
                .filter(|&s| grid.note_at(instrument, row, s) > 0)
                .count()
        };
        assert_eq!(count(Instrument::Drums, 0), 4, "kick");
        assert_eq!(count(Instrument::Drums, 1), 4, "snare");
        assert_eq!(count(Instrument::Drums, 2), 16, "hihat on evens");
        assert_eq!(count(Instrument::Bass, 0), 4, "bass");
    }
}
