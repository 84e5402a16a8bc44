//! Voice builders for the four instrument families.
//!
//! Every trigger builds a fresh, self-terminating graph from scratch: a pure
//! function of (instrument, row, variant, gain, sample rate). Construction
//! happens on the control thread; the audio callback only ever renders the
//! finished box. Nothing here allocates after the builder returns.

pub mod bass;
pub mod drums;
pub mod guitar;
pub mod keys;
pub mod pitch;

pub use pitch::note_frequency;

use crate::dsp::oscillator::XorShift;
use crate::graph::GraphNode;
use crate::mixer::Mixer;

/// A labelled grid row. `id` is the stable identifier (a note name on the
/// melodic grids); `label` is what the front end prints.
pub struct Row {
    pub id: &'static str,
    pub label: &'static str,
}

const fn row(id: &'static str, label: &'static str) -> Row {
    Row { id, label }
}

const DRUM_ROWS: [Row; 7] = [
    row("kick", "Kick"),
    row("snare", "Snare"),
    row("hihat", "Hi-Hat"),
    row("openhat", "Open HH"),
    row("crash", "Crash"),
    row("tom", "Tom"),
    row("clap", "Clap"),
];

const KEYS_ROWS: [Row; 8] = [
    row("C4", "C4"),
    row("D4", "D4"),
    row("E4", "E4"),
    row("F4", "F4"),
    row("G4", "G4"),
    row("A4", "A4"),
    row("B4", "B4"),
    row("C5", "C5"),
];

// Standard tuning, low string first. The high E carries an aliased id so it
// stays distinct from the keys grid's E4.
const GUITAR_ROWS: [Row; 6] = [
    row("E2", "E2"),
    row("A2", "A2"),
    row("D3", "D3"),
    row("G3", "G3"),
    row("B3", "B3"),
    row("E4g", "E4"),
];

const BASS_ROWS: [Row; 5] = [
    row("E1", "E1"),
    row("A1", "A1"),
    row("D2", "D2"),
    row("G2", "G2"),
    row("C2", "C2"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instrument {
    Drums,
    Keys,
    Guitar,
    Bass,
}

impl Instrument {
    pub const ALL: [Instrument; 4] = [
        Instrument::Drums,
        Instrument::Keys,
        Instrument::Guitar,
        Instrument::Bass,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Drums => "drums",
            Instrument::Keys => "keys",
            Instrument::Guitar => "guitar",
            Instrument::Bass => "bass",
        }
    }

    pub fn rows(&self) -> &'static [Row] {
        match self {
            Instrument::Drums => &DRUM_ROWS,
            Instrument::Keys => &KEYS_ROWS,
            Instrument::Guitar => &GUITAR_ROWS,
            Instrument::Bass => &BASS_ROWS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrumVariant {
    #[default]
    Acoustic,
    Electronic,
}

impl DrumVariant {
    pub fn next(self) -> Self {
        match self {
            DrumVariant::Acoustic => DrumVariant::Electronic,
            DrumVariant::Electronic => DrumVariant::Acoustic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DrumVariant::Acoustic => "acoustic",
            DrumVariant::Electronic => "electronic",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeysVariant {
    #[default]
    Piano,
    Synth,
    Organ,
}

impl KeysVariant {
    pub fn next(self) -> Self {
        match self {
            KeysVariant::Piano => KeysVariant::Synth,
            KeysVariant::Synth => KeysVariant::Organ,
            KeysVariant::Organ => KeysVariant::Piano,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeysVariant::Piano => "piano",
            KeysVariant::Synth => "synth",
            KeysVariant::Organ => "organ",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuitarVariant {
    #[default]
    Acoustic,
    Electric,
}

impl GuitarVariant {
    pub fn next(self) -> Self {
        match self {
            GuitarVariant::Acoustic => GuitarVariant::Electric,
            GuitarVariant::Electric => GuitarVariant::Acoustic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GuitarVariant::Acoustic => "acoustic",
            GuitarVariant::Electric => "electric",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BassVariant {
    #[default]
    Electric,
    Synth,
}

impl BassVariant {
    pub fn next(self) -> Self {
        match self {
            BassVariant::Electric => BassVariant::Synth,
            BassVariant::Synth => BassVariant::Electric,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BassVariant::Electric => "electric",
            BassVariant::Synth => "synth",
        }
    }
}

/// The drum grid's rows, by position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrumSound {
    Kick,
    Snare,
    Hihat,
    Openhat,
    Crash,
    Tom,
    Clap,
}

impl DrumSound {
    pub fn from_row(index: usize) -> Option<Self> {
        match index {
            0 => Some(DrumSound::Kick),
            1 => Some(DrumSound::Snare),
            2 => Some(DrumSound::Hihat),
            3 => Some(DrumSound::Openhat),
            4 => Some(DrumSound::Crash),
            5 => Some(DrumSound::Tom),
            6 => Some(DrumSound::Clap),
            _ => None,
        }
    }
}

/// Build the voice graph for one trigger.
///
/// Returns `None` when there is nothing to play: zero gain (muted channel)
/// or a drum row with no sound behind it. Melodic rows out of range fall
/// back to the family's default pitch rather than going silent.
pub fn build_voice(
    instrument: Instrument,
    row_index: usize,
    mixer: &Mixer,
    gain: f32,
    sample_rate: f32,
    rng: &mut XorShift,
) -> Option<Box<dyn GraphNode>> {
    if gain <= 0.0 {
        return None;
    }
    match instrument {
        Instrument::Drums => {
            let variant = mixer.drums.variant;
            let voice = match DrumSound::from_row(row_index)? {
                DrumSound::Kick => drums::kick(variant, gain, sample_rate, rng),
                DrumSound::Snare => drums::snare(variant, gain, sample_rate, rng),
                DrumSound::Hihat => drums::hihat(variant, gain),
                DrumSound::Openhat => drums::openhat(gain),
                DrumSound::Crash => drums::crash(gain),
                DrumSound::Tom => drums::tom(variant, gain),
                DrumSound::Clap => drums::clap(gain, sample_rate, rng),
            };
            Some(voice)
        }
        Instrument::Keys => {
            let frequency = pitch::row_frequency(instrument, row_index);
            Some(match mixer.keys.variant {
                KeysVariant::Piano => keys::piano(frequency, gain),
                KeysVariant::Synth => keys::synth(frequency, gain),
                KeysVariant::Organ => keys::organ(frequency, gain),
            })
        }
        Instrument::Guitar => {
            let frequency = pitch::row_frequency(instrument, row_index);
            Some(match mixer.guitar.variant {
                GuitarVariant::Acoustic => guitar::acoustic(frequency, gain, sample_rate, rng),
                GuitarVariant::Electric => guitar::electric(frequency, gain),
            })
        }
        Instrument::Bass => {
            let frequency = pitch::row_frequency(instrument, row_index);
            Some(match mixer.bass.variant {
                BassVariant::Electric => bass::electric(frequency, gain),
                BassVariant::Synth => bass::synth(frequency, gain),
            })
        }
    }
}
