//! Per-instrument playback parameters: volume, mute, synthesis variant.
//!
//! The scheduler samples these at trigger time, so edits land on the next
//! scheduled step without touching sound already committed.

use crate::voices::{BassVariant, DrumVariant, GuitarVariant, Instrument, KeysVariant};

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelParams<V> {
    pub volume: f32,
    pub muted: bool,
    pub variant: V,
}

impl<V> ChannelParams<V> {
    fn new(volume: f32, variant: V) -> Self {
        Self {
            volume,
            muted: false,
            variant,
        }
    }

    /// What a trigger actually receives: the volume, or silence when muted.
    pub fn effective_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mixer {
    pub drums: ChannelParams<DrumVariant>,
    pub keys: ChannelParams<KeysVariant>,
    pub guitar: ChannelParams<GuitarVariant>,
    pub bass: ChannelParams<BassVariant>,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            drums: ChannelParams::new(0.85, DrumVariant::Acoustic),
            keys: ChannelParams::new(0.70, KeysVariant::Piano),
            guitar: ChannelParams::new(0.70, GuitarVariant::Acoustic),
            bass: ChannelParams::new(0.80, BassVariant::Electric),
        }
    }
}

impl Mixer {
    pub fn effective_gain(&self, instrument: Instrument) -> f32 {
        match instrument {
            Instrument::Drums => self.drums.effective_gain(),
            Instrument::Keys => self.keys.effective_gain(),
            Instrument::Guitar => self.guitar.effective_gain(),
            Instrument::Bass => self.bass.effective_gain(),
        }
    }

    pub fn volume(&self, instrument: Instrument) -> f32 {
        match instrument {
            Instrument::Drums => self.drums.volume,
            Instrument::Keys => self.keys.volume,
            Instrument::Guitar => self.guitar.volume,
            Instrument::Bass => self.bass.volume,
        }
    }

    pub fn set_volume(&mut self, instrument: Instrument, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        match instrument {
            Instrument::Drums => self.drums.volume = volume,
            Instrument::Keys => self.keys.volume = volume,
            Instrument::Guitar => self.guitar.volume = volume,
            Instrument::Bass => self.bass.volume = volume,
        }
    }

    pub fn is_muted(&self, instrument: Instrument) -> bool {
        match instrument {
            Instrument::Drums => self.drums.muted,
            Instrument::Keys => self.keys.muted,
            Instrument::Guitar => self.guitar.muted,
            Instrument::Bass => self.bass.muted,
        }
    }

    pub fn toggle_mute(&mut self, instrument: Instrument) {
        match instrument {
            Instrument::Drums => self.drums.muted = !self.drums.muted,
            Instrument::Keys => self.keys.muted = !self.keys.muted,
            Instrument::Guitar => self.guitar.muted = !self.guitar.muted,
            Instrument::Bass => self.bass.muted = !self.bass.muted,
        }
    }

    /// Step the instrument to its next synthesis variant.
    pub fn cycle_variant(&mut self, instrument: Instrument) {
        match instrument {
            Instrument::Drums => self.drums.variant = self.drums.variant.next(),
            Instrument::Keys => self.keys.variant = self.keys.variant.next(),
            Instrument::Guitar => self.guitar.variant = self.guitar.variant.next(),
            Instrument::Bass => self.bass.variant = self.bass.variant.next(),
        }
    }

    pub fn variant_name(&self, instrument: Instrument) -> &'static str {
        match instrument {
            Instrument::Drums => self.drums.variant.name(),
            Instrument::Keys => self.keys.variant.name(),
            Instrument::Guitar => self.guitar.variant.name(),
            Instrument::Bass => self.bass.variant.name(),
        }
    }
}
