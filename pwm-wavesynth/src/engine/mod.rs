//! Voice array and control-rate scheduling.
//!
//! Each tick the engine opens or closes two gates, the envelope gate (every
//! [`ENVELOPE_DIVIDER`] ticks) and the modulation gate (every
//! [`MODULATION_DIVIDER`] ticks), then asks every voice for one sample.

mod divider;

pub use divider::ControlDivider;

use crate::constants::{ENVELOPE_DIVIDER, MODULATION_DIVIDER};
use crate::dsp::pitch::PitchTable;
use crate::dsp::tables::{EnvelopeData, EnvelopeTable, WaveData, WaveTable};
use crate::voice::Voice;

/// Gates that were open on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlFlags {
    pub update_envelope: bool,
    pub apply_modulation: bool,
}

/// Fixed array of `N` voices plus the two control-rate dividers and the
/// MIDI pitch table.
pub struct VoiceEngine<const N: usize, W = &'static WaveData, E = &'static EnvelopeData> {
    voices: [Voice<W, E>; N],
    envelope_gate: ControlDivider,
    modulation_gate: ControlDivider,
    pitches: PitchTable,
}

impl<const N: usize, W, E> VoiceEngine<N, W, E>
where
    W: WaveTable + Copy,
    E: EnvelopeTable + Copy,
{
    /// Every voice starts inert on `wave` / `envelope`.
    pub fn with_tables(wave: W, envelope: E) -> Self {
        VoiceEngine {
            voices: [Voice::new(wave, envelope); N],
            envelope_gate: ControlDivider::new(ENVELOPE_DIVIDER),
            modulation_gate: ControlDivider::new(MODULATION_DIVIDER),
            pitches: PitchTable::new(),
        }
    }
}

impl<const N: usize, W, E> VoiceEngine<N, W, E>
where
    W: WaveTable,
    E: EnvelopeTable,
{
    /// Advance the dividers and collect one sample from every voice.
    #[inline(always)]
    pub fn tick(&mut self) -> [i8; N] {
        let flags = self.gates();
        let mut out = [0i8; N];
        for (sample, voice) in out.iter_mut().zip(self.voices.iter_mut()) {
            *sample = voice.sample(flags.update_envelope, flags.apply_modulation);
        }
        out
    }

    #[inline(always)]
    fn gates(&mut self) -> ControlFlags {
        ControlFlags {
            update_envelope: self.envelope_gate.tick(),
            apply_modulation: self.modulation_gate.tick(),
        }
    }

    /// Voice `index`, if it exists.
    pub fn voice(&self, index: usize) -> Option<&Voice<W, E>> {
        self.voices.get(index)
    }

    /// Mutable voice `index`, if it exists.
    pub fn voice_mut(&mut self, index: usize) -> Option<&mut Voice<W, E>> {
        self.voices.get_mut(index)
    }

    /// Voice `index` together with the pitch table, for MIDI triggers.
    pub fn voice_with_pitches(&mut self, index: usize) -> Option<(&mut Voice<W, E>, &PitchTable)> {
        let pitches = &self.pitches;
        self.voices.get_mut(index).map(|voice| (voice, pitches))
    }

    /// All voices.
    pub fn voices(&self) -> &[Voice<W, E>; N] {
        &self.voices
    }

    /// The MIDI pitch table shared by every voice.
    pub fn pitches(&self) -> &PitchTable {
        &self.pitches
    }

    /// Start MIDI `note` on voice `index`. Returns `false` if there is no such voice.
    pub fn trigger_midi(&mut self, index: usize, note: u8) -> bool {
        match self.voices.get_mut(index) {
            Some(voice) => {
                voice.trigger_midi(&self.pitches, note);
                true
            }
            None => false,
        }
    }

    /// `true` while voice `index` is inside its envelope.
    pub fn is_active(&self, index: usize) -> bool {
        self.voices.get(index).is_some_and(|v| v.is_active())
    }
}

impl<const N: usize> VoiceEngine<N> {
    /// Engine with every voice inert on the built-in silent tables.
    pub fn new() -> Self {
        use crate::dsp::tables::{SILENT_ENVELOPE, SILENT_WAVE};
        Self::with_tables(&SILENT_WAVE, &SILENT_ENVELOPE)
    }
}

impl<const N: usize> Default for VoiceEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NO_MODULATION, VOICE_COUNT};
    use crate::dsp::wavetables::{FULL, SQUARE};

    #[test]
    fn fresh_engine_is_silent() {
        let mut engine = VoiceEngine::<VOICE_COUNT>::new();
        for _ in 0..2_000 {
            assert_eq!(engine.tick(), [0; VOICE_COUNT]);
        }
        assert!((0..VOICE_COUNT).all(|i| !engine.is_active(i)));
    }

    #[test]
    fn envelope_advances_every_fourth_tick() {
        let mut engine = VoiceEngine::<VOICE_COUNT>::new();
        let voice = engine.voice_mut(0).unwrap();
        voice.setup(&SQUARE, 440.0, &FULL, 1.0, NO_MODULATION);
        voice.retrigger();

        for n in 1..=40u16 {
            engine.tick();
            let phase = engine.voice(0).unwrap().envelope_phase();
            assert_eq!(phase, (n / 4) * 20, "tick {}", n);
        }
    }

    #[test]
    fn all_voices_advance_each_tick() {
        let mut engine = VoiceEngine::<VOICE_COUNT>::new();
        for i in 0..VOICE_COUNT {
            let v = engine.voice_mut(i).unwrap();
            v.setup(&SQUARE, 110.0 * (i + 1) as f32, &FULL, 1.0, NO_MODULATION);
        }
        for _ in 0..10 {
            engine.tick();
        }
        for i in 0..VOICE_COUNT {
            let v = engine.voice(i).unwrap();
            assert_eq!(v.wave_phase(), v.wave_increment().wrapping_mul(10));
        }
    }

    #[test]
    fn amplitude_cached_between_envelope_updates() {
        let mut engine = VoiceEngine::<VOICE_COUNT>::new();
        let v = engine.voice_mut(2).unwrap();
        v.setup(&SQUARE, 440.0, &FULL, 1.0, NO_MODULATION);
        v.retrigger();

        for _ in 0..3 {
            assert_eq!(engine.tick()[2], 0);
        }
        // fourth tick loads the envelope
        assert_ne!(engine.tick()[2], 0);
        assert_eq!(engine.voice(2).unwrap().amplitude(), 255);
    }

    #[test]
    fn trigger_midi_uses_engine_pitch_table() {
        let mut engine = VoiceEngine::<VOICE_COUNT>::new();
        assert!(engine.trigger_midi(1, 69));
        let expected = engine.pitches().increment(69);
        assert_eq!(engine.voice(1).unwrap().wave_increment(), expected);
        assert!(engine.is_active(1));
        assert!(!engine.trigger_midi(VOICE_COUNT, 69));
    }

    #[test]
    fn out_of_range_voice_is_none() {
        let mut engine = VoiceEngine::<2>::new();
        assert!(engine.voice(2).is_none());
        assert!(engine.voice_mut(5).is_none());
        assert!(!engine.is_active(9));
    }
}
