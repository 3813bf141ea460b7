use crate::constants::NO_MODULATION;
use crate::dsp::pitch::{envelope_increment, pitch_increment};
use crate::dsp::tables::{EnvelopeData, WaveData};

/// Everything [`Voice::setup`](super::Voice::setup) replaces, precomputed.
///
/// Building one does all of the floating-point work, so applying it inside a
/// critical section is a plain field copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceSettings<W = &'static WaveData, E = &'static EnvelopeData> {
    /// Wave table to play.
    pub wave: W,
    /// Envelope table to traverse once per note.
    pub envelope: E,
    /// Baseline wave increment (also loaded as the current increment).
    pub pitch: u16,
    /// Envelope increment per envelope update.
    pub envelope_increment: u16,
    /// Pitch-modulation depth, 0–1023, [`NO_MODULATION`] = none.
    pub modulation: u16,
}

impl<W, E> VoiceSettings<W, E> {
    /// Derive settings from a pitch in Hz and a note length in seconds.
    pub fn new(wave: W, pitch_hz: f32, envelope: E, length_secs: f32, modulation: u16) -> Self {
        VoiceSettings {
            wave,
            envelope,
            pitch: pitch_increment(pitch_hz),
            envelope_increment: envelope_increment(length_secs),
            modulation,
        }
    }

    /// Same as [`new`](Self::new) with no modulation.
    pub fn unmodulated(wave: W, pitch_hz: f32, envelope: E, length_secs: f32) -> Self {
        Self::new(wave, pitch_hz, envelope, length_secs, NO_MODULATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::wavetables::{DECAY, SINE};

    #[test]
    fn settings_derive_increments() {
        let s = VoiceSettings::new(&SINE, 440.0, &DECAY, 1.0, 300);
        assert_eq!(s.pitch, 1802);
        assert_eq!(s.envelope_increment, 20);
        assert_eq!(s.modulation, 300);
    }

    #[test]
    fn unmodulated_uses_neutral_depth() {
        let s = VoiceSettings::unmodulated(&SINE, 220.0, &DECAY, 0.5);
        assert_eq!(s.modulation, NO_MODULATION);
        assert_eq!(s.envelope_increment, 40);
    }
}
