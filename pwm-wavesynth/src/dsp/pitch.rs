//! Pitch and note-length calibration.
//!
//! Two pitch formulas coexist on purpose. The MIDI path goes through a
//! 128-entry table computed once from `440 * 2^((note - 69) / 12)` and scaled
//! by [`PITCH_SAMPLE_RATE`]. The direct-frequency path
//! ([`direct_pitch_increment`]) uses `TICK_RATE / (hz * 256)`. They were
//! calibrated against different timing assumptions and must not be merged
//! until both are re-derived from the target's timer constants.

use crate::constants::{
    ACCUMULATOR_MAX, ENVELOPE_HALF_RANGE, MIDI_NOTES, PITCH_SAMPLE_RATE, TICK_RATE,
};

/// `ln(2) / 12`: one semitone in the exponent of `e`.
const SEMITONE_LN: f32 = 0.057_762_265;

/// Frequency in Hz of MIDI note `note` (equal temperament, A4 = 440 Hz).
pub fn midi_to_frequency(note: u8) -> f32 {
    440.0 * libm::powf(2.0, (note as f32 - 69.0) / 12.0)
}

/// Wave increment for MIDI note `note`, as stored in the pitch table.
pub fn midi_increment(note: u8) -> u16 {
    let hz = 440.0 * libm::expf(SEMITONE_LN * (note as f32 - 69.0));
    pitch_increment(hz)
}

/// Wave increment for a frequency in Hz, on the pitch-table calibration.
///
/// Used by voice setup to derive the baseline pitch.
pub fn pitch_increment(hz: f32) -> u16 {
    (hz / (PITCH_SAMPLE_RATE / ACCUMULATOR_MAX)) as u16
}

/// Wave increment for the direct-frequency trigger: `TICK_RATE / (hz * 256)`.
///
/// A frequency of 0 saturates to `u16::MAX`.
pub fn direct_pitch_increment(hz: u16) -> u16 {
    (TICK_RATE as f32 / (hz as f32 * 256.0)) as u16
}

/// Envelope increment for a note lasting roughly `length_secs` seconds.
///
/// The increment is proportional to `1 / length_secs`. A length of zero
/// saturates to `u16::MAX`, so the note ends on the next envelope update.
pub fn envelope_increment(length_secs: f32) -> u16 {
    ((1.0 / length_secs) / (PITCH_SAMPLE_RATE / (ENVELOPE_HALF_RANGE * 10.0))) as u16
}

/// MIDI note number to wave increment lookup, computed once at start-up.
#[derive(Clone)]
pub struct PitchTable {
    increments: [u16; MIDI_NOTES],
}

impl PitchTable {
    /// Compute all 128 entries.
    pub fn new() -> Self {
        let mut increments = [0u16; MIDI_NOTES];
        for (note, inc) in increments.iter_mut().enumerate() {
            *inc = midi_increment(note as u8);
        }
        PitchTable { increments }
    }

    /// Increment for `note`. Only the low 7 bits of `note` are used.
    #[inline(always)]
    pub fn increment(&self, note: u8) -> u16 {
        self.increments[(note & 0x7F) as usize]
    }

    /// All entries, indexed by MIDI note number.
    pub fn as_slice(&self) -> &[u16; MIDI_NOTES] {
        &self.increments
    }
}

impl Default for PitchTable {
    fn default() -> Self {
        Self::new()
    }
}
