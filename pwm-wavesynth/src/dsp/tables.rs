//! Read-only table contract.
//!
//! Wave tables hold one cycle of a waveform as 256 signed samples and are
//! indexed by the high byte of a voice's wave accumulator. Envelope tables
//! hold 256 unsigned loudness steps indexed by bits 14..7 of the envelope
//! accumulator. Tables are never written by the synthesizer.

use crate::constants::TABLE_LEN;

/// One cycle of a waveform.
pub type WaveData = [i8; TABLE_LEN];

/// Loudness over the lifetime of a note.
pub type EnvelopeData = [u8; TABLE_LEN];

/// Source of wave samples, addressed by an 8-bit phase index.
pub trait WaveTable {
    /// Sample at `index`.
    fn sample(&self, index: u8) -> i8;
}

/// Source of envelope amplitudes, addressed by an 8-bit position.
pub trait EnvelopeTable {
    /// Amplitude at `index` (0 = silent, 255 = full).
    fn level(&self, index: u8) -> u8;
}

impl WaveTable for WaveData {
    #[inline(always)]
    fn sample(&self, index: u8) -> i8 {
        self[index as usize]
    }
}

impl EnvelopeTable for EnvelopeData {
    #[inline(always)]
    fn level(&self, index: u8) -> u8 {
        self[index as usize]
    }
}

impl<T: WaveTable + ?Sized> WaveTable for &T {
    #[inline(always)]
    fn sample(&self, index: u8) -> i8 {
        (**self).sample(index)
    }
}

impl<T: EnvelopeTable + ?Sized> EnvelopeTable for &T {
    #[inline(always)]
    fn level(&self, index: u8) -> u8 {
        (**self).level(index)
    }
}

/// Flat zero waveform. Installed on fresh voices so an unconfigured voice
/// reads valid memory.
pub static SILENT_WAVE: WaveData = [0; TABLE_LEN];

/// Zero envelope. Installed on fresh voices.
pub static SILENT_ENVELOPE: EnvelopeData = [0; TABLE_LEN];
