//! A single synthesizer voice: one wavetable oscillator and one envelope.
//!
//! Both are 16-bit phase accumulators. The wave accumulator wraps forever and
//! its high byte indexes the wave table. The envelope accumulator is traversed
//! once per note; its bits 14..7 index the envelope table and bit 15 marks the
//! end of the note. Once that bit is set the voice stays silent until one of
//! the trigger operations rewinds the envelope.

mod settings;

pub use settings::VoiceSettings;

use crate::constants::{ENVELOPE_END, NO_MODULATION};
use crate::dsp::pitch::{direct_pitch_increment, envelope_increment, PitchTable};
use crate::dsp::tables::{
    EnvelopeData, EnvelopeTable, WaveData, WaveTable, SILENT_ENVELOPE, SILENT_WAVE,
};

/// Oscillator and envelope state for one voice.
///
/// `W` and `E` are the table types; the defaults are `'static` references to
/// 256-entry arrays, which is what flash-resident tables look like.
///
/// # Example
/// ```ignore
/// let pitches = PitchTable::new();
/// let mut voice = Voice::silent();
/// voice.setup(&SINE, 440.0, &DECAY, 0.5, NO_MODULATION);
/// voice.trigger_midi(&pitches, 60);
/// let s = voice.sample(true, false);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Voice<W = &'static WaveData, E = &'static EnvelopeData> {
    wave: W,
    /// Wraps mod 2^16; high byte = wave table index.
    wave_phase: u16,
    wave_increment: u16,

    envelope: E,
    /// Bits 14..7 = envelope table index, bit 15 = note ended.
    envelope_phase: u16,
    envelope_increment: u16,

    /// Envelope level last read; 0 while silent.
    amplitude: u8,

    /// Baseline wave increment the modulation hook would bend from.
    pitch: u16,
    /// 0–1023, 512 = none. Stored only; see [`Voice::modulate`].
    modulation: u16,
}

impl<W, E> Voice<W, E>
where
    W: WaveTable,
    E: EnvelopeTable,
{
    /// Create an inert voice on the given tables.
    ///
    /// The envelope starts past its end, so the voice is silent until it is
    /// triggered.
    pub const fn new(wave: W, envelope: E) -> Self {
        Voice {
            wave,
            wave_phase: 0,
            wave_increment: 1000,
            envelope,
            envelope_phase: ENVELOPE_END,
            envelope_increment: 10,
            amplitude: 0,
            pitch: 500,
            modulation: NO_MODULATION,
        }
    }

    /// Produce one sample.
    ///
    /// `update_envelope` advances the envelope by one step; `apply_modulation`
    /// runs the modulation hook. The wave accumulator advances on every call.
    #[inline(always)]
    pub fn sample(&mut self, update_envelope: bool, apply_modulation: bool) -> i8 {
        if update_envelope {
            self.step_envelope();
        }

        if apply_modulation {
            self.modulate();
        }

        self.wave_phase = self.wave_phase.wrapping_add(self.wave_increment);

        if self.amplitude == 0 {
            return 0;
        }

        let raw = self.wave.sample((self.wave_phase >> 8) as u8) as i16;
        ((raw * self.amplitude as i16) >> 8) as i8
    }

    #[inline(always)]
    fn step_envelope(&mut self) {
        if self.envelope_phase & ENVELOPE_END != 0 {
            self.amplitude = 0;
            return;
        }

        // A carry out of 16 bits has necessarily passed the end marker.
        let phase = self.envelope_phase.saturating_add(self.envelope_increment);
        self.envelope_phase = phase;

        let level = self.envelope.level((phase >> 7) as u8);
        self.amplitude = if phase & ENVELOPE_END == 0 { level } else { 0 };
    }

    /// Pitch-modulation hook, run every modulation-divider period.
    ///
    /// Intentionally empty. The bend formula this slot was reserved for was
    /// never validated against a frequency reference, so no arithmetic is
    /// applied until one is derived. `pitch` and `modulation` are kept so a
    /// future formula has its inputs.
    #[inline(always)]
    fn modulate(&mut self) {}

    /// Replace all tunables at once.
    pub fn apply(&mut self, settings: VoiceSettings<W, E>) {
        self.wave = settings.wave;
        self.envelope = settings.envelope;
        self.envelope_increment = settings.envelope_increment;
        self.pitch = settings.pitch;
        self.wave_increment = settings.pitch;
        self.modulation = settings.modulation;
    }

    /// Configure tables, pitch (Hz), note length (seconds) and modulation depth.
    pub fn setup(&mut self, wave: W, pitch_hz: f32, envelope: E, length_secs: f32, modulation: u16) {
        self.apply(VoiceSettings::new(wave, pitch_hz, envelope, length_secs, modulation));
    }

    /// Start a note at MIDI `note`. Only the low 7 bits are used.
    pub fn trigger_midi(&mut self, pitches: &PitchTable, note: u8) {
        let increment = pitches.increment(note);
        self.pitch = increment;
        self.wave_increment = increment;
        self.envelope_phase = 0;
    }

    /// Restart the envelope at the current pitch.
    pub fn retrigger(&mut self) {
        self.envelope_phase = 0;
    }

    /// Start a note at `hz` using the direct-frequency calibration.
    pub fn trigger_pitch(&mut self, hz: u16) {
        self.wave_increment = direct_pitch_increment(hz);
        self.envelope_phase = 0;
    }

    /// Current envelope level (0 = silent).
    #[inline(always)]
    pub fn amplitude(&self) -> u8 {
        self.amplitude
    }

    /// Swap the wave table, keeping everything else.
    pub fn set_wave(&mut self, wave: W) {
        self.wave = wave;
    }

    /// Swap the envelope table, keeping everything else.
    pub fn set_envelope(&mut self, envelope: E) {
        self.envelope = envelope;
    }

    /// Change the note length without touching pitch or tables.
    pub fn set_length(&mut self, length_secs: f32) {
        self.envelope_increment = envelope_increment(length_secs);
    }

    /// Store a modulation depth (0–1023, 512 = none).
    pub fn set_modulation(&mut self, modulation: u16) {
        self.modulation = modulation;
    }

    /// `true` until the envelope passes its end marker.
    pub fn is_active(&self) -> bool {
        self.envelope_phase & ENVELOPE_END == 0
    }

    pub fn wave_table(&self) -> &W {
        &self.wave
    }

    pub fn envelope_table(&self) -> &E {
        &self.envelope
    }

    pub fn wave_phase(&self) -> u16 {
        self.wave_phase
    }

    pub fn wave_increment(&self) -> u16 {
        self.wave_increment
    }

    pub fn envelope_phase(&self) -> u16 {
        self.envelope_phase
    }

    pub fn envelope_increment(&self) -> u16 {
        self.envelope_increment
    }

    pub fn pitch(&self) -> u16 {
        self.pitch
    }

    pub fn modulation(&self) -> u16 {
        self.modulation
    }
}

impl Voice {
    /// Inert voice on the built-in silent tables.
    pub fn silent() -> Self {
        Voice::new(&SILENT_WAVE, &SILENT_ENVELOPE)
    }
}

impl Default for Voice {
    fn default() -> Self {
        Self::silent()
    }
}
