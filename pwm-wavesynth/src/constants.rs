/// Tick (audio update) rate in Hz.
pub const TICK_RATE: u32 = 8_000;

/// Frequency of the timer that schedules the tick handler (16 MHz / 8 prescaler).
pub const TIMER_FREQUENCY: u32 = 2_000_000;

/// Compare-register delta added on every tick: `TIMER_FREQUENCY / TICK_RATE`.
pub const TIMER_DELTA: u16 = (TIMER_FREQUENCY / TICK_RATE) as u16;

/// Calibration rate of the MIDI pitch table and note-length maths.
///
/// This is twice [`TICK_RATE`]; the pitch table was tuned against it and is
/// kept as-is so existing song content plays at the pitch it was written for.
pub const PITCH_SAMPLE_RATE: f32 = 16_000.0;

/// Top of the 16-bit accumulator range used by the pitch calibration.
pub const ACCUMULATOR_MAX: f32 = 65_535.0;

/// Half-scale envelope accumulator value used to derive envelope increments.
pub const ENVELOPE_HALF_RANGE: f32 = 32_767.5;

/// Number of voices mixed onto the output.
pub const VOICE_COUNT: usize = 4;

/// Envelope updates happen every `ENVELOPE_DIVIDER` ticks.
pub const ENVELOPE_DIVIDER: u16 = 4;

/// The modulation hook runs every `MODULATION_DIVIDER` ticks.
pub const MODULATION_DIVIDER: u16 = 800;

/// Modulation depth meaning "no pitch modulation" (range 0–1023).
pub const NO_MODULATION: u16 = 512;

/// Envelope accumulator bit marking the end of a note.
pub const ENVELOPE_END: u16 = 0x8000;

/// Entries in a wave or envelope table.
pub const TABLE_LEN: usize = 256;

/// Number of MIDI notes covered by the pitch table.
pub const MIDI_NOTES: usize = 128;

/// Largest duty-cycle value of the 8-bit output register.
pub const DUTY_MAX: u8 = 255;

/// Bias re-centring the signed mix into the unsigned duty range.
pub const DUTY_CENTER: u8 = DUTY_MAX / 2;
