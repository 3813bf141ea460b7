//! Sharing one [`Synth`] between the tick handler and foreground code.
//!
//! The synth lives in a [`critical_section::Mutex`]. The tick handler and
//! every configuration call enter a critical section for exactly as long as
//! they touch synth state. On a single-core MCU that means interrupts are
//! masked, so the handler is never preempted mid-tick and never observes a
//! half-written voice, and it never waits on a lock either.
//!
//! Floating-point work (pitch and length maths) happens before the critical
//! section is entered; inside it only precomputed fields are copied.
//!
//! # Example
//! ```ignore
//! static SYNTH: SharedSynth<Pwm, Ocr1a> = SharedSynth::new();
//!
//! // start-up
//! SYNTH.install(Synth::new(pwm, ocr1a));
//! SYNTH.set_bpm(120)?;
//! SYNTH.setup_voice(0, VoiceSettings::unmodulated(&SINE, 440.0, &DECAY, 0.5))?;
//!
//! // timer compare interrupt
//! let _ = SYNTH.on_tick();
//!
//! // main loop
//! if SYNTH.beat_complete() {
//!     SYNTH.trigger_midi(0, next_note())?;
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::pwm::SetDutyCycle;

use crate::dsp::pitch::{direct_pitch_increment, PitchTable};
use crate::error::{Bpm, Error, MidiNote};
use crate::io::CompareChannel;
use crate::synth::Synth;
use crate::voice::{Voice, VoiceSettings};

/// Interrupt-safe slot holding the device's single [`Synth`].
pub struct SharedSynth<P, C> {
    slot: Mutex<RefCell<Option<Synth<P, C>>>>,
}

impl<P, C> SharedSynth<P, C> {
    /// An empty slot, usable in a `static`.
    pub const fn new() -> Self {
        SharedSynth {
            slot: Mutex::new(RefCell::new(None)),
        }
    }
}

impl<P, C> SharedSynth<P, C>
where
    P: SetDutyCycle,
    C: CompareChannel,
{
    /// Put `synth` in the slot, returning whatever was there.
    pub fn install(&self, synth: Synth<P, C>) -> Option<Synth<P, C>> {
        let previous = critical_section::with(|cs| self.slot.borrow_ref_mut(cs).replace(synth));
        log::info!(
            "synth installed (replaced existing: {})",
            previous.is_some()
        );
        previous
    }

    /// Remove the synth, leaving the slot empty. Ticks become no-ops.
    pub fn take(&self) -> Option<Synth<P, C>> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).take())
    }

    /// Tick handler entry point. Does nothing until a synth is installed.
    #[inline(always)]
    pub fn on_tick(&self) -> Result<(), P::Error> {
        critical_section::with(|cs| match self.slot.borrow_ref_mut(cs).as_mut() {
            Some(synth) => synth.on_tick(),
            None => Ok(()),
        })
    }

    /// Run `f` on the synth inside one critical section.
    ///
    /// Keep `f` short: the tick handler is held off until it returns.
    pub fn configure<R>(&self, f: impl FnOnce(&mut Synth<P, C>) -> R) -> Result<R, Error> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).as_mut().map(f))
            .ok_or(Error::NotInstalled)
    }

    fn with_voice<R>(
        &self,
        index: usize,
        f: impl FnOnce(&mut Voice, &PitchTable) -> R,
    ) -> Result<R, Error> {
        let result = self
            .configure(|synth| {
                synth
                    .engine_mut()
                    .voice_with_pitches(index)
                    .map(|(voice, pitches)| f(voice, pitches))
            })
            .and_then(|found| found.ok_or(Error::NoSuchVoice(index)));
        if let Err(e) = &result {
            log::warn!("voice {} not configured: {}", index, e);
        }
        result
    }

    /// Replace every tunable of voice `index` atomically.
    pub fn setup_voice(&self, index: usize, settings: VoiceSettings) -> Result<(), Error> {
        self.with_voice(index, |voice, _| voice.apply(settings))?;
        log::debug!(
            "voice {} setup: pitch increment {}, envelope increment {}, modulation {}",
            index,
            settings.pitch,
            settings.envelope_increment,
            settings.modulation
        );
        Ok(())
    }

    /// Start MIDI `note` (0–127) on voice `index`.
    pub fn trigger_midi(&self, index: usize, note: u8) -> Result<(), Error> {
        let note = MidiNote::try_from(note).inspect_err(|e| log::warn!("{}", e))?;
        self.trigger_note(index, note)
    }

    /// Start a pre-validated MIDI note on voice `index`.
    pub fn trigger_note(&self, index: usize, note: MidiNote) -> Result<(), Error> {
        self.with_voice(index, |voice, pitches| voice.trigger_midi(pitches, note.get()))?;
        log::trace!("voice {} note {}", index, note.get());
        Ok(())
    }

    /// Restart voice `index` at its current pitch.
    pub fn retrigger(&self, index: usize) -> Result<(), Error> {
        self.with_voice(index, |voice, _| voice.retrigger())
    }

    /// Start voice `index` at `hz` on the direct-frequency calibration.
    pub fn trigger_pitch(&self, index: usize, hz: u16) -> Result<(), Error> {
        self.with_voice(index, |voice, _| voice.trigger_pitch(hz))?;
        log::trace!(
            "voice {} pitch {} Hz (increment {})",
            index,
            hz,
            direct_pitch_increment(hz)
        );
        Ok(())
    }

    /// Envelope level of voice `index`, for meters and displays.
    pub fn amplitude(&self, index: usize) -> Result<u8, Error> {
        self.with_voice(index, |voice, _| voice.amplitude())
    }

    /// `true` while voice `index` is inside its envelope.
    pub fn is_active(&self, index: usize) -> Result<bool, Error> {
        self.with_voice(index, |voice, _| voice.is_active())
    }

    /// Set the tempo (1–255 BPM).
    pub fn set_bpm(&self, bpm: u8) -> Result<(), Error> {
        let bpm = Bpm::try_from(bpm).inspect_err(|e| log::warn!("{}", e))?;
        let start = self.configure(|synth| {
            synth.set_bpm(bpm.get());
            synth.beat_clock().countdown_start()
        })?;
        log::debug!("tempo {} BPM, {} ticks per quarter beat", bpm.get(), start);
        Ok(())
    }

    /// Consume the quarter-beat flag. `false` when no synth is installed.
    pub fn beat_complete(&self) -> bool {
        self.configure(|synth| synth.beat_complete()).unwrap_or(false)
    }
}

impl<P, C> Default for SharedSynth<P, C> {
    fn default() -> Self {
        Self::new()
    }
}
