//! The complete per-device synthesizer.
//!
//! [`Synth`] owns the voice engine, the output stage, the beat clock and the
//! timebase. Its [`on_tick`](Synth::on_tick) is the whole tick handler:
//!
//! ```text
//! Timebase::rearm ─► VoiceEngine::tick ─► Mixer ─► PWM duty ─► BeatClock::tick
//! ```
//!
//! `Synth` itself does no locking. Share it between the tick handler and
//! foreground code through [`SharedSynth`](crate::shared::SharedSynth).

use embedded_hal::pwm::SetDutyCycle;

use crate::beat::BeatClock;
use crate::constants::VOICE_COUNT;
use crate::engine::VoiceEngine;
use crate::io::{CompareChannel, OutputStage, Timebase};
use crate::voice::Voice;

/// Four voices, one tempo clock, one or two PWM outputs, one timer channel.
pub struct Synth<P, C> {
    engine: VoiceEngine<VOICE_COUNT>,
    output: OutputStage<P>,
    beat: BeatClock,
    timebase: Timebase<C>,
}

impl<P, C> Synth<P, C>
where
    P: SetDutyCycle,
    C: CompareChannel,
{
    /// All voices mixed onto `pwm`, scheduled from `compare` at 8 kHz.
    pub fn new(pwm: P, compare: C) -> Self {
        Self::with_output(OutputStage::Mono(pwm), Timebase::standard(compare))
    }

    /// Voices 0+1 on `front`, 2+3 on `back`.
    pub fn new_split(front: P, back: P, compare: C) -> Self {
        Self::with_output(OutputStage::Split(front, back), Timebase::standard(compare))
    }

    /// Assemble from an explicit output stage and timebase.
    pub fn with_output(output: OutputStage<P>, timebase: Timebase<C>) -> Self {
        Synth {
            engine: VoiceEngine::new(),
            output,
            beat: BeatClock::new(),
            timebase,
        }
    }

    /// The tick handler. Bounded, allocation-free, never blocks.
    ///
    /// A PWM write error is returned after the beat clock has advanced, so
    /// tempo keeps running even when the output glitches.
    #[inline(always)]
    pub fn on_tick(&mut self) -> Result<(), P::Error> {
        self.timebase.rearm();
        let samples = self.engine.tick();
        let written = self.output.write(&samples);
        self.beat.tick();
        written
    }

    /// Park the output at silence.
    pub fn center_output(&mut self) -> Result<(), P::Error> {
        self.output.center()
    }

    pub fn engine(&self) -> &VoiceEngine<VOICE_COUNT> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut VoiceEngine<VOICE_COUNT> {
        &mut self.engine
    }

    /// Voice `index`, if it exists.
    pub fn voice_mut(&mut self, index: usize) -> Option<&mut Voice> {
        self.engine.voice_mut(index)
    }

    /// Start MIDI `note` on voice `index`. Returns `false` if there is no such voice.
    pub fn trigger_midi(&mut self, index: usize, note: u8) -> bool {
        self.engine.trigger_midi(index, note)
    }

    /// Set the tempo; restarts the current beat.
    pub fn set_bpm(&mut self, bpm: u8) {
        self.beat.set_bpm(bpm);
    }

    /// Consume the quarter-beat flag.
    pub fn beat_complete(&mut self) -> bool {
        self.beat.beat_complete()
    }

    pub fn beat_clock(&self) -> &BeatClock {
        &self.beat
    }

    pub fn timebase(&self) -> &Timebase<C> {
        &self.timebase
    }

    pub fn output(&self) -> &OutputStage<P> {
        &self.output
    }

    /// Tear down, returning the hardware handles.
    pub fn release(self) -> (OutputStage<P>, C) {
        (self.output, self.timebase.free())
    }
}
