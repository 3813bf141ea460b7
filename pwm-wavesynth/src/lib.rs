//! # pwm-wavesynth
//!
//! A `no_std`, zero-allocation four-voice wavetable synthesizer for small
//! microcontrollers. One timer interrupt per sample drives every voice, mixes
//! them to an unsigned 8-bit value and writes it as a PWM duty cycle; an RC
//! filter on the pin turns that into audio.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Tables | [`dsp`] | Wave/envelope table traits, reference tables, pitch maths |
//! | Voice | [`voice`] | Phase-accumulator oscillator plus one-shot envelope |
//! | Engine | [`engine`] | Voice array and control-rate dividers |
//! | Mix | [`mixer`] | Four signed samples to one (or two) duty values |
//! | Tempo | [`beat`] | Quarter-beat countdown and latch |
//! | I/O | [`io`] | Timer compare re-arm, PWM output stage |
//! | Device | [`synth`] / [`shared`] | Tick handler and interrupt-safe sharing |
//!
//! ## Quick start
//!
//! ```ignore
//! use pwm_wavesynth::dsp::wavetables::{DECAY, SINE};
//! use pwm_wavesynth::{SharedSynth, Synth, VoiceSettings};
//!
//! static SYNTH: SharedSynth<MyPwm, MyCompare> = SharedSynth::new();
//!
//! SYNTH.install(Synth::new(pwm, compare));
//! SYNTH.set_bpm(120)?;
//! SYNTH.setup_voice(0, VoiceSettings::unmodulated(&SINE, 440.0, &DECAY, 0.5))?;
//!
//! // timer compare interrupt, 8 kHz:
//! let _ = SYNTH.on_tick();
//!
//! // main loop:
//! if SYNTH.beat_complete() {
//!     SYNTH.trigger_midi(0, 60)?;
//! }
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `saturating-mix` | no | Clamp the mixed value to 0..=255 instead of wrapping |
//!
//! ## Audio parameters
//!
//! - **Tick rate:** 8 kHz ([`constants::TICK_RATE`])
//! - **Timer reference:** 2 MHz, compare step 250 ([`constants::TIMER_DELTA`])
//! - **Sample format:** `i8` per voice, `u8` duty out
//! - **Voices:** 4 ([`constants::VOICE_COUNT`])

#![no_std]

#[cfg(test)]
extern crate std;

pub mod constants;
pub mod error;
pub mod dsp;
pub mod voice;
pub mod engine;
pub mod mixer;
pub mod beat;
pub mod io;
pub mod synth;
pub mod shared;

#[cfg(test)]
mod testing;


pub use beat::BeatClock;
pub use engine::VoiceEngine;
pub use error::{Bpm, Error, MidiNote};
pub use mixer::Mixer;
pub use shared::SharedSynth;
pub use synth::Synth;
pub use voice::{Voice, VoiceSettings};
