//! Tempo counter for an external sequencer.
//!
//! Counts ticks down at quarter-beat resolution and latches a flag on every
//! rollover. The flag is consumed by [`BeatClock::beat_complete`], so a
//! sequencer polling from the foreground sees each quarter beat exactly once.

use crate::constants::TICK_RATE;

/// Ticks per quarter beat at `bpm`: `(TICK_RATE / (bpm / 60)) / 4`.
///
/// A tempo of 0 saturates to `u32::MAX`.
pub fn countdown_for(bpm: u8) -> u32 {
    // TICK_RATE * 60 / bpm keeps whole-number tempos exact in f32
    ((TICK_RATE as f32 * 60.0 / bpm as f32) / 4.0) as u32
}

/// Quarter-beat countdown with a consume-once completion flag.
#[derive(Debug, Clone, Default)]
pub struct BeatClock {
    countdown_start: u32,
    countdown: u32,
    complete: bool,
}

impl BeatClock {
    /// A clock with no tempo. Until [`set_bpm`](Self::set_bpm) is called the
    /// countdown wraps through the full 32-bit range before its first beat.
    pub const fn new() -> Self {
        BeatClock {
            countdown_start: 0,
            countdown: 0,
            complete: false,
        }
    }

    /// Set the tempo. Restarts the current beat and clears a pending flag.
    pub fn set_bpm(&mut self, bpm: u8) {
        self.countdown_start = countdown_for(bpm);
        self.countdown = self.countdown_start;
        self.complete = false;
    }

    /// Advance one tick.
    #[inline(always)]
    pub fn tick(&mut self) {
        self.countdown = self.countdown.wrapping_sub(1);
        if self.countdown == 0 {
            self.countdown = self.countdown_start;
            self.complete = true;
        }
    }

    /// `true` once per completed quarter beat; reading clears the flag.
    pub fn beat_complete(&mut self) -> bool {
        core::mem::replace(&mut self.complete, false)
    }

    /// Ticks per quarter beat at the current tempo.
    pub fn countdown_start(&self) -> u32 {
        self.countdown_start
    }

    /// Ticks left in the current quarter beat.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }
}
