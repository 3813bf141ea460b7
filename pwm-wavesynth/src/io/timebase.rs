//! Self-advancing tick scheduler.
//!
//! The tick handler is driven by a free-running 16-bit timer with an
//! output-compare channel. Each invocation moves the compare threshold forward
//! by a constant delta relative to the *previous threshold*, not to the
//! current counter value, so handler latency never accumulates into drift.

use crate::constants::{TICK_RATE, TIMER_DELTA, TIMER_FREQUENCY};

/// Output-compare channel of the scheduling timer.
pub trait CompareChannel {
    /// Current compare threshold.
    fn compare(&self) -> u16;

    /// Set the next compare threshold.
    fn set_compare(&mut self, value: u16);
}

/// A bare `u16` acts as a software compare register.
impl CompareChannel for u16 {
    fn compare(&self) -> u16 {
        *self
    }

    fn set_compare(&mut self, value: u16) {
        *self = value;
    }
}

/// Fixed-rate scheduler re-arming a [`CompareChannel`] on every tick.
pub struct Timebase<C> {
    channel: C,
    delta: u16,
    ticks: u32,
}

impl<C: CompareChannel> Timebase<C> {
    /// Schedule ticks at `tick_hz` from a timer counting at `reference_hz`.
    ///
    /// `reference_hz / tick_hz` must be in `1..=65535`. Debug builds assert
    /// this; release builds clamp the delta into that range.
    pub fn new(channel: C, reference_hz: u32, tick_hz: u32) -> Self {
        Timebase {
            channel,
            delta: tick_delta(reference_hz, tick_hz),
            ticks: 0,
        }
    }

    /// 8 kHz ticks from the 2 MHz timer.
    pub fn standard(channel: C) -> Self {
        let tb = Self::new(channel, TIMER_FREQUENCY, TICK_RATE);
        debug_assert_eq!(tb.delta, TIMER_DELTA);
        tb
    }

    /// Move the compare threshold one period forward. Call first thing in
    /// the tick handler.
    #[inline(always)]
    pub fn rearm(&mut self) {
        let next = self.channel.compare().wrapping_add(self.delta);
        self.channel.set_compare(next);
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Timer counts between ticks.
    pub fn delta(&self) -> u16 {
        self.delta
    }

    /// Handler invocations so far (wraps).
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Give the compare channel back.
    pub fn free(self) -> C {
        self.channel
    }
}

/// Compare-register step between ticks, clamped to `1..=u16::MAX`.
fn tick_delta(reference_hz: u32, tick_hz: u32) -> u16 {
    debug_assert!(tick_hz > 0, "tick rate of 0 Hz");
    let ratio = reference_hz.checked_div(tick_hz).unwrap_or(u32::MAX);
    debug_assert!(
        (1..=u16::MAX as u32).contains(&ratio),
        "{} Hz / {} Hz does not fit a 16-bit compare step",
        reference_hz,
        tick_hz
    );
    u16::try_from(ratio).unwrap_or(u16::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_delta_is_250_counts() {
        let tb = Timebase::standard(0u16);
        assert_eq!(tb.delta(), 250);
        assert_eq!(TIMER_DELTA, 250);
    }

    #[test]
    fn rearm_advances_by_delta() {
        let mut tb = Timebase::standard(1_000u16);
        for _ in 0..10 {
            tb.rearm();
        }
        assert_eq!(*tb.channel(), 3_500);
        assert_eq!(tb.ticks(), 10);
    }

    #[test]
    fn rearm_wraps_at_sixteen_bits() {
        let mut tb = Timebase::standard(65_500u16);
        tb.rearm();
        assert_eq!(tb.free(), 214);
    }

    #[test]
    fn one_second_of_ticks_spans_the_reference_clock() {
        // 8000 re-arms move the threshold by 2_000_000 counts mod 2^16
        let mut tb = Timebase::standard(123u16);
        for _ in 0..TICK_RATE {
            tb.rearm();
        }
        assert_eq!(*tb.channel() as u32, (123 + TIMER_FREQUENCY) % 65_536);
        assert_eq!(*tb.channel(), 34_043);
    }

    #[test]
    fn custom_rates() {
        let tb = Timebase::new(0u16, 16_000_000, 44_100);
        assert_eq!(tb.delta(), 362);
        // largest step that still fits the register
        let tb = Timebase::new(0u16, 65_535 * 10, 10);
        assert_eq!(tb.delta(), u16::MAX);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "does not fit a 16-bit compare step")]
    fn oversized_ratio_is_rejected() {
        Timebase::new(0u16, 16_000_000, 100);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "tick rate of 0 Hz")]
    fn zero_tick_rate_is_rejected() {
        Timebase::new(0u16, TIMER_FREQUENCY, 0);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn bad_rates_clamp_in_release() {
        assert_eq!(Timebase::new(0u16, 16_000_000, 100).delta(), u16::MAX);
        assert_eq!(Timebase::new(0u16, TIMER_FREQUENCY, 0).delta(), u16::MAX);
        assert_eq!(Timebase::new(0u16, 100, 8_000).delta(), 1);
    }

    #[test]
    fn channel_mut_moves_the_threshold() {
        let mut tb = Timebase::standard(0u16);
        tb.channel_mut().set_compare(40_000);
        tb.rearm();
        assert_eq!(*tb.channel(), 40_250);
    }
}
