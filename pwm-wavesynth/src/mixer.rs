//! Four-voice mixer into the 8-bit duty-cycle domain.
//!
//! Voice samples are summed in pairs, the pair sums added, the total shifted
//! right by two and biased by [`DUTY_CENTER`]. There is no clamping: the one
//! reachable overflow (all four voices at -128) wraps to 255, which is what
//! existing content was authored against. Enable the `saturating-mix` feature
//! to clamp instead.

use crate::constants::{DUTY_CENTER, VOICE_COUNT};
#[cfg(feature = "saturating-mix")]
use crate::constants::DUTY_MAX;

/// Stateless mixing stage.
pub struct Mixer;

impl Mixer {
    /// Mix all four voices onto one output: `127 + ((s0 + s1) + (s2 + s3)) >> 2`.
    #[inline(always)]
    pub fn mix(samples: &[i8; VOICE_COUNT]) -> u8 {
        let front = samples[0] as i16 + samples[1] as i16;
        let back = samples[2] as i16 + samples[3] as i16;
        to_duty((front + back) >> 2)
    }

    /// Mix voices 0+1 and 2+3 onto two outputs: `127 + (a + b) >> 1` each.
    #[inline(always)]
    pub fn split(samples: &[i8; VOICE_COUNT]) -> (u8, u8) {
        let front = samples[0] as i16 + samples[1] as i16;
        let back = samples[2] as i16 + samples[3] as i16;
        (to_duty(front >> 1), to_duty(back >> 1))
    }
}

#[cfg(not(feature = "saturating-mix"))]
#[inline(always)]
fn to_duty(mixed: i16) -> u8 {
    DUTY_CENTER.wrapping_add(mixed as u8)
}

#[cfg(feature = "saturating-mix")]
#[inline(always)]
fn to_duty(mixed: i16) -> u8 {
    (DUTY_CENTER as i16 + mixed).clamp(0, DUTY_MAX as i16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_sits_at_center() {
        assert_eq!(Mixer::mix(&[0; 4]), 127);
        assert_eq!(Mixer::split(&[0; 4]), (127, 127));
    }

    #[test]
    fn equal_samples_offset_center() {
        for s in [-100i8, -1, 1, 50, 126, 127] {
            assert_eq!(Mixer::mix(&[s; 4]) as i16, 127 + s as i16, "sample {}", s);
        }
    }

    #[test]
    fn mix_is_shifted_sum() {
        let cases: [[i8; 4]; 5] = [
            [10, 20, 30, 40],
            [-10, 3, 7, -1],
            [127, -128, 5, 0],
            [-3, -3, -3, -2],
            [100, 100, -50, 1],
        ];
        for s in cases {
            let sum: i16 = s.iter().map(|&v| v as i16).sum();
            assert_eq!(Mixer::mix(&s) as i16, 127 + (sum >> 2), "samples {:?}", s);
        }
    }

    #[test]
    fn shift_rounds_toward_negative_infinity() {
        // -11 >> 2 == -3
        assert_eq!(Mixer::mix(&[-5, -6, 0, 0]), 124);
    }

    #[test]
    fn split_mixes_pairs() {
        assert_eq!(Mixer::split(&[20, 40, -20, -40]), (157, 97));
        assert_eq!(Mixer::split(&[127, 127, -100, -100]), (254, 27));
    }

    #[cfg(not(feature = "saturating-mix"))]
    #[test]
    fn floor_wraps_around() {
        assert_eq!(Mixer::mix(&[-128; 4]), 255);
    }

    #[cfg(feature = "saturating-mix")]
    #[test]
    fn floor_clamps() {
        assert_eq!(Mixer::mix(&[-128; 4]), 0);
        assert_eq!(Mixer::split(&[-128, -128, 0, 0]), (0, 127));
    }
}
