//! PWM output stage.
//!
//! Routes mixed duty values to one or two hardware PWM channels through the
//! `embedded-hal` [`SetDutyCycle`] trait. Duty values are computed on an 8-bit
//! scale and rescaled to whatever resolution the channel reports.

use embedded_hal::pwm::SetDutyCycle;

use crate::constants::{DUTY_CENTER, DUTY_MAX, VOICE_COUNT};
use crate::mixer::Mixer;

/// Where the mixed voices go.
pub enum OutputStage<P> {
    /// All four voices on one channel.
    Mono(P),
    /// Voices 0+1 on the first channel, 2+3 on the second.
    Split(P, P),
}

impl<P: SetDutyCycle> OutputStage<P> {
    /// Mix one tick of voice samples and write the duty register(s).
    #[inline(always)]
    pub fn write(&mut self, samples: &[i8; VOICE_COUNT]) -> Result<(), P::Error> {
        match self {
            OutputStage::Mono(pwm) => write_duty(pwm, Mixer::mix(samples)),
            OutputStage::Split(a, b) => {
                let (front, back) = Mixer::split(samples);
                write_duty(a, front)?;
                write_duty(b, back)
            }
        }
    }

    /// Park every channel at the centre of its range (silence).
    pub fn center(&mut self) -> Result<(), P::Error> {
        match self {
            OutputStage::Mono(pwm) => write_duty(pwm, DUTY_CENTER),
            OutputStage::Split(a, b) => {
                write_duty(a, DUTY_CENTER)?;
                write_duty(b, DUTY_CENTER)
            }
        }
    }

    /// Number of hardware channels driven.
    pub fn channels(&self) -> usize {
        match self {
            OutputStage::Mono(_) => 1,
            OutputStage::Split(..) => 2,
        }
    }
}

#[inline(always)]
fn write_duty<P: SetDutyCycle>(pwm: &mut P, duty: u8) -> Result<(), P::Error> {
    pwm.set_duty_cycle_fraction(duty as u16, DUTY_MAX as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FaultyPwm, RecordingPwm};

    #[test]
    fn mono_writes_mixed_value() {
        let mut stage = OutputStage::Mono(RecordingPwm::new(255));
        stage.write(&[4, 4, 4, 4]).unwrap();
        stage.write(&[0, 0, 0, 0]).unwrap();
        let OutputStage::Mono(pwm) = stage else { unreachable!() };
        assert_eq!(pwm.history, [131, 127]);
    }

    #[test]
    fn split_writes_both_channels() {
        let mut stage = OutputStage::Split(RecordingPwm::new(255), RecordingPwm::new(255));
        assert_eq!(stage.channels(), 2);
        stage.write(&[20, 40, -20, -40]).unwrap();
        let OutputStage::Split(a, b) = stage else { unreachable!() };
        assert_eq!(a.history, [157]);
        assert_eq!(b.history, [97]);
    }

    #[test]
    fn duty_rescaled_to_channel_resolution() {
        let mut stage = OutputStage::Mono(RecordingPwm::new(1023));
        stage.center().unwrap();
        stage.write(&[127; 4]).unwrap();
        let OutputStage::Mono(pwm) = stage else { unreachable!() };
        // 127 * 1023 / 255 and 254 * 1023 / 255
        assert_eq!(pwm.history, [509, 1018]);
    }

    #[test]
    fn channel_error_propagates() {
        let mut stage = OutputStage::Mono(FaultyPwm);
        assert!(stage.write(&[0; 4]).is_err());
        assert!(stage.center().is_err());
    }
}
