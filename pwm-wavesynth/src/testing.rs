//! Hardware doubles for host tests.

use std::vec::Vec;

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};

/// PWM channel that records every duty value written to it.
#[derive(Debug, Default)]
pub struct RecordingPwm {
    pub max: u16,
    pub history: Vec<u16>,
}

impl RecordingPwm {
    pub fn new(max: u16) -> Self {
        RecordingPwm {
            max,
            history: Vec::new(),
        }
    }
}

impl ErrorType for RecordingPwm {
    type Error = core::convert::Infallible;
}

impl SetDutyCycle for RecordingPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        assert!(duty <= self.max, "duty {} above max {}", duty, self.max);
        self.history.push(duty);
        Ok(())
    }
}

/// PWM channel whose writes always fail.
#[derive(Debug)]
pub struct FaultyPwm;

#[derive(Debug, PartialEq, Eq)]
pub struct PwmFault;

impl embedded_hal::pwm::Error for PwmFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for FaultyPwm {
    type Error = PwmFault;
}

impl SetDutyCycle for FaultyPwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        Err(PwmFault)
    }
}
