//! Hardware-facing edges of the tick pipeline.
//!
//! | Item | Role |
//! |------|------|
//! | [`Timebase`] | Re-arms the scheduling timer's compare channel every tick |
//! | [`OutputStage`] | Writes mixed duty values to one or two PWM channels |
//!
//! Timer and PWM bring-up (prescalers, pin muxing) is left to the board
//! support crate; this module only needs the [`CompareChannel`] and
//! [`embedded_hal::pwm::SetDutyCycle`] handles.

pub mod output;
pub mod timebase;

pub use output::OutputStage;
pub use timebase::{CompareChannel, Timebase};
