//! Configuration-boundary errors.
//!
//! The tick path never produces these. They are returned by the validated
//! operations on [`SharedSynth`](crate::shared::SharedSynth) and by the
//! [`MidiNote`] / [`Bpm`] constructors.

use core::fmt;

use crate::constants::MIDI_NOTES;

/// Errors reported when configuring the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No [`Synth`](crate::synth::Synth) has been installed in the shared slot yet.
    NotInstalled,
    /// Voice index past the end of the voice array.
    NoSuchVoice(usize),
    /// MIDI note number above 127.
    NoteOutOfRange(u8),
    /// A tempo of 0 BPM.
    ZeroBpm,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInstalled => f.write_str("synth not installed"),
            Error::NoSuchVoice(index) => write!(f, "no voice at index {}", index),
            Error::NoteOutOfRange(note) => write!(f, "MIDI note {} out of range 0-127", note),
            Error::ZeroBpm => f.write_str("tempo must be at least 1 BPM"),
        }
    }
}

impl core::error::Error for Error {}

/// A MIDI note number known to be in `0..=127`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MidiNote(u8);

impl MidiNote {
    /// Concert A (A4, 440 Hz).
    pub const A4: MidiNote = MidiNote(69);

    /// Raw note number.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MidiNote {
    type Error = Error;

    fn try_from(note: u8) -> Result<Self, Self::Error> {
        if (note as usize) < MIDI_NOTES {
            Ok(MidiNote(note))
        } else {
            Err(Error::NoteOutOfRange(note))
        }
    }
}

/// A tempo in beats per minute, known to be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bpm(u8);

impl Bpm {
    /// Raw tempo value.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Bpm {
    type Error = Error;

    fn try_from(bpm: u8) -> Result<Self, Self::Error> {
        if bpm == 0 {
            Err(Error::ZeroBpm)
        } else {
            Ok(Bpm(bpm))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn midi_note_accepts_full_range() {
        assert_eq!(MidiNote::try_from(0).unwrap().get(), 0);
        assert_eq!(MidiNote::try_from(127).unwrap().get(), 127);
        assert_eq!(MidiNote::try_from(128), Err(Error::NoteOutOfRange(128)));
        assert_eq!(MidiNote::try_from(255), Err(Error::NoteOutOfRange(255)));
    }

    #[test]
    fn bpm_rejects_zero() {
        assert_eq!(Bpm::try_from(0), Err(Error::ZeroBpm));
        assert_eq!(Bpm::try_from(1).unwrap().get(), 1);
        assert_eq!(Bpm::try_from(255).unwrap().get(), 255);
    }

    #[test]
    fn display_names_the_problem() {
        assert_eq!(Error::NoSuchVoice(7).to_string(), "no voice at index 7");
        assert_eq!(
            Error::NoteOutOfRange(200).to_string(),
            "MIDI note 200 out of range 0-127"
        );
    }
}
