//! Fixed-point DSP support: table contract, reference tables and pitch maths.

pub mod pitch;
pub mod tables;
pub mod wavetables;

pub use pitch::PitchTable;
pub use tables::{EnvelopeData, EnvelopeTable, WaveData, WaveTable};
