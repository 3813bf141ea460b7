//! Reference wave and envelope tables.
//!
//! Built at compile time with integer maths so they can live in flash.
//! Applications are expected to author their own tables; these cover the
//! classic shapes and are what the tests and demos play.

use super::tables::{EnvelopeData, WaveData};
use crate::constants::TABLE_LEN;

const fn make_sine() -> WaveData {
    let mut table = [0i8; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        // Bhaskara approximation over each half cycle, t in 0..128.
        let t = (i & 127) as i32;
        let p = t * (128 - t);
        let v = (127 * 4 * p) / (20_480 - p);
        table[i] = if i < 128 { v as i8 } else { -v as i8 };
        i += 1;
    }
    table
}

const fn make_square() -> WaveData {
    let mut table = [0i8; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = if i < 128 { 127 } else { -127 };
        i += 1;
    }
    table
}

const fn make_saw() -> WaveData {
    let mut table = [0i8; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = (i as i16 - 128) as i8;
        i += 1;
    }
    table
}

const fn make_triangle() -> WaveData {
    let mut table = [0i8; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        let x = i as i16;
        let v = if x < 64 {
            2 * x
        } else if x < 192 {
            255 - 2 * x
        } else {
            2 * x - 512
        };
        table[i] = v as i8;
        i += 1;
    }
    table
}

/// Exponential decay: each step keeps `keep / 256` of the previous level.
const fn make_decay(keep: u32) -> EnvelopeData {
    let mut table = [0u8; TABLE_LEN];
    let mut level: u32 = 255 << 8;
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = (level >> 8) as u8;
        level = (level * keep) >> 8;
        i += 1;
    }
    table
}

const fn make_organ() -> EnvelopeData {
    let mut table = [0u8; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = if i < 16 {
            (i * 17) as u8
        } else if i < 224 {
            255
        } else {
            ((255 - i) * 8) as u8
        };
        i += 1;
    }
    table
}

/// One cycle of a sine wave.
pub static SINE: WaveData = make_sine();

/// Square wave, 50% duty.
pub static SQUARE: WaveData = make_square();

/// Rising sawtooth.
pub static SAW: WaveData = make_saw();

/// Triangle wave.
pub static TRIANGLE: WaveData = make_triangle();

/// Slow exponential decay, plucked-string character.
pub static DECAY: EnvelopeData = make_decay(251);

/// Fast exponential decay for drums and clicks.
pub static PERCUSSIVE: EnvelopeData = make_decay(232);

/// Short attack, long sustain, short release.
pub static ORGAN: EnvelopeData = make_organ();

/// Constant full level.
pub static FULL: EnvelopeData = [255; TABLE_LEN];
