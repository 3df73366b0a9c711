//! Conversions between clock readings and the version-specific timestamp
//! encodings.

use crate::error::Error;

/// Count of 100-nanosecond intervals between the start of the Gregorian
/// calendar (1582-10-15T00:00:00Z) and the Unix epoch.
pub const GREGORIAN_TO_UNIX_INTERVALS: i128 = 0x01b2_1dd2_1381_4000;

const TICKS_PER_SECOND: i128 = 10_000_000;
const MICROS_PER_SECOND: u32 = 1_000_000;

/// A wall-clock reading as whole seconds and microseconds relative to the
/// Unix epoch. Seconds may be negative for instants before 1970.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Timestamp {
    seconds: i64,
    micros: u32,
}

impl Timestamp {
    /// Creates a reading; fails if `micros` does not fit within one second.
    pub fn new(seconds: i64, micros: u32) -> Result<Self, Error> {
        if micros >= MICROS_PER_SECOND {
            return Err(Error::invalid(format!(
                "microseconds must be less than {MICROS_PER_SECOND}; received {micros}"
            )));
        }
        Ok(Self { seconds, micros })
    }

    /// Whole seconds since (or, if negative, before) the Unix epoch.
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Microsecond fraction, always in `0..1_000_000`.
    pub const fn micros(&self) -> u32 {
        self.micros
    }
}

/// Converts a clock reading to the 60-bit count of 100-nanosecond intervals
/// since 1582-10-15 used by versions 1, 2, and 6.
pub fn gregorian_ticks(timestamp: Timestamp) -> Result<u64, Error> {
    let ticks = timestamp.seconds as i128 * TICKS_PER_SECOND
        + timestamp.micros as i128 * 10
        + GREGORIAN_TO_UNIX_INTERVALS;

    if !(0..1 << 60).contains(&ticks) {
        return Err(Error::invalid(
            "timestamp is outside the range of the 60-bit Gregorian encoding",
        ));
    }
    Ok(ticks as u64)
}

/// Inverse of [`gregorian_ticks`]; exact for the full 60-bit range,
/// including instants before the Unix epoch.
pub fn gregorian_timestamp(ticks: u64) -> Result<Timestamp, Error> {
    if ticks >= 1 << 60 {
        return Err(Error::invalid(
            "the Gregorian timestamp must fit in 60 bits",
        ));
    }

    let since_epoch = ticks as i128 - GREGORIAN_TO_UNIX_INTERVALS;
    let seconds = since_epoch.div_euclid(TICKS_PER_SECOND);
    let micros = since_epoch.rem_euclid(TICKS_PER_SECOND) / 10;
    Timestamp::new(seconds as i64, micros as u32)
}

/// Splits a 60-bit Gregorian tick count into the `time_low`, `time_mid`,
/// and `time_hi` fields of the version 1 layout.
pub fn split_gregorian(ticks: u64) -> (u32, u16, u16) {
    (
        (ticks & 0xffff_ffff) as u32,
        ((ticks >> 32) & 0xffff) as u16,
        ((ticks >> 48) & 0x0fff) as u16,
    )
}

/// Converts a clock reading to the 48-bit count of Unix-epoch milliseconds
/// used by version 7. The microsecond fraction truncates.
pub fn unix_ms(timestamp: Timestamp) -> Result<u64, Error> {
    let ms = timestamp.seconds as i128 * 1000 + (timestamp.micros / 1000) as i128;
    if !(0..1 << 48).contains(&ms) {
        return Err(Error::invalid(
            "timestamp is outside the range of the 48-bit millisecond encoding",
        ));
    }
    Ok(ms as u64)
}

/// Inverse of [`unix_ms`], to millisecond resolution.
pub fn unix_timestamp(ms: u64) -> Result<Timestamp, Error> {
    if ms >= 1 << 48 {
        return Err(Error::invalid(
            "the millisecond timestamp must fit in 48 bits",
        ));
    }
    Timestamp::new((ms / 1000) as i64, (ms % 1000) as u32 * 1000)
}

/// Permutes the time fields of a version 1 buffer into the version 6 order,
/// in which byte-wise comparison sorts identifiers by creation time.
///
/// This is a pure bit permutation; the clock sequence and node bytes pass
/// through untouched, and the version nibble becomes 6.
pub fn v1_to_v6(bytes: [u8; 16]) -> [u8; 16] {
    let ticks = assemble_v1_ticks(&bytes);
    let mut out = bytes;
    out[0..4].copy_from_slice(&(((ticks >> 28) & 0xffff_ffff) as u32).to_be_bytes());
    out[4..6].copy_from_slice(&(((ticks >> 12) & 0xffff) as u16).to_be_bytes());
    out[6] = 0x60 | ((ticks >> 8) & 0x0f) as u8;
    out[7] = ticks as u8;
    out
}

/// Inverse of [`v1_to_v6`]; the version nibble becomes 1.
pub fn v6_to_v1(bytes: [u8; 16]) -> [u8; 16] {
    let ticks = (u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64) << 28
        | (u16::from_be_bytes([bytes[4], bytes[5]]) as u64) << 12
        | (u16::from_be_bytes([bytes[6], bytes[7]]) & 0x0fff) as u64;
    let (low, mid, hi) = split_gregorian(ticks);
    let mut out = bytes;
    out[0..4].copy_from_slice(&low.to_be_bytes());
    out[4..6].copy_from_slice(&mid.to_be_bytes());
    out[6..8].copy_from_slice(&(0x1000 | hi).to_be_bytes());
    out
}

fn assemble_v1_ticks(bytes: &[u8; 16]) -> u64 {
    ((u16::from_be_bytes([bytes[6], bytes[7]]) & 0x0fff) as u64) << 48
        | (u16::from_be_bytes([bytes[4], bytes[5]]) as u64) << 32
        | u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64
}
