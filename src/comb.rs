//! Sequential ("COMB") identifier byte-sequence generator.
//!
//! A COMB concatenates random filler with a coarse timestamp so that
//! generated sequences sort approximately by creation time under the chosen
//! layout's ordering.

use crate::error::Error;
use crate::provider::{RandomSource, TimeSource};
use crate::time::Timestamp;

/// Width of the embedded timestamp, in bytes.
pub const TIMESTAMP_BYTES: usize = 6;

/// Placement of the timestamp within a generated sequence.
///
/// The two placements are distinct, mutually incompatible wire layouts;
/// consumers must decode with the matching codec.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum CombLayout {
    /// Timestamp in the leading bytes; raw byte order sorts by creation
    /// time.
    TimestampFirst,
    /// Timestamp in the trailing bytes (the classic COMB wire layout).
    #[default]
    TimestampLast,
}

/// Produces time-ordered random byte sequences from injected random and
/// time collaborators.
#[derive(Clone, Debug)]
pub struct CombGenerator<R, T> {
    random: R,
    time: T,
    layout: CombLayout,
}

impl<R: RandomSource, T: TimeSource> CombGenerator<R, T> {
    /// Creates a generator with the given collaborators and layout.
    pub fn new(random: R, time: T, layout: CombLayout) -> Self {
        Self {
            random,
            time,
            layout,
        }
    }

    /// Returns `total_len` bytes of random filler combined with a 6-byte
    /// timestamp of 0.00001-second resolution, placed per the layout.
    ///
    /// Reads the time source exactly once. Fails if `total_len` cannot hold
    /// the timestamp.
    pub fn generate(&mut self, total_len: usize) -> Result<Vec<u8>, Error> {
        if total_len < TIMESTAMP_BYTES {
            return Err(Error::invalid(format!(
                "length must be at least {TIMESTAMP_BYTES} bytes; received {total_len}"
            )));
        }

        let random = self.random.generate(total_len - TIMESTAMP_BYTES)?;
        let stamp = timestamp_bytes(self.time.now()?)?;

        let mut out = Vec::with_capacity(total_len);
        match self.layout {
            CombLayout::TimestampFirst => {
                out.extend_from_slice(&stamp);
                out.extend_from_slice(&random);
            }
            CombLayout::TimestampLast => {
                out.extend_from_slice(&random);
                out.extend_from_slice(&stamp);
            }
        }
        Ok(out)
    }
}

/// Renders a reading as a big-endian count of 0.00001-second ticks,
/// truncated to the trailing 6 bytes.
fn timestamp_bytes(now: Timestamp) -> Result<[u8; 6], Error> {
    let ticks = now.seconds() as i128 * 100_000 + (now.micros() / 10) as i128;
    if ticks < 0 {
        return Err(Error::invalid(
            "the time source returned a pre-epoch reading",
        ));
    }

    let truncated = (ticks as u128 & 0xffff_ffff_ffff) as u64;
    let be = truncated.to_be_bytes();
    Ok([be[2], be[3], be[4], be[5], be[6], be[7]])
}

#[cfg(test)]
mod tests {
    use super::{CombGenerator, CombLayout, TIMESTAMP_BYTES};
    use crate::error::Error;
    use crate::provider::{FixedClock, RandomSource};
    use crate::time::Timestamp;

    struct CountingRandom(u8);

    impl RandomSource for CountingRandom {
        fn fill(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            for byte in dest {
                *byte = self.0;
                self.0 = self.0.wrapping_add(1);
            }
            Ok(())
        }
    }

    fn clock(seconds: i64, micros: u32) -> FixedClock {
        FixedClock::new(Timestamp::new(seconds, micros).unwrap())
    }

    /// Rejects lengths shorter than the timestamp width
    #[test]
    fn rejects_lengths_shorter_than_the_timestamp_width() {
        let mut g = CombGenerator::new(CountingRandom(0), clock(1, 0), CombLayout::default());
        for n in 0..TIMESTAMP_BYTES {
            assert!(g.generate(n).is_err(), "{n}");
        }
        assert_eq!(g.generate(TIMESTAMP_BYTES).unwrap().len(), TIMESTAMP_BYTES);
    }

    /// Places the timestamp last in the classic layout
    #[test]
    fn places_the_timestamp_last_in_the_classic_layout() {
        let mut g = CombGenerator::new(
            CountingRandom(0),
            clock(1_341_368_074, 491_605),
            CombLayout::TimestampLast,
        );
        let bytes = g.generate(16).unwrap();
        assert_eq!(&bytes[..10], &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        // 1341368074 * 100000 + 49160 = 0x79ff28c26248
        assert_eq!(&bytes[10..], &[0x79, 0xff, 0x28, 0xc2, 0x62, 0x48]);
    }

    /// Places the timestamp first in the sortable layout
    #[test]
    fn places_the_timestamp_first_in_the_sortable_layout() {
        let mut g = CombGenerator::new(
            CountingRandom(0),
            clock(1_341_368_074, 491_605),
            CombLayout::TimestampFirst,
        );
        let bytes = g.generate(16).unwrap();
        assert_eq!(&bytes[..6], &[0x79, 0xff, 0x28, 0xc2, 0x62, 0x48]);
        assert_eq!(&bytes[6..], &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    /// Generates strictly increasing sequences across increasing ticks
    #[test]
    fn generates_strictly_increasing_sequences_across_increasing_ticks() {
        let mut prev: Option<Vec<u8>> = None;
        for step in 0..1_000u32 {
            let mut g = CombGenerator::new(
                rand::thread_rng(),
                clock(1_600_000_000 + step as i64, (step % 100_000) * 10),
                CombLayout::TimestampFirst,
            );
            let curr = g.generate(16).unwrap();
            if let Some(prev) = prev {
                assert!(prev < curr);
            }
            prev = Some(curr);
        }
    }

    /// Rejects pre-epoch clock readings
    #[test]
    fn rejects_pre_epoch_clock_readings() {
        let mut g = CombGenerator::new(CountingRandom(0), clock(-1, 0), CombLayout::default());
        assert!(g.generate(16).is_err());
    }
}
