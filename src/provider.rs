//! Injected collaborator interfaces: random bytes, wall-clock time, and
//! node discovery.
//!
//! The core reads these at most once per construction call and performs no
//! retries; a collaborator failure propagates to the caller unchanged.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;

use crate::error::Error;
use crate::time::Timestamp;

/// Minimum random-byte interface consumed by the generators.
pub trait RandomSource {
    /// Fills `dest` with random data.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), Error>;

    /// Returns `n` random bytes.
    fn generate(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        let mut buffer = vec![0u8; n];
        self.fill(&mut buffer)?;
        Ok(buffer)
    }
}

/// Any `rand` generator acts as a random source; entropy failures surface
/// as collaborator errors.
impl<T: RngCore> RandomSource for T {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.try_fill_bytes(dest)
            .map_err(|e| Error::Collaborator(Box::new(e)))
    }
}

/// Wall-clock reading interface.
pub trait TimeSource {
    /// Returns the current instant as seconds and microseconds.
    fn now(&mut self) -> Result<Timestamp, Error>;
}

/// Reads the system real-time clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&mut self) -> Result<Timestamp, Error> {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => Timestamp::new(since.as_secs() as i64, since.subsec_micros()),
            Err(e) => {
                // clock set before the Unix epoch; count backwards
                let before = e.duration();
                let mut seconds = -(before.as_secs() as i64);
                let mut micros = before.subsec_micros();
                if micros > 0 {
                    seconds -= 1;
                    micros = 1_000_000 - micros;
                }
                Timestamp::new(seconds, micros)
            }
        }
    }
}

/// Always returns the same reading; for tests and reproducible generation.
#[derive(Copy, Clone, Debug)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    /// Creates a clock pinned to `timestamp`.
    pub const fn new(timestamp: Timestamp) -> Self {
        Self(timestamp)
    }
}

impl TimeSource for FixedClock {
    fn now(&mut self) -> Result<Timestamp, Error> {
        Ok(self.0)
    }
}

/// 48-bit node value interface.
pub trait NodeProvider {
    /// Returns a node value fitting in 48 bits.
    fn node(&mut self) -> Result<u64, Error>;
}

/// Draws a random node with the multicast bit set, marking the value as not
/// a hardware address (RFC 4122, section 4.5).
///
/// This is the standard fallback when no stable hardware address is
/// available to the process.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomNodeProvider<R>(R);

impl<R: RandomSource> RandomNodeProvider<R> {
    /// Creates a provider drawing from `random`.
    pub fn new(random: R) -> Self {
        Self(random)
    }
}

impl<R: RandomSource> NodeProvider for RandomNodeProvider<R> {
    fn node(&mut self) -> Result<u64, Error> {
        let mut buffer = [0u8; 6];
        self.0.fill(&mut buffer)?;
        buffer[0] |= 0x01;
        Ok(u64::from_be_bytes([
            0, 0, buffer[0], buffer[1], buffer[2], buffer[3], buffer[4], buffer[5],
        ]))
    }
}

/// Supplies a caller-chosen node value.
#[derive(Copy, Clone, Debug)]
pub struct FixedNodeProvider(u64);

impl FixedNodeProvider {
    /// Creates a provider for `node`; fails if the value exceeds 48 bits.
    pub fn new(node: u64) -> Result<Self, Error> {
        if node >= 1 << 48 {
            return Err(Error::invalid(format!(
                "node value {node:#x} does not fit in 48 bits"
            )));
        }
        Ok(Self(node))
    }
}

impl NodeProvider for FixedNodeProvider {
    fn node(&mut self) -> Result<u64, Error> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FixedClock, FixedNodeProvider, NodeProvider, RandomNodeProvider, RandomSource, SystemClock,
        TimeSource,
    };
    use crate::time::Timestamp;

    /// Adapts rand generators through the blanket impl
    #[test]
    fn adapts_rand_generators_through_the_blanket_impl() {
        let mut rng = rand::thread_rng();
        let bytes = RandomSource::generate(&mut rng, 10).unwrap();
        assert_eq!(bytes.len(), 10);

        let mut buffer = [0u8; 32];
        RandomSource::fill(&mut rng, &mut buffer).unwrap();
    }

    /// Reads a plausible system clock value
    #[test]
    fn reads_a_plausible_system_clock_value() {
        let now = SystemClock.now().unwrap();
        // after 2020-01-01 and before 2120-01-01
        assert!(now.seconds() > 1_577_836_800);
        assert!(now.seconds() < 4_733_510_400);
        assert!(now.micros() < 1_000_000);
    }

    /// Repeats the pinned reading from a fixed clock
    #[test]
    fn repeats_the_pinned_reading_from_a_fixed_clock() {
        let ts = Timestamp::new(1_341_368_074, 491_000).unwrap();
        let mut clock = FixedClock::new(ts);
        assert_eq!(clock.now().unwrap(), ts);
        assert_eq!(clock.now().unwrap(), ts);
    }

    /// Sets the multicast bit on random nodes
    #[test]
    fn sets_the_multicast_bit_on_random_nodes() {
        let mut provider = RandomNodeProvider::new(rand::thread_rng());
        for _ in 0..100 {
            let node = provider.node().unwrap();
            assert!(node < 1 << 48);
            assert_eq!(node >> 40 & 0x01, 0x01, "multicast bit");
        }
    }

    /// Validates the range of fixed node values
    #[test]
    fn validates_the_range_of_fixed_node_values() {
        assert!(FixedNodeProvider::new(1 << 48).is_err());
        let mut provider = FixedNodeProvider::new(0x0800_200c_9a66).unwrap();
        assert_eq!(provider.node().unwrap(), 0x0800_200c_9a66);
    }
}
