//! Identifier factory holding its injected collaborators.
//!
//! The factory is an explicit value passed to call sites; there is no
//! process-wide configurable default. The thread-local convenience
//! functions in the crate root construct one per thread.

use md5::{Digest, Md5};
use rand::rngs::OsRng;
use sha1::Sha1;

use crate::builder::DceDomain;
use crate::error::Error;
use crate::fields::{apply_version_and_variant, Version};
use crate::provider::{
    NodeProvider, RandomNodeProvider, RandomSource, SystemClock, TimeSource,
};
use crate::time;
use crate::uuid::Uuid;

/// Creates identifiers of every defined version from injected random, time,
/// and node collaborators.
///
/// Each time-based construction reads the time source exactly once and
/// draws a fresh random clock sequence when none is supplied (RFC 4122,
/// section 4.2.1.1, without stable storage). Callers that need guaranteed
/// monotonicity across identical clock ticks supply their own clock or
/// clock-sequence values.
#[derive(Clone, Debug)]
pub struct UuidFactory<R = OsRng, T = SystemClock, N = RandomNodeProvider<OsRng>> {
    random: R,
    time: T,
    node: N,
}

impl UuidFactory {
    /// Creates a factory with the operating-system entropy source, the
    /// system clock, and the random node fallback.
    pub fn new() -> Self {
        Self {
            random: OsRng,
            time: SystemClock,
            node: RandomNodeProvider::new(OsRng),
        }
    }
}

impl Default for UuidFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource, T: TimeSource, N: NodeProvider> UuidFactory<R, T, N> {
    /// Creates a factory from explicit collaborators.
    pub fn with_collaborators(random: R, time: T, node: N) -> Self {
        Self { random, time, node }
    }

    /// Returns the nil identifier.
    pub const fn nil(&self) -> Uuid {
        Uuid::NIL
    }

    /// Returns the max identifier.
    pub const fn max(&self) -> Uuid {
        Uuid::MAX
    }

    /// Creates a version 1 (Gregorian time) identifier.
    pub fn uuid1(&mut self) -> Result<Uuid, Error> {
        self.uuid1_with(None, None)
    }

    /// Creates a version 1 identifier with explicit node and clock-sequence
    /// values, each range-checked.
    pub fn uuid1_with(
        &mut self,
        node: Option<u64>,
        clock_seq: Option<u16>,
    ) -> Result<Uuid, Error> {
        let bytes = self.time_based_bytes(node, clock_seq)?;
        Ok(Uuid::from(apply_version_and_variant(bytes, Version::Time)))
    }

    /// Creates a version 2 (DCE Security) identifier for `domain`, embedding
    /// `local_identifier` in place of `time_low`.
    pub fn uuid2(&mut self, domain: DceDomain, local_identifier: u32) -> Result<Uuid, Error> {
        self.uuid2_with(domain, local_identifier, None, None)
    }

    /// Creates a version 2 identifier with explicit node and clock-sequence
    /// values.
    pub fn uuid2_with(
        &mut self,
        domain: DceDomain,
        local_identifier: u32,
        node: Option<u64>,
        clock_seq: Option<u16>,
    ) -> Result<Uuid, Error> {
        let mut bytes = self.time_based_bytes(node, clock_seq)?;
        bytes[0..4].copy_from_slice(&local_identifier.to_be_bytes());
        bytes[9] = domain.number();
        Ok(Uuid::from(apply_version_and_variant(
            bytes,
            Version::DceSecurity,
        )))
    }

    /// Creates a version 3 (MD5 name-based) identifier.
    pub fn uuid3(&self, namespace: Uuid, name: &[u8]) -> Uuid {
        name_based::<Md5>(Version::HashMd5, namespace, name)
    }

    /// Creates a version 4 (random) identifier.
    pub fn uuid4(&mut self) -> Result<Uuid, Error> {
        let mut bytes = [0u8; 16];
        self.random.fill(&mut bytes)?;
        Ok(Uuid::from(apply_version_and_variant(bytes, Version::Random)))
    }

    /// Creates a version 5 (SHA-1 name-based) identifier.
    pub fn uuid5(&self, namespace: Uuid, name: &[u8]) -> Uuid {
        name_based::<Sha1>(Version::HashSha1, namespace, name)
    }

    /// Creates a version 6 (reordered time) identifier, which sorts
    /// byte-wise by creation time.
    pub fn uuid6(&mut self) -> Result<Uuid, Error> {
        self.uuid6_with(None, None)
    }

    /// Creates a version 6 identifier with explicit node and clock-sequence
    /// values.
    ///
    /// Version 6 is version 1 with the time fields permuted, so this builds
    /// the version 1 layout and applies the permutation.
    pub fn uuid6_with(
        &mut self,
        node: Option<u64>,
        clock_seq: Option<u16>,
    ) -> Result<Uuid, Error> {
        let v1 = self.uuid1_with(node, clock_seq)?;
        Ok(Uuid::from(time::v1_to_v6(*v1.as_bytes())))
    }

    /// Creates a version 7 (Unix time) identifier: 48 bits of milliseconds
    /// followed by random bits.
    pub fn uuid7(&mut self) -> Result<Uuid, Error> {
        let ms = time::unix_ms(self.time.now()?)?;
        let mut bytes = [0u8; 16];
        bytes[0..6].copy_from_slice(&ms.to_be_bytes()[2..]);
        self.random.fill(&mut bytes[6..])?;
        Ok(Uuid::from(apply_version_and_variant(
            bytes,
            Version::UnixTime,
        )))
    }

    /// Creates a version 8 (custom) identifier from an arbitrary payload;
    /// only the version and variant bits are imposed.
    pub fn uuid8(&self, payload: [u8; 16]) -> Uuid {
        Uuid::from(apply_version_and_variant(payload, Version::Custom))
    }

    /// Assembles the common time-based layout: Gregorian ticks, clock
    /// sequence, and node, without version or variant bits.
    fn time_based_bytes(
        &mut self,
        node: Option<u64>,
        clock_seq: Option<u16>,
    ) -> Result<[u8; 16], Error> {
        let node = match node {
            Some(n) if n >= 1 << 48 => {
                return Err(Error::invalid(format!(
                    "node value {n:#x} does not fit in 48 bits"
                )))
            }
            Some(n) => n,
            None => {
                let n = self.node.node()?;
                if n >= 1 << 48 {
                    return Err(Error::invalid(
                        "the node provider returned a value wider than 48 bits",
                    ));
                }
                n
            }
        };

        let clock_seq = match clock_seq {
            Some(c) if c >= 1 << 14 => {
                return Err(Error::invalid(format!(
                    "clock sequence {c:#x} does not fit in 14 bits"
                )))
            }
            Some(c) => c,
            None => {
                let mut buffer = [0u8; 2];
                self.random.fill(&mut buffer)?;
                u16::from_be_bytes(buffer) & 0x3fff
            }
        };

        let ticks = time::gregorian_ticks(self.time.now()?)?;
        let (low, mid, hi) = time::split_gregorian(ticks);

        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&low.to_be_bytes());
        bytes[4..6].copy_from_slice(&mid.to_be_bytes());
        bytes[6..8].copy_from_slice(&hi.to_be_bytes());
        bytes[8] = (clock_seq >> 8) as u8;
        bytes[9] = clock_seq as u8;
        bytes[10..16].copy_from_slice(&node.to_be_bytes()[2..]);
        Ok(bytes)
    }
}

/// Hashes the namespace bytes followed by the name and stamps the version
/// and variant bits; the digest is truncated to its leading 16 bytes
/// (RFC 4122, section 4.3).
pub fn name_based<D: Digest>(version: Version, namespace: Uuid, name: &[u8]) -> Uuid {
    let mut hasher = D::new();
    hasher.update(namespace.as_bytes());
    hasher.update(name);
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest.as_slice()[..16]);
    Uuid::from(apply_version_and_variant(bytes, version))
}
