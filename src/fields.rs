//! Named sub-fields of the 16-byte identifier layout.

use crate::error::Error;

/// The layout families identified by the most significant bits of the
/// clock-seq-hi-and-reserved octet (RFC 4122, section 4.1.1).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Reserved for NCS backward compatibility (`0xx`).
    ReservedNcs,
    /// The layout specified by RFC 4122 (`10x`).
    Rfc4122,
    /// Reserved for Microsoft GUID compatibility (`110`).
    ReservedMicrosoft,
    /// Reserved for future definition (`111`).
    ReservedFuture,
}

/// The generation algorithm recorded in the version nibble.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Version {
    /// Version 1, Gregorian time-based.
    Time = 1,
    /// Version 2, DCE Security with embedded local domain and identifier.
    DceSecurity = 2,
    /// Version 3, MD5 name-based.
    HashMd5 = 3,
    /// Version 4, random.
    Random = 4,
    /// Version 5, SHA-1 name-based.
    HashSha1 = 5,
    /// Version 6, time-based with fields reordered to sort by creation time.
    ReorderedTime = 6,
    /// Version 7, Unix-epoch time-based.
    UnixTime = 7,
    /// Version 8, custom payload.
    Custom = 8,
}

impl Version {
    /// Returns the version number carried in the version nibble.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Maps a version nibble to the version it defines, if any.
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Time),
            2 => Some(Self::DceSecurity),
            3 => Some(Self::HashMd5),
            4 => Some(Self::Random),
            5 => Some(Self::HashSha1),
            6 => Some(Self::ReorderedTime),
            7 => Some(Self::UnixTime),
            8 => Some(Self::Custom),
            _ => None,
        }
    }
}

/// A read-only view of the six RFC 4122 sub-fields of a 16-byte identifier.
///
/// The buffer is big-endian within each sub-field. Accessors are pure
/// functions of the bytes; nothing is cached or mutated.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fields([u8; 16]);

impl Fields {
    /// Creates a view over `bytes`, failing unless it is exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        match <[u8; 16]>::try_from(bytes) {
            Ok(array) => Ok(Self(array)),
            Err(_) => Err(Error::invalid(format!(
                "the byte string must be 16 bytes long; received {} bytes",
                bytes.len()
            ))),
        }
    }

    /// Creates a view over an owned 16-byte array.
    pub const fn from_array(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// The 32-bit `time_low` field (bytes 0-3).
    pub fn time_low(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// The 16-bit `time_mid` field (bytes 4-5).
    pub fn time_mid(&self) -> u16 {
        u16::from_be_bytes([self.0[4], self.0[5]])
    }

    /// The 16-bit `time_hi_and_version` field (bytes 6-7); the top nibble is
    /// the version.
    pub fn time_hi_and_version(&self) -> u16 {
        u16::from_be_bytes([self.0[6], self.0[7]])
    }

    /// The `clock_seq_hi_and_reserved` octet (byte 8); the top bits select
    /// the variant.
    pub const fn clock_seq_hi_and_reserved(&self) -> u8 {
        self.0[8]
    }

    /// The `clock_seq_low` octet (byte 9).
    pub const fn clock_seq_low(&self) -> u8 {
        self.0[9]
    }

    /// The 48-bit `node` field (bytes 10-15).
    pub fn node(&self) -> u64 {
        u64::from_be_bytes([
            0, 0, self.0[10], self.0[11], self.0[12], self.0[13], self.0[14], self.0[15],
        ])
    }

    /// The 14-bit clock sequence assembled from the low six bits of byte 8
    /// and all of byte 9.
    pub fn clock_seq(&self) -> u16 {
        (((self.0[8] & 0x3f) as u16) << 8) | self.0[9] as u16
    }

    /// Lower-case hex rendering of `time_low`.
    pub fn time_low_hex(&self) -> String {
        format!("{:08x}", self.time_low())
    }

    /// Lower-case hex rendering of `time_mid`.
    pub fn time_mid_hex(&self) -> String {
        format!("{:04x}", self.time_mid())
    }

    /// Lower-case hex rendering of `time_hi_and_version`.
    pub fn time_hi_and_version_hex(&self) -> String {
        format!("{:04x}", self.time_hi_and_version())
    }

    /// Lower-case hex rendering of `clock_seq_hi_and_reserved`.
    pub fn clock_seq_hi_and_reserved_hex(&self) -> String {
        format!("{:02x}", self.0[8])
    }

    /// Lower-case hex rendering of `clock_seq_low`.
    pub fn clock_seq_low_hex(&self) -> String {
        format!("{:02x}", self.0[9])
    }

    /// Lower-case hex rendering of `node`.
    pub fn node_hex(&self) -> String {
        format!("{:012x}", self.node())
    }

    /// True if all 128 bits are zero.
    pub fn is_nil(&self) -> bool {
        self.0 == [0x00; 16]
    }

    /// True if all 128 bits are one.
    pub fn is_max(&self) -> bool {
        self.0 == [0xff; 16]
    }

    /// Decodes the variant from the top three bits of byte 8.
    ///
    /// The nil and max identifiers classify as [`Variant::Rfc4122`] by
    /// convention, regardless of their bit patterns.
    pub fn variant(&self) -> Variant {
        if self.is_nil() || self.is_max() {
            return Variant::Rfc4122;
        }

        match self.0[8] >> 5 {
            0b000..=0b011 => Variant::ReservedNcs,
            0b100 | 0b101 => Variant::Rfc4122,
            0b110 => Variant::ReservedMicrosoft,
            _ => Variant::ReservedFuture,
        }
    }

    /// Decodes the version from the top nibble of byte 6.
    ///
    /// The nibble is meaningful under the RFC 4122 variant and, for the
    /// GUID-aware build path, under the Microsoft reserved variant; `None`
    /// otherwise, and always `None` for the nil and max identifiers.
    pub fn version(&self) -> Option<Version> {
        if self.is_nil() || self.is_max() {
            return None;
        }

        match self.variant() {
            Variant::Rfc4122 | Variant::ReservedMicrosoft => Version::from_number(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Extracts the version-specific 60-bit timestamp.
    ///
    /// Versions 1 and 2 assemble `time_hi` (12 bits), `time_mid`, and
    /// `time_low` into a count of 100-nanosecond Gregorian intervals;
    /// version 6 reassembles its reordered layout into the same count;
    /// version 7 yields its 48-bit count of Unix-epoch milliseconds.
    pub fn timestamp(&self) -> Result<u64, Error> {
        match self.version() {
            Some(Version::Time) | Some(Version::DceSecurity) => {
                Ok(((self.time_hi_and_version() as u64 & 0x0fff) << 48)
                    | ((self.time_mid() as u64) << 32)
                    | self.time_low() as u64)
            }
            Some(Version::ReorderedTime) => Ok(((self.time_low() as u64) << 28)
                | ((self.time_mid() as u64) << 12)
                | (self.time_hi_and_version() as u64 & 0x0fff)),
            Some(Version::UnixTime) => {
                Ok(((self.time_low() as u64) << 16) | self.time_mid() as u64)
            }
            _ => Err(Error::UnsupportedOperation(
                "the timestamp field is not defined for this version",
            )),
        }
    }
}

/// Clears the reserved bits of a 16-bit clock sequence and tags it with the
/// RFC 4122 variant.
pub const fn apply_variant(clock_seq: u16) -> u16 {
    clock_seq & 0x3fff | 0x8000
}

/// Masks `time_hi_and_version` down to its 12 timestamp bits and stamps the
/// version nibble.
pub const fn apply_version(time_hi: u16, version: Version) -> u16 {
    (time_hi & 0x0fff) | ((version.number() as u16) << 12)
}

/// Stamps the version nibble and RFC 4122 variant bits onto a byte buffer,
/// leaving the rest untouched.
pub fn apply_version_and_variant(mut bytes: [u8; 16], version: Version) -> [u8; 16] {
    bytes[6] = (bytes[6] & 0x0f) | (version.number() << 4);
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    bytes
}

#[cfg(test)]
mod tests {
    use super::{apply_variant, apply_version, apply_version_and_variant, Fields, Variant, Version};

    fn vector() -> Fields {
        // ff6f8cb0-c57d-11e1-9b21-0800200c9a66
        Fields::from_array([
            0xff, 0x6f, 0x8c, 0xb0, 0xc5, 0x7d, 0x11, 0xe1, 0x9b, 0x21, 0x08, 0x00, 0x20, 0x0c,
            0x9a, 0x66,
        ])
    }

    /// Rejects buffers that are not exactly 16 bytes
    #[test]
    fn rejects_buffers_that_are_not_exactly_16_bytes() {
        assert!(Fields::from_bytes(&[]).is_err());
        assert!(Fields::from_bytes(&[0u8; 15]).is_err());
        assert!(Fields::from_bytes(&[0u8; 17]).is_err());
        assert!(Fields::from_bytes(&[0u8; 16]).is_ok());
    }

    /// Exposes each sub-field of a known vector
    #[test]
    fn exposes_each_sub_field_of_a_known_vector() {
        let fields = vector();
        assert_eq!(fields.time_low(), 0xff6f_8cb0);
        assert_eq!(fields.time_mid(), 0xc57d);
        assert_eq!(fields.time_hi_and_version(), 0x11e1);
        assert_eq!(fields.clock_seq_hi_and_reserved(), 0x9b);
        assert_eq!(fields.clock_seq_low(), 0x21);
        assert_eq!(fields.node(), 0x0800_200c_9a66);
        assert_eq!(fields.clock_seq(), 0x1b21);

        assert_eq!(fields.time_low_hex(), "ff6f8cb0");
        assert_eq!(fields.time_mid_hex(), "c57d");
        assert_eq!(fields.time_hi_and_version_hex(), "11e1");
        assert_eq!(fields.clock_seq_hi_and_reserved_hex(), "9b");
        assert_eq!(fields.clock_seq_low_hex(), "21");
        assert_eq!(fields.node_hex(), "0800200c9a66");
    }

    /// Decodes the variant for every value of the reserved octet
    #[test]
    fn decodes_the_variant_for_every_value_of_the_reserved_octet() {
        for value in 0u8..=0xff {
            let mut bytes = [0u8; 16];
            bytes[0] = 0x01; // keep the buffer away from nil
            bytes[8] = value;
            let expected = match value {
                0x00..=0x7f => Variant::ReservedNcs,
                0x80..=0xbf => Variant::Rfc4122,
                0xc0..=0xdf => Variant::ReservedMicrosoft,
                0xe0..=0xff => Variant::ReservedFuture,
            };
            assert_eq!(Fields::from_array(bytes).variant(), expected, "{value:#04x}");
        }
    }

    /// Classifies nil and max as the RFC 4122 variant with no version
    #[test]
    fn classifies_nil_and_max_as_rfc4122_with_no_version() {
        let nil = Fields::from_array([0x00; 16]);
        assert!(nil.is_nil());
        assert!(!nil.is_max());
        assert_eq!(nil.variant(), Variant::Rfc4122);
        assert_eq!(nil.version(), None);

        let max = Fields::from_array([0xff; 16]);
        assert!(max.is_max());
        assert!(!max.is_nil());
        assert_eq!(max.variant(), Variant::Rfc4122);
        assert_eq!(max.version(), None);
    }

    /// Decodes each defined version nibble under the RFC 4122 variant
    #[test]
    fn decodes_each_defined_version_nibble_under_the_rfc4122_variant() {
        for nibble in 0u8..=0xf {
            let mut bytes = [0u8; 16];
            bytes[6] = nibble << 4;
            bytes[8] = 0x80;
            bytes[15] = 0x01;
            let version = Fields::from_array(bytes).version();
            assert_eq!(version, Version::from_number(nibble), "nibble {nibble}");
        }
    }

    /// Leaves the version absent outside the RFC 4122 and Microsoft variants
    #[test]
    fn leaves_the_version_absent_outside_rfc4122_and_microsoft_variants() {
        let mut bytes = [0u8; 16];
        bytes[6] = 0x40;
        bytes[8] = 0x00; // NCS
        assert_eq!(Fields::from_array(bytes).version(), None);
        bytes[8] = 0xe0; // future
        assert_eq!(Fields::from_array(bytes).version(), None);
        bytes[8] = 0xc0; // Microsoft: nibble still readable for the GUID path
        assert_eq!(Fields::from_array(bytes).version(), Some(Version::Random));
    }

    /// Extracts the Gregorian timestamp from a version 1 vector
    #[test]
    fn extracts_the_gregorian_timestamp_from_a_version_1_vector() {
        assert_eq!(vector().timestamp().unwrap(), 0x01e1_c57d_ff6f_8cb0);
    }

    /// Refuses the timestamp accessor for versions that lack one
    #[test]
    fn refuses_the_timestamp_accessor_for_versions_that_lack_one() {
        let mut bytes = *vector().as_bytes();
        bytes[6] = 0x41; // version 4
        assert!(Fields::from_array(bytes).timestamp().is_err());
    }

    /// Applies version and variant bits without touching other bits
    #[test]
    fn applies_version_and_variant_bits_without_touching_other_bits() {
        assert_eq!(apply_variant(0xffff), 0xbfff);
        assert_eq!(apply_variant(0x0000), 0x8000);
        assert_eq!(apply_version(0xffff, Version::Time), 0x1fff);
        assert_eq!(apply_version(0x0abc, Version::UnixTime), 0x7abc);

        let stamped = apply_version_and_variant([0xff; 16], Version::Random);
        assert_eq!(stamped[6], 0x4f);
        assert_eq!(stamped[8], 0xbf);
        assert_eq!(stamped[0], 0xff);
        assert_eq!(stamped[15], 0xff);
    }
}
