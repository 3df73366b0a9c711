//! Classification of 16-byte buffers into tagged, version-checked
//! identifier values.

use crate::error::Error;
use crate::fields::{Fields, Variant, Version};
use crate::time::{self, Timestamp};
use crate::uuid::Uuid;

/// DCE Security local domains embedded in version 2 identifiers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum DceDomain {
    /// POSIX UID domain.
    Person = 0,
    /// POSIX GID domain.
    Group = 1,
    /// Organization domain.
    Org = 2,
}

impl DceDomain {
    /// Returns the domain byte stored at byte index 9.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the conventional domain name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Group => "group",
            Self::Org => "org",
        }
    }

    /// Maps a domain byte to its domain, if defined.
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => Some(Self::Person),
            1 => Some(Self::Group),
            2 => Some(Self::Org),
            _ => None,
        }
    }
}

macro_rules! version_wrapper {
    ($(#[$doc:meta])* $name:ident, $version:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub struct $name(Fields);

        impl $name {
            /// Wraps the fields, re-validating that they carry this
            /// wrapper's version.
            pub fn from_fields(fields: Fields) -> Result<Self, Error> {
                if fields.version() != Some(Version::$version) {
                    return Err(Error::invalid(concat!(
                        "the fields must represent a ",
                        $label,
                        " identifier"
                    )));
                }
                Ok(Self(fields))
            }

            /// Returns the sub-field view.
            pub const fn fields(&self) -> &Fields {
                &self.0
            }

            /// Returns the identifier value.
            pub const fn uuid(&self) -> Uuid {
                Uuid::from_bytes(*self.0.as_bytes())
            }
        }
    };
}

version_wrapper!(
    /// A version 1 (Gregorian time) identifier.
    UuidV1,
    Time,
    "version 1 (Gregorian time)"
);
version_wrapper!(
    /// A version 2 (DCE Security) identifier.
    UuidV2,
    DceSecurity,
    "version 2 (DCE Security)"
);
version_wrapper!(
    /// A version 3 (MD5 name-based) identifier.
    UuidV3,
    HashMd5,
    "version 3 (MD5 name-based)"
);
version_wrapper!(
    /// A version 4 (random) identifier.
    UuidV4,
    Random,
    "version 4 (random)"
);
version_wrapper!(
    /// A version 5 (SHA-1 name-based) identifier.
    UuidV5,
    HashSha1,
    "version 5 (SHA-1 name-based)"
);
version_wrapper!(
    /// A version 6 (reordered Gregorian time) identifier.
    UuidV6,
    ReorderedTime,
    "version 6 (reordered time)"
);
version_wrapper!(
    /// A version 7 (Unix time) identifier.
    UuidV7,
    UnixTime,
    "version 7 (Unix time)"
);
version_wrapper!(
    /// A version 8 (custom payload) identifier. Any payload is legal beyond
    /// the version and variant bits.
    UuidV8,
    Custom,
    "version 8 (custom)"
);

impl UuidV1 {
    /// Returns the embedded creation instant.
    pub fn timestamp(&self) -> Result<Timestamp, Error> {
        time::gregorian_timestamp(self.0.timestamp()?)
    }

    /// Returns the 48-bit node value.
    pub fn node(&self) -> u64 {
        self.0.node()
    }

    /// Returns the 14-bit clock sequence.
    pub fn clock_seq(&self) -> u16 {
        self.0.clock_seq()
    }

    /// Reorders the time fields into the sortable version 6 form.
    pub fn to_v6(&self) -> UuidV6 {
        UuidV6(Fields::from_array(time::v1_to_v6(*self.0.as_bytes())))
    }
}

impl UuidV2 {
    /// Returns the local domain stored at byte index 9.
    pub fn local_domain(&self) -> Result<DceDomain, Error> {
        DceDomain::from_number(self.0.clock_seq_low()).ok_or_else(|| {
            Error::invalid(format!(
                "unknown DCE Security domain byte {:#04x}",
                self.0.clock_seq_low()
            ))
        })
    }

    /// Returns the 32-bit local identifier occupying `time_low`.
    pub fn local_identifier(&self) -> u32 {
        self.0.time_low()
    }

    /// Returns the embedded creation instant.
    ///
    /// The local identifier occupies `time_low`, so the value is only as
    /// precise as the remaining high-order time bits (about seven minutes).
    pub fn timestamp(&self) -> Result<Timestamp, Error> {
        time::gregorian_timestamp(self.0.timestamp()?)
    }

    /// Returns the 48-bit node value.
    pub fn node(&self) -> u64 {
        self.0.node()
    }
}

impl UuidV6 {
    /// Returns the embedded creation instant.
    pub fn timestamp(&self) -> Result<Timestamp, Error> {
        time::gregorian_timestamp(self.0.timestamp()?)
    }

    /// Returns the 48-bit node value.
    pub fn node(&self) -> u64 {
        self.0.node()
    }

    /// Returns the 14-bit clock sequence.
    pub fn clock_seq(&self) -> u16 {
        self.0.clock_seq()
    }

    /// Reorders the time fields back into the version 1 form.
    pub fn to_v1(&self) -> UuidV1 {
        UuidV1(Fields::from_array(time::v6_to_v1(*self.0.as_bytes())))
    }
}

impl UuidV7 {
    /// Returns the embedded creation instant, to millisecond resolution.
    pub fn timestamp(&self) -> Result<Timestamp, Error> {
        time::unix_timestamp(self.0.timestamp()?)
    }
}

/// A classified identifier: nil, max, or one of the eight defined versions,
/// each carrying the shared sub-field view.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TaggedUuid {
    /// The all-zero identifier.
    Nil,
    /// The all-one identifier.
    Max,
    /// Version 1, Gregorian time-based.
    Time(UuidV1),
    /// Version 2, DCE Security.
    DceSecurity(UuidV2),
    /// Version 3, MD5 name-based.
    HashMd5(UuidV3),
    /// Version 4, random.
    Random(UuidV4),
    /// Version 5, SHA-1 name-based.
    HashSha1(UuidV5),
    /// Version 6, reordered time.
    ReorderedTime(UuidV6),
    /// Version 7, Unix time.
    UnixTime(UuidV7),
    /// Version 8, custom payload.
    Custom(UuidV8),
}

impl TaggedUuid {
    /// Returns the identifier value.
    pub fn uuid(&self) -> Uuid {
        match self {
            Self::Nil => Uuid::NIL,
            Self::Max => Uuid::MAX,
            Self::Time(u) => u.uuid(),
            Self::DceSecurity(u) => u.uuid(),
            Self::HashMd5(u) => u.uuid(),
            Self::Random(u) => u.uuid(),
            Self::HashSha1(u) => u.uuid(),
            Self::ReorderedTime(u) => u.uuid(),
            Self::UnixTime(u) => u.uuid(),
            Self::Custom(u) => u.uuid(),
        }
    }

    /// Returns the version, absent for nil and max.
    pub fn version(&self) -> Option<Version> {
        match self {
            Self::Nil | Self::Max => None,
            Self::Time(_) => Some(Version::Time),
            Self::DceSecurity(_) => Some(Version::DceSecurity),
            Self::HashMd5(_) => Some(Version::HashMd5),
            Self::Random(_) => Some(Version::Random),
            Self::HashSha1(_) => Some(Version::HashSha1),
            Self::ReorderedTime(_) => Some(Version::ReorderedTime),
            Self::UnixTime(_) => Some(Version::UnixTime),
            Self::Custom(_) => Some(Version::Custom),
        }
    }

    /// Returns the embedded creation instant for the time-based versions.
    pub fn timestamp(&self) -> Result<Timestamp, Error> {
        match self {
            Self::Time(u) => u.timestamp(),
            Self::DceSecurity(u) => u.timestamp(),
            Self::ReorderedTime(u) => u.timestamp(),
            Self::UnixTime(u) => u.timestamp(),
            _ => Err(Error::UnsupportedOperation(
                "the timestamp field is not defined for this version",
            )),
        }
    }
}

/// Validates and classifies 16-byte buffers.
#[derive(Copy, Clone, Debug, Default)]
pub struct UuidBuilder;

impl UuidBuilder {
    /// Classifies `bytes` into nil, max, or a version-specific identifier.
    ///
    /// A wrong length is an [`Error::InvalidArgument`]; a non-RFC 4122
    /// variant or an undefined version nibble is an
    /// [`Error::UnableToBuild`] wrapping the cause.
    pub fn build(&self, bytes: &[u8]) -> Result<TaggedUuid, Error> {
        self.classify(bytes, false)
    }

    /// GUID-aware classification: additionally admits buffers carrying the
    /// Microsoft reserved variant.
    ///
    /// The buffer is expected in big-endian UUID byte order; reorder stored
    /// little-endian GUIDs with [`to_uuid_order`](crate::guid::to_uuid_order)
    /// first.
    pub fn build_guid(&self, bytes: &[u8]) -> Result<TaggedUuid, Error> {
        self.classify(bytes, true)
    }

    fn classify(&self, bytes: &[u8], allow_microsoft: bool) -> Result<TaggedUuid, Error> {
        let fields = Fields::from_bytes(bytes)?;

        if fields.is_nil() {
            return Ok(TaggedUuid::Nil);
        }
        if fields.is_max() {
            return Ok(TaggedUuid::Max);
        }

        let variant = fields.variant();
        let variant_ok = variant == Variant::Rfc4122
            || (allow_microsoft && variant == Variant::ReservedMicrosoft);
        if !variant_ok {
            return Err(Error::unable_to_build(Error::invalid(format!(
                "unsupported variant {variant:?}"
            ))));
        }

        let tagged = match fields.version() {
            Some(Version::Time) => UuidV1::from_fields(fields).map(TaggedUuid::Time),
            Some(Version::DceSecurity) => UuidV2::from_fields(fields).map(TaggedUuid::DceSecurity),
            Some(Version::HashMd5) => UuidV3::from_fields(fields).map(TaggedUuid::HashMd5),
            Some(Version::Random) => UuidV4::from_fields(fields).map(TaggedUuid::Random),
            Some(Version::HashSha1) => UuidV5::from_fields(fields).map(TaggedUuid::HashSha1),
            Some(Version::ReorderedTime) => {
                UuidV6::from_fields(fields).map(TaggedUuid::ReorderedTime)
            }
            Some(Version::UnixTime) => UuidV7::from_fields(fields).map(TaggedUuid::UnixTime),
            Some(Version::Custom) => UuidV8::from_fields(fields).map(TaggedUuid::Custom),
            None => Err(Error::invalid(format!(
                "version nibble {} is not defined",
                fields.as_bytes()[6] >> 4
            ))),
        };

        tagged.map_err(Error::unable_to_build)
    }
}

#[cfg(test)]
mod tests {
    use super::{DceDomain, TaggedUuid, UuidBuilder, UuidV1, UuidV4};
    use crate::error::Error;
    use crate::fields::{Fields, Version};
    use crate::uuid::Uuid;

    const V1_VECTOR: [u8; 16] = [
        0xff, 0x6f, 0x8c, 0xb0, 0xc5, 0x7d, 0x11, 0xe1, 0x9b, 0x21, 0x08, 0x00, 0x20, 0x0c, 0x9a,
        0x66,
    ];

    fn build(bytes: &[u8]) -> Result<TaggedUuid, Error> {
        UuidBuilder.build(bytes)
    }

    /// Classifies nil and max before any version check
    #[test]
    fn classifies_nil_and_max_before_any_version_check() {
        assert_eq!(build(&[0x00; 16]).unwrap(), TaggedUuid::Nil);
        assert_eq!(build(&[0xff; 16]).unwrap(), TaggedUuid::Max);
        assert_eq!(build(&[0x00; 16]).unwrap().version(), None);
        assert!(build(&[0x00; 16]).unwrap().timestamp().is_err());
    }

    /// Rejects buffers of the wrong length as invalid arguments
    #[test]
    fn rejects_buffers_of_the_wrong_length_as_invalid_arguments() {
        assert!(matches!(build(&[0u8; 15]), Err(Error::InvalidArgument(_))));
        assert!(matches!(build(&[0u8; 17]), Err(Error::InvalidArgument(_))));
    }

    /// Dispatches each defined version into its wrapper
    #[test]
    fn dispatches_each_defined_version_into_its_wrapper() {
        for (nibble, version) in [
            (1, Version::Time),
            (2, Version::DceSecurity),
            (3, Version::HashMd5),
            (4, Version::Random),
            (5, Version::HashSha1),
            (6, Version::ReorderedTime),
            (7, Version::UnixTime),
            (8, Version::Custom),
        ] {
            let mut bytes = V1_VECTOR;
            bytes[6] = (bytes[6] & 0x0f) | (nibble << 4);
            let tagged = build(&bytes).unwrap();
            assert_eq!(tagged.version(), Some(version), "nibble {nibble}");
            assert_eq!(tagged.uuid().as_bytes(), &bytes);
        }
    }

    /// Refuses undefined versions and foreign variants
    #[test]
    fn refuses_undefined_versions_and_foreign_variants() {
        let mut bytes = V1_VECTOR;
        bytes[6] = 0x91; // version nibble 9
        assert!(matches!(
            build(&bytes),
            Err(Error::UnableToBuild { .. })
        ));

        let mut bytes = V1_VECTOR;
        bytes[8] = 0x11; // NCS variant
        assert!(matches!(
            build(&bytes),
            Err(Error::UnableToBuild { .. })
        ));

        let mut bytes = V1_VECTOR;
        bytes[8] = 0xe1; // reserved-future variant
        assert!(matches!(
            build(&bytes),
            Err(Error::UnableToBuild { .. })
        ));
    }

    /// Admits the Microsoft variant only through the GUID-aware path
    #[test]
    fn admits_the_microsoft_variant_only_through_the_guid_aware_path() {
        let mut bytes = V1_VECTOR;
        bytes[8] = 0xc1; // Microsoft variant
        assert!(build(&bytes).is_err());

        let tagged = UuidBuilder.build_guid(&bytes).unwrap();
        assert_eq!(tagged.version(), Some(Version::Time));
    }

    /// Re-validates the version in wrapper constructors
    #[test]
    fn re_validates_the_version_in_wrapper_constructors() {
        let fields = Fields::from_array(V1_VECTOR);
        assert!(UuidV1::from_fields(fields).is_ok());
        assert!(matches!(
            UuidV4::from_fields(fields),
            Err(Error::InvalidArgument(_))
        ));
    }

    /// Decodes the DCE Security domain and local identifier
    #[test]
    fn decodes_the_dce_security_domain_and_local_identifier() {
        let mut bytes = V1_VECTOR;
        bytes[6] = (bytes[6] & 0x0f) | 0x20;
        bytes[0..4].copy_from_slice(&42u32.to_be_bytes());
        bytes[9] = DceDomain::Group.number();

        let tagged = build(&bytes).unwrap();
        let TaggedUuid::DceSecurity(v2) = tagged else {
            panic!("expected a DCE Security identifier");
        };
        assert_eq!(v2.local_identifier(), 42);
        assert_eq!(v2.local_domain().unwrap(), DceDomain::Group);
        assert_eq!(v2.local_domain().unwrap().name(), "group");
        assert_eq!(v2.node(), 0x0800_200c_9a66);

        let mut unknown = bytes;
        unknown[9] = 9;
        let TaggedUuid::DceSecurity(v2) = build(&unknown).unwrap() else {
            panic!("expected a DCE Security identifier");
        };
        assert!(v2.local_domain().is_err());
    }

    /// Extracts the creation instant of the version 1 vector
    #[test]
    fn extracts_the_creation_instant_of_the_version_1_vector() {
        let TaggedUuid::Time(v1) = build(&V1_VECTOR).unwrap() else {
            panic!("expected a version 1 identifier");
        };
        let ts = v1.timestamp().unwrap();
        assert_eq!(ts.seconds(), 1_341_368_074); // 2012-07-04T02:14:34Z
        assert_eq!(ts.micros(), 491_000);
        assert_eq!(v1.node(), 0x0800_200c_9a66);
        assert_eq!(v1.clock_seq(), 0x1b21);
    }

    /// Preserves the instant across the version 1 and 6 conversions
    #[test]
    fn preserves_the_instant_across_the_version_1_and_6_conversions() {
        let TaggedUuid::Time(v1) = build(&V1_VECTOR).unwrap() else {
            panic!("expected a version 1 identifier");
        };
        let v6 = v1.to_v6();
        assert_eq!(v6.uuid().version(), Some(Version::ReorderedTime));
        assert_eq!(v6.timestamp().unwrap(), v1.timestamp().unwrap());
        assert_eq!(v6.node(), v1.node());
        assert_eq!(v6.clock_seq(), v1.clock_seq());
        assert_eq!(v6.to_v1(), v1);

        // the reordered form sorts by creation time
        assert_eq!(
            v6.uuid().to_string(),
            "1e1c57df-f6f8-6cb0-9b21-0800200c9a66"
        );
    }

    /// Refuses the timestamp accessor on versions that lack one
    #[test]
    fn refuses_the_timestamp_accessor_on_versions_that_lack_one() {
        let uuid: Uuid = "6fa459ea-ee8a-3ca4-894e-db77e160355e".parse().unwrap();
        let tagged = build(uuid.as_bytes()).unwrap();
        assert!(matches!(
            tagged.timestamp(),
            Err(Error::UnsupportedOperation(_))
        ));
    }
}
