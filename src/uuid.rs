use std::{fmt, ops, str};

use crate::error::Error;
use crate::fields::{Fields, Variant, Version};
use crate::num;

/// Represents a 128-bit universally unique identifier.
///
/// The derived ordering compares the big-endian byte array, which is the
/// same total order as comparing the most-significant 64 bits and then the
/// least-significant 64 bits as unsigned integers.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Name-space identifier for fully-qualified domain names (RFC 4122,
    /// Appendix C).
    pub const NAMESPACE_DNS: Self = Self([
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name-space identifier for URLs (RFC 4122, Appendix C).
    pub const NAMESPACE_URL: Self = Self([
        0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name-space identifier for ISO OIDs (RFC 4122, Appendix C).
    pub const NAMESPACE_OID: Self = Self([
        0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name-space identifier for X.500 distinguished names (RFC 4122,
    /// Appendix C).
    pub const NAMESPACE_X500: Self = Self([
        0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Creates an identifier from an owned 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the sub-field view of this identifier.
    pub const fn fields(&self) -> Fields {
        Fields::from_array(self.0)
    }

    /// Returns the variant family of this identifier.
    pub fn variant(&self) -> Variant {
        self.fields().variant()
    }

    /// Returns the version recorded in the version nibble, if defined.
    pub fn version(&self) -> Option<Version> {
        self.fields().version()
    }

    /// True if all 128 bits are zero.
    pub fn is_nil(&self) -> bool {
        self.0 == [0x00; 16]
    }

    /// True if all 128 bits are one.
    pub fn is_max(&self) -> bool {
        self.0 == [0xff; 16]
    }

    /// Parses an identifier from its decimal integer representation.
    pub fn from_decimal_str(decimal: &str) -> Result<Self, Error> {
        let hex = num::to_hex(decimal)?;
        if hex.len() > 32 {
            return Err(Error::invalid(format!(
                "the integer {decimal} does not fit in 128 bits"
            )));
        }

        let mut bytes = [0u8; 16];
        for (i, c) in hex.bytes().rev().enumerate() {
            // the converter emits lower-case hex only
            let digit = if c.is_ascii_digit() { c - b'0' } else { c - b'a' + 10 };
            bytes[15 - i / 2] |= digit << ((i % 2) * 4);
        }
        Ok(Self(bytes))
    }

    /// Returns the decimal integer representation of this identifier.
    pub fn to_decimal_string(&self) -> String {
        let hex: String = self.encode().chars().filter(|&c| c != '-').collect();
        num::from_hex(&hex).expect("canonical encoding is valid hex")
    }

    /// Returns the `urn:uuid:` form of the canonical string.
    pub fn urn(&self) -> String {
        format!("urn:uuid:{}", self.encode())
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a
    /// stack-allocated structure that can be dereferenced as `str` and
    /// [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid128::Uuid;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "01809424-3e59-7c05-9219-566f82fff672");
    /// assert_eq!(format!("{}", y), "01809424-3e59-7c05-9219-566f82fff672");
    /// # Ok::<(), uuid128::Error>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for i in 0..16 {
            let e = self.0[i] as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        UuidStr(buffer)
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string
    /// representation, case-insensitively.
    ///
    /// Other accepted textual forms (braces, `urn:uuid:`, dashless) are
    /// handled by [`StringCodec`](crate::codec::StringCodec).
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let err = || Error::invalid(format!("invalid string representation: {src:?}"));
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or_else(err)?.to_digit(16).ok_or_else(err)? as u8;
            let lo = iter.next().ok_or_else(err)?.to_digit(16).ok_or_else(err)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or_else(err)? != '-' {
                return Err(err());
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(err())
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = Error;

    /// Fails unless the slice is exactly 16 bytes; never truncates or pads.
    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Fields::from_bytes(src).map(|fields| Self(*fields.as_bytes()))
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Concrete return type of [`Uuid::encode()`] containing the stack-allocated
/// 8-4-4-4-12 string representation.
struct UuidStr([u8; 36]);

impl ops::Deref for UuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for UuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "ff6f8cb0-c57d-11e1-9b21-0800200c9a66",
                    &[
                        255, 111, 140, 176, 197, 125, 17, 225, 155, 33, 8, 0, 32, 12, 154, 102,
                    ],
                ),
                (
                    "6fa459ea-ee8a-3ca4-894e-db77e160355e",
                    &[
                        111, 164, 89, 234, 238, 138, 60, 164, 137, 78, 219, 119, 225, 96, 53, 94,
                    ],
                ),
                (
                    "886313e1-3b8a-5372-9b90-0c9aee199e5d",
                    &[
                        136, 99, 19, 225, 59, 138, 83, 114, 155, 144, 12, 154, 238, 25, 158, 93,
                    ],
                ),
                (
                    "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
                    &[
                        1, 127, 34, 226, 121, 176, 124, 195, 152, 196, 220, 12, 12, 7, 57, 143,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }
    }
}
