//! Byte-order conversion between the big-endian UUID layout and the
//! little-endian Microsoft GUID layout.
//!
//! Only the binary encoding differs between the two: a GUID stores
//! `time_low`, `time_mid`, and `time_hi_and_version` with their bytes
//! reversed, while the trailing eight bytes and the textual representation
//! are identical.

/// Reorders a big-endian UUID buffer into GUID byte order.
pub fn to_guid_order(bytes: [u8; 16]) -> [u8; 16] {
    swap_leading_fields(bytes)
}

/// Reorders a GUID buffer back into big-endian UUID byte order.
///
/// The swap is an involution, so this is the same permutation as
/// [`to_guid_order`]; the two names document the direction at call sites.
pub fn to_uuid_order(bytes: [u8; 16]) -> [u8; 16] {
    swap_leading_fields(bytes)
}

fn swap_leading_fields(mut bytes: [u8; 16]) -> [u8; 16] {
    bytes[0..4].reverse();
    bytes[4..6].reverse();
    bytes[6..8].reverse();
    bytes
}
