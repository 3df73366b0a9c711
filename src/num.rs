//! Arbitrary-precision conversion between decimal and hexadecimal digit
//! strings.
//!
//! The conversions operate on digit arrays with repeated division, so the
//! full 128-bit identifier range (and beyond) is handled without any
//! fixed-width integer dependency.

use crate::error::Error;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Converts a decimal string to its lower-case hexadecimal form.
///
/// Leading zeros are not preserved; the result for `"0"` is `"0"`.
pub fn to_hex(decimal: &str) -> Result<String, Error> {
    let digits = parse_digits(decimal, 10)?;
    let converted = convert_base(&digits, 10, 16);
    Ok(converted.iter().map(|&d| HEX_DIGITS[d as usize] as char).collect())
}

/// Converts a hexadecimal string (case-insensitive) to its decimal form.
pub fn from_hex(hex: &str) -> Result<String, Error> {
    let digits = parse_digits(hex, 16)?;
    let converted = convert_base(&digits, 16, 10);
    Ok(converted.iter().map(|&d| (b'0' + d) as char).collect())
}

/// Parses `input` into digit values under `base`, most significant first.
fn parse_digits(input: &str, base: u32) -> Result<Vec<u8>, Error> {
    if input.is_empty() {
        return Err(Error::invalid("the number string must not be empty"));
    }

    input
        .chars()
        .map(|c| {
            c.to_digit(base)
                .map(|d| d as u8)
                .ok_or_else(|| Error::invalid(format!("invalid base-{base} digit {c:?}")))
        })
        .collect()
}

/// Rewrites a digit array from one base to another by repeated division.
fn convert_base(digits: &[u8], from: u32, to: u32) -> Vec<u8> {
    let mut number: Vec<u8> = digits
        .iter()
        .copied()
        .skip_while(|&d| d == 0)
        .collect();
    let mut out = Vec::new();

    while !number.is_empty() {
        let mut quotient = Vec::with_capacity(number.len());
        let mut remainder = 0u32;
        for &digit in &number {
            let acc = remainder * from + digit as u32;
            let q = acc / to;
            remainder = acc % to;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q as u8);
            }
        }
        out.push(remainder as u8);
        number = quotient;
    }

    if out.is_empty() {
        out.push(0);
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::{from_hex, to_hex};

    /// Converts decimal to hex across the identifier range
    #[test]
    fn converts_decimal_to_hex_across_the_identifier_range() {
        assert_eq!(to_hex("0").unwrap(), "0");
        assert_eq!(to_hex("255").unwrap(), "ff");
        assert_eq!(to_hex("4294967296").unwrap(), "100000000");
        assert_eq!(
            to_hex("18446744073709551615").unwrap(),
            "ffffffffffffffff"
        );
        assert_eq!(
            to_hex("340282366920938463463374607431768211455").unwrap(),
            "ffffffffffffffffffffffffffffffff"
        );
    }

    /// Converts hex to decimal across the identifier range
    #[test]
    fn converts_hex_to_decimal_across_the_identifier_range() {
        assert_eq!(from_hex("0").unwrap(), "0");
        assert_eq!(from_hex("ff").unwrap(), "255");
        assert_eq!(from_hex("FF").unwrap(), "255");
        assert_eq!(from_hex("100000000").unwrap(), "4294967296");
        assert_eq!(
            from_hex("ffffffffffffffffffffffffffffffff").unwrap(),
            "340282366920938463463374607431768211455"
        );
    }

    /// Ignores leading zeros
    #[test]
    fn ignores_leading_zeros() {
        assert_eq!(to_hex("000255").unwrap(), "ff");
        assert_eq!(from_hex("00ff").unwrap(), "255");
        assert_eq!(from_hex("0000").unwrap(), "0");
    }

    /// Round trips through both directions
    #[test]
    fn round_trips_through_both_directions() {
        for case in [
            "1",
            "12345678901234567890",
            "340282366920938463463374607431768211455",
        ] {
            assert_eq!(from_hex(&to_hex(case).unwrap()).unwrap(), case);
        }
    }

    /// Rejects non-numeric input
    #[test]
    fn rejects_non_numeric_input() {
        assert!(to_hex("").is_err());
        assert!(to_hex("12a").is_err());
        assert!(to_hex("-1").is_err());
        assert!(from_hex("").is_err());
        assert!(from_hex("xyz").is_err());
        assert!(from_hex("12 34").is_err());
    }
}
