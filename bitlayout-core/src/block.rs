//! Byte-block codec: contiguous byte-aligned ranges and their canonical
//! hex-string form.
//!
//! Byte arrays must start on a byte boundary; the hex form is uppercase,
//! two characters per byte, no separators, and round-trips exactly.

use crate::error::{Error, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Copies `byte_count` contiguous bytes starting at `start_bit / 8`.
///
/// # Errors
/// Returns [`Error::MisalignedField`] unless `start_bit` is a multiple of 8,
/// and [`Error::BufferTooShort`] if the range extends past the buffer.
pub fn decode_bytes(buf: &[u8], start_bit: usize, byte_count: usize) -> Result<Vec<u8>> {
    let start = aligned_byte_offset(start_bit)?;
    let end = start + byte_count;
    if end > buf.len() {
        return Err(Error::BufferTooShort {
            required: end,
            available: buf.len(),
        });
    }
    Ok(buf[start..end].to_vec())
}

/// Writes `bytes` contiguously starting at `start_bit / 8`.
///
/// # Errors
/// Returns [`Error::MisalignedField`] unless `start_bit` is a multiple of 8,
/// and [`Error::BufferTooShort`] if the range extends past the buffer.
pub fn encode_bytes(bytes: &[u8], buf: &mut [u8], start_bit: usize) -> Result<()> {
    let start = aligned_byte_offset(start_bit)?;
    let end = start + bytes.len();
    if end > buf.len() {
        return Err(Error::BufferTooShort {
            required: end,
            available: buf.len(),
        });
    }
    buf[start..end].copy_from_slice(bytes);
    Ok(())
}

fn aligned_byte_offset(start_bit: usize) -> Result<usize> {
    if start_bit % 8 != 0 {
        return Err(Error::MisalignedField { start_bit });
    }
    Ok(start_bit / 8)
}

/// Renders bytes as canonical uppercase hex, two characters per byte.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX_DIGITS[(b >> 4) as usize] as char);
        out.push(HEX_DIGITS[(b & 0x0F) as usize] as char);
    }
    out
}

/// Parses a hex string back into bytes; exact inverse of [`to_hex`].
///
/// Lowercase digits are accepted on input.
///
/// # Errors
/// Returns [`Error::InvalidHex`] if the string length is odd or a character
/// is not a hex digit.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err(Error::InvalidHex {
            reason: format!("odd length {}", s.len()),
        });
    }
    let mut out = Vec::with_capacity(s.len() / 2);
    let chars: Vec<char> = s.chars().collect();
    for pair in chars.chunks(2) {
        let hi = hex_digit(pair[0])?;
        let lo = hex_digit(pair[1])?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| Error::InvalidHex {
            reason: format!("invalid character '{c}'"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_round_trip() {
        let mut buf = [0u8; 8];
        encode_bytes(&[0xDE, 0xAD, 0xBE, 0xEF], &mut buf, 16).unwrap();
        assert_eq!(buf, [0, 0, 0xDE, 0xAD, 0xBE, 0xEF, 0, 0]);
        assert_eq!(
            decode_bytes(&buf, 16, 4).unwrap(),
            vec![0xDE, 0xAD, 0xBE, 0xEF]
        );
    }

    #[test]
    fn test_misaligned_start_rejected() {
        let mut buf = [0u8; 8];
        assert_eq!(
            decode_bytes(&buf, 3, 2).unwrap_err(),
            Error::MisalignedField { start_bit: 3 }
        );
        assert_eq!(
            encode_bytes(&[1], &mut buf, 9).unwrap_err(),
            Error::MisalignedField { start_bit: 9 }
        );
    }

    #[test]
    fn test_bytes_out_of_bounds() {
        let mut buf = [0u8; 4];
        assert!(matches!(
            decode_bytes(&buf, 16, 3),
            Err(Error::BufferTooShort {
                required: 5,
                available: 4
            })
        ));
        assert!(encode_bytes(&[0; 5], &mut buf, 0).is_err());
    }

    #[test]
    fn test_to_hex_canonical() {
        assert_eq!(to_hex(&[]), "");
        assert_eq!(to_hex(&[0x00, 0xFF, 0x1A]), "00FF1A");
        let bytes: Vec<u8> = (0..=255).collect();
        let hex = to_hex(&bytes);
        assert_eq!(hex.len(), 512);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_hex_round_trip() {
        for len in 0..64usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let hex = to_hex(&bytes);
            assert_eq!(hex.len(), 2 * len);
            assert_eq!(parse_hex(&hex).unwrap(), bytes);
        }
    }

    #[test]
    fn test_parse_hex_accepts_lowercase() {
        assert_eq!(parse_hex("deadBEEF").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_parse_hex_rejects_odd_length() {
        assert!(matches!(parse_hex("ABC"), Err(Error::InvalidHex { .. })));
    }

    #[test]
    fn test_parse_hex_rejects_non_hex() {
        assert!(matches!(parse_hex("0G"), Err(Error::InvalidHex { .. })));
        assert!(matches!(parse_hex("  "), Err(Error::InvalidHex { .. })));
    }
}
