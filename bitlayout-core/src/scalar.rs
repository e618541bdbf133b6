//! Scalar codec: unsigned, signed and boolean values at arbitrary bit
//! offsets and widths.
//!
//! Values are stored most-significant-bit-first across byte boundaries. The
//! codec moves one bit at a time rather than using byte-aligned shifts,
//! because fields are not byte-aligned in general. Encoding is a
//! read-modify-write per destination byte and never touches a bit outside
//! the addressed span.

use crate::bits::BitSpan;
use crate::error::{Error, Result};

/// Widest scalar field the codec supports, in bits.
pub const MAX_SCALAR_BITS: u32 = 32;

/// Validates the width and buffer capacity for a scalar access.
fn checked_span(available: usize, start_bit: usize, len_bits: u32, min_bits: u32) -> Result<BitSpan> {
    if len_bits < min_bits || len_bits > MAX_SCALAR_BITS {
        return Err(Error::InvalidBitWidth {
            bits: len_bits,
            min: min_bits,
        });
    }
    let span = BitSpan::new(start_bit, len_bits as usize);
    span.check_fits(available)?;
    Ok(span)
}

/// Reads `len_bits` (1..=32) bits starting at `start_bit` and returns them
/// packed into the low bits of the result.
///
/// # Arguments
/// * `buf` - Buffer to read from
/// * `start_bit` - Offset of the field's first (most significant) bit
/// * `len_bits` - Field width in bits
///
/// # Errors
/// Returns [`Error::InvalidBitWidth`] for widths outside 1..=32 and
/// [`Error::BufferTooShort`] if the span extends past the buffer.
#[inline]
pub fn decode_uint(buf: &[u8], start_bit: usize, len_bits: u32) -> Result<u32> {
    checked_span(buf.len(), start_bit, len_bits, 1)?;

    let mut res = 0u32;
    for i in 0..len_bits as usize {
        let src_byte = (start_bit + i) / 8;
        let src_bit = 7 - ((start_bit + i) % 8);
        let dst_bit = len_bits as usize - 1 - i;
        let bit = u32::from((buf[src_byte] >> src_bit) & 1);
        res |= bit << dst_bit;
    }
    Ok(res)
}

/// Writes the low `len_bits` bits of `value` starting at `start_bit`,
/// most significant bit first.
///
/// Bits of `value` above `len_bits` are ignored; range enforcement against a
/// field's declared bounds is the caller's job (see [`check_uint_range`]).
///
/// # Errors
/// Returns [`Error::InvalidBitWidth`] for widths outside 1..=32 and
/// [`Error::BufferTooShort`] if the span extends past the buffer.
#[inline]
pub fn encode_uint(value: u32, buf: &mut [u8], start_bit: usize, len_bits: u32) -> Result<()> {
    checked_span(buf.len(), start_bit, len_bits, 1)?;

    for i in 0..len_bits as usize {
        let dst_byte = (start_bit + i) / 8;
        let dst_bit = 7 - ((start_bit + i) % 8);
        let src_bit = len_bits as usize - 1 - i;
        let bit = ((value >> src_bit) & 1) as u8;
        buf[dst_byte] = (buf[dst_byte] & !(1 << dst_bit)) | (bit << dst_bit);
    }
    Ok(())
}

/// Reads a signed value of `len_bits` (2..=32) bits, decoding two's
/// complement: the field's top bit is the sign, and a set sign bit
/// sign-extends through the full 32-bit result.
///
/// # Errors
/// Returns [`Error::InvalidBitWidth`] for widths outside 2..=32 and
/// [`Error::BufferTooShort`] if the span extends past the buffer.
#[inline]
pub fn decode_int(buf: &[u8], start_bit: usize, len_bits: u32) -> Result<i32> {
    if !(2..=MAX_SCALAR_BITS).contains(&len_bits) {
        return Err(Error::InvalidBitWidth {
            bits: len_bits,
            min: 2,
        });
    }
    let raw = decode_uint(buf, start_bit, len_bits)?;
    let shift = MAX_SCALAR_BITS - len_bits;
    Ok(((raw << shift) as i32) >> shift)
}

/// Writes a signed value of `len_bits` (2..=32) bits as two's complement:
/// `sign << (len_bits-1) | (value & low_bits_mask)`.
///
/// # Errors
/// Returns [`Error::InvalidBitWidth`] for widths outside 2..=32 and
/// [`Error::BufferTooShort`] if the span extends past the buffer.
#[inline]
pub fn encode_int(value: i32, buf: &mut [u8], start_bit: usize, len_bits: u32) -> Result<()> {
    if !(2..=MAX_SCALAR_BITS).contains(&len_bits) {
        return Err(Error::InvalidBitWidth {
            bits: len_bits,
            min: 2,
        });
    }
    let sign = ((value >> 31) & 1) as u32;
    let low_mask = (1u32 << (len_bits - 1)) - 1;
    let raw = (sign << (len_bits - 1)) | ((value as u32) & low_mask);
    encode_uint(raw, buf, start_bit, len_bits)
}

/// Reads a boolean of `len_bits` bits (8 in the EEPROM dialect, 1 in the
/// packet dialect).
///
/// A raw value of exactly 1 decodes as true; 0 and every other raw pattern
/// decode as false, preserving the original `== 1` wire semantics.
///
/// # Errors
/// Same failure modes as [`decode_uint`].
#[inline]
pub fn decode_bool(buf: &[u8], start_bit: usize, len_bits: u32) -> Result<bool> {
    Ok(decode_uint(buf, start_bit, len_bits)? == 1)
}

/// Writes a boolean as 0 or 1 at the dialect-specific width.
///
/// # Errors
/// Same failure modes as [`encode_uint`].
#[inline]
pub fn encode_bool(value: bool, buf: &mut [u8], start_bit: usize, len_bits: u32) -> Result<()> {
    encode_uint(u32::from(value), buf, start_bit, len_bits)
}

/// Checks an unsigned value against declared `[min, max]` bounds.
///
/// # Errors
/// Returns [`Error::RangeViolation`] if the value is out of range.
#[inline]
pub fn check_uint_range(value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(Error::RangeViolation {
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        });
    }
    Ok(())
}

/// Checks a signed value against declared `[min, max]` bounds.
///
/// # Errors
/// Returns [`Error::RangeViolation`] if the value is out of range.
#[inline]
pub fn check_int_range(value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        return Err(Error::RangeViolation {
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        });
    }
    Ok(())
}
