//! Bit-span arithmetic.
//!
//! Maps `(start_bit, len_bits)` pairs to byte/bit addresses within a flat
//! buffer. Bit 0 of a buffer is the most significant bit of byte 0
//! (big-endian/network bit order); fields pack contiguously with no implicit
//! padding. All functions here are pure.

use crate::error::{Error, Result};

/// A contiguous run of bits within a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitSpan {
    start_bit: usize,
    len_bits: usize,
}

impl BitSpan {
    /// Creates a span starting at `start_bit`, `len_bits` long.
    #[inline(always)]
    #[must_use]
    pub const fn new(start_bit: usize, len_bits: usize) -> Self {
        Self {
            start_bit,
            len_bits,
        }
    }

    /// Offset of the span's first bit from the start of the buffer.
    #[inline(always)]
    #[must_use]
    pub const fn start_bit(&self) -> usize {
        self.start_bit
    }

    /// Length of the span in bits.
    #[inline(always)]
    #[must_use]
    pub const fn len_bits(&self) -> usize {
        self.len_bits
    }

    /// Index of the byte containing the span's first bit.
    #[inline(always)]
    #[must_use]
    pub const fn byte_offset(&self) -> usize {
        self.start_bit / 8
    }

    /// Position of the first bit within its byte; 0 is the byte's most
    /// significant bit.
    #[inline(always)]
    #[must_use]
    pub const fn bit_offset(&self) -> usize {
        self.start_bit % 8
    }

    /// One past the span's last bit.
    #[inline(always)]
    #[must_use]
    pub const fn end_bit(&self) -> usize {
        self.start_bit + self.len_bits
    }

    /// Number of bytes a buffer must have to contain the span.
    #[inline(always)]
    #[must_use]
    pub const fn bytes_required(&self) -> usize {
        self.end_bit().div_ceil(8)
    }

    /// Returns true if the span starts on a byte boundary.
    #[inline(always)]
    #[must_use]
    pub const fn is_byte_aligned(&self) -> bool {
        self.start_bit % 8 == 0
    }

    /// Span of array element `index`, each element `len_bits` wide:
    /// `start_bit + index * len_bits`.
    #[inline(always)]
    #[must_use]
    pub const fn element(&self, index: usize) -> Self {
        Self {
            start_bit: self.start_bit + index * self.len_bits,
            len_bits: self.len_bits,
        }
    }

    /// Checks that a buffer of `available` bytes contains the whole span.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if the span extends past the buffer.
    pub fn check_fits(&self, available: usize) -> Result<()> {
        let required = self.bytes_required();
        if required > available {
            return Err(Error::BufferTooShort {
                required,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_and_bit_offset() {
        let span = BitSpan::new(13, 3);
        assert_eq!(span.byte_offset(), 1);
        assert_eq!(span.bit_offset(), 5);
        assert_eq!(span.end_bit(), 16);
        assert_eq!(span.bytes_required(), 2);
    }

    #[test]
    fn test_byte_alignment() {
        assert!(BitSpan::new(0, 8).is_byte_aligned());
        assert!(BitSpan::new(16, 4).is_byte_aligned());
        assert!(!BitSpan::new(17, 4).is_byte_aligned());
    }

    #[test]
    fn test_bytes_required_rounds_up() {
        assert_eq!(BitSpan::new(0, 1).bytes_required(), 1);
        assert_eq!(BitSpan::new(7, 1).bytes_required(), 1);
        assert_eq!(BitSpan::new(7, 2).bytes_required(), 2);
        assert_eq!(BitSpan::new(8, 8).bytes_required(), 2);
    }

    #[test]
    fn test_element_addressing() {
        let base = BitSpan::new(10, 5);
        assert_eq!(base.element(0).start_bit(), 10);
        assert_eq!(base.element(3).start_bit(), 25);
        assert_eq!(base.element(3).len_bits(), 5);
    }

    #[test]
    fn test_check_fits() {
        assert!(BitSpan::new(8, 8).check_fits(2).is_ok());
        let err = BitSpan::new(8, 9).check_fits(2).unwrap_err();
        assert_eq!(
            err,
            Error::BufferTooShort {
                required: 3,
                available: 2
            }
        );
    }
}
