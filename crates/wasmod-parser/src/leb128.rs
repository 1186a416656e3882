//! Module for LEB128 integer decoding.
//!
//! <https://en.wikipedia.org/wiki/LEB128>

use crate::{source::ByteSource, DecodeResult, Error};
use num_bigint::BigUint;

const CONTINUATION: u8 = 0b1000_0000;
const PAYLOAD: u8 = 0b0111_1111;

/// Reads an unsigned LEB128 value of unbounded width.
///
/// Each byte contributes its low seven bits at a shift of seven times its
/// position; a set high bit signals that more bytes follow. The format
/// permits encodings wider than any fixed machine word, so the value
/// accumulates into a [`BigUint`].
pub(crate) fn read_uleb128<S: ByteSource>(
    source: &mut S,
    context: &'static str,
) -> DecodeResult<BigUint> {
    let mut result = BigUint::from(0u8);
    let mut shift = 0usize;

    loop {
        let byte = source.read_byte(context)?;
        result |= BigUint::from(byte & PAYLOAD) << shift;
        if byte & CONTINUATION == 0 {
            return Ok(result);
        }

        shift += 7;
    }
}

fn read_narrow<S: ByteSource>(source: &mut S, context: &'static str, bits: u32) -> DecodeResult<u64> {
    let offset = source.offset();
    let value = read_uleb128(source, context)?;
    if value.bits() > u64::from(bits) {
        return Err(Error::IntegerTooLarge { bits, offset });
    }

    // The bit-width check above guarantees a single digit (or none, for
    // zero) is sufficient.
    Ok(value.iter_u64_digits().next().unwrap_or(0))
}

/// Reads an unsigned LEB128 value that must fit in eight bits.
pub(crate) fn read_u8<S: ByteSource>(source: &mut S, context: &'static str) -> DecodeResult<u8> {
    read_narrow(source, context, 8).map(|v| v as u8)
}

/// Reads an unsigned LEB128 value that must fit in 32 bits.
pub(crate) fn read_u32<S: ByteSource>(source: &mut S, context: &'static str) -> DecodeResult<u32> {
    read_narrow(source, context, 32).map(|v| v as u32)
}

/// Reads an unsigned LEB128 value that must fit in 64 bits.
pub(crate) fn read_u64<S: ByteSource>(source: &mut S, context: &'static str) -> DecodeResult<u64> {
    read_narrow(source, context, 64)
}

fn read_signed<S: ByteSource>(
    source: &mut S,
    context: &'static str,
    bits: u32,
    first: Option<u8>,
) -> DecodeResult<i64> {
    let offset = source.offset().saturating_sub(u64::from(first.is_some()));
    let max_bytes = (bits + 6) / 7;
    let mut result = 0i64;
    let mut shift = 0u32;
    let mut first = first;

    for _ in 0..max_bytes {
        let byte = match first.take() {
            Some(byte) => byte,
            None => source.read_byte(context)?,
        };

        result |= i64::from(byte & PAYLOAD) << shift;
        shift += 7;

        if byte & CONTINUATION == 0 {
            // Sign-extend from the top bit of the last payload group.
            if shift < 64 && byte & 0b0100_0000 != 0 {
                result |= !0 << shift;
            }

            if bits < 64 {
                let min = -(1i64 << (bits - 1));
                let max = (1i64 << (bits - 1)) - 1;
                if result < min || result > max {
                    return Err(Error::IntegerTooLong { bits, offset });
                }
            }

            return Ok(result);
        }
    }

    Err(Error::IntegerTooLong { bits, offset })
}

/// Reads a signed LEB128 value that must fit in 32 bits.
pub(crate) fn read_i32<S: ByteSource>(source: &mut S, context: &'static str) -> DecodeResult<i32> {
    read_signed(source, context, 32, None).map(|v| v as i32)
}

/// Reads a signed LEB128 value that must fit in 64 bits.
pub(crate) fn read_i64<S: ByteSource>(source: &mut S, context: &'static str) -> DecodeResult<i64> {
    read_signed(source, context, 64, None)
}

/// Reads a signed 33-bit LEB128 value whose first byte has already been
/// consumed, as happens when decoding a block type.
pub(crate) fn read_s33_tail<S: ByteSource>(
    source: &mut S,
    context: &'static str,
    first: u8,
) -> DecodeResult<i64> {
    read_signed(source, context, 33, Some(first))
}
