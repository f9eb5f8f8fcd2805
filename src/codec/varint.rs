// Base-128 variable-length integers with zig-zag signed mapping.
//
// Little-endian group order: least-significant 7-bit group first.
// Each byte has bit 7 set except the final byte.
// Wire-compatible with protobuf uint32/uint64 (raw) and sint32/sint64
// (zig-zag) varints.

use std::io::{self, Read, Write};

use super::error::CodecError;
use super::zigzag;

/// Maximum number of 7-bit groups in a 32-bit varint (ceil(32/7) = 5).
pub const MAX_GROUPS_32: usize = 5;

/// Maximum number of 7-bit groups in a 64-bit varint (ceil(64/7) = 10).
pub const MAX_GROUPS_64: usize = 10;

/// Scratch buffer length large enough for any encoding.
pub const MAX_VARINT_LEN: usize = MAX_GROUPS_64;

/// Payload bits the final (5th) group of a 32-bit varint may carry: 32 - 4*7.
const U32_LAST_GROUP_MASK: u8 = 0x0F;

/// Payload bits the final (10th) group of a 64-bit varint may carry: 64 - 9*7.
const U64_LAST_GROUP_MASK: u8 = 0x01;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;

// ---------------------------------------------------------------------------
// Unsigned encoding
// ---------------------------------------------------------------------------

/// Encode a `u64` into the front of `buf`.
/// Returns the number of bytes written (1..=10).
#[inline]
pub fn encode_u64(mut num: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut i = 0;
    while num >= u64::from(CONTINUATION) {
        buf[i] = (num as u8 & PAYLOAD) | CONTINUATION;
        num >>= 7;
        i += 1;
    }
    buf[i] = num as u8;
    i + 1
}

/// Encode a `u32` into the front of `buf`.
/// Returns the number of bytes written (1..=5).
#[inline]
pub fn encode_u32(num: u32, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    encode_u64(u64::from(num), buf)
}

/// Append the encoding of a `u64` to `out`. Returns the number of bytes appended.
pub fn encode_u64_into(num: u64, out: &mut Vec<u8>) -> usize {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode_u64(num, &mut buf);
    out.extend_from_slice(&buf[..len]);
    len
}

/// Append the encoding of a `u32` to `out`. Returns the number of bytes appended.
pub fn encode_u32_into(num: u32, out: &mut Vec<u8>) -> usize {
    encode_u64_into(u64::from(num), out)
}

// ---------------------------------------------------------------------------
// Signed (zig-zag) encoding
// ---------------------------------------------------------------------------

/// Encode an `i32` as a zig-zag varint (1..=5 bytes).
pub fn encode_varint(value: i32) -> Vec<u8> {
    let mut out = Vec::with_capacity(size_of_varint(value));
    encode_varint_into(value, &mut out);
    out
}

/// Encode an `i64` as a zig-zag varlong (1..=10 bytes).
pub fn encode_varlong(value: i64) -> Vec<u8> {
    let mut out = Vec::with_capacity(size_of_varlong(value));
    encode_varlong_into(value, &mut out);
    out
}

/// Append the zig-zag varint encoding of `value` to `out`.
pub fn encode_varint_into(value: i32, out: &mut Vec<u8>) -> usize {
    encode_u32_into(zigzag::encode_i32(value), out)
}

/// Append the zig-zag varlong encoding of `value` to `out`.
pub fn encode_varlong_into(value: i64, out: &mut Vec<u8>) -> usize {
    encode_u64_into(zigzag::encode_i64(value), out)
}

// ---------------------------------------------------------------------------
// Writing to `Write` sinks
// ---------------------------------------------------------------------------

/// Encode a `u64` and write to a `Write` sink.
pub fn write_u64<W: Write>(w: &mut W, num: u64) -> io::Result<usize> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode_u64(num, &mut buf);
    w.write_all(&buf[..len])?;
    Ok(len)
}

/// Encode a `u32` and write to a `Write` sink.
pub fn write_u32<W: Write>(w: &mut W, num: u32) -> io::Result<usize> {
    write_u64(w, u64::from(num))
}

/// Zig-zag encode an `i32` and write to a `Write` sink.
pub fn write_varint<W: Write>(w: &mut W, value: i32) -> io::Result<usize> {
    write_u32(w, zigzag::encode_i32(value))
}

/// Zig-zag encode an `i64` and write to a `Write` sink.
pub fn write_varlong<W: Write>(w: &mut W, value: i64) -> io::Result<usize> {
    write_u64(w, zigzag::encode_i64(value))
}

// ---------------------------------------------------------------------------
// Decoding from byte slices
// ---------------------------------------------------------------------------

/// Decode a `u32` from the front of `data`.
/// Returns `(value, bytes_consumed)`.
///
/// The 5th byte must terminate the varint and carry at most 4 payload bits;
/// anything else is [`CodecError::MalformedVarint`].
pub fn decode_u32(data: &[u8]) -> Result<(u32, usize), CodecError> {
    let mut val: u32 = 0;
    for (i, &byte) in data.iter().take(MAX_GROUPS_32).enumerate() {
        val |= u32::from(byte & PAYLOAD) << (7 * i);
        if i == MAX_GROUPS_32 - 1
            && (byte & CONTINUATION != 0 || byte & PAYLOAD & !U32_LAST_GROUP_MASK != 0)
        {
            return Err(CodecError::MalformedVarint { partial: val });
        }
        if byte & CONTINUATION == 0 {
            return Ok((val, i + 1));
        }
    }
    Err(CodecError::Truncated { width: 32 })
}

/// Decode a `u64` from the front of `data`.
/// Returns `(value, bytes_consumed)`.
///
/// The 10th byte must terminate the varint and carry at most 1 payload bit;
/// anything else is [`CodecError::MalformedVarlong`].
pub fn decode_u64(data: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut val: u64 = 0;
    for (i, &byte) in data.iter().take(MAX_GROUPS_64).enumerate() {
        val |= u64::from(byte & PAYLOAD) << (7 * i);
        if i == MAX_GROUPS_64 - 1
            && (byte & CONTINUATION != 0 || byte & PAYLOAD & !U64_LAST_GROUP_MASK != 0)
        {
            return Err(CodecError::MalformedVarlong { partial: val });
        }
        if byte & CONTINUATION == 0 {
            return Ok((val, i + 1));
        }
    }
    Err(CodecError::Truncated { width: 64 })
}

/// Decode a zig-zag varint from the front of `data`.
/// Returns `(value, bytes_consumed)`.
pub fn decode_varint(data: &[u8]) -> Result<(i32, usize), CodecError> {
    let (raw, len) = decode_u32(data)?;
    Ok((zigzag::decode_i32(raw), len))
}

/// Decode a zig-zag varlong from the front of `data`.
/// Returns `(value, bytes_consumed)`.
pub fn decode_varlong(data: &[u8]) -> Result<(i64, usize), CodecError> {
    let (raw, len) = decode_u64(data)?;
    Ok((zigzag::decode_i64(raw), len))
}

// ---------------------------------------------------------------------------
// Decoding from `Read` (streaming)
// ---------------------------------------------------------------------------

/// Pull bytes one at a time until a terminal byte or `buf` is full.
/// Never reads past the varint.
fn read_groups<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let cap = buf.len();
    for (i, slot) in buf.iter_mut().enumerate() {
        let mut byte = [0u8; 1];
        r.read_exact(&mut byte)?;
        *slot = byte[0];
        if byte[0] & CONTINUATION == 0 {
            return Ok(i + 1);
        }
    }
    Ok(cap)
}

/// Read a `u32` varint from a streaming source.
pub fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; MAX_GROUPS_32];
    let len = read_groups(r, &mut buf)?;
    let (val, _) = decode_u32(&buf[..len])?;
    Ok(val)
}

/// Read a `u64` varint from a streaming source.
pub fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; MAX_GROUPS_64];
    let len = read_groups(r, &mut buf)?;
    let (val, _) = decode_u64(&buf[..len])?;
    Ok(val)
}

/// Read a zig-zag varint from a streaming source.
pub fn read_varint<R: Read>(r: &mut R) -> io::Result<i32> {
    read_u32(r).map(zigzag::decode_i32)
}

/// Read a zig-zag varlong from a streaming source.
pub fn read_varlong<R: Read>(r: &mut R) -> io::Result<i64> {
    read_u64(r).map(zigzag::decode_i64)
}

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// Return the encoded byte-length of a `u64` value.
#[inline]
pub const fn sizeof_u64(num: u64) -> usize {
    let bits = 64 - num.leading_zeros();
    let bits = if bits == 0 { 1 } else { bits };
    bits.div_ceil(7) as usize
}

/// Return the encoded byte-length of a `u32` value.
#[inline]
pub const fn sizeof_u32(num: u32) -> usize {
    sizeof_u64(num as u64)
}

/// Bytes [`encode_varint`] would produce for `value`, without encoding it.
#[inline]
pub const fn size_of_varint(value: i32) -> usize {
    sizeof_u32(zigzag::encode_i32(value))
}

/// Bytes [`encode_varlong`] would produce for `value`, without encoding it.
#[inline]
pub const fn size_of_varlong(value: i64) -> usize {
    sizeof_u64(zigzag::encode_i64(value))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
