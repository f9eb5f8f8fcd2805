// Fixed-width integer packing at caller-supplied offsets.
//
// Big-endian (network order) and little-endian accessors are separate
// functions; nothing picks a byte order implicitly. Out-of-range offsets
// fail with `IndexOutOfRange` and leave the buffer untouched.

use super::error::CodecError;

fn field<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], CodecError> {
    offset
        .checked_add(N)
        .and_then(|end| buf.get(offset..end))
        .and_then(|s| <[u8; N]>::try_from(s).ok())
        .ok_or(CodecError::IndexOutOfRange {
            offset,
            width: N,
            len: buf.len(),
        })
}

fn field_mut<const N: usize>(buf: &mut [u8], offset: usize) -> Result<&mut [u8; N], CodecError> {
    let len = buf.len();
    offset
        .checked_add(N)
        .and_then(|end| buf.get_mut(offset..end))
        .and_then(|s| <&mut [u8; N]>::try_from(s).ok())
        .ok_or(CodecError::IndexOutOfRange {
            offset,
            width: N,
            len,
        })
}

// ---------------------------------------------------------------------------
// 32-bit
// ---------------------------------------------------------------------------

/// Read 4 bytes at `offset` as a big-endian `u32`.
pub fn read_u32_be(buf: &[u8], offset: usize) -> Result<u32, CodecError> {
    field(buf, offset).map(u32::from_be_bytes)
}

/// Write `value` as 4 big-endian bytes at `offset`.
pub fn write_u32_be(buf: &mut [u8], offset: usize, value: u32) -> Result<(), CodecError> {
    *field_mut(buf, offset)? = value.to_be_bytes();
    Ok(())
}

/// Read 4 bytes at `offset` as a little-endian `u32`.
pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32, CodecError> {
    field(buf, offset).map(u32::from_le_bytes)
}

/// Write `value` as 4 little-endian bytes at `offset`.
pub fn write_u32_le(buf: &mut [u8], offset: usize, value: u32) -> Result<(), CodecError> {
    *field_mut(buf, offset)? = value.to_le_bytes();
    Ok(())
}

// ---------------------------------------------------------------------------
// 16-bit
// ---------------------------------------------------------------------------

pub fn read_u16_be(buf: &[u8], offset: usize) -> Result<u16, CodecError> {
    field(buf, offset).map(u16::from_be_bytes)
}

pub fn write_u16_be(buf: &mut [u8], offset: usize, value: u16) -> Result<(), CodecError> {
    *field_mut(buf, offset)? = value.to_be_bytes();
    Ok(())
}

pub fn read_u16_le(buf: &[u8], offset: usize) -> Result<u16, CodecError> {
    field(buf, offset).map(u16::from_le_bytes)
}

pub fn write_u16_le(buf: &mut [u8], offset: usize, value: u16) -> Result<(), CodecError> {
    *field_mut(buf, offset)? = value.to_le_bytes();
    Ok(())
}

// ---------------------------------------------------------------------------
// 64-bit
// ---------------------------------------------------------------------------

pub fn read_u64_be(buf: &[u8], offset: usize) -> Result<u64, CodecError> {
    field(buf, offset).map(u64::from_be_bytes)
}

pub fn write_u64_be(buf: &mut [u8], offset: usize, value: u64) -> Result<(), CodecError> {
    *field_mut(buf, offset)? = value.to_be_bytes();
    Ok(())
}

pub fn read_u64_le(buf: &[u8], offset: usize) -> Result<u64, CodecError> {
    field(buf, offset).map(u64::from_le_bytes)
}

pub fn write_u64_le(buf: &mut [u8], offset: usize, value: u64) -> Result<(), CodecError> {
    *field_mut(buf, offset)? = value.to_le_bytes();
    Ok(())
}
