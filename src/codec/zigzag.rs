// Zig-zag mapping between signed and unsigned integers.
//
// 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, ... so that small magnitudes of either
// sign map to small unsigned values. Same mapping as protobuf sint32/sint64.

/// Map a signed 32-bit integer onto the unsigned range.
#[inline]
pub const fn encode_i32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Inverse of [`encode_i32`].
#[inline]
pub const fn decode_i32(v: u32) -> i32 {
    ((v >> 1) as i32) ^ -((v & 1) as i32)
}

/// Map a signed 64-bit integer onto the unsigned range.
#[inline]
pub const fn encode_i64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`encode_i64`].
#[inline]
pub const fn decode_i64(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}
