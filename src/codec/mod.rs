// Integer wire codecs.
//
// # Modules
//
// - `zigzag` — signed/unsigned bijection used before varint encoding
// - `varint` — base-128 varints, 32- and 64-bit, raw and zig-zag
// - `fixed`  — fixed-width big/little-endian packing at explicit offsets
// - `error`  — `CodecError`

pub mod error;
pub mod fixed;
pub mod varint;
pub mod zigzag;

// Re-export key items for convenience.
pub use error::CodecError;
pub use varint::{
    MAX_GROUPS_32, MAX_GROUPS_64, decode_varint, decode_varlong, encode_varint, encode_varlong,
    size_of_varint, size_of_varlong,
};
