//! Varpack: zig-zag varints, fixed-width integer packing and byte-slice
//! helpers.
//!
//! The crate provides:
//! - Base-128 varint/varlong codecs, protobuf wire-compatible (`codec::varint`)
//! - Fixed-width big/little-endian packing at explicit offsets (`codec::fixed`)
//! - Byte-slice concatenation, splitting, prefix matching and hex (`bytes`)
//! - Length-prefixed integer-list records and file helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! Every codec function is pure; only functions that return or append to a
//! `Vec` allocate.
//!
//! # Quick Start
//!
//! ```
//! use varpack::codec::{decode_varint, encode_varint, size_of_varint};
//!
//! let bytes = encode_varint(-65);
//! assert_eq!(bytes, [0x81, 0x01]);
//! assert_eq!(size_of_varint(-65), bytes.len());
//! assert_eq!(decode_varint(&bytes).unwrap(), (-65, 2));
//! ```

pub mod bytes;
pub mod codec;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;
