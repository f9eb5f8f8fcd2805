// Error type shared by the varint and fixed-width codecs.

use std::io;

use thiserror::Error;

/// Errors produced while decoding varints or accessing fixed-width fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A 32-bit varint did not terminate within 5 bytes, or its 5th byte
    /// carried payload bits beyond bit 31.
    #[error("malformed varint: more than 32 bits of payload (partial value {partial:#010x})")]
    MalformedVarint { partial: u32 },

    /// A 64-bit varint did not terminate within 10 bytes, or its 10th byte
    /// carried payload bits beyond bit 63.
    #[error("malformed varlong: more than 64 bits of payload (partial value {partial:#018x})")]
    MalformedVarlong { partial: u64 },

    /// Input ended before a terminal (high bit clear) byte was seen.
    #[error("truncated {width}-bit varint: input ended before the terminal byte")]
    Truncated { width: u32 },

    /// A fixed-width access of `width` bytes at `offset` does not fit in a
    /// buffer of `len` bytes.
    #[error("index out of range: {width}-byte access at offset {offset} in buffer of {len} bytes")]
    IndexOutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },
}

impl From<CodecError> for io::Error {
    fn from(e: CodecError) -> io::Error {
        let kind = match e {
            CodecError::Truncated { .. } => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_maps_to_unexpected_eof() {
        let e: io::Error = CodecError::Truncated { width: 32 }.into();
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn malformed_maps_to_invalid_data() {
        let e: io::Error = CodecError::MalformedVarlong { partial: 7 }.into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert!(e.to_string().contains("malformed varlong"));
    }

    #[test]
    fn display_reports_offsets() {
        let e = CodecError::IndexOutOfRange {
            offset: 6,
            width: 4,
            len: 8,
        };
        assert_eq!(
            e.to_string(),
            "index out of range: 4-byte access at offset 6 in buffer of 8 bytes"
        );
    }
}
