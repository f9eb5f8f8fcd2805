// Integer-list records on top of the varint codec.
//
// A record is the element count as an unsigned varint followed by each
// element as a zig-zag varlong:
//
//   count: varint(u64) | v0: varlong | v1: varlong | ...
//
// In-memory (`encode_record` / `decode_record`), streaming
// (`write_record` / `read_record`) and file-level helpers are provided.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, trace};
use thiserror::Error;

use crate::codec::CodecError;
use crate::codec::varint;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `write_record_file()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordStats {
    /// Number of integers in the record.
    pub values: u64,
    /// Encoded record size in bytes.
    pub bytes: u64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for record file operations.
#[derive(Debug, Error)]
pub enum RecordError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The record bytes do not decode.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    /// Bytes remain after a complete record.
    #[error("{trailing} trailing bytes after record")]
    TrailingBytes { trailing: usize },
}

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

/// Upper bound on speculative preallocation when the count comes from a stream.
const MAX_PREALLOC: usize = 4096;

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Exact encoded size of a record holding `values`.
pub fn record_size(values: &[i64]) -> usize {
    varint::sizeof_u64(values.len() as u64)
        + values
            .iter()
            .map(|&v| varint::size_of_varlong(v))
            .sum::<usize>()
}

/// Encode `values` as a record into an exactly pre-sized buffer.
pub fn encode_record(values: &[i64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(record_size(values));
    varint::encode_u64_into(values.len() as u64, &mut out);
    for &v in values {
        varint::encode_varlong_into(v, &mut out);
    }
    out
}

/// Decode a record from the front of `data`.
/// Returns `(values, bytes_consumed)`.
pub fn decode_record(data: &[u8]) -> Result<(Vec<i64>, usize), CodecError> {
    let (count, mut pos) = varint::decode_u64(data)?;
    // Every element takes at least one byte.
    let remaining = (data.len() - pos) as u64;
    let mut values = Vec::with_capacity(count.min(remaining) as usize);
    for _ in 0..count {
        let (v, len) = varint::decode_varlong(&data[pos..])?;
        values.push(v);
        pos += len;
    }
    Ok((values, pos))
}

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

/// Write `values` as a record to `w`. Returns the number of bytes written.
pub fn write_record<W: Write>(w: &mut W, values: &[i64]) -> io::Result<usize> {
    let mut written = varint::write_u64(w, values.len() as u64)?;
    for &v in values {
        written += varint::write_varlong(w, v)?;
    }
    Ok(written)
}

/// Read one record from `r`, consuming exactly its bytes.
pub fn read_record<R: Read>(r: &mut R) -> io::Result<Vec<i64>> {
    let count = varint::read_u64(r)?;
    trace!("record header: {count} values");
    let cap = usize::try_from(count).map_or(MAX_PREALLOC, |c| c.min(MAX_PREALLOC));
    let mut values = Vec::with_capacity(cap);
    for _ in 0..count {
        values.push(varint::read_varlong(r)?);
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Write `values` as a single record to `path`, replacing any existing file.
pub fn write_record_file(path: &Path, values: &[i64]) -> Result<RecordStats, RecordError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
    let bytes = write_record(&mut writer, values)?;
    writer.flush()?;
    debug!(
        "wrote record: {} values, {bytes} bytes to {}",
        values.len(),
        path.display()
    );
    Ok(RecordStats {
        values: values.len() as u64,
        bytes: bytes as u64,
    })
}

/// Read the single record stored in `path`.
///
/// The file must contain exactly one record; extra bytes are an error.
pub fn read_record_file(path: &Path) -> Result<Vec<i64>, RecordError> {
    let mut data = Vec::new();
    BufReader::with_capacity(BUF_SIZE, File::open(path)?).read_to_end(&mut data)?;
    let (values, consumed) = decode_record(&data).inspect_err(|e| {
        debug!("record decode failed for {}: {e}", path.display());
    })?;
    if consumed != data.len() {
        return Err(RecordError::TrailingBytes {
            trailing: data.len() - consumed,
        });
    }
    debug!(
        "read record: {} values, {consumed} bytes from {}",
        values.len(),
        path.display()
    );
    Ok(values)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layout() {
        let enc = encode_record(&[0, -1, 1, 64]);
        assert_eq!(enc, [0x04, 0x00, 0x01, 0x02, 0x80, 0x01]);
        assert_eq!(enc.len(), record_size(&[0, -1, 1, 64]));
        assert_eq!(encode_record(&[]), [0x00]);
    }

    #[test]
    fn record_roundtrip_memory_and_stream() {
        let values = [i64::MIN, -300, 0, 7, i64::MAX];
        let enc = encode_record(&values);
        assert_eq!(decode_record(&enc).unwrap(), (values.to_vec(), enc.len()));

        let mut streamed = Vec::new();
        let n = write_record(&mut streamed, &values).unwrap();
        assert_eq!(n, enc.len());
        assert_eq!(streamed, enc);
        assert_eq!(read_record(&mut streamed.as_slice()).unwrap(), values);
    }

    #[test]
    fn truncated_record() {
        let enc = encode_record(&[1, 2, 3]);
        assert_eq!(
            decode_record(&enc[..enc.len() - 1]),
            Err(CodecError::Truncated { width: 64 })
        );
        // Header claims far more values than present.
        assert!(decode_record(&[0xFF, 0xFF, 0xFF, 0x0F]).is_err());
        let err = read_record(&mut &enc[..2]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.vp");
        let values = vec![5, -5, 1 << 40];
        let stats = write_record_file(&path, &values).unwrap();
        assert_eq!(stats.values, 3);
        assert_eq!(stats.bytes, std::fs::metadata(&path).unwrap().len());
        assert_eq!(read_record_file(&path).unwrap(), values);
    }

    #[test]
    fn file_with_trailing_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.vp");
        let mut data = encode_record(&[1]);
        data.extend_from_slice(&[0xAA, 0xBB]);
        std::fs::write(&path, &data).unwrap();
        assert!(matches!(
            read_record_file(&path),
            Err(RecordError::TrailingBytes { trailing: 2 })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_record_file(&dir.path().join("nope")),
            Err(RecordError::Io(_))
        ));
    }
}
