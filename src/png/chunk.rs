//! PNG chunk framing
//!
//! A chunk is `length (BE u32) | type (4 ASCII bytes) | payload | CRC32(type + payload)`.

use super::{PngError, SIGNATURE};

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// Length + type + CRC
const CHUNK_OVERHEAD: usize = 12;

/// Append a framed chunk to `out`
pub fn write_chunk(out: &mut Vec<u8>, kind: [u8; 4], payload: &[u8]) {
    out.reserve(CHUNK_OVERHEAD + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(&kind);
    out.extend_from_slice(payload);
    out.extend_from_slice(&chunk_crc(kind, payload).to_be_bytes());
}

/// CRC32 over the chunk type followed by its payload
pub fn chunk_crc(kind: [u8; 4], payload: &[u8]) -> u32 {
    let crc = crc32_update(0xffff_ffff, &kind);
    !crc32_update(crc, payload)
}

/// CRC32 (IEEE 802.3, reflected polynomial 0xEDB88320) without the final inversion
fn crc32_update(mut crc: u32, data: &[u8]) -> u32 {
    for byte in data {
        crc ^= *byte as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xedb8_8320
            } else {
                crc >> 1
            };
        }
    }
    crc
}

/// A chunk borrowed from an encoded PNG stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub kind: [u8; 4],
    pub data: &'a [u8],
}

impl Chunk<'_> {
    /// Chunk type as text, lossy for non-ASCII tags
    pub fn kind_str(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }
}

/// Iterates over the chunks following the PNG signature, verifying each CRC.
///
/// Iteration stops after the first error.
pub struct ChunkReader<'a> {
    rest: &'a [u8],
    failed: bool,
}

impl<'a> ChunkReader<'a> {
    /// Check the signature and position the reader on the first chunk
    pub fn new(bytes: &'a [u8]) -> Result<Self, PngError> {
        match bytes.strip_prefix(&SIGNATURE[..]) {
            Some(rest) => Ok(Self {
                rest,
                failed: false,
            }),
            None => Err(PngError::BadSignature),
        }
    }

    fn read_chunk(&mut self) -> Result<Chunk<'a>, PngError> {
        if self.rest.len() < CHUNK_OVERHEAD {
            return Err(PngError::Truncated);
        }

        let (len_bytes, rest) = self.rest.split_at(4);
        let len = u32::from_be_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]])
            as usize;
        if rest.len() < len + 8 {
            return Err(PngError::Truncated);
        }

        let kind = [rest[0], rest[1], rest[2], rest[3]];
        let data = &rest[4..4 + len];
        let crc_bytes = &rest[4 + len..8 + len];
        let stored = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
        let computed = chunk_crc(kind, data);
        if stored != computed {
            return Err(PngError::CrcMismatch {
                kind: String::from_utf8_lossy(&kind).into_owned(),
                stored,
                computed,
            });
        }

        self.rest = &rest[8 + len..];
        Ok(Chunk { kind, data })
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>, PngError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        let chunk = self.read_chunk();
        if chunk.is_err() {
            self.failed = true;
        }
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_check_value() {
        // Standard check value for "123456789"
        assert_eq!(chunk_crc(*b"1234", b"56789"), 0xcbf4_3926);
    }

    #[test]
    fn test_empty_iend_crc() {
        // Every PNG ends with these bytes
        assert_eq!(chunk_crc(IEND, &[]), 0xae42_6082);
    }

    #[test]
    fn test_write_chunk_layout() {
        let mut out = Vec::new();
        write_chunk(&mut out, *b"tEXt", b"abc");

        assert_eq!(out.len(), 12 + 3);
        assert_eq!(&out[0..4], &[0, 0, 0, 3]);
        assert_eq!(&out[4..8], b"tEXt");
        assert_eq!(&out[8..11], b"abc");
        assert_eq!(&out[11..], &chunk_crc(*b"tEXt", b"abc").to_be_bytes());
    }

    #[test]
    fn test_reader_walks_chunks() {
        let mut bytes = SIGNATURE.to_vec();
        write_chunk(&mut bytes, IHDR, &[1; 13]);
        write_chunk(&mut bytes, IEND, &[]);

        let chunks: Vec<_> = ChunkReader::new(&bytes)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].kind, IHDR);
        assert_eq!(chunks[0].data.len(), 13);
        assert_eq!(chunks[1].kind_str(), "IEND");
        assert!(chunks[1].data.is_empty());
    }

    #[test]
    fn test_reader_rejects_bad_signature() {
        let bytes = b"GIF89a\0\0\0\0\0\0";
        assert!(matches!(ChunkReader::new(bytes), Err(PngError::BadSignature)));
    }

    #[test]
    fn test_reader_rejects_corrupted_crc() {
        let mut bytes = SIGNATURE.to_vec();
        write_chunk(&mut bytes, IDAT, b"pixels");
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;

        let mut reader = ChunkReader::new(&bytes).unwrap();
        match reader.next() {
            Some(Err(PngError::CrcMismatch { kind, .. })) => assert_eq!(kind, "IDAT"),
            other => panic!("expected CRC mismatch, got {:?}", other),
        }
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reader_rejects_truncated_stream() {
        let mut bytes = SIGNATURE.to_vec();
        write_chunk(&mut bytes, IDAT, &[0; 32]);
        bytes.truncate(bytes.len() - 10);

        let mut reader = ChunkReader::new(&bytes).unwrap();
        assert!(matches!(reader.next(), Some(Err(PngError::Truncated))));
    }
}
