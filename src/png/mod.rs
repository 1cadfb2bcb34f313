//! Minimal PNG encoder
//!
//! Writes a single-image truecolor-with-alpha PNG: signature, one IHDR,
//! one IDAT holding the zlib stream of unfiltered scanlines, and an empty IEND.

mod chunk;

pub use chunk::*;

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use thiserror::Error;

/// The fixed 8-byte PNG file signature
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Bytes per RGBA8 pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Scanline filter type 0 ("None")
const FILTER_NONE: u8 = 0;

/// Errors produced while encoding or inspecting PNG data
#[derive(Debug, Error)]
pub enum PngError {
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Compression failed: {0}")]
    Compress(#[from] std::io::Error),

    #[error("Missing PNG signature")]
    BadSignature,

    #[error("Truncated PNG data")]
    Truncated,

    #[error("CRC mismatch in {kind} chunk (stored {stored:08x}, computed {computed:08x})")]
    CrcMismatch {
        kind: String,
        stored: u32,
        computed: u32,
    },

    #[error("Invalid IHDR: {0}")]
    InvalidHeader(String),
}

/// PNG color types this crate understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Truecolor,
    TruecolorAlpha,
}

impl ColorType {
    pub fn code(self) -> u8 {
        match self {
            ColorType::Truecolor => 2,
            ColorType::TruecolorAlpha => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(ColorType::Truecolor),
            6 => Some(ColorType::TruecolorAlpha),
            _ => None,
        }
    }
}

/// Contents of an IHDR chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
}

impl ImageHeader {
    /// Header for an 8-bit RGBA image
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::TruecolorAlpha,
        }
    }

    /// Serialize as the 13-byte IHDR payload.
    ///
    /// Compression, filter and interlace methods are always 0.
    pub fn to_bytes(&self) -> [u8; 13] {
        let mut out = [0u8; 13];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_type.code();
        out
    }

    pub fn parse(data: &[u8]) -> Result<Self, PngError> {
        if data.len() != 13 {
            return Err(PngError::InvalidHeader(format!(
                "payload is {} bytes, expected 13",
                data.len()
            )));
        }

        let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        if width == 0 || height == 0 {
            return Err(PngError::InvalidHeader(format!(
                "zero dimension {}x{}",
                width, height
            )));
        }

        let color_type = ColorType::from_code(data[9])
            .ok_or_else(|| PngError::InvalidHeader(format!("unsupported color type {}", data[9])))?;
        if data[10..13] != [0, 0, 0] {
            return Err(PngError::InvalidHeader(
                "non-zero compression, filter or interlace method".to_string(),
            ));
        }

        Ok(Self {
            width,
            height,
            bit_depth: data[8],
            color_type,
        })
    }
}

/// Encode a row-major RGBA8 pixel buffer as a PNG file
pub fn encode_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, PngError> {
    if width == 0 || height == 0 {
        return Err(PngError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if rgba.len() != expected {
        return Err(PngError::BufferLength {
            expected,
            actual: rgba.len(),
        });
    }

    let scanlines = filter_scanlines(width as usize, rgba);
    let compressed = compress_zlib(&scanlines)?;
    let header = ImageHeader::rgba8(width, height);

    let mut out = Vec::with_capacity(SIGNATURE.len() + compressed.len() + 3 * 12 + 13);
    out.extend_from_slice(&SIGNATURE);
    write_chunk(&mut out, IHDR, &header.to_bytes());
    write_chunk(&mut out, IDAT, &compressed);
    write_chunk(&mut out, IEND, &[]);

    tracing::debug!(
        width,
        height,
        raw = scanlines.len(),
        compressed = compressed.len(),
        "Encoded PNG"
    );

    Ok(out)
}

/// Prefix every row with the "None" filter byte
fn filter_scanlines(width: usize, rgba: &[u8]) -> Vec<u8> {
    let stride = width * BYTES_PER_PIXEL;
    let rows = rgba.len() / stride;
    let mut out = Vec::with_capacity(rgba.len() + rows);
    for row in rgba.chunks_exact(stride) {
        out.push(FILTER_NONE);
        out.extend_from_slice(row);
    }
    out
}

fn compress_zlib(data: &[u8]) -> Result<Vec<u8>, PngError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
