//! Pre-baked icons compiled into the binary
//!
//! Each blob is a base64-encoded PNG matching the flat fallback artwork.
//! Blobs are validated before use so a corrupted constant never reaches disk.

use base64::Engine;

use super::IconError;
use crate::png::{ChunkReader, ImageHeader, IDAT, IEND, IHDR};

const ICON16_BASE64: &str = concat!(
    "iVBORw0KGgoAAAANSUhEUgAAABAAAAAQCAYAAAAf8/9hAAAAHUlEQVR42mMo8170nxLMMAwNIARG",
    "DRgZBozAvAAA4grIn1B8eqMAAAAASUVORK5CYII=",
);

const ICON48_BASE64: &str = concat!(
    "iVBORw0KGgoAAAANSUhEUgAAADAAAAAwCAYAAABXAvmHAAAATUlEQVR42u3YQQ0AIAwEwfqrHwRh",
    "tKigKWQuWQHzvVi56+UCAAAAAAAAAKARcHsAAAAAAAAAAAAAAAAAAAAAADMBnjkAAAAAAACAjwAH",
    "TwIN+E7i6KwAAAAASUVORK5CYII=",
);

const ICON128_BASE64: &str = concat!(
    "iVBORw0KGgoAAAANSUhEUgAAAIAAAACACAYAAADDPmHLAAABLklEQVR42u3SQQ0AQAgDQfzhB0Fn",
    "9LDAlzBN1kAzUfm+7hZOAMARAAgAASAABIAAEAACQAAIAAEgAASAABAAAkAACAABIAAEgAAQAAJA",
    "AAgAASAABIAAGHR9AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
    "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
    "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAKD9",
    "AQCAEwAQAAJAAAgAASAABIAAEAACQAAIAAEgAASAABAAAkAACAABIAAEgAAQAAJAAAgAragBKDsq",
    "b/5LFykAAAAASUVORK5CYII=",
);

/// Base64 text of the embedded icon for `size`, if one exists
pub fn embedded_base64(size: u32) -> Option<&'static str> {
    match size {
        16 => Some(ICON16_BASE64),
        48 => Some(ICON48_BASE64),
        128 => Some(ICON128_BASE64),
        _ => None,
    }
}

/// Decode base64 text, ignoring line breaks and surrounding whitespace
pub fn decode_base64(text: &str) -> Result<Vec<u8>, IconError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(compact)?)
}

/// Check that `bytes` is a well-formed PNG of the expected square size
pub fn validate_icon(bytes: &[u8], size: u32) -> Result<ImageHeader, IconError> {
    let reject = |reason: String| IconError::InvalidEmbedded { size, reason };

    let mut header = None;
    let mut has_idat = false;
    let mut last_kind = None;

    for chunk in ChunkReader::new(bytes)? {
        let chunk = chunk?;
        if last_kind == Some(IEND) {
            return Err(reject("data after IEND".to_string()));
        }

        match chunk.kind {
            IHDR if header.is_none() && last_kind.is_none() => {
                header = Some(ImageHeader::parse(chunk.data)?);
            }
            IHDR => return Err(reject("IHDR is not the first chunk".to_string())),
            _ if header.is_none() => {
                return Err(reject(format!("{} before IHDR", chunk.kind_str())));
            }
            IDAT => has_idat = true,
            _ => {}
        }
        last_kind = Some(chunk.kind);
    }

    let header = header.ok_or_else(|| reject("missing IHDR".to_string()))?;
    if !has_idat {
        return Err(reject("missing IDAT".to_string()));
    }
    if last_kind != Some(IEND) {
        return Err(reject("missing IEND".to_string()));
    }
    if header.width != size || header.height != size {
        return Err(reject(format!(
            "header declares {}x{}",
            header.width, header.height
        )));
    }

    Ok(header)
}

/// Decode and validate the embedded icon for `size`
pub fn embedded_icon(size: u32) -> Result<Vec<u8>, IconError> {
    let text = embedded_base64(size).ok_or(IconError::UnknownSize(size))?;
    let bytes = decode_base64(text)?;
    validate_icon(&bytes, size)?;
    tracing::debug!(size, bytes = bytes.len(), "Decoded embedded icon");
    Ok(bytes)
}
