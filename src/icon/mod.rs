//! Extension icon artwork
//!
//! Three ways of producing icon bytes, from nicest to most basic:
//! - `raster`: rounded purple tile with a white document and text lines
//! - `simple`: flat purple square with a white centre, via the in-crate PNG encoder
//! - `embedded`: pre-baked base64 PNGs compiled into the binary

pub mod embedded;
pub mod raster;
pub mod simple;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::png::PngError;

/// Icon sizes required by the extension manifest
pub const ICON_SIZES: [u32; 3] = [16, 48, 128];

/// Default output directory, relative to the extension root
pub const DEFAULT_ICON_DIR: &str = "icons";

/// RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    /// Brand purple (#764ba2)
    pub const PURPLE: Rgba = Rgba(118, 75, 162, 255);
    pub const WHITE: Rgba = Rgba(255, 255, 255, 255);

    pub fn to_array(self) -> [u8; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

/// Errors that can occur while producing icon bytes
#[derive(Debug, Error)]
pub enum IconError {
    #[error("Rasterizer failed: {0}")]
    Raster(String),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] PngError),

    #[error("Base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Embedded {size}px icon rejected: {reason}")]
    InvalidEmbedded { size: u32, reason: String },

    #[error("No embedded icon for size {0}")]
    UnknownSize(u32),
}

/// File name for an icon of the given size, e.g. `icon48.png`
pub fn icon_file_name(size: u32) -> String {
    format!("icon{}.png", size)
}

/// Full output path for an icon of the given size
pub fn icon_path(dir: &Path, size: u32) -> PathBuf {
    dir.join(icon_file_name(size))
}
