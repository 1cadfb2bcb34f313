//! Icon writer
//!
//! Runs each requested size through a chain of icon sources and writes the
//! first one that succeeds. Failures are logged and never abort the run.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::icon::{self, embedded, raster, simple, IconError};

/// Where a written icon came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconSource {
    /// Drawn with the rasterizer
    Rasterized,
    /// Flat artwork from the built-in PNG encoder
    Encoded,
    /// Decoded from the base64 blobs compiled into the binary
    Embedded,
}

impl IconSource {
    pub fn produce(self, size: u32) -> Result<Vec<u8>, IconError> {
        match self {
            IconSource::Rasterized => raster::render_icon_png(size),
            IconSource::Encoded => simple::encode_simple_icon(size),
            IconSource::Embedded => embedded::embedded_icon(size),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IconSource::Rasterized => "high-quality",
            IconSource::Encoded => "basic",
            IconSource::Embedded => "embedded",
        }
    }
}

/// Source order for the default generator
pub const GENERATE_CHAIN: [IconSource; 3] = [
    IconSource::Rasterized,
    IconSource::Encoded,
    IconSource::Embedded,
];

/// Source order when restoring the pre-baked icons
pub const EMBEDDED_CHAIN: [IconSource; 2] = [IconSource::Embedded, IconSource::Encoded];

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Every icon source failed for {size}x{size}")]
    Exhausted { size: u32 },
}

/// Outcome for one icon file
#[derive(Debug, Clone, Serialize)]
pub struct IconReport {
    pub size: u32,
    pub path: PathBuf,
    /// Source that produced the file, `None` when nothing was written
    pub source: Option<IconSource>,
    pub bytes: usize,
    /// Failures from sources tried before the successful one (or all of them)
    pub failures: Vec<String>,
}

impl IconReport {
    pub fn is_written(&self) -> bool {
        self.source.is_some()
    }
}

/// Write `bytes` to `path`, replacing any existing file
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<(), WriteError> {
    fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Produce and write one icon, trying each source in order
pub fn write_icon(dir: &Path, size: u32, chain: &[IconSource]) -> IconReport {
    let path = icon::icon_path(dir, size);
    let mut report = IconReport {
        size,
        path: path.clone(),
        source: None,
        bytes: 0,
        failures: Vec::new(),
    };

    for &source in chain {
        let bytes = match source.produce(size) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(size, source = source.label(), "Icon source failed: {}", e);
                report.failures.push(format!("{}: {}", source.label(), e));
                continue;
            }
        };

        match write_file(&path, &bytes) {
            Ok(()) => {
                tracing::debug!(size, source = source.label(), path = %path.display(), "Wrote icon");
                report.source = Some(source);
                report.bytes = bytes.len();
                return report;
            }
            Err(e) => {
                tracing::warn!(size, source = source.label(), "Icon write failed: {}", e);
                report.failures.push(format!("{}: {}", source.label(), e));
            }
        }
    }

    tracing::error!(size, "{}", WriteError::Exhausted { size });
    report
}

/// Write every size through `chain` into `dir`, creating the directory first.
///
/// A directory that cannot be created is reported on every icon; the writes
/// are still attempted in case it already exists in a usable form.
pub fn write_icons(dir: &Path, sizes: &[u32], chain: &[IconSource]) -> Vec<IconReport> {
    let dir_error = ensure_dir(dir).err().map(|e| {
        tracing::warn!("{}", e);
        e.to_string()
    });

    sizes
        .iter()
        .map(|&size| {
            let mut report = write_icon(dir, size, chain);
            if let Some(err) = &dir_error {
                report.failures.insert(0, err.clone());
            }
            report
        })
        .collect()
}

/// One console line per icon
pub fn print_report(report: &IconReport) {
    let name = icon::icon_file_name(report.size);
    match report.source {
        Some(source) => println!(
            "Created {} {} ({} bytes)",
            source.label(),
            report.path.display(),
            report.bytes
        ),
        None => println!(
            "Failed to create {}: {}",
            name,
            report.failures.last().map(String::as_str).unwrap_or("no sources")
        ),
    }
}
