//! PDF writing and saving operations.
//!
//! Documents are written to a temporary sibling file first and renamed into
//! place, so a failed write never leaves a partial file at the target path.
//!
//! # Examples
//!
//! ```no_run
//! use mergepdf::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # fn example(mut doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(&mut doc, Path::new("output.pdf"))?;
//! # Ok(())
//! # }
//! ```

use log::debug;
use lopdf::Document;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::OverwriteMode;
use crate::error::{MergePdfError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// What to do when the target already exists.
    pub overwrite_mode: OverwriteMode,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            overwrite_mode: OverwriteMode::Overwrite,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Save a PDF document to a file.
    pub fn save(&self, doc: &mut Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target exists and the overwrite mode forbids replacing it
    /// - The parent directory cannot be created
    /// - The file cannot be created, written or renamed into place
    pub fn save_with_stats(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();
        self.options.overwrite_mode.check(path)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| MergePdfError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        if self.options.compress {
            doc.compress();
        }

        let write_path = if self.options.atomic {
            temp_path_for(path)
        } else {
            path.to_path_buf()
        };

        if let Err(err) = self.write_file(doc, &write_path) {
            let _ = std::fs::remove_file(&write_path);
            return Err(err);
        }

        if self.options.atomic
            && let Err(e) = std::fs::rename(&write_path, path)
        {
            let _ = std::fs::remove_file(&write_path);
            return Err(MergePdfError::FailedToWrite {
                path: path.to_path_buf(),
                source: e,
            });
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
            compressed: self.options.compress,
        };
        debug!(
            "Wrote {} ({}) in {:?}",
            path.display(),
            stats.format_file_size(),
            stats.write_time
        );

        Ok(stats)
    }

    fn write_file(&self, doc: &mut Document, write_path: &Path) -> Result<()> {
        let file =
            std::fs::File::create(write_path).map_err(|e| MergePdfError::FailedToCreateOutput {
                path: write_path.to_path_buf(),
                source: e,
            })?;

        let mut writer = std::io::BufWriter::with_capacity(self.options.buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| MergePdfError::FailedToWrite {
                path: write_path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| MergePdfError::FailedToWrite {
            path: write_path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}

/// Hidden sibling used for atomic writes, e.g. `out/.merged.pdf.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
