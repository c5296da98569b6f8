//! PDF reading and loading operations.
//!
//! # Examples
//!
//! ```no_run
//! use mergepdf::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("a.pdf"))?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use log::debug;
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{MergePdfError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: u32,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len() as u32;
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// Loads PDFs that can contribute pages.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is a directory
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path_exists(path)?;

        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let doc = Document::load(&path_buf).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                MergePdfError::encrypted_pdf(path_buf.clone())
            } else {
                MergePdfError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if doc.get_pages().is_empty() {
            return Err(MergePdfError::failed_to_load_pdf(
                path_buf,
                "PDF has no pages",
            ));
        }

        let loaded = LoadedPdf::new(doc, path_buf, start.elapsed());
        debug!(
            "Loaded {} ({} pages) in {:?}",
            loaded.path.display(),
            loaded.page_count,
            loaded.load_time
        );

        Ok(loaded)
    }

    /// Count the pages of a PDF without keeping it open.
    pub fn page_count(&self, path: &Path) -> Result<u32> {
        Ok(self.load(path)?.page_count)
    }

    /// Check that `path` names an existing regular file.
    pub fn check_path_exists(path: &Path) -> Result<()> {
        let exists = path.try_exists()?;
        if !exists {
            return Err(MergePdfError::file_not_found(path.to_path_buf()));
        }

        if path.is_dir() {
            return Err(MergePdfError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }
}
