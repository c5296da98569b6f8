//! Turning dropped files into page references.
//!
//! Each input path is classified by extension:
//!
//! - `.png`, `.jpg`, `.jpeg` are converted to a one-page PDF next to the
//!   image, which then provides page 0
//! - `.pdf` files with one page provide page 0 without asking
//! - `.pdf` files with more pages ask an [`ImportPrompt`] whether to import
//!   everything or a 1-based inclusive range
//! - anything else is skipped
//!
//! A range that does not fit the document is handed back to the prompt
//! together with the error, and the prompt is asked again until it returns
//! a valid range or gives up.

use log::{debug, warn};
use std::path::Path;

use crate::config::PageRange;
use crate::convert::ImageConverter;
use crate::error::{MergePdfError, Result};
use crate::io::PdfReader;
use crate::page::PageReference;

/// What kind of page source a path is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A PDF document.
    Pdf,
    /// A raster image to convert.
    Image,
    /// Anything else.
    Unsupported,
}

impl SourceKind {
    /// Classify `path` by its extension, ignoring case.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("png" | "jpg" | "jpeg") => Self::Image,
            _ => Self::Unsupported,
        }
    }
}

/// Questions asked while importing a multi-page PDF.
pub trait ImportPrompt {
    /// Ask whether all `total_pages` pages of `path` should be imported.
    fn confirm_import_all(&mut self, path: &Path, total_pages: u32) -> bool;

    /// Ask for the range of pages to import.
    ///
    /// `previous_error` holds the reason the last answer was rejected.
    /// Returning `None` cancels the import of this file.
    fn page_range(
        &mut self,
        path: &Path,
        total_pages: u32,
        previous_error: Option<&MergePdfError>,
    ) -> Option<PageRange>;
}

/// A decided answer to the import questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportChoice {
    /// Import every page.
    All,
    /// Import a 1-based inclusive range.
    Range(PageRange),
}

/// Resolves input paths into page references.
#[derive(Debug, Clone, Default)]
pub struct PageSourceResolver {
    reader: PdfReader,
    converter: ImageConverter,
}

impl PageSourceResolver {
    /// Resolver with default reader and image converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `converter` for image inputs.
    pub fn with_converter(mut self, converter: ImageConverter) -> Self {
        self.converter = converter;
        self
    }

    /// Resolve one path, asking `prompt` about multi-page PDFs.
    ///
    /// Unsupported files yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or converted. Range
    /// errors never escape; they are handed back to the prompt.
    pub fn resolve<P>(&self, path: &Path, prompt: &mut P) -> Result<Vec<PageReference>>
    where
        P: ImportPrompt + ?Sized,
    {
        let total_pages = match self.open_source(path)? {
            Source::Pages(pages) => return Ok(pages),
            Source::MultiPage(total_pages) => total_pages,
        };

        if prompt.confirm_import_all(path, total_pages) {
            return Ok(all_pages(path, total_pages));
        }

        let mut previous_error = None;
        loop {
            let Some(range) = prompt.page_range(path, total_pages, previous_error.as_ref()) else {
                debug!("Import of {} cancelled", path.display());
                return Ok(Vec::new());
            };

            match range_pages(path, total_pages, range) {
                Ok(pages) => return Ok(pages),
                Err(err) if err.is_recoverable() => previous_error = Some(err),
                Err(err) => return Err(err),
            }
        }
    }

    /// Resolve one path with an answer decided up front.
    ///
    /// Single-page PDFs and images ignore `choice`, as [`resolve`] never
    /// asks about them.
    ///
    /// # Errors
    ///
    /// Returns [`MergePdfError::InvalidPageRange`] if a range does not fit a
    /// multi-page PDF, or any error from reading or converting the file.
    ///
    /// [`resolve`]: PageSourceResolver::resolve
    pub fn resolve_with_choice(
        &self,
        path: &Path,
        choice: ImportChoice,
    ) -> Result<Vec<PageReference>> {
        let total_pages = match self.open_source(path)? {
            Source::Pages(pages) => return Ok(pages),
            Source::MultiPage(total_pages) => total_pages,
        };

        match choice {
            ImportChoice::All => Ok(all_pages(path, total_pages)),
            ImportChoice::Range(range) => range_pages(path, total_pages, range),
        }
    }

    /// Import pages `start..=end` (1-based) of the PDF at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MergePdfError::InvalidPageRange`] if `start > end`,
    /// `start < 1` or `end` is past the last page.
    pub fn resolve_range(&self, path: &Path, start: u32, end: u32) -> Result<Vec<PageReference>> {
        let total_pages = self.reader.page_count(path)?;
        range_pages(path, total_pages, PageRange::new(start, end))
    }

    /// Resolve a batch of paths in order and concatenate the results.
    ///
    /// # Errors
    ///
    /// Stops at the first path that fails to resolve.
    pub fn resolve_all<I, P>(&self, paths: I, prompt: &mut P) -> Result<Vec<PageReference>>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
        P: ImportPrompt + ?Sized,
    {
        let mut pages = Vec::new();
        for path in paths {
            pages.extend(self.resolve(path.as_ref(), prompt)?);
        }
        Ok(pages)
    }

    fn open_source(&self, path: &Path) -> Result<Source> {
        match SourceKind::from_path(path) {
            SourceKind::Image => {
                let pdf_path = self.converter.convert(path)?;
                Ok(Source::Pages(vec![PageReference::new(pdf_path, 0)]))
            }
            SourceKind::Pdf => {
                let total_pages = self.reader.page_count(path)?;
                if total_pages == 1 {
                    Ok(Source::Pages(vec![PageReference::new(path, 0)]))
                } else {
                    Ok(Source::MultiPage(total_pages))
                }
            }
            SourceKind::Unsupported => {
                warn!("Skipping unsupported file: {}", path.display());
                Ok(Source::Pages(Vec::new()))
            }
        }
    }
}

enum Source {
    /// Pages known without asking.
    Pages(Vec<PageReference>),
    /// A PDF with this many pages, needing an import decision.
    MultiPage(u32),
}

fn all_pages(path: &Path, total_pages: u32) -> Vec<PageReference> {
    (0..total_pages)
        .map(|page_number| PageReference::new(path, page_number))
        .collect()
}

fn range_pages(path: &Path, total_pages: u32, range: PageRange) -> Result<Vec<PageReference>> {
    range.validate(path, total_pages)?;
    Ok(range
        .to_indices()
        .map(|page_number| PageReference::new(path, page_number))
        .collect())
}
