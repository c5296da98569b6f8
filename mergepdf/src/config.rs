//! Configuration module for mergepdf.
//!
//! This module turns front-end arguments into a validated configuration that
//! drives a merge session. It handles:
//! - Validation of argument combinations
//! - Page range parsing and checking
//! - Overwrite policy for generated and exported files
//! - Application of defaults

use anyhow::{Context, Result, bail};

use crate::error::MergePdfError;
use crate::export::ExportOptions;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Resolution used when an image is turned into a PDF page.
pub const DEFAULT_IMAGE_DPI: f32 = 100.0;

/// Behavior when a file about to be written already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Replace the existing file without asking (default).
    #[default]
    Overwrite,
    /// Never overwrite, error if the file exists.
    NoClobber,
}

impl OverwriteMode {
    /// Check whether `path` may be written under this policy.
    ///
    /// # Errors
    ///
    /// Returns [`MergePdfError::OutputExists`] in no-clobber mode when the
    /// file is already there.
    pub fn check(&self, path: &Path) -> crate::Result<()> {
        match self {
            Self::Overwrite => Ok(()),
            Self::NoClobber if path.exists() => {
                Err(MergePdfError::output_exists(path.to_path_buf()))
            }
            Self::NoClobber => Ok(()),
        }
    }
}

/// A 1-based, inclusive page range as typed by the user.
///
/// The range is only checked against a document with
/// [`PageRange::validate`]; construction accepts any pair so that bad input
/// can be reported with the document's page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page (1-based).
    pub start: u32,
    /// Last page (1-based, inclusive).
    pub end: u32,
}

impl PageRange {
    /// Create a range from two 1-based page numbers.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Parse a page range string.
    ///
    /// Accepts a single page (`"3"`) or a span (`"2-4"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string format is invalid, a page number is
    /// zero, or the start is after the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use mergepdf::config::PageRange;
    ///
    /// let range = PageRange::parse("2-4").unwrap();
    /// assert_eq!(range.start, 2);
    /// assert_eq!(range.end, 4);
    ///
    /// assert!(PageRange::parse("5-3").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Page range cannot be empty");
        }

        let (start, end) = match s.split_once('-') {
            Some((start, end)) => {
                if end.contains('-') {
                    bail!("Invalid page range format: {s}. Expected format like '2-4'");
                }
                let start: u32 = start
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {start}"))?;
                let end: u32 = end
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {end}"))?;
                (start, end)
            }
            None => {
                let page: u32 = s
                    .parse()
                    .with_context(|| format!("Invalid page number: {s}"))?;
                (page, page)
            }
        };

        if start == 0 || end == 0 {
            bail!("Page numbers must be positive (1-indexed)");
        }

        if start > end {
            bail!(
                "Invalid range {start}-{end}: start page must be less than or equal to end page"
            );
        }

        Ok(Self { start, end })
    }

    /// Check the range against a document with `total_pages` pages.
    ///
    /// # Errors
    ///
    /// Returns [`MergePdfError::InvalidPageRange`] if `start > end`,
    /// `start < 1` or `end > total_pages`.
    pub fn validate(&self, path: &Path, total_pages: u32) -> crate::Result<()> {
        if self.start > self.end || self.start < 1 || self.end > total_pages {
            return Err(MergePdfError::InvalidPageRange {
                path: path.to_path_buf(),
                start: self.start,
                end: self.end,
                total_pages,
            });
        }
        Ok(())
    }

    /// Zero-based page indexes covered by this range.
    ///
    /// Only meaningful after [`PageRange::validate`] succeeded.
    pub fn to_indices(&self) -> RangeInclusive<u32> {
        self.start.saturating_sub(1)..=self.end.saturating_sub(1)
    }

    /// Number of pages in the range.
    pub fn len(&self) -> u32 {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    /// Whether the range covers no page at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How multi-page PDFs are imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Ask the prompt collaborator for every multi-page PDF (default).
    #[default]
    Ask,
    /// Import every page without asking.
    All,
    /// Import the same page range from every multi-page PDF.
    Range(PageRange),
}

/// Complete configuration for a merge session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dropped input files (in drop order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// How multi-page PDFs are imported.
    pub import_mode: ImportMode,

    /// Overwrite behavior for the exported document.
    pub overwrite_mode: OverwriteMode,

    /// Overwrite behavior for PDFs generated next to dropped images.
    pub image_overwrite_mode: OverwriteMode,

    /// Resolution used to size image pages.
    pub image_dpi: f32,

    /// Compress streams of the exported document.
    pub compress: bool,

    /// 1-based positions to remove from the assembled collection.
    pub remove: Vec<usize>,

    /// Run the interactive review step before export.
    pub review: bool,

    /// Print the page plan and stop.
    pub dry_run: bool,

    /// Emit machine-readable output.
    pub json: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from("merged.pdf"),
            import_mode: ImportMode::default(),
            overwrite_mode: OverwriteMode::default(),
            image_overwrite_mode: OverwriteMode::default(),
            image_dpi: DEFAULT_IMAGE_DPI,
            compress: true,
            remove: Vec::new(),
            review: false,
            dry_run: false,
            json: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The output path is also an input
    /// - The image resolution is not a positive number
    /// - A removal position is zero
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.inputs.iter().any(|input| input == &self.output) {
            bail!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            );
        }

        if !(self.image_dpi.is_finite() && self.image_dpi > 0.0) {
            bail!("Image resolution must be a positive number, got {}", self.image_dpi);
        }

        if self.remove.contains(&0) {
            bail!("Page positions are 1-indexed; 0 is not a valid position");
        }

        Ok(())
    }

    /// Export options derived from this configuration.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            overwrite_mode: self.overwrite_mode,
            compress: self.compress,
            ..ExportOptions::default()
        }
    }

    /// Check if status output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
