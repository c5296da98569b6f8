//! Error types for mergepdf.
//!
//! Every fallible operation in the library returns [`MergePdfError`].
//!
//! # Error Categories
//!
//! - **Input Errors**: missing files, unreadable or encrypted PDFs, images
//!   that fail to decode
//! - **Validation Errors**: page ranges and positions outside the document or
//!   collection
//! - **Export Errors**: sources that disappeared since import, empty
//!   collections, output files that cannot be written

use std::io;
use std::path::PathBuf;

/// Result type alias for mergepdf operations.
pub type Result<T> = std::result::Result<T, MergePdfError>;

/// Main error type for mergepdf operations.
#[derive(Debug, thiserror::Error)]
pub enum MergePdfError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to load a PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Requested page range does not fit the document.
    #[error(
        "Invalid page range {start}-{end} for PDF: {}\n  \
         PDF has {total_pages} page(s). Page numbers must be between 1 and {total_pages}",
        .path.display()
    )]
    InvalidPageRange {
        /// Path to the PDF file.
        path: PathBuf,
        /// Requested first page (1-based).
        start: u32,
        /// Requested last page (1-based, inclusive).
        end: u32,
        /// Total pages in the PDF.
        total_pages: u32,
    },

    /// Position does not address an entry of the page collection.
    #[error("Position {index} is out of range for a collection of {len} page(s)")]
    IndexOutOfRange {
        /// Requested zero-based position.
        index: usize,
        /// Collection length at the time of the request.
        len: usize,
    },

    /// Entry id is not present in the page collection.
    #[error("No page with entry id {id} in the collection")]
    UnknownEntry {
        /// Raw value of the entry id.
        id: u64,
    },

    /// Image could not be decoded or converted into a PDF page.
    #[error("Failed to convert image: {}\n  Reason: {source}", .path.display())]
    ImageConversion {
        /// Path to the source image.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// A page source referenced by the collection can no longer be read.
    #[error(
        "Source document unavailable: {}\n  Reason: {reason}\n  \
         Hint: Restore the file or remove its pages, then export again",
        .path.display()
    )]
    SourceUnavailable {
        /// Path to the source document.
        path: PathBuf,
        /// Details about why it cannot be used.
        reason: String,
    },

    /// Export was requested for a collection without pages.
    #[error("Nothing to export: the page collection is empty")]
    EmptyCollection,

    /// Output file already exists and overwriting is disabled.
    #[error(
        "Output file already exists: {}\n  \
         Drop --no-clobber to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for MergePdfError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for MergePdfError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl MergePdfError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create a SourceUnavailable error.
    pub fn source_unavailable(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            path,
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error can be fixed by asking the user again.
    ///
    /// Range and position errors come from user input and are reported as a
    /// validation message; the session goes on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidPageRange { .. } | Self::IndexOutOfRange { .. } | Self::UnknownEntry { .. }
        )
    }

    /// Check if this error comes from reading an input file.
    ///
    /// The front end skips such a file and keeps going with the rest.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::ImageConversion { .. }
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::ImageConversion { .. } => 3,
            Self::InvalidPageRange { .. } => 1,
            Self::IndexOutOfRange { .. } => 1,
            Self::UnknownEntry { .. } => 1,
            Self::SourceUnavailable { .. } => 3,
            Self::EmptyCollection => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
