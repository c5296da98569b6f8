//! File I/O for mergepdf.
//!
//! This module handles:
//! - Loading PDF documents from disk
//! - Writing assembled PDFs to disk atomically

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

