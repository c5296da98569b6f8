//! mergepdf - Assemble one PDF from dropped-in PDFs and images.
//!
//! The library models a merge session as an ordered, editable
//! [`PageCollection`]:
//!
//! - input files are resolved into page references, converting images into
//!   one-page PDFs and importing whole PDFs or page ranges
//! - the collection is reviewed and pruned by position or stable entry id
//!   ([`review`])
//! - the remaining pages are copied structurally into one output document
//!
//! # Examples
//!
//! ```no_run
//! use mergepdf::{ImportChoice, PageCollection, PageSourceResolver, export};
//! use std::path::Path;
//!
//! # fn example() -> mergepdf::Result<()> {
//! let resolver = PageSourceResolver::new();
//! let mut pages = PageCollection::new();
//!
//! pages.append_many(resolver.resolve_with_choice(Path::new("report.pdf"), ImportChoice::All)?);
//! pages.append_many(resolver.resolve_range(Path::new("appendix.pdf"), 2, 4)?);
//! pages.append_many(resolver.resolve_with_choice(Path::new("scan.png"), ImportChoice::All)?);
//!
//! // Drop the cover page.
//! pages.remove_at(0)?;
//!
//! let stats = export(&pages, Path::new("merged.pdf"))?;
//! println!("Wrote {} pages", stats.pages_written);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod io;
pub mod page;
pub mod render;
pub mod resolve;
pub mod review;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use collection::PageCollection;
pub use config::{Config, ImportMode, OverwriteMode, PageRange};
pub use convert::ImageConverter;
pub use error::{MergePdfError, Result};
pub use export::{ExportOptions, ExportStatistics, Exporter, export};
pub use page::{EntryId, PageEntry, PageReference};
pub use render::{RenderAdapter, ThumbnailSize, render_previews};
pub use resolve::{ImportChoice, ImportPrompt, PageSourceResolver, SourceKind};
pub use review::{ReviewAction, ReviewPrompt, run_review};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
