//! Page references and collection entries.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// One page of one source document.
///
/// `page_number` is zero-based and was valid for the source when the
/// reference was created. It is not checked again until export, so the
/// source file must stay in place until then.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PageReference {
    /// Path of the originating PDF (generated PDF for images).
    pub source_path: PathBuf,
    /// Zero-based page index into the source.
    pub page_number: u32,
}

impl PageReference {
    /// Create a reference to page `page_number` (zero-based) of `source_path`.
    pub fn new(source_path: impl Into<PathBuf>, page_number: u32) -> Self {
        Self {
            source_path: source_path.into(),
            page_number,
        }
    }

    /// Source document path.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// 1-based page number, as shown to users.
    pub fn display_number(&self) -> u64 {
        u64::from(self.page_number) + 1
    }
}

impl fmt::Display for PageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .source_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| self.source_path.to_string_lossy());
        write!(f, "{name} p.{}", self.display_number())
    }
}

/// Opaque, stable identifier of one collection entry.
///
/// Ids are handed out in insertion order and never reused by the collection
/// that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub(crate) u64);

impl EntryId {
    /// Raw numeric value, for logs and error messages.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A page reference together with the id it was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Stable id of this entry.
    pub id: EntryId,
    /// The referenced page.
    #[serde(flatten)]
    pub page: PageReference,
}
