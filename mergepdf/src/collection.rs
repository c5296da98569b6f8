//! The ordered, editable set of pages that make up one merge session.
//!
//! A [`PageCollection`] is a plain value owned by whatever front end drives
//! the session. Order is insertion order and is the order pages are written
//! on export. Entries can be addressed by their current position, which
//! shifts after every removal, or by the [`EntryId`] they were stored under,
//! which does not.
//!
//! # Examples
//!
//! ```
//! use mergepdf::collection::PageCollection;
//! use mergepdf::page::PageReference;
//!
//! let mut pages = PageCollection::new();
//! let ids = pages.append_many(vec![
//!     PageReference::new("a.pdf", 0),
//!     PageReference::new("b.pdf", 0),
//!     PageReference::new("b.pdf", 1),
//! ]);
//!
//! pages.remove_by_id(ids[0]).unwrap();
//! assert_eq!(pages.position_of(ids[2]), Some(1));
//! ```

use log::debug;

use crate::error::{MergePdfError, Result};
use crate::page::{EntryId, PageEntry, PageReference};

/// Ordered working set of page references.
#[derive(Debug, Clone, Default)]
pub struct PageCollection {
    entries: Vec<PageEntry>,
    next_id: u64,
}

impl PageCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page to the end.
    pub fn append(&mut self, page: PageReference) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(PageEntry { id, page });
        id
    }

    /// Append pages to the end, keeping their order.
    ///
    /// The same page may be appended any number of times; every occurrence
    /// is its own entry.
    pub fn append_many<I>(&mut self, pages: I) -> Vec<EntryId>
    where
        I: IntoIterator<Item = PageReference>,
    {
        let ids: Vec<EntryId> = pages.into_iter().map(|page| self.append(page)).collect();
        debug!("Appended {} page(s), collection now has {}", ids.len(), self.len());
        ids
    }

    /// Remove the entry at `index`.
    ///
    /// Later entries move down by one position.
    ///
    /// # Errors
    ///
    /// Returns [`MergePdfError::IndexOutOfRange`] if `index >= len()`; the
    /// collection is left unchanged.
    pub fn remove_at(&mut self, index: usize) -> Result<PageReference> {
        if index >= self.entries.len() {
            return Err(MergePdfError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        let entry = self.entries.remove(index);
        debug!("Removed {} ({}) at position {index}", entry.page, entry.id);
        Ok(entry.page)
    }

    /// Remove the entry stored under `id`, wherever it is now.
    ///
    /// # Errors
    ///
    /// Returns [`MergePdfError::UnknownEntry`] if no entry has this id,
    /// for example because it was already removed.
    pub fn remove_by_id(&mut self, id: EntryId) -> Result<PageReference> {
        let index = self
            .position_of(id)
            .ok_or(MergePdfError::UnknownEntry { id: id.get() })?;
        self.remove_at(index)
    }

    /// Remove every entry.
    ///
    /// Ids already handed out are not reused afterwards.
    pub fn clear(&mut self) {
        debug!("Cleared {} page(s)", self.entries.len());
        self.entries.clear();
    }

    /// Current position of the entry stored under `id`.
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&PageEntry> {
        self.entries.get(index)
    }

    /// Number of pages in the collection.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no pages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in output order.
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    /// All page references, in output order.
    pub fn get_all_ordered(&self) -> impl ExactSizeIterator<Item = &PageReference> + '_ {
        self.entries.iter().map(|entry| &entry.page)
    }

    /// Number of distinct source documents referenced.
    pub fn source_count(&self) -> usize {
        let mut sources: Vec<_> = self.get_all_ordered().map(|p| p.source_path()).collect();
        sources.sort();
        sources.dedup();
        sources.len()
    }
}

impl Extend<PageReference> for PageCollection {
    fn extend<T: IntoIterator<Item = PageReference>>(&mut self, iter: T) {
        self.append_many(iter);
    }
}
