//! Flattening a page collection into one output document.
//!
//! Pages are copied structurally: each page dictionary is rebuilt in a new
//! document together with every object it references (content streams,
//! resources, fonts, images, annotations). Nothing is re-rendered.
//!
//! Attributes a page inherits from its page tree (`Resources`, `MediaBox`,
//! `CropBox`, `Rotate`) are written onto the copied page, since the source
//! page tree is not carried over. Objects shared by several pages of one
//! source are copied once per export. Every occurrence of a page in the
//! collection gets its own page object.
//!
//! # Examples
//!
//! ```no_run
//! use mergepdf::collection::PageCollection;
//! use mergepdf::export::export;
//! use mergepdf::page::PageReference;
//! use std::path::Path;
//!
//! # fn example() -> mergepdf::Result<()> {
//! let mut pages = PageCollection::new();
//! pages.append(PageReference::new("a.pdf", 0));
//! pages.append(PageReference::new("b.pdf", 2));
//!
//! let stats = export(&pages, Path::new("merged.pdf"))?;
//! println!("{} pages written", stats.pages_written);
//! # Ok(())
//! # }
//! ```

use log::{debug, info};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::collection::PageCollection;
use crate::config::OverwriteMode;
use crate::error::{MergePdfError, Result};
use crate::io::{PdfReader, PdfWriter, WriteOptions};
use crate::page::PageReference;
use crate::utils::format_file_size;

/// Page attributes that may be inherited from the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in broken files.
const MAX_TREE_DEPTH: usize = 64;

/// Options controlling how the output document is written.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// What to do when the output file already exists.
    pub overwrite_mode: OverwriteMode,

    /// Compress streams in the output.
    pub compress: bool,

    /// Write to a temporary sibling and rename into place.
    pub atomic: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            overwrite_mode: OverwriteMode::Overwrite,
            compress: true,
            atomic: true,
        }
    }
}

/// Statistics about a finished export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportStatistics {
    /// Number of pages in the output.
    pub pages_written: usize,

    /// Number of distinct source documents opened.
    pub sources_opened: usize,

    /// Number of indirect objects copied from sources.
    pub objects_copied: usize,

    /// Path of the written document.
    pub output_path: PathBuf,

    /// Size of the written document in bytes.
    pub file_size: u64,

    /// Time taken by the whole export.
    pub export_time: Duration,
}

impl ExportStatistics {
    /// Format the output size as a human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Export `collection` to `output_path` with default options.
///
/// # Errors
///
/// See [`Exporter::export`].
pub fn export(collection: &PageCollection, output_path: &Path) -> Result<ExportStatistics> {
    Exporter::new().export(collection, output_path)
}

/// Builds and writes merged documents.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
    reader: PdfReader,
}

impl Exporter {
    /// Exporter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exporter with custom options.
    pub fn with_options(options: ExportOptions) -> Self {
        Self {
            options,
            reader: PdfReader::new(),
        }
    }

    /// Write every page of `collection`, in order, to `output_path`.
    ///
    /// The collection is not modified, whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`MergePdfError::EmptyCollection`] if there is nothing to export
    /// - [`MergePdfError::SourceUnavailable`] if a source cannot be opened
    ///   or lacks the referenced page
    /// - [`MergePdfError::OutputExists`] under [`OverwriteMode::NoClobber`]
    /// - write errors from the output file
    ///
    /// No output file is left behind on error.
    pub fn export(
        &self,
        collection: &PageCollection,
        output_path: &Path,
    ) -> Result<ExportStatistics> {
        if collection.is_empty() {
            return Err(MergePdfError::EmptyCollection);
        }
        self.options.overwrite_mode.check(output_path)?;

        let start = Instant::now();
        let assembled = self.assemble(collection)?;
        let mut document = assembled.document;

        let writer = PdfWriter::with_options(WriteOptions {
            atomic: self.options.atomic,
            compress: self.options.compress,
            overwrite_mode: self.options.overwrite_mode,
            ..WriteOptions::default()
        });
        let write_stats = writer.save_with_stats(&mut document, output_path)?;

        let stats = ExportStatistics {
            pages_written: assembled.pages_written,
            sources_opened: assembled.sources_opened,
            objects_copied: assembled.objects_copied,
            output_path: write_stats.output_path,
            file_size: write_stats.file_size,
            export_time: start.elapsed(),
        };
        info!(
            "Exported {} page(s) from {} source(s) to {} ({})",
            stats.pages_written,
            stats.sources_opened,
            stats.output_path.display(),
            stats.format_file_size()
        );

        Ok(stats)
    }

    /// Build the merged document in memory without writing it.
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::export`], minus the output errors.
    pub fn build_document(&self, collection: &PageCollection) -> Result<Document> {
        if collection.is_empty() {
            return Err(MergePdfError::EmptyCollection);
        }
        Ok(self.assemble(collection)?.document)
    }

    fn assemble(&self, collection: &PageCollection) -> Result<Assembled> {
        let mut assembler = Assembler::new(&self.reader);
        for page in collection.get_all_ordered() {
            assembler.copy_page(page)?;
        }
        Ok(assembler.finish())
    }
}

struct Assembled {
    document: Document,
    pages_written: usize,
    sources_opened: usize,
    objects_copied: usize,
}

/// A source document opened during one export.
struct SourceDocument {
    document: Document,
    /// 1-based page number to page object.
    page_ids: BTreeMap<u32, ObjectId>,
    /// Source object id to id in the output.
    imported: HashMap<ObjectId, ObjectId>,
}

struct Assembler<'r> {
    reader: &'r PdfReader,
    target: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    sources: HashMap<PathBuf, SourceDocument>,
    objects_copied: usize,
}

impl<'r> Assembler<'r> {
    fn new(reader: &'r PdfReader) -> Self {
        let mut target = Document::with_version("1.5");
        let pages_id = target.new_object_id();
        Self {
            reader,
            target,
            pages_id,
            kids: Vec::new(),
            sources: HashMap::new(),
            objects_copied: 0,
        }
    }

    fn open_source(&mut self, path: &Path) -> Result<()> {
        if self.sources.contains_key(path) {
            return Ok(());
        }

        let loaded = self
            .reader
            .load(path)
            .map_err(|err| MergePdfError::source_unavailable(path.to_path_buf(), reason_of(err)))?;
        debug!(
            "Opened source {} ({} pages)",
            path.display(),
            loaded.page_count
        );

        if loaded.document.version > self.target.version {
            self.target.version = loaded.document.version.clone();
        }
        let page_ids = loaded.document.get_pages();
        self.sources.insert(
            path.to_path_buf(),
            SourceDocument {
                document: loaded.document,
                page_ids,
                imported: HashMap::new(),
            },
        );
        Ok(())
    }

    fn copy_page(&mut self, page: &PageReference) -> Result<()> {
        let path = page.source_path();
        self.open_source(path)?;

        let source = self.sources.get_mut(path).ok_or_else(|| {
            MergePdfError::source_unavailable(path.to_path_buf(), "source was not opened")
        })?;

        let page_id = page
            .page_number
            .checked_add(1)
            .and_then(|number| source.page_ids.get(&number))
            .copied()
            .ok_or_else(|| {
                MergePdfError::source_unavailable(
                    path.to_path_buf(),
                    format!(
                        "page {} requested but the document has {} page(s)",
                        page.display_number(),
                        source.page_ids.len()
                    ),
                )
            })?;
        let page_dict = source
            .document
            .get_dictionary(page_id)
            .map_err(|err| MergePdfError::source_unavailable(path.to_path_buf(), err.to_string()))?;

        let mut copier = ObjectCopier {
            source: &source.document,
            imported: &mut source.imported,
            target: &mut self.target,
            copied: 0,
        };

        let mut new_page = Dictionary::new();
        for (key, value) in page_dict.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            new_page.set(key.clone(), copier.copy(value));
        }
        for key in INHERITABLE_KEYS {
            if new_page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(&source.document, page_dict, key) {
                new_page.set(key.to_vec(), copier.copy(value));
            }
        }
        new_page.set("Parent", self.pages_id);

        self.objects_copied += copier.copied;
        let new_id = self.target.add_object(new_page);
        self.kids.push(Object::Reference(new_id));
        debug!("Copied {page} as object {new_id:?}");

        Ok(())
    }

    fn finish(mut self) -> Assembled {
        let pages_written = self.kids.len();
        self.target.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => pages_written as i64,
                "Kids" => self.kids,
            }),
        );
        let catalog_id = self.target.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.target.trailer.set("Root", catalog_id);

        Assembled {
            document: self.target,
            pages_written,
            sources_opened: self.sources.len(),
            objects_copied: self.objects_copied,
        }
    }
}

/// Deep copy of objects from one source into the output document.
struct ObjectCopier<'a> {
    source: &'a Document,
    imported: &'a mut HashMap<ObjectId, ObjectId>,
    target: &'a mut Document,
    copied: usize,
}

impl ObjectCopier<'_> {
    fn copy(&mut self, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(*id),
            Object::Array(items) => Object::Array(items.iter().map(|item| self.copy(item)).collect()),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dict)),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.copy_dictionary(&stream.dict);
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, dict: &Dictionary) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            copy.set(key.clone(), self.copy(value));
        }
        copy
    }

    fn copy_reference(&mut self, id: ObjectId) -> Object {
        if let Some(new_id) = self.imported.get(&id) {
            return Object::Reference(*new_id);
        }

        // Dangling references read as null.
        let Ok(object) = self.source.get_object(id) else {
            return Object::Null;
        };
        // Pages are rebuilt by the assembler; back-references to the
        // source page tree (annotation /P, outline targets) are dropped.
        if is_page_tree_node(object) {
            return Object::Null;
        }

        // Registered before recursing so cycles resolve to the new id.
        let new_id = self.target.new_object_id();
        self.imported.insert(id, new_id);
        let copy = self.copy(object);
        self.target.objects.insert(new_id, copy);
        self.copied += 1;

        Object::Reference(new_id)
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    let Object::Dictionary(dict) = object else {
        return false;
    };
    matches!(dict.get(b"Type"), Ok(Object::Name(name)) if name == b"Page" || name == b"Pages")
}

/// Look up `key` on the ancestors of `page`.
fn inherited_attribute<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut current = page;
    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        current = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
    }
    None
}

fn reason_of(err: MergePdfError) -> String {
    match err {
        MergePdfError::FileNotFound { .. } => "file no longer exists".to_string(),
        MergePdfError::NotAFile { .. } => "path is not a file".to_string(),
        MergePdfError::FailedToLoadPdf { reason, .. } => reason,
        MergePdfError::EncryptedPdf { .. } => "document is encrypted".to_string(),
        other => other.to_string(),
    }
}
