//! Integration tests for resolving dropped files into a collection.

use mergepdf::config::{OverwriteMode, PageRange};
use mergepdf::error::MergePdfError;
use mergepdf::{
    ImageConverter, ImportChoice, ImportPrompt, PageCollection, PageReference,
    PageSourceResolver,
};
use std::path::Path;

use crate::common::{Workspace, page_widths};

/// Answers "no" to import-all, then replays ranges.
struct RangeAnswers {
    ranges: Vec<PageRange>,
    rejected: usize,
}

impl ImportPrompt for RangeAnswers {
    fn confirm_import_all(&mut self, _path: &Path, _total_pages: u32) -> bool {
        false
    }

    fn page_range(
        &mut self,
        _path: &Path,
        _total_pages: u32,
        previous_error: Option<&MergePdfError>,
    ) -> Option<PageRange> {
        if previous_error.is_some() {
            self.rejected += 1;
        }
        if self.ranges.is_empty() {
            None
        } else {
            Some(self.ranges.remove(0))
        }
    }
}

struct AlwaysAll;

impl ImportPrompt for AlwaysAll {
    fn confirm_import_all(&mut self, _path: &Path, _total_pages: u32) -> bool {
        true
    }

    fn page_range(
        &mut self,
        _path: &Path,
        _total_pages: u32,
        _previous_error: Option<&MergePdfError>,
    ) -> Option<PageRange> {
        None
    }
}

#[test]
fn test_mixed_drop_builds_collection_in_order() {
    let ws = Workspace::new();
    let report = ws.pdf("report.pdf", 3, 100);
    let cover = ws.png("cover.png", 100, 200);
    let photo = ws.jpeg("photo.JPEG", 50, 50);
    let notes = ws.path("notes.txt");
    std::fs::write(&notes, b"ignored").unwrap();

    let resolver = PageSourceResolver::new();
    let mut pages = PageCollection::new();
    pages.append_many(
        resolver
            .resolve_all([&cover, &report, &notes, &photo], &mut AlwaysAll)
            .unwrap(),
    );

    let ordered: Vec<PageReference> = pages.get_all_ordered().cloned().collect();
    assert_eq!(
        ordered,
        vec![
            PageReference::new(ws.path("cover.pdf"), 0),
            PageReference::new(&report, 0),
            PageReference::new(&report, 1),
            PageReference::new(&report, 2),
            PageReference::new(ws.path("photo.pdf"), 0),
        ]
    );
    assert!(ws.file_names().contains(&"cover.pdf".to_string()));
}

#[test]
fn test_range_prompt_retries_until_valid() {
    let ws = Workspace::new();
    let doc = ws.pdf("ten.pdf", 10, 100);
    let mut prompt = RangeAnswers {
        ranges: vec![PageRange::new(5, 3), PageRange::new(2, 4)],
        rejected: 0,
    };

    let pages = PageSourceResolver::new().resolve(&doc, &mut prompt).unwrap();

    let numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(prompt.rejected, 1);
}

#[test]
fn test_direct_range_entry() {
    let ws = Workspace::new();
    let doc = ws.pdf("ten.pdf", 10, 100);
    let resolver = PageSourceResolver::new();

    let pages = resolver.resolve_range(&doc, 2, 4).unwrap();
    assert_eq!(pages.len(), 3);

    let err = resolver.resolve_range(&doc, 5, 3).unwrap_err();
    assert!(matches!(err, MergePdfError::InvalidPageRange { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_image_page_size_uses_dpi() {
    let ws = Workspace::new();
    let image = ws.png("wide.png", 300, 100);

    let resolver =
        PageSourceResolver::new().with_converter(ImageConverter::new().with_dpi(150.0));
    let pages = resolver
        .resolve_with_choice(&image, ImportChoice::All)
        .unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(page_widths(pages[0].source_path()), vec![144.0]);
}

#[test]
fn test_generated_pdf_overwrite_policy() {
    let ws = Workspace::new();
    let image = ws.png("scan.png", 10, 10);
    std::fs::write(ws.path("scan.pdf"), b"hand-made").unwrap();

    let keep = PageSourceResolver::new()
        .with_converter(ImageConverter::new().with_overwrite_mode(OverwriteMode::NoClobber));
    let result = keep.resolve(&image, &mut AlwaysAll);
    assert!(matches!(result, Err(MergePdfError::OutputExists { .. })));

    let pages = PageSourceResolver::new().resolve(&image, &mut AlwaysAll).unwrap();
    assert_eq!(pages, vec![PageReference::new(ws.path("scan.pdf"), 0)]);
    assert_eq!(page_widths(&ws.path("scan.pdf")).len(), 1);
}
