//! Integration tests for error handling.

use mergepdf::error::MergePdfError;
use mergepdf::{PageCollection, PageReference, PageSourceResolver, export};

use crate::common::Workspace;

#[test]
fn test_empty_collection_writes_nothing() {
    let ws = Workspace::new();
    let output = ws.path("merged.pdf");

    let result = export(&PageCollection::new(), &output);

    assert!(matches!(result, Err(MergePdfError::EmptyCollection)));
    assert!(ws.file_names().is_empty());
}

#[test]
fn test_deleted_source_aborts_export_without_leftovers() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 1, 100);
    let b = ws.pdf("b.pdf", 1, 200);
    let output = ws.path("merged.pdf");

    let mut pages = PageCollection::new();
    pages.append_many(vec![PageReference::new(&a, 0), PageReference::new(&b, 0)]);
    std::fs::remove_file(&b).unwrap();

    let err = export(&pages, &output).unwrap_err();

    assert!(matches!(err, MergePdfError::SourceUnavailable { .. }));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(ws.file_names(), vec!["a.pdf".to_string()]);
    assert_eq!(pages.len(), 2);
}

#[test]
fn test_corrupt_source_is_unavailable() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 1, 100);
    let pages = {
        let mut pages = PageCollection::new();
        pages.append(PageReference::new(&a, 0));
        pages
    };
    std::fs::write(&a, b"%PDF-1.5 truncated").unwrap();

    let result = export(&pages, &ws.path("merged.pdf"));
    assert!(matches!(result, Err(MergePdfError::SourceUnavailable { .. })));
}

#[test]
fn test_remove_out_of_range_keeps_collection() {
    let mut pages = PageCollection::new();
    pages.append_many((0..3).map(|n| PageReference::new("doc.pdf", n)));

    let err = pages.remove_at(3).unwrap_err();

    assert!(matches!(err, MergePdfError::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(pages.len(), 3);
}

#[test]
fn test_unreadable_pdf_input() {
    let ws = Workspace::new();
    let bad = ws.path("bad.pdf");
    std::fs::write(&bad, b"this is not a pdf").unwrap();

    let err = PageSourceResolver::new().resolve_range(&bad, 1, 1).unwrap_err();

    assert!(matches!(err, MergePdfError::FailedToLoadPdf { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_corrupt_image_input() {
    let ws = Workspace::new();
    let bad = ws.path("bad.jpg");
    std::fs::write(&bad, b"not a jpeg").unwrap();

    let err = PageSourceResolver::new()
        .resolve_with_choice(&bad, mergepdf::ImportChoice::All)
        .unwrap_err();

    assert!(matches!(err, MergePdfError::ImageConversion { .. }));
    assert!(!ws.path("bad.pdf").exists());
}
