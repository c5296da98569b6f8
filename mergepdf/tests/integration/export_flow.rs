//! Integration tests for editing and exporting a collection.

use lopdf::Document;
use mergepdf::config::OverwriteMode;
use mergepdf::{
    ExportOptions, Exporter, ImageConverter, ImportChoice, PageCollection, PageReference,
    PageSourceResolver, export,
};

use crate::common::{Workspace, page_widths};

#[test]
fn test_export_a0_b0_b1_a0() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 2, 100);
    let b = ws.pdf("b.pdf", 2, 300);
    let output = ws.path("merged.pdf");

    let mut pages = PageCollection::new();
    pages.append(PageReference::new(&a, 0));
    pages.append_many(vec![PageReference::new(&b, 0), PageReference::new(&b, 1)]);
    pages.append(PageReference::new(&a, 0));

    let stats = export(&pages, &output).unwrap();

    assert_eq!(stats.pages_written, 4);
    assert_eq!(page_widths(&output), vec![100.0, 300.0, 301.0, 100.0]);
    assert_eq!(pages.len(), 4);
}

#[test]
fn test_review_edits_then_export() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 5, 100);
    let cover = ws.png("cover.png", 72, 72);
    let output = ws.path("out/merged.pdf");

    let resolver =
        PageSourceResolver::new().with_converter(ImageConverter::new().with_dpi(72.0));
    let mut pages = PageCollection::new();
    pages.append_many(resolver.resolve_with_choice(&cover, ImportChoice::All).unwrap());
    let ids = pages.append_many(resolver.resolve_with_choice(&a, ImportChoice::All).unwrap());

    // Drop a.pdf p.1 by handle and the last page by position.
    pages.remove_by_id(ids[0]).unwrap();
    pages.remove_at(pages.len() - 1).unwrap();

    export(&pages, &output).unwrap();

    assert_eq!(page_widths(&output), vec![72.0, 101.0, 102.0, 103.0]);
}

#[test]
fn test_exported_pages_keep_content_and_resources() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 3, 100);
    let output = ws.path("merged.pdf");

    let mut pages = PageCollection::new();
    pages.append(PageReference::new(&a, 1));
    export(&pages, &output).unwrap();

    let doc = Document::load(&output).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    assert!(page.has(b"Resources"));

    let content = doc.get_page_content(page_id).unwrap();
    let text = String::from_utf8_lossy(&content);
    assert!(text.contains("(p2)"));
}

#[test]
fn test_export_overwrites_existing_output_by_default() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 1, 100);
    let output = ws.path("merged.pdf");
    std::fs::write(&output, b"stale").unwrap();

    let mut pages = PageCollection::new();
    pages.append(PageReference::new(&a, 0));

    export(&pages, &output).unwrap();
    assert_eq!(page_widths(&output), vec![100.0]);

    let no_clobber = Exporter::with_options(ExportOptions {
        overwrite_mode: OverwriteMode::NoClobber,
        ..ExportOptions::default()
    });
    assert!(no_clobber.export(&pages, &output).is_err());
}

#[test]
fn test_uncompressed_export() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 2, 100);
    let output = ws.path("plain.pdf");

    let mut pages = PageCollection::new();
    pages.append_many(vec![PageReference::new(&a, 1), PageReference::new(&a, 0)]);

    let exporter = Exporter::with_options(ExportOptions {
        compress: false,
        ..ExportOptions::default()
    });
    let stats = exporter.export(&pages, &output).unwrap();

    assert_eq!(stats.sources_opened, 1);
    assert_eq!(page_widths(&output), vec![101.0, 100.0]);
    let raw = std::fs::read(&output).unwrap();
    assert!(String::from_utf8_lossy(&raw).contains("(p2) Tj"));
}
