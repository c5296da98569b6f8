//! Document builders shared by unit tests.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::Path;

/// Build a document with `pages` pages.
///
/// Page `i` has a MediaBox of `[0 0 width_base+i 300]` so tests can tell
/// pages apart after a copy. Resources live on the page tree root and are
/// inherited by every page.
pub(crate) fn build_test_document(pages: u32, width_base: i64) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for i in 0..pages {
        let content = format!("BT /F1 24 Tf 20 150 Td (Page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), (width_base + i as i64).into(), 300.into()],
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => pages as i64,
            "Kids" => kids,
            "Resources" => resources_id,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a document built by [`build_test_document`] to `path`.
pub(crate) fn write_test_pdf(path: &Path, pages: u32, width_base: i64) {
    let mut doc = build_test_document(pages, width_base);
    doc.save(path).unwrap();
}

/// Write a solid-color PNG of `width` x `height` pixels to `path`.
pub(crate) fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    img.save(path).unwrap();
}
