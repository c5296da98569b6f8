//! Fixture builders for integration tests.
//!
//! PDFs and images are generated into temporary directories, so the tests
//! need no checked-in fixture files.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory that owns every generated fixture.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create an empty scratch directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of `name` inside the workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a PDF whose page `i` is `width_base + i` points wide.
    pub fn pdf(&self, name: &str, pages: u32, width_base: i64) -> PathBuf {
        let path = self.path(name);
        write_pdf(&path, pages, width_base);
        path
    }

    /// Write an opaque PNG of the given pixel size.
    pub fn png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path(name);
        image::RgbImage::from_pixel(width, height, image::Rgb([20, 120, 220]))
            .save(&path)
            .expect("Failed to write PNG");
        path
    }

    /// Write a JPEG of the given pixel size.
    pub fn jpeg(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path(name);
        image::RgbImage::from_pixel(width, height, image::Rgb([240, 240, 10]))
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .expect("Failed to write JPEG");
        path
    }

    /// Names of the files currently in the workspace, sorted.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("Failed to list temp dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Write a PDF with inherited resources and one content stream per page.
pub fn write_pdf(path: &Path, pages: u32, width_base: i64) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids = Vec::new();
    for i in 0..pages {
        let content = format!("BT /F1 12 Tf 10 10 Td (p{}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), (width_base + i as i64).into(), 400.into()],
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("Failed to write PDF");
}

/// Widths of the pages of the PDF at `path`, in page order.
pub fn page_widths(path: &Path) -> Vec<f32> {
    let doc = Document::load(path).expect("Failed to load output");
    doc.get_pages()
        .values()
        .map(|id| {
            let page = doc.get_dictionary(*id).expect("page dictionary");
            let media_box = page
                .get(b"MediaBox")
                .and_then(Object::as_array)
                .expect("MediaBox");
            media_box[2].as_float().expect("numeric width")
        })
        .collect()
}
