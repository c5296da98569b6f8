//! Image to PDF conversion.
//!
//! A dropped image becomes a one-page PDF written next to it, with the same
//! stem and a `.pdf` extension. The page is sized so that the image prints
//! at the configured resolution: `points = pixels * 72 / dpi`.
//!
//! Transparent pixels are composited onto white; the page carries a single
//! 8-bit RGB image XObject.

use image::{Rgb, RgbImage, RgbaImage};
use log::info;
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_IMAGE_DPI, OverwriteMode};
use crate::error::{MergePdfError, Result};
use crate::io::{PdfReader, PdfWriter, WriteOptions};

/// Converts raster images into single-page PDFs.
#[derive(Debug, Clone)]
pub struct ImageConverter {
    dpi: f32,
    overwrite_mode: OverwriteMode,
}

impl Default for ImageConverter {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_IMAGE_DPI,
            overwrite_mode: OverwriteMode::Overwrite,
        }
    }
}

impl ImageConverter {
    /// Converter at the default resolution that overwrites existing PDFs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dpi` pixels per inch to size pages.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Policy for an existing PDF at the generated path.
    pub fn with_overwrite_mode(mut self, overwrite_mode: OverwriteMode) -> Self {
        self.overwrite_mode = overwrite_mode;
        self
    }

    /// Convert `image_path` and return the path of the generated PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is missing or cannot be decoded, if the
    /// generated path exists under [`OverwriteMode::NoClobber`], or if the
    /// PDF cannot be written.
    pub fn convert(&self, image_path: &Path) -> Result<PathBuf> {
        PdfReader::check_path_exists(image_path)?;

        let decoded = image::open(image_path).map_err(|source| MergePdfError::ImageConversion {
            path: image_path.to_path_buf(),
            source,
        })?;
        let rgb = flatten_onto_white(&decoded.to_rgba8());

        let output_path = pdf_path_for(image_path);
        let mut doc = image_to_document(&rgb, self.dpi);

        let writer = PdfWriter::with_options(WriteOptions {
            overwrite_mode: self.overwrite_mode,
            ..WriteOptions::default()
        });
        writer.save(&mut doc, &output_path)?;

        info!(
            "Converted {} ({}x{} px) to {}",
            image_path.display(),
            rgb.width(),
            rgb.height(),
            output_path.display()
        );
        Ok(output_path)
    }
}

/// Path of the PDF generated for `image_path`: same directory and stem.
pub fn pdf_path_for(image_path: &Path) -> PathBuf {
    image_path.with_extension("pdf")
}

/// Build a one-page document showing `img` at `dpi`.
pub fn image_to_document(img: &RgbImage, dpi: f32) -> Document {
    let (width_px, height_px) = img.dimensions();
    let page_w = width_px as f32 * 72.0 / dpi;
    let page_h = height_px as f32 * 72.0 / dpi;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width_px as i64,
        "Height" => height_px as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    let image_id = doc.add_object(Stream::new(image_dict, img.as_raw().clone()));

    let content = format!("q\n{page_w} 0 0 {page_h} 0 0 cm\n/Im0 Do\nQ\n");
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), Object::Real(page_w), Object::Real(page_h)],
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Composite RGBA pixels over a white background.
fn flatten_onto_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8| -> u8 {
            let c = c as u16 * a as u16 + 255 * (255 - a as u16);
            (c / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}
