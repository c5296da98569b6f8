//! Preview rendering seam.
//!
//! Rasterizing PDF pages is left to the front end: it supplies a
//! [`RenderAdapter`] and gets back one bitmap per collection entry.

use image::RgbImage;

use crate::collection::PageCollection;
use crate::error::Result;
use crate::page::{EntryId, PageReference};

/// Pixel size of a preview bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ThumbnailSize {
    /// Create a thumbnail size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ThumbnailSize {
    fn default() -> Self {
        Self::new(500, 700)
    }
}

/// Produces preview bitmaps for pages.
pub trait RenderAdapter {
    /// Render `page` scaled to exactly `size`.
    fn render(&self, page: &PageReference, size: ThumbnailSize) -> Result<RgbImage>;
}

/// Render a preview of every entry of `collection`, in order.
///
/// A page that fails to render does not stop the others.
pub fn render_previews<R>(
    collection: &PageCollection,
    adapter: &R,
    size: ThumbnailSize,
) -> Vec<(EntryId, Result<RgbImage>)>
where
    R: RenderAdapter + ?Sized,
{
    collection
        .entries()
        .iter()
        .map(|entry| (entry.id, adapter.render(&entry.page, size)))
        .collect()
}
