//! Cover image resolution and decoding.

use crate::RenderError;
use image::{DynamicImage, ImageFormat};
use quire_traits::{ResourceProvider, SharedResourceData};
use quire_types::Book;
use std::io::Cursor;
use std::sync::Arc;

/// Encodings a cover is embedded with. Anything else is re-encoded as PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverFormat {
    Png,
    Jpeg,
}

impl CoverFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CoverFormat::Png => "png",
            CoverFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            CoverFormat::Png => "image/png",
            CoverFormat::Jpeg => "image/jpeg",
        }
    }
}

/// A decoded cover image, ready to embed.
#[derive(Debug, Clone)]
pub struct CoverImage {
    pub source_path: String,
    pub format: CoverFormat,
    /// Encoded bytes in `format`.
    pub data: SharedResourceData,
    pub width: u32,
    pub height: u32,
    pub image: Arc<DynamicImage>,
}

impl CoverImage {
    pub fn decode(source_path: &str, bytes: SharedResourceData) -> Result<Self, RenderError> {
        let detected = image::guess_format(&bytes)?;
        let decoded = image::load_from_memory(&bytes)?;

        let (format, data) = match detected {
            ImageFormat::Png => (CoverFormat::Png, bytes),
            ImageFormat::Jpeg => (CoverFormat::Jpeg, bytes),
            other => {
                log::debug!("Re-encoding {:?} cover '{}' as PNG", other, source_path);
                let mut out = Cursor::new(Vec::new());
                decoded.write_to(&mut out, ImageFormat::Png)?;
                (CoverFormat::Png, Arc::new(out.into_inner()))
            }
        };

        Ok(Self {
            source_path: source_path.to_string(),
            format,
            data,
            width: decoded.width(),
            height: decoded.height(),
            image: Arc::new(decoded),
        })
    }

    /// The largest size with the image's aspect ratio that fits the box.
    pub fn fit_within(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        if self.width == 0 || self.height == 0 {
            return (0.0, 0.0);
        }
        let scale = (max_width / self.width as f32).min(max_height / self.height as f32);
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}

/// Resolves and decodes the book's cover.
///
/// Returns `None` for books without a real cover (absent, blank, or a
/// placeholder avatar) and, with a warning, for covers that are missing or
/// cannot be decoded. A cover problem never fails an export.
pub fn load_cover(book: &Book, resources: &dyn ResourceProvider) -> Option<CoverImage> {
    let path = match book.real_cover_image() {
        Some(path) => path,
        None => {
            if book.cover_image.is_some() {
                log::debug!("Book '{}' has a placeholder cover, not rendering it", book.id);
            }
            return None;
        }
    };

    if !resources.exists(path) {
        log::warn!(
            "Cover image '{}' for book '{}' not found ({}), skipping",
            path,
            book.id,
            resources.name()
        );
        return None;
    }

    let decoded = resources
        .load(path)
        .map_err(RenderError::from)
        .and_then(|bytes| CoverImage::decode(path, bytes));

    match decoded {
        Ok(cover) => {
            log::debug!(
                "Loaded {}x{} {:?} cover for book '{}'",
                cover.width,
                cover.height,
                cover.format,
                book.id
            );
            Some(cover)
        }
        Err(e) => {
            log::warn!("Skipping cover image '{}' for book '{}': {}", path, book.id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use quire_traits::InMemoryResourceProvider;
    use quire_types::{BookId, UserId};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb([200u8, 10, 10]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img).write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn book_with_cover(cover: Option<&str>) -> Book {
        Book {
            id: BookId::from("b1"),
            owner_id: UserId::from("u1"),
            title: "Atlas".into(),
            subtitle: None,
            author: None,
            cover_image: cover.map(str::to_string),
            chapters: vec![],
        }
    }

    #[test]
    fn test_png_cover_is_kept_as_is() {
        let bytes = encoded(4, 2, ImageFormat::Png);
        let provider = InMemoryResourceProvider::new().with("/uploads/c.png", bytes.clone());
        let cover = load_cover(&book_with_cover(Some("/uploads/c.png")), &provider).unwrap();

        assert_eq!(cover.format, CoverFormat::Png);
        assert_eq!((cover.width, cover.height), (4, 2));
        assert_eq!(*cover.data, bytes);
    }

    #[test]
    fn test_other_formats_are_reencoded_as_png() {
        let bytes = encoded(3, 3, ImageFormat::Gif);
        let cover = CoverImage::decode("c.gif", Arc::new(bytes)).unwrap();
        assert_eq!(cover.format, CoverFormat::Png);
        assert_eq!(image::guess_format(&cover.data).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_placeholder_is_never_loaded() {
        let path = "/uploads/pravatar-1.png";
        let provider = InMemoryResourceProvider::new().with(path, encoded(2, 2, ImageFormat::Png));
        assert!(load_cover(&book_with_cover(Some(path)), &provider).is_none());
    }

    #[test]
    fn test_missing_or_corrupt_cover_is_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let provider = InMemoryResourceProvider::new().with("/bad.png", b"not an image".to_vec());
        assert!(load_cover(&book_with_cover(Some("/missing.png")), &provider).is_none());
        assert!(load_cover(&book_with_cover(Some("/bad.png")), &provider).is_none());
        assert!(load_cover(&book_with_cover(None), &provider).is_none());
    }

    #[test]
    fn test_fit_within_keeps_aspect_ratio() {
        let cover =
            CoverImage::decode("c.png", Arc::new(encoded(200, 100, ImageFormat::Png))).unwrap();
        let (w, h) = cover.fit_within(100.0, 100.0);
        assert_eq!((w, h), (100.0, 50.0));
    }
}
