use lopdf::{Stream, dictionary};
use quire_render_core::{CoverImage, RenderError};

/// Builds an RGB image XObject for `cover`.
///
/// Transparent pixels are composited over white. The pixel data is always
/// re-encoded, so the output does not depend on the source encoding.
pub fn cover_xobject(cover: &CoverImage) -> Result<Stream, RenderError> {
    let rgba = cover.image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u16::from(a);
        for channel in [r, g, b] {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha)) / 255;
            pixels.push(blended as u8);
        }
    }

    let mut stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        pixels,
    );
    stream.compress()?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;
    use std::sync::Arc;

    fn cover_from(img: DynamicImage) -> CoverImage {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        CoverImage::decode("cover.png", Arc::new(out.into_inner())).unwrap()
    }

    #[test]
    fn test_transparent_pixels_become_white() {
        let img = ImageBuffer::from_pixel(2, 1, Rgba([0u8, 0, 0, 0]));
        let stream = cover_xobject(&cover_from(DynamicImage::ImageRgba8(img))).unwrap();
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 2);
        let raw = stream.decompressed_content().unwrap_or_else(|_| stream.content.clone());
        assert_eq!(raw, vec![255; 6]);
    }

    #[test]
    fn test_opaque_pixels_are_kept() {
        let img = ImageBuffer::from_pixel(1, 1, Rgba([10u8, 20, 30, 255]));
        let stream = cover_xobject(&cover_from(DynamicImage::ImageRgba8(img))).unwrap();
        let raw = stream.decompressed_content().unwrap_or_else(|_| stream.content.clone());
        assert_eq!(raw, vec![10, 20, 30]);
    }
}
