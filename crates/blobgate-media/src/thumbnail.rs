use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;

use crate::error::{MediaError, MediaResult};

/// Fixed-width, aspect-preserving JPEG thumbnail derivation.
///
/// Output width is always `width`; height is scaled by integer arithmetic
/// from the source aspect ratio (minimum 1 pixel). The derived bytes are
/// computed fresh on every call — nothing is cached.
#[derive(Clone, Copy, Debug)]
pub struct Thumbnailer {
    width: u32,
    quality: u8,
}

impl Thumbnailer {
    pub fn new(width: u32, quality: u8) -> Self {
        debug_assert!(width > 0);
        Self { width, quality }
    }

    /// Target output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Decode `source` as an image, resize, and re-encode as JPEG.
    pub fn derive(&self, source: &[u8]) -> MediaResult<Vec<u8>> {
        if source.is_empty() {
            return Err(MediaError::EmptySource);
        }
        let decoded = image::load_from_memory(source).map_err(MediaError::Decode)?;
        let (src_width, src_height) = decoded.dimensions();
        let height = ((src_height as u64 * self.width as u64) / src_width as u64).max(1) as u32;
        let resized = decoded.resize_exact(self.width, height, FilterType::Triangle);

        // JPEG has no alpha channel; flatten before encoding.
        let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());
        let mut out = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
        rgb.write_with_encoder(encoder).map_err(MediaError::Encode)?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn output_width_is_fixed_and_height_proportional() {
        let source = png_fixture(256, 128);
        let derived = Thumbnailer::new(200, 50).derive(&source).unwrap();

        let thumb = image::load_from_memory(&derived).unwrap();
        assert_eq!(thumb.width(), 200);
        assert_eq!(thumb.height(), 100);
    }

    #[test]
    fn tall_sources_scale_up_proportionally() {
        let source = png_fixture(100, 400);
        let derived = Thumbnailer::new(200, 50).derive(&source).unwrap();

        let thumb = image::load_from_memory(&derived).unwrap();
        assert_eq!(thumb.width(), 200);
        assert_eq!(thumb.height(), 800);
    }

    #[test]
    fn output_is_jpeg() {
        let source = png_fixture(64, 64);
        let derived = Thumbnailer::new(200, 50).derive(&source).unwrap();
        assert_eq!(
            image::guess_format(&derived).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn very_wide_sources_clamp_height_to_one() {
        let source = png_fixture(2000, 1);
        let derived = Thumbnailer::new(200, 50).derive(&source).unwrap();

        let thumb = image::load_from_memory(&derived).unwrap();
        assert_eq!(thumb.height(), 1);
    }

    #[test]
    fn rgba_sources_are_flattened() {
        let img = image::RgbaImage::new(64, 32);
        let mut source = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut source), image::ImageFormat::Png)
            .unwrap();

        let derived = Thumbnailer::new(200, 50).derive(&source).unwrap();
        assert_eq!(image::load_from_memory(&derived).unwrap().width(), 200);
    }

    #[test]
    fn empty_source_is_rejected() {
        let err = Thumbnailer::new(200, 50).derive(&[]).unwrap_err();
        assert!(matches!(err, MediaError::EmptySource));
    }

    #[test]
    fn undecodable_source_is_rejected() {
        let err = Thumbnailer::new(200, 50)
            .derive(b"definitely not an image")
            .unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
    }
}
