//! Image cropping
//!
//! Crops the color image with the same normalized rect used for depth
//! conversion, and encodes the result as JPEG for persistence.

use std::io::Cursor;

use image::DynamicImage;

use crate::models::CropRect;

use super::GeometryError;

/// Crop an image by a normalized rect
///
/// Pixel bounds come from the same formula as depth conversion; callers must
/// pass the identical rect value used for the depth buffer of this capture.
/// Rects exceeding the source dimensions are rejected, never clamped.
pub fn crop(image: &DynamicImage, rect: &CropRect) -> Result<DynamicImage, GeometryError> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let bounds = rect.pixel_bounds(width, height);
    if bounds.rows() <= 0 || bounds.cols() <= 0 {
        return Err(GeometryError::InvalidRegion {
            rows: bounds.rows(),
            cols: bounds.cols(),
        });
    }
    if !bounds.fits(width, height) {
        return Err(GeometryError::CropOutOfBounds {
            start_row: bounds.start_row,
            end_row: bounds.end_row,
            start_col: bounds.start_col,
            end_col: bounds.end_col,
        });
    }

    Ok(image.crop_imm(
        bounds.start_col as u32,
        bounds.start_row as u32,
        bounds.cols() as u32,
        bounds.rows() as u32,
    ))
}

/// Encode an image as JPEG bytes
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, image::ImageFormat::Jpeg)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 0])
        }))
    }

    #[test]
    fn test_crop_dimensions() {
        let image = test_image(100, 100);
        let rect = CropRect::new(0.25, 0.25, 0.5, 0.5);
        let cropped = crop(&image, &rect).unwrap();
        assert_eq!(cropped.width(), 50);
        assert_eq!(cropped.height(), 50);
    }

    #[test]
    fn test_crop_out_of_bounds_rejected() {
        let image = test_image(100, 100);
        let rect = CropRect::new(0.75, 0.75, 0.5, 0.5);
        let err = crop(&image, &rect).unwrap_err();
        assert!(matches!(err, GeometryError::CropOutOfBounds { .. }));
    }

    #[test]
    fn test_empty_crop_rejected() {
        let image = test_image(100, 100);
        let rect = CropRect::new(0.5, 0.5, 0.0, 0.0);
        let err = crop(&image, &rect).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidRegion { .. }));
    }

    #[test]
    fn test_jpeg_encoding_produces_jpeg_magic() {
        let image = test_image(16, 16);
        let bytes = encode_jpeg(&image).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
