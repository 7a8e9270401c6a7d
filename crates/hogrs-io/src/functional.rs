use std::path::Path;

use hogrs_image::{Image, ImageSize};
use image::DynamicImage;

use crate::error::IoError;

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate. 8-bit
/// layouts keep their channels (gray: 1, gray with alpha: 2, RGB: 3, RGBA: 4); every other
/// layout is converted to 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A pixel array with shape (H, W, C).
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<Image<u8>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let decoded = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let (channels, data) = match decoded {
        DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
        other => (3, other.to_rgb8().into_raw()),
    };

    Ok(Image::new(ImageSize { width, height }, channels, data)?)
}
