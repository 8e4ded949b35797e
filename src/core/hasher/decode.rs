//! Decoding into the canonical pixel representation.
//!
//! Every image is decoded with the `image` crate and converted to 8-bit RGB.
//! Alpha is dropped, grayscale is expanded to three equal channels and
//! 16-bit samples are narrowed, so the color model of the file never makes
//! two otherwise identical images look different.

use crate::error::HashError;
use image::{DynamicImage, ImageReader, RgbImage};
use std::path::Path;

/// Decode `path` into canonical RGB pixels.
///
/// The format is sniffed from the file content; the extension only decided
/// whether the scanner picked the file up.
pub fn decode_canonical(path: &Path) -> Result<RgbImage, HashError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| HashError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

    let image = reader.decode().map_err(|e| HashError::DecodeError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(canonicalize(image))
}

/// Convert an already-decoded image to canonical RGB
pub fn canonicalize(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(buffer) => buffer,
        other => other.to_rgb8(),
    }
}
