//! JPEG encoding for intermediate and final outputs.

use crate::error::{RepairError, Result};
use crate::models::PixelBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;
use std::fs;
use std::path::Path;

/// Encode a pixel buffer as baseline JPEG bytes.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .write_image(
            &buffer.data,
            buffer.width,
            buffer.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| RepairError::EncodeFailure {
            detail: e.to_string(),
        })?;
    Ok(out)
}

/// Encode a pixel buffer and write it to `path`.
///
/// Encoding happens fully in memory so the file write is a single
/// `fs::write` that flushes and closes on every path.
pub fn export_jpeg(buffer: &PixelBuffer, path: &Path, quality: u8) -> Result<()> {
    let bytes = encode_jpeg(buffer, quality)?;
    fs::write(path, &bytes).map_err(|e| RepairError::io(path, e))
}
