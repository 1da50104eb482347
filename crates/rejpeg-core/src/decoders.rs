//! JPEG decoding via the `image` crate.
//!
//! The codec is a consumed capability: spliced byte streams go in, RGB8
//! pixel buffers come out. Partial decodes are fine — the codec fills rows
//! it cannot reconstruct with the sentinel gray the analysis stage expects.

use crate::error::{RepairError, Result};
use crate::models::PixelBuffer;
use std::fs;
use std::path::Path;

/// Decode JPEG bytes into an RGB8 pixel buffer.
pub fn decode_jpeg(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Jpeg)
        .map_err(|e| RepairError::DecodeFailure {
            detail: e.to_string(),
        })?;
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(PixelBuffer {
        width,
        height,
        data: rgb.into_raw(),
    })
}

/// Read and decode a JPEG file.
pub fn decode_jpeg_file(path: &Path) -> Result<PixelBuffer> {
    let bytes = fs::read(path).map_err(|e| RepairError::io(path, e))?;
    decode_jpeg(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporters::encode_jpeg;

    #[test]
    fn decode_rejects_garbage() {
        let result = decode_jpeg(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(RepairError::DecodeFailure { .. })));
    }

    #[test]
    fn decode_roundtrips_encoded_buffer() {
        let buffer = PixelBuffer::new(16, 16, vec![130; 16 * 16 * 3]).unwrap();
        let bytes = encode_jpeg(&buffer, 95).unwrap();
        let decoded = decode_jpeg(&bytes).unwrap();
        assert_eq!(decoded.width, 16);
        assert_eq!(decoded.height, 16);
        assert_eq!(decoded.data.len(), 16 * 16 * 3);
    }
}
