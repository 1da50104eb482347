//! Pixel buffer and block geometry.

/// Decoded image data: interleaved RGB, 8 bits per sample.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved RGB samples, length = width * height * 3
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub const CHANNELS: usize = 3;

    /// Build a buffer, checking that the sample count matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * Self::CHANNELS {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Bytes per pixel row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * Self::CHANNELS
    }

    /// Number of full block-rows; a partial tail row is ignored.
    pub fn block_rows(&self, block_size: usize) -> usize {
        self.height as usize / block_size
    }

    /// Number of full block-columns; a partial tail column is ignored.
    pub fn block_cols(&self, block_size: usize) -> usize {
        self.width as usize / block_size
    }

    /// Samples of `rows` consecutive pixel rows starting at row `y`,
    /// spanning the full width.
    pub fn row_band(&self, y: usize, rows: usize) -> &[u8] {
        let stride = self.row_stride();
        &self.data[y * stride..(y + rows) * stride]
    }

    /// Drop all pixel rows below `height`.
    pub fn crop_to_height(&mut self, height: u32) {
        debug_assert!(height <= self.height);
        let stride = self.row_stride();
        self.data.truncate(height as usize * stride);
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_length() {
        assert!(PixelBuffer::new(4, 4, vec![0; 4 * 4 * 3]).is_some());
        assert!(PixelBuffer::new(4, 4, vec![0; 47]).is_none());
    }

    #[test]
    fn block_geometry_ignores_partial_tails() {
        let buffer = PixelBuffer::new(20, 17, vec![0; 20 * 17 * 3]).unwrap();
        assert_eq!(buffer.block_rows(8), 2);
        assert_eq!(buffer.block_cols(8), 2);
    }

    #[test]
    fn crop_truncates_samples() {
        let mut buffer = PixelBuffer::new(4, 8, vec![7; 4 * 8 * 3]).unwrap();
        buffer.crop_to_height(3);
        assert_eq!(buffer.height, 3);
        assert_eq!(buffer.data.len(), 4 * 3 * 3);
    }
}
