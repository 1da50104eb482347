//! Cosmetic post-processing for repaired images.
//!
//! Recovered scans tend to come out flat and slightly soft, so the original
//! toolchain finished with an auto-contrast / sharpen / saturation pass over
//! the `Repaired` folder. This is a pure pixel filter with no coupling to
//! the repair logic.

use crate::models::PixelBuffer;
use image::RgbImage;

#[derive(Debug, Clone, Copy)]
pub struct EnhanceOptions {
    /// Fraction of samples clipped from each histogram end before
    /// stretching (0.01 = 1% cutoff).
    pub contrast_cutoff: f32,

    /// Saturation multiplier around the per-pixel gray value.
    pub saturation: f32,

    /// Gaussian sigma for the unsharp mask.
    pub sharpen_sigma: f32,

    /// Minimum brightness difference before sharpening applies.
    pub sharpen_threshold: i32,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            contrast_cutoff: 0.01,
            saturation: 3.0,
            sharpen_sigma: 1.0,
            sharpen_threshold: 0,
        }
    }
}

/// Apply auto-contrast, sharpening, and saturation in that order.
pub fn auto_color(buffer: &PixelBuffer, options: &EnhanceOptions) -> PixelBuffer {
    let mut data = buffer.data.clone();
    autocontrast(&mut data, options.contrast_cutoff);

    let mut data = sharpen(
        data,
        buffer.width,
        buffer.height,
        options.sharpen_sigma,
        options.sharpen_threshold,
    );
    saturate(&mut data, options.saturation);

    PixelBuffer {
        width: buffer.width,
        height: buffer.height,
        data,
    }
}

/// Per-channel histogram stretch with percentile cutoff.
fn autocontrast(data: &mut [u8], cutoff: f32) {
    let pixel_count = data.len() / PixelBuffer::CHANNELS;
    if pixel_count == 0 {
        return;
    }
    let clip = (pixel_count as f32 * cutoff) as u32;

    for channel in 0..PixelBuffer::CHANNELS {
        let mut histogram = [0u32; 256];
        for pixel in data.chunks_exact(PixelBuffer::CHANNELS) {
            histogram[pixel[channel] as usize] += 1;
        }

        let mut low = 0usize;
        let mut seen = 0u32;
        for (i, &count) in histogram.iter().enumerate() {
            seen += count;
            if seen > clip {
                low = i;
                break;
            }
        }

        let mut high = 255usize;
        let mut seen = 0u32;
        for (i, &count) in histogram.iter().enumerate().rev() {
            seen += count;
            if seen > clip {
                high = i;
                break;
            }
        }

        if high <= low {
            continue;
        }
        let scale = 255.0 / (high - low) as f32;
        for pixel in data.chunks_exact_mut(PixelBuffer::CHANNELS) {
            let stretched = (pixel[channel] as f32 - low as f32) * scale;
            pixel[channel] = stretched.clamp(0.0, 255.0).round() as u8;
        }
    }
}

fn sharpen(data: Vec<u8>, width: u32, height: u32, sigma: f32, threshold: i32) -> Vec<u8> {
    match RgbImage::from_raw(width, height, data) {
        Some(img) => image::imageops::unsharpen(&img, sigma, threshold).into_raw(),
        // Dimension mismatch cannot happen for a well-formed PixelBuffer
        None => vec![0; width as usize * height as usize * PixelBuffer::CHANNELS],
    }
}

/// Scale each channel away from the pixel's gray value.
fn saturate(data: &mut [u8], factor: f32) {
    if (factor - 1.0).abs() < f32::EPSILON {
        return;
    }
    for pixel in data.chunks_exact_mut(PixelBuffer::CHANNELS) {
        let gray =
            (pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32) / PixelBuffer::CHANNELS as f32;
        for sample in pixel.iter_mut() {
            let boosted = gray + (*sample as f32 - gray) * factor;
            *sample = boosted.clamp(0.0, 255.0).round() as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autocontrast_stretches_to_full_range() {
        // Two-value image: 100 and 150 on every channel, zero cutoff
        let mut data = Vec::new();
        for i in 0..64 {
            let v = if i % 2 == 0 { 100u8 } else { 150u8 };
            data.extend_from_slice(&[v, v, v]);
        }
        autocontrast(&mut data, 0.0);
        assert!(data.iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn autocontrast_ignores_flat_channels() {
        let mut data = vec![128u8; 16 * 3];
        autocontrast(&mut data, 0.01);
        assert!(data.iter().all(|&v| v == 128));
    }

    #[test]
    fn saturation_leaves_gray_pixels_alone() {
        let mut data = vec![90u8; 8 * 3];
        saturate(&mut data, 3.0);
        assert!(data.iter().all(|&v| v == 90));
    }

    #[test]
    fn saturation_pushes_channels_apart() {
        let mut data = vec![100u8, 120, 140];
        saturate(&mut data, 2.0);
        assert!(data[0] < 100);
        assert_eq!(data[1], 120);
        assert!(data[2] > 140);
    }

    #[test]
    fn auto_color_preserves_dimensions() {
        let buffer = PixelBuffer::new(16, 12, vec![77; 16 * 12 * 3]).unwrap();
        let out = auto_color(&buffer, &EnhanceOptions::default());
        assert_eq!((out.width, out.height), (16, 12));
        assert_eq!(out.data.len(), buffer.data.len());
    }
}
