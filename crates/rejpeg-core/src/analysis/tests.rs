//! Tests for filler cropping and alignment detection.

use super::*;
use crate::models::PixelBuffer;

const B: usize = 8;
const SENTINEL: u8 = 128;
const THRESHOLD: f32 = 20.0;

/// Buffer of `height` rows where the bottom `filler_rows` pixel rows are
/// sentinel fill and everything above is a non-uniform pattern.
fn buffer_with_filler(width: u32, height: u32, filler_rows: u32) -> PixelBuffer {
    let stride = width as usize * 3;
    let mut data = vec![0u8; height as usize * stride];
    for y in 0..height as usize {
        for i in 0..stride {
            data[y * stride + i] = if (y as u32) < height - filler_rows {
                ((y * 31 + i * 7) % 256) as u8
            } else {
                SENTINEL
            };
        }
    }
    PixelBuffer::new(width, height, data).unwrap()
}

#[test]
fn crop_removes_exact_sentinel_bands() {
    let buffer = buffer_with_filler(32, 64, 16); // bottom 2 block-rows filler
    assert_eq!(crop_filler_rows(&buffer, B, SENTINEL), 48);
}

#[test]
fn crop_is_noop_without_filler() {
    let buffer = buffer_with_filler(32, 64, 0);
    assert_eq!(crop_filler_rows(&buffer, B, SENTINEL), 64);
}

#[test]
fn crop_is_idempotent() {
    let mut buffer = buffer_with_filler(32, 64, 24);
    let height = crop_filler_rows(&buffer, B, SENTINEL);
    assert_eq!(height, 40);
    buffer.crop_to_height(height);
    assert_eq!(crop_filler_rows(&buffer, B, SENTINEL), height);
}

#[test]
fn crop_halts_on_single_differing_sample() {
    let mut buffer = buffer_with_filler(32, 64, 16);
    // Poison one sample inside the second-to-last filler band
    let stride = buffer.row_stride();
    let index = 50 * stride + 17;
    buffer.data[index] = SENTINEL + 1;
    // Only the bottom band is pure filler now
    assert_eq!(crop_filler_rows(&buffer, B, SENTINEL), 56);
}

#[test]
fn crop_can_consume_entire_buffer() {
    let width = 16u32;
    let height = 24u32;
    let data = vec![SENTINEL; (width * height * 3) as usize];
    let buffer = PixelBuffer::new(width, height, data).unwrap();
    assert_eq!(crop_filler_rows(&buffer, B, SENTINEL), 0);
}

#[test]
fn all_sentinel_scanline_counts_every_block() {
    let width = 80u32; // 10 blocks
    let data = vec![SENTINEL; (width * 8 * 3) as usize];
    let buffer = PixelBuffer::new(width, 8, data).unwrap();
    assert_eq!(count_residual_blocks(&buffer, B, SENTINEL, THRESHOLD), 10);
}

#[test]
fn distant_scanline_counts_zero() {
    let width = 80u32;
    let data = vec![0u8; (width * 8 * 3) as usize]; // mean diff 128, far over threshold
    let buffer = PixelBuffer::new(width, 8, data).unwrap();
    assert_eq!(count_residual_blocks(&buffer, B, SENTINEL, THRESHOLD), 0);
}

#[test]
fn short_buffer_yields_zero() {
    let data = vec![SENTINEL; 16 * 4 * 3];
    let buffer = PixelBuffer::new(16, 4, data).unwrap();
    assert_eq!(count_residual_blocks(&buffer, B, SENTINEL, THRESHOLD), 0);
}

#[test]
fn partial_trailing_column_is_ignored() {
    let width = 20u32; // 2 full blocks + 4 columns of tail
    let data = vec![SENTINEL; (width * 8 * 3) as usize];
    let buffer = PixelBuffer::new(width, 8, data).unwrap();
    assert_eq!(count_residual_blocks(&buffer, B, SENTINEL, THRESHOLD), 2);
}

#[test]
fn noisy_fill_stays_within_threshold() {
    let width = 16u32;
    let stride = width as usize * 3;
    let mut data = vec![SENTINEL; stride * 8];
    // Mild chroma noise on the first block, heavy damage on the second
    for (i, sample) in data.iter_mut().enumerate() {
        let x = (i % stride) / 3;
        if x < 8 {
            *sample = SENTINEL.wrapping_add((i % 5) as u8); // diff <= 4
        } else {
            *sample = if i % 2 == 0 { 0 } else { 255 };
        }
    }
    let buffer = PixelBuffer::new(width, 8, data).unwrap();
    assert_eq!(count_residual_blocks(&buffer, B, SENTINEL, THRESHOLD), 1);
}

#[test]
fn only_last_band_is_inspected() {
    let width = 16u32;
    let stride = width as usize * 3;
    // Top band is sentinel, bottom band is not
    let mut data = vec![SENTINEL; stride * 16];
    for sample in data[stride * 8..].iter_mut() {
        *sample = 0;
    }
    let buffer = PixelBuffer::new(width, 16, data).unwrap();
    assert_eq!(count_residual_blocks(&buffer, B, SENTINEL, THRESHOLD), 0);
}

#[test]
fn insert_value_floors_at_zero() {
    let k = 22;
    assert_eq!(insert_value(0, k), 0);
    assert_eq!(insert_value(21, k), 0);
    assert_eq!(insert_value(22, k), 0);
    assert_eq!(insert_value(27, k), 5);
}

#[test]
fn cropped_scenario_end_to_end() {
    // 8 block-rows tall, bottom 2 rows fully sentinel, last surviving
    // scanline has 3 of 10 blocks within threshold.
    let width = 80u32;
    let stride = width as usize * 3;
    let mut data = vec![0u8; stride * 64];
    for sample in data[stride * 48..].iter_mut() {
        *sample = SENTINEL;
    }
    // Rows 40..48 are the last scanline after cropping: make blocks 0..3
    // near-sentinel, the rest far away.
    for y in 40..48 {
        for x in 0..width as usize {
            for c in 0..3 {
                data[y * stride + x * 3 + c] = if x < 24 { SENTINEL + 2 } else { 10 };
            }
        }
    }
    let mut buffer = PixelBuffer::new(width, 64, data).unwrap();

    let height = crop_filler_rows(&buffer, B, SENTINEL);
    assert_eq!(height, 48);
    buffer.crop_to_height(height);

    let residual = count_residual_blocks(&buffer, B, SENTINEL, THRESHOLD);
    assert_eq!(residual, 3);
    assert_eq!(insert_value(residual, 22), 0);
}
