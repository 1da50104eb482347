//! Pixel-domain alignment analysis.
//!
//! After splicing, the decoder fills every MCU row it could not reconstruct
//! with a uniform mid-gray sentinel. Two measurements on that fill drive the
//! repair: how many whole block-rows at the bottom are pure filler (cropped
//! away), and how many blocks of the last surviving scanline still look like
//! filler (the raw alignment signal).

#[cfg(test)]
mod tests;

use crate::models::PixelBuffer;

/// Height at which real decoded content ends.
///
/// Walks upward from the bottom of the buffer one block-row band at a time;
/// a band is dropped only when every sample across the full width equals the
/// sentinel byte-exactly. A single differing sample halts cropping.
/// Idempotent: re-applying to the cropped buffer is a no-op.
pub fn crop_filler_rows(buffer: &PixelBuffer, block_size: usize, sentinel: u8) -> u32 {
    let mut height = buffer.height as usize;
    while height >= block_size {
        let band = buffer.row_band(height - block_size, block_size);
        if !band.iter().all(|&sample| sample == sentinel) {
            break;
        }
        height -= block_size;
    }
    height as u32
}

/// Count blocks of the last scanline still statistically close to the
/// sentinel fill.
///
/// Looks only at the bottom block-row band of the (already cropped) buffer
/// and returns 0 when the buffer is shorter than one block. Each full
/// block-column is compared to the fill by mean absolute sample difference,
/// widened to i32 before subtraction; a block under `threshold` counts as
/// residual filler. The count is monotonically related to how far the
/// payload still needs to shift, which makes it usable as a correction
/// signal without understanding the bitstream itself.
pub fn count_residual_blocks(
    buffer: &PixelBuffer,
    block_size: usize,
    sentinel: u8,
    threshold: f32,
) -> usize {
    let height = buffer.height as usize;
    if height < block_size {
        return 0;
    }

    let stride = buffer.row_stride();
    let band = buffer.row_band(height - block_size, block_size);
    let samples_per_block = block_size * block_size * PixelBuffer::CHANNELS;

    let mut residual = 0;
    for col in 0..buffer.block_cols(block_size) {
        let x0 = col * block_size * PixelBuffer::CHANNELS;
        let mut total_diff: i64 = 0;
        for row in 0..block_size {
            let line = &band[row * stride + x0..row * stride + x0 + block_size * PixelBuffer::CHANNELS];
            for &sample in line {
                total_diff += (sample as i32 - sentinel as i32).unsigned_abs() as i64;
            }
        }
        let mean_diff = total_diff as f32 / samples_per_block as f32;
        if mean_diff < threshold {
            residual += 1;
        }
    }
    residual
}

/// Map the raw residual-block count to the insert argument for the
/// realignment tool: `max(count - k, 0)`. Total over all inputs.
pub fn insert_value(residual_blocks: usize, k: u32) -> u32 {
    (residual_blocks as u32).saturating_sub(k)
}
