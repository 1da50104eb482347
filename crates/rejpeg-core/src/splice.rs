//! Byte-level header splicing.
//!
//! A corrupted file still carries its compressed scan data at a fixed byte
//! offset; everything before that (and a short trailer) was overwritten.
//! Splicing takes the header of a known-good reference shot with the same
//! encoder settings, cuts it at the last start-of-scan marker, and glues the
//! surviving payload onto it. The result is a parseable JPEG that may still
//! be misaligned by a few MCUs; that is the alignment detector's problem.

use crate::error::{RepairError, Result};

/// JPEG start-of-scan marker.
pub const SOS_MARKER: [u8; 2] = [0xFF, 0xDA];

/// Bytes kept from the marker position onward. Covers the marker itself and
/// the scan-component selectors that must come from a valid encode.
const SCAN_PREFIX_TAIL: usize = 12;

/// Header prefix of `reference`: everything up to the LAST start-of-scan
/// marker, plus [`SCAN_PREFIX_TAIL`] bytes from the marker position.
///
/// The last occurrence matters: thumbnails embedded in EXIF data carry
/// their own SOS marker earlier in the file.
pub fn scan_header_prefix(reference: &[u8]) -> Result<&[u8]> {
    let index = reference
        .windows(SOS_MARKER.len())
        .rposition(|window| window == SOS_MARKER)
        .ok_or(RepairError::MarkerNotFound)?;
    let end = (index + SCAN_PREFIX_TAIL).min(reference.len());
    Ok(&reference[..end])
}

/// Concatenate the reference header prefix with the surviving payload of
/// the corrupted file.
///
/// The payload is `corrupted[payload_start .. len - payload_end_trim]`;
/// both offsets are corruption-profile constants supplied by the caller.
/// No validation of the result is attempted here: downstream decoding
/// either succeeds, partially succeeds (trailing filler rows), or fails.
pub fn splice(
    reference: &[u8],
    corrupted: &[u8],
    payload_start: usize,
    payload_end_trim: usize,
) -> Result<Vec<u8>> {
    let prefix = scan_header_prefix(reference)?;

    let required = payload_start + payload_end_trim;
    if corrupted.len() <= required {
        return Err(RepairError::InsufficientPayload {
            len: corrupted.len(),
            required,
        });
    }
    let payload = &corrupted[payload_start..corrupted.len() - payload_end_trim];

    let mut out = Vec::with_capacity(prefix.len() + payload.len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(payload);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_ends_twelve_bytes_after_marker() {
        let mut reference = vec![0x11u8; 100];
        reference[40] = 0xFF;
        reference[41] = 0xDA;

        let prefix = scan_header_prefix(&reference).unwrap();
        assert_eq!(prefix.len(), 52);
        assert_eq!(&prefix[40..42], &SOS_MARKER);
        assert_eq!(prefix, &reference[..52]);
    }

    #[test]
    fn last_marker_wins_over_thumbnail_marker() {
        let mut reference = vec![0u8; 200];
        // Thumbnail scan early in the file, real scan later
        reference[10] = 0xFF;
        reference[11] = 0xDA;
        reference[150] = 0xFF;
        reference[151] = 0xDA;

        let prefix = scan_header_prefix(&reference).unwrap();
        assert_eq!(prefix.len(), 162);
    }

    #[test]
    fn prefix_clamped_to_reference_length() {
        let mut reference = vec![0u8; 30];
        reference[25] = 0xFF;
        reference[26] = 0xDA;

        let prefix = scan_header_prefix(&reference).unwrap();
        assert_eq!(prefix.len(), 30);
    }

    #[test]
    fn missing_marker_is_fatal() {
        let reference = vec![0x42u8; 64];
        assert!(matches!(
            scan_header_prefix(&reference),
            Err(RepairError::MarkerNotFound)
        ));
        assert!(matches!(
            splice(&reference, &[0u8; 1024], 10, 5),
            Err(RepairError::MarkerNotFound)
        ));
    }

    #[test]
    fn spliced_length_is_prefix_plus_trimmed_payload() {
        let marker_at = 77;
        let mut reference = vec![0u8; 300];
        reference[marker_at] = 0xFF;
        reference[marker_at + 1] = 0xDA;

        let corrupted = vec![0xABu8; 5000];
        let (start, trim) = (1000, 334);

        let out = splice(&reference, &corrupted, start, trim).unwrap();
        assert_eq!(out.len(), (marker_at + 12) + (corrupted.len() - start - trim));
        assert_eq!(&out[..marker_at + 12], &reference[..marker_at + 12]);
        assert_eq!(&out[marker_at + 12..], &corrupted[start..corrupted.len() - trim]);
    }

    #[test]
    fn short_corrupted_input_is_rejected() {
        let mut reference = vec![0u8; 64];
        reference[10] = 0xFF;
        reference[11] = 0xDA;

        let corrupted = vec![0u8; 100];
        assert!(matches!(
            splice(&reference, &corrupted, 80, 30),
            Err(RepairError::InsufficientPayload { len: 100, required: 110 })
        ));
        // Exactly equal is still empty payload territory
        assert!(splice(&reference, &corrupted, 70, 30).is_err());
    }
}
