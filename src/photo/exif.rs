//! EXIF orientation extraction for JPEG photos
//!
//! Cameras record rotated captures with an orientation tag instead of
//! rotating pixels. The normalizer has to honor the tag, otherwise portrait
//! photos end up sideways in the timelapse. Only tag 0x0112 from IFD0 is
//! read; everything else in the EXIF block is ignored.

const TAG_ORIENTATION: u16 = 0x0112;

const MARKER_APP1: u8 = 0xE1;
const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;

/// Read the EXIF orientation (1-8) from raw JPEG bytes.
///
/// Returns `None` when the file carries no EXIF block, no orientation tag,
/// or an out-of-range value. Non-JPEG data yields `None` as well; PNG photos
/// have no standard orientation metadata.
pub fn orientation_from_jpeg(data: &[u8]) -> Option<u16> {
    // SOI marker
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }

    let mut i = 2;
    while i + 4 <= data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        if marker == MARKER_SOS || marker == MARKER_EOI {
            break;
        }

        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if seg_len < 2 || i + 2 + seg_len > data.len() {
            return None;
        }

        if marker == MARKER_APP1 {
            let segment = &data[i + 4..i + 2 + seg_len];
            if let Some(tiff) = segment.strip_prefix(b"Exif\0\0") {
                return orientation_from_tiff(tiff);
            }
        }

        i += 2 + seg_len;
    }

    None
}

/// Parse the orientation tag out of a TIFF-structured EXIF payload
fn orientation_from_tiff(data: &[u8]) -> Option<u16> {
    let (little_endian, ifd_offset) = parse_tiff_header(data)?;
    let offset = ifd_offset as usize;

    if offset + 2 > data.len() {
        return None;
    }

    let num_entries = read_u16(data, offset, little_endian) as usize;

    for i in 0..num_entries {
        let entry = offset + 2 + i * 12;
        if entry + 12 > data.len() {
            break;
        }

        let tag_id = read_u16(data, entry, little_endian);
        let tag_type = read_u16(data, entry + 2, little_endian);

        // Orientation is a single SHORT, so the value lives inline
        if tag_id == TAG_ORIENTATION && tag_type == 3 {
            let value = read_u16(data, entry + 8, little_endian);
            if (1..=8).contains(&value) {
                return Some(value);
            }
            return None;
        }
    }

    None
}

/// Parse TIFF header, return (is_little_endian, first_ifd_offset)
fn parse_tiff_header(data: &[u8]) -> Option<(bool, u32)> {
    if data.len() < 8 {
        return None;
    }

    let little_endian = match &data[0..2] {
        [0x49, 0x49] => true,  // "II" - Intel, little endian
        [0x4D, 0x4D] => false, // "MM" - Motorola, big endian
        _ => return None,
    };

    if read_u16(data, 2, little_endian) != 42 {
        return None;
    }

    Some((little_endian, read_u32(data, 4, little_endian)))
}

fn read_u16(data: &[u8], offset: usize, little_endian: bool) -> u16 {
    if offset + 2 > data.len() {
        return 0;
    }
    if little_endian {
        u16::from_le_bytes([data[offset], data[offset + 1]])
    } else {
        u16::from_be_bytes([data[offset], data[offset + 1]])
    }
}

fn read_u32(data: &[u8], offset: usize, little_endian: bool) -> u32 {
    if offset + 4 > data.len() {
        return 0;
    }
    if little_endian {
        u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    } else {
        u32::from_be_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    }
}
