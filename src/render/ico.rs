//! ICO container encoding.
//!
//! The ICO file format is a 6-byte header, a run of 16-byte directory
//! entries, and the image payloads concatenated after the directory. Modern
//! readers accept PNG payloads embedded as-is, which is what glint writes.
//! All multi-byte fields are little-endian.
//!
//! One quirk is load-bearing: the directory's width and height are single
//! bytes, so a 256-pixel image stores `0` in both. Readers of the format
//! expect the sentinel; widening the field would break them.

use std::path::Path;

use crate::error::{GlintError, Result};

const HEADER_LEN: usize = 6;
const ENTRY_LEN: usize = 16;

/// Largest pixel size the single-byte directory fields can express.
pub const MAX_ICO_SIZE: u32 = 256;

/// One image destined for an ICO container: a square pixel size and its
/// already-encoded PNG payload. The encoder trusts the pair to be
/// consistent; it never re-inspects the payload.
#[derive(Debug, Clone)]
pub struct IcoEntry {
    pub size: u32,
    pub data: Vec<u8>,
}

impl IcoEntry {
    pub fn new(size: u32, data: Vec<u8>) -> Self {
        Self { size, data }
    }
}

/// Assemble entries into a single ICO file image.
///
/// Entries are sorted ascending by size first. The format itself does not
/// care about order, but a canonical order makes the output byte-for-byte
/// reproducible for identical inputs.
pub fn encode_ico(entries: &[IcoEntry]) -> Result<Vec<u8>> {
    if entries.is_empty() {
        return Err(GlintError::Encode {
            message: "an ICO container needs at least one image".to_string(),
            help: None,
        });
    }

    for entry in entries {
        if entry.size == 0 || entry.size > MAX_ICO_SIZE {
            return Err(GlintError::Encode {
                message: format!("{}px does not fit in an ICO directory entry", entry.size),
                help: Some("ICO sizes range from 1 to 256".to_string()),
            });
        }
    }

    let mut sorted: Vec<&IcoEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.size);

    for pair in sorted.windows(2) {
        if pair[0].size == pair[1].size {
            return Err(GlintError::Encode {
                message: format!("duplicate {}px image in container request", pair[0].size),
                help: None,
            });
        }
    }

    let payload_len: usize = sorted.iter().map(|e| e.data.len()).sum();
    let mut out = Vec::with_capacity(HEADER_LEN + ENTRY_LEN * sorted.len() + payload_len);

    // Header: reserved, resource type (1 = icon), image count.
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&(sorted.len() as u16).to_le_bytes());

    // Directory entries, payload offsets accumulating past the directory.
    let mut offset = (HEADER_LEN + ENTRY_LEN * sorted.len()) as u32;
    for entry in &sorted {
        out.push(dimension_byte(entry.size));
        out.push(dimension_byte(entry.size));
        out.push(0); // colour count: no palette, fully-coloured raster
        out.push(0); // reserved
        out.extend_from_slice(&1u16.to_le_bytes()); // colour planes
        out.extend_from_slice(&32u16.to_le_bytes()); // bit depth
        out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        offset += entry.data.len() as u32;
    }

    for entry in &sorted {
        out.extend_from_slice(&entry.data);
    }

    Ok(out)
}

/// Write entries to an ICO file.
pub fn write_ico(entries: &[IcoEntry], path: &Path) -> Result<()> {
    let bytes = encode_ico(entries)?;
    std::fs::write(path, &bytes).map_err(|e| GlintError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write ICO: {}", e),
    })
}

/// Width/height byte for the directory: 256 wraps to the 0 sentinel.
fn dimension_byte(size: u32) -> u8 {
    if size >= 256 {
        0
    } else {
        size as u8
    }
}
