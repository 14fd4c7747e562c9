//! Native canvas dump decoder
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! 0..4    "CACA"
//! 4..8    "CANV"
//! 8..12   width  (u32, non-zero)
//! 12..16  height (u32, non-zero)
//! 16..    width * height records of { codepoint: u32, attr: u32 }, row-major
//! ```

use tracing::debug;

use super::error::{ImportError, Result};
use crate::canvas::Canvas;

pub const MAGIC: &[u8; 4] = b"CACA";
pub const CANVAS_MAGIC: &[u8; 4] = b"CANV";
pub const HEADER_LEN: usize = 16;
pub const RECORD_LEN: usize = 8;

/// Decode a native dump into a new canvas
pub fn decode(data: &[u8]) -> Result<Canvas> {
    let (width, height) =
        parse_header(data).inspect_err(|e| debug!("Rejecting native dump: {}", e))?;

    let mut canvas = Canvas::new(width, height)?;
    let records = data[HEADER_LEN..].chunks_exact(RECORD_LEN);
    for (cell, record) in canvas.cells_mut().iter_mut().zip(records) {
        cell.ch = be_u32(&record[0..4]);
        cell.attr = be_u32(&record[4..8]);
    }

    Ok(canvas)
}

/// Validate the header and return the declared (width, height)
fn parse_header(data: &[u8]) -> Result<(usize, usize)> {
    if data.len() < HEADER_LEN {
        return Err(ImportError::MalformedHeader("shorter than header"));
    }
    if &data[0..4] != MAGIC || &data[4..8] != CANVAS_MAGIC {
        return Err(ImportError::MalformedHeader("bad magic"));
    }

    let width = be_u32(&data[8..12]);
    let height = be_u32(&data[12..16]);
    if width == 0 || height == 0 {
        return Err(ImportError::MalformedHeader("zero dimension"));
    }

    let expected = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_mul(RECORD_LEN as u64))
        .and_then(|n| n.checked_add(HEADER_LEN as u64));
    if expected.is_none() || u64::try_from(data.len()).ok() != expected {
        return Err(ImportError::MalformedHeader("size does not match dimensions"));
    }

    // Both fit: the buffer holding all records is in memory
    let width =
        usize::try_from(width).map_err(|_| ImportError::MalformedHeader("width too large"))?;
    let height =
        usize::try_from(height).map_err(|_| ImportError::MalformedHeader("height too large"))?;
    Ok((width, height))
}

fn be_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_be_bytes(buf)
}
