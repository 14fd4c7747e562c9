//! Plain text decoder
//!
//! Each byte becomes one cell. The canvas is as wide as the longest line
//! and as tall as the last line holding a character, and never smaller
//! than 1x1.

use super::error::Result;
use crate::canvas::{Attr, Canvas, Color};

/// Decode plain text into a new canvas
pub fn decode(data: &[u8]) -> Result<Canvas> {
    let (width, height) = measure(data);
    let attr = Attr::new(Color::Default, Color::Transparent);
    let mut canvas = Canvas::with_attr(width, height, attr)?;

    let (mut x, mut y) = (0i64, 0i64);
    for &byte in data {
        match byte {
            b'\r' => {}
            b'\n' => {
                x = 0;
                y += 1;
            }
            _ => {
                // Bytes are taken as Latin-1 codepoints
                canvas.put_char(x, y, u32::from(byte));
                x += 1;
            }
        }
    }

    Ok(canvas)
}

/// Final canvas size, so the grid is allocated once
fn measure(data: &[u8]) -> (usize, usize) {
    let (mut width, mut height) = (1usize, 1usize);
    let (mut x, mut y) = (0usize, 0usize);

    for &byte in data {
        match byte {
            b'\r' => {}
            b'\n' => {
                x = 0;
                y += 1;
            }
            _ => {
                x += 1;
                width = width.max(x);
                height = height.max(y + 1);
            }
        }
    }

    (width, height)
}
