//! Deterministic canvas snapshots
//!
//! Snapshots capture the complete canvas contents in a serializable form
//! for inspection and golden testing. Importing the same bytes twice must
//! produce identical snapshots.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Color};
use super::grid::Canvas;

/// A complete snapshot of a canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Canvas dimensions
    pub width: usize,
    pub height: usize,
    /// Cell content (row-major)
    pub grid: Vec<Vec<CellSnapshot>>,
}

/// Snapshot of a single cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Character content; U+FFFD for codepoints that are not valid chars
    pub content: String,
    /// Foreground color
    pub fg: ColorSnapshot,
    /// Background color
    pub bg: ColorSnapshot,
    /// Style bits of the attribute
    #[serde(default, skip_serializing_if = "is_zero")]
    pub style: u16,
}

/// Snapshot of a color code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ColorSnapshot {
    Named { color: Color },
    Unknown { code: u8 },
}

fn is_zero(v: &u16) -> bool {
    *v == 0
}

impl From<u8> for ColorSnapshot {
    fn from(code: u8) -> Self {
        match Color::from_code(code) {
            Some(color) => ColorSnapshot::Named { color },
            None => ColorSnapshot::Unknown { code },
        }
    }
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        let attr = cell.attr();
        CellSnapshot {
            content: cell.char().unwrap_or(char::REPLACEMENT_CHARACTER).to_string(),
            fg: ColorSnapshot::from(attr.fg),
            bg: ColorSnapshot::from(attr.bg),
            style: attr.style,
        }
    }
}

impl Snapshot {
    /// Create a snapshot of a canvas
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let grid = (0..canvas.height())
            .map(|y| {
                canvas
                    .row(y)
                    .unwrap_or_default()
                    .iter()
                    .map(CellSnapshot::from)
                    .collect()
            })
            .collect();

        Snapshot {
            width: canvas.width(),
            height: canvas.height(),
            grid,
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get a plain text rendering of the canvas (colors dropped)
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        for row in &self.grid {
            for cell in row {
                // NUL cells render as blanks
                if cell.content == "\0" {
                    result.push(' ');
                } else {
                    result.push_str(&cell.content);
                }
            }
            // Trim trailing spaces and add newline
            while result.ends_with(' ') {
                result.pop();
            }
            result.push('\n');
        }

        // Remove trailing empty lines
        while result.ends_with("\n\n") {
            result.pop();
        }

        result
    }

    /// Text of a single row with trailing blanks removed
    pub fn row_text(&self, row: usize) -> Option<String> {
        self.grid.get(row).map(|cells| {
            let text: String = cells.iter().map(|c| c.content.as_str()).collect();
            text.trim_end_matches(' ').to_string()
        })
    }

    /// Compare two snapshots for equality
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        self.width == other.width && self.height == other.height && self.grid == other.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_canvas() {
        let mut canvas = Canvas::new(10, 3).unwrap();
        canvas.put_char(0, 0, 'H' as u32);
        canvas.put_char(1, 0, 'i' as u32);

        let snapshot = Snapshot::from_canvas(&canvas);

        assert_eq!(snapshot.width, 10);
        assert_eq!(snapshot.height, 3);
        assert_eq!(snapshot.grid.len(), 3);
        assert_eq!(snapshot.grid[0][0].content, "H");
        assert_eq!(snapshot.grid[0][1].content, "i");
        assert_eq!(snapshot.row_text(0).as_deref(), Some("Hi"));
        assert_eq!(snapshot.row_text(1).as_deref(), Some(""));
        assert_eq!(snapshot.row_text(3), None);
    }

    #[test]
    fn test_snapshot_to_text() {
        let mut canvas = Canvas::new(10, 4).unwrap();
        canvas.put_char(0, 0, 'A' as u32);
        canvas.put_char(1, 0, 'B' as u32);
        canvas.put_char(0, 1, 'C' as u32);

        let text = Snapshot::from_canvas(&canvas).to_text();
        assert_eq!(text, "AB\nC\n");
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut canvas = Canvas::new(5, 2).unwrap();
        canvas.set_color(Color::LightRed, Color::Transparent);
        canvas.put_char(0, 0, 'X' as u32);
        canvas.cell_mut(1, 0).unwrap().attr = 0x0001_7f7f;

        let snapshot = Snapshot::from_canvas(&canvas);
        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::from_json(&json).unwrap();

        assert!(snapshot.content_equals(&restored));
        assert_eq!(
            restored.grid[0][1].fg,
            ColorSnapshot::Unknown { code: 0x7f }
        );
        assert_eq!(restored.grid[0][1].style, 1);
    }

    #[test]
    fn test_color_snapshot() {
        assert_eq!(
            ColorSnapshot::from(0x04),
            ColorSnapshot::Named { color: Color::Red }
        );
        assert_eq!(
            ColorSnapshot::from(0x20),
            ColorSnapshot::Named {
                color: Color::Transparent
            }
        );
        assert_eq!(ColorSnapshot::from(0x11), ColorSnapshot::Unknown { code: 0x11 });
    }
}
