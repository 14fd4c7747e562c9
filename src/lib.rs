//! Mochi Canvas Library
//!
//! Imports ANSI art, plain text and native canvas dumps into a character
//! canvas. This crate provides:
//!
//! - `canvas`: Cells, colors, the canvas grid, CP437 and snapshots
//! - `import`: Format detection and the text, native and ANSI decoders
//! - `app`: Importer configuration
//!
//! ```
//! use mochi_canvas::{import_canvas, Color};
//!
//! let canvas = import_canvas(b"\x1b[1;31mA", "").unwrap();
//! let cell = canvas.cell(0, 0).unwrap();
//! assert_eq!(cell.char(), Some('A'));
//! assert_eq!(cell.fg(), Some(Color::LightRed));
//! ```

pub mod app;
pub mod canvas;
pub mod import;

pub use app::ImportConfig;
pub use canvas::{Attr, Canvas, Cell, Color, Snapshot};
pub use import::{
    detect_format, import_canvas, import_canvas_with, import_list, ImportError, ImportFormat,
};
