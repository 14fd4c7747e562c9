//! Canvas Module
//!
//! The character grid that importers draw into. This module contains:
//! - Cell representation with packed color attributes
//! - The canvas grid and its growth operations
//! - Code page 437 translation
//! - Deterministic snapshot generation

mod cell;
mod charset;
mod grid;
mod snapshot;

pub use cell::{Attr, Cell, Color, BLANK};
pub use charset::{cp437_to_char, cp437_to_utf32};
pub use grid::{Canvas, CanvasError};
pub use snapshot::{CellSnapshot, ColorSnapshot, Snapshot};
