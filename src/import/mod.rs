//! Canvas importers
//!
//! Turns a byte buffer into a [`Canvas`]. Three input families are
//! supported:
//! - `text`: plain text, one byte per cell
//! - `caca`: the native fixed-header canvas dump
//! - `ansi`: ANSI/ECMA-48 escape streams, as used by ANSI art
//!
//! With an empty format name the family is guessed from the content.

mod ansi;
mod error;
mod native;
mod params;
mod sgr;
mod text;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

pub use error::{ImportError, Result};
pub use params::{parse_tuple, Params, MAX_PARAMS};
pub use sgr::ColorState;

use crate::app::ImportConfig;
use crate::canvas::Canvas;

/// A concrete input format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportFormat {
    Text,
    Native,
    Ansi,
}

impl ImportFormat {
    /// Format identifier accepted by [`import_canvas`]
    pub fn name(self) -> &'static str {
        match self {
            ImportFormat::Text => "text",
            ImportFormat::Native => "caca",
            ImportFormat::Ansi => "ansi",
        }
    }

    /// Human readable description
    pub fn description(self) -> &'static str {
        match self {
            ImportFormat::Text => "plain text",
            ImportFormat::Native => "native libcaca format",
            ImportFormat::Ansi => "ANSI coloured text",
        }
    }

    /// Decode `data` in this format
    pub fn decode(self, data: &[u8], config: &ImportConfig) -> Result<Canvas> {
        debug!("Importing {} bytes as {}", data.len(), self.name());
        match self {
            ImportFormat::Text => text::decode(data),
            ImportFormat::Native => native::decode(data),
            ImportFormat::Ansi => ansi::decode(data, config),
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImportFormat {
    type Err = ImportError;

    /// Parse a format name, ignoring ASCII case. The empty name is not a
    /// concrete format; use [`detect_format`] for it.
    fn from_str(s: &str) -> Result<Self> {
        [ImportFormat::Text, ImportFormat::Native, ImportFormat::Ansi]
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ImportError::UnsupportedFormat(s.to_string()))
    }
}

/// Supported format identifiers with their descriptions, in display order.
/// The empty identifier means autodetection.
pub fn import_list() -> &'static [(&'static str, &'static str)] {
    &[
        ("", "autodetect"),
        ("text", "plain text"),
        ("caca", "native libcaca format"),
        ("ansi", "ANSI coloured text"),
    ]
}

/// Guess the format of `data`.
///
/// In order: native magic at offset 0, then any `ESC [` in the buffer,
/// then plain text.
pub fn detect_format(data: &[u8]) -> ImportFormat {
    // The fourth byte is tested for inequality with 'A', so a real "CACA"
    // dump is never detected and needs an explicit "caca" format.
    if data.len() >= 4 && data.starts_with(b"CAC") && data[3] != b'A' {
        return ImportFormat::Native;
    }

    if data.windows(2).any(|pair| pair == b"\x1b[") {
        return ImportFormat::Ansi;
    }

    ImportFormat::Text
}

/// Import a buffer using the default configuration.
///
/// `format` is one of the identifiers from [`import_list`], compared
/// case-insensitively; `""` autodetects.
pub fn import_canvas(data: &[u8], format: &str) -> Result<Canvas> {
    import_canvas_with(data, format, &ImportConfig::default())
}

/// Import a buffer with an explicit configuration
pub fn import_canvas_with(data: &[u8], format: &str, config: &ImportConfig) -> Result<Canvas> {
    if data.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let format = if format.is_empty() {
        let detected = detect_format(data);
        debug!("Autodetected format: {}", detected);
        detected
    } else {
        format.parse::<ImportFormat>()?
    };

    format.decode(data, config)
}
