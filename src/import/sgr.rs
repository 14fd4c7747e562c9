//! SGR (Select Graphic Rendition) state
//!
//! Tracks the color and style state driven by `CSI ... m` and turns it
//! into the color pair written to the canvas. Bold and reverse are kept
//! as flags and only applied when the active pair is derived.

use tracing::trace;

use crate::canvas::Color;

/// Color and style state of the ANSI decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorState {
    pub fg: Color,
    pub bg: Color,
    /// Pair stashed by SGR 8 (conceal), restored by SGR 28
    pub saved_fg: Color,
    pub saved_bg: Color,
    pub bold: bool,
    pub reverse: bool,
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            fg: Color::LightGray,
            bg: Color::Black,
            saved_fg: Color::LightGray,
            saved_bg: Color::Black,
            bold: false,
            reverse: false,
        }
    }
}

impl ColorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single SGR code
    pub fn apply(&mut self, code: u32) {
        match code {
            30..=37 => self.fg = ansi_color(code - 30),
            40..=47 => self.bg = ansi_color(code - 40),
            90..=97 => self.fg = ansi_color(code - 90).brighten(),
            100..=107 => self.bg = ansi_color(code - 100).brighten(),
            0 => {
                self.fg = Color::Default;
                self.bg = Color::Default;
                self.bold = false;
                self.reverse = false;
            }
            1 => self.bold = true,
            // Underline and blink have no canvas representation
            4 | 5 => {}
            7 => self.reverse = true,
            8 => {
                self.saved_fg = self.fg;
                self.saved_bg = self.bg;
                self.fg = Color::Transparent;
                self.bg = Color::Transparent;
            }
            28 => {
                self.fg = self.saved_fg;
                self.bg = self.saved_bg;
            }
            39 => self.fg = Color::Default,
            49 => self.bg = Color::Default,
            _ => trace!("Unhandled SGR code: {}", code),
        }
    }

    /// Apply every code of an SGR sequence. An empty sequence is a reset.
    pub fn apply_all(&mut self, codes: &[u32]) {
        if codes.is_empty() {
            self.apply(0);
        }
        for &code in codes {
            self.apply(code);
        }
    }

    /// The (fg, bg) pair to hand to the canvas
    pub fn active_colors(&self) -> (Color, Color) {
        let (mut fg, mut bg) = (self.fg, self.bg);
        if self.bold {
            fg = fg.brighten();
            bg = bg.brighten();
        }
        if self.reverse {
            (bg, fg)
        } else {
            (fg, bg)
        }
    }
}

fn ansi_color(index: u32) -> Color {
    // Callers only pass 0-7
    Color::from_ansi(index).unwrap_or(Color::Default)
}
