//! ANSI art decoder
//!
//! A small terminal emulator that draws an ANSI/ECMA-48 byte stream onto a
//! canvas. It understands the subset of CSI commands ANSI art relies on:
//! cursor positioning and movement, save/restore, erase, and SGR colors.
//!
//! # State Machine
//!
//! States:
//! - Ground: ordinary bytes are CP437 characters
//! - EscapeIntroducer: after ESC, waiting for `[`
//! - ParsingParameters: after CSI, collecting bytes up to the final letter
//!
//! The decoder never fails on its input. Unknown commands are ignored,
//! a truncated sequence at the end of the stream is dropped, and an ESC
//! that does not start a CSI is drawn like any other byte.

use tracing::{debug, trace, warn};

use super::error::Result;
use super::params::{is_final, parse_tuple, Params};
use super::sgr::ColorState;
use crate::app::ImportConfig;
use crate::canvas::{cp437_to_utf32, Canvas, BLANK};

const ESC: u8 = 0x1B;
/// SUB followed by this literal starts a SAUCE trailer
const SAUCE_ID: &[u8; 7] = b"SAUCE00";
const SAUCE_MARKER: u8 = 0x1A;

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    EscapeIntroducer,
    /// Parameter bytes start at this offset of the input
    ParsingParameters { start: usize },
}

/// Decode an ANSI stream into a new canvas
pub fn decode(data: &[u8], config: &ImportConfig) -> Result<Canvas> {
    let mut decoder = AnsiDecoder::new(config)?;
    decoder.process(data);
    Ok(decoder.canvas)
}

#[derive(Debug)]
struct AnsiDecoder {
    canvas: Canvas,
    state: State,
    /// Cursor; signed because 1-based positions of 0 land on -1
    x: i64,
    y: i64,
    /// Single save slot for `CSI s` / `CSI u`
    saved: (i64, i64),
    colors: ColorState,
    max_rows: usize,
    growth_refused: bool,
}

impl AnsiDecoder {
    fn new(config: &ImportConfig) -> Result<Self> {
        let colors = ColorState::new();
        let mut canvas = Canvas::new(config.ansi_width.max(1), config.ansi_height)?;
        let (fg, bg) = colors.active_colors();
        canvas.set_color(fg, bg);

        Ok(Self {
            canvas,
            state: State::Ground,
            x: 0,
            y: 0,
            saved: (0, 0),
            colors,
            max_rows: config.max_rows,
            growth_refused: false,
        })
    }

    fn process(&mut self, data: &[u8]) {
        let mut i = 0;
        while i < data.len() {
            let byte = data[i];
            match self.state {
                State::Ground => {
                    if byte == SAUCE_MARKER && data[i + 1..].starts_with(SAUCE_ID) {
                        debug!("SAUCE trailer at offset {}, stopping", i);
                        return;
                    }
                    self.process_ground(byte);
                }
                State::EscapeIntroducer => {
                    if byte == b'[' {
                        self.state = State::ParsingParameters { start: i + 1 };
                    } else {
                        // Lone ESC: draw it and look at this byte again
                        self.state = State::Ground;
                        self.print(ESC);
                        continue;
                    }
                }
                State::ParsingParameters { start } => {
                    if is_final(byte) {
                        let (params, _) = parse_tuple(&data[start..i]);
                        self.state = State::Ground;
                        self.dispatch_csi(byte, &params);
                    }
                }
            }
            i += 1;
        }

        match self.state {
            State::Ground => {}
            State::EscapeIntroducer => {
                self.state = State::Ground;
                self.print(ESC);
            }
            State::ParsingParameters { start } => {
                trace!("Dropping unterminated CSI at offset {}", start);
                self.state = State::Ground;
            }
        }
    }

    fn process_ground(&mut self, byte: u8) {
        match byte {
            // DOS line endings
            b'\r' => {}
            b'\n' => {
                self.x = 0;
                self.y = self.y.saturating_add(1);
            }
            ESC => self.state = State::EscapeIntroducer,
            _ => self.print(byte),
        }
    }

    fn dispatch_csi(&mut self, final_byte: u8, params: &Params) {
        match final_byte {
            b'f' | b'H' => match params.len() {
                0 => {
                    self.x = 0;
                    self.y = 0;
                }
                1 => {
                    self.y = i64::from(params.get_or(0, 0)) - 1;
                    self.x = 0;
                }
                2 => {
                    self.y = i64::from(params.get_or(0, 0)) - 1;
                    self.x = i64::from(params.get_or(1, 0)) - 1;
                }
                _ => {}
            },
            b'A' => {
                let n = i64::from(params.get_or(0, 1));
                self.y = (self.y - n).max(0);
            }
            b'B' => {
                let n = i64::from(params.get_or(0, 1));
                self.y = self.y.saturating_add(n);
            }
            b'C' => {
                let n = i64::from(params.get_or(0, 1));
                self.x = self.x.saturating_add(n);
            }
            b'D' => {
                let n = i64::from(params.get_or(0, 1));
                self.x = (self.x - n).max(0);
            }
            b's' => self.saved = (self.x, self.y),
            b'u' => (self.x, self.y) = self.saved,
            b'J' => {
                // Only "erase all" moves the cursor; nothing is erased
                if params.get(0) == Some(2) {
                    self.x = 0;
                    self.y = 0;
                }
            }
            b'K' => {
                let width = self.width();
                for x in self.x.max(0)..width {
                    self.canvas.put_char(x, self.y, BLANK);
                }
                self.x = width;
            }
            b'm' => {
                self.colors.apply_all(params.as_slice());
                let (fg, bg) = self.colors.active_colors();
                self.canvas.set_color(fg, bg);
            }
            _ => trace!("Unhandled CSI {:?} {}", params, final_byte as char),
        }
    }

    /// Draw one CP437 byte at the cursor
    fn print(&mut self, byte: u8) {
        if self.x >= self.width() {
            self.x = 0;
            self.y = self.y.saturating_add(1);
        }

        if self.y >= self.height() {
            self.grow();
        }

        self.canvas.put_char(self.x, self.y, cp437_to_utf32(byte));
        self.x += 1;
    }

    /// Extend the canvas down to the cursor row
    fn grow(&mut self) {
        let rows = usize::try_from(self.y)
            .ok()
            .and_then(|y| y.checked_add(1))
            .filter(|&rows| rows <= self.max_rows);

        let result = match rows {
            Some(rows) => self
                .canvas
                .resize(self.canvas.width(), rows)
                .map_err(|e| e.to_string()),
            None => Err(format!("row {} is past the limit of {}", self.y, self.max_rows)),
        };

        if let Err(e) = result {
            if !self.growth_refused {
                warn!("Not growing ANSI canvas: {}", e);
                self.growth_refused = true;
            }
        }
    }

    fn width(&self) -> i64 {
        i64::try_from(self.canvas.width()).unwrap_or(i64::MAX)
    }

    fn height(&self) -> i64 {
        i64::try_from(self.canvas.height()).unwrap_or(i64::MAX)
    }
}
