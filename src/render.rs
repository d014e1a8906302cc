//! Glyph rendering: bitmap and color grids to terminal escape sequences.
//!
//! Each frame is composed into a reused byte buffer which the player flushes
//! in a single write. Escape sequences are assembled by hand with integer
//! formatting into the buffer; the render path never allocates per cell.

use crate::frame::{Bitmap, RgbGrid};

/// Full-cell block glyph.
const FULL: &str = "█";
/// Upper half block (top pixel on).
const UPPER: &str = "▀";
/// Lower half block (bottom pixel on).
const LOWER: &str = "▄";
/// Empty cell.
const BLANK: &str = " ";

/// Reset all attributes.
const RESET: &[u8] = b"\x1b[0m";

/// How a bitmap or color grid is turned into glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One glyph per cell, optionally repeated horizontally.
    FullBlock,
    /// Two vertical pixels per character cell, monochrome.
    HalfBlock,
    /// Two vertical pixels per character cell, 24-bit color.
    Truecolor,
    /// Half-block output that only redraws cells changed since the last frame.
    Diff,
}

/// Composes one frame of terminal output at a time.
///
/// Holds the previous frame's bitmap for diff mode and the reusable output
/// buffer. The buffer returned by the render methods is valid until the next
/// render call.
pub struct Renderer {
    mode: RenderMode,
    repeat: u32,
    previous: Option<Bitmap>,
    buf: Vec<u8>,
}

impl Renderer {
    pub fn new(mode: RenderMode, repeat: u32) -> Self {
        Self {
            mode,
            repeat,
            previous: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Forget the previous frame so the next diff render draws in full.
    ///
    /// Called after a terminal resize, when the screen content can no longer
    /// be trusted as a baseline.
    pub fn clear_baseline(&mut self) {
        self.previous = None;
    }

    /// Render a binary bitmap in the configured monochrome mode.
    ///
    /// Takes the bitmap by value: diff mode keeps it as the baseline for the
    /// next frame. Half-block and diff modes require an even bitmap height,
    /// which the player's target-size computation guarantees.
    pub fn render_bitmap(&mut self, bitmap: Bitmap) -> &[u8] {
        self.buf.clear();
        match self.mode {
            RenderMode::FullBlock => self.compose_full_block(&bitmap),
            RenderMode::HalfBlock => self.compose_half_block(&bitmap),
            RenderMode::Diff => self.compose_diff(&bitmap),
            RenderMode::Truecolor => {
                debug_assert!(false, "truecolor mode takes render_color");
            }
        }
        if self.mode == RenderMode::Diff {
            self.previous = Some(bitmap);
        }
        &self.buf
    }

    /// Render an RGB grid as truecolor half blocks.
    pub fn render_color(&mut self, grid: &RgbGrid) -> &[u8] {
        self.buf.clear();
        self.compose_truecolor(grid);
        &self.buf
    }

    fn compose_full_block(&mut self, bitmap: &Bitmap) {
        for y in 0..bitmap.height {
            for x in 0..bitmap.width {
                let glyph = if bitmap.at(x, y) == 0 { FULL } else { BLANK };
                for _ in 0..self.repeat {
                    self.buf.extend_from_slice(glyph.as_bytes());
                }
            }
            self.buf.push(b'\n');
        }
    }

    fn compose_half_block(&mut self, bitmap: &Bitmap) {
        for row in 0..bitmap.height / 2 {
            for x in 0..bitmap.width {
                self.buf
                    .extend_from_slice(pair_glyph(bitmap.pair(x, row)).as_bytes());
            }
            self.buf.push(b'\n');
        }
    }

    fn compose_diff(&mut self, bitmap: &Bitmap) {
        let baseline = match &self.previous {
            Some(prev) if prev.width == bitmap.width && prev.height == bitmap.height => prev,
            // First frame, or the canvas changed size underneath us.
            _ => return self.compose_half_block(bitmap),
        };

        for row in 0..bitmap.height / 2 {
            // Unchanged cells accumulate here until a changed cell forces a
            // cursor move. A run that reaches the end of the row is dropped.
            let mut pending: u32 = 0;
            for x in 0..bitmap.width {
                let pair = bitmap.pair(x, row);
                if pair == baseline.pair(x, row) {
                    pending += 1;
                    continue;
                }
                if pending > 0 {
                    push_cursor_right(&mut self.buf, pending);
                    pending = 0;
                }
                self.buf.extend_from_slice(pair_glyph(pair).as_bytes());
            }
            self.buf.push(b'\n');
        }
    }

    fn compose_truecolor(&mut self, grid: &RgbGrid) {
        for row in 0..grid.height / 2 {
            let mut fg = (0u8, 0u8, 0u8);
            let mut bg = (0u8, 0u8, 0u8);
            for x in 0..grid.width {
                let top = grid.at(x, row * 2);
                let bottom = grid.at(x, row * 2 + 1);
                // Column 0 always emits both escapes; afterwards only on a
                // change from the previous column.
                if x == 0 || top != fg {
                    push_color(&mut self.buf, 38, top);
                    fg = top;
                }
                if x == 0 || bottom != bg {
                    push_color(&mut self.buf, 48, bottom);
                    bg = bottom;
                }
                self.buf.extend_from_slice(UPPER.as_bytes());
            }
            self.buf.extend_from_slice(RESET);
            self.buf.push(b'\n');
        }
    }
}

fn pair_glyph((top, bottom): (u8, u8)) -> &'static str {
    match (top, bottom) {
        (0, 0) => FULL,
        (0, _) => UPPER,
        (_, 0) => LOWER,
        _ => BLANK,
    }
}

/// Append `CSI <n> C` (cursor right).
fn push_cursor_right(buf: &mut Vec<u8>, n: u32) {
    buf.extend_from_slice(b"\x1b[");
    push_decimal(buf, n);
    buf.push(b'C');
}

/// Append `CSI <layer>;2;<r>;<g>;<b> m` (24-bit color; layer 38 = fg, 48 = bg).
fn push_color(buf: &mut Vec<u8>, layer: u32, (r, g, b): (u8, u8, u8)) {
    buf.extend_from_slice(b"\x1b[");
    push_decimal(buf, layer);
    buf.extend_from_slice(b";2;");
    push_decimal(buf, r as u32);
    buf.push(b';');
    push_decimal(buf, g as u32);
    buf.push(b';');
    push_decimal(buf, b as u32);
    buf.push(b'm');
}

/// Append the decimal digits of `v` without going through `format!`.
fn push_decimal(buf: &mut Vec<u8>, v: u32) {
    let mut digits = [0u8; 10];
    let mut i = digits.len();
    let mut v = v;
    loop {
        i -= 1;
        digits[i] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    buf.extend_from_slice(&digits[i..]);
}
