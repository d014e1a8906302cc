//! Pixel grid types shared across the rendering pipeline.

/// A decoded RGB frame.
///
/// Pixel data is row-major, 3 bytes per pixel (R, G, B). Frames are
/// produced by a [`crate::source::FrameSource`] and consumed exactly once
/// per render cycle.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data in RGB24 format
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl Frame {
    /// Create a frame from raw RGB24 data.
    ///
    /// `data.len()` must be `width * height * 3`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            data,
            width,
            height,
        }
    }
}

/// A grayscale intensity grid (one byte per pixel, row-major).
#[derive(Debug, Clone)]
pub struct GrayGrid {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl GrayGrid {
    /// Intensity at (x, y). Caller guarantees the coordinates are in range.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.data[(y * self.width + x) as usize]
    }
}

/// Three independent 8-bit channel grids for truecolor rendering.
#[derive(Debug, Clone)]
pub struct RgbGrid {
    pub r: Vec<u8>,
    pub g: Vec<u8>,
    pub b: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RgbGrid {
    /// Channel triple at (x, y).
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = (y * self.width + x) as usize;
        (self.r[idx], self.g[idx], self.b[idx])
    }
}

/// A binary ink/paper bitmap derived from a [`GrayGrid`] by thresholding.
///
/// Cell values are 0 (ink, drawn) or 1 (paper, background). Half-block
/// rendering consumes rows in vertical pairs, so callers must hand it an
/// even-height bitmap for those modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub cells: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    /// Cell value at (x, y).
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.cells[(y * self.width + x) as usize]
    }

    /// The (top, bottom) cell pair for character row `row` at column `x`.
    #[inline]
    pub fn pair(&self, x: u32, row: u32) -> (u8, u8) {
        (self.at(x, row * 2), self.at(x, row * 2 + 1))
    }
}
