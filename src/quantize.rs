//! Threshold quantization and vertical subsampling.
//!
//! Both operations are pure functions over intensity grids. The threshold
//! is a per-run caller configuration; it is the one tunable that trades
//! black-level against highlight-level balance and is never computed
//! dynamically.

use crate::frame::{Bitmap, GrayGrid};

/// Quantize an intensity grid into a binary ink/paper bitmap.
///
/// A cell becomes ink (0) when its intensity is strictly less than
/// `threshold`, paper (1) otherwise.
pub fn quantize(gray: &GrayGrid, threshold: u8) -> Bitmap {
    let cells = gray
        .data
        .iter()
        .map(|&v| if v < threshold { 0 } else { 1 })
        .collect();

    Bitmap {
        cells,
        width: gray.width,
        height: gray.height,
    }
}

/// Halve a grid's vertical resolution by averaging adjacent rows.
///
/// Each output cell is `in[2y][x]/2 + in[2y+1][x]/2` (integer division,
/// not rounding). An odd trailing row is silently dropped. Used by the
/// full-block mode, whose glyph does not already encode two vertical
/// samples per character cell.
pub fn subsample(gray: &GrayGrid) -> GrayGrid {
    let out_height = gray.height / 2;
    let mut data = Vec::with_capacity((gray.width * out_height) as usize);

    for y in 0..out_height {
        for x in 0..gray.width {
            let top = gray.at(x, y * 2);
            let bottom = gray.at(x, y * 2 + 1);
            data.push(top / 2 + bottom / 2);
        }
    }

    GrayGrid {
        data,
        width: gray.width,
        height: out_height,
    }
}
