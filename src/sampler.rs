//! Frame resampling: aspect-preserving resize, grayscale conversion, and
//! channel splitting.
//!
//! All conversions work on raw RGB24 buffers with integer math in the hot
//! path. Resizing only ever shrinks; a frame that already fits the target
//! passes through untouched.

use crate::frame::{Frame, GrayGrid, RgbGrid};

/// Compute the output dimensions for fitting a source image into a target
/// box while preserving its aspect ratio.
///
/// Only shrinks: if the source fits in both dimensions, the source
/// dimensions are returned unchanged. Otherwise the binding constraint
/// (whichever axis overflows more, proportionally) is pinned to the target
/// and the other axis is recomputed from the source ratio.
///
/// # Example
/// A 640x480 source fit into a 100-wide, unconstrained-height box comes
/// out as 100x75.
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }

    // Check which limit is hit first.
    if src_w as f64 / max_w as f64 > src_h as f64 / max_h as f64 {
        // Width limit is hit first.
        let h = (src_h as f64 / src_w as f64 * max_w as f64) as u32;
        (max_w, h.max(1))
    } else {
        // Height limit is hit first.
        let w = (src_w as f64 / src_h as f64 * max_h as f64) as u32;
        (w.max(1), max_h)
    }
}

/// Resize a frame down to `out_w` x `out_h` by box averaging.
///
/// Each output pixel averages all source pixels that fall inside its cell,
/// per channel. The caller guarantees `out_w <= frame.width` and
/// `out_h <= frame.height` (see [`fit_within`]).
pub fn resize(frame: &Frame, out_w: u32, out_h: u32) -> Frame {
    if out_w == frame.width && out_h == frame.height {
        return frame.clone();
    }

    let cell_w = frame.width as f32 / out_w as f32;
    let cell_h = frame.height as f32 / out_h as f32;

    let mut data = Vec::with_capacity((out_w * out_h * 3) as usize);

    for oy in 0..out_h {
        for ox in 0..out_w {
            let start_x = (ox as f32 * cell_w) as u32;
            let end_x = (((ox + 1) as f32 * cell_w) as u32).max(start_x + 1);
            let start_y = (oy as f32 * cell_h) as u32;
            let end_y = (((oy + 1) as f32 * cell_h) as u32).max(start_y + 1);

            let mut sum_r = 0u32;
            let mut sum_g = 0u32;
            let mut sum_b = 0u32;
            let mut count = 0u32;

            for py in start_y..end_y.min(frame.height) {
                for px in start_x..end_x.min(frame.width) {
                    let idx = ((py * frame.width + px) * 3) as usize;
                    sum_r += frame.data[idx] as u32;
                    sum_g += frame.data[idx + 1] as u32;
                    sum_b += frame.data[idx + 2] as u32;
                    count += 1;
                }
            }

            if count == 0 {
                count = 1;
            }
            data.push((sum_r / count) as u8);
            data.push((sum_g / count) as u8);
            data.push((sum_b / count) as u8);
        }
    }

    Frame::new(data, out_w, out_h)
}

/// Convert an RGB frame to grayscale using the ITU-R BT.601 luminance
/// formula, `Y = 0.299*R + 0.587*G + 0.114*B`, with coefficients scaled
/// by 1000 to stay in integer math.
pub fn to_grayscale(frame: &Frame) -> GrayGrid {
    let pixel_count = (frame.width * frame.height) as usize;
    let mut data = Vec::with_capacity(pixel_count);

    for rgb in frame.data.chunks_exact(3) {
        let r = rgb[0] as u32;
        let g = rgb[1] as u32;
        let b = rgb[2] as u32;
        let luminance = (299 * r + 587 * g + 114 * b) / 1000;
        data.push(luminance as u8);
    }

    GrayGrid {
        data,
        width: frame.width,
        height: frame.height,
    }
}

/// Split an interleaved RGB frame into three independent channel grids.
pub fn split_channels(frame: &Frame) -> RgbGrid {
    let pixel_count = (frame.width * frame.height) as usize;
    let mut r = Vec::with_capacity(pixel_count);
    let mut g = Vec::with_capacity(pixel_count);
    let mut b = Vec::with_capacity(pixel_count);

    for rgb in frame.data.chunks_exact(3) {
        r.push(rgb[0]);
        g.push(rgb[1]);
        b.push(rgb[2]);
    }

    RgbGrid {
        r,
        g,
        b,
        width: frame.width,
        height: frame.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(r: u8, g: u8, b: u8, width: u32, height: u32) -> Frame {
        let mut data = Vec::new();
        for _ in 0..width * height {
            data.extend_from_slice(&[r, g, b]);
        }
        Frame::new(data, width, height)
    }

    #[test]
    fn test_fit_within_width_bound() {
        // 640x480 into a 100-wide box: ratio preserved, width-bound hit.
        assert_eq!(fit_within(640, 480, 100, 10_000), (100, 75));
    }

    #[test]
    fn test_fit_within_height_bound() {
        assert_eq!(fit_within(640, 480, 10_000, 120), (160, 120));
    }

    #[test]
    fn test_fit_within_never_upsamples() {
        assert_eq!(fit_within(40, 30, 100, 100), (40, 30));
        assert_eq!(fit_within(100, 100, 100, 100), (100, 100));
    }

    #[test]
    fn test_fit_within_degenerate_input() {
        assert_eq!(fit_within(0, 480, 100, 100), (0, 0));
        assert_eq!(fit_within(640, 480, 0, 100), (0, 0));
    }

    #[test]
    fn test_resize_uniform_region_is_exact() {
        let frame = solid_frame(17, 42, 99, 8, 8);
        let out = resize(&frame, 4, 2);
        assert_eq!(out.width, 4);
        assert_eq!(out.height, 2);
        for rgb in out.data.chunks_exact(3) {
            assert_eq!(rgb, &[17, 42, 99]);
        }
    }

    #[test]
    fn test_resize_identity_passthrough() {
        let frame = solid_frame(1, 2, 3, 4, 4);
        let out = resize(&frame, 4, 4);
        assert_eq!(out.data, frame.data);
    }

    #[test]
    fn test_resize_averages_channels() {
        // Two pixels, one black one white, averaged into one cell.
        let frame = Frame::new(vec![0, 0, 0, 255, 255, 255], 2, 1);
        let out = resize(&frame, 1, 1);
        assert_eq!(out.data, vec![127, 127, 127]);
    }

    #[test]
    fn test_grayscale_primaries() {
        assert_eq!(to_grayscale(&solid_frame(255, 0, 0, 1, 1)).data[0], 76);
        assert_eq!(to_grayscale(&solid_frame(0, 255, 0, 1, 1)).data[0], 149);
        assert_eq!(to_grayscale(&solid_frame(0, 0, 255, 1, 1)).data[0], 29);
    }

    #[test]
    fn test_grayscale_white_and_black() {
        assert_eq!(to_grayscale(&solid_frame(255, 255, 255, 1, 1)).data[0], 255);
        assert_eq!(to_grayscale(&solid_frame(0, 0, 0, 1, 1)).data[0], 0);
    }

    #[test]
    fn test_split_channels_roundtrip() {
        let frame = Frame::new(vec![1, 2, 3, 4, 5, 6], 2, 1);
        let grid = split_channels(&frame);
        assert_eq!(grid.at(0, 0), (1, 2, 3));
        assert_eq!(grid.at(1, 0), (4, 5, 6));
    }
}
