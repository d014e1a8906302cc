//! End-to-end tests for the frame-to-glyph pipeline.
//!
//! These walk real pixel data through sampling, quantization, and glyph
//! rendering the way the player does, and check the bytes that would hit
//! the terminal.

use ttv::frame::Frame;
use ttv::quantize::{quantize, subsample};
use ttv::render::{RenderMode, Renderer};
use ttv::sampler::{fit_within, resize, split_channels, to_grayscale};

/// Build a grayscale frame from per-pixel intensities.
fn gray_frame(intensities: &[u8], width: u32, height: u32) -> Frame {
    let mut data = Vec::with_capacity(intensities.len() * 3);
    for &v in intensities {
        data.extend_from_slice(&[v, v, v]);
    }
    Frame::new(data, width, height)
}

#[test]
fn test_two_by_two_frame_to_half_block_row() {
    // Columns split dark/bright; the two rows collapse into one character
    // row: full block over the dark column, blank over the bright one.
    let frame = gray_frame(&[10, 200, 10, 200], 2, 2);
    let bitmap = quantize(&to_grayscale(&frame), 128);
    assert_eq!(bitmap.cells, vec![0, 1, 0, 1]);

    let mut renderer = Renderer::new(RenderMode::HalfBlock, 1);
    assert_eq!(renderer.render_bitmap(bitmap), "█ \n".as_bytes());
}

#[test]
fn test_full_block_path_subsamples_then_quantizes() {
    // 2x4 frame: top half dark, bottom half bright. Subsampling first gives
    // a 2x2 grid whose rows quantize to ink then paper.
    let frame = gray_frame(&[0, 0, 0, 0, 255, 255, 255, 255], 2, 4);
    let gray = subsample(&to_grayscale(&frame));
    assert_eq!(gray.height, 2);
    let bitmap = quantize(&gray, 128);

    let mut renderer = Renderer::new(RenderMode::FullBlock, 1);
    assert_eq!(renderer.render_bitmap(bitmap), "██\n  \n".as_bytes());
}

#[test]
fn test_oversized_frame_shrinks_to_canvas_before_rendering() {
    // A large uniform dark frame fit to an 8-column, 2-row half-block
    // canvas ends up 8x4 pixels and renders as two rows of full blocks.
    let frame = gray_frame(&vec![0u8; 64 * 32], 64, 32);
    let (w, h) = fit_within(frame.width, frame.height, 8, 4);
    assert_eq!((w, h), (8, 4));
    let sized = resize(&frame, w, h);
    let bitmap = quantize(&to_grayscale(&sized), 128);

    let mut renderer = Renderer::new(RenderMode::HalfBlock, 1);
    assert_eq!(renderer.render_bitmap(bitmap), "████████\n████████\n".as_bytes());
}

#[test]
fn test_truecolor_row_coalesces_repeated_colors() {
    // 4x2 frame, uniform orange: the whole row costs one foreground and
    // one background escape, then a reset.
    let mut data = Vec::new();
    for _ in 0..8 {
        data.extend_from_slice(&[255, 128, 0]);
    }
    let frame = Frame::new(data, 4, 2);

    let mut renderer = Renderer::new(RenderMode::Truecolor, 1);
    let out = renderer.render_color(&split_channels(&frame)).to_vec();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.matches("\x1b[38;2;255;128;0m").count(), 1);
    assert_eq!(text.matches("\x1b[48;2;255;128;0m").count(), 1);
    assert_eq!(text.matches('▀').count(), 4);
    assert_eq!(text.matches("\x1b[0m").count(), 1);
}

#[test]
fn test_diff_mode_across_three_frames() {
    let mut renderer = Renderer::new(RenderMode::Diff, 1);

    // Frame 1: drawn in full.
    let a = quantize(&to_grayscale(&gray_frame(&[0, 255, 0, 255], 2, 2)), 128);
    assert_eq!(renderer.render_bitmap(a.clone()), "█ \n".as_bytes());

    // Frame 2: identical, so only the newline survives.
    assert_eq!(renderer.render_bitmap(a), b"\n");

    // Frame 3: right column flips; the left cell becomes a cursor move.
    let c = quantize(&to_grayscale(&gray_frame(&[0, 0, 0, 0], 2, 2)), 128);
    assert_eq!(renderer.render_bitmap(c), "\x1b[1C█\n".as_bytes());
}

#[test]
fn test_threshold_changes_the_picture() {
    let frame = gray_frame(&[100, 100, 100, 100], 2, 2);
    let gray = to_grayscale(&frame);

    let mut renderer = Renderer::new(RenderMode::HalfBlock, 1);
    let dark = renderer.render_bitmap(quantize(&gray, 128)).to_vec();
    let bright = renderer.render_bitmap(quantize(&gray, 50)).to_vec();
    assert_eq!(dark, "██\n".as_bytes());
    assert_eq!(bright, "  \n".as_bytes());
}
