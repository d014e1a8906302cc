//! The render loop: source to screen, one frame at a time.

use std::io::{self, Write};
use std::time::Instant;

use log::warn;
use thiserror::Error;

use crate::frame::Frame;
use crate::pacer::FramePacer;
use crate::quantize;
use crate::render::{RenderMode, Renderer};
use crate::sampler;
use crate::source::{FrameSource, SourceError};
use crate::terminal;

/// Rows kept below the picture for the stats readout.
const STATS_ROWS: u16 = 2;

/// Everything the loop needs decided up front.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub mode: RenderMode,
    pub fps: u32,
    pub threshold: u8,
    pub skip: bool,
    pub repeat: u32,
    pub stats: bool,
}

/// What a finished (or interrupted) run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub frames_rendered: u64,
    pub frames_skipped: u64,
    pub interrupted: bool,
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("could not query the terminal size: {0}")]
    TerminalQuery(io::Error),

    #[error("terminal is too small to draw in ({cols}x{rows})")]
    TerminalTooSmall { cols: u16, rows: u16 },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Play a source to stdout until it ends, the user interrupts, or the
/// terminal fails underneath us.
///
/// The caller is expected to hold a [`terminal::TerminalGuard`] around this
/// call; the loop itself only homes the cursor and clears on resize.
pub fn play(
    source: &mut dyn FrameSource,
    opts: &PlayOptions,
) -> Result<PlaybackSummary, PlayerError> {
    let mut pacer = FramePacer::new(opts.fps, opts.skip);
    let mut renderer = Renderer::new(opts.mode, opts.repeat);
    let mut stdout = io::stdout().lock();

    let run_start = Instant::now();
    let mut last_size: Option<(u16, u16)> = None;
    let mut frames_rendered: u64 = 0;
    let mut frames_skipped: u64 = 0;
    let mut interrupted = false;

    loop {
        if terminal::interrupted() {
            interrupted = true;
            break;
        }

        let behind = pacer.frames_behind();
        if behind > 0 {
            let dropped = source.skip(behind);
            pacer.record_skipped(dropped);
            frames_skipped += dropped;
        }

        let frame_start = Instant::now();

        let (cols, rows) = terminal::probe_size().map_err(PlayerError::TerminalQuery)?;
        if cols < 2 || rows < 2 {
            return Err(PlayerError::TerminalTooSmall { cols, rows });
        }
        if last_size != Some((cols, rows)) {
            // Stale glyphs outside the new canvas would linger otherwise,
            // and the diff baseline no longer matches the screen.
            if last_size.is_some() {
                stdout.write_all(terminal::CLEAR)?;
                renderer.clear_baseline();
            }
            last_size = Some((cols, rows));
        }

        let canvas_rows = if opts.stats {
            rows.saturating_sub(STATS_ROWS).max(2)
        } else {
            rows
        };

        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(SourceError::Decode(msg)) => {
                // One bad frame is not worth tearing down the run; the
                // schedule moves on without it.
                warn!("dropping undecodable frame: {msg}");
                pacer.advance();
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let sized = fit_frame(&frame, cols, canvas_rows, opts);

        stdout.write_all(terminal::HOME)?;
        match opts.mode {
            RenderMode::Truecolor => {
                let grid = sampler::split_channels(&sized);
                stdout.write_all(renderer.render_color(&grid))?;
            }
            RenderMode::FullBlock => {
                let gray = quantize::subsample(&sampler::to_grayscale(&sized));
                let bitmap = quantize::quantize(&gray, opts.threshold);
                stdout.write_all(renderer.render_bitmap(bitmap))?;
            }
            RenderMode::HalfBlock | RenderMode::Diff => {
                let bitmap = quantize::quantize(&sampler::to_grayscale(&sized), opts.threshold);
                stdout.write_all(renderer.render_bitmap(bitmap))?;
            }
        }

        frames_rendered += 1;
        pacer.advance();

        if opts.stats {
            let fps = frames_rendered as f64 / run_start.elapsed().as_secs_f64().max(1e-6);
            write!(
                stdout,
                "\n\x1b[0K {} frames, {} skipped, {:.1} fps",
                frames_rendered, frames_skipped, fps
            )?;
        }
        stdout.flush()?;

        pacer.sleep_remainder(frame_start);
    }

    Ok(PlaybackSummary {
        frames_rendered,
        frames_skipped,
        interrupted,
    })
}

/// Shrink a frame to the mode's pixel target for a (cols, rows) canvas.
///
/// Half-block modes pack two pixels per character row, so the pixel target
/// is twice the row count and the fitted height is floored to even. Full
/// block spends `repeat` columns per cell and halves the height again in
/// the subsampler.
fn fit_frame(frame: &Frame, cols: u16, rows: u16, opts: &PlayOptions) -> Frame {
    let max_w = match opts.mode {
        RenderMode::FullBlock => (cols as u32 / opts.repeat).max(1),
        _ => cols as u32,
    };
    let max_h = rows as u32 * 2;

    let (w, mut h) = sampler::fit_within(frame.width, frame.height, max_w, max_h);
    if opts.mode != RenderMode::FullBlock {
        h &= !1;
    }
    sampler::resize(frame, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(mode: RenderMode) -> PlayOptions {
        PlayOptions {
            mode,
            fps: 30,
            threshold: 128,
            skip: true,
            repeat: 1,
            stats: false,
        }
    }

    fn gradient_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) % 256) as u8;
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::new(data, width, height)
    }

    #[test]
    fn test_fit_frame_half_block_height_is_even() {
        // 3:1 source against an 80x24 canvas: fitted height would be odd
        // without the floor.
        let frame = gradient_frame(240, 81);
        let sized = fit_frame(&frame, 80, 24, &opts(RenderMode::HalfBlock));
        assert!(sized.height % 2 == 0);
        assert!(sized.width <= 80);
        assert!(sized.height <= 48);
    }

    #[test]
    fn test_fit_frame_full_block_divides_by_repeat() {
        let mut o = opts(RenderMode::FullBlock);
        o.repeat = 2;
        let frame = gradient_frame(400, 400);
        let sized = fit_frame(&frame, 80, 24, &o);
        assert!(sized.width <= 40);
    }

    #[test]
    fn test_fit_frame_never_upsamples() {
        let frame = gradient_frame(10, 6);
        let sized = fit_frame(&frame, 200, 100, &opts(RenderMode::Truecolor));
        assert_eq!((sized.width, sized.height), (10, 6));
    }
}
