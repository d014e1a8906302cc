//! CLI argument parsing with clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::render::RenderMode;

/// Plays video files, cameras, and image folders as block art in the terminal
#[derive(Parser, Debug)]
#[command(name = "ttv")]
#[command(version, about = "Terminal television: block-art video playback", long_about = None)]
pub struct Args {
    /// Video file or image folder to play
    #[arg(required_unless_present = "camera")]
    pub input: Option<PathBuf>,

    /// Play a camera device instead of a file
    #[arg(long, conflicts_with = "input")]
    pub camera: Option<u32>,

    /// Camera capture size, WIDTHxHEIGHT
    #[arg(long, default_value = "640x480", value_parser = parse_capture_size)]
    pub camera_size: (u32, u32),

    /// Target frame rate (1-240)
    #[arg(long, value_parser = parse_fps)]
    pub fps: Option<u32>,

    /// Render mode
    #[arg(long, short)]
    pub mode: Option<Mode>,

    /// Ink threshold (0-255) for the monochrome modes
    #[arg(long, short)]
    pub threshold: Option<u8>,

    /// Never drop frames to catch up; lag instead
    #[arg(long)]
    pub no_skip: bool,

    /// Horizontal glyph repeat in full-block mode (1-4)
    #[arg(long, value_parser = parse_repeat)]
    pub repeat: Option<u32>,

    /// Show frames rendered/skipped and fps below the picture
    #[arg(long)]
    pub stats: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// How frames are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// One `█`-or-space glyph per cell
    FullBlock,
    /// Two vertical pixels per character cell, monochrome
    HalfBlock,
    /// Two vertical pixels per character cell, 24-bit color
    #[default]
    Truecolor,
    /// Half blocks, redrawing only cells that changed
    Diff,
}

impl From<Mode> for RenderMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::FullBlock => RenderMode::FullBlock,
            Mode::HalfBlock => RenderMode::HalfBlock,
            Mode::Truecolor => RenderMode::Truecolor,
            Mode::Diff => RenderMode::Diff,
        }
    }
}

fn parse_fps(s: &str) -> Result<u32, String> {
    let fps: u32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(1..=240).contains(&fps) {
        return Err(format!("fps must be between 1 and 240, got {fps}"));
    }
    Ok(fps)
}

fn parse_repeat(s: &str) -> Result<u32, String> {
    let repeat: u32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(1..=4).contains(&repeat) {
        return Err(format!("repeat must be between 1 and 4, got {repeat}"));
    }
    Ok(repeat)
}

fn parse_capture_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("'{s}' is not WIDTHxHEIGHT"))?;
    let width: u32 = w.parse().map_err(|_| format!("'{w}' is not a number"))?;
    let height: u32 = h.parse().map_err(|_| format!("'{h}' is not a number"))?;
    if width == 0 || height == 0 {
        return Err("capture size must be non-zero".to_string());
    }
    Ok((width, height))
}
