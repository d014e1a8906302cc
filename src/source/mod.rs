//! Frame sources: video files, live cameras, and image folders.

mod camera;
mod images;
mod video;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frame::Frame;

pub use camera::CameraSource;
pub use images::ImageDirSource;
pub use video::VideoSource;

/// Errors raised while opening or reading a frame source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("ffmpeg not found on PATH; install ffmpeg to play videos or cameras")]
    FfmpegNotFound,

    #[error("failed to start {tool} for {input}: {err}")]
    Spawn {
        tool: &'static str,
        input: String,
        err: io::Error,
    },

    #[error("could not probe {path}: {reason}")]
    Probe { path: PathBuf, reason: String },

    /// A single frame failed to decode. Local to that frame; the player
    /// logs it and moves on.
    #[error("frame decode failed: {0}")]
    Decode(String),

    #[error("no playable images in {0} (looked for jpg, jpeg, png, webp)")]
    EmptyFolder(PathBuf),

    #[error("{0} is not a video file or an image folder")]
    UnsupportedInput(PathBuf),

    #[error("camera capture is not supported on this platform")]
    CameraUnsupported,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A stream of decoded RGB frames.
///
/// Resource cleanup (child processes, file handles) happens on drop.
pub trait FrameSource {
    /// Pull the next frame. `Ok(None)` means the stream is exhausted.
    ///
    /// A [`SourceError::Decode`] only poisons the current frame; callers
    /// may keep pulling.
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError>;

    /// Drop up to `n` frames without decoding work where possible.
    /// Best-effort: returns how many were actually dropped.
    fn skip(&mut self, n: u64) -> u64;
}

/// Open the right source for a path: a directory plays as an image
/// slideshow, a regular file as an ffmpeg-decoded video.
pub fn open(path: &Path) -> Result<Box<dyn FrameSource>, SourceError> {
    if path.is_dir() {
        Ok(Box::new(ImageDirSource::open(path)?))
    } else if path.is_file() {
        Ok(Box::new(VideoSource::open(path)?))
    } else {
        Err(SourceError::UnsupportedInput(path.to_path_buf()))
    }
}
