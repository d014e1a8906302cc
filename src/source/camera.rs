//! Live camera capture through ffmpeg's platform device inputs.

use std::ffi::OsString;

use super::video::RawVideoPipe;
use super::{FrameSource, SourceError};
use crate::frame::Frame;

/// Streams a camera as RGB24 frames at a requested capture size.
///
/// Uses `v4l2` on Linux and `avfoundation` on macOS, so the frame
/// dimensions are known up front without probing.
pub struct CameraSource {
    pipe: RawVideoPipe,
}

impl CameraSource {
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self, SourceError> {
        let size = format!("{}x{}", width, height);
        let input_args = device_input_args(index, &size)?;
        let pipe = RawVideoPipe::spawn(&input_args, width, height, &format!("camera {}", index))?;
        Ok(Self { pipe })
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        self.pipe.read_frame()
    }

    /// Skipping a live source just drains frames ffmpeg has buffered.
    fn skip(&mut self, n: u64) -> u64 {
        self.pipe.discard_frames(n)
    }
}

#[cfg(target_os = "linux")]
fn device_input_args(index: u32, size: &str) -> Result<Vec<OsString>, SourceError> {
    Ok(vec![
        OsString::from("-f"),
        OsString::from("v4l2"),
        OsString::from("-video_size"),
        OsString::from(size),
        OsString::from("-i"),
        OsString::from(format!("/dev/video{}", index)),
    ])
}

#[cfg(target_os = "macos")]
fn device_input_args(index: u32, size: &str) -> Result<Vec<OsString>, SourceError> {
    Ok(vec![
        OsString::from("-f"),
        OsString::from("avfoundation"),
        OsString::from("-framerate"),
        OsString::from("30"),
        OsString::from("-video_size"),
        OsString::from(size),
        OsString::from("-i"),
        OsString::from(format!("{}:none", index)),
    ])
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn device_input_args(_index: u32, _size: &str) -> Result<Vec<OsString>, SourceError> {
    Err(SourceError::CameraUnsupported)
}
