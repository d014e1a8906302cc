//! ffmpeg-backed video decoding.
//!
//! Frames arrive as raw RGB24 on an ffmpeg child process's stdout, one
//! fixed-size read per frame. No linking against libav; a missing binary is
//! reported as an actionable error.

use std::ffi::OsString;
use std::io::{self, ErrorKind, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use log::debug;

use super::{FrameSource, SourceError};
use crate::frame::Frame;

/// A running ffmpeg process emitting fixed-size RGB24 frames on stdout.
///
/// Shared by file and camera sources; only the input arguments differ.
pub(crate) struct RawVideoPipe {
    child: Child,
    stdout: ChildStdout,
    frame_size: usize,
    width: u32,
    height: u32,
}

impl RawVideoPipe {
    /// Spawn `ffmpeg <input_args> -f rawvideo -pix_fmt rgb24 -` and capture
    /// its stdout. `width`/`height` must match what ffmpeg will emit.
    pub(crate) fn spawn(
        input_args: &[OsString],
        width: u32,
        height: u32,
        input_desc: &str,
    ) -> Result<Self, SourceError> {
        let mut child = Command::new("ffmpeg")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .args(input_args)
            .arg("-f")
            .arg("rawvideo")
            .arg("-pix_fmt")
            .arg("rgb24")
            .arg("-")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .stdin(Stdio::null())
            .spawn()
            .map_err(|err| {
                if err.kind() == ErrorKind::NotFound {
                    SourceError::FfmpegNotFound
                } else {
                    SourceError::Spawn {
                        tool: "ffmpeg",
                        input: input_desc.to_owned(),
                        err,
                    }
                }
            })?;

        let stdout = child.stdout.take().ok_or_else(|| SourceError::Spawn {
            tool: "ffmpeg",
            input: input_desc.to_owned(),
            err: io::Error::new(ErrorKind::BrokenPipe, "no stdout handle"),
        })?;

        debug!("ffmpeg pipe up for {} at {}x{}", input_desc, width, height);

        Ok(Self {
            child,
            stdout,
            frame_size: (width * height * 3) as usize,
            width,
            height,
        })
    }

    /// Blocking read of one full frame. A clean or mid-frame EOF ends the
    /// stream; ffmpeg reports its own errors by closing the pipe.
    pub(crate) fn read_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        let mut data = vec![0u8; self.frame_size];
        match self.stdout.read_exact(&mut data) {
            Ok(()) => Ok(Some(Frame::new(data, self.width, self.height))),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(SourceError::Io(e)),
        }
    }

    /// Read and discard up to `n` frames.
    pub(crate) fn discard_frames(&mut self, n: u64) -> u64 {
        let mut scratch = vec![0u8; self.frame_size];
        for dropped in 0..n {
            if self.stdout.read_exact(&mut scratch).is_err() {
                return dropped;
            }
        }
        n
    }
}

impl Drop for RawVideoPipe {
    fn drop(&mut self) {
        // The child may still be streaming; reap it so it doesn't linger.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Decodes a video file through ffmpeg at its native resolution.
pub struct VideoSource {
    pipe: RawVideoPipe,
}

impl VideoSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let (width, height) = probe_dimensions(path)?;
        let input_args = vec![OsString::from("-i"), path.as_os_str().to_owned()];
        let pipe = RawVideoPipe::spawn(&input_args, width, height, &path.display().to_string())?;
        Ok(Self { pipe })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.pipe.width, self.pipe.height)
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        self.pipe.read_frame()
    }

    fn skip(&mut self, n: u64) -> u64 {
        self.pipe.discard_frames(n)
    }
}

/// Ask ffprobe for the video stream's pixel dimensions.
fn probe_dimensions(path: &Path) -> Result<(u32, u32), SourceError> {
    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("error")
        .arg("-select_streams")
        .arg("v:0")
        .arg("-show_entries")
        .arg("stream=width,height")
        .arg("-of")
        .arg("csv=p=0")
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                SourceError::FfmpegNotFound
            } else {
                SourceError::Spawn {
                    tool: "ffprobe",
                    input: path.display().to_string(),
                    err,
                }
            }
        })?;

    if !output.status.success() {
        return Err(SourceError::Probe {
            path: path.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    let text = String::from_utf8_lossy(&output.stdout);
    parse_probe_output(&text).ok_or_else(|| SourceError::Probe {
        path: path.to_path_buf(),
        reason: format!("unexpected ffprobe output: {:?}", text.trim()),
    })
}

/// Parse the first `width,height` line of `csv=p=0` probe output.
fn parse_probe_output(text: &str) -> Option<(u32, u32)> {
    let line = text.lines().find(|l| !l.trim().is_empty())?;
    let mut parts = line.trim().split(',');
    let width: u32 = parts.next()?.parse().ok()?;
    let height: u32 = parts.next()?.parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}
