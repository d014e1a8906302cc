//! Image-folder playback: every still in a directory, in name order.

use std::path::{Path, PathBuf};

use log::debug;

use super::{FrameSource, SourceError};
use crate::frame::Frame;

const EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Plays the images of a folder as consecutive frames.
pub struct ImageDirSource {
    files: Vec<PathBuf>,
    index: usize,
}

impl ImageDirSource {
    /// Enumerate the folder's playable images, sorted by file name.
    pub fn open(dir: &Path) -> Result<Self, SourceError> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_playable_extension(&path) {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(SourceError::EmptyFolder(dir.to_path_buf()));
        }
        debug!("image folder {} holds {} frame(s)", dir.display(), files.len());
        Ok(Self { files, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for ImageDirSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        let Some(path) = self.files.get(self.index) else {
            return Ok(None);
        };
        // Advance past the file either way so one broken image cannot
        // wedge playback.
        self.index += 1;

        let img = image::open(path)
            .map_err(|e| SourceError::Decode(format!("{}: {}", path.display(), e)))?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Some(Frame::new(rgb.into_raw(), width, height)))
    }

    fn skip(&mut self, n: u64) -> u64 {
        let remaining = self.files.len() - self.index;
        let skipped = (n as usize).min(remaining);
        self.index += skipped;
        skipped as u64
    }
}

fn has_playable_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXTENSIONS.iter().any(|known| e.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}
