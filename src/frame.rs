//! Frame loading into RGBA8 pixel buffers
//!
//! **Why**: The scrubber redraws on every frame-index change, so frames must
//! already be decoded when scrolling starts. Each frame decodes once, up
//! front, into a plain RGBA8 buffer the surface can sample directly.
//!
//! **Used by**: Preloader workers (parallel decode), Surface (cover-fit blit)

use log::debug;
use std::path::{Path, PathBuf};

/// Frame loading errors
#[derive(Debug)]
pub enum FrameError {
    /// The file could not be opened or decoded
    Image { path: PathBuf, reason: String },
    /// Extension is not one of the supported image formats
    UnsupportedFormat(PathBuf),
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::Image { path, reason } => {
                write!(f, "Image error for {}: {}", path.display(), reason)
            }
            FrameError::UnsupportedFormat(path) => {
                write!(f, "Unsupported format: {}", path.display())
            }
        }
    }
}

impl std::error::Error for FrameError {}

impl FrameError {
    /// Locator the error refers to
    pub fn path(&self) -> &Path {
        match self {
            FrameError::Image { path, .. } => path,
            FrameError::UnsupportedFormat(path) => path,
        }
    }
}

/// One decoded frame of the sequence
///
/// Created once by the preloader, read-only afterwards. `ready` is false only
/// for placeholders (frames constructed without pixel data); the draw path
/// skips non-ready frames instead of erroring.
#[derive(Debug, Clone)]
pub struct LoadedFrame {
    path: PathBuf,
    width: usize,
    height: usize,
    pixels: Vec<u8>, // RGBA8, row-major
    ready: bool,
}

impl LoadedFrame {
    /// Decode an image file into an RGBA8 frame
    pub fn load(path: &Path) -> Result<Self, FrameError> {
        if !crate::sequence::is_supported(path) {
            return Err(FrameError::UnsupportedFormat(path.to_path_buf()));
        }

        let img = image::open(path)
            .map_err(|e| FrameError::Image {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .to_rgba8();

        let (width, height) = (img.width() as usize, img.height() as usize);
        debug!("Loaded {} ({}x{})", path.display(), width, height);

        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            pixels: img.into_raw(),
            ready: true,
        })
    }

    /// Build a frame directly from pixel data (tests, synthetic frames)
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 4);
        Self {
            path: PathBuf::new(),
            width,
            height,
            pixels,
            ready: true,
        }
    }

    /// Not-ready placeholder (exercises the defensive draw guard)
    pub fn placeholder(path: PathBuf) -> Self {
        Self {
            path,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            ready: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// RGBA8 pixel data, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_ready(&self) -> bool {
        self.ready && self.width > 0 && self.height > 0
    }

    /// Width-over-height aspect ratio
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(w: usize, h: usize) -> LoadedFrame {
        LoadedFrame::from_pixels(w, h, vec![255u8; w * h * 4])
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(solid_frame(400, 400).aspect(), 1.0);
        assert_eq!(solid_frame(1920, 1080).aspect(), 1920.0 / 1080.0);
    }

    #[test]
    fn test_placeholder_not_ready() {
        let frame = LoadedFrame::placeholder(PathBuf::from("missing.png"));
        assert!(!frame.is_ready());
        assert_eq!(frame.aspect(), 0.0);
    }

    #[test]
    fn test_load_rejects_unsupported_extension() {
        let err = LoadedFrame::load(Path::new("frame_001.mp4")).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_missing_file_is_image_error() {
        let err = LoadedFrame::load(Path::new("/nonexistent/frame_001.png")).unwrap_err();
        match err {
            FrameError::Image { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/frame_001.png"))
            }
            other => panic!("expected Image error, got {:?}", other),
        }
    }
}
