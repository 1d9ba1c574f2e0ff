//! Frame sequence discovery and ordering
//!
//! **Why**: The scrub animation is defined by an ordered, fixed list of image
//! paths. Order is draw order; index 0 maps to scroll progress 0.0 and index
//! N-1 to progress 1.0.
//!
//! **Used by**: Page config (resolving `images`/`images_dir`), Preloader

use anyhow::{Context, bail};
use log::info;
use std::path::{Path, PathBuf};

/// Supported image file extensions
pub const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "tga"];

/// Check if a path has a supported image extension
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| IMAGE_EXTS.contains(&s.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Ordered, immutable list of frame locators
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    paths: Vec<PathBuf>,
}

impl FrameSequence {
    /// Build from an explicit ordered list (order preserved as given)
    pub fn from_list(paths: Vec<PathBuf>) -> anyhow::Result<Self> {
        if paths.is_empty() {
            bail!("frame sequence is empty");
        }
        Ok(Self { paths })
    }

    /// Scan a directory for supported images, sorted by filename
    ///
    /// Filename sort is the frame order, so sequences are expected to use
    /// zero-padded numbering (frame_001.jpg, frame_002.jpg, ...).
    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        let pattern = dir.join("*");
        let pattern = pattern
            .to_str()
            .with_context(|| format!("non-UTF8 path: {}", dir.display()))?;

        let mut paths: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("bad glob pattern: {}", pattern))?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file() && is_supported(p))
            .collect();
        paths.sort();

        if paths.is_empty() {
            bail!("no supported images found in {}", dir.display());
        }

        info!("Sequence: {} frames from {}", paths.len(), dir.display());
        Self::from_list(paths)
    }

    /// Number of frames N
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("a/frame_001.jpg")));
        assert!(is_supported(Path::new("FRAME.PNG")));
        assert!(!is_supported(Path::new("clip.mp4")));
        assert!(!is_supported(Path::new("noext")));
    }

    #[test]
    fn test_from_list_preserves_order() {
        let paths = vec![PathBuf::from("b.png"), PathBuf::from("a.png")];
        let seq = FrameSequence::from_list(paths.clone()).unwrap();
        assert_eq!(seq.paths(), paths.as_slice());
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(FrameSequence::from_list(Vec::new()).is_err());
    }

    #[test]
    fn test_from_dir_sorted_and_filtered() {
        let dir = std::env::temp_dir().join(format!("scrolla-seq-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["frame_002.png", "frame_001.png", "notes.txt", "frame_003.jpg"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        let seq = FrameSequence::from_dir(&dir).unwrap();
        let names: Vec<_> = seq
            .paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["frame_001.png", "frame_002.png", "frame_003.jpg"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_from_dir_without_images_fails() {
        let dir = std::env::temp_dir().join(format!("scrolla-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        assert!(FrameSequence::from_dir(&dir).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
