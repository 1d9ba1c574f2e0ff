//! Page configuration (JSON)
//!
//! **Why**: The page is data-driven: which frames, how tall the scroll
//! track is, where the overlay triggers, and the copy. Everything has a
//! default so a bare directory argument is enough to get a page.
//!
//! **Used by**: main (load + CLI overrides), App (layout and copy)

use anyhow::{Context, bail};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sequence::FrameSequence;

pub const DEFAULT_CONTAINER_HEIGHT: f32 = 3000.0;
pub const DEFAULT_TRIGGER_FRAME: usize = 26;

/// Full page description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Explicit ordered frame list; takes precedence over `images_dir`
    pub images: Vec<PathBuf>,
    /// Directory scanned (sorted by filename) when `images` is empty
    pub images_dir: Option<PathBuf>,
    /// Scroll-track height in pixels; maps scroll distance onto [0,1]
    pub container_height: f32,
    /// Frame index at which the overlay reveal begins
    pub text_trigger_frame: usize,
    pub headline: String,
    pub tagline: String,
    pub overlay_primary: String,
    pub overlay_secondary: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            images_dir: None,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            text_trigger_frame: DEFAULT_TRIGGER_FRAME,
            headline: "Built to move".to_string(),
            tagline: "Scroll to explore".to_string(),
            overlay_primary: "Every detail, frame by frame".to_string(),
            overlay_secondary: "Rendered live as you scroll".to_string(),
        }
    }
}

impl PageConfig {
    /// Load a page config from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!("Loaded page config from {}", path.display());
        Ok(config)
    }

    /// Resolve the frame sequence from `images` or `images_dir`
    pub fn resolve_sequence(&self) -> anyhow::Result<FrameSequence> {
        if !self.images.is_empty() {
            return FrameSequence::from_list(self.images.clone());
        }
        if let Some(dir) = &self.images_dir {
            return FrameSequence::from_dir(dir);
        }
        bail!("no frames configured: set `images`, `images_dir`, or pass a directory argument");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.container_height, 3000.0);
        assert_eq!(config.text_trigger_frame, 26);
        assert!(config.resolve_sequence().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PageConfig =
            serde_json::from_str(r#"{ "container_height": 4500.0, "images": ["a.png"] }"#)
                .unwrap();
        assert_eq!(config.container_height, 4500.0);
        assert_eq!(config.text_trigger_frame, 26);
        assert_eq!(
            config.resolve_sequence().unwrap().paths(),
            [PathBuf::from("a.png")]
        );
    }

    #[test]
    fn test_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("scrolla-cfg-{}.json", std::process::id()));
        let mut config = PageConfig::default();
        config.images = vec![PathBuf::from("x.png"), PathBuf::from("y.png")];
        config.text_trigger_frame = 12;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = PageConfig::load(&path).unwrap();
        assert_eq!(loaded.images, config.images);
        assert_eq!(loaded.text_trigger_frame, 12);

        std::fs::remove_file(&path).unwrap();
    }
}
