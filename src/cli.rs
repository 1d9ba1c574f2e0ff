use clap::Parser;
use std::path::PathBuf;

use crate::config::PageConfig;

/// Scroll-driven image sequence scrubber
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory of sequence frames, sorted by filename (shorthand for `images_dir`)
    #[arg(value_name = "DIR")]
    pub images_dir: Option<PathBuf>,

    /// Page config JSON (frames, copy, track height, trigger frame)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scroll-track height in pixels (overrides config)
    #[arg(long = "height", value_name = "PX")]
    pub container_height: Option<f32>,

    /// Frame index at which the text overlay appears (overrides config)
    #[arg(long = "trigger-frame", value_name = "N")]
    pub trigger_frame: Option<usize>,

    /// Enable debug logging to file (default: scrolla.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Fold CLI overrides into a loaded (or default) page config
    pub fn apply_to(&self, config: &mut PageConfig) {
        if let Some(dir) = &self.images_dir {
            config.images_dir = Some(dir.clone());
            // Positional directory wins over a config's explicit list
            config.images.clear();
        }
        if let Some(height) = self.container_height {
            config.container_height = height;
        }
        if let Some(frame) = self.trigger_frame {
            config.text_trigger_frame = frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_config() {
        let args = Args::parse_from([
            "scrolla",
            "/seq",
            "--height",
            "4000",
            "--trigger-frame",
            "10",
        ]);
        let mut config = PageConfig::default();
        config.images = vec![PathBuf::from("old.png")];

        args.apply_to(&mut config);
        assert_eq!(config.images_dir, Some(PathBuf::from("/seq")));
        assert!(config.images.is_empty());
        assert_eq!(config.container_height, 4000.0);
        assert_eq!(config.text_trigger_frame, 10);
    }

    #[test]
    fn test_no_args_leave_config_untouched() {
        let args = Args::parse_from(["scrolla"]);
        let mut config = PageConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config.container_height, 3000.0);
        assert_eq!(config.text_trigger_frame, 26);
    }
}
