use scrolla::app::ScrollaApp;
use scrolla::cli::Args;
use scrolla::config::PageConfig;

use clap::Parser;
use eframe::egui;
use log::{debug, info};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("scrolla.log"));
        let file = std::fs::File::create(&log_path)?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }

    info!("Scrolla starting...");
    debug!("Command-line args: {:?}", args);

    // Page config: file if given, defaults otherwise, CLI flags on top
    let mut page = match &args.config {
        Some(path) => PageConfig::load(path)?,
        None => PageConfig::default(),
    };
    args.apply_to(&mut page);

    let sequence = page.resolve_sequence()?;
    info!(
        "Page: {} frames, track {}px, overlay trigger at frame {}",
        sequence.len(),
        page.container_height,
        page.text_trigger_frame
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Scrolla v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([1280.0, 800.0])
            .with_resizable(true),
        ..Default::default()
    };

    let app = ScrollaApp::new(page, sequence);
    eframe::run_native(
        "Scrolla",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;

    Ok(())
}
