//! eframe application: page layout, texture upload, repaint scheduling
//!
//! **Why**: Hosts the scrub engine inside a scrollable page. The page is a
//! hero section (one viewport tall) followed by the scroll track
//! (`container_height` px tall); while the track spans the viewport, the
//! scrub surface stays pinned and frames play under the scroll position.
//!
//! **Used by**: main (constructed once, handed to `eframe::run_native`)
//!
//! # Per-repaint flow
//!
//! drain events -> lay out hero + track -> feed track geometry to the
//! scrubber -> resize surface to the pinned rect -> tick -> upload texture
//! if the surface generation moved -> paint frame + overlays.

use eframe::egui;
use log::{info, warn};
use std::time::{Duration, Instant};

use crate::config::PageConfig;
use crate::events::{ScrubEvent, ScrubEventSender};
use crate::hero::hero_tween;
use crate::scroll::ScrollMetrics;
use crate::scrubber::Scrubber;
use crate::sequence::FrameSequence;

/// Poll cadence while the preloader is still running
const LOADING_REPAINT: Duration = Duration::from_millis(50);

/// Main application state
pub struct ScrollaApp {
    page: PageConfig,
    scrubber: Scrubber,
    event_rx: crossbeam_channel::Receiver<ScrubEvent>,
    texture: Option<egui::TextureHandle>,
    texture_generation: u64,
    status: String,
}

impl ScrollaApp {
    pub fn new(page: PageConfig, sequence: FrameSequence) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let scrubber = Scrubber::new(
            sequence.into_paths(),
            page.text_trigger_frame,
            ScrubEventSender::new(tx),
        );

        Self {
            page,
            scrubber,
            event_rx: rx,
            texture: None,
            texture_generation: 0,
            status: "Loading...".to_string(),
        }
    }

    /// Drain scrub events into the log and the status line
    fn drain_events(&mut self) {
        for event in self.event_rx.try_iter() {
            match event {
                ScrubEvent::SequenceLoaded { frame_count } => {
                    info!("Sequence loaded: {} frames", frame_count);
                    self.status = format!("{} frames", frame_count);
                }
                ScrubEvent::LoadFailed { path } => {
                    warn!("Sequence load failed at {}", path.display());
                    self.status = format!("Failed: {}", path.display());
                }
                ScrubEvent::FrameChanged { new_frame, .. } => {
                    self.status = format!(
                        "Frame {}/{}",
                        new_frame + 1,
                        self.scrubber.frame_count()
                    );
                }
                ScrubEvent::OverlayChanged { primary, secondary } => {
                    info!("Overlay: primary={} secondary={}", primary, secondary);
                }
            }
        }
    }

    /// Upload surface pixels when the draw generation moved
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let Some(surface) = self.scrubber.surface() else {
            return;
        };
        if !surface.is_drawable() || surface.generation() == self.texture_generation {
            return;
        }

        let image = egui::ColorImage::from_rgba_unmultiplied(
            [surface.width(), surface.height()],
            surface.pixels(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("scrub-frame", image, egui::TextureOptions::LINEAR))
            }
        }
        self.texture_generation = surface.generation();
    }

    /// Hero: one viewport tall, copy fades and drifts up while it scrolls out
    fn hero_section(&self, ui: &mut egui::Ui, viewport_height: f32) {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), viewport_height),
            egui::Sense::hover(),
        );
        if !ui.is_rect_visible(rect) {
            return;
        }

        let scrolled = (ui.clip_rect().top() - rect.top()).max(0.0);
        let tween = hero_tween(scrolled, rect.height());
        if tween.opacity <= 0.0 {
            return;
        }

        let center = rect.center() + egui::vec2(0.0, tween.offset_y);
        ui.painter().text(
            center - egui::vec2(0.0, 24.0),
            egui::Align2::CENTER_CENTER,
            &self.page.headline,
            egui::FontId::proportional(56.0),
            egui::Color32::WHITE.gamma_multiply(tween.opacity),
        );
        ui.painter().text(
            center + egui::vec2(0.0, 28.0),
            egui::Align2::CENTER_CENTER,
            &self.page.tagline,
            egui::FontId::proportional(20.0),
            egui::Color32::from_gray(180).gamma_multiply(tween.opacity),
        );
    }

    /// Track: container_height tall; hosts the pinned scrub viewport
    fn track_section(&mut self, ui: &mut egui::Ui, viewport_height: f32) {
        let (track_rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), self.page.container_height),
            egui::Sense::hover(),
        );

        let clip_top = ui.clip_rect().top();
        self.scrubber.on_scroll(ScrollMetrics::new(
            track_rect.top() - clip_top,
            self.page.container_height,
            viewport_height,
        ));

        // Pinned viewport: sticks to the window while the track spans it
        let pinned_top = (track_rect.top())
            .max(clip_top)
            .min(track_rect.bottom() - viewport_height);
        let pinned_rect = egui::Rect::from_min_size(
            egui::pos2(track_rect.left(), pinned_top),
            egui::vec2(track_rect.width(), viewport_height),
        );

        // Surface pixels follow the pinned rect's physical size
        let ppp = ui.ctx().pixels_per_point();
        self.scrubber.resize(
            (pinned_rect.width() * ppp).round() as usize,
            (pinned_rect.height() * ppp).round() as usize,
        );

        self.scrubber.tick(Instant::now());
        self.sync_texture(ui.ctx());

        if !ui.is_rect_visible(pinned_rect) {
            return;
        }
        let painter = ui.painter();

        if self.scrubber.is_loaded() {
            if let Some(texture) = &self.texture {
                painter.image(
                    texture.id(),
                    pinned_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            self.paint_overlays(painter, pinned_rect);
        } else if self.scrubber.is_failed() {
            painter.text(
                pinned_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Sequence failed to load",
                egui::FontId::proportional(24.0),
                egui::Color32::from_rgb(255, 100, 100),
            );
        } else if let Some((loaded, total)) = self.scrubber.loading_progress() {
            painter.text(
                pinned_rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("Loading frames... {}/{}", loaded, total),
                egui::FontId::proportional(24.0),
                egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200),
            );
        }
    }

    fn paint_overlays(&self, painter: &egui::Painter, rect: egui::Rect) {
        if self.scrubber.primary_visible() {
            painter.text(
                rect.center() - egui::vec2(0.0, 30.0),
                egui::Align2::CENTER_CENTER,
                &self.page.overlay_primary,
                egui::FontId::proportional(44.0),
                egui::Color32::WHITE,
            );
        }
        if self.scrubber.secondary_visible() {
            painter.text(
                rect.center() + egui::vec2(0.0, 26.0),
                egui::Align2::CENTER_CENTER,
                &self.page.overlay_secondary,
                egui::FontId::proportional(20.0),
                egui::Color32::from_gray(200),
            );
        }
    }

    /// Keep repainting while the preloader or the settle timer is pending
    fn schedule_repaint(&self, ctx: &egui::Context) {
        if self.scrubber.loading_progress().is_some() {
            ctx.request_repaint_after(LOADING_REPAINT);
        } else if let Some(deadline) = self.scrubber.settle_deadline() {
            let wait = deadline.saturating_duration_since(Instant::now());
            ctx.request_repaint_after(wait);
        }
    }
}

impl eframe::App for ScrollaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let viewport_height = ui.available_height();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.hero_section(ui, viewport_height);
                        self.track_section(ui, viewport_height);
                    });

                // Status line, always on top of the page
                ui.painter().text(
                    ui.max_rect().left_bottom() + egui::vec2(8.0, -8.0),
                    egui::Align2::LEFT_BOTTOM,
                    &self.status,
                    egui::FontId::proportional(12.0),
                    egui::Color32::from_rgba_unmultiplied(255, 255, 255, 120),
                );
            });

        self.schedule_repaint(ctx);
    }
}
