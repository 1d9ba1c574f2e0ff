//! Drawable surface with cover-fit blitting
//!
//! **Why**: The scrub viewport shows exactly one frame at a time, scaled to
//! fully cover the surface while preserving aspect ratio (the overflowing
//! axis is cropped, centered). Drawing is CPU-side into an RGBA8 buffer; the
//! UI uploads it as a texture only when the generation counter changes.
//!
//! **Used by**: Scrubber (clear + blit per frame change), App (texture upload)

use log::debug;

use crate::frame::LoadedFrame;

/// Placement of a source bitmap over a surface under cover-fit scaling
///
/// Offsets are non-positive on the overflowing axis (the crop hangs off both
/// edges equally).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub draw_w: f32,
    pub draw_h: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CoverFit {
    /// Uniform scale so the image covers surface_w x surface_h, centered
    pub fn compute(image_aspect: f32, surface_w: f32, surface_h: f32) -> Self {
        let surface_aspect = if surface_h > 0.0 {
            surface_w / surface_h
        } else {
            0.0
        };

        if image_aspect > surface_aspect {
            // Image is wider: match heights, crop left/right
            let draw_h = surface_h;
            let draw_w = draw_h * image_aspect;
            Self {
                draw_w,
                draw_h,
                offset_x: (surface_w - draw_w) / 2.0,
                offset_y: 0.0,
            }
        } else {
            // Image is taller or equal: match widths, crop top/bottom
            let draw_w = surface_w;
            let draw_h = if image_aspect > 0.0 {
                draw_w / image_aspect
            } else {
                surface_h
            };
            Self {
                draw_w,
                draw_h,
                offset_x: 0.0,
                offset_y: (surface_h - draw_h) / 2.0,
            }
        }
    }
}

/// CPU pixel surface (RGBA8)
///
/// A zero-area surface is the "no context" case: draws silently no-op until
/// a resize produces usable dimensions.
#[derive(Debug)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    generation: u64,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            generation: 0,
        }
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

    /// Bumped on every draw; lets the UI skip redundant texture uploads
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Resync pixel dimensions to the host element's rendered size
    ///
    /// Invalidates the previous draw; the caller redraws the current frame
    /// immediately after.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        debug!("Surface resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.pixels = vec![0u8; width * height * 4];
        true
    }

    /// Clear the whole surface to transparent black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Clear, then blit the frame cover-fit (nearest sampling)
    ///
    /// No-ops on a non-ready frame or a zero-area surface.
    pub fn draw_frame(&mut self, frame: &LoadedFrame) {
        if !frame.is_ready() || !self.is_drawable() {
            return;
        }

        self.clear();

        let fit = CoverFit::compute(frame.aspect(), self.width as f32, self.height as f32);
        let src = frame.pixels();
        let (img_w, img_h) = (frame.width(), frame.height());

        // Cover fit guarantees every surface pixel maps inside the image;
        // the clamp only guards float edge rounding.
        for y in 0..self.height {
            let v = (y as f32 - fit.offset_y) / fit.draw_h;
            let src_y = ((v * img_h as f32) as usize).min(img_h - 1);
            let src_row = src_y * img_w * 4;
            let dst_row = y * self.width * 4;

            for x in 0..self.width {
                let u = (x as f32 - fit.offset_x) / fit.draw_w;
                let src_x = ((u * img_w as f32) as usize).min(img_w - 1);
                let s = src_row + src_x * 4;
                let d = dst_row + x * 4;
                self.pixels[d..d + 4].copy_from_slice(&src[s..s + 4]);
            }
        }

        self.generation += 1;
    }
}
