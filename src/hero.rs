//! Hero section scroll tween
//!
//! **Why**: The page opens with a headline that fades out and drifts upward
//! as the user scrolls through the hero's own height. Pure scroll-linked
//! tween, no state, recomputed every repaint.
//!
//! **Used by**: App (paints the hero copy with these values)

/// Fraction of the hero height the copy drifts upward over a full fade
const PARALLAX_FACTOR: f32 = 0.35;

/// Opacity and vertical offset of the hero copy at one scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroTween {
    /// 1.0 at the top of the page, 0.0 once scrolled past the hero
    pub opacity: f32,
    /// Upward drift in pixels (negative = up)
    pub offset_y: f32,
}

/// Tween for a given scroll offset into a hero of `hero_height` pixels
pub fn hero_tween(scroll_offset: f32, hero_height: f32) -> HeroTween {
    if hero_height <= 0.0 {
        return HeroTween {
            opacity: 1.0,
            offset_y: 0.0,
        };
    }
    let progress = (scroll_offset / hero_height).clamp(0.0, 1.0);
    HeroTween {
        opacity: 1.0 - progress,
        offset_y: -progress * hero_height * PARALLAX_FACTOR,
    }
}
