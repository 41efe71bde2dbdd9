//! Trail accumulation.
//!
//! The compositor owns a persistent [`FrameBuffer`]. Every frame it paints a
//! translucent rectangle over the whole buffer, then draws the live
//! particles on top. Old draws decay geometrically by the fade alpha, which
//! leaves a trail behind each particle.

use crate::canvas::{Canvas, FrameBuffer, Rect};
use crate::config::{Params, Style};
use crate::population::Population;

/// 8-bit alpha of the per-frame fade for a given `history`.
///
/// `history` is not range-checked here; only the resulting byte is clamped.
pub fn fade_alpha(history: f32) -> u8 {
    ((1.0 - history) * 255.0).clamp(0.0, 255.0) as u8
}

/// Owner of the trail accumulator.
pub struct Compositor {
    buffer: FrameBuffer,
    style: Style,
}

impl Compositor {
    /// Allocate a `width` x `height` accumulator cleared to the background.
    pub fn new(width: u32, height: u32, style: Style) -> Self {
        Self {
            buffer: FrameBuffer::new(width, height, style.background),
            style,
        }
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// The accumulator, as last presented.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Fade the accumulator towards the fade color.
    pub fn fade(&mut self, history: f32) {
        let (width, height) = self.buffer.size();
        let color = self.style.fade_color.with_alpha8(fade_alpha(history));
        self.buffer
            .fill_rect(Rect::new(0.0, 0.0, width as f32, height as f32), color);
    }

    /// Fade, draw every live particle, and hand back the buffer to blit.
    pub fn present(&mut self, population: &Population, params: &Params) -> &FrameBuffer {
        self.fade(params.history);
        population.render(&mut self.buffer, &self.style);
        &self.buffer
    }

    /// Reset the accumulator to the flat background, without blending.
    pub fn clear(&mut self) {
        self.buffer.clear(self.style.background);
        tracing::info!("trail buffer cleared");
    }

    /// Reallocate the accumulator for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != self.buffer.size() {
            self.buffer = FrameBuffer::new(width, height, self.style.background);
        }
    }
}
