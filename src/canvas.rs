//! Drawing sink and the CPU frame buffer behind it.
//!
//! Particles draw through the [`Canvas`] trait, so the core never depends on
//! how pixels reach the screen. [`FrameBuffer`] is the implementation used by
//! the compositor: a float RGBA surface with source-over blending, uploaded
//! to the GPU once per frame.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SnapshotError;

/// Straight-alpha color with channels in `0.0..=1.0`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with an 8-bit alpha, as used by the trail fade.
    pub fn with_alpha8(self, alpha: u8) -> Self {
        Self { a: alpha as f32 / 255.0, ..self }
    }

    /// Opaque color from HSV, every component in `0.0..=1.0`.
    ///
    /// Hue wraps: red, yellow, green, cyan, blue, magenta, red.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let c = v * s;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (h * 6.0) as u32 % 6 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::rgb(r + m, g + m, b + m)
    }

    /// Quantize to 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    #[inline]
    fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    #[inline]
    fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Composite `self` over `dst` (source-over, straight alpha).
    #[inline]
    pub fn over(self, dst: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let src = self.to_vec4();
        let mut out = src * a + dst.to_vec4() * (1.0 - a);
        out.w = a + dst.a * (1.0 - a);
        Self::from_vec4(out)
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// A 2D surface the core can draw into.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill `rect`, blending `color` by its alpha.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Fill the disk at `center` with `radius`, blending `color` by its alpha.
    fn fill_disk(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Overwrite every pixel with `color`, no blending.
    fn clear(&mut self, color: Rgba);
}

/// Persistent float RGBA surface, row-major, origin top-left.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    /// Allocate a `width` x `height` buffer filled with `color`.
    pub fn new(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Quantize into `out` as tightly packed RGBA8 rows.
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for p in &self.pixels {
            out.extend_from_slice(&p.to_rgba8());
        }
    }

    /// Copy into an 8-bit image.
    pub fn to_image(&self) -> image::RgbaImage {
        let mut bytes = Vec::new();
        self.write_rgba8(&mut bytes);
        image::RgbaImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Write the buffer as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        if self.pixels.is_empty() {
            return Err(SnapshotError::EmptyFrame);
        }
        self.to_image().save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel index range whose centers fall in `[lo, hi)`, clipped to `0..limit`.
    fn span(lo: f32, hi: f32, limit: u32) -> (u32, u32) {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().min(limit as f32);
        if end <= start {
            (0, 0)
        } else {
            (start as u32, end as u32)
        }
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.index(x, y);
        self.pixels[i] = color.over(self.pixels[i]);
    }
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let (x0, x1) = Self::span(rect.x, rect.x + rect.width, self.width);
        let (y0, y1) = Self::span(rect.y, rect.y + rect.height, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_disk(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 || !center.is_finite() {
            return;
        }

        let r2 = radius * radius;
        let (x0, x1) = Self::span(center.x - radius, center.x + radius + 1.0, self.width);
        let (y0, y1) = Self::span(center.y - radius, center.y + radius + 1.0, self.height);
        let mut covered = false;
        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.blend(x, y, color);
                    covered = true;
                }
            }
        }

        // Sub-pixel disks still mark the pixel they sit in.
        if !covered && center.x >= 0.0 && center.y >= 0.0 {
            let (x, y) = (center.x as u32, center.y as u32);
            if x < self.width && y < self.height {
                self.blend(x, y, color);
            }
        }
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_hsv_primaries() {
        let red = Rgba::from_hsv(0.0, 1.0, 1.0);
        assert!(approx(red.r, 1.0) && approx(red.g, 0.0) && approx(red.b, 0.0));

        let green = Rgba::from_hsv(1.0 / 3.0, 1.0, 1.0);
        assert!(approx(green.g, 1.0) && green.r < 0.01 && green.b < 0.01);

        let blue = Rgba::from_hsv(2.0 / 3.0, 1.0, 1.0);
        assert!(approx(blue.b, 1.0) && blue.r < 0.01 && blue.g < 0.01);
    }

    #[test]
    fn test_over_half_alpha() {
        let out = Rgba::WHITE.with_alpha8(128).over(Rgba::BLACK);
        assert!(approx(out.r, 128.0 / 255.0));
        assert!(approx(out.a, 1.0));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = FrameBuffer::new(4, 4, Rgba::BLACK);
        fb.fill_rect(Rect::new(-10.0, -10.0, 12.0, 12.0), Rgba::WHITE);
        assert_eq!(fb.pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(fb.pixel(1, 1), Some(Rgba::WHITE));
        assert_eq!(fb.pixel(2, 2), Some(Rgba::BLACK));
    }

    #[test]
    fn test_fill_disk() {
        let mut fb = FrameBuffer::new(16, 16, Rgba::BLACK);
        fb.fill_disk(Vec2::new(8.0, 8.0), 3.0, Rgba::WHITE);
        assert_eq!(fb.pixel(8, 8), Some(Rgba::WHITE));
        assert_eq!(fb.pixel(10, 8), Some(Rgba::WHITE));
        assert_eq!(fb.pixel(12, 8), Some(Rgba::BLACK));
        assert_eq!(fb.pixel(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_fill_disk_subpixel_and_zero() {
        let mut fb = FrameBuffer::new(8, 8, Rgba::BLACK);
        fb.fill_disk(Vec2::new(3.2, 5.9), 0.1, Rgba::WHITE);
        assert_eq!(fb.pixel(3, 5), Some(Rgba::WHITE));

        let mut fb = FrameBuffer::new(8, 8, Rgba::BLACK);
        fb.fill_disk(Vec2::new(3.2, 5.9), 0.0, Rgba::WHITE);
        assert!(fb.pixels().iter().all(|p| *p == Rgba::BLACK));
    }

    #[test]
    fn test_fill_disk_offscreen() {
        let mut fb = FrameBuffer::new(8, 8, Rgba::BLACK);
        fb.fill_disk(Vec2::new(-50.0, 400.0), 2.0, Rgba::WHITE);
        fb.fill_disk(Vec2::new(f32::NAN, 1.0), 2.0, Rgba::WHITE);
        assert!(fb.pixels().iter().all(|p| *p == Rgba::BLACK));
    }

    #[test]
    fn test_write_rgba8() {
        let fb = FrameBuffer::new(2, 1, Rgba::rgb(1.0, 0.0, 0.5));
        let mut bytes = Vec::new();
        fb.write_rgba8(&mut bytes);
        assert_eq!(bytes, vec![255, 0, 128, 255, 255, 0, 128, 255]);
    }
}
