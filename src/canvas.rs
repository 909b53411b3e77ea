// Persistent drawing surface that matches the camera feed.
// Visual: everything you have drawn so far, on black, independent of the live image.

use crate::draw::draw_thick_line;
use crate::types::{FrameBuffer, Point, pack_bgr};

/// Ink colour and width for new strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: u32,     // 0x00RRGGBB
    pub thickness: u32, // pixels, >= 1
}

impl StrokeStyle {
    pub fn new(color: u32, thickness: u32) -> Self {
        Self { color, thickness: thickness.max(1) }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(pack_bgr([0, 191, 255]), 6)
    }
}

#[derive(Clone, Debug)]
pub struct DrawingSurface {
    raster: FrameBuffer,
    style: StrokeStyle,
}

impl DrawingSurface {
    pub fn new(width: usize, height: usize, style: StrokeStyle) -> Self {
        Self { raster: FrameBuffer::blank(width, height), style }
    }

    pub fn width(&self) -> usize {
        self.raster.width
    }

    pub fn height(&self) -> usize {
        self.raster.height
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Reallocate a blank surface when the frame size changed. All ink is
    /// lost; returns true when that happened.
    pub fn resize_if_needed(&mut self, width: usize, height: usize) -> bool {
        if width == self.raster.width && height == self.raster.height {
            return false;
        }
        self.raster = FrameBuffer::blank(width, height);
        true
    }

    /// Commit one anti-aliased segment. No-op if either end is missing.
    pub fn draw_stroke(&mut self, from: Option<Point>, to: Option<Point>) {
        let (Some(a), Some(b)) = (from, to) else { return };
        draw_thick_line(&mut self.raster, a, b, self.style.thickness, self.style.color);
    }

    /// Back to black; size and style are kept.
    pub fn clear(&mut self) {
        self.raster.pixels.fill(0);
    }

    /// Current pixels, including every stroke committed so far.
    pub fn snapshot(&self) -> &FrameBuffer {
        &self.raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> DrawingSurface {
        DrawingSurface::new(64, 48, StrokeStyle::default())
    }

    #[test]
    fn stroke_needs_both_endpoints() {
        let mut s = surface();
        s.draw_stroke(None, Some(Point::new(5, 5)));
        s.draw_stroke(Some(Point::new(5, 5)), None);
        assert_eq!(s.snapshot().channel_sum(), 0);

        s.draw_stroke(Some(Point::new(5, 5)), Some(Point::new(20, 5)));
        assert_eq!(s.snapshot().get(12, 5), Some(s.style().color));
    }

    #[test]
    fn strokes_accumulate() {
        let mut s = surface();
        s.draw_stroke(Some(Point::new(5, 5)), Some(Point::new(5, 5)));
        s.draw_stroke(Some(Point::new(40, 30)), Some(Point::new(40, 30)));
        let snap = s.snapshot();
        assert_eq!(snap.get(5, 5), Some(s.style().color));
        assert_eq!(snap.get(40, 30), Some(s.style().color));
    }

    #[test]
    fn resize_discards_content() {
        let mut s = surface();
        s.draw_stroke(Some(Point::new(0, 0)), Some(Point::new(63, 47)));
        assert!(!s.resize_if_needed(64, 48));
        assert!(s.snapshot().channel_sum() > 0);

        assert!(s.resize_if_needed(32, 24));
        assert_eq!(s.snapshot().dimensions(), (32, 24));
        assert_eq!(s.snapshot().pixels.len(), 32 * 24);
        assert_eq!(s.snapshot().channel_sum(), 0);
    }

    #[test]
    fn clear_keeps_size_and_style() {
        let style = StrokeStyle::new(0x00_12_34_56, 0);
        let mut s = DrawingSurface::new(10, 8, style);
        assert_eq!(s.style().thickness, 1);
        s.draw_stroke(Some(Point::new(1, 1)), Some(Point::new(8, 6)));
        s.clear();
        assert_eq!(s.snapshot().channel_sum(), 0);
        assert_eq!((s.width(), s.height()), (10, 8));
        assert_eq!(s.style(), StrokeStyle::new(0x00_12_34_56, 1));
    }
}
