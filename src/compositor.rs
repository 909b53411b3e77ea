// Final image assembly: live frame + canvas + cursor marker + status text.
// Visual: the camera stays visible under semi-transparent ink, with a
// coloured ring showing where the pen is.

use crate::canvas::DrawingSurface;
use crate::draw::{blend, draw_ring, draw_text_5x7, fill_disc};
use crate::types::{FrameBuffer, GestureLabel, Point};

pub const DEFAULT_BLEND_ALPHA: f32 = 0.4;

const MARKER_RADIUS: i32 = 12;
const MARKER_RING_THICKNESS: u32 = 2;
const TEXT_ORIGIN: (i32, i32) = (12, 14);
const TEXT_LINE_HEIGHT: i32 = 26;
const TEXT_SCALE: i32 = 2;
const TEXT_COLOR: u32 = 0x00_FF_FF_FF;

/// Fires once when the confirmed gesture turns into `clear`.
/// Holding `clear` or leaving it does nothing.
#[derive(Debug, Default, Clone)]
pub struct ClearTrigger {
    last: GestureLabel,
}

impl ClearTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, gesture: GestureLabel) -> bool {
        let fire = gesture == GestureLabel::Clear && self.last != GestureLabel::Clear;
        self.last = gesture;
        fire
    }
}

#[derive(Debug, Clone)]
pub struct FrameCompositor {
    blend_alpha: f32,
}

impl FrameCompositor {
    /// `blend_alpha` is the canvas weight, clamped to [0, 1].
    pub fn new(blend_alpha: f32) -> Self {
        let blend_alpha = if blend_alpha.is_nan() { DEFAULT_BLEND_ALPHA } else { blend_alpha.clamp(0.0, 1.0) };
        Self { blend_alpha }
    }

    pub fn blend_alpha(&self) -> f32 {
        self.blend_alpha
    }

    pub fn compose(
        &self,
        live: &FrameBuffer,
        surface: &DrawingSurface,
        cursor: Option<Point>,
        gesture: GestureLabel,
    ) -> FrameBuffer {
        let mut out = blend(live, surface.snapshot(), self.blend_alpha);
        if let Some(at) = cursor {
            draw_cursor_marker(&mut out, at, gesture.marker_color());
        }
        draw_status_text(&mut out, &status_lines(gesture));
        out
    }
}

impl Default for FrameCompositor {
    fn default() -> Self {
        Self::new(DEFAULT_BLEND_ALPHA)
    }
}

/// Outer ring plus a solid centre dot.
pub fn draw_cursor_marker(fb: &mut FrameBuffer, at: Point, color: u32) {
    draw_ring(fb, at, MARKER_RADIUS, MARKER_RING_THICKNESS, color);
    fill_disc(fb, at, (MARKER_RADIUS / 2).max(2), color);
}

pub fn status_lines(gesture: GestureLabel) -> [String; 3] {
    [
        format!("GESTURE: {}", gesture.name().to_uppercase()),
        "CONTROLS: INDEX=DRAW, FIST=STOP, PALM=CLEAR".to_string(),
        "PRESS 'Q' TO QUIT".to_string(),
    ]
}

pub fn draw_status_text(fb: &mut FrameBuffer, lines: &[String]) {
    let (x, mut y) = TEXT_ORIGIN;
    for line in lines {
        draw_text_5x7(fb, x, y, line, TEXT_SCALE, TEXT_COLOR);
        y += TEXT_LINE_HEIGHT;
    }
}
