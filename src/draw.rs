// Window + software drawing utilities.
// Visual effects provided here:
// 1) Windows that show the composited camera image and the raw canvas.
// 2) Anti-aliased thick segments (ink strokes), rings and discs (cursor marker).
// 3) A tiny 5x7 bitmap font to render status text on top of the video.

use crate::error::Error;
use crate::gesture::PointerInput;
use crate::types::{FrameBuffer, Point, pack_rgb, unpack_rgb};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while Q or ESC is held down.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Q) || self.window.is_key_down(Key::Escape)
    }

    /// Pointer + gesture keys for the simulation recognizer.
    /// Position is None while the pointer is outside the window.
    pub fn pointer_input(&self) -> PointerInput {
        PointerInput {
            position: self
                .window
                .get_mouse_pos(MouseMode::Discard)
                .map(|(x, y)| (x as i32, y as i32)),
            left_button: self.window.get_mouse_down(MouseButton::Left),
            open_palm_key: self.window.is_key_down(Key::Space),
            fist_key: self.window.is_key_down(Key::F),
        }
    }
}

/* ---------- Software drawing: pixels, strokes, circles, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Mix `color` into the pixel at (x,y) by `coverage` in [0,1].
/// Visual: edge pixels of a shape get a partial tint, so edges look smooth.
#[inline]
fn cover_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32, coverage: f32) {
    if coverage <= 0.0 {
        return;
    }
    if coverage >= 1.0 {
        put_pixel(fb, x, y, color);
        return;
    }
    let Some(old) = fb.get(x, y) else { return };
    let (or, og, ob) = unpack_rgb(old);
    let (cr, cg, cb) = unpack_rgb(color);
    let mix = |o: u8, c: u8| (o as f32 + (c as f32 - o as f32) * coverage).round() as u8;
    put_pixel(fb, x, y, pack_rgb(mix(or, cr), mix(og, cg), mix(ob, cb)));
}

/// Distance from (px,py) to the segment a..b.
#[inline]
fn dist_to_segment(px: f32, py: f32, a: Point, b: Point) -> f32 {
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (dx, dy) = (b.x as f32 - ax, b.y as f32 - ay);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 { 0.0 } else { (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0) };
    let (qx, qy) = (ax + t * dx, ay + t * dy);
    ((px - qx) * (px - qx) + (py - qy) * (py - qy)).sqrt()
}

/// Bounding box (inclusive, widened to i64 so extreme points cannot overflow)
/// clipped to the buffer. None when it misses the buffer entirely.
fn clip_box(fb: &FrameBuffer, x0: i64, y0: i64, x1: i64, y1: i64) -> Option<(i32, i32, i32, i32)> {
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(fb.width as i64 - 1);
    let y1 = y1.min(fb.height as i64 - 1);
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some((x0 as i32, y0 as i32, x1 as i32, y1 as i32))
}

/// Anti-aliased segment with round caps, `thickness` pixels wide.
/// A zero-length segment leaves a round dot.
/// Visual: one piece of ink stroke.
pub fn draw_thick_line(fb: &mut FrameBuffer, a: Point, b: Point, thickness: u32, color: u32) {
    let half = thickness.max(1) as f32 / 2.0;
    let pad = half.ceil() as i64 + 1;

    // Only scan the part of the bounding box that lies on the buffer.
    let Some((x0, y0, x1, y1)) = clip_box(
        fb,
        a.x.min(b.x) as i64 - pad,
        a.y.min(b.y) as i64 - pad,
        a.x.max(b.x) as i64 + pad,
        a.y.max(b.y) as i64 + pad,
    ) else {
        return;
    };

    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = dist_to_segment(x as f32, y as f32, a, b);
            cover_pixel(fb, x, y, color, (half + 0.5 - d).clamp(0.0, 1.0));
        }
    }
}

/// Anti-aliased circle outline of the given `radius` and line `thickness`.
pub fn draw_ring(fb: &mut FrameBuffer, center: Point, radius: i32, thickness: u32, color: u32) {
    let half = thickness.max(1) as f32 / 2.0;
    let reach = radius.max(0) as i64 + half.ceil() as i64 + 1;
    let (cx, cy) = (center.x as i64, center.y as i64);
    let Some((x0, y0, x1, y1)) = clip_box(fb, cx - reach, cy - reach, cx + reach, cy + reach) else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x as i64 - cx) as f32;
            let dy = (y as i64 - cy) as f32;
            let d = ((dx * dx + dy * dy).sqrt() - radius as f32).abs();
            cover_pixel(fb, x, y, color, (half + 0.5 - d).clamp(0.0, 1.0));
        }
    }
}

/// Anti-aliased filled circle.
pub fn fill_disc(fb: &mut FrameBuffer, center: Point, radius: i32, color: u32) {
    let reach = radius.max(0) as i64 + 1;
    let (cx, cy) = (center.x as i64, center.y as i64);
    let Some((x0, y0, x1, y1)) = clip_box(fb, cx - reach, cy - reach, cx + reach, cy + reach) else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x as i64 - cx) as f32;
            let dy = (y as i64 - cy) as f32;
            let d = (dx * dx + dy * dy).sqrt();
            cover_pixel(fb, x, y, color, (radius as f32 + 0.5 - d).clamp(0.0, 1.0));
        }
    }
}

/// Weighted mix of two rasters: `base * (1 - alpha) + over * alpha`, per channel.
/// Only the overlapping region is mixed; anything outside keeps `base`.
pub fn blend(base: &FrameBuffer, over: &FrameBuffer, alpha: f32) -> FrameBuffer {
    let alpha = alpha.clamp(0.0, 1.0);
    let beta = 1.0 - alpha;
    let mut out = base.clone();
    let w = base.width.min(over.width);
    let h = base.height.min(over.height);
    for y in 0..h {
        for x in 0..w {
            let (br, bg, bb) = unpack_rgb(base.pixels[y * base.width + x]);
            let (or, og, ob) = unpack_rgb(over.pixels[y * over.width + x]);
            let mix = |b: u8, o: u8| (b as f32 * beta + o as f32 * alpha).round().clamp(0.0, 255.0) as u8;
            out.pixels[y * base.width + x] = pack_rgb(mix(br, or), mix(bg, og), mix(bb, ob));
        }
    }
    out
}

/* ---------- 5x7 bitmap font (uppercase ASCII subset) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Fill one scaled font cell.
fn put_cell(fb: &mut FrameBuffer, x: i32, y: i32, scale: i32, color: u32) {
    for sy in 0..scale {
        for sx in 0..scale {
            put_pixel(fb, x + sx, y + sy, color);
        }
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel `scale` screen pixels wide.
/// Visual: a glyph appears with a black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by one font pixel in black to improve readability
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_cell(fb, x + (rx + 1) * scale, y + (ry as i32 + 1) * scale, scale, 0x00000000);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_cell(fb, x + rx * scale, y + ry as i32 * scale, scale, color);
                }
            }
        }
    }
}

/// Draw a left-aligned text string using 5x7 glyphs; lowercase is shown as uppercase.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: u32) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, scale, color);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: u32 = 0x00_FF_BF_00;

    #[test]
    fn thick_line_covers_its_path_and_nothing_far_away() {
        let mut fb = FrameBuffer::blank(40, 20);
        draw_thick_line(&mut fb, Point::new(5, 10), Point::new(30, 10), 6, INK);
        for x in 5..=30 {
            assert_eq!(fb.get(x, 10), Some(INK), "x={x}");
        }
        assert_eq!(fb.get(18, 0), Some(0));
        assert_eq!(fb.get(38, 10), Some(0));
    }

    #[test]
    fn zero_length_line_is_a_dot() {
        let mut fb = FrameBuffer::blank(20, 20);
        draw_thick_line(&mut fb, Point::new(10, 10), Point::new(10, 10), 6, INK);
        assert_eq!(fb.get(10, 10), Some(INK));
        assert_eq!(fb.get(12, 10), Some(INK));
        assert_eq!(fb.get(10, 16), Some(0));
    }

    #[test]
    fn shapes_clip_at_buffer_edges() {
        let mut fb = FrameBuffer::blank(10, 10);
        draw_thick_line(&mut fb, Point::new(-50, -50), Point::new(-40, -40), 6, INK);
        assert_eq!(fb.channel_sum(), 0);
        draw_thick_line(&mut fb, Point::new(-5, 5), Point::new(50, 5), 2, INK);
        assert_eq!(fb.get(0, 5), Some(INK));
        assert_eq!(fb.get(9, 5), Some(INK));
        fill_disc(&mut fb, Point::new(0, 0), 4, INK);
        draw_ring(&mut fb, Point::new(9, 9), 12, 2, INK);
    }

    #[test]
    fn extreme_coordinates_are_clipped_not_overflowed() {
        let mut fb = FrameBuffer::blank(16, 16);
        for p in [Point::new(i32::MIN, 5), Point::new(i32::MAX, 5), Point::new(5, i32::MIN), Point::new(i32::MAX, i32::MAX)] {
            draw_thick_line(&mut fb, p, p, 6, INK);
            draw_ring(&mut fb, p, 12, 2, INK);
            fill_disc(&mut fb, p, 6, INK);
        }
        assert_eq!(fb.channel_sum(), 0);

        // A segment from far off-canvas still inks the part that crosses the buffer.
        draw_thick_line(&mut fb, Point::new(-100_000, 8), Point::new(100_000, 8), 2, INK);
        assert_eq!(fb.get(0, 8), Some(INK));
        assert_eq!(fb.get(15, 8), Some(INK));
    }

    #[test]
    fn ring_leaves_its_center_untouched() {
        let mut fb = FrameBuffer::blank(40, 40);
        draw_ring(&mut fb, Point::new(20, 20), 12, 2, 0x00_FF_FF_FF);
        assert_eq!(fb.get(20, 20), Some(0));
        assert_eq!(fb.get(32, 20), Some(0x00_FF_FF_FF));
        fill_disc(&mut fb, Point::new(20, 20), 6, 0x00_00_FF_00);
        assert_eq!(fb.get(20, 20), Some(0x00_00_FF_00));
    }

    #[test]
    fn blend_weights_each_channel() {
        let base = FrameBuffer { width: 2, height: 1, pixels: vec![0x00_64_64_64, 0x00_00_00_00] };
        let over = FrameBuffer { width: 2, height: 1, pixels: vec![0x00_00_00_00, 0x00_FF_FF_FF] };
        let out = blend(&base, &over, 0.4);
        // 100 * 0.6 = 60, 255 * 0.4 = 102
        assert_eq!(out.pixels, vec![pack_rgb(60, 60, 60), pack_rgb(102, 102, 102)]);

        assert_eq!(blend(&base, &over, 0.0).pixels, base.pixels);
        assert_eq!(blend(&base, &over, 7.0).pixels, over.pixels);
    }

    #[test]
    fn text_renders_known_glyphs_only() {
        let mut fb = FrameBuffer::blank(120, 30);
        draw_text_5x7(&mut fb, 0, 0, "~~~", 2, 0x00_FF_FF_FF);
        assert_eq!(fb.channel_sum(), 0);
        draw_text_5x7(&mut fb, 0, 0, "Gesture: draw", 2, 0x00_FF_FF_FF);
        assert!(fb.pixels.iter().any(|&p| p == 0x00_FF_FF_FF));
    }
}
