// Core types shared by the pipeline stages.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// All-black buffer of the given size.
    pub fn blank(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Sum of every channel of every pixel; 0 means the buffer is black.
    pub fn channel_sum(&self) -> u64 {
        self.pixels
            .iter()
            .map(|&p| {
                let (r, g, b) = unpack_rgb(p);
                r as u64 + g as u64 + b as u64
            })
            .sum()
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }
}

/// Integer pixel position. Out-of-canvas values are allowed; raster
/// primitives clip them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// The closed gesture vocabulary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureLabel {
    Draw,
    Fist,
    Clear,
    #[default]
    Idle,
}

impl GestureLabel {
    pub fn name(self) -> &'static str {
        match self {
            GestureLabel::Draw => "draw",
            GestureLabel::Fist => "fist",
            GestureLabel::Clear => "clear",
            GestureLabel::Idle => "idle",
        }
    }

    /// Cursor marker colour (0x00RRGGBB).
    pub fn marker_color(self) -> u32 {
        match self {
            GestureLabel::Draw => 0x00_00_FF_00,  // green
            GestureLabel::Fist => 0x00_FF_00_00,  // red
            GestureLabel::Clear => 0x00_FF_FF_00, // yellow
            GestureLabel::Idle => 0x00_FF_FF_FF,  // white
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One frame's reading from the recognizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub cursor: Option<Point>,
    pub gesture: GestureLabel,
}

impl Observation {
    pub fn new(cursor: Option<Point>, gesture: GestureLabel) -> Self {
        Self { cursor, gesture }
    }
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

/// Pack a blue-green-red triple (camera channel order) into 0x00RRGGBB.
#[inline]
pub fn pack_bgr([b, g, r]: [u8; 3]) -> u32 {
    pack_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_triple_packs_with_red_in_high_byte() {
        assert_eq!(pack_bgr([0, 191, 255]), 0x00_FF_BF_00);
        assert_eq!(unpack_rgb(0x00_FF_BF_00), (255, 191, 0));
    }

    #[test]
    fn blank_buffer_has_zero_channel_sum() {
        let fb = FrameBuffer::blank(4, 3);
        assert_eq!(fb.pixels.len(), 12);
        assert_eq!(fb.channel_sum(), 0);
        assert_eq!(fb.get(4, 0), None);
        assert_eq!(fb.get(-1, 0), None);
        assert_eq!(fb.get(3, 2), Some(0));
    }

    #[test]
    fn gesture_labels_parse_from_lowercase_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            g: GestureLabel,
        }
        let w: Wrapper = toml::from_str("g = \"clear\"").unwrap();
        assert_eq!(w.g, GestureLabel::Clear);
        assert_eq!(GestureLabel::default(), GestureLabel::Idle);
        assert_eq!(GestureLabel::Fist.to_string(), "fist");
    }
}
