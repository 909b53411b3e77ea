//! Configuration Management
//!
//! TOML file, every field optional. Out-of-range values are clamped with a
//! warning instead of rejected; only unreadable files or malformed TOML fail.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::canvas::StrokeStyle;
use crate::error::Error;
use crate::smoother::MAX_MOMENTUM;
use crate::types::pack_bgr;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cursor smoothing
    pub smoother: SmootherConfig,
    /// Gesture debouncing
    pub debouncer: DebouncerConfig,
    /// Ink style
    pub stroke: StrokeConfig,
    /// Live frame / canvas mixing
    pub compositor: CompositorConfig,
    /// Camera device
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmootherConfig {
    /// EMA weight of the previous average, [0, 0.99]
    pub momentum: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebouncerConfig {
    /// Consecutive identical labels needed to switch gesture, >= 1
    pub confirm_frames: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    /// Ink colour as [blue, green, red]
    pub color_bgr: [u8; 3],
    /// Line width in pixels, >= 1
    pub thickness: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Canvas weight when mixing over the live frame, [0, 1]
    pub blend_alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Device index (0 = default webcam)
    pub index: u32,
    /// Requested width; the device may pick something close
    pub width: u32,
    /// Requested height
    pub height: u32,
    /// Flip frames horizontally so the view behaves like a mirror
    pub mirror: bool,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self { momentum: 0.75 }
    }
}

impl Default for DebouncerConfig {
    fn default() -> Self {
        Self { confirm_frames: 3 }
    }
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self { color_bgr: [0, 191, 255], thickness: 6 }
    }
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self { blend_alpha: 0.4 }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, width: 640, height: 480, mirror: true }
    }
}

impl StrokeConfig {
    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::new(pack_bgr(self.color_bgr), self.thickness)
    }
}

fn clamp_f32(field: &str, value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    let clamped = if value.is_nan() { fallback } else { value.clamp(min, max) };
    if clamped != value {
        warn!(field, value, clamped, "config value out of range, clamping");
    }
    clamped
}

impl Config {
    /// Copy with every numeric field pulled into its valid range.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        out.smoother.momentum = clamp_f32("smoother.momentum", self.smoother.momentum, 0.0, MAX_MOMENTUM, 0.75);
        out.compositor.blend_alpha = clamp_f32("compositor.blend_alpha", self.compositor.blend_alpha, 0.0, 1.0, 0.4);
        if self.debouncer.confirm_frames == 0 {
            warn!(field = "debouncer.confirm_frames", value = 0, clamped = 1, "config value out of range, clamping");
            out.debouncer.confirm_frames = 1;
        }
        if self.stroke.thickness == 0 {
            warn!(field = "stroke.thickness", value = 0, clamped = 1, "config value out of range, clamping");
            out.stroke.thickness = 1;
        }
        out
    }

    /// Parse TOML text; missing fields take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load config from default location, or defaults if there is no file
    pub fn load_default() -> Result<Self, Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("air-canvas").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("air-canvas.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let c = Config::default();
        assert_eq!(c.smoother.momentum, 0.75);
        assert_eq!(c.debouncer.confirm_frames, 3);
        assert_eq!(c.stroke.color_bgr, [0, 191, 255]);
        assert_eq!(c.stroke.thickness, 6);
        assert_eq!(c.compositor.blend_alpha, 0.4);
        assert_eq!(c.stroke.style().color, 0x00_FF_BF_00);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let c = Config::from_toml("[debouncer]\nconfirm_frames = 5\n").unwrap();
        assert_eq!(c.debouncer.confirm_frames, 5);
        assert_eq!(c.smoother, SmootherConfig::default());
        assert_eq!(c.camera, CameraConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let text = "[smoother]\nmomentum = 1.5\n[debouncer]\nconfirm_frames = 0\n\
                    [compositor]\nblend_alpha = -2.0\n[stroke]\nthickness = 0\n";
        let c = Config::from_toml(text).unwrap();
        assert_eq!(c.smoother.momentum, MAX_MOMENTUM);
        assert_eq!(c.debouncer.confirm_frames, 1);
        assert_eq!(c.compositor.blend_alpha, 0.0);
        assert_eq!(c.stroke.thickness, 1);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(Config::from_toml("[smoother\nmomentum = "), Err(Error::Config(_))));
        assert!(matches!(Config::from_toml("[smoother]\nmomentum = \"fast\""), Err(Error::Config(_))));
    }

    #[test]
    fn file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut c = Config::default();
        c.stroke.color_bgr = [10, 20, 30];
        c.camera.mirror = false;
        std::fs::write(&path, c.to_toml().unwrap()).unwrap();

        assert_eq!(Config::load(&path).unwrap(), c);
        assert!(matches!(Config::load(&dir.path().join("missing.toml")), Err(Error::Io(_))));
    }
}
