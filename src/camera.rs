// Opens the camera and converts frames into a buffer suitable for the window.
// Visual expectation: when main.rs calls `next_frame()`, you get a
// Vec<u32> where each pixel is 0x00RRGGBB, optionally mirrored like a selfie view.

use crate::config::CameraConfig;
use crate::error::Error;
use crate::types::FrameBuffer;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

use image::RgbImage;
use std::fmt;
use tracing::{debug, warn};

/// Anything that yields frames until the stream ends.
pub trait FrameSource {
    /// `Ok(None)` means the stream is over; the loop should stop quietly.
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>, Error>;
}

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
    mirror: bool,
}

impl CameraCapture {
    /// Open the configured device at (roughly) the requested resolution.
    /// Failing here is fatal for the caller; nothing retries.
    pub fn open(config: &CameraConfig) -> Result<Self, Error> {
        let idx = CameraIndex::Index(config.index);

        let fmt = CameraFormat::new(
            Resolution::new(config.width, config.height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
            mirror: config.mirror,
        })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for CameraCapture {
    /// Blocks until the next frame is ready. A frame that cannot be fetched
    /// or decoded ends the stream.
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>, Error> {
        let Some(frame) = or_end_of_stream(self.cam.frame(), "fetch") else { return Ok(None) };
        let Some(rgb_img) = or_end_of_stream(frame.decode_image::<RgbFormat>(), "decode") else {
            return Ok(None);
        };
        Ok(Some(frame_from_rgb(&rgb_img, self.mirror)))
    }
}

/// Failed reads are logged and turned into "stream over".
fn or_end_of_stream<T, E: fmt::Display>(result: Result<T, E>, stage: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(stage, error = %e, "camera stream ended");
            None
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        match self.cam.stop_stream() {
            Ok(()) => debug!("camera stream stopped"),
            Err(e) => warn!(error = %e, "failed to stop camera stream"),
        }
    }
}

/// Pack an RGB image as 0x00RRGGBB, flipping left/right when `mirror` is set.
pub fn frame_from_rgb(img: &RgbImage, mirror: bool) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let mut out = Vec::with_capacity((w as usize) * (h as usize));
    for y in 0..h {
        for x in 0..w {
            let sx = if mirror { w - 1 - x } else { x };
            let px = img.get_pixel(sx, y);
            out.push(((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32);
        }
    }
    FrameBuffer { width: w as usize, height: h as usize, pixels: out }
}
