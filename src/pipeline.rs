//! Per-frame pipeline context.
//!
//! Owns every piece of state that lives across frames and threads one
//! observation through it per tick:
//!
//! ```text
//! observation ─► CursorSmoother ─► GestureDebouncer ─► StrokeSession ─► DrawingSurface
//!                                                  └─► ClearTrigger ──┘        │
//!                                      live frame ─► FrameCompositor ◄─────────┘
//! ```

use tracing::{debug, info};

use crate::camera::FrameSource;
use crate::canvas::{DrawingSurface, StrokeStyle};
use crate::compositor::{ClearTrigger, FrameCompositor};
use crate::config::Config;
use crate::debounce::GestureDebouncer;
use crate::error::Error;
use crate::gesture::HandRecognizer;
use crate::smoother::CursorSmoother;
use crate::stroke::{StrokeSession, StrokeStep};
use crate::types::{FrameBuffer, GestureLabel, Observation, Point};

/// Everything one tick produced.
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub composited: FrameBuffer,
    pub cursor: Option<Point>,
    pub gesture: GestureLabel,
    pub stroke: StrokeStep,
    pub cleared: bool,
    pub resized: bool,
}

#[derive(Debug)]
pub struct Pipeline {
    smoother: CursorSmoother,
    debouncer: GestureDebouncer,
    stroke: StrokeSession,
    clear_trigger: ClearTrigger,
    compositor: FrameCompositor,
    surface: Option<DrawingSurface>, // created on the first frame, sized to it
    style: StrokeStyle,
    ticks: u64,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            smoother: CursorSmoother::new(config.smoother.momentum),
            debouncer: GestureDebouncer::new(config.debouncer.confirm_frames, GestureLabel::Idle),
            stroke: StrokeSession::new(),
            clear_trigger: ClearTrigger::new(),
            compositor: FrameCompositor::new(config.compositor.blend_alpha),
            surface: None,
            style: config.stroke.style(),
            ticks: 0,
        }
    }

    pub fn surface(&self) -> Option<&DrawingSurface> {
        self.surface.as_ref()
    }

    pub fn confirmed_gesture(&self) -> GestureLabel {
        self.debouncer.confirmed()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Pull one frame from `source`, read the hand in it and tick.
    /// `Ok(None)` once the source has run dry.
    pub fn step<S, R>(&mut self, source: &mut S, recognizer: &mut R) -> Result<Option<TickOutput>, Error>
    where
        S: FrameSource + ?Sized,
        R: HandRecognizer + ?Sized,
    {
        let Some(live) = source.next_frame()? else { return Ok(None) };
        let reading = recognizer.detect(&live)?;
        Ok(Some(self.tick(&live, &Observation::from_reading(reading))))
    }

    /// Run one frame through the whole chain.
    pub fn tick(&mut self, live: &FrameBuffer, observation: &Observation) -> TickOutput {
        self.ticks += 1;
        let (width, height) = live.dimensions();

        let resized = self
            .surface
            .as_mut()
            .is_some_and(|surface| surface.resize_if_needed(width, height));
        if resized {
            info!(width, height, "frame size changed, canvas reinitialized");
        }
        let style = self.style;
        let surface = self.surface.get_or_insert_with(|| DrawingSurface::new(width, height, style));

        let cursor = self.smoother.update(observation.cursor);

        let before = self.debouncer.confirmed();
        let gesture = self.debouncer.update(observation.gesture);
        if gesture != before {
            debug!(from = %before, to = %gesture, tick = self.ticks, "gesture confirmed");
        }

        let stroke = self.stroke.advance(gesture, cursor, surface);
        match stroke {
            StrokeStep::Started(at) => debug!(x = at.x, y = at.y, "stroke started"),
            StrokeStep::Ended => debug!("stroke ended"),
            StrokeStep::Idle | StrokeStep::Extended { .. } => {}
        }

        let cleared = self.clear_trigger.update(gesture);
        if cleared {
            surface.clear();
            info!(tick = self.ticks, "canvas cleared");
        }

        let composited = self.compositor.compose(live, surface, cursor, gesture);
        TickOutput { composited, cursor, gesture, stroke, cleared, resized }
    }
}
