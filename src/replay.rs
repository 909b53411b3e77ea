//! Headless playback of recorded or hand-written observation scripts.
//!
//! ```toml
//! width = 320
//! height = 240
//!
//! [[frame]]
//! cursor = [10, 10]
//! gesture = "draw"
//! repeat = 3
//!
//! [[frame]]            # no cursor, no label: hand lost
//!
//! [[frame]]
//! cursor = [50, 50]
//! fingers = { index = true, middle = false, ring = false, pinky = false }
//! ```
//!
//! A frame gives either a `gesture` label or raw `fingers`, never both.

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::gesture::{FingerStates, HandReading};
use crate::pipeline::Pipeline;
use crate::stroke::StrokeStep;
use crate::types::{FrameBuffer, GestureLabel, Observation, Point};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    pub width: usize,
    pub height: usize,
    #[serde(default, rename = "frame")]
    pub frames: Vec<ScriptFrame>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptFrame {
    pub cursor: Option<(i32, i32)>,
    pub gesture: Option<GestureLabel>,
    pub fingers: Option<FingerStates>,
    #[serde(default = "one")]
    pub repeat: u32,
}

fn one() -> u32 {
    1
}

impl ScriptFrame {
    fn observation(&self, n: usize) -> Result<Observation, Error> {
        let cursor = self.cursor.map(Point::from);
        match (self.gesture, self.fingers) {
            (Some(_), Some(_)) => Err(Error::Script(format!("frame {n}: give `gesture` or `fingers`, not both"))),
            (Some(label), None) => Ok(Observation::new(cursor, label)),
            (None, Some(fingers)) => match cursor {
                Some(cursor) => Ok(Observation::from_reading(Some(HandReading { cursor, fingers }))),
                None => Err(Error::Script(format!("frame {n}: `fingers` needs a `cursor`"))),
            },
            (None, None) => Ok(Observation::new(cursor, GestureLabel::Idle)),
        }
    }
}

impl ReplayScript {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let script: Self = toml::from_str(text).map_err(|e| Error::Script(e.to_string()))?;
        if script.width == 0 || script.height == 0 {
            return Err(Error::Script("width and height must be > 0".to_string()));
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// One observation per tick, with `repeat` expanded.
    pub fn observations(&self) -> Result<Vec<Observation>, Error> {
        let mut out = Vec::new();
        for (n, frame) in self.frames.iter().enumerate() {
            let obs = frame.observation(n)?;
            out.extend(std::iter::repeat_n(obs, frame.repeat as usize));
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub ticks: u64,
    pub strokes: u32,
    pub clears: u32,
    /// Non-black pixels left on the canvas at the end.
    pub ink_pixels: usize,
}

/// Run every observation against blank frames of the script's size.
pub fn run(script: &ReplayScript, config: &Config) -> Result<ReplaySummary, Error> {
    let observations = script.observations()?;
    let frame = FrameBuffer::blank(script.width, script.height);
    let mut pipeline = Pipeline::new(config);
    let mut summary = ReplaySummary::default();

    for obs in &observations {
        let out = pipeline.tick(&frame, obs);
        if matches!(out.stroke, StrokeStep::Started(_)) {
            summary.strokes += 1;
        }
        if out.cleared {
            summary.clears += 1;
        }
        info!(
            tick = pipeline.ticks(),
            raw = %obs.gesture,
            gesture = %out.gesture,
            cursor = ?out.cursor,
            stroke = ?out.stroke,
            cleared = out.cleared,
            "replay tick"
        );
    }

    summary.ticks = pipeline.ticks();
    summary.ink_pixels = pipeline
        .surface()
        .map(|s| s.snapshot().pixels.iter().filter(|&&p| p != 0).count())
        .unwrap_or(0);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_fingers_and_repeats() {
        let script = ReplayScript::parse(
            r#"
            width = 100
            height = 80

            [[frame]]
            cursor = [10, 10]
            gesture = "draw"
            repeat = 2

            [[frame]]

            [[frame]]
            cursor = [5, 6]
            fingers = { index = true, middle = true, ring = true, pinky = true }
            "#,
        )
        .unwrap();

        let obs = script.observations().unwrap();
        assert_eq!(obs.len(), 4);
        assert_eq!(obs[0], Observation::new(Some(Point::new(10, 10)), GestureLabel::Draw));
        assert_eq!(obs[1], obs[0]);
        assert_eq!(obs[2], Observation::new(None, GestureLabel::Idle));
        assert_eq!(obs[3], Observation::new(Some(Point::new(5, 6)), GestureLabel::Clear));
    }

    #[test]
    fn rejects_ambiguous_or_incomplete_frames() {
        let both = ReplayScript::parse(
            "width = 10\nheight = 10\n[[frame]]\ncursor = [1, 1]\ngesture = \"draw\"\n\
             fingers = { index = true, middle = false, ring = false, pinky = false }\n",
        )
        .unwrap();
        assert!(matches!(both.observations(), Err(Error::Script(_))));

        let no_cursor = ReplayScript::parse(
            "width = 10\nheight = 10\n[[frame]]\nfingers = { index = true, middle = false, ring = false, pinky = false }\n",
        )
        .unwrap();
        assert!(matches!(no_cursor.observations(), Err(Error::Script(_))));

        assert!(matches!(ReplayScript::parse("width = 0\nheight = 10\n"), Err(Error::Script(_))));
        assert!(matches!(ReplayScript::parse("width = 10\nheight = 10\nspeed = 2\n"), Err(Error::Script(_))));
        assert!(matches!(
            ReplayScript::parse("width = 10\nheight = 10\n[[frame]]\ngesture = \"wave\"\n"),
            Err(Error::Script(_))
        ));
    }

    #[test]
    fn run_counts_strokes_and_clears() {
        let script = ReplayScript::parse(
            r#"
            width = 64
            height = 64
            [[frame]]
            cursor = [20, 20]
            gesture = "draw"
            repeat = 3
            [[frame]]
            gesture = "idle"
            repeat = 2
            [[frame]]
            cursor = [40, 40]
            gesture = "draw"
            repeat = 3
            "#,
        )
        .unwrap();
        let mut config = Config::default();
        config.debouncer.confirm_frames = 2;

        let summary = run(&script, &config).unwrap();
        assert_eq!(summary.ticks, 8);
        assert_eq!(summary.strokes, 2);
        assert_eq!(summary.clears, 0);
        assert!(summary.ink_pixels > 0);
    }
}
