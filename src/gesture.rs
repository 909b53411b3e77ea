//! Hand readings and the recognizer seam.
//!
//! A recognizer looks at one frame and reports at most one hand: the index
//! fingertip in pixel coordinates plus which of the four tracked fingers are
//! extended. Turning finger states into a [`GestureLabel`] is a pure rule
//! that lives here, so it can be tested without any recognizer at all.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{FrameBuffer, GestureLabel, Observation, Point};

/// Extension state of the four tracked fingers (thumb is ignored).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerStates {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    pub const FIST: Self = Self { index: false, middle: false, ring: false, pinky: false };
    pub const OPEN_PALM: Self = Self { index: true, middle: true, ring: true, pinky: true };
    pub const POINTING: Self = Self { index: true, middle: false, ring: false, pinky: false };

    /// All four up = clear, all four down = fist, index alone = draw,
    /// anything else = idle.
    pub fn gesture(self) -> GestureLabel {
        match (self.index, self.middle, self.ring, self.pinky) {
            (true, true, true, true) => GestureLabel::Clear,
            (false, false, false, false) => GestureLabel::Fist,
            (true, false, false, false) => GestureLabel::Draw,
            _ => GestureLabel::Idle,
        }
    }
}

/// One detected hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandReading {
    pub cursor: Point,
    pub fingers: FingerStates,
}

impl Observation {
    /// No hand means no cursor and an `idle` label; a hand with every finger
    /// curled is a `fist`, which is a different thing.
    pub fn from_reading(reading: Option<HandReading>) -> Self {
        match reading {
            Some(hand) => Observation::new(Some(hand.cursor), hand.fingers.gesture()),
            None => Observation::new(None, GestureLabel::Idle),
        }
    }
}

/// Anything that can find a hand in a frame. Called once per tick, blocking.
pub trait HandRecognizer {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<HandReading>, Error>;
}

/// Raw pointer/keyboard state sampled from the window each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerInput {
    pub position: Option<(i32, i32)>,
    pub left_button: bool,
    pub open_palm_key: bool,
    pub fist_key: bool,
}

/// Simulation recognizer: the mouse pointer stands in for the fingertip.
///
/// | Input | Fingers |
/// |---|---|
/// | left mouse held | index only (draw) |
/// | `Space` held | all four (clear) |
/// | `F` held | none (fist) |
/// | nothing | index + middle (idle) |
///
/// Pointer outside the window means no hand.
#[derive(Debug, Default)]
pub struct PointerRecognizer {
    input: PointerInput,
}

impl PointerRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, input: PointerInput) {
        self.input = input;
    }
}

impl HandRecognizer for PointerRecognizer {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<HandReading>, Error> {
        let Some((x, y)) = self.input.position else { return Ok(None) };
        if x < 0 || y < 0 || x as usize >= frame.width || y as usize >= frame.height {
            return Ok(None);
        }

        let fingers = if self.input.open_palm_key {
            FingerStates::OPEN_PALM
        } else if self.input.fist_key {
            FingerStates::FIST
        } else if self.input.left_button {
            FingerStates::POINTING
        } else {
            FingerStates { index: true, middle: true, ring: false, pinky: false }
        };

        Ok(Some(HandReading { cursor: Point::new(x, y), fingers }))
    }
}

/// Plays back a prepared list of readings, one per call. Once exhausted it
/// keeps reporting "no hand".
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    readings: VecDeque<Option<HandReading>>,
}

impl ScriptedRecognizer {
    pub fn new(readings: impl IntoIterator<Item = Option<HandReading>>) -> Self {
        Self { readings: readings.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl HandRecognizer for ScriptedRecognizer {
    fn detect(&mut self, _frame: &FrameBuffer) -> Result<Option<HandReading>, Error> {
        Ok(self.readings.pop_front().flatten())
    }
}
