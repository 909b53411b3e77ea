// Turns "pen down + smoothed cursor" into connected ink segments.
// Visual: a continuous line while you point; lifting the finger or losing the
// hand ends it, and the next stroke starts unconnected.

use crate::canvas::DrawingSurface;
use crate::types::{GestureLabel, Point};

/// What a single `advance` did to the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeStep {
    /// Pen up, nothing was in progress.
    Idle,
    /// A new stroke began with a single dot.
    Started(Point),
    /// The current stroke grew by one segment.
    Extended { from: Point, to: Point },
    /// The stroke in progress was closed; nothing drawn.
    Ended,
}

#[derive(Debug, Default, Clone)]
pub struct StrokeSession {
    previous: Option<Point>, // Some only while drawing with a tracked cursor
}

impl StrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_point(&self) -> Option<Point> {
        self.previous
    }

    pub fn is_drawing(&self) -> bool {
        self.previous.is_some()
    }

    pub fn advance(
        &mut self,
        gesture: GestureLabel,
        cursor: Option<Point>,
        surface: &mut DrawingSurface,
    ) -> StrokeStep {
        let pen_down = match gesture {
            GestureLabel::Draw => true,
            GestureLabel::Fist | GestureLabel::Clear | GestureLabel::Idle => false,
        };

        match (pen_down, cursor) {
            (true, Some(to)) => {
                let step = match self.previous {
                    None => {
                        surface.draw_stroke(Some(to), Some(to));
                        StrokeStep::Started(to)
                    }
                    Some(from) => {
                        surface.draw_stroke(Some(from), Some(to));
                        StrokeStep::Extended { from, to }
                    }
                };
                self.previous = Some(to);
                step
            }
            _ => match self.previous.take() {
                Some(_) => StrokeStep::Ended,
                None => StrokeStep::Idle,
            },
        }
    }
}
