// Exponential moving average over the fingertip position.
// Visual: the cursor glides instead of shaking; it lags a little behind fast moves.

use crate::types::Point;

pub const MAX_MOMENTUM: f32 = 0.99;

#[derive(Debug, Clone)]
pub struct CursorSmoother {
    momentum: f32,
    state: Option<(f32, f32)>, // running average; None after any tracking gap
}

impl CursorSmoother {
    /// `momentum` is clamped to [0, 0.99]; higher = smoother but laggier.
    pub fn new(momentum: f32) -> Self {
        let momentum = if momentum.is_nan() { 0.0 } else { momentum.clamp(0.0, MAX_MOMENTUM) };
        Self { momentum, state: None }
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    /// Feed one raw position, get the smoothed one.
    /// A `None` input forgets the average so the next sample starts fresh
    /// instead of snapping in from a stale position.
    pub fn update(&mut self, point: Option<Point>) -> Option<Point> {
        let Some(p) = point else {
            self.state = None;
            return None;
        };

        let (px, py) = (p.x as f32, p.y as f32);
        let next = match self.state {
            None => (px, py),
            Some((ax, ay)) => {
                let m = self.momentum;
                (m * ax + (1.0 - m) * px, m * ay + (1.0 - m) * py)
            }
        };
        self.state = Some(next);
        Some(Point::new(next.0.round() as i32, next.1.round() as i32))
    }
}

impl Default for CursorSmoother {
    fn default() -> Self {
        Self::new(0.75)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Option<Point> {
        Some(Point::new(x, y))
    }

    #[test]
    fn first_sample_passes_through_exactly() {
        let mut s = CursorSmoother::new(0.75);
        assert_eq!(s.update(p(123, -7)), p(123, -7));
    }

    #[test]
    fn absent_input_clears_history() {
        let mut s = CursorSmoother::new(0.9);
        s.update(p(0, 0));
        s.update(p(100, 100));
        assert_eq!(s.update(None), None);
        // Fresh start: no blend with the old (0,0)..(100,100) average.
        assert_eq!(s.update(p(400, 300)), p(400, 300));
    }

    #[test]
    fn constant_input_stays_put() {
        let mut s = CursorSmoother::new(0.5);
        for _ in 0..10 {
            assert_eq!(s.update(p(42, 17)), p(42, 17));
        }
    }

    #[test]
    fn blends_toward_new_samples() {
        let mut s = CursorSmoother::new(0.75);
        s.update(p(0, 0));
        // 0.75 * 0 + 0.25 * 100 = 25
        assert_eq!(s.update(p(100, 100)), p(25, 25));
        // 0.75 * 25 + 0.25 * 100 = 43.75 -> 44
        assert_eq!(s.update(p(100, 100)), p(44, 44));
    }

    #[test]
    fn momentum_is_clamped() {
        assert_eq!(CursorSmoother::new(5.0).momentum(), MAX_MOMENTUM);
        assert_eq!(CursorSmoother::new(-1.0).momentum(), 0.0);
        assert_eq!(CursorSmoother::new(f32::NAN).momentum(), 0.0);

        // Zero momentum means no smoothing at all.
        let mut s = CursorSmoother::new(0.0);
        s.update(p(0, 0));
        assert_eq!(s.update(p(9, 3)), p(9, 3));
    }
}
