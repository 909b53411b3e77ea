// Temporal filter for gesture labels: a new label only takes over after it
// has been seen `confirm_frames` times in a row.
// Visual: a single misread frame never flips the cursor colour or lifts the pen.

use crate::types::GestureLabel;

#[derive(Debug, Clone)]
pub struct GestureDebouncer {
    confirm_frames: u32,
    confirmed: GestureLabel,
    candidate: Option<GestureLabel>,
    streak: u32, // 0 whenever candidate is None
}

impl GestureDebouncer {
    /// `confirm_frames` is clamped to at least 1. With a threshold of 1 a new
    /// label is promoted on its first sighting rather than one call later.
    pub fn new(confirm_frames: u32, initial: GestureLabel) -> Self {
        Self {
            confirm_frames: confirm_frames.max(1),
            confirmed: initial,
            candidate: None,
            streak: 0,
        }
    }

    pub fn confirm_frames(&self) -> u32 {
        self.confirm_frames
    }

    pub fn confirmed(&self) -> GestureLabel {
        self.confirmed
    }

    pub fn candidate(&self) -> Option<GestureLabel> {
        self.candidate
    }

    /// Feed one raw label; returns the confirmed label after this frame.
    pub fn update(&mut self, label: GestureLabel) -> GestureLabel {
        if label == self.confirmed {
            // Settled: any half-built streak is abandoned.
            self.candidate = None;
            self.streak = 0;
            return self.confirmed;
        }

        if self.candidate != Some(label) {
            self.candidate = Some(label);
            self.streak = 1;
        } else {
            self.streak += 1;
        }

        if self.streak >= self.confirm_frames {
            self.confirmed = label;
            self.candidate = None;
            self.streak = 0;
        }
        self.confirmed
    }
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(3, GestureLabel::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GestureLabel::*;

    #[test]
    fn flips_on_kth_consecutive_repeat() {
        let mut d = GestureDebouncer::new(3, Idle);
        assert_eq!(d.update(Draw), Idle);
        assert_eq!(d.update(Draw), Idle);
        assert_eq!(d.update(Draw), Draw);
        assert_eq!(d.candidate(), None);
    }

    #[test]
    fn fewer_than_k_repeats_change_nothing() {
        let mut d = GestureDebouncer::new(4, Idle);
        for _ in 0..3 {
            assert_eq!(d.update(Fist), Idle);
        }
        // Settled label interrupts the streak; it has to start over.
        assert_eq!(d.update(Idle), Idle);
        for _ in 0..3 {
            assert_eq!(d.update(Fist), Idle);
        }
        assert_eq!(d.update(Fist), Fist);
    }

    #[test]
    fn alternating_labels_never_flicker() {
        let mut d = GestureDebouncer::new(2, Idle);
        for i in 0..50 {
            let label = if i % 2 == 0 { Draw } else { Clear };
            assert_eq!(d.update(label), Idle);
        }
    }

    #[test]
    fn switching_candidate_restarts_streak() {
        let mut d = GestureDebouncer::new(3, Idle);
        d.update(Draw);
        d.update(Draw);
        assert_eq!(d.update(Fist), Idle);
        assert_eq!(d.candidate(), Some(Fist));
        assert_eq!(d.update(Fist), Idle);
        assert_eq!(d.update(Fist), Fist);
    }

    #[test]
    fn threshold_of_one_follows_input_immediately() {
        let mut d = GestureDebouncer::new(0, Idle);
        assert_eq!(d.confirm_frames(), 1);
        assert_eq!(d.update(Draw), Draw);
        assert_eq!(d.update(Clear), Clear);
        assert_eq!(d.update(Clear), Clear);
    }
}
