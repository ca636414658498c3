//! Clap detection from the recent distance between two palms.
//!
//! A clap candidate needs a "far" sample somewhere in the rolling window
//! (excluding the two newest samples) and a "close" sample right now. That
//! approximates an approach-then-contact motion without estimating velocity.

use std::collections::VecDeque;

use log::{debug, trace};

/// Samples this recent are never used as the "far" evidence.
const RECENT_EXCLUDED: usize = 2;

#[derive(Debug)]
pub struct ProximityTracker {
    history: VecDeque<f32>,
    capacity: usize,
    far_threshold: f32,
    close_threshold: f32,
}

impl ProximityTracker {
    pub fn new(capacity: usize, far_threshold: f32, close_threshold: f32) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
            far_threshold,
            close_threshold,
        }
    }

    /// Feed the current inter-hand distance in pixels, or `None` when the frame
    /// does not hold exactly two hands. Returns true on a clap candidate.
    pub fn observe(&mut self, distance: Option<f32>) -> bool {
        let Some(d) = distance else {
            if !self.history.is_empty() {
                debug!("clap: hand count changed, clearing {} samples", self.history.len());
                self.history.clear();
            }
            return false;
        };

        self.history.push_back(d);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }

        let older = self.history.len().saturating_sub(RECENT_EXCLUDED);
        let was_far = self
            .history
            .iter()
            .take(older)
            .any(|&s| s > self.far_threshold);
        trace!("clap: d={d:.1} was_far={was_far} samples={}", self.history.len());

        was_far && d < self.close_threshold
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tracker() -> ProximityTracker {
        ProximityTracker::new(10, 200.0, 120.0)
    }

    #[test]
    fn far_then_close_raises_candidate() {
        let mut t = tracker();
        let seq = [250.0, 230.0, 210.0, 180.0, 150.0, 130.0];
        for d in seq {
            assert!(!t.observe(Some(d)), "no candidate at {d}");
        }
        // 115 already qualifies; 90 must too.
        t.observe(Some(115.0));
        assert!(t.observe(Some(90.0)));
    }

    #[test]
    fn needs_three_samples() {
        let mut t = tracker();
        assert!(!t.observe(Some(300.0)));
        assert!(!t.observe(Some(50.0)));
        // history [300, 50, 40]: 300 is now old enough to count
        assert!(t.observe(Some(40.0)));
    }

    #[test]
    fn two_newest_samples_do_not_count_as_far() {
        let mut t = tracker();
        t.observe(Some(100.0));
        t.observe(Some(300.0));
        // [100, 300, 90]: only 100 is old enough, and it is not far
        assert!(!t.observe(Some(90.0)));
    }

    #[test]
    fn close_threshold_is_strict() {
        let mut t = tracker();
        for d in [300.0, 300.0, 300.0] {
            t.observe(Some(d));
        }
        assert!(!t.observe(Some(120.0)));
        assert!(t.observe(Some(119.9)));
    }

    #[test]
    fn far_sample_ages_out_of_window() {
        let mut t = tracker();
        t.observe(Some(250.0));
        for _ in 0..9 {
            t.observe(Some(150.0));
        }
        // 250 evicted by the 11th sample
        assert!(!t.observe(Some(90.0)));
        assert!(t.history().all(|d| d < 200.0));
    }

    #[test]
    fn reset_clears_history() {
        let mut t = tracker();
        for d in [250.0, 230.0, 210.0] {
            t.observe(Some(d));
        }
        assert!(!t.observe(None));
        assert!(t.is_empty());
        assert!(!t.observe(Some(90.0)));
    }

    proptest! {
        #[test]
        fn history_never_exceeds_capacity(samples in proptest::collection::vec(0.0f32..500.0, 11..64)) {
            let mut t = tracker();
            for d in samples {
                t.observe(Some(d));
                prop_assert!(t.len() <= 10);
            }
        }

        #[test]
        fn single_close_frame_after_reset_never_claps(
            before in proptest::collection::vec(0.0f32..500.0, 0..20),
            close in 0.0f32..120.0,
        ) {
            let mut t = tracker();
            for d in before {
                t.observe(Some(d));
            }
            t.observe(None);
            prop_assert!(!t.observe(Some(close)));
        }
    }
}
