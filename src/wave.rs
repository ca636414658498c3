//! Horizontal wrist travel of an open hand over a short time window.
//!
//! Only one reference slot is kept, not one per physical hand: when several
//! open hands show up they all advance the same anchor.

use log::debug;

use crate::frame::{Skeleton, WRIST};

/// Reference point that wrist travel is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveAnchor {
    pub x: f32,
    pub since: f64,
}

#[derive(Debug)]
pub struct WaveTracker {
    anchor: Option<WaveAnchor>,
    window_secs: f64,
    min_travel_px: f32,
}

impl WaveTracker {
    pub fn new(window_secs: f64, min_travel_px: f32) -> Self {
        Self {
            anchor: None,
            window_secs,
            min_travel_px,
        }
    }

    /// Advance on an open-hand observation. Frames where the hand is not open
    /// leave the anchor untouched. Returns true on a wave candidate.
    pub fn observe(&mut self, skeleton: &Skeleton, width: u32, is_open: bool, now: f64) -> bool {
        if !is_open {
            return false;
        }
        let x = skeleton[WRIST].x;
        let reseed = Some(WaveAnchor { x, since: now });

        let Some(anchor) = self.anchor else {
            self.anchor = reseed;
            return false;
        };

        if now - anchor.since < self.window_secs {
            let travel = (x - anchor.x).abs() * width as f32;
            if travel > self.min_travel_px {
                debug!("wave: travel {travel:.1}px in {:.2}s", now - anchor.since);
                self.anchor = reseed;
                return true;
            }
            false
        } else {
            self.anchor = reseed;
            false
        }
    }

    pub fn anchor(&self) -> Option<WaveAnchor> {
        self.anchor
    }
}
