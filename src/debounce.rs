//! Per-gesture cooldown filter.

use std::collections::HashMap;

use crate::gestures::Gesture;

#[derive(Debug)]
pub struct DebounceGate {
    default_cooldown: f64,
    overrides: HashMap<Gesture, f64>,
    last_emitted: HashMap<Gesture, f64>,
}

impl DebounceGate {
    pub fn new(default_cooldown: f64) -> Self {
        Self {
            default_cooldown,
            overrides: HashMap::new(),
            last_emitted: HashMap::new(),
        }
    }

    pub fn with_cooldown(mut self, gesture: Gesture, secs: f64) -> Self {
        self.overrides.insert(gesture, secs);
        self
    }

    pub fn cooldown(&self, gesture: Gesture) -> f64 {
        self.overrides
            .get(&gesture)
            .copied()
            .unwrap_or(self.default_cooldown)
    }

    /// True when `gesture` may be emitted at `now`; records the emission.
    pub fn allow(&mut self, gesture: Gesture, now: f64) -> bool {
        let last = self
            .last_emitted
            .get(&gesture)
            .copied()
            .unwrap_or(f64::NEG_INFINITY);
        if now - last > self.cooldown(gesture) {
            self.last_emitted.insert(gesture, now);
            true
        } else {
            false
        }
    }

    pub fn last_emitted(&self, gesture: Gesture) -> Option<f64> {
        self.last_emitted.get(&gesture).copied()
    }
}
