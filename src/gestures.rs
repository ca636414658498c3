use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::clap::ProximityTracker;
use crate::config::Thresholds;
use crate::debounce::DebounceGate;
use crate::error::{GestureError, Result};
use crate::fingers;
use crate::frame::Frame;
use crate::geometry::{distance, palm_center};
use crate::wave::{WaveAnchor, WaveTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Clap,
    ThumbsUp,
    Wave,
}

impl Gesture {
    pub const ALL: [Gesture; 3] = [Gesture::Clap, Gesture::ThumbsUp, Gesture::Wave];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clap => "clap",
            Self::ThumbsUp => "thumbs_up",
            Self::Wave => "wave",
        }
    }

    pub fn from_name(name: &str) -> Option<Gesture> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a stream of landmark frames into at most one debounced gesture per
/// frame. Owns all detector state; one instance per stream, fed serially.
#[derive(Debug)]
pub struct GestureEngine {
    th: Thresholds,
    clap: ProximityTracker,
    wave: WaveTracker,
    gate: DebounceGate,
    last_timestamp: Option<f64>,
}

impl GestureEngine {
    pub fn new(th: Thresholds) -> Result<Self> {
        th.validate()?;

        let mut gate = DebounceGate::new(th.debounce_seconds);
        for g in Gesture::ALL {
            if let Some(secs) = th.cooldowns.get(g) {
                gate = gate.with_cooldown(g, secs);
            }
        }

        Ok(Self {
            clap: ProximityTracker::new(th.history_capacity, th.far_threshold, th.close_threshold),
            wave: WaveTracker::new(th.wave_window_seconds, th.wave_min_travel_px),
            gate,
            last_timestamp: None,
            th,
        })
    }

    /// Process one frame. A rejected frame leaves every detector untouched.
    pub fn process(&mut self, frame: &Frame) -> Result<Option<Gesture>> {
        let skeletons = frame.skeletons()?;
        let now = frame.timestamp;
        if !now.is_finite() {
            return Err(GestureError::InvalidTimestamp(now));
        }
        if let Some(previous) = self.last_timestamp {
            if now < previous {
                return Err(GestureError::TimestampRegressed {
                    previous,
                    current: now,
                });
            }
        }
        self.last_timestamp = Some(now);

        let (w, h) = (frame.width, frame.height);
        trace!("frame t={now:.3} hands={}", skeletons.len());

        // clap preempts the per-hand detectors
        let gap = match skeletons.as_slice() {
            [a, b] => Some(distance(palm_center(a, w, h), palm_center(b, w, h))),
            _ => None,
        };
        if self.clap.observe(gap) {
            if self.gate.allow(Gesture::Clap, now) {
                return Ok(Some(Gesture::Clap));
            }
            debug!("clap candidate suppressed at t={now:.3}");
        }

        let mut candidate = None;
        for (i, sk) in skeletons.iter().enumerate() {
            let fv = fingers::classify(sk, self.th.thumb_outward);
            trace!("hand {i}: {:?}", fv.0);

            if fv.is_thumbs_up()
                && candidate.is_none()
                && self.gate.allow(Gesture::ThumbsUp, now)
            {
                candidate = Some(Gesture::ThumbsUp);
            }

            let waved = self.wave.observe(sk, w, fv.is_open_hand(), now);
            if waved && candidate.is_none() && self.gate.allow(Gesture::Wave, now) {
                candidate = Some(Gesture::Wave);
            }
        }
        Ok(candidate)
    }

    pub fn clap_history_len(&self) -> usize {
        self.clap.len()
    }

    pub fn wave_anchor(&self) -> Option<WaveAnchor> {
        self.wave.anchor()
    }

    pub fn last_emitted(&self, gesture: Gesture) -> Option<f64> {
        self.gate.last_emitted(gesture)
    }
}
