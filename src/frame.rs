//! Per-frame hand landmark snapshots as delivered by the landmark provider.

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Fingertips of the four non-thumb fingers. The PIP joint sits two indices
/// before each tip.
pub const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Normalized keypoint; origin is the top-left corner of the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

pub type Skeleton = [Landmark; LANDMARK_COUNT];

/// One detected hand. The point count is only trusted after [`Frame::skeletons`]
/// has validated it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.landmarks.as_slice().try_into().ok()
    }
}

impl From<Skeleton> for Hand {
    fn from(points: Skeleton) -> Self {
        Self::new(points.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Seconds on the provider's clock; non-decreasing across frames.
    #[serde(rename = "t")]
    pub timestamp: f64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub hands: Vec<Hand>,
}

impl Frame {
    pub fn new(timestamp: f64, width: u32, height: u32, hands: Vec<Hand>) -> Self {
        Self {
            timestamp,
            width,
            height,
            hands,
        }
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    /// Validate the frame and borrow every hand as a fixed-size skeleton.
    /// Fails on the first malformed hand.
    pub fn skeletons(&self) -> Result<Vec<&Skeleton>> {
        if self.width == 0 || self.height == 0 {
            return Err(GestureError::InvalidFrameSize {
                width: self.width,
                height: self.height,
            });
        }
        self.hands
            .iter()
            .enumerate()
            .map(|(i, h)| {
                h.skeleton().ok_or(GestureError::MalformedSkeleton {
                    hand: i,
                    points: h.landmarks.len(),
                    expected: LANDMARK_COUNT,
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const OPEN: [bool; 5] = [true; 5];
    pub const FIST: [bool; 5] = [false; 5];
    pub const THUMBS_UP: [bool; 5] = [true, false, false, false, false];

    /// Build a synthetic hand with its wrist at (`x`, `y`) and the given
    /// extended/flexed pattern (thumb first). Extended thumbs point towards
    /// smaller x.
    pub fn hand_at(x: f32, y: f32, fingers: [bool; 5]) -> Hand {
        let mut pts = [Landmark::new(x, y); LANDMARK_COUNT];
        pts[MIDDLE_MCP] = Landmark::new(x, y - 0.05);

        pts[THUMB_IP] = Landmark::new(x, y - 0.02);
        let thumb_dx = if fingers[0] { -0.03 } else { 0.03 };
        pts[THUMB_TIP] = Landmark::new(x + thumb_dx, y - 0.02);

        for (i, &tip) in FINGER_TIPS.iter().enumerate() {
            pts[tip - 2] = Landmark::new(x, y - 0.10);
            let tip_y = if fingers[i + 1] { y - 0.15 } else { y - 0.05 };
            pts[tip] = Landmark::new(x, tip_y);
        }
        Hand::from(pts)
    }

    pub fn frame(t: f64, hands: Vec<Hand>) -> Frame {
        Frame::new(t, 1000, 1000, hands)
    }

    /// Two fists whose palm centers are `distance_px` apart on a 1000px frame.
    pub fn two_hands_apart(t: f64, distance_px: f32) -> Frame {
        let half = distance_px / 2000.0;
        frame(
            t,
            vec![hand_at(0.5 - half, 0.6, FIST), hand_at(0.5 + half, 0.6, FIST)],
        )
    }
}
