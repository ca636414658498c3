//! Extended/flexed state of each finger, from a single frame's skeleton.

use serde::{Deserialize, Serialize};

use crate::frame::{FINGER_TIPS, Skeleton, THUMB_IP, THUMB_TIP};

/// Which image direction counts as "outward" for an extended thumb. Frames
/// must be mirrored consistently; a selfie-style mirrored right hand points
/// its thumb towards smaller x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbSide {
    #[default]
    Left,
    Right,
}

/// Thumb, index, middle, ring, pinky.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerVector(pub [bool; 5]);

impl FingerVector {
    pub const THUMBS_UP: FingerVector = FingerVector([true, false, false, false, false]);
    pub const OPEN_HAND: FingerVector = FingerVector([true; 5]);

    pub fn is_thumbs_up(&self) -> bool {
        *self == Self::THUMBS_UP
    }

    pub fn is_open_hand(&self) -> bool {
        *self == Self::OPEN_HAND
    }
}

pub fn classify(skeleton: &Skeleton, thumb: ThumbSide) -> FingerVector {
    let tip = skeleton[THUMB_TIP].x;
    let ip = skeleton[THUMB_IP].x;
    let thumb_out = match thumb {
        ThumbSide::Left => tip < ip,
        ThumbSide::Right => tip > ip,
    };

    let mut v = [thumb_out, false, false, false, false];
    for (slot, &t) in v[1..].iter_mut().zip(FINGER_TIPS.iter()) {
        // y grows downwards
        *slot = skeleton[t].y < skeleton[t - 2].y;
    }
    FingerVector(v)
}
