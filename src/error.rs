//! Error types for the gesture engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    #[error("hand {hand} has {points} landmarks, expected {expected}")]
    MalformedSkeleton {
        hand: usize,
        points: usize,
        expected: usize,
    },

    #[error("invalid frame size {width}x{height}")]
    InvalidFrameSize { width: u32, height: u32 },

    #[error("timestamp is not a finite number: {0}")]
    InvalidTimestamp(f64),

    #[error("timestamp went backwards: {current} < {previous}")]
    TimestampRegressed { previous: f64, current: f64 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GestureError>;
