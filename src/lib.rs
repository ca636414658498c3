//! Hand-gesture recognition over per-frame hand landmark streams.
//!
//! [`GestureEngine`] consumes frames of 21-point hand skeletons and reports at
//! most one debounced [`Gesture`] per frame: a two-hand clap, a thumbs-up, or
//! a wave. The remaining modules wire the engine to a JSON-lines frame source
//! and an event sink.

pub mod actions;
pub mod clap;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fingers;
pub mod frame;
pub mod geometry;
pub mod gestures;
pub mod input;
pub mod pipeline;
pub mod wave;

pub use config::{Profile, Thresholds};
pub use error::GestureError;
pub use frame::{Frame, Hand, Landmark};
pub use gestures::{Gesture, GestureEngine};
