//! wscribe Core Library
//!
//! Timed transcript and subtitle editing engine.
//! This library contains the segment sequence, the timestamp codec,
//! interchange formats, and the editor session that ties them together.
//!
//! The surrounding application owns presentation and playback; everything
//! here is synchronous and runs on the caller's thread.

pub mod core;

pub use crate::core::{CoreError, CoreResult};
