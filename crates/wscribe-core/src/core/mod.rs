//! wscribe Core Engine
//!
//! Core editing engine module.
//! Handles timestamps, segment validation, the linked segment sequence,
//! transcript grouping, interchange formats, and editor sessions.

pub mod editor;
pub mod formats;
pub mod fs;
pub mod grouping;
pub mod segments;
pub mod sequence;
pub mod settings;
pub mod timestamp;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;

#[cfg(test)]
mod tests_destructive;
