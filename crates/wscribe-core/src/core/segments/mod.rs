//! Segment Module
//!
//! Segment records in their raw (inbound) and typed forms, plus the
//! validator that turns one into the other.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::core::segments::{sanitize, RawSegment};
//!
//! let raw: Vec<RawSegment> = serde_json::from_str(&content)?;
//! let segments = sanitize(raw)?;
//! ```

mod models;
mod validator;

pub use models::{ExportRecord, RawSegment, RawWord, Segment, TimeValue, Word};
pub use validator::{normalize_to_ms, sanitize, verify_order};
