//! Segment Sequence Module
//!
//! An ordered, doubly-linked sequence of timed segment nodes with
//! gap-aware insertion and removal.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Segment Sequence                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  node.rs      - NodeId handles, Node payload, render markup     │
//! │  list.rs      - Arena-backed linked list and its edits          │
//! │  changes.rs   - ChangeSet returned from every mutation          │
//! │  extract.rs   - Markup to plain text for export                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nodes live in an arena and link to each other through generational
//! [`NodeId`] handles. A handle to a removed node never resolves again,
//! even after its slot is reused.
//!
//! # Example Usage
//!
//! ```rust
//! use wscribe_core::core::segments::Segment;
//! use wscribe_core::core::sequence::SegmentSequence;
//!
//! let mut sequence = SegmentSequence::new();
//! let first = sequence.append(Segment::new(1_000.0, 2_000.0, "Hello", 0.9));
//! sequence.append(Segment::new(2_000.0, 3_000.0, "World", 0.8));
//!
//! // The gap before the head spans 0..1000ms.
//! sequence
//!     .append_before(Segment::new(0.0, 1_000.0, "Intro", 1.0), first)
//!     .unwrap();
//! assert_eq!(sequence.len(), 3);
//! ```

mod changes;
mod extract;
mod list;
mod node;

pub use changes::{ChangeSet, Removed};
pub use extract::{MarkupTextExtractor, TextExtractor};
pub use list::{Iter, SegmentSequence};
pub use node::{build_markup, Node, NodeId};
