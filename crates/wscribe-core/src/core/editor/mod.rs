//! Editor Session Module
//!
//! Holds the subtitle and transcript views built from one validated batch
//! and applies edit commands to either of them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Editor Session                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  command.rs   - EditCommand / EditAction, loadable from JSON     │
//! │  session.rs   - EditorSession: two views plus an error list      │
//! │  metadata.rs  - SessionMetadata alias/value record               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The views are independent: editing the subtitle view never regroups
//! the transcript view.
//!
//! # Example Usage
//!
//! ```rust
//! use wscribe_core::core::editor::{EditAction, EditCommand, EditorSession, Target};
//! use wscribe_core::core::segments::RawSegment;
//! use wscribe_core::core::settings::AppSettings;
//! use wscribe_core::core::View;
//!
//! let raw = vec![
//!     RawSegment::new(1_000.0, 2_000.0, "hello"),
//!     RawSegment::new(2_000.0, 3_000.0, "world"),
//! ];
//! let mut session = EditorSession::from_raw(raw, &AppSettings::default()).unwrap();
//!
//! let command = EditCommand::new(View::Subtitle, Target::Position(0), EditAction::InsertBefore);
//! session.apply(&command).unwrap();
//! assert_eq!(session.sequence(View::Subtitle).len(), 3);
//! assert_eq!(session.sequence(View::Transcript).len(), 1);
//! ```

mod command;
mod metadata;
mod session;

pub use command::{EditAction, EditCommand, Target};
pub use metadata::{MediaInfo, MetadataEntry, SessionMetadata};
pub use session::EditorSession;
