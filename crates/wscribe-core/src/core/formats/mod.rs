//! Interchange Formats Module
//!
//! Serializes export records into JSON, SRT, WebVTT and plaintext, and reads
//! JSON, SRT and WebVTT files back into raw segments.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Interchange Formats                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  export.rs     - ExportFormat and the four encoders              │
//! │  import.rs     - ImportFormat inference and record remapping     │
//! │  cues.rs       - SubtitleParser seam and the SRT/VTT grammar     │
//! │  naming.rs     - Timestamped export file names                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use wscribe_core::core::formats::{export, ExportFormat};
//! use wscribe_core::core::segments::ExportRecord;
//!
//! let records = vec![ExportRecord::new(0.0, 3.0, "abc xyz")];
//! let format: ExportFormat = "srt".parse().unwrap();
//! let (content, extension) = export(format, &records).unwrap();
//! assert_eq!(extension, "srt");
//! assert!(content.starts_with("1\n00:00:00,000 --> 00:00:00,003\n"));
//! ```

mod cues;
mod export;
mod import;
mod naming;

pub use cues::{CueEntry, CueTextParser, ParseError, SubtitleParser};
pub use export::{export, format_json, format_plaintext, format_srt, format_vtt, ExportFormat};
pub use import::{parse_file, parse_file_with, ImportFormat};
pub use naming::export_file_name;
