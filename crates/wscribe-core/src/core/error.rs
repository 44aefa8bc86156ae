//! wscribe Error Definitions
//!
//! Defines error types used throughout the project.

use thiserror::Error;

use super::{formats::ParseError, sequence::NodeId, Millis};

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Timestamp Errors
    // =========================================================================
    #[error("Malformed timestamp '{0}': expected HH:MM:SS.mmm")]
    MalformedTimestamp(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Segment {index} starts after it ends: {start}ms > {end}ms")]
    SegmentStartAfterEnd {
        index: usize,
        start: Millis,
        end: Millis,
    },

    #[error(
        "Segment {index} overlaps the next one: ends at {end}ms, next starts at {next_start}ms"
    )]
    SegmentOverlap {
        index: usize,
        end: Millis,
        next_start: Millis,
    },

    // =========================================================================
    // Sequence Errors
    // =========================================================================
    #[error("No space: the gap next to the anchor segment is {pause}ms")]
    NoSpace { pause: Millis },

    #[error("Impossible timestamps: {start}~{end}ms does not fit the window {min}~{max}ms")]
    ImpossibleTimestamps {
        start: Millis,
        end: Millis,
        min: Millis,
        max: Millis,
    },

    #[error("Segment node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Segment node {0} is not an interior node")]
    NotInteriorNode(NodeId),

    #[error("No segment at position {position}: the view holds {len}")]
    PositionOutOfRange { position: usize, len: usize },

    // =========================================================================
    // Format Errors
    // =========================================================================
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Subtitle parse error: {0}")]
    Parse(#[from] ParseError),

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Returns true for errors caused by a rejected edit rather than bad input
    pub fn is_edit_rejection(&self) -> bool {
        matches!(
            self,
            Self::NoSpace { .. }
                | Self::ImpossibleTimestamps { .. }
                | Self::NodeNotFound(_)
                | Self::NotInteriorNode(_)
                | Self::PositionOutOfRange { .. }
        )
    }
}
