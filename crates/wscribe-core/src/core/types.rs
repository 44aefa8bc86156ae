//! wscribe Core Type Definitions
//!
//! Defines fundamental types used throughout the project.

use serde::{Deserialize, Serialize};

// =============================================================================
// Time Types
// =============================================================================

/// Time offset in milliseconds (floating point, non-negative by contract)
///
/// Parsed timestamps keep any fractional part, so this is not an integer.
pub type Millis = f64;

/// Confidence score attached to segments and words.
///
/// The scale is decided by the transcription pipeline (0-1 or 0-100);
/// nothing in the core clamps it.
pub type Confidence = f64;

// =============================================================================
// View Types
// =============================================================================

/// Which of the two editing views a sequence represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Verbatim subtitle lines
    #[default]
    Subtitle,
    /// Chunked transcript paragraphs
    Transcript,
}

impl View {
    /// Short label used in exported file names
    pub fn file_label(&self) -> &'static str {
        match self {
            Self::Subtitle => "sub",
            Self::Transcript => "transcript",
        }
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sub" | "subtitle" | "subtitles" => Ok(Self::Subtitle),
            "transcript" => Ok(Self::Transcript),
            other => Err(format!("Unknown view: {}", other)),
        }
    }
}
