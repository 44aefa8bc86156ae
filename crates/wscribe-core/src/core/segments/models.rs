//! Segment Data Models
//!
//! Defines data structures for timed segments at line and word granularity.

use serde::{Deserialize, Serialize};

use crate::core::{timestamp, Confidence, CoreError, CoreResult, Millis};

fn default_score() -> Confidence {
    1.0
}

// =============================================================================
// Raw Input
// =============================================================================

/// A start/end value as it appears in inbound data
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Already normalized milliseconds
    Millis(Millis),
    /// `HH:MM:SS.mmm` text awaiting normalization
    Text(String),
}

impl TimeValue {
    /// Returns true if this value is already numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Millis(_))
    }

    /// Parses text in place; numeric values are left untouched
    pub fn normalize(&mut self) -> CoreResult<()> {
        if let Self::Text(text) = self {
            *self = Self::Millis(timestamp::parse_timestamp(text)?);
        }
        Ok(())
    }

    /// Returns the millisecond value, failing if it is still text
    pub fn as_millis(&self) -> CoreResult<Millis> {
        match self {
            Self::Millis(ms) => Ok(*ms),
            Self::Text(text) => Err(CoreError::MalformedTimestamp(text.clone())),
        }
    }
}

impl From<Millis> for TimeValue {
    fn from(ms: Millis) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for TimeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A word entry as it appears in inbound data
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawWord {
    pub start: TimeValue,
    pub end: TimeValue,
    pub text: String,
    #[serde(default = "default_score")]
    pub score: Confidence,
}

/// A segment as it appears in inbound data (JSON transcripts, parsed cues)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    pub start: TimeValue,
    pub end: TimeValue,
    pub text: String,
    /// Subtitle files carry no confidence; those segments count as certain
    #[serde(default = "default_score")]
    pub score: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<RawWord>>,
}

impl RawSegment {
    /// Creates a raw segment with numeric timestamps and no word detail
    pub fn new(start: Millis, end: Millis, text: &str) -> Self {
        Self {
            start: TimeValue::Millis(start),
            end: TimeValue::Millis(end),
            text: text.to_string(),
            score: default_score(),
            words: None,
        }
    }

    /// Converts into a typed segment; every timestamp must already be numeric
    pub fn into_segment(self) -> CoreResult<Segment> {
        let words = match self.words {
            Some(words) => Some(
                words
                    .into_iter()
                    .map(|w| {
                        Ok(Word {
                            start: w.start.as_millis()?,
                            end: w.end.as_millis()?,
                            text: w.text,
                            score: w.score,
                        })
                    })
                    .collect::<CoreResult<Vec<_>>>()?,
            ),
            None => None,
        };

        Ok(Segment {
            start: self.start.as_millis()?,
            end: self.end.as_millis()?,
            text: self.text,
            score: self.score,
            words,
        })
    }
}

// =============================================================================
// Typed Records
// =============================================================================

/// A single word with timing and confidence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub start: Millis,
    pub end: Millis,
    pub text: String,
    pub score: Confidence,
}

impl Word {
    pub fn new(start: Millis, end: Millis, text: &str, score: Confidence) -> Self {
        Self {
            start,
            end,
            text: text.to_string(),
            score,
        }
    }
}

/// A timed segment of text with normalized millisecond offsets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start offset in milliseconds
    pub start: Millis,
    /// End offset in milliseconds
    pub end: Millis,
    /// Segment text
    pub text: String,
    /// Confidence score
    pub score: Confidence,
    /// Optional word-level detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
}

impl Segment {
    /// Creates a segment without word-level detail
    pub fn new(start: Millis, end: Millis, text: &str, score: Confidence) -> Self {
        Self {
            start,
            end,
            text: text.to_string(),
            score,
            words: None,
        }
    }

    /// Attaches word-level detail
    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = Some(words);
        self
    }

    /// Returns the duration of this segment in milliseconds
    pub fn duration(&self) -> Millis {
        self.end - self.start
    }
}

impl From<Segment> for RawSegment {
    fn from(segment: Segment) -> Self {
        Self {
            start: segment.start.into(),
            end: segment.end.into(),
            text: segment.text,
            score: segment.score,
            words: segment.words.map(|words| {
                words
                    .into_iter()
                    .map(|w| RawWord {
                        start: w.start.into(),
                        end: w.end.into(),
                        text: w.text,
                        score: w.score,
                    })
                    .collect()
            }),
        }
    }
}

/// The flat `{start, end, text}` shape handed to the export formats
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub start: Millis,
    pub end: Millis,
    pub text: String,
}

impl ExportRecord {
    pub fn new(start: Millis, end: Millis, text: &str) -> Self {
        Self {
            start,
            end,
            text: text.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
