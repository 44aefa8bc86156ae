//! Export Encoders
//!
//! Each encoder turns a flat list of export records into a file body.

use serde::{Deserialize, Serialize};

use crate::core::{
    segments::ExportRecord,
    timestamp::{format_timestamp, format_timestamp_with, SRT_SEPARATOR},
    CoreError, CoreResult,
};

// =============================================================================
// Format Identifier
// =============================================================================

/// Supported export formats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    #[default]
    Srt,
    Vtt,
    Plaintext,
}

impl ExportFormat {
    /// All formats, in menu order
    pub const ALL: [ExportFormat; 4] = [Self::Plaintext, Self::Json, Self::Srt, Self::Vtt];

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Plaintext => "txt",
        }
    }

    /// Identifier accepted by [`str::parse`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Plaintext => "plaintext",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "srt" => Ok(Self::Srt),
            "vtt" => Ok(Self::Vtt),
            "plaintext" => Ok(Self::Plaintext),
            _ => Err(CoreError::UnsupportedFormat(s.to_string())),
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Encodes records and returns `(content, file extension)`
pub fn export(
    format: ExportFormat,
    records: &[ExportRecord],
) -> CoreResult<(String, &'static str)> {
    let content = match format {
        ExportFormat::Json => format_json(records)?,
        ExportFormat::Srt => format_srt(records),
        ExportFormat::Vtt => format_vtt(records),
        ExportFormat::Plaintext => format_plaintext(records),
    };
    Ok((content, format.extension()))
}

// =============================================================================
// Encoders
// =============================================================================

#[derive(Serialize)]
struct JsonRecord<'a> {
    start: String,
    end: String,
    text: &'a str,
}

/// Compact JSON array with `HH:MM:SS.mmm` timestamps
pub fn format_json(records: &[ExportRecord]) -> CoreResult<String> {
    let rows: Vec<JsonRecord<'_>> = records
        .iter()
        .map(|r| JsonRecord {
            start: format_timestamp(r.start),
            end: format_timestamp(r.end),
            text: &r.text,
        })
        .collect();
    Ok(serde_json::to_string(&rows)?)
}

/// SubRip: numbered cues with comma separators
///
/// ```text
/// 1
/// 00:00:00,000 --> 00:00:00,003
/// abc xyz
/// ```
pub fn format_srt(records: &[ExportRecord]) -> String {
    numbered_cues(records, SRT_SEPARATOR)
}

/// WebVTT: header plus numbered cues with dot separators
pub fn format_vtt(records: &[ExportRecord]) -> String {
    let mut output = String::from("WEBVTT\n\n");
    output.push_str(&numbered_cues(records, '.'));
    output
}

/// Bulleted plaintext, one paragraph per record
pub fn format_plaintext(records: &[ExportRecord]) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&format!(
            "* {} - {}\n{}\n\n",
            format_timestamp(record.start),
            format_timestamp(record.end),
            record.text
        ));
    }
    output
}

fn numbered_cues(records: &[ExportRecord], separator: char) -> String {
    let mut output = String::new();
    for (index, record) in records.iter().enumerate() {
        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            format_timestamp_with(record.start, separator, false),
            format_timestamp_with(record.end, separator, false),
            record.text
        ));
    }
    output
}

// =============================================================================
// Tests
// =============================================================================
