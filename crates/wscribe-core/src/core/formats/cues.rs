//! Subtitle Cue Grammar
//!
//! Reading SRT and WebVTT text is delegated to a [`SubtitleParser`]. The
//! crate ships [`CueTextParser`], a line-oriented reader for both dialects.

use std::iter::Peekable;
use std::str::Lines;

use serde::{Deserialize, Serialize};

use crate::core::Millis;

// =============================================================================
// Error Types
// =============================================================================

/// Errors raised while reading subtitle cues
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Unexpected end of input")]
    UnexpectedEnd,
}

// =============================================================================
// Parser Seam
// =============================================================================

/// One timed cue, in milliseconds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CueEntry {
    pub from: Millis,
    pub to: Millis,
    pub text: String,
}

/// Reads subtitle documents into cues
pub trait SubtitleParser {
    fn parse_srt(&self, content: &str) -> Result<Vec<CueEntry>, ParseError>;
    fn parse_vtt(&self, content: &str) -> Result<Vec<CueEntry>, ParseError>;
}

/// Default SRT and WebVTT grammar
#[derive(Clone, Copy, Debug, Default)]
pub struct CueTextParser;

impl SubtitleParser for CueTextParser {
    fn parse_srt(&self, content: &str) -> Result<Vec<CueEntry>, ParseError> {
        read_cues(content, Dialect::Srt)
    }

    fn parse_vtt(&self, content: &str) -> Result<Vec<CueEntry>, ParseError> {
        read_cues(content, Dialect::Vtt)
    }
}

// =============================================================================
// Block Reader
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Srt,
    Vtt,
}

fn read_cues(content: &str, dialect: Dialect) -> Result<Vec<CueEntry>, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines().peekable();

    if dialect == Dialect::Vtt {
        skip_vtt_header(&mut lines)?;
    }

    let mut cues = Vec::new();
    loop {
        while lines.next_if(|l| l.trim().is_empty()).is_some() {}
        let Some(first) = lines.next() else {
            break;
        };
        if dialect == Dialect::Vtt && is_vtt_metadata_block(first) {
            while lines.next_if(|l| !l.trim().is_empty()).is_some() {}
            continue;
        }

        // SRT always numbers its blocks; VTT identifiers are optional
        let timing = if dialect == Dialect::Vtt && first.contains("-->") {
            first
        } else {
            lines.next().ok_or(ParseError::UnexpectedEnd)?
        };
        let (from, to) = parse_timing_line(timing)?;

        let mut body = Vec::new();
        while let Some(line) = lines.next_if(|l| !l.trim().is_empty()) {
            body.push(match dialect {
                Dialect::Srt => line.to_string(),
                Dialect::Vtt => strip_tags(line),
            });
        }
        if body.is_empty() {
            return Err(ParseError::MissingData(format!("cue text at {}", timing.trim())));
        }

        cues.push(CueEntry {
            from,
            to,
            text: body.join("\n"),
        });
    }

    Ok(cues)
}

/// Comment, style and region blocks carry no cue
fn is_vtt_metadata_block(first_line: &str) -> bool {
    ["NOTE", "STYLE", "REGION"].iter().any(|keyword| {
        first_line
            .strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

fn skip_vtt_header(lines: &mut Peekable<Lines<'_>>) -> Result<(), ParseError> {
    match lines.next() {
        Some(first) if first.trim_end().starts_with("WEBVTT") => {}
        _ => {
            return Err(ParseError::InvalidFormat(
                "VTT file must start with WEBVTT".to_string(),
            ))
        }
    }
    // Header metadata runs until the first blank line
    while lines.next_if(|l| !l.trim().is_empty()).is_some() {}
    Ok(())
}

/// Parses `start --> end [settings]`
fn parse_timing_line(line: &str) -> Result<(Millis, Millis), ParseError> {
    let (start, rest) = line.split_once("-->").ok_or_else(|| {
        ParseError::InvalidFormat(format!("Expected 'start --> end' format: {}", line))
    })?;
    let end = rest.split_whitespace().next().ok_or(ParseError::UnexpectedEnd)?;

    Ok((parse_cue_timestamp(start.trim())?, parse_cue_timestamp(end)?))
}

/// Parses `HH:MM:SS,mmm`, `HH:MM:SS.mmm` or `MM:SS.mmm` into milliseconds
fn parse_cue_timestamp(ts: &str) -> Result<Millis, ParseError> {
    let invalid = || ParseError::InvalidTimestamp(ts.to_string());

    let normalized = ts.replace(',', ".");
    let fields = normalized
        .split(':')
        .map(|field| field.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(invalid)?;

    let seconds = match fields.as_slice() {
        [m, s] => m * 60.0 + s,
        [h, m, s] => h * 3600.0 + m * 60.0 + s,
        _ => return Err(invalid()),
    };
    Ok((seconds * 1000.0).round())
}

/// Removes `<...>` markup such as `<v Speaker>` or `<i>`
fn strip_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

// =============================================================================
// Tests
// =============================================================================
