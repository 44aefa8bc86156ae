//! Import Dispatch
//!
//! Picks a reader from the file name and remaps its output to raw segments.

use std::path::Path;

use tracing::debug;

use super::{CueEntry, CueTextParser, SubtitleParser};
use crate::core::{segments::RawSegment, CoreError, CoreResult};

/// Formats that can be read back in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportFormat {
    Json,
    Srt,
    Vtt,
}

impl ImportFormat {
    /// Infers the format from the last extension of `file_name`
    pub fn from_file_name(file_name: &str) -> CoreResult<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| CoreError::UnsupportedFormat(file_name.to_string()))?;

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "srt" => Ok(Self::Srt),
            "vtt" => Ok(Self::Vtt),
            _ => Err(CoreError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// Reads `content` with the bundled cue grammar
pub fn parse_file(file_name: &str, content: &str) -> CoreResult<Vec<RawSegment>> {
    parse_file_with(file_name, content, &CueTextParser)
}

/// Reads `content` using `parser` for subtitle formats
///
/// JSON input is parsed structurally; timestamps may still be text and are
/// normalized later by the validator.
pub fn parse_file_with(
    file_name: &str,
    content: &str,
    parser: &dyn SubtitleParser,
) -> CoreResult<Vec<RawSegment>> {
    let format = ImportFormat::from_file_name(file_name)?;
    let segments = match format {
        ImportFormat::Json => serde_json::from_str::<Vec<RawSegment>>(content)?,
        ImportFormat::Srt => from_cues(parser.parse_srt(content)?),
        ImportFormat::Vtt => from_cues(parser.parse_vtt(content)?),
    };

    debug!("Parsed {} segments from {} ({:?})", segments.len(), file_name, format);
    Ok(segments)
}

fn from_cues(cues: Vec<CueEntry>) -> Vec<RawSegment> {
    cues.into_iter()
        .map(|cue| RawSegment::new(cue.from, cue.to, &cue.text))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{formats::ParseError, segments::TimeValue};

    struct FixedParser;

    impl SubtitleParser for FixedParser {
        fn parse_srt(&self, _content: &str) -> Result<Vec<CueEntry>, ParseError> {
            Ok(vec![CueEntry {
                from: 10.0,
                to: 20.0,
                text: "fixed".to_string(),
            }])
        }

        fn parse_vtt(&self, _content: &str) -> Result<Vec<CueEntry>, ParseError> {
            Err(ParseError::UnexpectedEnd)
        }
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(ImportFormat::from_file_name("a.json").unwrap(), ImportFormat::Json);
        assert_eq!(ImportFormat::from_file_name("talk.SRT").unwrap(), ImportFormat::Srt);
        assert_eq!(
            ImportFormat::from_file_name("dir/my.talk.vtt").unwrap(),
            ImportFormat::Vtt
        );
    }

    #[test]
    fn test_unsupported_file_names() {
        for name in ["notes.txt", "noextension", "archive.srt.zip"] {
            let err = ImportFormat::from_file_name(name).unwrap_err();
            assert!(matches!(err, CoreError::UnsupportedFormat(_)), "{}", name);
        }
    }

    #[test]
    fn test_parse_json_keeps_text_timestamps() {
        let json = r#"[{"start":"00:00:00.000","end":"00:00:00.003","text":"abc","score":0.9}]"#;
        let segments = parse_file("t.json", json).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, TimeValue::from("00:00:00.000"));
        assert_eq!(segments[0].score, 0.9);
    }

    #[test]
    fn test_parse_bad_json() {
        let err = parse_file("t.json", "{not json").unwrap_err();
        assert!(matches!(err, CoreError::JsonError(_)));
    }

    #[test]
    fn test_parse_srt_remaps_cues() {
        let srt = "1\n00:00:00,000 --> 00:00:00,003\nabc xyz\n";
        let segments = parse_file("t.srt", srt).unwrap();

        assert_eq!(segments, vec![RawSegment::new(0.0, 3.0, "abc xyz")]);
        assert_eq!(segments[0].score, 1.0);
        assert!(segments[0].words.is_none());
    }

    #[test]
    fn test_custom_parser_is_used() {
        let segments = parse_file_with("x.srt", "ignored", &FixedParser).unwrap();
        assert_eq!(segments, vec![RawSegment::new(10.0, 20.0, "fixed")]);

        let err = parse_file_with("x.vtt", "ignored", &FixedParser).unwrap_err();
        assert!(matches!(err, CoreError::Parse(ParseError::UnexpectedEnd)));
    }
}
