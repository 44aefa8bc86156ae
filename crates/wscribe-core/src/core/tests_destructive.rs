//! Destructive and Edge Case Tests
//!
//! Hostile inputs and stale handles across module boundaries.

use crate::core::editor::{EditAction, EditCommand, EditorSession, Target};
use crate::core::formats::{parse_file, CueTextParser, SubtitleParser};
use crate::core::segments::{sanitize, RawSegment, Segment};
use crate::core::sequence::SegmentSequence;
use crate::core::settings::AppSettings;
use crate::core::timestamp::parse_timestamp;
use crate::core::{CoreError, View};

#[test]
fn test_destructive_timestamp_garbage() {
    for text in ["", ":", "::.", "aa:bb:cc.ddd", "00:00:00", "NaN:00:00.000", "inf:0:0.0"] {
        assert!(
            matches!(parse_timestamp(text), Err(CoreError::MalformedTimestamp(_))),
            "{:?} should be rejected",
            text
        );
    }
}

#[test]
fn test_destructive_mixed_batch_is_rejected() {
    // Numeric first segment: the text one is never normalized
    let raw = vec![
        RawSegment::new(0.0, 1.0, "a"),
        RawSegment {
            start: "00:00:00.002".into(),
            end: "00:00:00.003".into(),
            ..RawSegment::new(0.0, 0.0, "b")
        },
    ];
    assert!(matches!(sanitize(raw), Err(CoreError::MalformedTimestamp(_))));
}

#[test]
fn test_destructive_last_segment_bounds_unchecked() {
    let raw = vec![
        RawSegment::new(0.0, 1.0, "a"),
        RawSegment::new(5.0, 2.0, "inverted tail"),
    ];
    let segments = sanitize(raw).unwrap();
    assert_eq!(segments[1].start, 5.0);
}

#[test]
fn test_destructive_stale_handle_after_slot_reuse() {
    let mut sequence = SegmentSequence::new();
    let first = sequence.append(Segment::new(0.0, 1.0, "a", 1.0));
    sequence.remove(first).unwrap();
    let reused = sequence.append(Segment::new(0.0, 1.0, "b", 1.0));

    assert_ne!(first, reused);
    assert!(matches!(sequence.node(first), Err(CoreError::NodeNotFound(_))));
    assert!(matches!(sequence.retime(first, 0.0, 1.0), Err(CoreError::NodeNotFound(_))));
    assert_eq!(sequence.node(reused).unwrap().text(), "b");
}

#[test]
fn test_destructive_remove_until_empty() {
    let raw = (0..3)
        .map(|i| RawSegment::new(i as f64 * 10.0, i as f64 * 10.0 + 5.0, "x"))
        .collect();
    let mut session = EditorSession::from_raw(raw, &AppSettings::default()).unwrap();
    let remove_head = EditCommand::new(View::Subtitle, Target::Position(0), EditAction::Remove);

    let script = vec![remove_head.clone(); 3];

    assert_eq!(session.apply_all(&script).unwrap(), 3);
    assert!(session.sequence(View::Subtitle).is_empty());
    assert!(session.sequence(View::Subtitle).head().is_none());
    assert!(session.sequence(View::Subtitle).tail().is_none());

    assert!(session.apply(&remove_head).is_err());
    assert_eq!(session.errors().len(), 1);
}

#[test]
fn test_destructive_subtitle_without_blank_separator() {
    // Two cues glued together: the second timing line becomes body text
    let srt = "1\n00:00:01,000 --> 00:00:02,000\na\n2\n00:00:03,000 --> 00:00:04,000\nb\n";
    let cues = CueTextParser.parse_srt(srt).unwrap();
    assert_eq!(cues.len(), 1);
    assert!(cues[0].text.contains("-->"));
}

#[test]
fn test_destructive_json_with_wrong_shape() {
    assert!(matches!(
        parse_file("t.json", r#"{"start": 0}"#),
        Err(CoreError::JsonError(_))
    ));
    assert!(matches!(
        parse_file("t.json", r#"[{"start": true, "end": 1, "text": "x"}]"#),
        Err(CoreError::JsonError(_))
    ));
}
