//! Segment Validator
//!
//! Normalizes inbound timestamps to milliseconds and checks that segments
//! are ordered and non-overlapping.

use tracing::debug;

use super::{RawSegment, Segment};
use crate::core::{CoreError, CoreResult};

/// Parses every text timestamp in the batch into milliseconds, in place
///
/// Only the first segment is inspected to decide whether the batch is
/// already numeric. A batch that mixes numeric and text timestamps is not
/// supported; when the first segment is numeric the rest are left as-is.
pub fn normalize_to_ms(segments: &mut [RawSegment]) -> CoreResult<()> {
    let Some(first) = segments.first() else {
        return Ok(());
    };
    if first.start.is_numeric() {
        return Ok(());
    }

    for segment in segments.iter_mut() {
        segment.start.normalize()?;
        segment.end.normalize()?;
        if let Some(words) = segment.words.as_mut() {
            for word in words {
                word.start.normalize()?;
                word.end.normalize()?;
            }
        }
    }

    debug!("Normalized {} segments to milliseconds", segments.len());
    Ok(())
}

/// Verifies that segments are in temporal order without overlaps
///
/// The start/end check runs for every segment except the last one, whose own
/// bounds are never inspected. This gap is long-standing behavior that
/// callers may rely on; do not tighten it here.
pub fn verify_order(segments: &[Segment]) -> CoreResult<()> {
    for (index, pair) in segments.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        if current.start > current.end {
            return Err(CoreError::SegmentStartAfterEnd {
                index,
                start: current.start,
                end: current.end,
            });
        }
        if current.end > next.start {
            return Err(CoreError::SegmentOverlap {
                index,
                end: current.end,
                next_start: next.start,
            });
        }
    }
    Ok(())
}

/// Normalizes then verifies a batch, rejecting it as a whole on any failure
pub fn sanitize(mut segments: Vec<RawSegment>) -> CoreResult<Vec<Segment>> {
    normalize_to_ms(&mut segments)?;

    let segments = segments
        .into_iter()
        .map(RawSegment::into_segment)
        .collect::<CoreResult<Vec<_>>>()?;

    verify_order(&segments)?;
    Ok(segments)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segments::{RawWord, TimeValue};

    fn text_segment(start: &str, end: &str, text: &str) -> RawSegment {
        RawSegment {
            start: start.into(),
            end: end.into(),
            text: text.to_string(),
            score: 0.9,
            words: None,
        }
    }

    #[test]
    fn test_normalize_parses_segments_and_words() {
        let mut segment = text_segment("00:00:01.000", "00:00:02.000", "hello there");
        segment.words = Some(vec![
            RawWord {
                start: "00:00:01.000".into(),
                end: "00:00:01.400".into(),
                text: "hello".to_string(),
                score: 0.8,
            },
            RawWord {
                start: "00:00:01.500".into(),
                end: "00:00:02.000".into(),
                text: "there".to_string(),
                score: 0.7,
            },
        ]);
        let mut batch = vec![segment];

        normalize_to_ms(&mut batch).unwrap();

        assert_eq!(batch[0].start, TimeValue::Millis(1000.0));
        assert_eq!(batch[0].end, TimeValue::Millis(2000.0));
        let words = batch[0].words.as_ref().unwrap();
        assert_eq!(words[1].start, TimeValue::Millis(1500.0));
    }

    #[test]
    fn test_normalize_skips_numeric_batch() {
        let mut batch = vec![RawSegment::new(0.0, 1.0, "a")];
        let before = batch.clone();
        normalize_to_ms(&mut batch).unwrap();
        assert_eq!(batch, before);
    }

    #[test]
    fn test_normalize_only_inspects_first_segment() {
        let mut batch = vec![
            RawSegment::new(0.0, 1.0, "a"),
            text_segment("00:00:01.000", "00:00:02.000", "b"),
        ];
        normalize_to_ms(&mut batch).unwrap();
        assert_eq!(batch[1].start, TimeValue::Text("00:00:01.000".to_string()));
    }

    #[test]
    fn test_normalize_rejects_short_timestamps() {
        let mut batch = vec![text_segment("00:01.000", "00:00:02.000", "a")];
        let err = normalize_to_ms(&mut batch).unwrap_err();
        assert!(matches!(err, CoreError::MalformedTimestamp(_)));
    }

    #[test]
    fn test_verify_order_accepts_touching_segments() {
        let segments = vec![
            Segment::new(0.0, 3.0, "a", 1.0),
            Segment::new(3.0, 6.0, "b", 1.0),
        ];
        assert!(verify_order(&segments).is_ok());
    }

    #[test]
    fn test_verify_order_rejects_start_after_end() {
        let segments = vec![
            Segment::new(5.0, 3.0, "a", 1.0),
            Segment::new(6.0, 8.0, "b", 1.0),
        ];
        let err = verify_order(&segments).unwrap_err();
        assert!(matches!(err, CoreError::SegmentStartAfterEnd { index: 0, .. }));
    }

    #[test]
    fn test_verify_order_rejects_overlap() {
        let segments = vec![
            Segment::new(0.0, 4.0, "a", 1.0),
            Segment::new(3.0, 6.0, "b", 1.0),
        ];
        let err = verify_order(&segments).unwrap_err();
        assert!(matches!(err, CoreError::SegmentOverlap { index: 0, .. }));
    }

    #[test]
    fn test_verify_order_never_checks_last_segment_bounds() {
        let segments = vec![
            Segment::new(0.0, 1.0, "a", 1.0),
            Segment::new(9.0, 2.0, "inverted tail", 1.0),
        ];
        assert!(verify_order(&segments).is_ok());

        let single = vec![Segment::new(9.0, 2.0, "inverted", 1.0)];
        assert!(verify_order(&single).is_ok());
    }

    #[test]
    fn test_sanitize_rejects_whole_batch() {
        let batch = vec![
            text_segment("00:00:00.000", "00:00:01.000", "a"),
            text_segment("00:00:00.500", "00:00:02.000", "b"),
        ];
        assert!(matches!(
            sanitize(batch),
            Err(CoreError::SegmentOverlap { .. })
        ));
    }

    #[test]
    fn test_sanitize_mixed_batch_fails_loudly() {
        let batch = vec![
            RawSegment::new(0.0, 1.0, "a"),
            text_segment("00:00:01.000", "00:00:02.000", "b"),
        ];
        assert!(matches!(
            sanitize(batch),
            Err(CoreError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn test_sanitize_returns_typed_segments() {
        let batch = vec![
            text_segment("00:00:00.000", "00:00:01.000", "a"),
            text_segment("00:00:01.000", "00:00:02.000", "b"),
        ];
        let segments = sanitize(batch).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].start, 1000.0);
        assert_eq!(segments[1].score, 0.9);
    }
}
