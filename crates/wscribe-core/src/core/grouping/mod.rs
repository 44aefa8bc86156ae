//! Transcript Grouping
//!
//! Derives the coarse transcript view from fine-grained subtitle segments by
//! merging fixed-size runs of consecutive segments.
//!
//! Only line-count chunking exists today. Other groupings (speaker, time
//! windows, dialogue breaks) would slot in next to [`group_into_chunks`].

use tracing::debug;

use crate::core::segments::Segment;

/// Default number of subtitle segments merged into one transcript segment
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Merges consecutive runs of `chunk_size` segments
///
/// For each run: texts are space-joined and trimmed, the start comes from
/// the first member and the end from the last, the score is the mean rounded
/// to two decimals, and word lists are concatenated when the first member
/// carries word detail. The last run may be shorter. A chunk size of zero is
/// treated as one.
pub fn group_into_chunks(segments: &[Segment], chunk_size: usize) -> Vec<Segment> {
    let chunk_size = chunk_size.max(1);

    let groups: Vec<Segment> = segments.chunks(chunk_size).filter_map(merge_chunk).collect();

    debug!(
        "Grouped {} segments into {} chunks of up to {}",
        segments.len(),
        groups.len(),
        chunk_size
    );
    groups
}

fn merge_chunk(chunk: &[Segment]) -> Option<Segment> {
    let first = chunk.first()?;
    let last = chunk.last()?;

    let text = chunk
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    let mean = chunk.iter().map(|s| s.score).sum::<f64>() / chunk.len() as f64;

    let words = first.words.as_ref().map(|_| {
        chunk
            .iter()
            .filter_map(|s| s.words.as_deref())
            .flatten()
            .cloned()
            .collect()
    });

    Some(Segment {
        start: first.start,
        end: last.end,
        text,
        score: round_to_hundredths(mean),
        words,
    })
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segments::Word;

    fn lines() -> Vec<Segment> {
        vec![
            Segment::new(0.0, 3.0, "abc xyz", 0.9).with_words(vec![
                Word::new(0.0, 1.0, "abc", 0.9),
                Word::new(1.0, 3.0, "xyz", 0.9),
            ]),
            Segment::new(3.0, 6.0, "123 456", 0.7).with_words(vec![
                Word::new(3.0, 4.0, "123", 0.9),
                Word::new(4.0, 6.0, "456", 0.9),
            ]),
        ]
    }

    #[test]
    fn test_groups_by_line_chunk() {
        let groups = group_into_chunks(&lines(), DEFAULT_CHUNK_SIZE);

        let expected = Segment::new(0.0, 6.0, "abc xyz 123 456", 0.8).with_words(vec![
            Word::new(0.0, 1.0, "abc", 0.9),
            Word::new(1.0, 3.0, "xyz", 0.9),
            Word::new(3.0, 4.0, "123", 0.9),
            Word::new(4.0, 6.0, "456", 0.9),
        ]);
        assert_eq!(groups, vec![expected]);
    }

    #[test]
    fn test_group_count_is_ceiling() {
        let segments: Vec<Segment> = (0..23)
            .map(|i| Segment::new(i as f64 * 10.0, i as f64 * 10.0 + 5.0, "w", 1.0))
            .collect();

        let groups = group_into_chunks(&segments, 10);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].start, 0.0);
        assert_eq!(groups[0].end, 95.0);
        assert_eq!(groups[2].start, 200.0);
        assert_eq!(groups[2].end, 225.0);
    }

    #[test]
    fn test_words_absent_when_first_member_has_none() {
        let mut segments = lines();
        segments[0].words = None;

        let groups = group_into_chunks(&segments, 10);
        assert!(groups[0].words.is_none());
    }

    #[test]
    fn test_members_without_words_contribute_nothing() {
        let mut segments = lines();
        segments[1].words = None;

        let groups = group_into_chunks(&segments, 10);
        assert_eq!(groups[0].words.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        let segments = vec![
            Segment::new(0.0, 1.0, "a", 0.333),
            Segment::new(1.0, 2.0, "b", 0.334),
            Segment::new(2.0, 3.0, "c", 0.5),
        ];
        let groups = group_into_chunks(&segments, 3);
        assert_eq!(groups[0].score, 0.39);
    }

    #[test]
    fn test_text_is_trimmed() {
        let segments = vec![
            Segment::new(0.0, 1.0, " lead", 1.0),
            Segment::new(1.0, 2.0, "trail ", 1.0),
        ];
        let groups = group_into_chunks(&segments, 2);
        assert_eq!(groups[0].text, "lead trail");
    }

    #[test]
    fn test_zero_chunk_size_and_empty_input() {
        assert_eq!(group_into_chunks(&lines(), 0).len(), 2);
        assert!(group_into_chunks(&[], 10).is_empty());
    }
}
