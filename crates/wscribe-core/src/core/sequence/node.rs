//! Segment Nodes
//!
//! A node is a segment payload plus its links inside a [`SegmentSequence`].
//!
//! [`SegmentSequence`]: super::SegmentSequence

use serde::{Deserialize, Serialize};

use crate::core::{
    segments::{Segment, Word},
    Confidence, Millis,
};

// =============================================================================
// Node Handle
// =============================================================================

/// Stable handle to a node in a sequence arena
///
/// The generation changes whenever the slot is freed, so a handle kept after
/// removal no longer resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

// =============================================================================
// Node
// =============================================================================

/// A segment inside a sequence
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(super) id: NodeId,
    pub(super) segment: Segment,
    pub(super) markup: String,
    pub(super) offset_edit_mode: bool,
    pub(super) prev: Option<NodeId>,
    pub(super) next: Option<NodeId>,
    pub(super) revision: u64,
}

impl Node {
    pub(super) fn new(id: NodeId, segment: Segment, revision: u64) -> Self {
        let markup = build_markup(&segment);
        Self {
            id,
            segment,
            markup,
            offset_edit_mode: false,
            prev: None,
            next: None,
            revision,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn start(&self) -> Millis {
        self.segment.start
    }

    pub fn end(&self) -> Millis {
        self.segment.end
    }

    pub fn text(&self) -> &str {
        &self.segment.text
    }

    pub fn score(&self) -> Confidence {
        self.segment.score
    }

    pub fn words(&self) -> Option<&[Word]> {
        self.segment.words.as_deref()
    }

    /// Rich text for the editing surface (per-word spans when available)
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Whether the offsets of this node are being edited
    pub fn offset_edit_mode(&self) -> bool {
        self.offset_edit_mode
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Identity token for render invalidation
    ///
    /// Changes whenever the payload or the links of this node change.
    /// It means nothing to the sequence itself.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Builds the editing markup for a segment
///
/// Each word becomes `<span data-start=.. data-end=.. data-score=..>word</span>`
/// and spans are joined by single spaces. Segments without word detail (or
/// with an empty word list) render as their plain text. Text is escaped so
/// extraction gives back exactly what was put in.
pub fn build_markup(segment: &Segment) -> String {
    match segment.words.as_deref() {
        Some(words) if !words.is_empty() => words
            .iter()
            .map(|w| {
                format!(
                    "<span data-start={} data-end={} data-score={}>{}</span>",
                    w.start,
                    w.end,
                    w.score,
                    escape_text(&w.text)
                )
            })
            .collect::<Vec<_>>()
            .join(" "),
        _ => escape_text(&segment.text),
    }
}

fn escape_text(text: &str) -> String {
    if !text.contains(['&', '<', '>']) {
        return text.to_string();
    }
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_markup_with_words() {
        let segment = Segment::new(0.0, 3.0, "abc xyz", 0.9).with_words(vec![
            Word::new(0.0, 1.0, "abc", 0.9),
            Word::new(1.0, 3.0, "xyz", 0.5),
        ]);

        assert_eq!(
            build_markup(&segment),
            "<span data-start=0 data-end=1 data-score=0.9>abc</span> \
             <span data-start=1 data-end=3 data-score=0.5>xyz</span>"
        );
    }

    #[test]
    fn test_build_markup_without_words() {
        let segment = Segment::new(0.0, 3.0, "plain line", 0.9);
        assert_eq!(build_markup(&segment), "plain line");

        let empty_words = Segment::new(0.0, 3.0, "placeholder", 1.0).with_words(vec![]);
        assert_eq!(build_markup(&empty_words), "placeholder");
    }

    #[test]
    fn test_build_markup_escapes_text() {
        let segment = Segment::new(0.0, 2.0, "if a < b & c > d", 0.9);
        assert_eq!(build_markup(&segment), "if a &lt; b &amp; c &gt; d");

        let worded = Segment::new(0.0, 2.0, "<3 R&D", 0.9).with_words(vec![
            Word::new(0.0, 1.0, "<3", 0.9),
            Word::new(1.0, 2.0, "R&D", 0.8),
        ]);
        assert_eq!(
            build_markup(&worded),
            "<span data-start=0 data-end=1 data-score=0.9>&lt;3</span> \
             <span data-start=1 data-end=2 data-score=0.8>R&amp;D</span>"
        );
    }

    #[test]
    fn test_node_id_display() {
        let id = NodeId {
            index: 4,
            generation: 2,
        };
        assert_eq!(id.to_string(), "#4v2");
    }
}
