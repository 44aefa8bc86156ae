//! Editing Session
//!
//! Owns both views of one transcript and the list of rejected edits.

use tracing::{debug, error, warn};

use super::{EditAction, EditCommand, MediaInfo, SessionMetadata};
use crate::core::{
    formats::{self, ExportFormat},
    grouping::group_into_chunks,
    segments::{sanitize, RawSegment, Segment},
    sequence::{ChangeSet, NodeId, SegmentSequence, TextExtractor},
    settings::AppSettings,
    timestamp::{format_timestamp_with, DEFAULT_SEPARATOR},
    CoreResult, Millis, View,
};

/// Subtitle and transcript views plus the errors raised while editing them
#[derive(Clone, Debug)]
pub struct EditorSession {
    subtitle: SegmentSequence,
    transcript: SegmentSequence,
    settings: AppSettings,
    errors: Vec<String>,
}

impl EditorSession {
    /// Validates `raw` and builds both views
    pub fn from_raw(raw: Vec<RawSegment>, settings: &AppSettings) -> CoreResult<Self> {
        let segments = sanitize(raw)?;
        Ok(Self::from_segments(segments, settings))
    }

    /// Builds both views from already validated segments
    pub fn from_segments(segments: Vec<Segment>, settings: &AppSettings) -> Self {
        let transcript = group_into_chunks(&segments, settings.grouping.chunk_size);
        debug!(
            "Built session with {} subtitle and {} transcript segments",
            segments.len(),
            transcript.len()
        );

        Self {
            subtitle: SegmentSequence::from_segments(segments),
            transcript: SegmentSequence::from_segments(transcript),
            settings: settings.clone(),
            errors: Vec::new(),
        }
    }

    pub fn sequence(&self, view: View) -> &SegmentSequence {
        match view {
            View::Subtitle => &self.subtitle,
            View::Transcript => &self.transcript,
        }
    }

    fn sequence_mut(&mut self, view: View) -> &mut SegmentSequence {
        match view {
            View::Subtitle => &mut self.subtitle,
            View::Transcript => &mut self.transcript,
        }
    }

    /// Messages of every rejected command, oldest first
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Runs one command
    ///
    /// A rejected command leaves the view unchanged; its error is logged,
    /// recorded in [`errors`](Self::errors) and returned. Failures that are
    /// not edit rejections are returned without being recorded.
    pub fn apply(&mut self, command: &EditCommand) -> CoreResult<ChangeSet> {
        match self.run(command) {
            Ok(changes) => {
                debug!(
                    "Applied {} at {}: {} nodes to refresh, {} removed",
                    command.action.name(),
                    command.target,
                    changes.stale().count(),
                    changes.removed.len()
                );
                Ok(changes)
            }
            Err(e) if e.is_edit_rejection() => {
                warn!(
                    "Rejected {} at {} in {:?} view: {}",
                    command.action.name(),
                    command.target,
                    command.view,
                    e
                );
                self.errors.push(e.to_string());
                Err(e)
            }
            Err(e) => {
                error!("Failed to apply {} at {}: {}", command.action.name(), command.target, e);
                Err(e)
            }
        }
    }

    /// Runs every command in order and returns how many succeeded
    ///
    /// Rejected commands are skipped. Any other failure stops the run.
    pub fn apply_all(&mut self, commands: &[EditCommand]) -> CoreResult<usize> {
        let mut applied = 0;
        for command in commands {
            match self.apply(command) {
                Ok(_) => applied += 1,
                Err(e) if e.is_edit_rejection() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(applied)
    }

    fn run(&mut self, command: &EditCommand) -> CoreResult<ChangeSet> {
        let anchor = command.target.resolve(self.sequence(command.view))?;

        match &command.action {
            EditAction::InsertBefore => {
                let placeholder = self.placeholder_before(command.view, anchor)?;
                self.sequence_mut(command.view)
                    .append_before(placeholder, anchor)
            }
            EditAction::InsertAfter => {
                let placeholder = self.placeholder_after(command.view, anchor)?;
                self.sequence_mut(command.view)
                    .append_after(placeholder, anchor)
            }
            EditAction::Remove => self
                .sequence_mut(command.view)
                .remove(anchor)
                .map(|removed| removed.changes),
            EditAction::Retime { start, end } => {
                self.sequence_mut(command.view).retime(anchor, *start, *end)
            }
            EditAction::SetText { text } => self.sequence_mut(command.view).set_text(anchor, text),
            EditAction::ToggleOffsetEdit => {
                self.sequence_mut(command.view).toggle_offset_edit(anchor)
            }
        }
    }

    /// Spans `[min_offset, anchor.start]`
    fn placeholder_before(&self, view: View, anchor: NodeId) -> CoreResult<Segment> {
        let sequence = self.sequence(view);
        Ok(Segment::new(
            sequence.min_offset(anchor)?,
            sequence.node(anchor)?.start(),
            &self.settings.editor.placeholder_before,
            1.0,
        ))
    }

    /// Spans `[anchor.end, max_offset]`, or a fixed length after the tail
    fn placeholder_after(&self, view: View, anchor: NodeId) -> CoreResult<Segment> {
        let sequence = self.sequence(view);
        let start = sequence.node(anchor)?.end();
        let mut end = sequence.max_offset(anchor)?;
        if end.is_infinite() {
            end = start + self.settings.editor.tail_placeholder_ms;
        }
        Ok(Segment::new(
            start,
            end,
            &self.settings.editor.placeholder_after,
            1.0,
        ))
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Flattens a view and encodes it, returning `(content, extension)`
    pub fn export(
        &self,
        view: View,
        format: ExportFormat,
        extractor: &dyn TextExtractor,
    ) -> CoreResult<(String, &'static str)> {
        let records = self.sequence(view).to_export_records(extractor);
        formats::export(format, &records)
    }

    /// Status record for `view` alongside the media being played
    pub fn metadata(
        &self,
        view: View,
        transcript_file_name: &str,
        media: &MediaInfo,
    ) -> SessionMetadata {
        let sequence = self.sequence(view);
        let last_end = sequence
            .tail()
            .and_then(|tail| sequence.get(tail))
            .map_or(0.0, |node| node.end());

        SessionMetadata::new(
            &media.file_name,
            transcript_file_name,
            self.display_timestamp(media.total_duration),
            self.display_timestamp(last_end),
            self.display_timestamp(media.current_position),
            format!("{}x", media.playback_speed),
            sequence.len(),
        )
    }

    fn display_timestamp(&self, ms: Millis) -> String {
        format_timestamp_with(ms, DEFAULT_SEPARATOR, self.settings.timestamp.trim_fractional)
    }
}

// =============================================================================
// Tests
// =============================================================================
