//! Edit Commands
//!
//! A command names a view, a target node and the action to run. Scripts of
//! commands are plain JSON:
//!
//! ```json
//! [
//!   { "view": "subtitle", "target": 0, "action": "insert_before" },
//!   { "target": 2, "action": "retime", "start": 4000, "end": 4500 },
//!   { "view": "transcript", "target": 0, "action": "set_text", "text": "Intro" }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{
    sequence::{NodeId, SegmentSequence},
    CoreError, CoreResult, Millis, View,
};

/// The node an action applies to
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    /// Zero-based position in traversal order, resolved when applied
    Position(usize),
    /// A handle obtained from an earlier traversal or change set
    Node(NodeId),
}

impl Target {
    /// Resolves to a live handle in `sequence`
    pub fn resolve(&self, sequence: &SegmentSequence) -> CoreResult<NodeId> {
        match *self {
            Self::Position(position) => {
                sequence
                    .id_at(position)
                    .ok_or(CoreError::PositionOutOfRange {
                        position,
                        len: sequence.len(),
                    })
            }
            Self::Node(id) => sequence.node(id).map(|node| node.id()),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position(position) => write!(f, "position {}", position),
            Self::Node(id) => write!(f, "node {}", id),
        }
    }
}

/// What to do to the target node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction {
    /// Fill the whole gap before the target with a placeholder
    InsertBefore,
    /// Fill the whole gap after the target with a placeholder
    InsertAfter,
    Remove,
    Retime { start: Millis, end: Millis },
    SetText { text: String },
    ToggleOffsetEdit,
}

impl EditAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertBefore => "insert_before",
            Self::InsertAfter => "insert_after",
            Self::Remove => "remove",
            Self::Retime { .. } => "retime",
            Self::SetText { .. } => "set_text",
            Self::ToggleOffsetEdit => "toggle_offset_edit",
        }
    }
}

/// An action bound to a view and a target
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditCommand {
    #[serde(default)]
    pub view: View,
    pub target: Target,
    #[serde(flatten)]
    pub action: EditAction,
}

impl EditCommand {
    pub fn new(view: View, target: Target, action: EditAction) -> Self {
        Self {
            view,
            target,
            action,
        }
    }

    /// Parses a JSON array of commands
    pub fn parse_script(json: &str) -> CoreResult<Vec<EditCommand>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segments::Segment;

    #[test]
    fn test_parse_script() {
        let json = r#"[
            { "view": "subtitle", "target": 0, "action": "insert_before" },
            { "target": 2, "action": "retime", "start": 4000, "end": 4500.5 },
            { "view": "transcript", "target": 1, "action": "set_text", "text": "Intro" },
            { "target": 3, "action": "toggle_offset_edit" }
        ]"#;
        let commands = EditCommand::parse_script(json).unwrap();

        assert_eq!(
            commands,
            vec![
                EditCommand::new(View::Subtitle, Target::Position(0), EditAction::InsertBefore),
                EditCommand::new(
                    View::Subtitle,
                    Target::Position(2),
                    EditAction::Retime {
                        start: 4000.0,
                        end: 4500.5
                    }
                ),
                EditCommand::new(
                    View::Transcript,
                    Target::Position(1),
                    EditAction::SetText {
                        text: "Intro".to_string()
                    }
                ),
                EditCommand::new(View::Subtitle, Target::Position(3), EditAction::ToggleOffsetEdit),
            ]
        );
    }

    #[test]
    fn test_parse_script_rejects_unknown_action() {
        let err = EditCommand::parse_script(r#"[{ "target": 0, "action": "split" }]"#).unwrap_err();
        assert!(matches!(err, CoreError::JsonError(_)));
    }

    #[test]
    fn test_node_target_round_trips_through_json() {
        let mut sequence = SegmentSequence::new();
        let id = sequence.append(Segment::new(0.0, 1.0, "a", 1.0));

        let command = EditCommand::new(View::Subtitle, Target::Node(id), EditAction::Remove);
        let json = serde_json::to_string(&command).unwrap();
        let parsed: EditCommand = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, command);
        assert_eq!(parsed.target.resolve(&sequence).unwrap(), id);
    }

    #[test]
    fn test_resolve_position() {
        let mut sequence = SegmentSequence::new();
        sequence.append(Segment::new(0.0, 1.0, "a", 1.0));
        let second = sequence.append(Segment::new(1.0, 2.0, "b", 1.0));

        assert_eq!(Target::Position(1).resolve(&sequence).unwrap(), second);
        assert!(matches!(
            Target::Position(2).resolve(&sequence),
            Err(CoreError::PositionOutOfRange { position: 2, len: 2 })
        ));
    }

    #[test]
    fn test_resolve_dead_handle() {
        let mut sequence = SegmentSequence::new();
        let id = sequence.append(Segment::new(0.0, 1.0, "a", 1.0));
        sequence.remove(id).unwrap();

        assert!(matches!(
            Target::Node(id).resolve(&sequence),
            Err(CoreError::NodeNotFound(_))
        ));
    }
}
