//! Mutation Results
//!
//! Every structural or payload edit reports which nodes changed so an
//! observer can re-render only those.

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::core::segments::Segment;

/// Nodes affected by a single mutation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    /// Nodes created by the mutation
    pub created: Vec<NodeId>,
    /// Nodes destroyed by the mutation (their handles are now dead)
    pub removed: Vec<NodeId>,
    /// Surviving nodes whose payload or links changed
    pub touched: Vec<NodeId>,
}

impl ChangeSet {
    /// Creates an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a created node
    pub fn with_created(mut self, id: NodeId) -> Self {
        self.created.push(id);
        self
    }

    /// Adds a removed node
    pub fn with_removed(mut self, id: NodeId) -> Self {
        self.removed.push(id);
        self
    }

    /// Adds a touched node
    pub fn with_touched(mut self, id: NodeId) -> Self {
        if !self.touched.contains(&id) {
            self.touched.push(id);
        }
        self
    }

    /// Returns true if nothing changed
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty() && self.touched.is_empty()
    }

    /// Every live node that needs re-rendering
    pub fn stale(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.created.iter().chain(self.touched.iter()).copied()
    }
}

/// A node taken out of a sequence
#[derive(Clone, Debug, PartialEq)]
pub struct Removed {
    /// The payload the node carried
    pub segment: Segment,
    /// The removal's change set
    pub changes: ChangeSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> NodeId {
        NodeId {
            index,
            generation: 0,
        }
    }

    #[test]
    fn test_change_set_builder() {
        let changes = ChangeSet::new()
            .with_created(id(3))
            .with_touched(id(1))
            .with_touched(id(1))
            .with_touched(id(2));

        assert_eq!(changes.created, vec![id(3)]);
        assert_eq!(changes.touched, vec![id(1), id(2)]);
        assert_eq!(changes.stale().count(), 3);
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_change_set_serialization() {
        let changes = ChangeSet::new().with_removed(id(7));
        let json = serde_json::to_string(&changes).unwrap();
        assert!(json.contains("\"removed\""));
        assert!(ChangeSet::new().is_empty());
    }
}
