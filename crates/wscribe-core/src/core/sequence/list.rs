//! Arena-backed Segment Sequence
//!
//! Nodes are stored in a slot arena and linked through [`NodeId`] handles.
//! Splicing and unlinking are O(1); lookups by handle are O(1).
//!
//! Only the checked insertions ([`SegmentSequence::append_before`] and
//! [`SegmentSequence::append_after`]) guarantee `n.end <= n.next.start`.
//! [`SegmentSequence::append`] trusts its caller and is meant for bulk
//! construction from validated input.

use tracing::debug;

use super::{ChangeSet, Node, NodeId, Removed, TextExtractor};
use crate::core::{
    segments::{ExportRecord, Segment},
    CoreError, CoreResult, Millis,
};

// =============================================================================
// Arena Slot
// =============================================================================

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

// =============================================================================
// Segment Sequence
// =============================================================================

/// Ordered, doubly-linked sequence of segment nodes
#[derive(Clone, Debug, Default)]
pub struct SegmentSequence {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
    revision: u64,
}

impl SegmentSequence {
    /// Creates an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence by appending every segment in order
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut sequence = Self::new();
        for segment in segments {
            sequence.append(segment);
        }
        sequence
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the maintained node count
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sequence has no nodes
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Gets a node by handle
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Gets a node by handle, failing if the handle is dead
    pub fn node(&self, id: NodeId) -> CoreResult<&Node> {
        self.get(id).ok_or(CoreError::NodeNotFound(id))
    }

    /// Returns true if the handle still resolves
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the handle at a zero-based position from the head
    pub fn id_at(&self, position: usize) -> Option<NodeId> {
        self.iter().nth(position).map(Node::id)
    }

    /// Returns a fresh forward walk from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            sequence: self,
            cursor: self.head,
        }
    }

    /// Returns true if every adjacent pair satisfies `end <= next.start`
    pub fn is_ordered(&self) -> bool {
        self.iter().all(|node| match node.next.and_then(|next| self.get(next)) {
            Some(next) => node.end() <= next.start(),
            None => true,
        })
    }

    /// Flattens the sequence into `{start, end, text}` records
    pub fn to_export_records(&self, extractor: &dyn TextExtractor) -> Vec<ExportRecord> {
        self.iter()
            .map(|node| ExportRecord {
                start: node.start(),
                end: node.end(),
                text: extractor.extract(node),
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Pause Queries
    // -------------------------------------------------------------------------

    /// Gap between the previous node's end and this node's start
    ///
    /// For the head this is the distance from zero.
    pub fn pre_pause(&self, id: NodeId) -> CoreResult<Millis> {
        let node = self.node(id)?;
        let floor = match node.prev {
            Some(prev) => self.node(prev)?.end(),
            None => 0.0,
        };
        Ok(node.start() - floor)
    }

    /// Gap between this node's end and the next node's start
    ///
    /// For the tail the gap is unbounded.
    pub fn post_pause(&self, id: NodeId) -> CoreResult<Millis> {
        let node = self.node(id)?;
        match node.next {
            Some(next) => Ok(self.node(next)?.start() - node.end()),
            None => Ok(Millis::INFINITY),
        }
    }

    /// Earliest legal start for a segment placed before this node
    pub fn min_offset(&self, id: NodeId) -> CoreResult<Millis> {
        Ok(self.node(id)?.start() - self.pre_pause(id)?)
    }

    /// Latest legal end for a segment placed after this node
    pub fn max_offset(&self, id: NodeId) -> CoreResult<Millis> {
        Ok(self.node(id)?.end() + self.post_pause(id)?)
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Links a new node at the tail without any ordering check
    pub fn append(&mut self, segment: Segment) -> NodeId {
        let id = self.alloc(segment);
        match self.tail {
            Some(tail) => {
                self.link_mut(id).prev = Some(tail);
                self.link_mut(tail).next = Some(id);
                self.touch(ChangeSet::new(), tail);
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Inserts a segment into the gap before `anchor`
    ///
    /// The segment must fit inside `[min_offset(anchor), anchor.start]`.
    pub fn append_before(&mut self, segment: Segment, anchor: NodeId) -> CoreResult<ChangeSet> {
        let pause = self.pre_pause(anchor)?;
        if pause <= 0.0 {
            return Err(CoreError::NoSpace { pause });
        }
        let max = self.node(anchor)?.start();
        let min = max - pause;
        check_window(&segment, min, max)?;

        let prev = self.node(anchor)?.prev;
        let id = self.alloc(segment);
        {
            let node = self.link_mut(id);
            node.prev = prev;
            node.next = Some(anchor);
        }
        match prev {
            Some(prev) => self.link_mut(prev).next = Some(id),
            None => self.head = Some(id),
        }
        self.link_mut(anchor).prev = Some(id);
        self.len += 1;

        debug!("Inserted segment {} before {}", id, anchor);
        let mut changes = ChangeSet::new().with_created(id);
        changes = self.touch(changes, anchor);
        if let Some(prev) = prev {
            changes = self.touch(changes, prev);
        }
        Ok(changes)
    }

    /// Inserts a segment into the gap after `anchor`
    ///
    /// The segment must fit inside `[anchor.end, max_offset(anchor)]`.
    pub fn append_after(&mut self, segment: Segment, anchor: NodeId) -> CoreResult<ChangeSet> {
        let pause = self.post_pause(anchor)?;
        if pause <= 0.0 {
            return Err(CoreError::NoSpace { pause });
        }
        let min = self.node(anchor)?.end();
        let max = min + pause;
        check_window(&segment, min, max)?;

        let next = self.node(anchor)?.next;
        let id = self.alloc(segment);
        {
            let node = self.link_mut(id);
            node.prev = Some(anchor);
            node.next = next;
        }
        match next {
            Some(next) => self.link_mut(next).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.link_mut(anchor).next = Some(id);
        self.len += 1;

        debug!("Inserted segment {} after {}", id, anchor);
        let mut changes = ChangeSet::new().with_created(id);
        changes = self.touch(changes, anchor);
        if let Some(next) = next {
            changes = self.touch(changes, next);
        }
        Ok(changes)
    }

    // -------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------

    /// Removes the head node; returns `None` on an empty sequence
    pub fn remove_front(&mut self) -> Option<Removed> {
        let head = self.head?;
        let next = self.get(head)?.next;

        let mut changes = ChangeSet::new().with_removed(head);
        match next {
            Some(next) => {
                self.link_mut(next).prev = None;
                self.head = Some(next);
                changes = self.touch(changes, next);
            }
            None => {
                self.head = None;
                self.tail = None;
            }
        }
        let node = self.release(head)?;
        self.len = self.len.saturating_sub(1);

        debug!("Removed head segment {}", head);
        Some(Removed {
            segment: node.segment,
            changes,
        })
    }

    /// Removes the tail node; returns `None` on an empty sequence
    pub fn remove_back(&mut self) -> Option<Removed> {
        let tail = self.tail?;
        let prev = self.get(tail)?.prev;

        let mut changes = ChangeSet::new().with_removed(tail);
        match prev {
            Some(prev) => {
                self.link_mut(prev).next = None;
                self.tail = Some(prev);
                changes = self.touch(changes, prev);
            }
            None => {
                self.head = None;
                self.tail = None;
            }
        }
        let node = self.release(tail)?;
        self.len = self.len.saturating_sub(1);

        debug!("Removed tail segment {}", tail);
        Some(Removed {
            segment: node.segment,
            changes,
        })
    }

    /// Unlinks a node that has both neighbours
    ///
    /// Head, tail and the node count are left alone so this composes with
    /// [`remove_front`](Self::remove_front) and
    /// [`remove_back`](Self::remove_back). Call
    /// [`note_removed`](Self::note_removed) afterwards to settle the count, or
    /// use [`remove`](Self::remove) which does both.
    pub fn unlink_interior(&mut self, id: NodeId) -> CoreResult<Removed> {
        let node = self.node(id)?;
        let (Some(prev), Some(next)) = (node.prev, node.next) else {
            return Err(CoreError::NotInteriorNode(id));
        };

        self.link_mut(prev).next = Some(next);
        self.link_mut(next).prev = Some(prev);
        let node = self.release(id).ok_or(CoreError::NodeNotFound(id))?;

        debug!("Unlinked interior segment {}", id);
        let changes = ChangeSet::new().with_removed(id);
        let changes = self.touch(changes, prev);
        let changes = self.touch(changes, next);
        Ok(Removed {
            segment: node.segment,
            changes,
        })
    }

    /// Decrements the maintained count after [`unlink_interior`](Self::unlink_interior)
    pub fn note_removed(&mut self) {
        self.len = self.len.saturating_sub(1);
    }

    /// Removes any node, dispatching on its position
    pub fn remove(&mut self, id: NodeId) -> CoreResult<Removed> {
        let links = {
            let node = self.node(id)?;
            (node.prev, node.next)
        };
        let removed = match links {
            (None, _) => self.remove_front(),
            (_, None) => self.remove_back(),
            _ => {
                let removed = self.unlink_interior(id)?;
                self.note_removed();
                Some(removed)
            }
        };
        removed.ok_or_else(|| CoreError::Internal(format!("Failed to remove segment {}", id)))
    }

    // -------------------------------------------------------------------------
    // Payload Edits
    // -------------------------------------------------------------------------

    /// Moves a node's bounds within `[min_offset, max_offset]`
    pub fn retime(&mut self, id: NodeId, start: Millis, end: Millis) -> CoreResult<ChangeSet> {
        let min = self.min_offset(id)?;
        let max = self.max_offset(id)?;
        if !(start <= end && start >= min && end <= max) {
            return Err(CoreError::ImpossibleTimestamps {
                start,
                end,
                min,
                max,
            });
        }

        let (prev, next) = {
            let node = self.link_mut(id);
            node.segment.start = start;
            node.segment.end = end;
            (node.prev, node.next)
        };

        let mut changes = self.touch(ChangeSet::new(), id);
        for neighbour in [prev, next].into_iter().flatten() {
            changes = self.touch(changes, neighbour);
        }
        Ok(changes)
    }

    /// Replaces a node's text, dropping word detail that no longer matches
    pub fn set_text(&mut self, id: NodeId, text: &str) -> CoreResult<ChangeSet> {
        self.node(id)?;
        {
            let node = self.link_mut(id);
            node.segment.text = text.to_string();
            node.segment.words = None;
            node.markup = super::build_markup(&node.segment);
        }
        Ok(self.touch(ChangeSet::new(), id))
    }

    /// Flips the offset edit flag of a node; neighbours are not touched
    pub fn toggle_offset_edit(&mut self, id: NodeId) -> CoreResult<ChangeSet> {
        self.node(id)?;
        {
            let node = self.link_mut(id);
            node.offset_edit_mode = !node.offset_edit_mode;
        }
        Ok(self.touch(ChangeSet::new(), id))
    }

    // -------------------------------------------------------------------------
    // Arena Internals
    // -------------------------------------------------------------------------

    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn alloc(&mut self, segment: Segment) -> NodeId {
        let revision = self.next_revision();
        let id = match self.free.pop() {
            Some(index) => NodeId {
                index,
                generation: self.slots[index as usize].generation,
            },
            None => {
                self.slots.push(Slot::default());
                NodeId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        self.slots[id.index as usize].node = Some(Node::new(id, segment, revision));
        id
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let mut node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        node.prev = None;
        node.next = None;
        Some(node)
    }

    /// Mutable access for a handle that is known to be live
    ///
    /// Every caller resolves the handle through [`Self::node`] (or reads it
    /// from a live node's links) before mutating.
    fn link_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots[id.index as usize].node.as_mut() {
            Some(node) => node,
            None => unreachable!("segment node {} resolved but slot is empty", id),
        }
    }

    fn touch(&mut self, changes: ChangeSet, id: NodeId) -> ChangeSet {
        let revision = self.next_revision();
        self.link_mut(id).revision = revision;
        changes.with_touched(id)
    }
}

fn check_window(segment: &Segment, min: Millis, max: Millis) -> CoreResult<()> {
    let fits = segment.start <= segment.end && segment.start >= min && segment.end <= max;
    if fits {
        Ok(())
    } else {
        Err(CoreError::ImpossibleTimestamps {
            start: segment.start,
            end: segment.end,
            min,
            max,
        })
    }
}

// =============================================================================
// Traversal
// =============================================================================

/// Forward walk over a sequence, head to tail
pub struct Iter<'a> {
    sequence: &'a SegmentSequence,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.sequence.get(self.cursor?)?;
        self.cursor = node.next;
        Some(node)
    }
}

impl<'a> IntoIterator for &'a SegmentSequence {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
