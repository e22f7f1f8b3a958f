//! Threaded tree node representation
//!
//! One storage slot per side, overloaded:
//!   `Child(id)`   real structural edge (owned through the arena)
//!   `Thread(id)`  predecessor (left) or successor (right) in the threaded order
//!   `Absent`      no child and no thread
//!
//! The tag is derived from the link, so a thread can never be mistaken for a child.

use std::fmt;

/// Node label, assigned once at construction
pub type Label = u32;

/// Handle to a node inside a [`super::ThreadedTree`]
///
/// Carries the epoch of the build that created it; handles from an earlier
/// build or from another tree are rejected instead of aliasing a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeId {
    slot: usize,
    epoch: u64,
}

impl NodeId {
    pub(crate) fn new(slot: usize, epoch: u64) -> Self {
        Self { slot, epoch }
    }

    /// Arena slot (construction order, 0-based)
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[inline]
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot)
    }
}

/// Which slot of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Side {
    /// Left child / predecessor thread
    Left,

    /// Right child / successor thread
    Right,
}

impl Side {
    /// Both sides, left first
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// The other side
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Discriminant of a side: real child or traversal thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Tag {
    /// Real structural edge (or no edge at all)
    Child,

    /// Predecessor/successor link
    Thread,
}

/// Content of one side of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Link {
    /// Nothing on this side
    #[default]
    Absent,

    /// Real child
    Child(NodeId),

    /// Thread; `None` when the order has no neighbour in this direction
    Thread(Option<NodeId>),
}

impl Link {
    /// Tag of this link; `Absent` reads as `Child` ("no child")
    #[inline]
    pub fn tag(&self) -> Tag {
        match self {
            Link::Thread(_) => Tag::Thread,
            Link::Absent | Link::Child(_) => Tag::Child,
        }
    }

    /// Real child, if any
    #[inline]
    pub fn child(&self) -> Option<NodeId> {
        match *self {
            Link::Child(id) => Some(id),
            _ => None,
        }
    }

    /// Thread target, if this is a non-null thread
    #[inline]
    pub fn thread_target(&self) -> Option<NodeId> {
        match *self {
            Link::Thread(target) => target,
            _ => None,
        }
    }

    /// Whatever node this side points at, child or thread
    #[inline]
    pub fn target(&self) -> Option<NodeId> {
        match *self {
            Link::Absent => None,
            Link::Child(id) => Some(id),
            Link::Thread(target) => target,
        }
    }

    /// True if the slot holds nothing at all (no child, no thread target)
    #[inline]
    pub fn is_null(&self) -> bool {
        self.target().is_none()
    }
}

/// Tree vertex with two tagged sides and a structural back-reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadedNode {
    value: Label,
    left: Link,
    right: Link,
    parent: Option<NodeId>,
}

impl ThreadedNode {
    pub(crate) fn new(value: Label, parent: Option<NodeId>) -> Self {
        Self {
            value,
            left: Link::Absent,
            right: Link::Absent,
            parent,
        }
    }

    /// Label of this node
    #[inline]
    pub fn value(&self) -> Label {
        self.value
    }

    /// Nearest ancestor along a Child edge
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Raw content of one side
    #[inline]
    pub fn link(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Tag of one side
    #[inline]
    pub fn tag(&self, side: Side) -> Tag {
        self.link(side).tag()
    }

    /// Real child on one side
    #[inline]
    pub fn child(&self, side: Side) -> Option<NodeId> {
        self.link(side).child()
    }

    /// Thread target on one side
    #[inline]
    pub fn thread(&self, side: Side) -> Option<NodeId> {
        self.link(side).thread_target()
    }

    /// Real, non-null child on this side
    #[inline]
    pub fn has_child(&self, side: Side) -> bool {
        self.child(side).is_some()
    }

    /// Thread-tagged side with a non-null target
    #[inline]
    pub fn has_thread(&self, side: Side) -> bool {
        self.thread(side).is_some()
    }

    /// No real child on either side; threads never count as children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.has_child(Side::Left) && !self.has_child(Side::Right)
    }

    pub(crate) fn set_link(&mut self, side: Side, link: Link) {
        match side {
            Side::Left => self.left = link,
            Side::Right => self.right = link,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Tag the side as a thread; parent is left alone
    pub(crate) fn set_thread(&mut self, side: Side, target: Option<NodeId>) {
        self.set_link(side, Link::Thread(target));
    }

    /// Thread on this side becomes "no child"; a real child is kept
    pub(crate) fn clear_thread(&mut self, side: Side) {
        if self.tag(side) == Tag::Thread {
            self.set_link(side, Link::Absent);
        }
    }
}
