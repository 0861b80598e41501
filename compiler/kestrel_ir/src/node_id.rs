//! Node IDs and ranges for the flat node arena.
//!
//! Children are stored as `NodeId(u32)` indices instead of boxes, so the
//! tree can carry a non-owning parent column without reference cycles.
//! Ordered child sequences are `NodeRange`s into the arena's flat id list.

use std::fmt;

/// Index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel for absent optional children and missing parents).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// `None` for the sentinel, `Some(self)` otherwise.
    #[inline]
    pub const fn to_option(self) -> Option<NodeId> {
        if self.is_valid() {
            Some(self)
        } else {
            None
        }
    }

    /// Inverse of [`to_option`](Self::to_option).
    #[inline]
    pub fn from_option(id: Option<NodeId>) -> NodeId {
        id.unwrap_or(NodeId::INVALID)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Range of node ids in the arena's flattened list storage.
///
/// Uses (start: u32, len: u16); lists longer than `u16::MAX` are rejected
/// at allocation time.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct NodeRange {
    pub start: u32,
    pub len: u16,
}

impl NodeRange {
    pub const EMPTY: NodeRange = NodeRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        NodeRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Iterator over list-storage indices in this range.
    #[inline]
    pub fn indices(&self) -> impl Iterator<Item = u32> {
        self.start..(self.start + u32::from(self.len))
    }
}

impl fmt::Debug for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NodeRange({}..{})",
            self.start,
            self.start + u32::from(self.len)
        )
    }
}

impl Default for NodeRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Index into a function's local-variable storage.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct LocalSlot(u32);

impl LocalSlot {
    #[inline]
    pub const fn new(index: u32) -> Self {
        LocalSlot(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{NodeId, NodeRange};
    crate::static_assert_size!(NodeId, 4);
    crate::static_assert_size!(NodeRange, 8);
}
