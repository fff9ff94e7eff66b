#![allow(dead_code)]
//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// Handle for a registered page element (reveal target, lazy image, preloader).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Handle for one gallery item in the append-ordered sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Monotonic allocator for TargetId and ItemId.
/// IDs are opaque externally; hosts map them to their own element handles.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_target: u32,
    next_item: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_target(&mut self) -> TargetId {
        let id = TargetId(self.next_target);
        self.next_target = self.next_target.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_item(&mut self) -> ItemId {
        let id = ItemId(self.next_item);
        self.next_item = self.next_item.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_target(), TargetId(0));
        assert_eq!(alloc.alloc_target(), TargetId(1));
        assert_eq!(alloc.alloc_item(), ItemId(0));
        assert_eq!(alloc.alloc_item(), ItemId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_target(), TargetId(0));
    }
}
