//! Fixed-size slot arena with a dense tag column.
//!
//! The arena is allocated once with exactly `capacity` slots and never grows
//! or shrinks. Slots are recycled in place: eviction detaches a slot's aliases
//! and value but keeps the cell itself, so a [`SlotId`] stays valid for the
//! whole life of the cache.
//!
//! ## Layout
//!
//! ```text
//!   tags:  [ i64 | i64 | i64 | i64 ]     ← strategies only ever see this column
//!   slots: [ S0  | S1  | S2  | S3  ]     ← aliases + value, owned by the cache
//!            │
//!            ▼
//!          Slot { aliases: ["user:1", "session:9"], value: Some(Arc<V>) }
//! ```
//!
//! Tags live apart from the slots so eviction scans (LRU, timed expiry) walk a
//! contiguous `i64` array.
//!
//! A slot is *free* iff it has no aliases and no value. [`SlotArena::bind`]
//! is the only way to make a slot occupied, and it requires a non-empty alias
//! set.

use std::sync::Arc;

/// Stable index of a slot inside a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Creates a slot id for `index`.
    ///
    /// Custom strategies use this to name their victim. The index must be
    /// below the arena capacity.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One storage cell: the alias keys bound to it and the shared value.
#[derive(Debug)]
pub struct Slot<K, V> {
    aliases: Vec<K>,
    value: Option<Arc<V>>,
}

impl<K, V> Slot<K, V> {
    fn free() -> Self {
        Self {
            aliases: Vec::new(),
            value: None,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.value.is_none()
    }

    #[inline]
    pub fn aliases(&self) -> &[K] {
        &self.aliases
    }

    #[inline]
    pub fn value(&self) -> Option<&Arc<V>> {
        self.value.as_ref()
    }
}

/// Pre-allocated array of slots plus their strategy tags.
#[derive(Debug)]
pub struct SlotArena<K, V> {
    tags: Vec<i64>,
    slots: Vec<Slot<K, V>>,
    occupied: usize,
}

impl<K, V> SlotArena<K, V> {
    /// Allocates `capacity` free slots with zeroed tags.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::free);
        Self {
            tags: vec![0; capacity],
            slots,
            occupied: 0,
        }
    }

    /// Number of slots (fixed at construction).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    #[inline]
    pub fn get(&self, id: SlotId) -> &Slot<K, V> {
        &self.slots[id.0]
    }

    #[inline]
    pub fn is_free(&self, id: SlotId) -> bool {
        self.slots[id.0].is_free()
    }

    #[inline]
    pub fn value(&self, id: SlotId) -> Option<&Arc<V>> {
        self.slots[id.0].value.as_ref()
    }

    #[inline]
    pub fn tag(&self, id: SlotId) -> i64 {
        self.tags[id.0]
    }

    #[inline]
    pub fn tag_mut(&mut self, id: SlotId) -> &mut i64 {
        &mut self.tags[id.0]
    }

    #[inline]
    pub fn tags(&self) -> &[i64] {
        &self.tags
    }

    #[inline]
    pub fn tags_mut(&mut self) -> &mut [i64] {
        &mut self.tags
    }

    /// Binds `value` under `aliases` into a free slot.
    ///
    /// The slot must have been soft- or full-reset first and `aliases` must be
    /// non-empty.
    pub fn bind(&mut self, id: SlotId, value: Arc<V>, aliases: Vec<K>) {
        debug_assert!(!aliases.is_empty(), "bind requires at least one alias");
        let slot = &mut self.slots[id.0];
        debug_assert!(slot.is_free(), "bind into occupied slot {}", id.0);
        slot.aliases = aliases;
        slot.value = Some(value);
        self.occupied += 1;
    }

    /// Clears aliases and value, keeping the tag.
    ///
    /// Returns the detached aliases and value so the caller can unindex them.
    /// Resetting a free slot returns an empty alias list and `None`.
    pub fn soft_reset(&mut self, id: SlotId) -> (Vec<K>, Option<Arc<V>>) {
        let slot = &mut self.slots[id.0];
        let aliases = std::mem::take(&mut slot.aliases);
        let value = slot.value.take();
        if value.is_some() {
            self.occupied -= 1;
        }
        (aliases, value)
    }

    /// Clears tag, aliases and value.
    pub fn full_reset(&mut self, id: SlotId) {
        self.soft_reset(id);
        self.tags[id.0] = 0;
    }

    /// Full-resets every slot.
    pub fn reset_all(&mut self) {
        for slot in &mut self.slots {
            slot.aliases.clear();
            slot.value = None;
        }
        self.tags.fill(0);
        self.occupied = 0;
    }

    /// Iterates all slots in array order, free ones included.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Slot<K, V>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| (SlotId(idx), slot))
    }

    /// Iterates occupied slots with their values.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (SlotId, &Arc<V>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.value.as_ref().map(|value| (SlotId(idx), value)))
    }
}
