//! Fixed-capacity binary min-heap over `(id, priority)` pairs.
//!
//! Unlike [`std::collections::BinaryHeap`], [`MinHeap`] knows where every id
//! sits, so a queued entry's priority can be lowered in place
//! ([`MinHeap::decrease_key`]). Ids must be smaller than the capacity.

use std::fmt;

use crate::GraphError;

const NOT_QUEUED: usize = usize::MAX;

/// Array-backed binary min-heap keyed by `f64` priority.
#[derive(Debug, Clone)]
pub struct MinHeap {
    ids: Vec<usize>,
    priorities: Vec<f64>,
    /// Heap slot of each id, or `NOT_QUEUED`.
    slots: Vec<usize>,
}

impl MinHeap {
    /// Create an empty heap able to hold ids `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            priorities: Vec::with_capacity(capacity),
            slots: vec![NOT_QUEUED; capacity],
        }
    }

    /// Maximum number of entries, and the exclusive upper bound on ids.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `id` is currently queued.
    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.slots.get(id).is_some_and(|&s| s != NOT_QUEUED)
    }

    /// Queued priority of `id`.
    pub fn priority(&self, id: usize) -> Option<f64> {
        let slot = *self.slots.get(id)?;
        (slot != NOT_QUEUED).then(|| self.priorities[slot])
    }

    /// Lowest-priority entry without removing it.
    pub fn peek(&self) -> Option<(usize, f64)> {
        Some((*self.ids.first()?, self.priorities[0]))
    }

    /// Insert `id` with `priority`.
    ///
    /// Fails if `id` is out of range or already queued. Since every queued id
    /// is distinct and below the capacity, a valid push never overflows.
    pub fn push(&mut self, id: usize, priority: f64) -> Result<(), GraphError> {
        let capacity = self.capacity();
        if id >= capacity {
            return Err(GraphError::QueueId { id, capacity });
        }
        if self.slots[id] != NOT_QUEUED {
            return Err(GraphError::AlreadyQueued(id));
        }
        let slot = self.ids.len();
        self.ids.push(id);
        self.priorities.push(priority);
        self.slots[id] = slot;
        self.sift_up(slot);
        Ok(())
    }

    /// Remove and return the id with the lowest priority.
    pub fn pop(&mut self) -> Option<usize> {
        if self.ids.is_empty() {
            return None;
        }
        let last = self.ids.len() - 1;
        self.swap(0, last);
        let id = self.ids.pop()?;
        self.priorities.pop();
        self.slots[id] = NOT_QUEUED;
        if !self.ids.is_empty() {
            self.sift_down(0);
        }
        Some(id)
    }

    /// Lower the priority of a queued `id`. Returns `false` if `id` is not
    /// queued or `priority` is not strictly lower than the current one.
    pub fn decrease_key(&mut self, id: usize, priority: f64) -> bool {
        let Some(&slot) = self.slots.get(id) else {
            return false;
        };
        if slot == NOT_QUEUED || priority >= self.priorities[slot] {
            return false;
        }
        self.priorities[slot] = priority;
        self.sift_up(slot);
        true
    }

    /// Remove every entry, keeping the capacity.
    pub fn clear(&mut self) {
        for &id in &self.ids {
            self.slots[id] = NOT_QUEUED;
        }
        self.ids.clear();
        self.priorities.clear();
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.priorities[slot] < self.priorities[parent] {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.ids.len();
        loop {
            let left = slot * 2 + 1;
            let right = left + 1;
            let mut min = slot;
            if left < len && self.priorities[left] < self.priorities[min] {
                min = left;
            }
            if right < len && self.priorities[right] < self.priorities[min] {
                min = right;
            }
            if min == slot {
                return;
            }
            self.swap(slot, min);
            slot = min;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.ids.swap(a, b);
        self.priorities.swap(a, b);
        self.slots[self.ids[a]] = a;
        self.slots[self.ids[b]] = b;
    }
}

impl fmt::Display for MinHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (id, p)) in self.ids.iter().zip(&self.priorities).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{id}:{p}")?;
        }
        write!(f, "]")
    }
}
