//! Fixed-capacity object pool
//!
//! All instances are created up front. Callers hold [`Handle`]s (indices into
//! the backing store) instead of references, so the active lists never dangle
//! and never borrow the pool across a tick.
//!
//! An exhausted pool is not an error: `acquire` returns `None` and the caller
//! drops whatever it was about to spawn.

use std::ops::{Index, IndexMut};

use serde::Serialize;

use super::entity::{Poolable, Simulated};

/// Stable index of a pooled instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Diagnostic counters, never consulted by the pool itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Instances created at initialization
    pub total_allocated: usize,
    pub current_active: usize,
    pub peak_active: usize,
    pub total_acquired: u64,
    pub total_released: u64,
}

#[derive(Debug, Clone)]
pub struct ObjectPool<T> {
    slots: Vec<T>,
    in_use: Vec<bool>,
    free: Vec<Handle>,
    stats: PoolStats,
}

impl<T: Poolable> ObjectPool<T> {
    /// Pre-allocate `capacity` default instances.
    ///
    /// A zero capacity is a programming error (asserted in debug builds); in
    /// release it yields a pool whose `acquire` always returns `None`.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "pool size must be greater than 0");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, T::default);

        // Reverse so the first acquire hands out index 0
        let free = (0..capacity as u32).rev().map(Handle).collect();

        Self {
            slots,
            in_use: vec![false; capacity],
            free,
            stats: PoolStats {
                total_allocated: capacity,
                ..Default::default()
            },
        }
    }

    /// Take a free instance, or `None` when the pool is exhausted
    #[must_use]
    pub fn acquire(&mut self) -> Option<Handle> {
        let handle = self.free.pop()?;
        self.in_use[handle.index()] = true;

        self.stats.current_active += 1;
        self.stats.total_acquired += 1;
        self.stats.peak_active = self.stats.peak_active.max(self.stats.current_active);

        Some(handle)
    }

    /// Reset the instance and return it to the free list.
    ///
    /// Releasing a handle that is not currently acquired is a no-op.
    pub fn release(&mut self, handle: Handle) {
        if !self.is_acquired(handle) {
            return;
        }
        let idx = handle.index();

        self.slots[idx].reset();
        self.in_use[idx] = false;
        self.free.push(handle);

        self.stats.current_active = self.stats.current_active.saturating_sub(1);
        self.stats.total_released += 1;
    }

    /// Reset every instance and mark all of them free (round restart)
    pub fn release_all(&mut self) {
        self.free.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.reset();
            self.in_use[idx] = false;
            self.free.push(Handle(idx as u32));
        }
        self.stats.current_active = 0;
    }
}

impl<T> ObjectPool<T> {
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.index())
    }

    pub fn is_acquired(&self, handle: Handle) -> bool {
        self.in_use.get(handle.index()).copied().unwrap_or(false)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Fraction of the pool currently handed out
    pub fn usage_ratio(&self) -> f32 {
        if self.stats.total_allocated > 0 {
            self.stats.current_active as f32 / self.stats.total_allocated as f32
        } else {
            0.0
        }
    }
}

impl<T> Index<Handle> for ObjectPool<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &T {
        &self.slots[handle.index()]
    }
}

impl<T> IndexMut<Handle> for ObjectPool<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.slots[handle.index()]
    }
}

/// Drop dead entries from an active list, returning them to `pool`.
///
/// Survivors keep their relative order.
pub fn release_dead<T: Poolable + Simulated>(active: &mut Vec<Handle>, pool: &mut ObjectPool<T>) {
    active.retain(|&handle| {
        if pool[handle].is_alive() {
            true
        } else {
            pool.release(handle);
            false
        }
    });
}
