//! Arena-backed managed heap.
//!
//! Memory handed out by a [`ManagedHeap`] is never freed individually. The
//! arena keeps every allocation alive until the heap itself is dropped, which
//! for the process-wide heap means process exit. Callers therefore never
//! release what they allocate.

use std::alloc::Layout;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bumpalo::Bump;

use crate::buffer::ManagedBuffer;
use crate::config::HeapConfig;
use crate::error::{AllocError, AllocResult};

/// Alignment of every allocation. Matches what `malloc` guarantees on 64-bit targets.
pub const ALLOCATION_ALIGN: usize = 16;

/// Allocation counters for a heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Successful allocations.
    pub allocations: u64,
    /// Sum of the sizes passed to successful allocations.
    pub bytes_requested: u64,
    /// Allocations refused by the arena.
    pub failures: u64,
    /// Bytes the arena has reserved from the system, including slack.
    pub bytes_reserved: usize,
}

struct Arena {
    bump: Bump,
    stats: HeapStats,
}

/// A heap of collector-style memory: allocate and forget.
pub struct ManagedHeap {
    arena: Mutex<Arena>,
    config: HeapConfig,
}

impl ManagedHeap {
    /// Create a heap, reserving the initial capacity up front.
    ///
    /// The up-front chunk counts against the limit like any other. If it
    /// would exceed the limit, the heap starts empty instead.
    pub fn new(config: HeapConfig) -> Self {
        let mut bump = if config.initial_capacity == 0 {
            Bump::new()
        } else {
            Bump::try_with_capacity(config.initial_capacity).unwrap_or_else(|_| {
                tracing::warn!(
                    initial_capacity = config.initial_capacity,
                    "could not reserve initial heap capacity; starting empty"
                );
                Bump::new()
            })
        };
        if let Some(limit) = config.limit {
            if bump.allocated_bytes() > limit {
                tracing::warn!(
                    initial_capacity = config.initial_capacity,
                    limit,
                    "initial heap capacity exceeds the limit; starting empty"
                );
                bump = Bump::new();
            }
        }
        bump.set_allocation_limit(config.limit);

        Self {
            arena: Mutex::new(Arena {
                bump,
                stats: HeapStats::default(),
            }),
            config,
        }
    }

    pub fn config(&self) -> HeapConfig {
        self.config
    }

    /// Allocate `size` bytes of uninitialized memory.
    ///
    /// A zero-sized request succeeds and still yields a distinct address.
    pub fn allocate(&self, size: usize) -> AllocResult<ManagedBuffer<'_>> {
        let Ok(layout) = Layout::from_size_align(size.max(1), ALLOCATION_ALIGN) else {
            return Err(self.refuse(AllocError::TooLarge { requested: size }));
        };

        let allocated = {
            let mut arena = self.lock();
            let allocated = arena.bump.try_alloc_layout(layout);
            if allocated.is_ok() {
                arena.stats.allocations += 1;
                arena.stats.bytes_requested += size as u64;
            }
            allocated
        };
        let Ok(ptr) = allocated else {
            return Err(self.refuse(AllocError::Exhausted { requested: size }));
        };

        // SAFETY: the arena handed out `size.max(1)` bytes at `ptr`, and they
        // stay reserved for as long as `self` is alive.
        Ok(unsafe { ManagedBuffer::from_raw_parts(ptr, size) })
    }

    pub fn stats(&self) -> HeapStats {
        let arena = self.lock();
        HeapStats {
            bytes_reserved: arena.bump.allocated_bytes(),
            ..arena.stats
        }
    }

    fn refuse(&self, error: AllocError) -> AllocError {
        self.lock().stats.failures += 1;
        tracing::trace!(requested = error.requested(), %error, "allocation refused");
        error
    }

    fn lock(&self) -> MutexGuard<'_, Arena> {
        // The arena holds no invariants a panicking holder could break.
        self.arena.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManagedHeap {
    fn default() -> Self {
        Self::new(HeapConfig::default())
    }
}

impl fmt::Debug for ManagedHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedHeap")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}
