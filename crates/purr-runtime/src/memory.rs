//! Process-wide heap and the allocation entry points.
//!
//! The heap starts lazily on the first allocation or explicit initialization
//! and lives until the process exits. Compiled Purrgram code reaches it
//! through [`__purr_alloc`].

use std::ptr;
use std::sync::OnceLock;

use crate::buffer::ManagedBuffer;
use crate::config::HeapConfig;
use crate::error::{AllocResult, AlreadyInitialized};
use crate::heap::ManagedHeap;

static HEAP: OnceLock<ManagedHeap> = OnceLock::new();

/// Whether the process-wide heap has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapState {
    Uninitialized,
    Ready,
}

/// Start the process-wide heap if needed and return it.
///
/// Safe to call any number of times from any thread; only the first call
/// builds the heap, using [`HeapConfig::from_env`].
pub fn initialize_heap() -> &'static ManagedHeap {
    HEAP.get_or_init(|| start_heap(HeapConfig::from_env()))
}

/// Start the process-wide heap with an explicit configuration.
///
/// Fails without touching the running heap if it has already started.
pub fn configure_heap(config: HeapConfig) -> Result<&'static ManagedHeap, AlreadyInitialized> {
    let mut installed = false;
    let heap = HEAP.get_or_init(|| {
        installed = true;
        start_heap(config)
    });
    if installed { Ok(heap) } else { Err(AlreadyInitialized) }
}

pub fn heap_state() -> HeapState {
    match HEAP.get() {
        Some(_) => HeapState::Ready,
        None => HeapState::Uninitialized,
    }
}

/// Allocate `size` bytes from the process-wide heap.
pub fn allocate(size: usize) -> AllocResult<ManagedBuffer<'static>> {
    initialize_heap().allocate(size)
}

fn start_heap(config: HeapConfig) -> ManagedHeap {
    tracing::debug!(
        initial_capacity = config.initial_capacity,
        limit = ?config.limit,
        "initializing managed heap"
    );
    ManagedHeap::new(config)
}

/// Allocate `size` bytes that are never explicitly freed.
///
/// Returns null when the heap cannot satisfy the request. A zero-sized request
/// returns a valid, non-null address.
#[unsafe(no_mangle)]
pub extern "C" fn __purr_alloc(size: usize) -> *mut u8 {
    allocate(size).map_or(ptr::null_mut(), ManagedBuffer::into_raw)
}
