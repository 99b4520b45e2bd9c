//! Purrgram runtime library.
//!
//! Provides the native support functions that compiled Purrgram programs call:
//! - Allocation from a process-wide managed heap (`__purr_alloc`)
//! - String concatenation into managed memory (`__purr_strcat`)
//!
//! Memory from the managed heap is never freed by the caller. The heap is an
//! arena that starts on first use and is released wholesale at process exit.
//!
//! The same operations are available to Rust callers through [`allocate`] and
//! [`concatenate`], which report failures as typed errors instead of null.

pub mod buffer;
pub mod config;
pub mod error;
pub mod heap;
pub mod memory;
pub mod string_ops;

pub use buffer::{ManagedBuffer, ManagedStr};
pub use config::{ConfigError, HeapConfig};
pub use error::{AllocError, AllocResult, AlreadyInitialized, ConcatError};
pub use heap::{ALLOCATION_ALIGN, HeapStats, ManagedHeap};
pub use memory::{
    HeapState, __purr_alloc, allocate, configure_heap, heap_state, initialize_heap,
};
pub use string_ops::{__purr_strcat, concatenate, concatenate_in};

// =============================================================================
// Symbol names used by compiled modules
//
// The code generator declares `alloc` and `_strcat` as external functions and
// the JIT resolves them by name, so the runtime can export them directly.
// =============================================================================

/// `alloc` and `_strcat`, forwarding to the `__purr_*` entry points.
#[cfg(feature = "libs-abi")]
pub mod libs_abi {
    use std::ffi::c_char;

    #[unsafe(export_name = "alloc")]
    pub extern "C" fn alloc(size: usize) -> *mut u8 {
        crate::memory::__purr_alloc(size)
    }

    /// # Safety
    ///
    /// Same contract as [`__purr_strcat`](crate::__purr_strcat).
    #[unsafe(export_name = "_strcat")]
    pub unsafe extern "C" fn strcat(left: *const c_char, right: *const c_char) -> *mut c_char {
        unsafe { crate::string_ops::__purr_strcat(left, right) }
    }
}
