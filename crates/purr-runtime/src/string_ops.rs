//! String concatenation over managed memory.
//!
//! Operands are NUL-terminated strings owned by the caller. The result is a
//! fresh [`ManagedStr`] that the caller never frees.

use std::ffi::{CStr, c_char};
use std::ptr;

use crate::buffer::ManagedStr;
use crate::error::{AllocError, ConcatError};
use crate::heap::ManagedHeap;
use crate::memory::initialize_heap;

/// Concatenate two strings into the process-wide heap.
///
/// An absent operand is an error, not an empty string. It is detected before
/// the heap is touched.
pub fn concatenate(
    left: Option<&CStr>,
    right: Option<&CStr>,
) -> Result<ManagedStr<'static>, ConcatError> {
    let (Some(left), Some(right)) = (left, right) else {
        return Err(ConcatError::NullOperand);
    };
    concat_bytes(initialize_heap(), left.to_bytes(), right.to_bytes())
}

/// Concatenate two strings into `heap`.
pub fn concatenate_in<'heap>(
    heap: &'heap ManagedHeap,
    left: Option<&CStr>,
    right: Option<&CStr>,
) -> Result<ManagedStr<'heap>, ConcatError> {
    let (Some(left), Some(right)) = (left, right) else {
        return Err(ConcatError::NullOperand);
    };
    concat_bytes(heap, left.to_bytes(), right.to_bytes())
}

fn concat_bytes<'heap>(
    heap: &'heap ManagedHeap,
    left: &[u8],
    right: &[u8],
) -> Result<ManagedStr<'heap>, ConcatError> {
    let total = left
        .len()
        .checked_add(right.len())
        .and_then(|len| len.checked_add(1))
        .ok_or(AllocError::TooLarge {
            requested: usize::MAX,
        })?;

    let mut buffer = heap.allocate(total)?;
    let slots = buffer.as_uninit_mut();
    let (head, rest) = slots.split_at_mut(left.len());
    let (middle, terminator) = rest.split_at_mut(right.len());
    for (slot, &byte) in head.iter_mut().zip(left) {
        slot.write(byte);
    }
    for (slot, &byte) in middle.iter_mut().zip(right) {
        slot.write(byte);
    }
    terminator[0].write(0);

    // SAFETY: every byte is written, the only NUL is the terminator since
    // both operands came from `CStr::to_bytes`.
    Ok(unsafe { buffer.into_managed_str() })
}

/// Concatenate two C strings into a fresh managed string.
///
/// Returns null if either operand is null or the heap is exhausted.
///
/// # Safety
///
/// Each non-null argument must point to a NUL-terminated string that stays
/// valid and unmodified for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __purr_strcat(left: *const c_char, right: *const c_char) -> *mut c_char {
    let left = (!left.is_null()).then(|| unsafe { CStr::from_ptr(left) });
    let right = (!right.is_null()).then(|| unsafe { CStr::from_ptr(right) });
    concatenate(left, right).map_or(ptr::null_mut(), ManagedStr::into_raw)
}
