//! Handles to memory owned by a [`ManagedHeap`].
//!
//! Neither handle frees anything when dropped. The `'heap` lifetime ties a
//! handle to the heap it came from; handles from the process-wide heap are
//! `'static`.

use std::ffi::{CStr, c_char};
use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;
use std::str::Utf8Error;

use crate::heap::ManagedHeap;

/// A freshly allocated, writable region of a managed heap.
///
/// The contents start out uninitialized.
pub struct ManagedBuffer<'heap> {
    ptr: NonNull<u8>,
    len: usize,
    _heap: PhantomData<&'heap ManagedHeap>,
}

// SAFETY: the buffer is the only handle to its region until it is converted
// into something else, so moving it to another thread cannot alias.
unsafe impl Send for ManagedBuffer<'_> {}

impl<'heap> ManagedBuffer<'heap> {
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` bytes for `'heap`, and
    /// no other handle may refer to that region.
    pub(crate) unsafe fn from_raw_parts(ptr: NonNull<u8>, len: usize) -> Self {
        Self {
            ptr,
            len,
            _heap: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn as_uninit_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        // SAFETY: `from_raw_parts` guarantees `len` writable bytes, and
        // `MaybeUninit<u8>` has no validity requirement.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.len) }
    }

    /// Fill the whole buffer from `bytes` and return it as initialized memory.
    ///
    /// Returns `None` when the lengths differ.
    pub fn fill_from(mut self, bytes: &[u8]) -> Option<&'heap mut [u8]> {
        if bytes.len() != self.len {
            return None;
        }
        for (slot, &byte) in self.as_uninit_mut().iter_mut().zip(bytes) {
            slot.write(byte);
        }
        // SAFETY: every byte was written above, and `self` is consumed so no
        // other handle to the region remains.
        Some(unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) })
    }

    /// Give up the handle and return the raw address, as the C ABI does.
    pub fn into_raw(self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// # Safety
    ///
    /// The buffer must hold a NUL byte at `len - 1`, initialized bytes before
    /// it, and no other NUL.
    pub(crate) unsafe fn into_managed_str(self) -> ManagedStr<'heap> {
        debug_assert!(self.len > 0);
        ManagedStr {
            ptr: self.ptr,
            len: self.len - 1,
            _heap: PhantomData,
        }
    }
}

impl fmt::Debug for ManagedBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedBuffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

/// An immutable NUL-terminated string living in a managed heap.
///
/// `len()` counts the bytes before the terminator.
#[derive(Clone, Copy)]
pub struct ManagedStr<'heap> {
    ptr: NonNull<u8>,
    len: usize,
    _heap: PhantomData<&'heap ManagedHeap>,
}

// SAFETY: the bytes are never written again once a `ManagedStr` exists, and
// the heap keeps them alive for `'heap`.
unsafe impl Send for ManagedStr<'_> {}
unsafe impl Sync for ManagedStr<'_> {}

impl<'heap> ManagedStr<'heap> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &'heap [u8] {
        // SAFETY: see `into_managed_str`; the first `len` bytes are initialized.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_bytes_with_nul(&self) -> &'heap [u8] {
        // SAFETY: the terminator at `len` is initialized too.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len + 1) }
    }

    pub fn as_c_str(&self) -> &'heap CStr {
        // SAFETY: exactly one NUL, at the end.
        unsafe { CStr::from_bytes_with_nul_unchecked(self.as_bytes_with_nul()) }
    }

    pub fn to_str(&self) -> Result<&'heap str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    pub fn as_ptr(&self) -> *const c_char {
        self.ptr.as_ptr().cast()
    }

    pub fn into_raw(self) -> *mut c_char {
        self.ptr.as_ptr().cast()
    }
}

impl AsRef<CStr> for ManagedStr<'_> {
    fn as_ref(&self) -> &CStr {
        self.as_c_str()
    }
}

impl PartialEq for ManagedStr<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ManagedStr<'_> {}

impl PartialEq<[u8]> for ManagedStr<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<str> for ManagedStr<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for ManagedStr<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Display for ManagedStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for ManagedStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_c_str(), f)
    }
}

#[cfg(test)]
mod tests {
    use crate::heap::ManagedHeap;

    #[test]
    fn test_fill_from_initializes_buffer() {
        let heap = ManagedHeap::default();
        let buffer = heap.allocate(5).unwrap();
        let bytes = buffer.fill_from(b"hello").unwrap();
        assert_eq!(bytes, b"hello");
        bytes[0] = b'j';
        assert_eq!(bytes, b"jello");
    }

    #[test]
    fn test_fill_from_rejects_length_mismatch() {
        let heap = ManagedHeap::default();
        let buffer = heap.allocate(4).unwrap();
        assert!(buffer.fill_from(b"hello").is_none());
    }

    #[test]
    fn test_managed_str_views() {
        let heap = ManagedHeap::default();
        let mut buffer = heap.allocate(4).unwrap();
        for (slot, &byte) in buffer.as_uninit_mut().iter_mut().zip(b"cat\0") {
            slot.write(byte);
        }
        let s = unsafe { buffer.into_managed_str() };
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.as_bytes(), b"cat");
        assert_eq!(s.as_bytes_with_nul(), b"cat\0");
        assert_eq!(s.as_c_str(), c"cat");
        assert_eq!(s.to_str(), Ok("cat"));
        assert_eq!(s, "cat");
        assert_eq!(s.to_string(), "cat");
        assert_eq!(format!("{s:?}"), "\"cat\"");
    }

    #[test]
    fn test_into_raw_keeps_address() {
        let heap = ManagedHeap::default();
        let buffer = heap.allocate(8).unwrap();
        let addr = buffer.as_ptr();
        assert_eq!(buffer.into_raw() as *const u8, addr);
    }
}
