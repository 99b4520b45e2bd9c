//! Error types for the runtime's allocation and string primitives.
//!
//! The C ABI collapses all of these into a null return; the Rust API keeps
//! the cause.

use derive_more::{Display, Error, From};

pub type AllocResult<T> = Result<T, AllocError>;

/// The managed heap could not satisfy a request.
#[derive(Display, Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    #[display("allocation of {requested} bytes exceeds the maximum object size")]
    TooLarge { requested: usize },

    #[display("managed heap exhausted while allocating {requested} bytes")]
    Exhausted { requested: usize },
}

impl AllocError {
    /// Size of the request that failed.
    pub fn requested(&self) -> usize {
        match *self {
            AllocError::TooLarge { requested } | AllocError::Exhausted { requested } => requested,
        }
    }
}

/// Failure of [`concatenate`](crate::concatenate).
#[derive(Display, Debug, Error, From, Clone, Copy, PartialEq, Eq)]
pub enum ConcatError {
    /// One of the operands was absent. No allocation was attempted.
    #[display("cannot concatenate a null string")]
    NullOperand,

    #[display("{_0}")]
    #[from]
    Alloc(AllocError),
}

/// Returned by [`configure_heap`](crate::configure_heap) once the heap has started.
#[derive(Display, Debug, Error, Clone, Copy, PartialEq, Eq)]
#[display("managed heap is already initialized")]
pub struct AlreadyInitialized;
