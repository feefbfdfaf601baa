use std::mem::MaybeUninit;
use std::ptr::NonNull;

/// Heap list node, shared by the per-node and single-block layouts
#[repr(C)]
pub struct Node {
    pub(crate) value: i32,
    // None marks the tail
    pub(crate) next: Option<NonNull<Node>>,
}

/// Stack list node; `next` is an offset into the owning array
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexNode {
    pub(crate) value: i32,
    pub(crate) next: i32,
}

impl IndexNode {
    /// Link value terminating the chain
    pub const END: i32 = -1;

    /// Unwritten slot of a backing array; only the first N slots are ever
    /// initialised
    pub const VACANT: MaybeUninit<IndexNode> = MaybeUninit::uninit();
}

/// Deterministic element value for logical index `i`
#[inline]
pub fn value_at(i: usize) -> i32 {
    (i % 1024) as i32
}
