use std::{
    alloc::{Layout, alloc, dealloc},
    ptr::NonNull,
};

use crate::{CACHE_LINE_SIZE, error::BenchError, node::Node};

/// Allocate a single node holding `value` and linking to `next`
pub(crate) fn allocate(value: i32, next: Option<NonNull<Node>>) -> Result<NonNull<Node>, BenchError> {
    let layout = Layout::new::<Node>();

    let ptr = unsafe { alloc(layout) as *mut Node };
    let node = NonNull::new(ptr).ok_or(BenchError::Alloc {
        bytes: layout.size(),
    })?;

    unsafe { node.as_ptr().write(Node { value, next }) };

    Ok(node)
}

/// Free a node returned by [`allocate`].
///
/// # Safety
/// `node` must come from [`allocate`] and not have been freed.
pub(crate) unsafe fn deallocate(node: NonNull<Node>) {
    unsafe { dealloc(node.as_ptr() as *mut u8, Layout::new::<Node>()) }
}

/// Layout of `len` nodes packed back to back, the base aligned to a cache line
pub(crate) fn block_layout(len: usize) -> Result<Layout, BenchError> {
    let layout = Layout::array::<Node>(len)?.align_to(*CACHE_LINE_SIZE)?;
    Ok(layout)
}

/// Allocate uninitialised storage for `len` nodes in one request
pub(crate) fn allocate_block(len: usize) -> Result<NonNull<Node>, BenchError> {
    let layout = block_layout(len)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }

    let ptr = unsafe { alloc(layout) as *mut Node };
    NonNull::new(ptr).ok_or(BenchError::Alloc {
        bytes: layout.size(),
    })
}

/// Free storage returned by [`allocate_block`].
///
/// # Safety
/// `base` must come from [`allocate_block`] called with the same `len`.
pub(crate) unsafe fn deallocate_block(base: NonNull<Node>, len: usize) {
    let Ok(layout) = block_layout(len) else {
        return;
    };
    if layout.size() == 0 {
        return;
    }
    unsafe { dealloc(base.as_ptr() as *mut u8, layout) }
}
