//! Sequence construction for each memory layout.
//!
//! Every layout exposes the same link-resolution capability through [`Chain`],
//! so the traversal kernel and the contiguity analyzer are written once.
//! Values always follow [`value_at`], making the checksum independent of the
//! layout.

use std::mem::{MaybeUninit, size_of};
use std::ptr::NonNull;

use tracing::debug;

use crate::{
    config::Layout,
    error::BenchError,
    node::{IndexNode, Node, value_at},
    node_allocator,
};

/// Uniform link resolution over a built sequence
pub trait Chain {
    /// Opaque handle to one element, valid while the sequence is borrowed
    type Cursor<'a>: Copy
    where
        Self: 'a;

    /// First element in logical order
    fn head(&self) -> Option<Self::Cursor<'_>>;

    fn value<'a>(&'a self, at: Self::Cursor<'a>) -> i32;

    /// Logical successor, `None` at the terminal element
    fn next<'a>(&'a self, at: Self::Cursor<'a>) -> Option<Self::Cursor<'a>>;

    /// Storage location of an element, comparable with other locations of the
    /// same sequence
    fn location<'a>(&'a self, at: Self::Cursor<'a>) -> usize;

    /// Storage taken by one element
    fn unit_size(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flat array; the successor is the next slot
pub struct ArraySeq {
    values: Vec<i32>,
}

impl ArraySeq {
    pub fn build(n: usize) -> Result<Self, BenchError> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(n)
            .map_err(|_| BenchError::Alloc {
                bytes: n.saturating_mul(size_of::<i32>()),
            })?;
        values.extend((0..n).map(value_at));

        debug!(n, "built array sequence");
        Ok(ArraySeq { values })
    }
}

impl Chain for ArraySeq {
    type Cursor<'a> = usize;

    fn head(&self) -> Option<usize> {
        (!self.values.is_empty()).then_some(0)
    }

    #[inline]
    fn value(&self, at: usize) -> i32 {
        self.values[at]
    }

    #[inline]
    fn next(&self, at: usize) -> Option<usize> {
        let next = at + 1;
        (next < self.values.len()).then_some(next)
    }

    fn location(&self, at: usize) -> usize {
        &self.values[at] as *const i32 as usize
    }

    fn unit_size(&self) -> usize {
        size_of::<i32>()
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

/// Linked list with one heap allocation per node.
///
/// Nodes are allocated tail first, so allocation order is the reverse of
/// logical order.
pub struct HeapList {
    head: Option<NonNull<Node>>,
    len: usize,
}

impl HeapList {
    pub fn build(n: usize) -> Result<Self, BenchError> {
        // Dropping a partially built list frees what was allocated so far
        let mut list = HeapList { head: None, len: 0 };

        for i in (0..n).rev() {
            list.push_front(value_at(i))?;
        }

        debug!(n, "built per-node heap list");
        Ok(list)
    }

    /// Allocate a new head node in front of the current one
    fn push_front(&mut self, value: i32) -> Result<(), BenchError> {
        let node = node_allocator::allocate(value, self.head)?;
        self.head = Some(node);
        self.len += 1;
        Ok(())
    }
}

impl Drop for HeapList {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(node) = cur {
            // SAFETY: every reachable node came from node_allocator::allocate
            // and is owned solely by this list.
            unsafe {
                cur = node.as_ref().next;
                node_allocator::deallocate(node);
            }
        }
    }
}

impl Chain for HeapList {
    type Cursor<'a> = &'a Node;

    fn head(&self) -> Option<&Node> {
        // SAFETY: nodes live until the list is dropped, which the borrow forbids
        self.head.map(|node| unsafe { node.as_ref() })
    }

    #[inline]
    fn value<'a>(&'a self, at: &'a Node) -> i32 {
        at.value
    }

    #[inline]
    fn next<'a>(&'a self, at: &'a Node) -> Option<&'a Node> {
        at.next.map(|node| unsafe { node.as_ref() })
    }

    fn location<'a>(&'a self, at: &'a Node) -> usize {
        at as *const Node as usize
    }

    fn unit_size(&self) -> usize {
        size_of::<Node>()
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Linked list whose nodes all live in one allocation, linked head to tail
pub struct BlockList {
    base: NonNull<Node>,
    len: usize,
}

impl BlockList {
    pub fn build(n: usize) -> Result<Self, BenchError> {
        let base = node_allocator::allocate_block(n)?;

        for i in 0..n {
            // SAFETY: base holds room for n nodes; slots are written exactly
            // once and only link forward to slots inside the block.
            unsafe {
                let next = (i + 1 < n).then(|| base.add(i + 1));
                base.add(i).write(Node {
                    value: value_at(i),
                    next,
                });
            }
        }

        debug!(n, align = *crate::CACHE_LINE_SIZE, "built single-block heap list");
        Ok(BlockList { base, len: n })
    }
}

impl Drop for BlockList {
    fn drop(&mut self) {
        // SAFETY: base came from allocate_block with this len; Node has no drop glue
        unsafe { node_allocator::deallocate_block(self.base, self.len) }
    }
}

impl Chain for BlockList {
    type Cursor<'a> = &'a Node;

    fn head(&self) -> Option<&Node> {
        // SAFETY: slot 0 is initialised whenever len > 0
        (self.len > 0).then(|| unsafe { self.base.as_ref() })
    }

    #[inline]
    fn value<'a>(&'a self, at: &'a Node) -> i32 {
        at.value
    }

    #[inline]
    fn next<'a>(&'a self, at: &'a Node) -> Option<&'a Node> {
        at.next.map(|node| unsafe { node.as_ref() })
    }

    fn location<'a>(&'a self, at: &'a Node) -> usize {
        at as *const Node as usize
    }

    fn unit_size(&self) -> usize {
        size_of::<Node>()
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Index-linked list over caller-provided fixed storage, normally a stack
/// array of [`STACK_CAPACITY`](crate::config::STACK_CAPACITY) nodes
pub struct StackList<'s> {
    nodes: &'s [IndexNode],
}

impl<'s> StackList<'s> {
    /// Link the first `n` slots of `storage`; slots past `n` stay unwritten.
    pub fn build(storage: &'s mut [MaybeUninit<IndexNode>], n: usize) -> Result<Self, BenchError> {
        let max = storage.len().min(i32::MAX as usize);
        if n > max {
            return Err(BenchError::TooLarge {
                layout: Layout::ListStack,
                n: n as i64,
                max,
            });
        }

        let slots = &mut storage[..n];
        for (i, slot) in slots.iter_mut().enumerate() {
            let next = if i + 1 < n {
                (i + 1) as i32
            } else {
                IndexNode::END
            };
            slot.write(IndexNode {
                value: value_at(i),
                next,
            });
        }

        // SAFETY: every one of the n slots was written above
        let nodes = unsafe { std::slice::from_raw_parts(slots.as_ptr().cast::<IndexNode>(), n) };

        debug!(n, "built index-linked stack list");
        Ok(StackList { nodes })
    }
}

impl Chain for StackList<'_> {
    type Cursor<'a>
        = usize
    where
        Self: 'a;

    fn head(&self) -> Option<usize> {
        (!self.nodes.is_empty()).then_some(0)
    }

    #[inline]
    fn value(&self, at: usize) -> i32 {
        self.nodes[at].value
    }

    #[inline]
    fn next(&self, at: usize) -> Option<usize> {
        match self.nodes[at].next {
            IndexNode::END => None,
            next => Some(next as usize),
        }
    }

    fn location(&self, at: usize) -> usize {
        &self.nodes[at] as *const IndexNode as usize
    }

    fn unit_size(&self) -> usize {
        size_of::<IndexNode>()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
