use std::ptr;

use crate::sequence::Chain;

/// Result of one pass over a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    pub sum: i64,
    /// Elements visited
    pub steps: usize,
}

/// Follow the links of `chain` from head to tail once, summing the values.
///
/// The next cursor is resolved only after the current element is loaded, so
/// each link resolution sits on the critical path. The accumulator is
/// volatile so the loop cannot be folded or elided.
#[inline(never)]
pub fn traverse<C: Chain>(chain: &C) -> Traversal {
    let mut sum: i64 = 0;
    let acc = &raw mut sum;
    let mut steps = 0usize;

    let mut cur = chain.head();
    while let Some(at) = cur {
        // SAFETY: acc points at a live local
        unsafe { ptr::write_volatile(acc, ptr::read_volatile(acc) + i64::from(chain.value(at))) };
        steps += 1;
        cur = chain.next(at);
    }

    Traversal {
        sum: unsafe { ptr::read_volatile(acc) },
        steps,
    }
}

/// Closed-form checksum for `n` elements with values `i mod 1024`
pub fn expected_sum(n: usize) -> i64 {
    let full = (n / 1024) as i64;
    let rest = (n % 1024) as i64;
    full * (1024 * 1023 / 2) + rest * (rest - 1).max(0) / 2
}
