//! Region-of-interest markers.
//!
//! External simulators and tracers locate these two symbols by name and
//! measure only what runs between them. They carry no state and do nothing
//! when no observer is attached.

use std::sync::atomic::{Ordering, compiler_fence};

/// Opens the region of interest
#[inline(never)]
#[unsafe(no_mangle)]
pub extern "C" fn ptrchase_roi_begin() {
    compiler_fence(Ordering::SeqCst);
    // The distinct asm text keeps the two markers from being merged into one
    // address; without `nomem` it also clobbers memory for the optimizer.
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    unsafe {
        std::arch::asm!("/* ptrchase_roi_begin */", options(nostack, preserves_flags));
    }
}

/// Closes the region of interest
#[inline(never)]
#[unsafe(no_mangle)]
pub extern "C" fn ptrchase_roi_end() {
    compiler_fence(Ordering::SeqCst);
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    unsafe {
        std::arch::asm!("/* ptrchase_roi_end */", options(nostack, preserves_flags));
    }
}

pub fn begin() {
    ptrchase_roi_begin();
}

pub fn end() {
    ptrchase_roi_end();
}
