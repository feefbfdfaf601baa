use once_cell::sync::Lazy;

pub mod config;
pub mod contiguity;
pub mod error;
pub mod harness;
pub mod kernel;
pub mod node;
pub mod node_allocator;
pub mod roi;
pub mod sequence;
pub mod timer;

pub use config::{Args, Layout, Mode, RunConfig};
pub use error::BenchError;
pub use harness::{Report, run};

/// Alignment for cache lines (typically 64 bytes on modern CPUs)
pub(crate) static CACHE_LINE_SIZE: Lazy<usize> = Lazy::new(|| {
    // Try data cache first (the traversal only reads data)
    cache_size::cache_line_size(1, cache_size::CacheType::Data)
        // Fall back to unified cache if data cache info isn't available
        .or_else(|| cache_size::cache_line_size(1, cache_size::CacheType::Unified))
        .or_else(|| cache_size::cache_line_size(2, cache_size::CacheType::Data))
        .or_else(|| cache_size::cache_line_size(2, cache_size::CacheType::Unified))
        .filter(|size| size.is_power_of_two())
        // Default to 64 bytes if all detection fails
        .unwrap_or(64)
});
