//! Error types for building and running a layout benchmark

use std::alloc::LayoutError;

use thiserror::Error;

use crate::config::Layout;

/// Errors that end a run. Every variant is fatal; nothing is retried.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("N too large for {layout} layout: {n} > {max}")]
    TooLarge { layout: Layout, n: i64, max: usize },

    #[error("allocation of {bytes} bytes failed")]
    Alloc { bytes: usize },

    #[error("invalid allocation layout: {0}")]
    InvalidLayout(#[from] LayoutError),
}

impl BenchError {
    /// Process exit status for this error class
    pub fn exit_code(&self) -> u8 {
        match self {
            BenchError::TooLarge { .. } => 2,
            BenchError::Alloc { .. } | BenchError::InvalidLayout(_) => 1,
        }
    }
}
