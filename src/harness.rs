//! One benchmark run: build, analyze, timed traversal inside the ROI, report.

use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    config::{Layout, Mode, RunConfig, STACK_CAPACITY},
    contiguity::{self, Contiguity},
    error::BenchError,
    kernel::{self, Traversal, expected_sum},
    node::IndexNode,
    roi,
    sequence::{ArraySeq, BlockList, Chain, HeapList, StackList},
    timer::Stopwatch,
};

/// Stack needed by a thread executing [`run`] for any layout
pub const RUN_STACK_SIZE: usize = 2 * STACK_CAPACITY * size_of::<IndexNode>() + (8 << 20);

/// Outcome of one run, printed as a single `key=value` line
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub workload: &'static str,
    pub n: usize,
    pub sum: i64,
    /// Elements visited by the traversal
    pub steps: usize,
    /// Absent in traced mode
    pub time_ns: Option<u64>,
    pub mode: Mode,
    pub node_size: usize,
    pub contiguity: Contiguity,
    /// Whether contiguity fields go on the line
    pub show_contiguity: bool,
}

impl Report {
    /// Line for stdout; traced runs print nothing, leaving the ROI markers as
    /// the only signal
    pub fn line(&self) -> Option<String> {
        match self.mode {
            Mode::Timed => Some(self.to_string()),
            Mode::Traced => None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "workload={} n={} sum={}",
            self.workload, self.n, self.sum
        )?;
        if let Some(ns) = self.time_ns {
            write!(f, " time_ns={ns}")?;
        }
        if self.show_contiguity {
            write!(f, " node_size={} {}", self.node_size, self.contiguity)?;
        }
        Ok(())
    }
}

/// Execute one run as described by `config`
pub fn run(config: &RunConfig) -> Result<Report, BenchError> {
    match config.layout {
        Layout::Array => measure(config, &ArraySeq::build(config.n)?),
        Layout::List => measure(config, &HeapList::build(config.n)?),
        Layout::ListBlock => measure(config, &BlockList::build(config.n)?),
        Layout::ListStack => run_stack(config),
    }
}

// Keeps the fixed node array in its own frame, released on return. Only the
// first N slots are written.
#[inline(never)]
fn run_stack(config: &RunConfig) -> Result<Report, BenchError> {
    let mut storage = [IndexNode::VACANT; STACK_CAPACITY];
    let list = StackList::build(&mut storage, config.n)?;
    measure(config, &list)
}

fn measure<C: Chain>(config: &RunConfig, chain: &C) -> Result<Report, BenchError> {
    // Runs only when reported, and never inside the timed region
    let contiguity = if config.contiguity {
        let contiguity = contiguity::analyze(chain);
        debug!(
            layout = %config.layout,
            links = contiguity.links,
            contiguous = contiguity.contiguous,
            "contiguity analyzed"
        );
        contiguity
    } else {
        Contiguity::default()
    };

    let stopwatch = Stopwatch::start(config.mode);
    roi::begin();
    let Traversal { sum, steps } = kernel::traverse(chain);
    roi::end();
    let time_ns = stopwatch.stop();

    if sum != expected_sum(config.n) || steps != config.n {
        warn!(sum, steps, n = config.n, "traversal disagrees with closed form");
    }
    info!(layout = %config.layout, n = config.n, ?time_ns, "traversal complete");

    Ok(Report {
        workload: config.layout.workload(),
        n: config.n,
        sum,
        steps,
        time_ns,
        mode: config.mode,
        node_size: chain.unit_size(),
        contiguity,
        show_contiguity: config.contiguity,
    })
}
