use std::fmt;

use clap::{Parser, ValueEnum};

use crate::error::BenchError;

/// N used when none (or a non-positive one) is given
pub const DEFAULT_N: usize = 100_000;

/// Node capacity of the stack-resident index list
pub const STACK_CAPACITY: usize = 1_000_000;

/// Memory layout of the traversed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Layout {
    /// Flat array, successor is the next slot
    Array,
    /// One heap allocation per node, built tail to head
    List,
    /// Heap nodes carved out of a single allocation, built head to tail
    ListBlock,
    /// Fixed-capacity array on the stack, linked by index
    ListStack,
}

impl Layout {
    pub const ALL: [Layout; 4] = [
        Layout::Array,
        Layout::List,
        Layout::ListBlock,
        Layout::ListStack,
    ];

    /// Workload name printed on the report line
    pub fn workload(self) -> &'static str {
        match self {
            Layout::Array => "array_add",
            Layout::List => "list_add",
            Layout::ListBlock => "list_add_block",
            Layout::ListStack => "list_add_stack",
        }
    }

    /// Largest accepted N
    pub fn max_n(self) -> usize {
        match self {
            Layout::Array => 200_000_000,
            // linked lists are memory-heavy, keep the guard tighter
            Layout::List | Layout::ListBlock => 50_000_000,
            Layout::ListStack => STACK_CAPACITY,
        }
    }

    pub fn default_n(self) -> usize {
        DEFAULT_N
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.workload())
    }
}

/// Self-timed, or observed by an external tool through the ROI markers only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[default]
    Timed,
    Traced,
}

#[derive(Debug, Parser)]
#[command(
    name = "ptrchase",
    version,
    about = "Traverse N integers under a chosen memory layout and report the checksum",
    long_about = None
)]
pub struct Args {
    /// Memory layout to traverse
    #[arg(value_enum)]
    pub layout: Layout,

    /// Number of elements; absent or <= 0 selects the default
    #[arg(allow_negative_numbers = true)]
    pub n: Option<i64>,

    /// Timing mode; `traced` leaves the ROI markers as the only signal
    #[arg(long, value_enum, env = "PTRCHASE_MODE", default_value_t = Mode::Timed)]
    pub mode: Mode,

    /// Always append contiguity diagnostics to the report line
    #[arg(long)]
    pub contiguity: bool,
}

/// Fully resolved parameters of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub layout: Layout,
    pub n: usize,
    pub mode: Mode,
    pub contiguity: bool,
}

impl RunConfig {
    /// Apply the default for a missing or non-positive N and reject N above
    /// the layout maximum.
    pub fn new(layout: Layout, n: Option<i64>, mode: Mode) -> Result<Self, BenchError> {
        let n = resolve_n(layout, n)?;
        Ok(RunConfig {
            layout,
            n,
            mode,
            contiguity: layout == Layout::ListBlock,
        })
    }

    /// Report contiguity diagnostics regardless of layout
    pub fn with_contiguity(mut self, contiguity: bool) -> Self {
        self.contiguity |= contiguity;
        self
    }
}

impl TryFrom<Args> for RunConfig {
    type Error = BenchError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(RunConfig::new(args.layout, args.n, args.mode)?.with_contiguity(args.contiguity))
    }
}

fn resolve_n(layout: Layout, n: Option<i64>) -> Result<usize, BenchError> {
    let max = layout.max_n();
    match n {
        None => Ok(layout.default_n()),
        Some(n) if n <= 0 => Ok(layout.default_n()),
        Some(n) => match usize::try_from(n) {
            Ok(value) if value <= max => Ok(value),
            _ => Err(BenchError::TooLarge { layout, n, max }),
        },
    }
}
