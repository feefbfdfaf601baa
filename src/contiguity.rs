use std::fmt;

use crate::sequence::Chain;

/// How many logical links are also physically adjacent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contiguity {
    /// Links examined (`len - 1` for a non-empty sequence)
    pub links: usize,
    /// Links whose successor sits exactly one unit after its predecessor
    pub contiguous: usize,
}

impl Contiguity {
    /// Fraction of adjacent links in [0, 1]; a sequence without links counts
    /// as fully contiguous.
    pub fn ratio(&self) -> f64 {
        if self.links == 0 {
            1.0
        } else {
            self.contiguous as f64 / self.links as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

impl fmt::Display for Contiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "contiguous_links={}/{} contiguous_pct={:.2}",
            self.contiguous,
            self.links,
            self.percent()
        )
    }
}

/// Walk `chain` from head to tail and count links whose successor location is
/// the predecessor's plus one unit.
pub fn analyze<C: Chain>(chain: &C) -> Contiguity {
    let unit = chain.unit_size();
    let mut report = Contiguity::default();

    let Some(mut prev) = chain.head() else {
        return report;
    };

    while let Some(next) = chain.next(prev) {
        report.links += 1;
        if chain.location(prev).checked_add(unit) == Some(chain.location(next)) {
            report.contiguous += 1;
        }
        prev = next;
    }

    report
}
