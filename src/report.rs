use std::io::Write;
use std::time::Duration;

use itertools::Itertools;

use crate::coverage::CoverageState;

/// What the operator is told about a finished solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub sets: usize,
    pub total_cost: u64,
    pub runtime: Duration,
}

impl Summary {
    pub fn new(state: &CoverageState, runtime: Duration) -> Summary {
        Summary { sets: state.steps().len(), total_cost: state.total_cost(), runtime }
    }

    pub fn log(&self) {
        tracing::info!("Selected {} sets", self.sets);
        tracing::info!("Total cost: {}", self.total_cost);
        tracing::info!("Runtime: {:.6} s", self.runtime.as_secs_f64());
    }
}

/// Writes the number of selected sets, then their 1-based indices in
/// increasing order on one line.
pub fn write_solution<W: Write>(state: &CoverageState, mut out: W) -> std::io::Result<()> {
    let selected = state.selected();
    writeln!(out, "{}", selected.len())?;
    writeln!(out, "{}", selected.iter().map(|s| s + 1).join(" "))?;
    out.flush()
}
