pub mod coverage;
pub mod error;
pub mod generator;
pub mod greedy;
pub mod incidence;
pub mod parse;
pub mod report;
pub mod unit_cost;

use std::path::Path;
use std::time::Instant;

// Re-exports to flatten the crate.
pub use coverage::CoverageState;
pub use error::{Error, Result};
pub use greedy::Strategy;
pub use incidence::IncidenceModel;
pub use parse::Layout;
pub use report::Summary;

/// Reads the instance at `input`, solves it and writes the solution to
/// `output`. Nothing is written if reading, validation or the solve fails.
pub fn solve_file<W: std::io::Write>(
    input: impl AsRef<Path>,
    layout: Layout,
    strategy: Strategy,
    output: W,
) -> Result<Summary> {
    let model = parse::read_instance(input, layout)?;
    let start = Instant::now();
    let state = greedy::solve(&model, strategy)?;
    let summary = Summary::new(&state, start.elapsed());
    report::write_solution(&state, output)?;
    Ok(summary)
}
