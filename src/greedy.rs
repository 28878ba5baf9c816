use std::fmt;
use std::str::FromStr;

use crate::coverage::CoverageState;
use crate::error::{ConfigError, Error, SolveError};
use crate::incidence::IncidenceModel;
use crate::unit_cost::{self, UnitCost};

/// How the greedy loop keeps its unit costs up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Recount every set from scratch in every iteration.
    Naive,
    /// Update only the sets touched by newly covered elements.
    Optimized,
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Strategy, ConfigError> {
        match s {
            "naive" | "NG" => Ok(Strategy::Naive),
            "optimized" | "OG" => Ok(Strategy::Optimized),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Naive => write!(f, "naive"),
            Strategy::Optimized => write!(f, "optimized"),
        }
    }
}

/// Approximates a minimum cost set cover of `model` with the greedy heuristic.
///
/// In every iteration the set with the lowest cost per newly covered element
/// is selected, the lowest index winning among equal unit costs. This is the
/// classical ln(n)-approximation. Both strategies select the same sets in the
/// same order; they differ only in how unit costs are maintained:
///
/// * [`Strategy::Naive`] recounts the uncovered elements of every set in every
///   iteration, `O(n * sum |S|)` overall.
/// * [`Strategy::Optimized`] keeps a running uncovered count per set and only
///   touches the sets containing newly covered elements. Each incidence is
///   updated at most once, so apart from the `O(m)` minimum scan per
///   iteration the work is `O(sum |S|)`.
///
/// Fails without solving if some element is contained in no set.
pub fn solve(model: &IncidenceModel, strategy: Strategy) -> Result<CoverageState, Error> {
    model.validate()?;
    tracing::debug!(n = model.n, m = model.m, %strategy, "starting greedy solve");
    let state = match strategy {
        Strategy::Naive => naive(model)?,
        Strategy::Optimized => optimized(model)?,
    };
    tracing::debug!(sets = state.steps().len(), total_cost = state.total_cost(), "greedy solve finished");
    Ok(state)
}

/// Naive greedy. Expects a model that passed [`IncidenceModel::validate`].
pub fn naive(model: &IncidenceModel) -> Result<CoverageState, SolveError> {
    let mut state = CoverageState::new(model.n, model.m);
    let mut unit_costs = vec![UnitCost::Unusable; model.m];
    while !state.is_complete() {
        recount(model, &state, &mut unit_costs);
        let best = pick(&unit_costs, &state)?;
        let mut newly_covered = 0;
        for e in model.elements_of(best).iter().cloned() {
            if state.mark_covered(e) {
                newly_covered += 1;
            }
        }
        state.select_set(best, model.cost(best), newly_covered);
        tracing::trace!(
            set = best + 1,
            unit_cost = %unit_costs[best],
            newly_covered,
            covered = state.covered_count(),
            "selected set"
        );
    }
    Ok(state)
}

/// Optimized greedy. Expects a model that passed [`IncidenceModel::validate`].
pub fn optimized(model: &IncidenceModel) -> Result<CoverageState, SolveError> {
    let mut state = CoverageState::new(model.n, model.m);
    // remaining[c] is the number of uncovered elements of set c
    let mut remaining: Vec<usize> = model.elements_of.iter().map(|s| s.len()).collect();
    let mut unit_costs: Vec<UnitCost> = (0..model.m).map(|c| UnitCost::new(model.cost(c), remaining[c])).collect();
    while !state.is_complete() {
        let best = pick(&unit_costs, &state)?;
        let selected_cost = unit_costs[best];
        let mut newly_covered = 0;
        for e in model.elements_of(best).iter().cloned() {
            if !state.mark_covered(e) {
                continue;
            }
            newly_covered += 1;
            for c in model.sets_of(e).iter().cloned() {
                remaining[c] -= 1;
                unit_costs[c] = UnitCost::new(model.cost(c), remaining[c]);
            }
        }
        // best itself is among the sets of its newly covered elements
        debug_assert_eq!(remaining[best], 0);
        state.select_set(best, model.cost(best), newly_covered);
        tracing::trace!(
            set = best + 1,
            unit_cost = %selected_cost,
            newly_covered,
            covered = state.covered_count(),
            "selected set"
        );
    }
    Ok(state)
}

fn pick(unit_costs: &[UnitCost], state: &CoverageState) -> Result<usize, SolveError> {
    #[cfg(feature = "parallel")]
    let best = unit_cost::par_cheapest(unit_costs);
    #[cfg(not(feature = "parallel"))]
    let best = unit_cost::cheapest(unit_costs);
    best.ok_or(SolveError::NoUsableSet { covered: state.covered_count(), n: state.n })
}

fn uncovered_in(model: &IncidenceModel, state: &CoverageState, set: usize) -> usize {
    model.elements_of(set).iter().filter(|e| !state.is_covered(**e)).count()
}

#[cfg(not(feature = "parallel"))]
fn recount(model: &IncidenceModel, state: &CoverageState, unit_costs: &mut [UnitCost]) {
    for (c, u) in unit_costs.iter_mut().enumerate() {
        *u = UnitCost::new(model.cost(c), uncovered_in(model, state, c));
    }
}

#[cfg(feature = "parallel")]
fn recount(model: &IncidenceModel, state: &CoverageState, unit_costs: &mut [UnitCost]) {
    use rayon::prelude::*;

    unit_costs
        .par_iter_mut()
        .enumerate()
        .for_each(|(c, u)| *u = UnitCost::new(model.cost(c), uncovered_in(model, state, c)));
}
