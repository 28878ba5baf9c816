use bit_set::BitSet;

use crate::incidence::{Cost, IncidenceModel};

/// One iteration of the greedy loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub set: usize,
    pub newly_covered: usize,
    pub covered_count: usize, // after this step
    pub total_cost: u64,      // after this step
}

/// A partial cover under construction. Flags only ever go from unset to set.
#[derive(Debug, Clone)]
pub struct CoverageState {
    pub n: usize,
    covered: BitSet,
    selected: BitSet,
    covered_count: usize,
    total_cost: u64,
    steps: Vec<Step>,
}

impl CoverageState {
    pub fn new(n: usize, m: usize) -> CoverageState {
        CoverageState {
            n,
            covered: BitSet::with_capacity(n),
            selected: BitSet::with_capacity(m),
            covered_count: 0,
            total_cost: 0,
            steps: Vec::new(),
        }
    }

    /// Returns `true` if the element was not covered before.
    pub fn mark_covered(&mut self, element: usize) -> bool {
        if self.covered.insert(element) {
            self.covered_count += 1;
            true
        } else {
            false
        }
    }

    /// Adds `set` to the cover and records the step. `newly_covered`
    /// is the number of elements the caller marked for it.
    pub fn select_set(&mut self, set: usize, cost: Cost, newly_covered: usize) {
        self.selected.insert(set);
        self.total_cost += cost as u64;
        self.steps.push(Step { set, newly_covered, covered_count: self.covered_count, total_cost: self.total_cost });
    }

    pub fn is_covered(&self, element: usize) -> bool {
        self.covered.contains(element)
    }

    pub fn is_selected(&self, set: usize) -> bool {
        self.selected.contains(set)
    }

    pub fn is_complete(&self) -> bool {
        self.covered_count == self.n
    }

    pub fn covered_count(&self) -> usize {
        self.covered_count
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    /// Selected sets in increasing index order.
    pub fn selected(&self) -> Vec<usize> {
        self.selected.iter().collect()
    }

    /// Selected sets in the order they were picked.
    pub fn selection_order(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.set).collect()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Checks against the model that the selected sets cover every element.
    pub fn verify(&self, model: &IncidenceModel) -> bool {
        let mut hit = BitSet::with_capacity(model.n);
        for s in self.selected.iter() {
            hit.extend(model.elements_of(s).iter().cloned());
        }
        hit.len() == model.n
    }
}
