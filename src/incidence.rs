use crate::error::ModelError;

/// Cost of a single candidate set.
pub type Cost = u32;

/// Bipartite incidence structure of a set cover instance.
///
/// Elements are the rows `0..n`, candidate sets the columns `0..m`.
/// Both directions of the membership relation are stored, and neither
/// changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceModel {
    pub n: usize,
    pub m: usize,
    pub costs: Vec<Cost>,             // cost of sets 0, ..., m-1
    pub elements_of: Vec<Vec<usize>>, // elements contained in each set
    pub sets_of: Vec<Vec<usize>>,     // sets containing each element
}

impl IncidenceModel {
    /// Builds the model from 0-based `(element, set)` membership pairs.
    /// The number of sets is `costs.len()`. Repeated pairs count once.
    pub fn from_memberships<I>(n: usize, costs: Vec<Cost>, memberships: I) -> Result<IncidenceModel, ModelError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let m = costs.len();
        let mut elements_of: Vec<Vec<usize>> = vec![Vec::new(); m];
        let mut sets_of: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (e, s) in memberships {
            if e >= n {
                return Err(ModelError::ElementOutOfRange { element: e, n });
            }
            if s >= m {
                return Err(ModelError::SetOutOfRange { set: s, m });
            }
            elements_of[s].push(e);
            sets_of[e].push(s);
        }
        for adj in elements_of.iter_mut().chain(sets_of.iter_mut()) {
            adj.sort_unstable();
            adj.dedup();
        }
        Ok(IncidenceModel { n, m, costs, elements_of, sets_of })
    }

    pub fn cost(&self, set: usize) -> Cost {
        self.costs[set]
    }

    pub fn elements_of(&self, set: usize) -> &[usize] {
        &self.elements_of[set]
    }

    pub fn sets_of(&self, element: usize) -> &[usize] {
        &self.sets_of[element]
    }

    /// Total number of (element, set) incidences.
    pub fn incidences(&self) -> usize {
        self.elements_of.iter().map(|s| s.len()).sum()
    }

    /// Elements contained in no set, in increasing order.
    pub fn uncovered_elements(&self) -> Vec<usize> {
        (0..self.n).filter(|e| self.sets_of[*e].is_empty()).collect()
    }

    pub fn has_coverage(&self) -> bool {
        self.sets_of.iter().all(|sets| !sets.is_empty())
    }

    /// Checks that a cover exists, naming every element no set contains.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.has_coverage() {
            return Ok(());
        }
        let elements = self.uncovered_elements();
        for e in elements.iter() {
            tracing::error!("No set contains element {}", e + 1);
        }
        Err(ModelError::Infeasible { elements })
    }
}
