use std::cmp::Ordering;
use std::fmt;

use crate::incidence::Cost;

/// Cost per newly covered element of a candidate set.
///
/// Kept as the exact fraction `cost / uncovered` and compared by
/// cross-multiplication, so equal ratios tie exactly. A set with nothing
/// left to cover is `Unusable` and orders after every finite value.
#[derive(Debug, Clone, Copy)]
pub enum UnitCost {
    Finite { cost: Cost, uncovered: usize },
    Unusable,
}

impl UnitCost {
    pub fn new(cost: Cost, uncovered: usize) -> UnitCost {
        if uncovered == 0 {
            UnitCost::Unusable
        } else {
            UnitCost::Finite { cost, uncovered }
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, UnitCost::Finite { .. })
    }
}

impl Ord for UnitCost {
    fn cmp(&self, other: &UnitCost) -> Ordering {
        match (*self, *other) {
            (UnitCost::Finite { cost: ca, uncovered: ua }, UnitCost::Finite { cost: cb, uncovered: ub }) => {
                (ca as u128 * ub as u128).cmp(&(cb as u128 * ua as u128))
            }
            (UnitCost::Finite { .. }, UnitCost::Unusable) => Ordering::Less,
            (UnitCost::Unusable, UnitCost::Finite { .. }) => Ordering::Greater,
            (UnitCost::Unusable, UnitCost::Unusable) => Ordering::Equal,
        }
    }
}

impl PartialOrd for UnitCost {
    fn partial_cmp(&self, other: &UnitCost) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// 1/2 and 2/4 are the same unit cost.
impl PartialEq for UnitCost {
    fn eq(&self, other: &UnitCost) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for UnitCost {}

impl fmt::Display for UnitCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitCost::Finite { cost, uncovered } => write!(f, "{}/{}", cost, uncovered),
            UnitCost::Unusable => write!(f, "unusable"),
        }
    }
}

/// Index of the cheapest usable set, the first one in index order on ties.
///
/// The scan starts from index 0 and only moves on a strictly smaller unit
/// cost. Returns `None` if every set is unusable.
pub fn cheapest(unit_costs: &[UnitCost]) -> Option<usize> {
    if unit_costs.is_empty() {
        return None;
    }
    let mut best = 0;
    for c in 1..unit_costs.len() {
        if unit_costs[c] < unit_costs[best] {
            best = c;
        }
    }
    if unit_costs[best].is_usable() { Some(best) } else { None }
}

/// Same result as [`cheapest`], reduced in parallel over `(unit cost, index)`.
#[cfg(feature = "parallel")]
pub fn par_cheapest(unit_costs: &[UnitCost]) -> Option<usize> {
    use rayon::prelude::*;

    unit_costs
        .par_iter()
        .enumerate()
        .filter(|(_, u)| u.is_usable())
        .min_by(|(i, a), (j, b)| a.cmp(b).then(i.cmp(j)))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_exact_fractions() {
        assert!(UnitCost::new(1, 2) < UnitCost::new(2, 2));
        assert_eq!(UnitCost::new(1, 3), UnitCost::new(2, 6));
        assert!(UnitCost::new(0, 5) < UnitCost::new(1, 1000));
        assert!(UnitCost::new(u32::MAX, 1) < UnitCost::Unusable);
        assert_eq!(UnitCost::new(7, 0), UnitCost::Unusable);
        assert!(UnitCost::new(333_333_333, 999_999_998) > UnitCost::new(1, 3));
    }

    #[test]
    fn cheapest_prefers_lower_index_on_ties() {
        let costs = vec![UnitCost::new(4, 2), UnitCost::new(1, 1), UnitCost::new(3, 3), UnitCost::new(1, 1)];
        assert_eq!(cheapest(&costs), Some(1));
        let costs = vec![UnitCost::Unusable, UnitCost::new(2, 1), UnitCost::new(4, 2)];
        assert_eq!(cheapest(&costs), Some(1));
    }

    #[test]
    fn cheapest_of_nothing_usable() {
        assert_eq!(cheapest(&[]), None);
        assert_eq!(cheapest(&[UnitCost::Unusable, UnitCost::Unusable]), None);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_scan_matches_sequential() {
        let costs: Vec<UnitCost> = (0..10_000).map(|i| UnitCost::new((i % 7) as u32 + 1, i % 5)).collect();
        assert_eq!(par_cheapest(&costs), cheapest(&costs));
        assert_eq!(par_cheapest(&[UnitCost::Unusable]), None);
    }
}
