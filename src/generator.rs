use std::io::Write;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GeneratorError;
use crate::incidence::{Cost, IncidenceModel};
use crate::parse::Layout;

/// Parameters of a random instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub n: usize,
    pub m: usize,
    pub max_cost: Cost,
    pub density: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> GeneratorConfig {
        GeneratorConfig { n: 1000, m: 1000, max_cost: 100, density: 0.1, seed: 1 }
    }
}

/// Generates a random feasible instance.
///
/// Costs are drawn uniformly from `1..=max_cost`. Every (element, set) cell
/// is filled with probability `density`; an element that ends up in no set
/// is put into one set chosen uniformly at random, so each element is
/// covered at least once. The same config always yields the same instance.
pub fn generate(config: &GeneratorConfig) -> Result<IncidenceModel, GeneratorError> {
    let GeneratorConfig { n, m, max_cost, density, seed } = *config;
    if m == 0 && n > 0 {
        return Err(GeneratorError::NoSets { n });
    }
    if max_cost == 0 {
        return Err(GeneratorError::ZeroMaxCost);
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(GeneratorError::InvalidDensity(density));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let costs: Vec<Cost> = (0..m).map(|_| rng.gen_range(1..=max_cost)).collect();
    let mut memberships: Vec<(usize, usize)> = Vec::new();
    for e in 0..n {
        let before = memberships.len();
        for s in 0..m {
            if rng.gen_bool(density) {
                memberships.push((e, s));
            }
        }
        if memberships.len() == before {
            memberships.push((e, rng.gen_range(0..m)));
        }
    }
    let model = IncidenceModel::from_memberships(n, costs, memberships)?;
    tracing::debug!(n, m, incidences = model.incidences(), seed, "generated instance");
    Ok(model)
}

/// A file name describing the instance, like `rand-cols-20x1000-MC100-D0.1-S1`.
pub fn instance_name(config: &GeneratorConfig, layout: Layout) -> String {
    format!(
        "rand-{}-{}x{}-MC{}-D{}-S{}",
        layout, config.n, config.m, config.max_cost, config.density, config.seed
    )
}

/// Writes `model` in the given layout. Parsing the output with the same
/// layout yields an equal model.
pub fn write_instance<W: Write>(model: &IncidenceModel, layout: Layout, mut out: W) -> std::io::Result<()> {
    writeln!(out, "{} {}", model.n, model.m)?;
    match layout {
        Layout::Rows => {
            writeln!(out, "{}", model.costs.iter().join(" "))?;
            for e in 0..model.n {
                let sets = model.sets_of(e);
                writeln!(out, "{}", sets.len())?;
                writeln!(out, "{}", sets.iter().map(|s| s + 1).join(" "))?;
            }
        }
        Layout::Cols => {
            for s in 0..model.m {
                let elements = model.elements_of(s);
                write!(out, "{} {}", model.cost(s), elements.len())?;
                for e in elements.iter() {
                    write!(out, " {}", e + 1)?;
                }
                writeln!(out)?;
            }
        }
    }
    out.flush()
}
