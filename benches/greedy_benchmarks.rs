//! Naive versus optimized greedy on random 20x1000, 1000x20 and 1000x1000
//! instances with densities from 0.01 to 0.5 and costs up to 100.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use greedycover::generator::{self, GeneratorConfig};
use greedycover::{greedy, Layout, Strategy};

const SIZES: [(usize, usize); 3] = [(20, 1000), (1000, 20), (1000, 1000)];
const DENSITIES: [f64; 4] = [0.01, 0.1, 0.2, 0.5];

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    group.sample_size(10);

    for (n, m) in SIZES {
        for density in DENSITIES {
            let config = GeneratorConfig { n, m, max_cost: 100, density, seed: 1 };
            let model = generator::generate(&config).expect("valid generator config");
            let name = generator::instance_name(&config, Layout::Cols);
            group.throughput(Throughput::Elements(model.incidences() as u64));

            for strategy in [Strategy::Naive, Strategy::Optimized] {
                group.bench_with_input(BenchmarkId::new(strategy.to_string(), &name), &model, |b, model| {
                    b.iter(|| greedy::solve(black_box(model), strategy).expect("feasible instance"))
                });
            }
        }
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
