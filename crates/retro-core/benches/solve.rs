use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use retro_core::graph::{Dag, Graph, parse, validate};
use retro_core::solve::{solve, solve_traced};

struct Tier {
    name: &'static str,
    layers: usize,
    width: usize,
    fan_out: usize,
}

const TIERS: &[Tier] = &[
    Tier {
        name: "small",
        layers: 10,
        width: 10,
        fan_out: 3,
    },
    Tier {
        name: "medium",
        layers: 50,
        width: 200,
        fan_out: 4,
    },
    Tier {
        name: "large",
        layers: 200,
        width: 500,
        fan_out: 6,
    },
];

/// Layered DAG: every node points at up to `fan_out` distinct nodes of the
/// next layer. The last layer is all terminals.
fn layered_dag(tier: &Tier, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let node_count = tier.layers * tier.width;
    let mut edges = Vec::new();

    for layer in 0..tier.layers.saturating_sub(1) {
        let next_base = (layer + 1) * tier.width;
        for offset in 0..tier.width {
            let from = layer * tier.width + offset;
            let mut targets: Vec<usize> = (0..tier.fan_out)
                .map(|_| next_base + rng.gen_range(0..tier.width))
                .collect();
            targets.sort_unstable();
            targets.dedup();
            edges.extend(targets.into_iter().map(|to| (from, to)));
        }
    }

    Graph::from_edges(node_count, edges).expect("layered graph is simple")
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for tier in TIERS {
        let graph = layered_dag(tier, 0x5EED_u64 + tier.layers as u64);
        let text = graph.to_edge_list();
        let dag: Dag = validate(graph.clone()).expect("layered graph is acyclic");
        group.throughput(Throughput::Elements(graph.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("parse", tier.name), &text, |b, text| {
            b.iter(|| black_box(parse(text)))
        });

        group.bench_with_input(
            BenchmarkId::new("validate", tier.name),
            &graph,
            |b, graph| b.iter(|| black_box(validate(graph.clone()))),
        );

        group.bench_with_input(BenchmarkId::new("solve", tier.name), &dag, |b, dag| {
            b.iter(|| black_box(solve(dag)))
        });

        group.bench_with_input(
            BenchmarkId::new("solve_traced", tier.name),
            &dag,
            |b, dag| b.iter(|| black_box(solve_traced(dag))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
