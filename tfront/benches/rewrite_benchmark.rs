extern crate criterion;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use paulix::{pauli_random, Operation, Rotation};
use rand::prelude::*;
use tfront::{Circuit, RewriteOptions};

fn random_circuit(qubit_count: usize, length: usize) -> Circuit {
    let mut rng = thread_rng();
    let ops: Vec<Operation> = (0..length)
        .map(|_| {
            let angle = [-2i8, -1, 0, 1, 2].choose(&mut rng).copied().unwrap();
            Operation::Rotation(Rotation::new(angle, pauli_random(qubit_count, &mut rng)))
        })
        .collect();
    Circuit::new(ops).expect("non-empty circuit")
}

pub fn rewrite_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("Circuit::rewrite");
    group.sample_size(20);
    for length in [200usize, 2000usize, 20000usize] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |bencher, length| {
            bencher.iter_batched(
                || random_circuit(16, *length),
                |mut circuit| circuit.rewrite(&RewriteOptions::default()).unwrap(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, rewrite_benchmark);
criterion_main!(benches);
