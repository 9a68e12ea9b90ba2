extern crate criterion;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use paulix::pauli::{commutes_with, pauli_random, PauliString};
use rand::prelude::*;

pub fn commutes_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("PauliString::commutes_with");
    for size in [16usize, 128usize, 1024usize] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, size| {
            bencher.iter_batched(
                || (random_pauli(*size), random_pauli(*size)),
                |pair| commutes_with(&pair.0, &pair.1),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

pub fn conjugate_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("conjugate_rotation");
    for size in [16usize, 128usize, 1024usize] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, size| {
            bencher.iter_batched(
                || loop {
                    let through = paulix::Rotation::new(2, random_pauli(*size));
                    let target = paulix::Rotation::new(1, random_pauli(*size));
                    if through.basis().anti_commutes_with(target.basis()) {
                        return (through, target);
                    }
                },
                |(through, target)| paulix::conjugate_rotation(&through, &target).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, commutes_benchmark, conjugate_benchmark);
criterion_main!(benches);

fn random_pauli(qubit_count: usize) -> PauliString {
    pauli_random(qubit_count, &mut thread_rng())
}
