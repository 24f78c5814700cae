//! Benchmarks for qevo circuit operations
//!
//! Run with: cargo bench -p qevo-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qevo_ir::{Circuit, ParameterExpression, Pauli, QubitId};

/// A layered circuit of nearest-neighbour ZZ and single-qubit X rotations,
/// all proportional to the parameter `t`.
fn layered_circuit(n: u32, layers: usize) -> Circuit {
    let mut circuit = Circuit::with_size("bench", n);
    for _ in 0..layers {
        for i in 0..n - 1 {
            circuit
                .pauli_rotation(
                    [(QubitId(i), Pauli::Z), (QubitId(i + 1), Pauli::Z)],
                    ParameterExpression::symbol("t") * 0.5,
                )
                .unwrap();
        }
        for i in 0..n {
            circuit
                .pauli_rotation([(QubitId(i), Pauli::X)], ParameterExpression::symbol("t"))
                .unwrap();
        }
    }
    circuit
}

/// Benchmark adding gates to a circuit
fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("h_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10);
        b.iter(|| {
            circuit.h(black_box(QubitId(0))).unwrap();
        });
    });

    group.bench_function("pauli_rotation_4q", |b| {
        let mut circuit = Circuit::with_size("bench", 10);
        b.iter(|| {
            circuit
                .pauli_rotation(
                    black_box([
                        (QubitId(0), Pauli::X),
                        (QubitId(3), Pauli::Y),
                        (QubitId(5), Pauli::Z),
                        (QubitId(9), Pauli::X),
                    ]),
                    ParameterExpression::symbol("t"),
                )
                .unwrap();
        });
    });

    group.finish();
}

/// Benchmark binding the time parameter
fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind");

    for num_qubits in &[5u32, 10, 20, 50] {
        let circuit = layered_circuit(*num_qubits, 10);
        group.bench_with_input(
            BenchmarkId::new("bind_t", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.bind("t", black_box(0.1))));
            },
        );
    }

    group.finish();
}

/// Benchmark inversion and depth calculation
fn bench_inverse_and_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse_depth");

    for num_qubits in &[5u32, 10, 20, 50] {
        let circuit = layered_circuit(*num_qubits, 5);

        group.bench_with_input(
            BenchmarkId::new("inverse", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.inverse()));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("depth", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.depth()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gate_addition,
    bench_bind,
    bench_inverse_and_depth,
);

criterion_main!(benches);
