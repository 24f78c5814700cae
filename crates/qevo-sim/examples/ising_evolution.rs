//! Build Trotterized evolution circuits for a transverse-field Ising chain.
//!
//! Run with: RUST_LOG=qevo_sim=debug cargo run -p qevo-sim --example ising_evolution

use std::sync::Arc;

use qevo_sim::factory::{PartialTimeEvolutionCircuitFactory, TimeEvolutionCircuitFactory};
use qevo_sim::{
    HadamardTestCircuitFactory, Hamiltonian, PauliRotationDecomposer, QubitHamiltonianInput,
    SimResult, TrotterConfig, TrotterControlledTimeEvolutionFactory, TrotterPartialTimeEvolution,
    TrotterTimeEvolutionFactory,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> SimResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let n = 4;
    let mut h = Hamiltonian::new();
    for i in 0..n - 1 {
        h.add_term(format!("Z{i} Z{}", i + 1).parse()?, -1.0);
    }
    for i in 0..n {
        h.add_term(format!("X{i}").parse()?, -0.5);
    }
    let problem = QubitHamiltonianInput::new(n, h)?;

    let config = TrotterConfig::from_yaml_str("time_step: 0.1\ntrotter_order: 2\n")?;
    let factory = TrotterTimeEvolutionFactory::from_config(&problem, &config)?;
    let circuit = factory.circuit(1.0)?;
    info!(
        n_ops = circuit.num_ops(),
        depth = circuit.depth(),
        "fixed-interval evolution"
    );

    let lowered = TrotterTimeEvolutionFactory::new(&problem, None, Some(10), 1)?
        .with_transpiler(Arc::new(PauliRotationDecomposer));
    let circuit = lowered.circuit(1.0)?;
    info!(n_ops = circuit.num_ops(), "lowered fixed-step evolution");

    let controlled = TrotterControlledTimeEvolutionFactory::new(&problem, None, Some(4), 2)?;
    let hadamard = HadamardTestCircuitFactory::new(controlled, true);
    let circuit = hadamard.circuit(0.5)?;
    info!(
        n_qubits = circuit.num_qubits(),
        n_ops = circuit.num_ops(),
        "hadamard test"
    );

    let partial = TrotterPartialTimeEvolution::new(problem, 5)?;
    for (idx0, idx1) in [(0, 2), (1, 3), (0, 2)] {
        let circuit = partial.circuit(idx0, idx1, 0.2)?;
        info!(idx0, idx1, n_ops = circuit.num_ops(), "partial evolution");
    }
    info!(cached = partial.cached_len(), "partial templates");

    Ok(())
}
