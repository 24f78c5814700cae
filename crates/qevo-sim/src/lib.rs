//! `qevo-sim` — Trotter-Suzuki time-evolution circuit synthesis.
//!
//! Converts a sum-of-Paulis Hamiltonian into a `qevo_ir::Circuit` that
//! approximates `exp(-i H t)` using Lie-Trotter (order 1) or Suzuki
//! (even order) product formulas:
//!
//! - **Templates** ([`TrotterEvolution`]) — parametric circuits in the
//!   evolution time `t`, plain or controlled by qubit 0
//! - **Factories** ([`evolution`]) — fixed-step and fixed-interval policies
//!   that turn a template into a concrete circuit per requested time
//! - **Partial evolution** ([`TrotterPartialTimeEvolution`]) — evolution of
//!   the terms supported on a qubit window, cached per window
//! - **Hadamard test** ([`hadamard`]) — ancilla sandwich around a controlled
//!   evolution
//!
//! Every factory takes an optional [`CircuitTranspiler`] that rewrites each
//! circuit before it is returned.
//!
//! # Quick start
//!
//! ```rust
//! use qevo_sim::factory::TimeEvolutionCircuitFactory;
//! use qevo_sim::{Hamiltonian, QubitHamiltonianInput, TrotterTimeEvolutionFactory};
//!
//! // Transverse-field Ising model on two qubits: H = -J·ZZ - h·(X₀ + X₁)
//! let h = Hamiltonian::from_labels([("Z0 Z1", -1.0), ("X0", -0.5), ("X1", -0.5)]).unwrap();
//! let problem = QubitHamiltonianInput::new(2, h).unwrap();
//!
//! let factory = TrotterTimeEvolutionFactory::new(&problem, None, Some(10), 2).unwrap();
//! let circuit = factory.circuit(1.0).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 10 * 6);
//! ```

pub mod config;
pub mod decomposition;
pub mod error;
pub mod evolution;
pub mod factory;
pub mod hadamard;
pub mod hamiltonian;
pub mod partial;
pub mod policy;
pub mod problem;
pub mod synthesis;
pub mod template;
pub mod transpile;
pub mod trotter;

pub use config::TrotterConfig;
pub use error::{SimError, SimResult};
pub use evolution::{
    FixedIntervalTrotterControlledTimeEvolution, FixedIntervalTrotterTimeEvolution,
    FixedStepTrotterControlledTimeEvolution, FixedStepTrotterTimeEvolution,
    TrotterControlledTimeEvolutionFactory, TrotterTimeEvolutionFactory,
};
pub use hadamard::{HadamardTestCircuitFactory, construct_hadamard_circuit};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliString};
pub use partial::TrotterPartialTimeEvolution;
pub use policy::{StepCount, StepPolicy, evolution_trotter_step};
pub use problem::QubitHamiltonianInput;
pub use template::EvolutionTemplate;
pub use transpile::{CircuitTranspiler, PauliRotationDecomposer, SequentialTranspiler};
pub use trotter::TrotterEvolution;
